//! Reversi rules engine.
//!
//! This crate provides the game logic for Reversi (Othello) on any board
//! whose sides are even and at least 4:
//! - Square-grid coordinates and the eight compass directions
//! - A generic fixed-size grid
//! - The Reversi board with its edge candidate set and bracket captures
//! - Game state machine with scores, forced passes and game over detection
//! - A random move policy and a driver that plays games to the end
//!
//! # Modules
//!
//! - [`coord`]: Coordinates and directions
//! - [`grid`]: Fixed-size row-major storage
//! - [`board`]: Tiles, the edge set, legality and captures
//! - [`moves`]: Read-only legal move queries
//! - [`player`]: Sides and scores
//! - [`game`]: Game state machine
//! - [`actions`]: Events produced by moves
//! - [`bot`]: Move policies

pub mod actions;
pub mod board;
pub mod bot;
pub mod coord;
pub mod game;
pub mod grid;
pub mod moves;
pub mod player;

// Re-export commonly used types
pub use actions::{GameEvent, MoveOutcome};
pub use board::{Board, LayoutError, Tile};
pub use bot::{play_to_end, MovePolicy, RandomBot};
pub use coord::{Coord, Direction, ParseCoordError};
pub use game::{Game, GameError, GamePhase, GameResult, GameSnapshot};
pub use grid::{Grid, GridError};
pub use moves::MoveGenerator;
pub use player::{Player, Side};
