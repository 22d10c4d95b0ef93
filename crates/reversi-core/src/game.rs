//! Core game state machine.
//!
//! This module contains the main `Game` struct: it owns the board and the
//! per-side scores, validates and applies moves, and advances turns,
//! including forced passes and the end of the game.

use crate::actions::{GameEvent, MoveOutcome};
use crate::board::{Board, Tile};
use crate::coord::Coord;
use crate::grid::GridError;
use crate::moves::MoveGenerator;
use crate::player::{Player, Side};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Smallest allowed board side
const MIN_SIDE: usize = 4;

/// Game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for `current` to move
    InProgress {
        current: Side,
        /// The other side had no legal move, so `current` is moving again
        passed: bool,
    },

    /// Neither side can move
    Over,
}

/// Final result of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Win(Side),
    Draw,
}

/// Errors that can occur when building a game or applying a move
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("Board sides must be even and at least 4, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Illegal move at {0}")]
    InvalidMove(Coord),

    #[error("Game is over")]
    GameOver,

    #[error("{0} is outside the board")]
    OutOfRange(Coord),
}

impl From<GridError> for GameError {
    fn from(err: GridError) -> Self {
        match err {
            GridError::InvalidSize { width, height } => {
                GameError::InvalidDimensions { width, height }
            }
            GridError::OutOfRange { x, y } => GameError::OutOfRange(Coord::new(x, y)),
        }
    }
}

/// A serializable view of a game, for display and logging
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub width: usize,
    pub height: usize,
    /// Rows of `.`, `w` and `b`
    pub rows: Vec<String>,
    pub white_score: u32,
    pub black_score: u32,
    pub turn: u32,
    pub phase: GamePhase,
    pub result: Option<GameResult>,
}

impl GameSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// The complete game state
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    /// Indexed by `Side::index`
    players: [Player; 2],
    phase: GamePhase,
    /// Turn number (starts at 1)
    turn: u32,
    /// Legal moves for the side to move; empty once the game is over
    legal_moves: Vec<Coord>,
}

fn check_dimensions(width: usize, height: usize) -> Result<(), GameError> {
    let valid = |n: usize| n >= MIN_SIDE && n % 2 == 0;
    if valid(width) && valid(height) {
        Ok(())
    } else {
        Err(GameError::InvalidDimensions { width, height })
    }
}

impl Game {
    /// Create a new game with the standard starting layout. White moves first.
    pub fn new(width: usize, height: usize) -> Result<Self, GameError> {
        check_dimensions(width, height)?;
        let board = Board::starting(width, height)?;
        Self::from_position(board, Side::White)
    }

    /// Create a game from an arbitrary position with `to_move` on turn.
    ///
    /// Scores are taken from the tile counts. If `to_move` has no legal move
    /// but the opponent does, the pass is taken immediately: the opponent
    /// moves, the pass flag is set and the turn counter advances.
    pub fn from_position(board: Board, to_move: Side) -> Result<Self, GameError> {
        check_dimensions(board.width(), board.height())?;

        let score = |side: Side| board.count(side.tile()) as u32;
        let players = [
            Player::new(Side::White, score(Side::White)),
            Player::new(Side::Black, score(Side::Black)),
        ];

        let mut game = Self {
            board,
            players,
            phase: GamePhase::Over,
            turn: 1,
            legal_moves: Vec::new(),
        };
        game.settle(to_move);
        Ok(game)
    }

    /// Put `to_move` on turn, passing for it if it cannot move
    fn settle(&mut self, to_move: Side) {
        let moves = MoveGenerator::new(&self.board);

        let own = moves.legal_moves(to_move);
        if !own.is_empty() {
            self.phase = GamePhase::InProgress {
                current: to_move,
                passed: false,
            };
            self.legal_moves = own;
            return;
        }

        let other = moves.legal_moves(to_move.opponent());
        if !other.is_empty() {
            debug!(side = %to_move, "no legal move at start, passing");
            self.phase = GamePhase::InProgress {
                current: to_move.opponent(),
                passed: true,
            };
            self.turn += 1;
            self.legal_moves = other;
            return;
        }

        self.phase = GamePhase::Over;
        self.legal_moves.clear();
    }

    /// Restore the starting layout on a board of the same size
    pub fn reset(&mut self) -> Result<(), GameError> {
        self.board = Board::starting(self.width(), self.height())?;
        self.players = [
            Player::new(Side::White, 2),
            Player::new(Side::Black, 2),
        ];
        self.turn = 1;
        self.settle(Side::White);
        Ok(())
    }

    pub fn width(&self) -> usize {
        self.board.width()
    }

    pub fn height(&self) -> usize {
        self.board.height()
    }

    /// Read-only access to the board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, GamePhase::Over)
    }

    /// Whether the side to move is moving again because its opponent had to pass
    pub fn passed(&self) -> bool {
        matches!(self.phase, GamePhase::InProgress { passed: true, .. })
    }

    /// The side to move, `None` once the game is over
    pub fn current_side(&self) -> Option<Side> {
        match self.phase {
            GamePhase::InProgress { current, .. } => Some(current),
            GamePhase::Over => None,
        }
    }

    /// The player to move, `None` once the game is over
    pub fn current_player(&self) -> Option<&Player> {
        self.current_side().map(|side| self.player(side))
    }

    pub fn player(&self, side: Side) -> &Player {
        &self.players[side.index()]
    }

    pub fn score(&self, side: Side) -> u32 {
        self.player(side).score
    }

    /// Legal moves for the side to move, in row-major order
    pub fn legal_moves(&self) -> &[Coord] {
        &self.legal_moves
    }

    /// Check whether the side to move may play at `coord`
    pub fn is_legal(&self, coord: Coord) -> bool {
        self.current_side()
            .is_some_and(|side| self.board.is_legal(side, coord))
    }

    /// Winner by score once the game is over
    pub fn result(&self) -> Option<GameResult> {
        if !self.is_over() {
            return None;
        }
        Some(self.standing())
    }

    fn standing(&self) -> GameResult {
        let white = self.score(Side::White);
        let black = self.score(Side::Black);
        match white.cmp(&black) {
            std::cmp::Ordering::Greater => GameResult::Win(Side::White),
            std::cmp::Ordering::Less => GameResult::Win(Side::Black),
            std::cmp::Ordering::Equal => GameResult::Draw,
        }
    }

    /// Tiles of row `y`, west to east
    pub fn row(&self, y: i32) -> Result<impl Iterator<Item = Tile> + '_, GameError> {
        Ok(self.board.grid().row(y)?)
    }

    /// Tiles of column `x`, north to south
    pub fn column(&self, x: i32) -> Result<impl Iterator<Item = Tile> + '_, GameError> {
        Ok(self.board.grid().column(x)?)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            width: self.width(),
            height: self.height(),
            rows: self.board.to_layout(),
            white_score: self.score(Side::White),
            black_score: self.score(Side::Black),
            turn: self.turn,
            phase: self.phase,
            result: self.result(),
        }
    }

    /// Play `coord` for the side to move
    pub fn apply_move(&mut self, coord: Coord) -> Result<MoveOutcome, GameError> {
        let side = self.current_side().ok_or(GameError::GameOver)?;
        self.play(side, coord)
    }

    /// Play `coord` for `side`.
    ///
    /// A move by the side not on turn is an `InvalidMove`. On error the game
    /// is left unchanged.
    pub fn play(&mut self, side: Side, coord: Coord) -> Result<MoveOutcome, GameError> {
        let current = self.current_side().ok_or(GameError::GameOver)?;
        if side != current {
            return Err(GameError::InvalidMove(coord));
        }

        let flipped = self.board.play(side, coord)?;
        let captured = flipped.len() as u32;

        self.players[side.index()].score += captured + 1;
        self.players[side.opponent().index()].score -= captured;

        debug!(
            turn = self.turn,
            %side,
            %coord,
            captured,
            "move applied"
        );

        let mut events = vec![GameEvent::TilePlaced {
            side,
            location: coord,
            captured,
        }];
        events.push(self.advance(side));

        Ok(MoveOutcome {
            captured,
            flipped,
            events,
        })
    }

    /// Decide who moves after `mover`: the opponent if it can, otherwise
    /// `mover` again, otherwise nobody.
    fn advance(&mut self, mover: Side) -> GameEvent {
        let opponent = mover.opponent();
        let moves = MoveGenerator::new(&self.board);

        let next = moves.legal_moves(opponent);
        if !next.is_empty() {
            self.phase = GamePhase::InProgress {
                current: opponent,
                passed: false,
            };
            self.turn += 1;
            self.legal_moves = next;
            return GameEvent::TurnEnded {
                side: mover,
                next_side: opponent,
            };
        }

        let again = moves.legal_moves(mover);
        if !again.is_empty() {
            debug!(side = %opponent, turn = self.turn, "forced pass");
            self.phase = GamePhase::InProgress {
                current: mover,
                passed: true,
            };
            self.turn += 1;
            self.legal_moves = again;
            return GameEvent::TurnPassed { side: opponent };
        }

        self.phase = GamePhase::Over;
        self.legal_moves.clear();

        let result = self.standing();
        let white_score = self.score(Side::White);
        let black_score = self.score(Side::Black);
        info!(
            turn = self.turn,
            white_score,
            black_score,
            ?result,
            "game over"
        );
        GameEvent::GameOver {
            result,
            white_score,
            black_score,
        }
    }
}
