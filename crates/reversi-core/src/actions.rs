//! Events produced by applying a move.
//!
//! Every successful move yields a `MoveOutcome`: the captured count, the
//! flipped coordinates and an ordered list of `GameEvent`s describing what
//! happened, ending with exactly one turn event (`TurnEnded`, `TurnPassed`
//! or `GameOver`).

use crate::coord::Coord;
use crate::game::GameResult;
use crate::player::Side;
use serde::{Deserialize, Serialize};

/// Events that occur as a result of a move
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A tile was placed and its brackets flipped
    TilePlaced {
        side: Side,
        location: Coord,
        captured: u32,
    },

    /// Play moves to the other side
    TurnEnded { side: Side, next_side: Side },

    /// `side` has no legal move, so the mover plays again
    TurnPassed { side: Side },

    /// Neither side can move
    GameOver {
        result: GameResult,
        white_score: u32,
        black_score: u32,
    },
}

impl GameEvent {
    /// Whether this event decides who plays next
    pub fn is_turn_event(&self) -> bool {
        !matches!(self, GameEvent::TilePlaced { .. })
    }
}

/// Result of a successfully applied move
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// Number of opposing tiles flipped; always at least one
    pub captured: u32,
    /// The flipped coordinates
    pub flipped: Vec<Coord>,
    /// What happened, in order
    pub events: Vec<GameEvent>,
}

impl MoveOutcome {
    /// The turn event that closed this move
    pub fn turn_event(&self) -> Option<&GameEvent> {
        self.events.iter().rev().find(|e| e.is_turn_event())
    }
}
