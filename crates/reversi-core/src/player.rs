//! Sides and per-side score tracking.

use crate::board::Tile;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two sides in a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Moves first
    White,
    Black,
}

impl Side {
    /// Both sides, in player table order
    pub const ALL: [Side; 2] = [Side::White, Side::Black];

    /// The other side
    pub const fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Index into a two-entry per-side table
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The tile this side places
    pub const fn tile(self) -> Tile {
        match self {
            Side::White => Tile::White,
            Side::Black => Tile::Black,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => write!(f, "White"),
            Side::Black => write!(f, "Black"),
        }
    }
}

/// A side together with its score (number of tiles it holds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub side: Side,
    pub score: u32,
}

impl Player {
    pub fn new(side: Side, score: u32) -> Self {
        Self { side, score }
    }

    /// Side of the opponent, resolved through the player table by the caller
    pub fn opponent(&self) -> Side {
        self.side.opponent()
    }
}
