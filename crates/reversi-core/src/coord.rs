//! Square grid coordinate system with 8-way directions.
//!
//! This module provides the geometry primitives the rules engine is built on:
//! - `Coord`: identifies a cell; signed so that stepping off the board is representable
//! - `Direction`: the eight compass directions with their opposites
//!
//! `(0, 0)` is the top-left cell. North decreases `y`, East increases `x`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the eight compass directions around a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// All directions in clockwise order starting from North
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Unit step `(dx, dy)` for this direction
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
        }
    }

    /// The reciprocal direction.
    ///
    /// `ALL` is clockwise, so the opposite sits four places further round.
    pub const fn opposite(self) -> Direction {
        Direction::ALL[(self as usize + 4) % 8]
    }

    /// The neighbouring coordinate of `coord` in this direction
    pub const fn next(self, coord: Coord) -> Coord {
        let (dx, dy) = self.offset();
        Coord::new(coord.x + dx, coord.y + dy)
    }
}

/// A cell position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Coord {
    /// Column (increases going east)
    pub x: i32,
    /// Row (increases going south)
    pub y: i32,
}

impl Coord {
    /// Create a new coordinate
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbour in a specific direction
    pub const fn step(self, direction: Direction) -> Coord {
        direction.next(self)
    }

    /// The eight neighbouring cells in clockwise order starting from North.
    ///
    /// Some of them may lie outside any particular board.
    pub fn neighbors(self) -> [Coord; 8] {
        Direction::ALL.map(|d| d.next(self))
    }

    /// Row-major ordering key
    pub(crate) fn row_major(&self) -> (i32, i32) {
        (self.y, self.x)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Failure to read a coordinate from text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCoordError {
    #[error("expected two numbers, as in \"3 4\" or \"3,4\"")]
    WrongArity,

    #[error("not a number: {0:?}")]
    NotANumber(String),
}

impl FromStr for Coord {
    type Err = ParseCoordError;

    /// Accepts `x y`, `x,y` or `x, y`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect();

        let [x, y] = parts[..] else {
            return Err(ParseCoordError::WrongArity);
        };

        let parse = |p: &str| {
            p.parse::<i32>()
                .map_err(|_| ParseCoordError::NotANumber(p.to_string()))
        };

        Ok(Coord::new(parse(x)?, parse(y)?))
    }
}
