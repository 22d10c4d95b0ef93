//! Reversi board: tiles, the edge candidate set, and the bracket-capture scan.
//!
//! This module contains:
//! - `Tile`, the contents of a single cell
//! - `Board`, a `Grid<Tile>` paired with its edge set
//! - Legality checks and capture application for a single move
//!
//! The edge set holds every empty cell that touches (8-neighbourhood) at
//! least one occupied cell. A legal move must bracket an opposing tile, so
//! it is always adjacent to one; move search never has to look further.

use crate::coord::{Coord, Direction};
use crate::game::GameError;
use crate::grid::{Grid, GridError};
use crate::player::Side;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Contents of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Tile {
    #[default]
    Empty,
    White,
    Black,
}

impl Tile {
    /// The side holding this tile, if any
    pub fn owner(&self) -> Option<Side> {
        match self {
            Tile::Empty => None,
            Tile::White => Some(Side::White),
            Tile::Black => Some(Side::Black),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Tile::Empty)
    }

    /// Single-character form used by layouts and snapshots
    pub fn to_char(self) -> char {
        match self {
            Tile::Empty => '.',
            Tile::White => 'w',
            Tile::Black => 'b',
        }
    }

    pub fn from_char(c: char) -> Option<Tile> {
        match c {
            '.' => Some(Tile::Empty),
            'w' | 'W' => Some(Tile::White),
            'b' | 'B' => Some(Tile::Black),
            _ => None,
        }
    }
}

/// Errors when building a board from a text layout
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("layout has no rows")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("unknown tile {0:?}")]
    UnknownTile(char),

    #[error(transparent)]
    Grid(#[from] GridError),
}

/// The playing surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: Grid<Tile>,
    /// Empty cells with at least one occupied neighbour
    edges: HashSet<Coord>,
}

impl Board {
    /// Create an empty board
    pub fn empty(width: usize, height: usize) -> Result<Self, GridError> {
        Ok(Self {
            grid: Grid::new(width, height, Tile::Empty)?,
            edges: HashSet::new(),
        })
    }

    /// Create a board with the standard starting layout:
    ///
    /// ```text
    /// w b
    /// b w
    /// ```
    ///
    /// centred on the board.
    pub fn starting(width: usize, height: usize) -> Result<Self, GridError> {
        let mut board = Self::empty(width, height)?;

        let top_left = Coord::new(width as i32 / 2 - 1, height as i32 / 2 - 1);
        board.set_tile(top_left, Tile::White)?;
        board.set_tile(top_left.step(Direction::SouthEast), Tile::White)?;
        board.set_tile(top_left.step(Direction::East), Tile::Black)?;
        board.set_tile(top_left.step(Direction::South), Tile::Black)?;

        Ok(board)
    }

    /// Build a board from an existing grid, deriving the edge set
    pub fn from_grid(grid: Grid<Tile>) -> Self {
        let mut board = Self {
            grid,
            edges: HashSet::new(),
        };
        let occupied: Vec<Coord> = board
            .grid
            .coords()
            .filter(|&c| board.tile_or_empty(c) != Tile::Empty)
            .collect();
        for coord in occupied {
            board.occupy(coord);
        }
        board
    }

    /// Build a board from rows of `.`, `w` and `b`
    pub fn from_layout<S: AsRef<str>>(rows: &[S]) -> Result<Self, LayoutError> {
        let height = rows.len();
        let width = rows.first().ok_or(LayoutError::Empty)?.as_ref().chars().count();
        let mut grid = Grid::new(width, height, Tile::Empty)?;

        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let found = row.chars().count();
            if found != width {
                return Err(LayoutError::Ragged {
                    row: y,
                    found,
                    expected: width,
                });
            }
            for (x, c) in row.chars().enumerate() {
                let tile = Tile::from_char(c).ok_or(LayoutError::UnknownTile(c))?;
                grid.set(Coord::new(x as i32, y as i32), tile)?;
            }
        }

        Ok(Self::from_grid(grid))
    }

    /// Rows of `.`, `w` and `b`, the inverse of `from_layout`
    pub fn to_layout(&self) -> Vec<String> {
        (0..self.height() as i32)
            .filter_map(|y| self.grid.row(y).ok())
            .map(|row| row.map(Tile::to_char).collect())
            .collect()
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// The underlying tile grid
    pub fn grid(&self) -> &Grid<Tile> {
        &self.grid
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.grid.contains(coord)
    }

    /// Get the tile at a coordinate
    pub fn get(&self, coord: Coord) -> Result<Tile, GridError> {
        self.grid.get(coord)
    }

    fn tile_or_empty(&self, coord: Coord) -> Tile {
        self.grid.get_checked(coord).unwrap_or(Tile::Empty)
    }

    /// The current edge set
    pub fn edges(&self) -> &HashSet<Coord> {
        &self.edges
    }

    /// Number of cells holding `tile`
    pub fn count(&self, tile: Tile) -> usize {
        self.grid.cells().filter(|&t| t == tile).count()
    }

    pub fn empty_count(&self) -> usize {
        self.count(Tile::Empty)
    }

    /// Overwrite a single cell, keeping the edge set consistent.
    ///
    /// This bypasses the rules; it exists for setting up positions.
    pub fn set_tile(&mut self, coord: Coord, tile: Tile) -> Result<(), GridError> {
        self.grid.set(coord, tile)?;

        if tile.is_empty() {
            self.refresh_edge(coord);
            for n in coord.neighbors() {
                self.refresh_edge(n);
            }
        } else {
            self.occupy(coord);
        }
        Ok(())
    }

    /// Recompute edge membership of one cell from scratch
    fn refresh_edge(&mut self, coord: Coord) {
        if self.grid.get_checked(coord) != Some(Tile::Empty) {
            self.edges.remove(&coord);
            return;
        }

        let touches_occupied = coord
            .neighbors()
            .iter()
            .any(|&n| self.tile_or_empty(n) != Tile::Empty);
        if touches_occupied {
            self.edges.insert(coord);
        } else {
            self.edges.remove(&coord);
        }
    }

    /// Edge update after `coord` became occupied
    fn occupy(&mut self, coord: Coord) {
        self.edges.remove(&coord);
        for n in coord.neighbors() {
            if self.grid.get_checked(n) == Some(Tile::Empty) {
                self.edges.insert(n);
            }
        }
    }

    /// Length of the bracket `side` would close from `origin` towards
    /// `direction`, or `None` if there is no bracket that way.
    ///
    /// A bracket is a non-empty run of opposing tiles ending on one of
    /// `side`'s own tiles.
    fn bracket(&self, side: Side, origin: Coord, direction: Direction) -> Option<usize> {
        let own = side.tile();
        let opposing = side.opponent().tile();

        let mut run = 0;
        for (_, tile) in self.grid.ray(origin, direction) {
            if tile == opposing {
                run += 1;
            } else if tile == own && run > 0 {
                return Some(run);
            } else {
                return None;
            }
        }
        None
    }

    /// Check whether `side` may place a tile at `coord`
    pub fn is_legal(&self, side: Side, coord: Coord) -> bool {
        self.grid.get_checked(coord) == Some(Tile::Empty)
            && Direction::ALL
                .iter()
                .any(|&d| self.bracket(side, coord, d).is_some())
    }

    /// Coordinates that would flip if `side` played at `coord`.
    ///
    /// Empty when the move is illegal.
    pub fn captures(&self, side: Side, coord: Coord) -> Vec<Coord> {
        if self.grid.get_checked(coord) != Some(Tile::Empty) {
            return Vec::new();
        }

        Direction::ALL
            .iter()
            .filter_map(|&d| self.bracket(side, coord, d).map(|run| (d, run)))
            .flat_map(|(d, run)| self.grid.ray(coord, d).take(run).map(|(c, _)| c))
            .collect()
    }

    /// Place `side`'s tile at `coord` and flip every bracketed tile.
    ///
    /// Returns the flipped coordinates. Nothing changes if the move is illegal.
    pub fn play(&mut self, side: Side, coord: Coord) -> Result<Vec<Coord>, GameError> {
        if !self.contains(coord) {
            return Err(GameError::OutOfRange(coord));
        }

        let captured = self.captures(side, coord);
        if captured.is_empty() {
            return Err(GameError::InvalidMove(coord));
        }

        let tile = side.tile();
        self.grid.set(coord, tile)?;
        for &c in &captured {
            self.grid.set(c, tile)?;
        }

        // Flipped tiles were already occupied, so only the new tile can
        // extend the edge set.
        self.occupy(coord);

        Ok(captured)
    }
}
