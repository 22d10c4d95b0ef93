//! Fixed-size two-dimensional storage.
//!
//! `Grid<T>` wraps a row-major `Vec<T>` with bounds-checked access and lazy,
//! restartable traversals (full board, single row, single column, and rays
//! stepping out from a cell in one direction).

use crate::coord::{Coord, Direction};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from grid construction and access
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GridError {
    #[error("unsupported grid dimensions {width}x{height}")]
    InvalidSize { width: usize, height: usize },

    #[error("({x}, {y}) is outside the grid")]
    OutOfRange { x: i32, y: i32 },
}

/// A width x height grid of values, stored row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid<T> {
    cells: Vec<T>,
    width: usize,
    height: usize,
}

impl<T: Copy> Grid<T> {
    /// Create a grid with every cell set to `fill`.
    ///
    /// Both sides must be positive and addressable by an `i32` coordinate,
    /// and the cell buffer must be allocatable.
    pub fn new(width: usize, height: usize, fill: T) -> Result<Self, GridError> {
        let invalid = || GridError::InvalidSize { width, height };

        if width == 0 || height == 0 {
            return Err(invalid());
        }
        i32::try_from(width).map_err(|_| invalid())?;
        i32::try_from(height).map_err(|_| invalid())?;
        let len = width.checked_mul(height).ok_or_else(invalid)?;

        let mut cells = Vec::new();
        cells.try_reserve_exact(len).map_err(|_| invalid())?;
        cells.resize(len, fill);

        Ok(Self {
            cells,
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Check whether a coordinate points inside the grid
    pub fn contains(&self, coord: Coord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as usize) < self.width
            && (coord.y as usize) < self.height
    }

    fn index(&self, coord: Coord) -> Result<usize, GridError> {
        if !self.contains(coord) {
            return Err(GridError::OutOfRange {
                x: coord.x,
                y: coord.y,
            });
        }
        Ok(coord.y as usize * self.width + coord.x as usize)
    }

    /// Get the value at a coordinate
    pub fn get(&self, coord: Coord) -> Result<T, GridError> {
        let i = self.index(coord)?;
        Ok(self.cells[i])
    }

    /// Set the value at a coordinate
    pub fn set(&mut self, coord: Coord, value: T) -> Result<(), GridError> {
        let i = self.index(coord)?;
        self.cells[i] = value;
        Ok(())
    }

    /// Get the value at a coordinate, `None` when off the grid
    pub fn get_checked(&self, coord: Coord) -> Option<T> {
        self.get(coord).ok()
    }

    /// All values in row-major order
    pub fn cells(&self) -> impl Iterator<Item = T> + '_ {
        self.cells.iter().copied()
    }

    /// All coordinates in row-major order
    pub fn coords(&self) -> Coords {
        Coords {
            next: 0,
            width: self.width,
            len: self.width * self.height,
        }
    }

    /// Values of row `y`, west to east
    pub fn row(&self, y: i32) -> Result<impl Iterator<Item = T> + Clone + '_, GridError> {
        if y < 0 || y as usize >= self.height {
            return Err(GridError::OutOfRange { x: 0, y });
        }
        let start = y as usize * self.width;
        Ok(self.cells[start..start + self.width].iter().copied())
    }

    /// Values of column `x`, north to south
    pub fn column(&self, x: i32) -> Result<impl Iterator<Item = T> + Clone + '_, GridError> {
        if x < 0 || x as usize >= self.width {
            return Err(GridError::OutOfRange { x, y: 0 });
        }
        Ok(self
            .cells
            .iter()
            .skip(x as usize)
            .step_by(self.width)
            .copied())
    }

    /// On-grid coordinates strictly after `origin`, stepping in `direction`
    /// until the edge of the grid.
    pub fn ray(&self, origin: Coord, direction: Direction) -> Ray<'_, T> {
        Ray {
            grid: self,
            at: origin,
            direction,
        }
    }
}

/// Row-major traversal of every coordinate in a grid
#[derive(Debug, Clone)]
pub struct Coords {
    next: usize,
    width: usize,
    len: usize,
}

impl Iterator for Coords {
    type Item = Coord;

    fn next(&mut self) -> Option<Coord> {
        if self.next >= self.len {
            return None;
        }
        let i = self.next;
        self.next += 1;
        Some(Coord::new((i % self.width) as i32, (i / self.width) as i32))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Coords {}

/// Walk from a cell towards the edge of the grid in one direction
#[derive(Debug)]
pub struct Ray<'a, T> {
    grid: &'a Grid<T>,
    at: Coord,
    direction: Direction,
}

impl<T> Clone for Ray<'_, T> {
    fn clone(&self) -> Self {
        Self {
            grid: self.grid,
            at: self.at,
            direction: self.direction,
        }
    }
}

impl<T: Copy> Iterator for Ray<'_, T> {
    type Item = (Coord, T);

    fn next(&mut self) -> Option<(Coord, T)> {
        let next = self.direction.next(self.at);
        let value = self.grid.get_checked(next)?;
        self.at = next;
        Some((next, value))
    }
}
