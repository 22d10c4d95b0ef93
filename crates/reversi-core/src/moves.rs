//! Legal move queries.
//!
//! `MoveGenerator` is a read-only view over a `Board`. Search only visits
//! the board's edge set, so the cost of generating moves grows with the
//! frontier of play rather than with the size of the board.

use crate::board::Board;
use crate::coord::Coord;
use crate::player::Side;

/// Read-only legal move queries over a board
#[derive(Debug, Clone, Copy)]
pub struct MoveGenerator<'a> {
    board: &'a Board,
}

impl<'a> MoveGenerator<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self { board }
    }

    /// All legal moves for `side`, in row-major order
    pub fn legal_moves(&self, side: Side) -> Vec<Coord> {
        let mut moves: Vec<Coord> = self
            .board
            .edges()
            .iter()
            .copied()
            .filter(|&c| self.board.is_legal(side, c))
            .collect();
        moves.sort_unstable_by_key(Coord::row_major);
        moves
    }

    /// Whether `side` has any legal move. Stops at the first one found.
    pub fn has_legal_move(&self, side: Side) -> bool {
        self.board
            .edges()
            .iter()
            .any(|&c| self.board.is_legal(side, c))
    }

    pub fn is_legal(&self, side: Side, coord: Coord) -> bool {
        self.board.is_legal(side, coord)
    }

    /// Tiles that would flip if `side` played at `coord`
    pub fn captures(&self, side: Side, coord: Coord) -> Vec<Coord> {
        self.board.captures(side, coord)
    }

    /// Size of the candidate pool searched per query
    pub fn candidate_count(&self) -> usize {
        self.board.edges().len()
    }
}
