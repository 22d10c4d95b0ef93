//! Move policies.
//!
//! A `MovePolicy` is handed the legal moves for the side to move and a
//! read-only view of the board, and picks one of the moves. `RandomBot` is
//! the reference policy: a uniform choice over the legal moves.

use crate::board::Board;
use crate::coord::Coord;
use crate::game::{Game, GameError, GameResult};
use crate::player::Side;
use rand::prelude::*;
use rand::seq::index;

/// Something that picks a move
pub trait MovePolicy {
    /// Pick one of `moves`. `moves` is never empty when called from
    /// [`play_to_end`]; returning `None` abandons the game.
    fn choose_move(&mut self, moves: &[Coord], board: &Board) -> Option<Coord>;
}

/// Picks a legal move at random
pub struct RandomBot {
    rng: StdRng,
    /// When set, choose among at most this many randomly drawn candidates
    sample_limit: Option<usize>,
}

impl RandomBot {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            sample_limit: None,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            sample_limit: None,
        }
    }

    /// Draw at most `limit` candidate indices before choosing one.
    ///
    /// The choice stays uniform over `moves`. Policies receive the complete
    /// legal-move list, so this does not make a choice any cheaper than the
    /// unlimited bot; it only changes which random draws pick the move.
    pub fn with_sample_limit(mut self, limit: usize) -> Self {
        self.sample_limit = Some(limit.max(1));
        self
    }
}

impl Default for RandomBot {
    fn default() -> Self {
        Self::new()
    }
}

impl MovePolicy for RandomBot {
    fn choose_move(&mut self, moves: &[Coord], _board: &Board) -> Option<Coord> {
        match self.sample_limit {
            Some(limit) if moves.len() > limit => {
                let picks = index::sample(&mut self.rng, moves.len(), limit);
                let pick = picks.index(self.rng.gen_range(0..picks.len()));
                moves.get(pick).copied()
            }
            _ => moves.choose(&mut self.rng).copied(),
        }
    }
}

/// Drive `game` to the end, asking `white` and `black` for their moves.
///
/// Returns `Ok(None)` if a policy abandons the game.
pub fn play_to_end(
    game: &mut Game,
    white: &mut dyn MovePolicy,
    black: &mut dyn MovePolicy,
) -> Result<Option<GameResult>, GameError> {
    while let Some(side) = game.current_side() {
        let policy: &mut dyn MovePolicy = match side {
            Side::White => &mut *white,
            Side::Black => &mut *black,
        };

        let Some(choice) = policy.choose_move(game.legal_moves(), game.board()) else {
            return Ok(None);
        };
        game.play(side, choice)?;
    }

    Ok(game.result())
}
