//! Text rendering of boards and game status.

use crate::config::TileMap;
use reversi_core::{Board, Game, GameResult, Side, Tile};
use std::fmt::Write;

pub fn symbol(tile: Tile, map: TileMap) -> &'static str {
    match (map, tile) {
        (TileMap::Ascii, Tile::White) => "w",
        (TileMap::Ascii, Tile::Black) => "b",
        (TileMap::Ascii, Tile::Empty) => ".",
        (TileMap::Dot, Tile::White) => "o",
        (TileMap::Dot, Tile::Black) => "●",
        (TileMap::Dot, Tile::Empty) => "·",
    }
}

/// Draw the board with column indices on top and row indices on the left.
///
/// Indices are printed modulo 10 so columns stay aligned on wide boards.
pub fn render_board(board: &Board, map: TileMap) -> String {
    let width = board.width();
    // Room for two-byte symbols plus the index gutter
    let mut out = String::with_capacity((width * 2 + 6) * (board.height() + 2));

    out.push_str("  ");
    for x in 0..width {
        let _ = write!(out, "{} ", x % 10);
    }
    out.push('\n');

    for (i, tile) in board.grid().cells().enumerate() {
        let x = i % width;
        if x == 0 {
            let _ = write!(out, "{} ", (i / width) % 10);
        }
        out.push_str(symbol(tile, map));
        out.push(' ');
        if x == width - 1 {
            out.push('\n');
        }
    }

    out
}

/// One-line summary of whose turn it is and the score
pub fn status_line(game: &Game) -> String {
    let white = game.score(Side::White);
    let black = game.score(Side::Black);

    match game.current_side() {
        Some(side) if game.passed() => format!(
            "Turn {}: {} has no move, {} plays again (White {}, Black {})",
            game.turn(),
            side.opponent(),
            side,
            white,
            black
        ),
        Some(side) => format!(
            "Turn {}: {} to move (White {}, Black {})",
            game.turn(),
            side,
            white,
            black
        ),
        None => result_line(game),
    }
}

pub fn result_line(game: &Game) -> String {
    let white = game.score(Side::White);
    let black = game.score(Side::Black);

    match game.result() {
        Some(GameResult::Win(side)) => format!(
            "Game over after {} turns: {} wins {}-{}",
            game.turn(),
            side,
            white.max(black),
            white.min(black)
        ),
        Some(GameResult::Draw) => format!(
            "Game over after {} turns: draw {}-{}",
            game.turn(),
            white,
            black
        ),
        None => format!("In progress (White {}, Black {})", white, black),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use reversi_core::Coord;

    #[test]
    fn test_render_ascii() {
        let game = Game::new(4, 4).unwrap();
        let text = render_board(game.board(), TileMap::Ascii);

        assert_eq!(
            text,
            "  0 1 2 3 \n\
             0 . . . . \n\
             1 . w b . \n\
             2 . b w . \n\
             3 . . . . \n"
        );
    }

    #[test]
    fn test_render_dot_wraps_indices() {
        let game = Game::new(12, 4).unwrap();
        let text = render_board(game.board(), TileMap::Dot);
        let header = text.lines().next().unwrap();

        assert_eq!(header, "  0 1 2 3 4 5 6 7 8 9 0 1 ");
        assert!(text.contains('●'));
        assert!(text.contains('o'));
        assert_eq!(text.lines().count(), 5);
    }

    #[test]
    fn test_status_lines() {
        let mut game = Game::new(4, 4).unwrap();
        assert_eq!(status_line(&game), "Turn 1: White to move (White 2, Black 2)");

        game.apply_move(Coord::new(2, 0)).unwrap();
        assert_eq!(status_line(&game), "Turn 2: Black to move (White 4, Black 1)");
        assert_eq!(result_line(&game), "In progress (White 4, Black 1)");
    }

    #[test]
    fn test_finished_status() {
        let board = Board::from_layout(&["wwww", "wwbb", "bbbb", "bbbb"]).unwrap();
        let game = Game::from_position(board, Side::White).unwrap();

        assert_eq!(
            status_line(&game),
            "Game over after 1 turns: Black wins 10-6"
        );
    }
}
