//! Interactive play: a human on the terminal against the random bot.

use crate::arena::make_bot;
use crate::config::{Config, TileMap};
use crate::render::{render_board, status_line};
use reversi_core::{play_to_end, Board, Coord, Game, GameError, MovePolicy, Side};
use std::io::{self, BufRead, Write};
use tracing::{error, info};

/// Reads moves from a line-based input, re-prompting until a legal one arrives
pub struct HumanPlayer<R, W> {
    side: Side,
    tiles: TileMap,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> HumanPlayer<R, W> {
    pub fn new(side: Side, tiles: TileMap, input: R, output: W) -> Self {
        Self {
            side,
            tiles,
            input,
            output,
        }
    }

    /// `Ok(None)` when the input ends or the player quits
    fn prompt(&mut self, moves: &[Coord], board: &Board) -> io::Result<Option<Coord>> {
        write!(self.output, "\n{}", render_board(board, self.tiles))?;
        writeln!(
            self.output,
            "{} to move, {} legal moves. Enter \"x y\", \"moves\" or \"quit\".",
            self.side,
            moves.len()
        )?;

        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }

            match line.trim() {
                "" => continue,
                "quit" | "q" => return Ok(None),
                "moves" | "?" => {
                    let listed: Vec<String> = moves.iter().map(|m| m.to_string()).collect();
                    writeln!(self.output, "{}", listed.join(" "))?;
                    continue;
                }
                _ => {}
            }

            match line.trim().parse::<Coord>() {
                Ok(coord) if moves.contains(&coord) => return Ok(Some(coord)),
                Ok(coord) if !board.contains(coord) => {
                    writeln!(self.output, "{}", GameError::OutOfRange(coord))?
                }
                Ok(coord) => writeln!(self.output, "{}", GameError::InvalidMove(coord))?,
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> MovePolicy for HumanPlayer<R, W> {
    fn choose_move(&mut self, moves: &[Coord], board: &Board) -> Option<Coord> {
        match self.prompt(moves, board) {
            Ok(choice) => choice,
            Err(e) => {
                error!("Terminal error: {}", e);
                None
            }
        }
    }
}

/// Play one game on stdin/stdout
pub fn run(config: &Config) -> anyhow::Result<()> {
    let mut game = Game::new(config.width, config.height)?;
    let mut human = HumanPlayer::new(
        config.human,
        config.tiles,
        io::stdin().lock(),
        io::stdout(),
    );
    let mut bot = make_bot(config.seed, config.sample_limit);

    info!(
        "Starting {}x{} game, human plays {}",
        config.width, config.height, config.human
    );

    let result = match config.human {
        Side::White => play_to_end(&mut game, &mut human, &mut bot)?,
        Side::Black => play_to_end(&mut game, &mut bot, &mut human)?,
    };

    let mut out = io::stdout().lock();
    write!(out, "\n{}", render_board(game.board(), config.tiles))?;
    if result.is_none() {
        writeln!(out, "Game abandoned")?;
    }
    writeln!(out, "{}", status_line(&game))?;

    Ok(())
}
