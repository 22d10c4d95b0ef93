//! Bot-vs-bot games: a single timed match and a concurrent batch.

use crate::config::Config;
use crate::render::{render_board, result_line};
use reversi_core::{play_to_end, Game, GameError, GameResult, RandomBot, Side};
use serde::Serialize;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// A random bot, seeded when `seed` is given
pub fn make_bot(seed: Option<u64>, sample_limit: Option<usize>) -> RandomBot {
    let bot = match seed {
        Some(seed) => RandomBot::with_seed(seed),
        None => RandomBot::new(),
    };
    match sample_limit {
        Some(limit) => bot.with_sample_limit(limit),
        None => bot,
    }
}

/// Outcome of one bot-vs-bot game
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRecord {
    pub index: usize,
    pub seed: u64,
    /// `None` if the game was abandoned
    pub result: Option<GameResult>,
    pub white_score: u32,
    pub black_score: u32,
    pub turns: u32,
    pub elapsed_ms: u64,
}

/// Totals over a batch of games
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArenaSummary {
    pub games: usize,
    pub white_wins: usize,
    pub black_wins: usize,
    pub draws: usize,
    pub abandoned: usize,
    pub average_turns: f64,
    pub longest_ms: u64,
    pub elapsed_ms: u64,
}

/// Play one game between two random bots derived from `seed`.
///
/// White draws from `2 * seed` and Black from `2 * seed + 1`, so a seed
/// always replays the same game.
pub fn play_match(
    index: usize,
    width: usize,
    height: usize,
    seed: u64,
    sample_limit: Option<usize>,
) -> Result<(Game, MatchRecord), GameError> {
    let started = Instant::now();

    let mut game = Game::new(width, height)?;
    let mut white = make_bot(Some(seed.wrapping_mul(2)), sample_limit);
    let mut black = make_bot(Some(seed.wrapping_mul(2).wrapping_add(1)), sample_limit);
    let result = play_to_end(&mut game, &mut white, &mut black)?;

    let record = MatchRecord {
        index,
        seed,
        result,
        white_score: game.score(Side::White),
        black_score: game.score(Side::Black),
        turns: game.turn(),
        elapsed_ms: started.elapsed().as_millis() as u64,
    };
    debug!(
        "Game {} (seed {}) finished: {:?} in {} turns",
        index, seed, record.result, record.turns
    );

    Ok((game, record))
}

/// Play and print a single timed game
pub fn run_match(config: &Config) -> anyhow::Result<()> {
    let seed = config.seed.unwrap_or_else(rand::random);
    println!(
        "Running AI match on {} x {} = {} tiles board",
        config.width,
        config.height,
        config.width.saturating_mul(config.height)
    );

    let (game, record) = play_match(
        0,
        config.width,
        config.height,
        seed,
        config.sample_limit,
    )?;

    println!("Running time: {} ms (seed {})\n", record.elapsed_ms, seed);
    print!("{}", render_board(game.board(), config.tiles));
    println!("{}", result_line(&game));
    println!("{}", game.snapshot().to_json()?);

    Ok(())
}

pub fn summarize(records: &[MatchRecord], elapsed: Duration) -> ArenaSummary {
    let mut summary = ArenaSummary {
        games: records.len(),
        white_wins: 0,
        black_wins: 0,
        draws: 0,
        abandoned: 0,
        average_turns: 0.0,
        longest_ms: 0,
        elapsed_ms: elapsed.as_millis() as u64,
    };

    for record in records {
        match record.result {
            Some(GameResult::Win(Side::White)) => summary.white_wins += 1,
            Some(GameResult::Win(Side::Black)) => summary.black_wins += 1,
            Some(GameResult::Draw) => summary.draws += 1,
            None => summary.abandoned += 1,
        }
        summary.longest_ms = summary.longest_ms.max(record.elapsed_ms);
    }

    if !records.is_empty() {
        let turns: u64 = records.iter().map(|r| r.turns as u64).sum();
        summary.average_turns = turns as f64 / records.len() as f64;
    }

    summary
}

/// Play `config.games` games on the blocking pool and collect the results.
///
/// Game `i` uses seed `base + i`, where the base comes from the config or
/// is drawn at random.
pub async fn run_arena(config: &Config) -> anyhow::Result<(ArenaSummary, Vec<MatchRecord>)> {
    let base = config.seed.unwrap_or_else(rand::random);
    let started = Instant::now();

    info!(
        "Running {} games on {}x{} boards (base seed {})",
        config.games, config.width, config.height, base
    );

    let mut tasks = JoinSet::new();
    for index in 0..config.games {
        let (width, height, limit) = (config.width, config.height, config.sample_limit);
        let seed = base.wrapping_add(index as u64);
        tasks.spawn_blocking(move || {
            play_match(index, width, height, seed, limit).map(|(_, record)| record)
        });
    }

    let mut records = Vec::with_capacity(config.games);
    while let Some(joined) = tasks.join_next().await {
        match joined? {
            Ok(record) => records.push(record),
            Err(e) => warn!("Game failed: {}", e),
        }
    }
    records.sort_by_key(|r| r.index);

    let summary = summarize(&records, started.elapsed());
    info!(
        "Arena done: White {} / Black {} / draws {}",
        summary.white_wins, summary.black_wins, summary.draws
    );

    Ok((summary, records))
}
