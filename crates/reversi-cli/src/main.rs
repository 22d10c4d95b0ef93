//! Reversi on the terminal: play the random bot, or watch bots play each other.

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod arena;
mod config;
mod render;
mod session;

use config::{Config, Mode};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; keep stdout for the board
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env()?.with_mode_arg(std::env::args().nth(1))?;

    info!(
        "Starting reversi in {:?} mode on a {}x{} board",
        config.mode, config.width, config.height
    );

    match config.mode {
        Mode::Play => tokio::task::spawn_blocking(move || session::run(&config)).await?,
        Mode::Match => tokio::task::spawn_blocking(move || arena::run_match(&config)).await?,
        Mode::Arena => {
            let (summary, _) = arena::run_arena(&config).await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
            Ok(())
        }
    }
}
