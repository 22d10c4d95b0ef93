//! Runtime configuration read from the environment.

use reversi_core::Side;
use std::str::FromStr;
use thiserror::Error;

const DEFAULT_SIDE: usize = 8;
const DEFAULT_GAMES: usize = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key}: {reason} ({value:?})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("Size must be a multiple of 2 greater than or equal to 4 ({0})")]
    InvalidSize(usize),
}

/// What the binary should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Human against the random bot on the terminal
    Play,
    /// One timed bot-vs-bot game
    Match,
    /// Many bot-vs-bot games run concurrently
    Arena,
}

impl FromStr for Mode {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "play" => Ok(Mode::Play),
            "match" => Ok(Mode::Match),
            "arena" => Ok(Mode::Arena),
            _ => Err("expected play, match or arena"),
        }
    }
}

/// Characters used to draw tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TileMap {
    Ascii,
    #[default]
    Dot,
}

impl FromStr for TileMap {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ascii" => Ok(TileMap::Ascii),
            "dot" => Ok(TileMap::Dot),
            _ => Err("expected ascii or dot"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub mode: Mode,
    pub width: usize,
    pub height: usize,
    /// Side the human plays in `Mode::Play`
    pub human: Side,
    pub tiles: TileMap,
    /// Number of games in `Mode::Arena`
    pub games: usize,
    /// Base seed for the bots; random when unset
    pub seed: Option<u64>,
    pub sample_limit: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::Play,
            width: DEFAULT_SIDE,
            height: DEFAULT_SIDE,
            human: Side::White,
            tiles: TileMap::default(),
            games: DEFAULT_GAMES,
            seed: None,
            sample_limit: None,
        }
    }
}

fn parse<T: FromStr>(
    key: &'static str,
    value: Option<String>,
    reason: &'static str,
) -> Result<Option<T>, ConfigError> {
    value
        .map(|v| {
            v.trim().parse::<T>().map_err(|_| ConfigError::InvalidValue {
                key,
                value: v.clone(),
                reason,
            })
        })
        .transpose()
}

fn board_side(size: usize) -> Result<usize, ConfigError> {
    if size < 4 || size % 2 != 0 {
        return Err(ConfigError::InvalidSize(size));
    }
    Ok(size)
}

fn parse_side(value: &str) -> Option<Side> {
    match value.trim().to_ascii_lowercase().as_str() {
        "white" | "w" => Some(Side::White),
        "black" | "b" => Some(Side::Black),
        _ => None,
    }
}

impl Config {
    /// Read `REVERSI_*` variables from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let mode = match lookup("REVERSI_MODE") {
            Some(v) => v.parse().map_err(|reason| ConfigError::InvalidValue {
                key: "REVERSI_MODE",
                value: v.clone(),
                reason,
            })?,
            None => defaults.mode,
        };

        let tiles = match lookup("REVERSI_TILES") {
            Some(v) => v.parse().map_err(|reason| ConfigError::InvalidValue {
                key: "REVERSI_TILES",
                value: v.clone(),
                reason,
            })?,
            None => defaults.tiles,
        };

        let human = match lookup("REVERSI_HUMAN") {
            Some(v) => parse_side(&v).ok_or(ConfigError::InvalidValue {
                key: "REVERSI_HUMAN",
                value: v.clone(),
                reason: "expected white or black",
            })?,
            None => defaults.human,
        };

        let width = parse("REVERSI_WIDTH", lookup("REVERSI_WIDTH"), "not a number")?
            .map(board_side)
            .transpose()?
            .unwrap_or(defaults.width);
        let height = parse("REVERSI_HEIGHT", lookup("REVERSI_HEIGHT"), "not a number")?
            .map(board_side)
            .transpose()?
            .unwrap_or(defaults.height);

        let games = parse("REVERSI_GAMES", lookup("REVERSI_GAMES"), "not a number")?
            .unwrap_or(defaults.games);
        let seed = parse("REVERSI_SEED", lookup("REVERSI_SEED"), "not a number")?;
        let sample_limit = parse(
            "REVERSI_SAMPLE_LIMIT",
            lookup("REVERSI_SAMPLE_LIMIT"),
            "not a number",
        )?;

        Ok(Self {
            mode,
            width,
            height,
            human,
            tiles,
            games,
            seed,
            sample_limit,
        })
    }

    /// Let a command-line argument override the mode
    pub fn with_mode_arg(mut self, arg: Option<String>) -> Result<Self, ConfigError> {
        if let Some(arg) = arg {
            self.mode = arg.parse().map_err(|reason| ConfigError::InvalidValue {
                key: "mode argument",
                value: arg.clone(),
                reason,
            })?;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.width, 8);
        assert_eq!(config.mode, Mode::Play);
    }

    #[test]
    fn test_reads_all_variables() {
        let config = Config::from_lookup(lookup(&[
            ("REVERSI_MODE", "Arena"),
            ("REVERSI_WIDTH", "16"),
            ("REVERSI_HEIGHT", "6"),
            ("REVERSI_HUMAN", "black"),
            ("REVERSI_TILES", "ascii"),
            ("REVERSI_GAMES", "12"),
            ("REVERSI_SEED", "99"),
            ("REVERSI_SAMPLE_LIMIT", "32"),
        ]))
        .unwrap();

        assert_eq!(
            config,
            Config {
                mode: Mode::Arena,
                width: 16,
                height: 6,
                human: Side::Black,
                tiles: TileMap::Ascii,
                games: 12,
                seed: Some(99),
                sample_limit: Some(32),
            }
        );
    }

    #[test]
    fn test_rejects_bad_sizes() {
        assert_eq!(
            Config::from_lookup(lookup(&[("REVERSI_WIDTH", "5")])),
            Err(ConfigError::InvalidSize(5))
        );
        assert_eq!(
            Config::from_lookup(lookup(&[("REVERSI_HEIGHT", "2")])),
            Err(ConfigError::InvalidSize(2))
        );
        assert!(matches!(
            Config::from_lookup(lookup(&[("REVERSI_WIDTH", "wide")])),
            Err(ConfigError::InvalidValue {
                key: "REVERSI_WIDTH",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_unknown_words() {
        assert!(Config::from_lookup(lookup(&[("REVERSI_MODE", "tournament")])).is_err());
        assert!(Config::from_lookup(lookup(&[("REVERSI_HUMAN", "red")])).is_err());
        assert!(Config::from_lookup(lookup(&[("REVERSI_TILES", "emoji")])).is_err());
    }

    #[test]
    fn test_mode_argument_overrides() {
        let config = Config::default()
            .with_mode_arg(Some("match".to_string()))
            .unwrap();
        assert_eq!(config.mode, Mode::Match);

        let config = Config::default().with_mode_arg(None).unwrap();
        assert_eq!(config.mode, Mode::Play);

        assert!(Config::default()
            .with_mode_arg(Some("serve".to_string()))
            .is_err());
    }

    #[test]
    fn test_size_error_message() {
        assert_eq!(
            ConfigError::InvalidSize(7).to_string(),
            "Size must be a multiple of 2 greater than or equal to 4 (7)"
        );
    }
}
