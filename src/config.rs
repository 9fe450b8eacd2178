use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::error::{GameError, Result};
use crate::spawner::time_seed;

/// Snake on a wrapping grid, with rewards that grow you and hazards that bite back
#[derive(Parser, Debug)]
#[command(name = "hazard_snake")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Seed for item placement; a time-based seed is used when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Delay between game steps, in milliseconds
    #[arg(long, default_value_t = 100)]
    pub tick_ms: u64,

    /// Write log output to this file (logging is off otherwise)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log filter (trace, debug, info, warn, error); RUST_LOG wins when set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub seed: u64,
    pub tick_interval: Duration,
    pub log_file: Option<PathBuf>,
    pub log_level: String,
}

impl Config {
    pub fn from_args(args: Args) -> Result<Self> {
        if args.tick_ms == 0 {
            return Err(GameError::InvalidConfig("--tick-ms must be at least 1".to_string()));
        }

        Ok(Config {
            seed: args.seed.unwrap_or_else(time_seed),
            tick_interval: Duration::from_millis(args.tick_ms),
            log_file: args.log_file,
            log_level: args.log_level,
        })
    }
}

/// The terminal belongs to the game, so logs only ever go to a file.
pub fn init_logging(config: &Config) -> Result<()> {
    let path = match &config.log_file {
        Some(path) => path,
        None => return Ok(()),
    };

    let file = File::create(path).map_err(|source| GameError::LogFile { path: path.clone(), source })?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::parse_from(["hazard_snake"]);
        assert_eq!(args.tick_ms, 100);
        assert_eq!(args.log_level, "info");
        assert!(args.seed.is_none());

        let config = Config::from_args(args).unwrap();
        assert_eq!(config.tick_interval, Duration::from_millis(100));
        assert!(config.log_file.is_none());
    }

    #[test]
    fn explicit_options() {
        let args = Args::parse_from([
            "hazard_snake",
            "--seed",
            "17",
            "--tick-ms",
            "60",
            "--log-file",
            "snake.log",
        ]);
        let config = Config::from_args(args).unwrap();

        assert_eq!(config.seed, 17);
        assert_eq!(config.tick_interval, Duration::from_millis(60));
        assert_eq!(config.log_file, Some(PathBuf::from("snake.log")));
    }

    #[test]
    fn zero_tick_is_rejected() {
        let args = Args::parse_from(["hazard_snake", "--tick-ms", "0"]);
        let err = Config::from_args(args).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn unwritable_log_file_is_a_startup_error() {
        let config = Config {
            seed: 1,
            tick_interval: Duration::from_millis(100),
            log_file: Some(PathBuf::from("/nonexistent-dir/for/sure/snake.log")),
            log_level: "info".to_string(),
        };

        match init_logging(&config) {
            Err(GameError::LogFile { path, .. }) => {
                assert_eq!(path, PathBuf::from("/nonexistent-dir/for/sure/snake.log"))
            }
            other => panic!("expected log file error, got {:?}", other),
        }
    }
}
