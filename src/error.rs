use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::Coords;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("could not set up the terminal: {0}")]
    TerminalSetup(#[source] io::Error),

    #[error("terminal is {actual:?} (columns, rows) but the game needs at least {needed:?}")]
    TerminalTooSmall { needed: Coords, actual: Coords },

    #[error("could not open log file {path:?}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

impl GameError {
    /// Failures that happen before the first tick.
    pub fn is_startup(&self) -> bool {
        !matches!(self, GameError::Io(_))
    }

    pub fn exit_code(&self) -> i32 {
        if self.is_startup() { 2 } else { 1 }
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
