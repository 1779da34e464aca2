use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TurnclockError {
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not encode config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("a table needs between {min} and {max} players, got {got}")]
    InvalidPlayerCount { got: usize, min: usize, max: usize },

    #[error("could not start logging: {0}")]
    Logging(String),
}

impl TurnclockError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, TurnclockError>;
