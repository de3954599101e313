//! Error types for the engine crate

use ply_core::{BonusError, FenError, MoveError};
use thiserror::Error;

/// Errors raised while reading, writing or building an opening book.
#[derive(Error, Debug)]
pub enum BookError {
    #[error("failed to access opening book: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed opening book JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("book line move {index} ({text}) is not playable: {source}")]
    Replay {
        index: usize,
        text: String,
        #[source]
        source: MoveError,
    },
}

/// Errors raised while loading an engine configuration or the resources it
/// names. All of them are fatal at startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read engine config: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed engine config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize engine config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("search depth must be at least 1, got {0}")]
    Depth(u8),

    #[error(transparent)]
    Bonuses(#[from] BonusError),

    #[error(transparent)]
    Book(#[from] BookError),

    #[error("invalid start position: {0}")]
    Fen(#[from] FenError),
}
