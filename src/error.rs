//! Crate error type

use thiserror::Error;

/// Errors raised by the configuration and preference paths.
///
/// The simulation itself never fails; only the I/O around it does.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to spawn game loop thread: {0}")]
    Spawn(std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
