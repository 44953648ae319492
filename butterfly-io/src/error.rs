//! I/O-specific error kinds layered over `butterfly_common::Error`.

use thiserror::Error;

/// Errors from reading or writing a persisted network or CH snapshot.
#[derive(Debug, Error)]
pub enum IoError {
    #[error("filesystem error: {0}")]
    Filesystem(#[from] std::io::Error),

    #[error("malformed network JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed CH snapshot: {0}")]
    Bincode(#[from] Box<bincode::ErrorKind>),

    #[error("malformed stop id {0:?} in persisted network")]
    BadStopId(String),

    #[error(transparent)]
    Core(#[from] butterfly_common::Error),
}

pub type Result<T> = std::result::Result<T, IoError>;
