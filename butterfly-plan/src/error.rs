//! Error kinds specific to graph construction and ingestion. Query-time
//! errors are `butterfly_common::Error` unchanged; this type only adds the
//! NDJSON/JSON plumbing `butterfly-routing` never needs to know about.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("failed to read {path}: {source}")]
    Read { path: String, #[source] source: std::io::Error },

    #[error("malformed record in {path}: {source}")]
    Malformed { path: String, #[source] source: serde_json::Error },

    #[error(transparent)]
    Core(#[from] butterfly_common::Error),

    #[error(transparent)]
    Io(#[from] butterfly_io::IoError),
}

pub type Result<T> = std::result::Result<T, PlanError>;
