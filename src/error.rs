//! Error types for docpager library.
//!
//! Pagination itself never fails. These errors cover the surfaces around it:
//! loading document content and budget configuration, and serializing output.

use std::io;
use thiserror::Error;

/// Result type alias for docpager operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur around pagination.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Document content or budget configuration is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A capacity budget has unusable values.
    #[error("Invalid capacity budget: {0}")]
    InvalidBudget(String),

    /// Stage index is outside the dossier's fixed stage range.
    #[error("Stage {0} is out of range (dossiers have {1} stages)")]
    StageOutOfRange(usize, usize),

    /// Error during rendering (text preview, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
