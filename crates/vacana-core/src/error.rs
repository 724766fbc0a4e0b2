//! Error types for the gloss pipeline.
//!
//! Source-level failures are recoverable (the lookup chain falls back to the
//! next source); only total failure reaches the caller. A token that no
//! source resolves is a result state, not an error.

use thiserror::Error;

use crate::dictionary::LoadError;

/// Main error type for gloss operations
#[derive(Debug, Error)]
pub enum GlossError {
    /// No usable input text supplied
    #[error("no usable input text supplied")]
    EmptyInput,

    /// Input is not analyzable text
    #[error("input is not analyzable text: {0}")]
    InvalidInput(String),

    /// Dictionary source missing or corrupt
    #[error("dictionary source error: {0}")]
    Source(#[from] LoadError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for gloss operations
pub type Result<T> = std::result::Result<T, GlossError>;
