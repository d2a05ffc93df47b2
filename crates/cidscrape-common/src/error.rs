//! Error types for cidscrape

use thiserror::Error;

/// Result type alias for cidscrape operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Errors raised while reading the CID list or decoding a document.
///
/// `Input` aborts the run before any fetch starts. `Parse` is scoped to a
/// single CID and becomes a per-CID failure in the ingest report.
#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Input error: {0}")]
    Input(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl ScrapeError {
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}
