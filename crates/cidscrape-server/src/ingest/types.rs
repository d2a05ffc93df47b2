//! Pipeline result types

use cidscrape_common::{Metadata, ScrapeError};
use std::time::Duration;
use thiserror::Error;

/// Why a single CID was not stored. Never propagated past the pool.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("store error: {0}")]
    Store(String),
}

impl FetchError {
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Network(_) => "network",
            FetchError::Parse(_) => "parse",
            FetchError::Store(_) => "store",
        }
    }
}

/// Decoding errors surface here; any of them means the document was unusable.
impl From<ScrapeError> for FetchError {
    fn from(err: ScrapeError) -> Self {
        match err {
            ScrapeError::Parse(msg) => FetchError::Parse(msg),
            other => FetchError::Parse(other.to_string()),
        }
    }
}

/// Result of processing one CID
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Stored(Metadata),
    Failed { cid: String, error: FetchError },
    /// Not started because the run was cancelled first
    Skipped { cid: String },
}

/// Aggregate of a completed pipeline run
#[derive(Debug, Clone, Default)]
pub struct PipelineReport {
    pub total: usize,
    pub stored: usize,
    pub failures: Vec<(String, FetchError)>,
    pub skipped: usize,
    pub elapsed: Duration,
}

impl PipelineReport {
    pub fn from_outcomes(outcomes: Vec<FetchOutcome>, elapsed: Duration) -> Self {
        let mut report = PipelineReport {
            total: outcomes.len(),
            elapsed,
            ..Default::default()
        };

        for outcome in outcomes {
            match outcome {
                FetchOutcome::Stored(_) => report.stored += 1,
                FetchOutcome::Failed { cid, error } => report.failures.push((cid, error)),
                FetchOutcome::Skipped { .. } => report.skipped += 1,
            }
        }

        report
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.skipped == 0
    }

    /// Failures of the given kind ("network", "parse", "store")
    pub fn failures_of(&self, kind: &str) -> impl Iterator<Item = &(String, FetchError)> + '_ {
        let kind = kind.to_string();
        self.failures.iter().filter(move |(_, e)| e.kind() == kind)
    }
}
