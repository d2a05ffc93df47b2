//! cidscrape common library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, error handling and logging for the cidscrape workspace.
//!
//! - **Error Handling**: the run-level error taxonomy and result alias
//! - **Types**: the `Metadata` record shared by the ingest pipeline and the read API
//! - **Logging**: `tracing` subscriber setup driven by `LogConfig`
//!
//! # Example
//!
//! ```no_run
//! use cidscrape_common::{Metadata, Result};
//!
//! fn decode(cid: &str, body: &[u8]) -> Result<Metadata> {
//!     Metadata::from_json(cid, body)
//! }
//! ```

pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{Result, ScrapeError};
pub use types::Metadata;
