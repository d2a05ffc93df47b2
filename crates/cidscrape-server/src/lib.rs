//! cidscrape server library
//!
//! Fetches token metadata documents for a list of CIDs from a content
//! gateway, stores them keyed by CID, and serves the stored records.
//!
//! # Overview
//!
//! - **Ingest**: bounded fetch→parse→store pool with per-CID failure isolation
//! - **Store**: `MetadataStore` trait with PostgreSQL (SQLx) and in-memory backends
//! - **API**: read-only axum routes, `GET /tokens` and `GET /tokens/:cid`
//! - **Configuration**: environment-based, validated before anything starts
//!
//! # Example
//!
//! ```no_run
//! use cidscrape_server::{config::Config, ingest, store::{MemoryMetadataStore, SharedStore}};
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let store: SharedStore = Arc::new(MemoryMetadataStore::new());
//!     let report = ingest::run_pipeline(&config.ingest, store, &CancellationToken::new()).await?;
//!     println!("stored {} of {}", report.stored, report.total);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod features;
pub mod ingest;
pub mod middleware;
pub mod store;

pub use error::ApiError;
