//! Metadata persistence
//!
//! [`MetadataStore`] is the seam between the ingest pipeline, the read API and
//! the backing storage. A single store handle is shared by every worker and
//! request handler as `Arc<dyn MetadataStore>`; implementations own whatever
//! pooling or locking they need so that concurrent upserts for different CIDs
//! never interfere and callers hold no external locks.

use async_trait::async_trait;
use cidscrape_common::Metadata;
use std::sync::Arc;
use thiserror::Error;

pub mod memory;
pub mod postgres;

pub use memory::MemoryMetadataStore;
pub use postgres::PgMetadataStore;

/// Storage failure. Absence of a record is not an error.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database query failed: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("{0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Shared handle type injected into the pipeline and the API
pub type SharedStore = Arc<dyn MetadataStore>;

/// Keyed metadata storage
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Insert `record`, or replace image/description/name of the existing
    /// row with the same CID. Atomic per call; last write wins.
    async fn upsert(&self, record: &Metadata) -> StoreResult<()>;

    /// All stored records. An empty store yields an empty vector.
    async fn get_all(&self) -> StoreResult<Vec<Metadata>>;

    /// The record for `cid`, or `None` if it was never stored.
    async fn get_by_cid(&self, cid: &str) -> StoreResult<Option<Metadata>>;

    /// Cheap liveness probe used by `/health`.
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
