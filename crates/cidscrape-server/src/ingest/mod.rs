//! Metadata ingestion
//!
//! Reads the CID list, fetches each document from the gateway and upserts the
//! decoded record into the shared store.

pub mod gateway;
pub mod pool;
pub mod source;
pub mod types;

pub use gateway::GatewayClient;
pub use pool::FetchPool;
pub use source::{read_cids, read_cids_from_reader, CidSourceOptions};
pub use types::{FetchError, FetchOutcome, PipelineReport};

use anyhow::Context;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::config::IngestConfig;
use crate::store::SharedStore;

/// Run one full ingestion pass as configured.
///
/// An unreadable CID list fails before any request is made; per-CID failures
/// are only reflected in the returned report.
pub async fn run_pipeline(
    config: &IngestConfig,
    store: SharedStore,
    cancel: &CancellationToken,
) -> anyhow::Result<PipelineReport> {
    config.validate()?;

    let cids = read_cids(
        &config.cid_file,
        CidSourceOptions {
            has_header: config.has_header,
            ..Default::default()
        },
    )
    .with_context(|| format!("Failed to read CID list from {}", config.cid_file))?;

    let gateway = GatewayClient::new(
        &config.gateway_url,
        Duration::from_secs(config.request_timeout_secs),
    )?;

    let pool = FetchPool::new(gateway, store, config.workers);
    Ok(pool.run(&cids, cancel).await)
}
