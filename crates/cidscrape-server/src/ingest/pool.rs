//! Bounded fetch-and-store worker pool
//!
//! CIDs are admitted through `buffer_unordered`, so at most `workers`
//! fetch→parse→store steps are in flight at once. Collecting the stream is the
//! completion barrier: [`FetchPool::run`] returns only after every admitted CID
//! has produced an outcome. A failing CID is logged and recorded in the report;
//! it never cancels or delays the others.

use futures::stream::{self, StreamExt};
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::gateway::GatewayClient;
use super::types::{FetchError, FetchOutcome, PipelineReport};
use crate::store::SharedStore;

pub struct FetchPool {
    gateway: GatewayClient,
    store: SharedStore,
    workers: usize,
}

impl FetchPool {
    /// `workers` is clamped to at least one.
    pub fn new(gateway: GatewayClient, store: SharedStore, workers: usize) -> Self {
        Self {
            gateway,
            store,
            workers: workers.max(1),
        }
    }

    /// Process every CID and wait for all of them.
    ///
    /// Once `cancel` fires no further CID is started (they are reported as
    /// skipped) and in-flight requests are aborted.
    pub async fn run(&self, cids: &[String], cancel: &CancellationToken) -> PipelineReport {
        let started = Instant::now();

        if cids.is_empty() {
            info!("CID list is empty, nothing to fetch");
            return PipelineReport::default();
        }

        info!(total = cids.len(), workers = self.workers, "Starting fetch pipeline");

        let outcomes: Vec<FetchOutcome> = stream::iter(cids.iter().cloned())
            .map(|cid| self.process(cid, cancel))
            .buffer_unordered(self.workers)
            .collect()
            .await;

        let report = PipelineReport::from_outcomes(outcomes, started.elapsed());

        info!(
            total = report.total,
            stored = report.stored,
            failed = report.failed(),
            skipped = report.skipped,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "Fetch pipeline complete"
        );

        report
    }

    async fn process(&self, cid: String, cancel: &CancellationToken) -> FetchOutcome {
        if cancel.is_cancelled() {
            debug!(cid = %cid, "Run cancelled, skipping CID");
            return FetchOutcome::Skipped { cid };
        }

        let record = match self.gateway.fetch(&cid, cancel).await {
            Ok(record) => record,
            Err(error) => return Self::failed(cid, error),
        };

        match self.store.upsert(&record).await {
            Ok(()) => {
                debug!(cid = %cid, name = %record.name, "Stored metadata");
                FetchOutcome::Stored(record)
            }
            Err(e) => Self::failed(cid, FetchError::Store(e.to_string())),
        }
    }

    fn failed(cid: String, error: FetchError) -> FetchOutcome {
        warn!(cid = %cid, kind = error.kind(), error = %error, "Failed to process CID");
        FetchOutcome::Failed { cid, error }
    }
}
