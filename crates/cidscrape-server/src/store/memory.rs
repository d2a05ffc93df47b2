//! In-process metadata store, used for `--in-memory` runs and tests

use async_trait::async_trait;
use cidscrape_common::Metadata;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::{MetadataStore, StoreResult};

#[derive(Debug, Default)]
pub struct MemoryMetadataStore {
    records: RwLock<BTreeMap<String, Metadata>>,
}

impl MemoryMetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl MetadataStore for MemoryMetadataStore {
    async fn upsert(&self, record: &Metadata) -> StoreResult<()> {
        // The whole record is swapped under the write lock, so readers see
        // either the previous or the new field set.
        self.records
            .write()
            .await
            .insert(record.cid.clone(), record.clone());
        Ok(())
    }

    async fn get_all(&self) -> StoreResult<Vec<Metadata>> {
        Ok(self.records.read().await.values().cloned().collect())
    }

    async fn get_by_cid(&self, cid: &str) -> StoreResult<Option<Metadata>> {
        Ok(self.records.read().await.get(cid).cloned())
    }
}
