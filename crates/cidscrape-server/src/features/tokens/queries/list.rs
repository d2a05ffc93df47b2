use cidscrape_common::Metadata;
use serde::{Deserialize, Serialize};

use crate::store::{SharedStore, StoreError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListTokensQuery {}

#[derive(Debug, thiserror::Error)]
pub enum ListTokensError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Every stored record, in store order. An empty store is an empty list.
#[tracing::instrument(skip(store))]
pub async fn handle(
    store: SharedStore,
    _query: ListTokensQuery,
) -> Result<Vec<Metadata>, ListTokensError> {
    let records = store.get_all().await?;
    tracing::debug!(count = records.len(), "Listed token metadata");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryMetadataStore, MetadataStore};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_empty_store_lists_nothing() {
        let store: SharedStore = Arc::new(MemoryMetadataStore::new());
        let records = handle(store, ListTokensQuery::default()).await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_lists_all_records() {
        let memory = Arc::new(MemoryMetadataStore::new());
        memory.upsert(&Metadata::new("b", "", "", "B")).await.unwrap();
        memory.upsert(&Metadata::new("a", "", "", "A")).await.unwrap();

        let records = handle(memory, ListTokensQuery::default()).await.unwrap();
        let cids: Vec<_> = records.iter().map(|m| m.cid.as_str()).collect();
        assert_eq!(cids, vec!["a", "b"]);
    }
}
