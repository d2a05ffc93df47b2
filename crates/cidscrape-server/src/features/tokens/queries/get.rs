use cidscrape_common::Metadata;
use serde::{Deserialize, Serialize};

use crate::store::{SharedStore, StoreError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetTokenQuery {
    pub cid: String,
}

#[derive(Debug, thiserror::Error)]
pub enum GetTokenError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Look up one record. A CID that was never stored yields `Ok(None)`.
#[tracing::instrument(skip(store), fields(cid = %query.cid))]
pub async fn handle(
    store: SharedStore,
    query: GetTokenQuery,
) -> Result<Option<Metadata>, GetTokenError> {
    let record = store.get_by_cid(&query.cid).await?;
    if record.is_none() {
        tracing::debug!("No metadata stored for CID");
    }
    Ok(record)
}
