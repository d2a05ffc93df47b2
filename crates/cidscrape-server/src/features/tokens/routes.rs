//! Token metadata routes
//!
//! - `GET /tokens` - all stored records as a JSON array
//! - `GET /tokens/:cid` - one record, or `null` when the CID is unknown
//!
//! Both answer 200 on success. A store failure is a 500 whose body is the
//! error text.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use cidscrape_common::Metadata;

use super::queries::{self, GetTokenQuery, ListTokensQuery};
use crate::error::ApiError;
use crate::store::SharedStore;

pub fn tokens_routes() -> Router<SharedStore> {
    Router::new()
        .route("/tokens", get(list_tokens))
        .route("/tokens/:cid", get(get_token))
}

async fn list_tokens(State(store): State<SharedStore>) -> Result<Json<Vec<Metadata>>, ApiError> {
    tracing::info!("Fetching all metadata");
    let records = queries::list::handle(store, ListTokensQuery::default()).await?;
    Ok(Json(records))
}

async fn get_token(
    State(store): State<SharedStore>,
    Path(cid): Path<String>,
) -> Result<Json<Option<Metadata>>, ApiError> {
    let record = queries::get::handle(store, GetTokenQuery { cid }).await?;
    Ok(Json(record))
}
