//! Feature slices of the read API
//!
//! Each feature keeps its queries and its HTTP routes together:
//! - `queries/` - read operations against the metadata store
//! - `routes.rs` - axum handlers wiring the queries to HTTP
//!
//! # Features
//!
//! - **tokens**: stored CID metadata (`/tokens`, `/tokens/:cid`)

pub mod tokens;

use axum::Router;

use crate::store::SharedStore;

/// Shared state for all feature routes
#[derive(Clone)]
pub struct FeatureState {
    pub store: SharedStore,
}

/// Router with every feature mounted at its own path
pub fn router(state: FeatureState) -> Router<()> {
    Router::new().merge(tokens::tokens_routes().with_state(state.store))
}
