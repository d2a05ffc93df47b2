//! Test helpers for cidscrape server integration tests
//!
//! - mock gateway responders built on wiremock
//! - stores that fail or record write concurrency
//! - request helpers for driving the axum router

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use cidscrape_common::Metadata;
use cidscrape_server::{
    ingest::{FetchPool, GatewayClient},
    store::{MemoryMetadataStore, MetadataStore, SharedStore, StoreError, StoreResult},
};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tower::ServiceExt;
use wiremock::{
    matchers::{method, path, path_regex},
    Mock, MockServer, Respond, ResponseTemplate,
};

// ============================================================================
// Gateway
// ============================================================================

/// Document the mock gateway serves for `cid` by default
pub fn document_for(cid: &str) -> serde_json::Value {
    json!({
        "image": format!("ipfs://{}/image.png", cid),
        "description": format!("Description of {}", cid),
        "name": format!("Token {}", cid),
        "attributes": [{ "trait_type": "ignored", "value": 1 }]
    })
}

pub fn expected_for(cid: &str) -> Metadata {
    Metadata::new(
        cid,
        format!("ipfs://{}/image.png", cid),
        format!("Description of {}", cid),
        format!("Token {}", cid),
    )
}

/// Answers every `/ipfs/<cid>` with [`document_for`]
pub struct EchoCid;

impl Respond for EchoCid {
    fn respond(&self, request: &wiremock::Request) -> ResponseTemplate {
        let cid = request.url.path().trim_start_matches("/ipfs/");
        ResponseTemplate::new(200).set_body_json(document_for(cid))
    }
}

pub async fn mount_echo(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path_regex(r"^/ipfs/.+$"))
        .respond_with(EchoCid)
        .mount(server)
        .await;
}

pub async fn mount_body(server: &MockServer, cid: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/ipfs/{}", cid)))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

pub async fn mount_status(server: &MockServer, cid: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(format!("/ipfs/{}", cid)))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

pub fn gateway(server: &MockServer) -> GatewayClient {
    GatewayClient::new(&server.uri(), Duration::from_secs(5)).unwrap()
}

pub fn pool(server: &MockServer, store: SharedStore, workers: usize) -> FetchPool {
    FetchPool::new(gateway(server), store, workers)
}

pub fn cids(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

// ============================================================================
// Stores
// ============================================================================

/// Store whose every operation fails
#[derive(Default)]
pub struct FailingStore;

#[async_trait]
impl MetadataStore for FailingStore {
    async fn upsert(&self, _record: &Metadata) -> StoreResult<()> {
        Err(StoreError::Unavailable("store offline".into()))
    }

    async fn get_all(&self) -> StoreResult<Vec<Metadata>> {
        Err(StoreError::Unavailable("store offline".into()))
    }

    async fn get_by_cid(&self, _cid: &str) -> StoreResult<Option<Metadata>> {
        Err(StoreError::Unavailable("store offline".into()))
    }

    async fn ping(&self) -> StoreResult<()> {
        Err(StoreError::Unavailable("store offline".into()))
    }
}

/// Store that rejects writes for one CID and delegates the rest
pub struct RejectingStore {
    pub inner: MemoryMetadataStore,
    pub reject: String,
}

#[async_trait]
impl MetadataStore for RejectingStore {
    async fn upsert(&self, record: &Metadata) -> StoreResult<()> {
        if record.cid == self.reject {
            return Err(StoreError::Unavailable(format!("constraint violated for {}", record.cid)));
        }
        self.inner.upsert(record).await
    }

    async fn get_all(&self) -> StoreResult<Vec<Metadata>> {
        self.inner.get_all().await
    }

    async fn get_by_cid(&self, cid: &str) -> StoreResult<Option<Metadata>> {
        self.inner.get_by_cid(cid).await
    }
}

/// Store that holds each write for `delay` and records peak write concurrency
pub struct SlowStore {
    pub inner: MemoryMetadataStore,
    pub delay: Duration,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl SlowStore {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: MemoryMetadataStore::new(),
            delay,
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetadataStore for SlowStore {
    async fn upsert(&self, record: &Metadata) -> StoreResult<()> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        let result = self.inner.upsert(record).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }

    async fn get_all(&self) -> StoreResult<Vec<Metadata>> {
        self.inner.get_all().await
    }

    async fn get_by_cid(&self, cid: &str) -> StoreResult<Option<Metadata>> {
        self.inner.get_by_cid(cid).await
    }
}

// ============================================================================
// HTTP
// ============================================================================

/// Send a GET through the router and return status and body text
pub async fn get_request(app: &Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, String::from_utf8(body.to_vec()).unwrap())
}
