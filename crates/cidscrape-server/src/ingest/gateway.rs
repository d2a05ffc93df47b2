//! Content gateway client

use anyhow::Context;
use cidscrape_common::Metadata;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;

use super::types::FetchError;

/// Fetches and decodes metadata documents from `<base>/ipfs/<cid>`
#[derive(Clone)]
pub struct GatewayClient {
    client: reqwest::Client,
    base_url: Url,
}

impl GatewayClient {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("cidscrape/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build gateway HTTP client")?;

        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid gateway URL '{}'", base_url))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("Gateway URL '{}' cannot carry a path", base_url);
        }

        Ok(Self { client, base_url })
    }

    /// `<base>/ipfs/<cid>` with the CID as a single percent-encoded segment.
    pub fn url_for(&self, cid: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        // Infallible: `new` rejects cannot-be-a-base URLs.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["ipfs", cid]);
        }
        url
    }

    /// GET and decode the document for `cid`.
    ///
    /// Aborts with a network error as soon as `cancel` fires.
    pub async fn fetch(
        &self,
        cid: &str,
        cancel: &CancellationToken,
    ) -> Result<Metadata, FetchError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(FetchError::Network("cancelled".to_string())),
            result = self.fetch_uncancelled(cid) => result,
        }
    }

    async fn fetch_uncancelled(&self, cid: &str) -> Result<Metadata, FetchError> {
        let url = self.url_for(cid);
        tracing::debug!(cid = %cid, url = %url, "Fetching metadata");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::Network(format!("GET {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Network(format!("GET {} returned {}", url, status)));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Network(format!("reading body of {} failed: {}", url, e)))?;

        Metadata::from_json(cid, &body).map_err(FetchError::from)
    }
}
