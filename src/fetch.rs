//! HTTP retrieval of transcript documents.

use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

/// Seam for executing HTTP requests, kept narrow so tests can substitute
/// a canned client.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response>;
}

/// Plain [`reqwest::Client`] implementation of [`HttpClient`].
pub struct BasicClient(reqwest::Client);

impl BasicClient {
    pub fn new() -> Self {
        Self(reqwest::Client::new())
    }
}

impl Default for BasicClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for BasicClient {
    async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        self.0.execute(req).await
    }
}

/// Downloads a document over HTTP and returns its raw bytes.
///
/// # Errors
///
/// Fails on an invalid URL, connection errors, non-success status codes,
/// or an unreadable body.
pub async fn fetch_document<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let req = reqwest::Request::new(reqwest::Method::GET, url.parse()?);

    let resp = client.execute(req).await?.error_for_status()?;
    let bytes = resp.bytes().await?.to_vec();

    debug!(url, bytes = bytes.len(), "Document fetched");
    Ok(bytes)
}
