use std::time::Duration;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use reqwest::Client;
use tracing::debug;
use url::Url;

use super::RemoteFetcher;
use crate::error::FetchError;

/// Default time budget for a single remote icon fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Default maximum size of a remote icon body (5 MiB).
pub const DEFAULT_MAX_FETCH_BYTES: usize = 5 * 1024 * 1024;

/// Maximum number of redirects followed before giving up.
pub const MAX_REDIRECTS: usize = 5;

/// reqwest-backed implementation of RemoteFetcher.
///
/// Every fetch is bounded twice: by the client's own timeout and by a
/// `tokio::time::timeout` around the whole request, so a server that trickles
/// the body still cannot hold the request past the budget. Bodies larger than
/// `max_bytes` are rejected, first from `Content-Length` and then while
/// streaming.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
    max_bytes: usize,
}

impl HttpFetcher {
    /// Create a fetcher with the given time budget and body size limit.
    pub fn new(timeout: Duration, max_bytes: usize) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(concat!("app-icon-server/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            timeout,
            max_bytes,
        })
    }

    /// Create a fetcher with default limits.
    pub fn with_defaults() -> Result<Self, FetchError> {
        Self::new(DEFAULT_FETCH_TIMEOUT, DEFAULT_MAX_FETCH_BYTES)
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Get the configured body size limit.
    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    async fn fetch_body(&self, url: &Url) -> Result<Bytes, FetchError> {
        let mut response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "image/*")
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e, url))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        if let Some(len) = response.content_length() {
            if len > self.max_bytes as u64 {
                return Err(FetchError::TooLarge {
                    limit: self.max_bytes,
                });
            }
        }

        let mut body = BytesMut::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| self.map_reqwest_error(e, url))?
        {
            if body.len() + chunk.len() > self.max_bytes {
                return Err(FetchError::TooLarge {
                    limit: self.max_bytes,
                });
            }
            body.extend_from_slice(&chunk);
        }

        Ok(body.freeze())
    }

    fn map_reqwest_error(&self, e: reqwest::Error, url: &Url) -> FetchError {
        if e.is_timeout() {
            self.timeout_error(url)
        } else {
            FetchError::Transport(e.to_string())
        }
    }

    fn timeout_error(&self, url: &Url) -> FetchError {
        FetchError::Timeout {
            url: url.to_string(),
            timeout_ms: self.timeout.as_millis() as u64,
        }
    }
}

#[async_trait]
impl RemoteFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<Bytes, FetchError> {
        debug!(url = %url, "Fetching remote icon");

        match tokio::time::timeout(self.timeout, self.fetch_body(url)).await {
            Ok(result) => result,
            Err(_) => Err(self.timeout_error(url)),
        }
    }
}
