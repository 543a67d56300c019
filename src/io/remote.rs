use async_trait::async_trait;
use bytes::Bytes;
use url::Url;

use crate::error::FetchError;

/// Trait for fetching a remote icon's raw bytes.
///
/// This abstraction lets the icon service run against the real network in
/// production and against canned responses in tests. Implementations must
/// bound their own running time: a fetch that never completes stalls the
/// request that issued it.
#[async_trait]
pub trait RemoteFetcher: Send + Sync {
    /// Issue a single GET for `url` and return the response body.
    ///
    /// Any transport failure, non-success status, timeout or oversize body is
    /// an error. Callers do not retry.
    async fn fetch(&self, url: &Url) -> Result<Bytes, FetchError>;
}
