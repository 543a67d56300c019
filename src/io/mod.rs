//! I/O layer for remote icon sources.
//!
//! [`RemoteFetcher`] is the seam the icon service fetches through;
//! [`HttpFetcher`] is the reqwest-backed implementation used in production.

mod http_fetcher;
mod remote;

pub use http_fetcher::{
    HttpFetcher, DEFAULT_FETCH_TIMEOUT, DEFAULT_MAX_FETCH_BYTES, MAX_REDIRECTS,
};
pub use remote::RemoteFetcher;
