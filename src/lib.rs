//! # App Icon Server
//!
//! Serves square PNG icons for low-code applications, as referenced from a
//! PWA manifest.
//!
//! Each application's design document may carry an icon reference under
//! `settings.icon`: either an inline `data:` URL or an `http(s)` URL. The
//! referenced image is decoded, contain-fit into a transparent square canvas
//! at 192 or 512 pixels and re-encoded as PNG. Whenever that is not possible
//! (no document, no reference, broken payload, unreachable host, undecodable
//! image) a deterministic placeholder is served instead, so a valid request
//! always gets an image.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`store`] - Application id resolution and design documents
//! - [`source`] - Icon reference extraction and classification
//! - [`io`] - Remote icon fetching
//! - [`render`] - Scaling, placeholder generation and orchestration
//! - [`server`] - Axum-based HTTP server and routes
//! - [`config`] - CLI and configuration types
//!
//! ## Example
//!
//! ```rust,no_run
//! use app_icon_server::{create_router, FsApplicationStore, HttpFetcher, IconService, RouterConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = FsApplicationStore::new("/var/lib/apps");
//!     let fetcher = HttpFetcher::with_defaults()?;
//!     let router = create_router(IconService::new(store, fetcher), RouterConfig::new());
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//!     axum::serve(listener, router).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod io;
pub mod render;
pub mod server;
pub mod source;
pub mod store;

// Re-export commonly used types
pub use config::{Cli, Command, FetchArgs, RenderConfig, ServeConfig};
pub use error::{FetchError, PipelineError, RenderError, RequestError, SourceError, StoreError};
pub use io::{HttpFetcher, RemoteFetcher, DEFAULT_FETCH_TIMEOUT, DEFAULT_MAX_FETCH_BYTES};
pub use render::{
    IconListing, IconOrigin, IconRequest, IconScaler, IconService, IconSize, PlaceholderGenerator,
    RenderedIcon, DEFAULT_ICON_MAX_AGE,
};
pub use server::{create_router, AppState, HealthResponse, RouterConfig, ICON_SOURCE_HEADER};
pub use source::{extract_icon_field, IconSource, RawImageBytes};
pub use store::{
    is_valid_application_id, ApplicationRecord, ApplicationStore, FsApplicationStore,
    MemoryApplicationStore,
};
