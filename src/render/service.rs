//! Icon Service for orchestrating icon rendering.
//!
//! The IconService is the main entry point for icon requests. It orchestrates:
//! - Application id resolution and design document lookup
//! - Icon reference extraction and classification
//! - Inline decoding or remote fetching
//! - Scaling and PNG encoding
//! - The placeholder fallback
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          IconService                            │
//! │  ┌─────────────────────────────────────────────────────────┐    │
//! │  │                    render_icon()                        │    │
//! │  │  1. Resolve id        4. Inline decode / remote fetch   │    │
//! │  │  2. Load document     5. Scale & encode                 │    │
//! │  │  3. Classify source   6. Placeholder on any failure     │    │
//! │  └─────────────────────────────────────────────────────────┘    │
//! │          │                    │                    │            │
//! │          ▼                    ▼                    ▼            │
//! │  ┌──────────────────┐ ┌───────────────┐ ┌───────────────────┐   │
//! │  │ ApplicationStore │ │ RemoteFetcher │ │ IconScaler /      │   │
//! │  │                  │ │               │ │ Placeholder       │   │
//! │  └──────────────────┘ └───────────────┘ └───────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only request-shape problems are errors. Everything that can go wrong with
//! the icon itself ends in the placeholder.

use std::collections::BTreeMap;
use std::sync::Arc;

use bytes::Bytes;
use serde::Serialize;
use tracing::{debug, error};

use crate::error::{PipelineError, RenderError, RequestError, SourceError};
use crate::io::RemoteFetcher;
use crate::source::{extract_icon_field, IconSource, RawImageBytes};
use crate::store::{is_valid_application_id, ApplicationStore};

use super::fallback::PlaceholderGenerator;
use super::scaler::IconScaler;
use super::size::{IconRequest, IconSize};

/// Content type of every rendered icon.
pub const ICON_CONTENT_TYPE: &str = "image/png";

/// Default Cache-Control max-age for icons in seconds (7 days).
pub const DEFAULT_ICON_MAX_AGE: u32 = 7 * 24 * 60 * 60;

/// Path prefix used in icon listings.
pub const ICON_URL_PREFIX: &str = "/api/applications";

// =============================================================================
// Rendered Icon
// =============================================================================

/// Which branch of the pipeline produced an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconOrigin {
    /// Decoded from an inline data URL
    Inline,
    /// Fetched from a remote URL
    Remote,
    /// Generated placeholder
    Placeholder,
}

impl IconOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            IconOrigin::Inline => "inline",
            IconOrigin::Remote => "remote",
            IconOrigin::Placeholder => "placeholder",
        }
    }
}

/// The result of an icon request.
#[derive(Debug, Clone)]
pub struct RenderedIcon {
    /// PNG bytes. Empty only if the PNG encoder itself is broken.
    pub data: Bytes,

    /// Which branch produced the bytes
    pub origin: IconOrigin,

    /// Output size
    pub size: IconSize,

    /// Cache-Control max-age in seconds
    pub max_age: u32,
}

impl RenderedIcon {
    /// Always `image/png`.
    pub fn content_type(&self) -> &'static str {
        ICON_CONTENT_TYPE
    }

    /// Value for the Cache-Control header.
    pub fn cache_control(&self) -> String {
        format!("public, max-age={}", self.max_age)
    }
}

/// Servable icon variants of an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IconListing {
    /// Size label (e.g. "192") to relative URL
    pub icons: BTreeMap<String, String>,
}

// =============================================================================
// Icon Service
// =============================================================================

/// Service for resolving and rendering application icons.
///
/// Holds only immutable collaborators, so a single instance can serve any
/// number of concurrent requests. Nothing is cached between requests.
///
/// # Type Parameters
///
/// * `S` - The application store
/// * `F` - The remote fetcher
///
/// # Example
///
/// ```ignore
/// use app_icon_server::render::{IconService, IconRequest, IconSize};
///
/// let service = IconService::new(store, fetcher);
/// let icon = service.render_icon(&IconRequest::new("my-app", IconSize::Px192)).await;
/// println!("{} bytes from {}", icon.data.len(), icon.origin.as_str());
/// ```
pub struct IconService<S: ApplicationStore, F: RemoteFetcher> {
    /// Application id resolution and design documents
    store: Arc<S>,

    /// Remote icon fetcher
    fetcher: Arc<F>,

    /// Decoder/scaler for real icons
    scaler: IconScaler,

    /// Fallback generator
    placeholder: PlaceholderGenerator,

    /// Cache-Control max-age attached to every icon
    max_age: u32,
}

impl<S: ApplicationStore + 'static, F: RemoteFetcher + 'static> IconService<S, F> {
    /// Create a new icon service with the default 7 day max-age.
    pub fn new(store: S, fetcher: F) -> Self {
        Self::with_shared(Arc::new(store), Arc::new(fetcher))
    }

    /// Create a new icon service from shared collaborators.
    pub fn with_shared(store: Arc<S>, fetcher: Arc<F>) -> Self {
        Self {
            store,
            fetcher,
            scaler: IconScaler::new(),
            placeholder: PlaceholderGenerator::new(),
            max_age: DEFAULT_ICON_MAX_AGE,
        }
    }

    /// Set the Cache-Control max-age in seconds.
    pub fn with_max_age(mut self, seconds: u32) -> Self {
        self.max_age = seconds;
        self
    }

    /// Get the configured max-age.
    pub fn max_age(&self) -> u32 {
        self.max_age
    }

    /// Get a reference to the application store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Validate a raw request and render it.
    ///
    /// # Errors
    ///
    /// Returns an error only for request-shape problems: an unsupported size
    /// or an application id with invalid syntax.
    pub async fn render(
        &self,
        application_id: &str,
        size_pixels: u32,
    ) -> Result<RenderedIcon, RequestError> {
        let size = IconSize::from_pixels(size_pixels)
            .ok_or_else(|| RequestError::UnsupportedSize(size_pixels.to_string()))?;
        let request = validate_request(application_id, size)?;
        Ok(self.render_icon(&request).await)
    }

    /// Render an icon, falling back to the placeholder on any failure.
    pub async fn render_icon(&self, request: &IconRequest) -> RenderedIcon {
        let size = request.size;

        let (data, origin) = match self.render_from_source(request).await {
            Ok(rendered) => rendered,
            Err(e) => {
                debug!(
                    application_id = %request.application_id,
                    size = size.pixels(),
                    reason = %e,
                    "Serving placeholder icon"
                );
                (self.render_placeholder(size).await, IconOrigin::Placeholder)
            }
        };

        RenderedIcon {
            data,
            origin,
            size,
            max_age: self.max_age,
        }
    }

    /// Resolve the application's icon reference.
    pub async fn resolve_source(&self, application_id: &str) -> Result<IconSource, PipelineError> {
        let internal_id = self.store.resolve_application_id(application_id).await?;
        let document = self.store.fetch_design_document(&internal_id).await?;

        let raw = document.as_ref().and_then(extract_icon_field);
        Ok(IconSource::classify(raw.as_deref()))
    }

    /// Produce raw image bytes for a classified source.
    pub async fn load_source_bytes(
        &self,
        source: &IconSource,
    ) -> Result<RawImageBytes, SourceError> {
        match source {
            IconSource::None => Err(SourceError::Missing),
            IconSource::Inline { .. } => source.decode_inline(),
            IconSource::Remote { url } => {
                let data = self.fetcher.fetch(url).await?;
                Ok(RawImageBytes::from(data))
            }
        }
    }

    /// List the servable icon variants without rendering anything.
    pub fn list_icons(&self, application_id: &str) -> Result<IconListing, RequestError> {
        if !is_valid_application_id(application_id) {
            return Err(RequestError::InvalidApplicationId(
                application_id.to_string(),
            ));
        }

        let icons = IconSize::ALL
            .iter()
            .map(|size| {
                (
                    size.to_string(),
                    format!("{}/{}/icons/{}.png", ICON_URL_PREFIX, application_id, size),
                )
            })
            .collect();

        Ok(IconListing { icons })
    }

    async fn render_from_source(
        &self,
        request: &IconRequest,
    ) -> Result<(Bytes, IconOrigin), PipelineError> {
        let source = self.resolve_source(&request.application_id).await?;

        let origin = match &source {
            IconSource::None => return Err(SourceError::Missing.into()),
            IconSource::Inline { .. } => IconOrigin::Inline,
            IconSource::Remote { .. } => IconOrigin::Remote,
        };

        let raw = self.load_source_bytes(&source).await?;
        let data = self.scale(raw, request.size).await?;

        Ok((data, origin))
    }

    /// Decode, scale and encode on the blocking pool.
    async fn scale(&self, raw: RawImageBytes, size: IconSize) -> Result<Bytes, RenderError> {
        let scaler = self.scaler.clone();
        let data = raw.into_bytes();

        tokio::task::spawn_blocking(move || scaler.render(&data, size.pixels()))
            .await
            .map_err(|e| RenderError::Task(e.to_string()))?
    }

    async fn render_placeholder(&self, size: IconSize) -> Bytes {
        let generator = self.placeholder.clone();

        match tokio::task::spawn_blocking(move || generator.generate(size.pixels())).await {
            Ok(png) => png,
            Err(e) => {
                error!(size = size.pixels(), error = %e, "Placeholder task failed");
                Bytes::new()
            }
        }
    }
}

/// Check an application id and pair it with a size.
pub fn validate_request(application_id: &str, size: IconSize) -> Result<IconRequest, RequestError> {
    if !is_valid_application_id(application_id) {
        return Err(RequestError::InvalidApplicationId(
            application_id.to_string(),
        ));
    }
    Ok(IconRequest::new(application_id, size))
}

// =============================================================================
// Tests
// =============================================================================
