//! HTTP request handlers for the application icon API.
//!
//! This module contains the Axum handlers for serving icons, icon listings
//! and health checks.
//!
//! # Endpoints
//!
//! - `GET {prefix}/{application_id}/icons/{size}.png` - Serve an icon
//! - `GET {prefix}/{application_id}/icons` - List icon variants
//! - `GET /health` - Health check endpoint

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderName, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::RequestError;
use crate::io::RemoteFetcher;
use crate::render::{validate_request, IconListing, IconService, IconSize};
use crate::store::ApplicationStore;

/// Response header naming the pipeline branch that produced an icon.
pub const ICON_SOURCE_HEADER: &str = "x-icon-source";

// =============================================================================
// Application State
// =============================================================================

/// Shared application state containing the icon service.
///
/// This is passed to all handlers via Axum's State extractor.
pub struct AppState<S: ApplicationStore, F: RemoteFetcher> {
    /// The icon service for processing icon requests
    pub icon_service: Arc<IconService<S, F>>,
}

impl<S: ApplicationStore, F: RemoteFetcher> AppState<S, F> {
    /// Create a new application state with the given icon service.
    pub fn new(icon_service: IconService<S, F>) -> Self {
        Self {
            icon_service: Arc::new(icon_service),
        }
    }
}

impl<S: ApplicationStore, F: RemoteFetcher> Clone for AppState<S, F> {
    fn clone(&self) -> Self {
        Self {
            icon_service: Arc::clone(&self.icon_service),
        }
    }
}

// =============================================================================
// Request Parameters
// =============================================================================

/// Path parameters for icon requests.
///
/// Extracted from: `{prefix}/{application_id}/icons/{filename}`
/// where filename is `{size}.png`
#[derive(Debug, Deserialize)]
pub struct IconPathParams {
    /// Public application identifier
    pub application_id: String,

    /// Requested file name (e.g., "192.png")
    pub filename: String,
}

impl IconPathParams {
    /// Parse the requested size from the file name.
    pub fn size(&self) -> Result<IconSize, RequestError> {
        IconSize::from_path_segment(&self.filename)
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Request-shape errors are answered with a bare 400.
///
/// No body is sent; icon consumers (browsers reading a manifest) have no use
/// for one.
impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        let status = StatusCode::BAD_REQUEST;

        warn!(status = status.as_u16(), "Client error: {}", self);

        status.into_response()
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle icon requests.
///
/// # Endpoint
///
/// `GET {prefix}/{application_id}/icons/{size}.png`
///
/// # Response
///
/// - `200 OK`: PNG icon, the placeholder if the application has no usable icon
/// - `400 Bad Request`: Unsupported size or malformed application id
///
/// # Headers
///
/// - `Content-Type: image/png`
/// - `Cache-Control: public, max-age={max_age}`
/// - `X-Icon-Source: inline|remote|placeholder`
pub async fn icon_handler<S, F>(
    State(state): State<AppState<S, F>>,
    Path(params): Path<IconPathParams>,
) -> Result<Response, RequestError>
where
    S: ApplicationStore + 'static,
    F: RemoteFetcher + 'static,
{
    let size = params.size()?;
    let request = validate_request(&params.application_id, size)?;

    let icon = state.icon_service.render_icon(&request).await;

    let headers = [
        (header::CONTENT_TYPE, icon.content_type().to_string()),
        (header::CACHE_CONTROL, icon.cache_control()),
        (
            HeaderName::from_static(ICON_SOURCE_HEADER),
            icon.origin.as_str().to_string(),
        ),
    ];

    Ok((StatusCode::OK, headers, icon.data).into_response())
}

/// Handle icon listing requests.
///
/// # Endpoint
///
/// `GET {prefix}/{application_id}/icons`
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// {
///   "icons": {
///     "192": "/api/applications/{id}/icons/192.png",
///     "512": "/api/applications/{id}/icons/512.png"
///   }
/// }
/// ```
///
/// Nothing is rendered and the store is not consulted.
pub async fn icons_list_handler<S, F>(
    State(state): State<AppState<S, F>>,
    Path(application_id): Path<String>,
) -> Result<Json<IconListing>, RequestError>
where
    S: ApplicationStore + 'static,
    F: RemoteFetcher + 'static,
{
    state.icon_service.list_icons(&application_id).map(Json)
}

/// Handle health check requests.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0"
/// }
/// ```
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// =============================================================================
// Tests
// =============================================================================
