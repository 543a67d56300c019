//! Router configuration for the application icon server.
//!
//! This module defines the HTTP routes and applies middleware for CORS and
//! request tracing.
//!
//! # Route Structure
//!
//! ```text
//! /health                                                 - Health check
//! /api/v1/applications/{application_id}/icons             - List icons
//! /api/v1/applications/{application_id}/icons/{size}.png  - Icon
//! /api/applications/{application_id}/icons                - List icons
//! /api/applications/{application_id}/icons/{size}.png     - Icon
//! ```
//!
//! # Example
//!
//! ```ignore
//! use app_icon_server::server::routes::{create_router, RouterConfig};
//! use app_icon_server::render::IconService;
//!
//! let icon_service = IconService::new(store, fetcher);
//!
//! let config = RouterConfig::new()
//!     .with_cors_origins(vec!["https://example.com".to_string()]);
//!
//! let router = create_router(icon_service, config);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, router).await?;
//! ```

use std::time::Duration;

use axum::{routing::get, Router};
use http::header::CONTENT_TYPE;
use http::Method;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{health_handler, icon_handler, icons_list_handler, AppState};
use crate::io::RemoteFetcher;
use crate::render::{IconService, DEFAULT_ICON_MAX_AGE};
use crate::store::ApplicationStore;

/// Current API prefix.
pub const API_PREFIX: &str = "/api/v1/applications";

/// Legacy API prefix, served identically.
pub const LEGACY_API_PREFIX: &str = "/api/applications";

// =============================================================================
// Router Configuration
// =============================================================================

/// Configuration for the HTTP router.
#[derive(Clone)]
pub struct RouterConfig {
    /// Allowed CORS origins (None = allow any origin)
    pub cors_origins: Option<Vec<String>>,

    /// Cache-Control max-age in seconds
    pub cache_max_age: u32,

    /// Whether to enable request tracing
    pub enable_tracing: bool,
}

impl RouterConfig {
    /// Create a new router configuration.
    ///
    /// By default:
    /// - CORS allows any origin
    /// - Cache max-age is 7 days (604800 seconds)
    /// - Tracing is enabled
    pub fn new() -> Self {
        Self {
            cors_origins: None,
            cache_max_age: DEFAULT_ICON_MAX_AGE,
            enable_tracing: true,
        }
    }

    /// Set specific allowed CORS origins.
    ///
    /// Pass an empty vec to disallow all cross-origin requests.
    /// Pass None (or don't call this method) to allow any origin.
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = Some(origins);
        self
    }

    /// Allow any CORS origin.
    pub fn with_cors_any_origin(mut self) -> Self {
        self.cors_origins = None;
        self
    }

    /// Set the Cache-Control max-age in seconds.
    pub fn with_cache_max_age(mut self, seconds: u32) -> Self {
        self.cache_max_age = seconds;
        self
    }

    /// Enable or disable request tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Router Builder
// =============================================================================

/// Create the main application router.
///
/// This function builds the complete Axum router with:
/// - Icon and listing routes under both API prefixes
/// - Health check
/// - CORS configuration
/// - Request tracing (optional)
///
/// # Arguments
///
/// * `icon_service` - The icon service for handling icon requests
/// * `config` - Router configuration
pub fn create_router<S, F>(icon_service: IconService<S, F>, config: RouterConfig) -> Router
where
    S: ApplicationStore + 'static,
    F: RemoteFetcher + 'static,
{
    let app_state = AppState::new(icon_service.with_max_age(config.cache_max_age));

    let cors = build_cors_layer(&config);

    let icon_routes = build_icon_routes(app_state);

    let router = Router::new()
        .route("/health", get(health_handler))
        .nest(API_PREFIX, icon_routes.clone())
        .nest(LEGACY_API_PREFIX, icon_routes)
        .layer(cors);

    if config.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

/// Icon routes relative to an API prefix.
fn build_icon_routes<S, F>(app_state: AppState<S, F>) -> Router
where
    S: ApplicationStore + 'static,
    F: RemoteFetcher + 'static,
{
    // {filename} captures "{size}.png"; the handler rejects anything else
    Router::new()
        .route("/{application_id}/icons", get(icons_list_handler::<S, F>))
        .route(
            "/{application_id}/icons/{filename}",
            get(icon_handler::<S, F>),
        )
        .with_state(app_state)
}

/// Build the CORS layer based on configuration.
fn build_cors_layer(config: &RouterConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(86400));

    match &config.cors_origins {
        None => cors.allow_origin(Any),
        Some(origins) if origins.is_empty() => cors,
        Some(origins) => {
            let parsed_origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            cors.allow_origin(parsed_origins)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
