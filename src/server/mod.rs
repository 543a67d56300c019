//! HTTP server layer for the application icon server.
//!
//! This module provides the HTTP API for serving application icons.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         HTTP Layer                              │
//! │      GET /api/{v1/}applications/{application_id}/icons/...      │
//! │                                                                 │
//! │  ┌──────────────────────────┐  ┌─────────────────────────────┐  │
//! │  │        handlers          │  │           routes            │  │
//! │  │ (icon, listing, health)  │  │ (prefixes, CORS, tracing)   │  │
//! │  └──────────────────────────┘  └─────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod handlers;
pub mod routes;

pub use handlers::{
    health_handler, icon_handler, icons_list_handler, AppState, HealthResponse, IconPathParams,
    ICON_SOURCE_HEADER,
};
pub use routes::{create_router, RouterConfig, API_PREFIX, LEGACY_API_PREFIX};
