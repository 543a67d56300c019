//! Icon rendering.
//!
//! This module turns raw image bytes into square PNG icons and owns the
//! request orchestration.
//!
//! # Pipeline
//!
//! ```text
//! IconRequest { application_id, size }
//!        │
//!        ▼
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │ resolve id & │──▶│ classify icon│──▶│ inline bytes │──┐
//! │ load document│   │  reference   │   │ or fetch url │  │
//! └──────────────┘   └──────────────┘   └──────────────┘  │
//!        │ error             │ none             │ error    ▼
//!        │                   │                  │   ┌──────────────┐
//!        └───────────────────┴──────────────────┴──▶│ IconScaler / │
//!                                                   │ Placeholder  │
//!                                                   └──────┬───────┘
//!                                                          ▼
//!                                                  RenderedIcon (PNG)
//! ```
//!
//! # Components
//!
//! - [`IconSize`] / [`IconRequest`]: the two supported sizes and a validated request
//! - [`IconScaler`]: decode, contain-fit and re-encode
//! - [`PlaceholderGenerator`]: deterministic fallback icon
//! - [`IconService`]: the orchestrator

mod fallback;
mod scaler;
mod service;
mod size;

pub use fallback::{
    placeholder_padding, PlaceholderGenerator, MIN_PLACEHOLDER_PADDING, PLACEHOLDER_BACKGROUND,
    PLACEHOLDER_FOREGROUND,
};
pub use scaler::{contain_fit, encode_png, IconScaler, Placement, RESAMPLE_FILTER};
pub use service::{
    validate_request, IconListing, IconOrigin, IconService, RenderedIcon, DEFAULT_ICON_MAX_AGE,
    ICON_CONTENT_TYPE, ICON_URL_PREFIX,
};
pub use size::{IconRequest, IconSize};
