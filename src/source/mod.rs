//! Icon source layer.
//!
//! This module turns an application's design document into raw image bytes.
//! It knows nothing about HTTP or rasters; its only job is to find the icon
//! reference and say what kind of reference it is.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            Design Document              │
//! │        { "settings": { "icon" } }       │
//! └────────────────────┬────────────────────┘
//!                      │ extract_icon_field
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │              IconSource                 │
//! │     None  |  Inline  |  Remote(url)     │
//! └──────────┬─────────────────┬────────────┘
//!            │ decode_inline   │ RemoteFetcher
//!            ▼                 ▼
//! ┌─────────────────────────────────────────┐
//! │             RawImageBytes               │
//! └─────────────────────────────────────────┘
//! ```
//!
//! Classification never fails. Anything that cannot be understood becomes
//! [`IconSource::None`] so that a broken icon never blocks rendering.

mod classify;
mod extract;

pub use classify::{IconSource, RawImageBytes, BASE64_MARKER, DATA_URL_PREFIX};
pub use extract::extract_icon_field;
