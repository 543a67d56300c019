//! Application store abstraction.
//!
//! The icon pipeline needs two things from the outside world: a way to turn
//! the identifier in the URL into an internal one, and a way to load that
//! application's design document. Both live behind [`ApplicationStore`].
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │              IconService                │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │         ApplicationStore Trait          │
//! └────────────────────┬────────────────────┘
//!          ┌───────────┴───────────┐
//!          ▼                       ▼
//! ┌─────────────────┐    ┌─────────────────────┐
//! │ FsApplication-  │    │ MemoryApplication-  │
//! │ Store (JSON dir)│    │ Store (in-process)  │
//! └─────────────────┘    └─────────────────────┘
//! ```

mod fs_store;
mod memory;
mod record;

pub use fs_store::FsApplicationStore;
pub use memory::MemoryApplicationStore;
pub use record::ApplicationRecord;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreError;

/// Maximum accepted length of an application identifier.
pub const MAX_APPLICATION_ID_LEN: usize = 128;

/// Source of application identities and design documents.
#[async_trait]
pub trait ApplicationStore: Send + Sync {
    /// Map an opaque application identifier to the internal one.
    ///
    /// Returns `StoreError::NotFound` for unknown identifiers.
    async fn resolve_application_id(&self, application_id: &str) -> Result<String, StoreError>;

    /// Load the current design document for an internal identifier.
    ///
    /// `Ok(None)` means the application exists but has no document yet.
    async fn fetch_design_document(&self, internal_id: &str) -> Result<Option<Value>, StoreError>;
}

/// Check the syntax of an application identifier.
///
/// Accepts 1 to 128 ASCII alphanumerics, `-` and `_`. This covers both
/// object ids and UUID-style global ids and keeps identifiers safe to use as
/// file names.
pub fn is_valid_application_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_APPLICATION_ID_LEN
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}
