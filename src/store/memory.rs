use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use super::{ApplicationRecord, ApplicationStore};
use crate::error::StoreError;

/// In-process application store.
///
/// Applications are keyed by internal id. Aliases map additional public
/// identifiers (e.g. global ids) to an internal id.
#[derive(Debug, Clone, Default)]
pub struct MemoryApplicationStore {
    records: HashMap<String, ApplicationRecord>,
    aliases: HashMap<String, String>,
}

impl MemoryApplicationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an application record.
    pub fn with_application(mut self, id: impl Into<String>, record: ApplicationRecord) -> Self {
        self.records.insert(id.into(), record);
        self
    }

    /// Add an application whose published document is `document`.
    pub fn with_document(self, id: impl Into<String>, document: Value) -> Self {
        self.with_application(id, ApplicationRecord::published(document))
    }

    /// Register `alias` as another identifier for `id`.
    pub fn with_alias(mut self, alias: impl Into<String>, id: impl Into<String>) -> Self {
        self.aliases.insert(alias.into(), id.into());
        self
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl ApplicationStore for MemoryApplicationStore {
    async fn resolve_application_id(&self, application_id: &str) -> Result<String, StoreError> {
        if self.records.contains_key(application_id) {
            return Ok(application_id.to_string());
        }

        self.aliases
            .get(application_id)
            .filter(|id| self.records.contains_key(*id))
            .cloned()
            .ok_or_else(|| StoreError::NotFound(application_id.to_string()))
    }

    async fn fetch_design_document(&self, internal_id: &str) -> Result<Option<Value>, StoreError> {
        self.records
            .get(internal_id)
            .map(|record| record.design_document().cloned())
            .ok_or_else(|| StoreError::NotFound(internal_id.to_string()))
    }
}
