//! Filesystem-backed application store.
//!
//! Each application is one JSON file, `<root>/<id>.json`, holding an
//! [`ApplicationRecord`]. The file name is the internal identifier.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::{is_valid_application_id, ApplicationRecord, ApplicationStore};
use crate::error::StoreError;

/// Extension of application record files.
const RECORD_EXTENSION: &str = "json";

/// Application store reading records from a directory.
#[derive(Debug, Clone)]
pub struct FsApplicationStore {
    root: PathBuf,
}

impl FsApplicationStore {
    /// Create a store over the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Get the root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the record file for an identifier.
    ///
    /// Returns `None` for identifiers that are not safe file names.
    fn record_path(&self, id: &str) -> Option<PathBuf> {
        if !is_valid_application_id(id) {
            return None;
        }
        Some(self.root.join(format!("{}.{}", id, RECORD_EXTENSION)))
    }

    async fn read_record(&self, id: &str) -> Result<ApplicationRecord, StoreError> {
        let path = self
            .record_path(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let data = tokio::fs::read(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => StoreError::NotFound(id.to_string()),
            _ => StoreError::Storage(format!("{}: {}", path.display(), e)),
        })?;

        serde_json::from_slice(&data).map_err(|e| StoreError::InvalidRecord {
            id: id.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl ApplicationStore for FsApplicationStore {
    async fn resolve_application_id(&self, application_id: &str) -> Result<String, StoreError> {
        let path = self
            .record_path(application_id)
            .ok_or_else(|| StoreError::NotFound(application_id.to_string()))?;

        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(application_id.to_string()),
            Ok(_) => Err(StoreError::NotFound(application_id.to_string())),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StoreError::NotFound(application_id.to_string()))
            }
            Err(e) => Err(StoreError::Storage(format!("{}: {}", path.display(), e))),
        }
    }

    async fn fetch_design_document(&self, internal_id: &str) -> Result<Option<Value>, StoreError> {
        let record = self.read_record(internal_id).await?;
        let document = record.design_document().cloned();

        if document.is_none() {
            debug!(application_id = internal_id, "Application has no design document");
        }

        Ok(document)
    }
}
