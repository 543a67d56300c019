use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A stored application with its published and editing design documents.
///
/// On disk this is `{ "published": <dsl or null>, "editing": <dsl or null> }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    /// Design document of the latest published version
    #[serde(default)]
    pub published: Option<Value>,

    /// Design document currently being edited
    #[serde(default)]
    pub editing: Option<Value>,
}

impl ApplicationRecord {
    /// Record with only a published document.
    pub fn published(document: Value) -> Self {
        Self {
            published: Some(document),
            editing: None,
        }
    }

    /// Record with only an editing document.
    pub fn editing(document: Value) -> Self {
        Self {
            published: None,
            editing: Some(document),
        }
    }

    /// The document icons are rendered from: published first, then editing.
    pub fn design_document(&self) -> Option<&Value> {
        self.published
            .as_ref()
            .filter(|doc| !doc.is_null())
            .or_else(|| self.editing.as_ref().filter(|doc| !doc.is_null()))
    }
}
