//! Collection data model.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A collection as returned by `GET /collections`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Collection {
    /// Server-assigned collection key.
    #[serde(default)]
    pub key: String,

    /// Library version of this collection.
    #[serde(default)]
    pub version: u64,

    /// Server-computed counts.
    #[serde(default)]
    pub meta: CollectionMeta,

    /// Collection fields.
    #[serde(default)]
    pub data: CollectionData,
}

/// Counts the server attaches to a collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionMeta {
    /// Items directly in the collection.
    #[serde(default)]
    pub num_items: Option<u64>,

    /// Direct sub-collections.
    #[serde(default)]
    pub num_collections: Option<u64>,
}

/// Editable collection fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionData {
    /// Collection key (mirrors the envelope key).
    #[serde(default)]
    pub key: Option<String>,

    /// Display name.
    #[serde(default)]
    pub name: Option<String>,

    /// Parent key, or `false` for a top-level collection.
    #[serde(default)]
    pub parent_collection: Option<Value>,
}

impl CollectionData {
    /// Parent collection key, if this collection is nested.
    #[must_use]
    pub fn parent_key(&self) -> Option<&str> {
        self.parent_collection.as_ref().and_then(Value::as_str)
    }
}

/// Body of a collection create request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCollection {
    /// Collection name.
    pub name: String,

    /// Parent collection key. Omitted from the request entirely when `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_collection: Option<String>,
}

impl NewCollection {
    /// Build a create request; an empty parent counts as no parent.
    #[must_use]
    pub fn new(name: impl Into<String>, parent: Option<&str>) -> Self {
        Self {
            name: name.into(),
            parent_collection: parent.filter(|p| !p.is_empty()).map(String::from),
        }
    }
}
