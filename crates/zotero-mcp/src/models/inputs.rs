//! Input models for MCP tool parameters.
//!
//! Argument names are snake_case to match the published tool schemas.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default number of records returned by listing tools.
pub const DEFAULT_MAX_ITEMS: usize = 5;

fn default_max_items() -> usize {
    DEFAULT_MAX_ITEMS
}

fn default_format() -> String {
    "bibtex".to_string()
}

/// Input for listing library items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetItemsInput {
    /// Maximum items to return.
    #[serde(default = "default_max_items")]
    pub max_items: usize,
}

/// Input for searching library items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchItemsInput {
    /// Search terms.
    pub query: String,

    /// Maximum items to return.
    #[serde(default = "default_max_items")]
    pub max_items: usize,

    /// Restrict to one item type (`book`, `journalArticle`, ...). Empty means any.
    #[serde(default)]
    pub item_type: Option<String>,

    /// Restrict to items carrying this tag. Empty means any.
    #[serde(default)]
    pub tag: Option<String>,
}

/// Input for creating an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateItemInput {
    /// Item fields; `itemType` selects the template (default `journalArticle`).
    pub item_data: Map<String, Value>,
}

/// Input for updating an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateItemInput {
    /// Key of the item to update.
    pub item_key: String,

    /// Fields to change.
    pub item_data: Map<String, Value>,
}

/// Input for deleting an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteItemInput {
    /// Key of the item to delete.
    pub item_key: String,
}

/// Input for listing collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetCollectionsInput {
    /// Maximum collections to return.
    #[serde(default = "default_max_items")]
    pub max_items: usize,
}

/// Input for creating a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCollectionInput {
    /// Collection name.
    pub name: String,

    /// Parent collection key. Empty means top level.
    #[serde(default)]
    pub parent_collection: Option<String>,
}

/// Input for adding an item to a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddToCollectionInput {
    /// Key of the item.
    pub item_key: String,

    /// Key of the collection.
    pub collection_key: String,
}

/// Input for exporting the whole library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportLibraryInput {
    /// Export format name.
    #[serde(default = "default_format")]
    pub format: String,
}

/// Input for exporting one collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportCollectionInput {
    /// Key of the collection to export.
    pub collection_key: String,

    /// Export format name.
    #[serde(default = "default_format")]
    pub format: String,
}
