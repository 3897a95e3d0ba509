//! Library operations exposed to the tools.
//!
//! [`LibraryManager`] turns high-level bibliography operations into one or
//! more [`ZoteroClient`] calls. It keeps no state between calls beyond the
//! client handle, and reports upstream failures unchanged.

use serde_json::{Map, Value, json};

use crate::client::ZoteroClient;
use crate::config::{Config, api};
use crate::error::ClientResult;
use crate::models::{Collection, ExportBundle, ExportFormat, Item, NewCollection};

/// High-level operations on one Zotero library.
#[derive(Debug, Clone)]
pub struct LibraryManager {
    client: ZoteroClient,
}

impl LibraryManager {
    /// Create a manager with a fresh client for the configured library.
    pub fn new(config: &Config) -> ClientResult<Self> {
        Ok(Self { client: ZoteroClient::new(config)? })
    }

    /// Every item in the library.
    pub async fn list_all_items(&self) -> ClientResult<Vec<Item>> {
        self.client.all_items().await
    }

    /// Items matching `query`, optionally restricted by item type and tag.
    pub async fn search_items(
        &self,
        query: &str,
        item_type: &str,
        tag: &str,
    ) -> ClientResult<Vec<Item>> {
        let params = search_params(query, item_type, tag);
        self.client.items(&params).await
    }

    /// Create an item from caller-supplied fields.
    ///
    /// Fields outside the item type's template are dropped. Returns whether the
    /// server acknowledged the write; the new key is not returned.
    pub async fn create_item(&self, fields: &Map<String, Value>) -> ClientResult<bool> {
        let item_type = fields
            .get("itemType")
            .and_then(Value::as_str)
            .unwrap_or(api::DEFAULT_ITEM_TYPE);

        let template = self.client.item_template(item_type).await?;
        let record = Value::Object(template.merge(fields));

        let response = self.client.create_items(&[record]).await?;
        if response.is_success() {
            tracing::debug!(keys = ?response.written_keys(), "Item created");
        } else {
            tracing::warn!(failures = ?response.failure_messages(), "Item create rejected");
        }
        Ok(response.is_success())
    }

    /// Patch an existing item with caller-supplied fields.
    ///
    /// Only fields the template of the item's (possibly new) type recognizes
    /// are sent. Fields not supplied are left untouched. Returns `false`
    /// without writing when no supplied field is recognized.
    pub async fn update_item(&self, key: &str, fields: &Map<String, Value>) -> ClientResult<bool> {
        let item = self.client.item(key).await?;
        let item_type = fields
            .get("itemType")
            .and_then(Value::as_str)
            .or_else(|| item.item_type())
            .unwrap_or(api::DEFAULT_ITEM_TYPE);

        let template = self.client.item_template(item_type).await?;
        let patch = template.filter(fields);
        if patch.is_empty() {
            tracing::debug!(key, "No recognized fields to update");
            return Ok(false);
        }

        self.client.patch_item(key, item.version, &Value::Object(patch)).await?;
        Ok(true)
    }

    /// Delete an item. Reports success once the delete is accepted.
    pub async fn delete_item(&self, key: &str) -> ClientResult<bool> {
        let item = self.client.item(key).await?;
        self.client.delete_item(&item.key, item.version).await?;
        Ok(true)
    }

    /// Every collection in the library.
    pub async fn list_collections(&self) -> ClientResult<Vec<Collection>> {
        self.client.all_collections().await
    }

    /// Create a collection, nested under `parent_key` when given.
    pub async fn create_collection(&self, name: &str, parent_key: Option<&str>) -> ClientResult<bool> {
        let collection = NewCollection::new(name, parent_key);
        let response = self.client.create_collections(&[collection]).await?;
        if !response.is_success() {
            tracing::warn!(failures = ?response.failure_messages(), "Collection create rejected");
        }
        Ok(response.is_success())
    }

    /// Add an item to a collection.
    pub async fn add_item_to_collection(&self, item_key: &str, collection_key: &str) -> ClientResult<()> {
        let item = self.client.item(item_key).await?;

        let mut collections = item.collections();
        if !collections.iter().any(|c| c == collection_key) {
            collections.push(collection_key.to_string());
        }

        let patch = json!({ "collections": collections });
        self.client.patch_item(&item.key, item.version, &patch).await
    }

    /// Export every item in the library with one batched export request.
    pub async fn export_library(&self, format: ExportFormat) -> ClientResult<ExportBundle> {
        let items = self.list_all_items().await?;
        self.export_items(&items, format).await
    }

    /// Export the items of one collection with one batched export request.
    pub async fn export_collection(
        &self,
        collection_key: &str,
        format: ExportFormat,
    ) -> ClientResult<ExportBundle> {
        let items = self.client.all_collection_items(collection_key).await?;
        self.export_items(&items, format).await
    }

    async fn export_items(&self, items: &[Item], format: ExportFormat) -> ClientResult<ExportBundle> {
        let keys: Vec<String> = items.iter().map(|item| item.key.clone()).collect();
        if keys.is_empty() {
            return Ok(ExportBundle::empty(format));
        }

        tracing::debug!(count = keys.len(), %format, "Exporting items");
        let body = self.client.export_items(&keys, format).await?;
        Ok(ExportBundle::from_body(format, &body))
    }
}

/// Query parameters for an item search. Empty filters are left out entirely.
#[must_use]
pub fn search_params(query: &str, item_type: &str, tag: &str) -> Vec<(String, String)> {
    let mut params = vec![("q".to_string(), query.to_string())];
    if !item_type.is_empty() {
        params.push(("itemType".to_string(), item_type.to_string()));
    }
    if !tag.is_empty() {
        params.push(("tag".to_string(), tag.to_string()));
    }
    params
}
