//! Item data model matching the Zotero Web API item envelope.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A library item as returned by `GET /items`.
///
/// The bibliographic fields live in `data`, whose shape depends on `itemType`,
/// so they are kept as a free-form map.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Item {
    /// Server-assigned item key.
    #[serde(default)]
    pub key: String,

    /// Library version of this item, used for conditional writes.
    #[serde(default)]
    pub version: u64,

    /// Server-computed metadata (creator summary, child count, ...).
    #[serde(default)]
    pub meta: Map<String, Value>,

    /// Item fields (`itemType`, `title`, `creators`, `date`, ...).
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl Item {
    /// Item type from `data.itemType`, if present.
    #[must_use]
    pub fn item_type(&self) -> Option<&str> {
        self.data.get("itemType").and_then(Value::as_str)
    }

    /// Title from `data.title`, if present.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.data.get("title").and_then(Value::as_str)
    }

    /// Keys of the collections this item belongs to.
    #[must_use]
    pub fn collections(&self) -> Vec<String> {
        self.data
            .get("collections")
            .and_then(Value::as_array)
            .map(|keys| keys.iter().filter_map(Value::as_str).map(String::from).collect())
            .unwrap_or_default()
    }

    /// Creators parsed from `data.creators`. Malformed entries become empty creators.
    #[must_use]
    pub fn creators(&self) -> Vec<Creator> {
        creators_of(&self.data)
    }
}

/// Parse the `creators` array of an item's field map.
#[must_use]
pub fn creators_of(data: &Map<String, Value>) -> Vec<Creator> {
    data.get("creators")
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .map(|c| serde_json::from_value(c.clone()).unwrap_or_default())
                .collect()
        })
        .unwrap_or_default()
}

/// A creator (author, editor, ...) of an item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Creator {
    /// Role tag (`author`, `editor`, `translator`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator_type: Option<String>,

    /// Given name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    /// Family name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    /// Single-field name (institutions).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Creator {
    /// `"First Last"`, with empty parts kept as empty strings.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        )
    }
}

/// Server-provided field schema for one item type (`GET /items/new`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemTemplate(pub Map<String, Value>);

impl ItemTemplate {
    /// Whether the template defines `field`.
    #[must_use]
    pub fn recognizes(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// The subset of `fields` this template recognizes. Everything else is dropped.
    #[must_use]
    pub fn filter(&self, fields: &Map<String, Value>) -> Map<String, Value> {
        fields
            .iter()
            .filter(|(key, _)| self.recognizes(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Overwrite template defaults with every recognized key from `fields`.
    #[must_use]
    pub fn merge(mut self, fields: &Map<String, Value>) -> Map<String, Value> {
        for (key, value) in self.filter(fields) {
            self.0.insert(key, value);
        }
        self.0
    }
}
