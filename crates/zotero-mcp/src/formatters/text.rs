//! Plain-text record formatting.
//!
//! Every record renders as a block that starts and ends with a newline;
//! blocks are joined by a line of 80 dashes.

use serde_json::{Map, Value};

use crate::models::{Collection, Item, creators_of};

/// Placeholder for fields the record does not carry.
pub const UNKNOWN: &str = "Unknown";

/// Width of the separator line between records.
const SEPARATOR_WIDTH: usize = 80;

/// Separator placed between record blocks.
#[must_use]
pub fn record_separator() -> String {
    format!("\n{}\n", "-".repeat(SEPARATOR_WIDTH))
}

/// Join record blocks with [`record_separator`].
#[must_use]
pub fn join_records(blocks: &[String]) -> String {
    blocks.join(&record_separator())
}

/// The first `min(max, len)` records.
#[must_use]
pub fn take_max<T>(records: &[T], max: usize) -> &[T] {
    &records[..max.min(records.len())]
}

/// Format an item's field map.
#[must_use]
pub fn format_item(data: &Map<String, Value>) -> String {
    let creators = creators_of(data)
        .iter()
        .map(|c| c.display_name())
        .collect::<Vec<_>>()
        .join(" and ");

    format!(
        "\nItem key: {}\nItem type: {}\nDate: {}\nTitle: {}\nCreators: {}\nISBN: {}\n",
        field(data.get("key")),
        field(data.get("itemType")),
        field(data.get("date")),
        field(data.get("title")),
        creators,
        field(data.get("ISBN")),
    )
}

/// Format a collection envelope.
#[must_use]
pub fn format_collection(collection: &Collection) -> String {
    format!(
        "\nKey: {}\nName: {}\nNum. items: {}\nNum. Collections: {}\n",
        collection.data.key.as_deref().unwrap_or(UNKNOWN),
        collection.data.name.as_deref().unwrap_or(UNKNOWN),
        count(collection.meta.num_items),
        count(collection.meta.num_collections),
    )
}

/// Format up to `max` items, in listing order.
#[must_use]
pub fn format_items(items: &[Item], max: usize) -> String {
    let blocks: Vec<String> = take_max(items, max).iter().map(|item| format_item(&item.data)).collect();
    join_records(&blocks)
}

/// Format up to `max` collections, in listing order.
#[must_use]
pub fn format_collections(collections: &[Collection], max: usize) -> String {
    let blocks: Vec<String> = take_max(collections, max).iter().map(format_collection).collect();
    join_records(&blocks)
}

fn field(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => UNKNOWN.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn count(value: Option<u64>) -> String {
    value.map_or_else(|| UNKNOWN.to_string(), |n| n.to_string())
}
