//! Data models for Zotero Web API entities and tool inputs.
//!
//! Item fields vary by item type, so items keep their `data` as a JSON map;
//! envelopes and collections are typed with `#[serde(default)]` throughout.

mod collection;
mod export;
mod inputs;
mod item;
mod write;

pub use collection::{Collection, CollectionData, CollectionMeta, NewCollection};
pub use export::{ExportBundle, ExportFormat};
pub use inputs::*;
pub use item::{Creator, Item, ItemTemplate, creators_of};
pub use write::WriteResponse;
