#![no_main]

use libfuzzer_sys::fuzz_target;
use zotero_mcp::formatters::{format_collection, format_item};
use zotero_mcp::models::{Collection, Item, WriteResponse};

fuzz_target!(|data: &[u8]| {
    // Parsing and formatting must never panic, only return Ok or Err
    if let Ok(item) = serde_json::from_slice::<Item>(data) {
        let _ = format_item(&item.data);
        let _ = item.collections();
    }
    if let Ok(collection) = serde_json::from_slice::<Collection>(data) {
        let _ = format_collection(&collection);
    }
    if let Ok(response) = serde_json::from_slice::<WriteResponse>(data) {
        let _ = response.written_keys();
        let _ = response.failure_messages();
    }
});
