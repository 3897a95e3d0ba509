#![no_main]

use libfuzzer_sys::fuzz_target;
use zotero_mcp::models::{
    CreateItemInput, ExportCollectionInput, ExportFormat, GetItemsInput, SearchItemsInput,
};

fuzz_target!(|data: &[u8]| {
    if let Ok(json) = serde_json::from_slice::<serde_json::Value>(data) {
        let _ = serde_json::from_value::<GetItemsInput>(json.clone());
        let _ = serde_json::from_value::<SearchItemsInput>(json.clone());
        let _ = serde_json::from_value::<CreateItemInput>(json.clone());
        if let Ok(input) = serde_json::from_value::<ExportCollectionInput>(json) {
            let _ = ExportFormat::from_str_loose(&input.format);
        }
    }
});
