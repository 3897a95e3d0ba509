#![no_main]

use libfuzzer_sys::fuzz_target;
use zotero_mcp::models::{ExportBundle, ExportFormat};

fuzz_target!(|data: &[u8]| {
    // Split arbitrary export bodies in every format
    if let Ok(body) = std::str::from_utf8(data) {
        for format in ExportFormat::ALL {
            let bundle = ExportBundle::from_body(format, body);
            assert!(bundle.entries.iter().all(|e| !e.trim().is_empty()));
        }
    }
});
