//! Fuzzing library for zotero-mcp.
//!
//! This crate provides fuzzing targets for JSON deserialization of the
//! Zotero Web API models and tool inputs, and for export splitting.
//!
//! # Usage
//!
//! ```bash
//! cd crates/zotero-fuzz
//! cargo +nightly fuzz run fuzz_item_parse -- -max_total_time=60
//! ```

pub use zotero_mcp::{formatters, models};
