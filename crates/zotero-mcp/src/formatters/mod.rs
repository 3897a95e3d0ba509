//! Output formatting for tool results.
//!
//! Results are plain text: one block per record, joined by a dashed rule.

mod text;

pub use text::*;
