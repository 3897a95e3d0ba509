//! MCP tool implementations.
//!
//! Each tool module provides tools that:
//! 1. Coerce the JSON arguments into a typed input
//! 2. Call the library adapter built from the shared configuration
//! 3. Format results as plain text

mod collections;
mod export;
mod items;

pub use collections::*;
pub use export::*;
pub use items::*;

use crate::config::Config;
use crate::error::{ToolError, ToolResult};
use crate::library::LibraryManager;

/// Text returned when a write was acknowledged.
pub const SUCCESS: &str = "Success";

/// Text returned when a write was not acknowledged.
pub const ACTION_FAILED: &str = "Could not complete the action";

/// Tool execution context.
#[derive(Debug, Clone)]
pub struct ToolContext {
    /// Library configuration shared by every call.
    pub config: Config,
}

impl ToolContext {
    /// Create a new tool context.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// A fresh library adapter for one tool call.
    pub fn library(&self) -> ToolResult<LibraryManager> {
        LibraryManager::new(&self.config).map_err(ToolError::from)
    }
}

/// Trait for MCP tools.
#[async_trait::async_trait]
pub trait McpTool: Send + Sync {
    /// Tool name (e.g., "search_zotero").
    fn name(&self) -> &'static str;

    /// Tool description for LLM.
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters.
    fn input_schema(&self) -> serde_json::Value;

    /// Execute the tool with given input.
    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String>;
}

/// Register all tools.
#[must_use]
pub fn register_all_tools() -> Vec<Box<dyn McpTool>> {
    vec![
        // Item tools (5)
        Box::new(items::GetItemsTool),
        Box::new(items::SearchItemsTool),
        Box::new(items::CreateItemTool),
        Box::new(items::UpdateItemTool),
        Box::new(items::DeleteItemTool),

        // Collection tools (3)
        Box::new(collections::GetCollectionsTool),
        Box::new(collections::CreateCollectionTool),
        Box::new(collections::AddItemToCollectionTool),

        // Export tools (2)
        Box::new(export::ExportLibraryTool),
        Box::new(export::ExportCollectionTool),
    ]
}

/// Render a tool result as the text the caller sees. Failures become `Error: ...`.
#[must_use]
pub fn render_result(result: ToolResult<String>) -> String {
    match result {
        Ok(text) => text,
        Err(e) => format!("Error: {}", e.to_user_message()),
    }
}

/// Text for a boolean write outcome.
#[must_use]
pub fn outcome_message(ok: bool, success: &str) -> String {
    if ok { success.to_string() } else { ACTION_FAILED.to_string() }
}
