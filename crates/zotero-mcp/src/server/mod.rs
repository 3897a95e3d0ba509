//! MCP server implementation.
//!
//! Serves the registered tools over line-delimited JSON-RPC on stdio.

pub mod protocol;
pub mod stdio;

use crate::config::Config;
use crate::error::ToolResult;
use crate::tools::{self, McpTool, ToolContext};

/// MCP server for a Zotero library.
pub struct McpServer {
    /// Tool execution context.
    ctx: ToolContext,

    /// Registered tools.
    tools: Vec<Box<dyn McpTool>>,
}

impl McpServer {
    /// Create a new MCP server.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let ctx = ToolContext::new(config);
        let tools = tools::register_all_tools();

        Self { ctx, tools }
    }

    /// Run the server in stdio mode until stdin closes.
    ///
    /// # Errors
    ///
    /// Returns error on I/O failure.
    pub async fn run_stdio(self) -> anyhow::Result<()> {
        tracing::info!("Starting MCP server in stdio mode");
        tracing::info!("Registered {} tools", self.tools.len());

        stdio::run_stdio(&self).await
    }

    /// Get tool by name.
    #[must_use]
    pub fn get_tool(&self, name: &str) -> Option<&dyn McpTool> {
        self.tools.iter().find(|t| t.name() == name).map(|t| t.as_ref())
    }

    /// All registered tools.
    #[must_use]
    pub fn tools(&self) -> &[Box<dyn McpTool>] {
        &self.tools
    }

    /// List all available tools.
    #[must_use]
    pub fn list_tools(&self) -> Vec<(&str, &str)> {
        self.tools.iter().map(|t| (t.name(), t.description())).collect()
    }

    /// Run a tool by name. `None` when no such tool is registered.
    pub async fn execute(&self, name: &str, input: serde_json::Value) -> Option<ToolResult<String>> {
        let tool = self.get_tool(name)?;

        tracing::info!(tool = %name, "Executing tool");
        let result = tool.execute(&self.ctx, input).await;
        if let Err(e) = &result {
            tracing::error!(tool = %name, error = %e, "Tool execution failed");
        }

        Some(result)
    }
}

impl std::fmt::Debug for McpServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("McpServer").field("tools", &self.tools.len()).finish()
    }
}
