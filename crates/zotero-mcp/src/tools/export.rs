//! Export tools: export_zotero_library, export_zotero_collection.

use serde_json::json;

use super::{McpTool, ToolContext};
use crate::error::{ToolError, ToolResult};
use crate::models::{ExportCollectionInput, ExportFormat, ExportLibraryInput};

/// Resolve a format argument, rejecting names the API does not export.
fn parse_format(name: &str) -> ToolResult<ExportFormat> {
    ExportFormat::from_str_loose(name).ok_or_else(|| {
        ToolError::validation(
            "format",
            format!(
                "unsupported export format '{name}', expected one of: {}",
                ExportFormat::names().join(", ")
            ),
        )
    })
}

fn format_schema() -> serde_json::Value {
    json!({
        "type": "string",
        "enum": ExportFormat::names(),
        "default": "bibtex",
        "description": "Export format"
    })
}

/// Exports the whole library.
pub struct ExportLibraryTool;

#[async_trait::async_trait]
impl McpTool for ExportLibraryTool {
    fn name(&self) -> &'static str {
        "export_zotero_library"
    }

    fn description(&self) -> &'static str {
        "Export every item in the library as a bibliography (BibTeX by default, also RIS, \
         BibLaTeX, CSL JSON and other Zotero export formats)."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "format": format_schema()
            }
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: ExportLibraryInput = serde_json::from_value(input)?;
        let format = parse_format(&params.format)?;

        let bundle = ctx.library()?.export_library(format).await?;
        tracing::info!(%format, entries = bundle.len(), "Exported library");

        Ok(bundle.render())
    }
}

/// Exports one collection.
pub struct ExportCollectionTool;

#[async_trait::async_trait]
impl McpTool for ExportCollectionTool {
    fn name(&self) -> &'static str {
        "export_zotero_collection"
    }

    fn description(&self) -> &'static str {
        "Export the items of one collection as a bibliography (BibTeX by default)."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "collection_key": {
                    "type": "string",
                    "description": "Key of the collection to export"
                },
                "format": format_schema()
            },
            "required": ["collection_key"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: ExportCollectionInput = serde_json::from_value(input)?;
        let format = parse_format(&params.format)?;

        let bundle = ctx.library()?.export_collection(&params.collection_key, format).await?;
        tracing::info!(
            collection = %params.collection_key,
            %format,
            entries = bundle.len(),
            "Exported collection"
        );

        Ok(bundle.render())
    }
}
