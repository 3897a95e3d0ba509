//! Collection tools: get_zotero_collections, create_zotero_collection,
//! add_item_zotero_collection.

use serde_json::json;

use super::{McpTool, SUCCESS, ToolContext, outcome_message};
use crate::error::ToolResult;
use crate::formatters;
use crate::models::{
    AddToCollectionInput, CreateCollectionInput, DEFAULT_MAX_ITEMS, GetCollectionsInput,
};

/// Lists collections in the library.
pub struct GetCollectionsTool;

#[async_trait::async_trait]
impl McpTool for GetCollectionsTool {
    fn name(&self) -> &'static str {
        "get_zotero_collections"
    }

    fn description(&self) -> &'static str {
        "Get collections from the Zotero library with their item and sub-collection counts."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "max_items": {
                    "type": "integer",
                    "minimum": 0,
                    "default": DEFAULT_MAX_ITEMS,
                    "description": "Maximum number of collections to return"
                }
            }
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: GetCollectionsInput = serde_json::from_value(input)?;

        let collections = ctx.library()?.list_collections().await?;

        Ok(formatters::format_collections(&collections, params.max_items))
    }
}

/// Creates a collection, optionally nested.
pub struct CreateCollectionTool;

#[async_trait::async_trait]
impl McpTool for CreateCollectionTool {
    fn name(&self) -> &'static str {
        "create_zotero_collection"
    }

    fn description(&self) -> &'static str {
        "Create a new collection, optionally inside a parent collection."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "name": {
                    "type": "string",
                    "description": "Name of the collection"
                },
                "parent_collection": {
                    "type": "string",
                    "default": "",
                    "description": "Key of the parent collection; empty for a top-level collection"
                }
            },
            "required": ["name"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: CreateCollectionInput = serde_json::from_value(input)?;

        let created = ctx
            .library()?
            .create_collection(&params.name, params.parent_collection.as_deref())
            .await?;
        tracing::info!(name = %params.name, created, "Create collection finished");

        Ok(outcome_message(created, SUCCESS))
    }
}

/// Files an item into a collection.
pub struct AddItemToCollectionTool;

#[async_trait::async_trait]
impl McpTool for AddItemToCollectionTool {
    fn name(&self) -> &'static str {
        "add_item_zotero_collection"
    }

    fn description(&self) -> &'static str {
        "Add an existing item to an existing collection."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "item_key": {
                    "type": "string",
                    "description": "Key of the Zotero item"
                },
                "collection_key": {
                    "type": "string",
                    "description": "Key of the collection"
                }
            },
            "required": ["item_key", "collection_key"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: AddToCollectionInput = serde_json::from_value(input)?;

        ctx.library()?
            .add_item_to_collection(&params.item_key, &params.collection_key)
            .await?;

        Ok(SUCCESS.to_string())
    }
}
