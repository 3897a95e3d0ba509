//! Item tools: get_zotero_items, search_zotero, create_item_zotero,
//! update_item_zotero, delete_item_zotero.

use serde_json::json;

use super::{McpTool, SUCCESS, ToolContext, outcome_message};
use crate::error::ToolResult;
use crate::formatters;
use crate::models::{
    CreateItemInput, DEFAULT_MAX_ITEMS, DeleteItemInput, GetItemsInput, SearchItemsInput,
    UpdateItemInput,
};

/// Lists items in the library.
pub struct GetItemsTool;

#[async_trait::async_trait]
impl McpTool for GetItemsTool {
    fn name(&self) -> &'static str {
        "get_zotero_items"
    }

    fn description(&self) -> &'static str {
        "Get items from the Zotero library, in library order."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "max_items": {
                    "type": "integer",
                    "minimum": 0,
                    "default": DEFAULT_MAX_ITEMS,
                    "description": "Maximum number of items to return"
                }
            }
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: GetItemsInput = serde_json::from_value(input)?;

        let items = ctx.library()?.list_all_items().await?;
        tracing::debug!(total = items.len(), max = params.max_items, "Listed items");

        Ok(formatters::format_items(&items, params.max_items))
    }
}

/// Searches items by free text, optionally by type and tag.
pub struct SearchItemsTool;

#[async_trait::async_trait]
impl McpTool for SearchItemsTool {
    fn name(&self) -> &'static str {
        "search_zotero"
    }

    fn description(&self) -> &'static str {
        "Search items in the Zotero library by terms, optionally restricted to an item type or tag."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Terms to search"
                },
                "max_items": {
                    "type": "integer",
                    "minimum": 0,
                    "default": DEFAULT_MAX_ITEMS,
                    "description": "Maximum number of items to return"
                },
                "item_type": {
                    "type": "string",
                    "default": "",
                    "description": "Item type such as 'book' or 'journalArticle'; empty for any"
                },
                "tag": {
                    "type": "string",
                    "default": "",
                    "description": "Only items carrying this tag; empty for any"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: SearchItemsInput = serde_json::from_value(input)?;

        let items = ctx
            .library()?
            .search_items(
                &params.query,
                params.item_type.as_deref().unwrap_or_default(),
                params.tag.as_deref().unwrap_or_default(),
            )
            .await?;

        Ok(formatters::format_items(&items, params.max_items))
    }
}

/// Creates an item from a field map.
pub struct CreateItemTool;

#[async_trait::async_trait]
impl McpTool for CreateItemTool {
    fn name(&self) -> &'static str {
        "create_item_zotero"
    }

    fn description(&self) -> &'static str {
        "Create a new item in the library. Fields follow the Zotero template for the item's \
         itemType (default journalArticle); fields the template does not define are dropped."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "item_data": {
                    "type": "object",
                    "description": "Item fields, e.g. {\"itemType\": \"journalArticle\", \"title\": \"...\", \
                                    \"creators\": [{\"creatorType\": \"author\", \"firstName\": \"\", \"lastName\": \"\"}], \
                                    \"date\": \"\", \"DOI\": \"\", \"tags\": [], \"collections\": []}"
                }
            },
            "required": ["item_data"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: CreateItemInput = serde_json::from_value(input)?;

        let created = ctx.library()?.create_item(&params.item_data).await?;
        tracing::info!(created, "Create item finished");

        Ok(outcome_message(created, SUCCESS))
    }
}

/// Changes fields of an existing item.
pub struct UpdateItemTool;

#[async_trait::async_trait]
impl McpTool for UpdateItemTool {
    fn name(&self) -> &'static str {
        "update_item_zotero"
    }

    fn description(&self) -> &'static str {
        "Update fields of an existing item. Only the supplied fields change; fields the item \
         type's template does not define are dropped."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "item_key": {
                    "type": "string",
                    "description": "Key of the Zotero item"
                },
                "item_data": {
                    "type": "object",
                    "description": "Fields to change, e.g. {\"title\": \"...\", \"date\": \"2024\"}"
                }
            },
            "required": ["item_key", "item_data"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: UpdateItemInput = serde_json::from_value(input)?;

        let updated = ctx.library()?.update_item(&params.item_key, &params.item_data).await?;

        Ok(outcome_message(updated, SUCCESS))
    }
}

/// Deletes an item.
pub struct DeleteItemTool;

#[async_trait::async_trait]
impl McpTool for DeleteItemTool {
    fn name(&self) -> &'static str {
        "delete_item_zotero"
    }

    fn description(&self) -> &'static str {
        "Delete an item from the library."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "item_key": {
                    "type": "string",
                    "description": "Key of the Zotero item"
                }
            },
            "required": ["item_key"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: DeleteItemInput = serde_json::from_value(input)?;

        let deleted = ctx.library()?.delete_item(&params.item_key).await?;

        Ok(outcome_message(deleted, &format!("Success deleting item {}", params.item_key)))
    }
}
