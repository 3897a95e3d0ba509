//! Stdio transport for MCP protocol.
//!
//! Handles line-delimited JSON-RPC 2.0 over stdin/stdout. Logging goes to
//! stderr; stdout carries only responses.

use serde_json::json;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use super::McpServer;
use super::protocol::{
    DEFAULT_PROTOCOL_VERSION, INVALID_PARAMS, INVALID_REQUEST, JsonRpcRequest, JsonRpcResponse,
    METHOD_NOT_FOUND, McpToolInfo, PARSE_ERROR,
};
use crate::tools::render_result;

/// Handle MCP protocol over the process's stdin and stdout.
pub async fn run_stdio(server: &McpServer) -> anyhow::Result<()> {
    let reader = BufReader::new(tokio::io::stdin());
    let writer = tokio::io::stdout();

    serve(reader, writer, server).await
}

/// Serve requests read line by line from `reader` until EOF.
pub async fn serve<R, W>(mut reader: R, mut writer: W, server: &McpServer) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line = String::new();

    tracing::info!("MCP stdio server ready, waiting for requests...");

    loop {
        line.clear();
        let bytes_read = reader.read_line(&mut line).await?;

        if bytes_read == 0 {
            tracing::info!("Stdin closed, shutting down");
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<serde_json::Value>(trimmed) {
            Err(e) => Some(JsonRpcResponse::error(None, PARSE_ERROR, format!("Parse error: {e}"))),
            Ok(value) => match serde_json::from_value::<JsonRpcRequest>(value) {
                Err(e) => Some(JsonRpcResponse::error(
                    None,
                    INVALID_REQUEST,
                    format!("Invalid request: {e}"),
                )),
                Ok(request) => {
                    tracing::debug!(method = %request.method, "Received request");
                    handle_request(&request, server).await
                }
            },
        };

        if let Some(response) = response {
            let response_json = serde_json::to_string(&response)?;
            writer.write_all(response_json.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }
    }

    Ok(())
}

/// Dispatch one request. Notifications produce no response.
pub async fn handle_request(req: &JsonRpcRequest, server: &McpServer) -> Option<JsonRpcResponse> {
    if req.is_notification() {
        tracing::debug!(method = %req.method, "Notification");
        return None;
    }

    let id = req.id.clone();
    let response = match req.method.as_str() {
        "initialize" => handle_initialize(id, &req.params),
        "tools/list" => handle_tools_list(id, server),
        "tools/call" => handle_tools_call(id, &req.params, server).await,
        "ping" => JsonRpcResponse::success(id, json!({})),
        _ => JsonRpcResponse::error(id, METHOD_NOT_FOUND, format!("Method not found: {}", req.method)),
    };

    Some(response)
}

fn handle_initialize(id: Option<serde_json::Value>, params: &serde_json::Value) -> JsonRpcResponse {
    let protocol_version = params
        .get("protocolVersion")
        .and_then(|v| v.as_str())
        .unwrap_or(DEFAULT_PROTOCOL_VERSION);

    tracing::info!("MCP initialize: protocol version {}", protocol_version);

    JsonRpcResponse::success(
        id,
        json!({
            "protocolVersion": protocol_version,
            "capabilities": {
                "tools": {}
            },
            "serverInfo": {
                "name": "zotero-mcp-server",
                "version": env!("CARGO_PKG_VERSION")
            }
        }),
    )
}

fn handle_tools_list(id: Option<serde_json::Value>, server: &McpServer) -> JsonRpcResponse {
    let tool_list: Vec<McpToolInfo> = server
        .tools()
        .iter()
        .map(|t| McpToolInfo {
            name: t.name().to_string(),
            description: t.description().to_string(),
            input_schema: t.input_schema(),
        })
        .collect();

    JsonRpcResponse::success(id, json!({ "tools": tool_list }))
}

async fn handle_tools_call(
    id: Option<serde_json::Value>,
    params: &serde_json::Value,
    server: &McpServer,
) -> JsonRpcResponse {
    let Some(tool_name) = params.get("name").and_then(|v| v.as_str()) else {
        return JsonRpcResponse::error(id, INVALID_PARAMS, "Missing 'name' parameter");
    };

    let arguments = params.get("arguments").cloned().unwrap_or_else(|| json!({}));

    match server.execute(tool_name, arguments).await {
        Some(result) => JsonRpcResponse::text(id, render_result(result)),
        None => JsonRpcResponse::error(id, INVALID_PARAMS, format!("Tool not found: {tool_name}")),
    }
}
