//! Shared test helpers: a client pointed at a mock server and SSE bodies.

#![allow(dead_code)]

use ingot::client::AgentsClient;
use ingot::tools::McpTool;
use wiremock::{MockServer, ResponseTemplate};

pub const API_VERSION: &str = "2025-05-01";
pub const TOKEN: &str = "test-token";

/// Client whose project endpoint is the mock server.
pub fn client(server: &MockServer) -> AgentsClient {
    AgentsClient::new(server.uri(), TOKEN, API_VERSION)
}

/// The demo's weather MCP tool against a fake gateway.
pub fn weather_mcp() -> McpTool {
    let mut mcp = McpTool::new("weather", "https://gateway.test/weather-mcp/sse");
    mcp.update_headers("Authorization", "Bearer sub-key");
    mcp
}

/// Join `(event, data)` pairs into an SSE body.
pub fn sse_body(frames: &[(&str, &str)]) -> String {
    frames
        .iter()
        .map(|(event, data)| format!("event: {event}\ndata: {data}\n\n"))
        .collect()
}

/// A 200 response carrying an SSE body.
pub fn sse_response(frames: &[(&str, &str)]) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(sse_body(frames), "text/event-stream")
}

/// A run snapshot in `requires_action` with the given pending tool calls.
pub fn requires_action_data(run_id: &str, tool_calls: serde_json::Value) -> String {
    serde_json::json!({
        "id": run_id,
        "thread_id": "thread_1",
        "assistant_id": "asst_1",
        "status": "requires_action",
        "created_at": 1_719_000_000,
        "required_action": {
            "type": "submit_tool_approval",
            "submit_tool_approval": {"tool_calls": tool_calls}
        }
    })
    .to_string()
}

/// A `thread.message.delta` payload carrying one text fragment.
pub fn delta_data(text: &str) -> String {
    serde_json::json!({
        "id": "msg_1",
        "delta": {"content": [{"index": 0, "type": "text", "text": {"value": text}}]}
    })
    .to_string()
}
