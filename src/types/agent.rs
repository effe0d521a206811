//! Agent definitions and lifecycle payloads.

use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tools::{ToolDefinition, ToolResources};

/// A service-managed agent: a model deployment bundled with instructions
/// and a tool set.
#[derive(Debug, Clone, Deserialize)]
pub struct Agent {
    pub id: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub name: Option<String>,
    pub model: String,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub tools: Vec<ToolDefinition>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub top_p: Option<f64>,
}

/// Request body for creating an agent.
#[derive(Debug, Clone, Serialize, Builder)]
pub struct CreateAgentRequest {
    #[builder(into)]
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub instructions: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub tools: Vec<ToolDefinition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_resources: Option<ToolResources>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
}

/// Acknowledgement returned by delete endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct DeletionStatus {
    pub id: String,
    pub deleted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::McpTool;
    use serde_json::json;

    #[test]
    fn create_agent_request_serializes_tools_and_resources() {
        let mcp = McpTool::new("weather", "https://gw.example/weather-mcp/sse");
        let request = CreateAgentRequest::builder()
            .model("gpt-4o")
            .name("demo-agent")
            .instructions("Be helpful.")
            .tools(vec![ToolDefinition::CodeInterpreter, mcp.definition()])
            .tool_resources(mcp.resources())
            .temperature(0.1)
            .build();

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["model"], "gpt-4o");
        assert_eq!(body["name"], "demo-agent");
        assert_eq!(body["tools"][0], json!({"type": "code_interpreter"}));
        assert_eq!(body["tools"][1]["type"], "mcp");
        assert_eq!(body["tools"][1]["server_label"], "weather");
        assert_eq!(
            body["tool_resources"]["mcp"][0]["server_label"],
            "weather"
        );
        assert_eq!(body["temperature"], 0.1);
        // Unset options stay off the wire.
        assert!(body.get("top_p").is_none());
    }

    #[test]
    fn minimal_request_omits_empty_sections() {
        let request = CreateAgentRequest::builder().model("gpt-4o").build();
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body, json!({"model": "gpt-4o"}));
    }

    #[test]
    fn agent_deserializes_service_payload() {
        let agent: Agent = serde_json::from_value(json!({
            "id": "asst_abc123",
            "object": "assistant",
            "created_at": 1_719_000_000,
            "name": "demo-agent",
            "model": "gpt-4o",
            "instructions": "Be helpful.",
            "tools": [
                {"type": "code_interpreter"},
                {"type": "mcp", "server_label": "weather", "server_url": "https://gw/sse"}
            ],
            "temperature": 0.1,
            "metadata": {}
        }))
        .unwrap();

        assert_eq!(agent.id, "asst_abc123");
        assert_eq!(agent.name.as_deref(), Some("demo-agent"));
        assert_eq!(agent.tools.len(), 2);
        assert_eq!(agent.temperature, Some(0.1));
    }

    #[test]
    fn unrecognized_tool_kind_is_tolerated() {
        let agent: Agent = serde_json::from_value(json!({
            "id": "asst_x",
            "created_at": 1_719_000_000,
            "model": "gpt-4o",
            "tools": [{"type": "file_search"}]
        }))
        .unwrap();

        assert!(matches!(agent.tools[0], ToolDefinition::Unknown));
    }

    #[test]
    fn deletion_status_parses() {
        let status: DeletionStatus = serde_json::from_value(json!({
            "id": "asst_abc123",
            "object": "assistant.deleted",
            "deleted": true
        }))
        .unwrap();

        assert_eq!(status.id, "asst_abc123");
        assert!(status.deleted);
    }
}
