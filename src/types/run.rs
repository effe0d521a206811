//! Runs, required actions, and tool approvals.

use std::collections::HashMap;

use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::tools::ToolResources;

/// Kind of required action that asks for tool approvals.
pub const SUBMIT_TOOL_APPROVAL_ACTION: &str = "submit_tool_approval";

/// One execution of an agent against a thread.
#[derive(Debug, Clone, Deserialize)]
pub struct ThreadRun {
    pub id: String,
    pub thread_id: String,
    pub assistant_id: String,
    pub status: RunStatus,
    #[serde(default)]
    pub required_action: Option<RequiredAction>,
    #[serde(default)]
    pub last_error: Option<RunError>,
    #[serde(default)]
    pub usage: Option<RunUsage>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created_at: DateTime<Utc>,
}

/// Lifecycle status of a run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RunStatus {
    Queued,
    InProgress,
    RequiresAction,
    Cancelling,
    Cancelled,
    Failed,
    Completed,
    Expired,
    Incomplete,
}

/// Action the service is waiting on before the run can continue.
///
/// Kept as a tolerant struct rather than a tagged enum: the service grows
/// new action kinds, and only tool approvals matter here.
#[derive(Debug, Clone, Deserialize)]
pub struct RequiredAction {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub submit_tool_approval: Option<SubmitToolApproval>,
}

impl RequiredAction {
    /// Whether this action asks for tool approvals.
    pub fn is_submit_tool_approval(&self) -> bool {
        self.kind == SUBMIT_TOOL_APPROVAL_ACTION
    }

    /// Pending tool calls, empty when the action carries none.
    pub fn tool_calls(&self) -> &[RequiredToolCall] {
        self.submit_tool_approval
            .as_ref()
            .map(|a| a.tool_calls.as_slice())
            .unwrap_or_default()
    }
}

/// Payload of a `submit_tool_approval` action.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitToolApproval {
    #[serde(default)]
    pub tool_calls: Vec<RequiredToolCall>,
}

/// A tool call awaiting an approval decision.
#[derive(Debug, Clone, Deserialize)]
pub struct RequiredToolCall {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub server_label: Option<String>,
    #[serde(default)]
    pub arguments: Option<String>,
}

impl RequiredToolCall {
    /// Whether this call targets a remote MCP server.
    pub fn is_mcp(&self) -> bool {
        self.kind == "mcp"
    }
}

/// An approval decision resubmitted to resume a run.
#[derive(Debug, Clone, Serialize)]
pub struct ToolApproval {
    pub tool_call_id: String,
    pub approve: bool,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
}

/// Terminal error reported on a failed run.
#[derive(Debug, Clone, Deserialize)]
pub struct RunError {
    pub code: String,
    pub message: String,
}

/// Token accounting reported when a run finishes.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct RunUsage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}

/// Request body for starting a run.
#[derive(Debug, Clone, Serialize, Builder)]
pub struct CreateRunRequest {
    #[builder(into)]
    pub assistant_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_completion_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_prompt_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_resources: Option<ToolResources>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn requires_action_run() -> ThreadRun {
        serde_json::from_value(json!({
            "id": "run_1",
            "thread_id": "thread_1",
            "assistant_id": "asst_1",
            "status": "requires_action",
            "created_at": 1_719_000_000,
            "required_action": {
                "type": "submit_tool_approval",
                "submit_tool_approval": {
                    "tool_calls": [
                        {
                            "id": "call_1",
                            "type": "mcp",
                            "name": "get_weather",
                            "server_label": "weather",
                            "arguments": "{\"city\": \"Lisbon\"}"
                        },
                        {"id": "call_2", "type": "function"}
                    ]
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn required_action_exposes_tool_calls() {
        let run = requires_action_run();
        let action = run.required_action.as_ref().unwrap();

        assert!(action.is_submit_tool_approval());
        let calls = action.tool_calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].is_mcp());
        assert_eq!(calls[0].name.as_deref(), Some("get_weather"));
        assert!(!calls[1].is_mcp());
    }

    #[test]
    fn unknown_action_kind_is_tolerated() {
        let run: ThreadRun = serde_json::from_value(json!({
            "id": "run_1",
            "thread_id": "thread_1",
            "assistant_id": "asst_1",
            "status": "requires_action",
            "created_at": 1_719_000_000,
            "required_action": {
                "type": "submit_tool_outputs",
                "submit_tool_outputs": {"tool_calls": []}
            }
        }))
        .unwrap();

        let action = run.required_action.unwrap();
        assert!(!action.is_submit_tool_approval());
        assert!(action.tool_calls().is_empty());
    }

    #[test]
    fn run_status_displays_in_wire_form() {
        assert_eq!(RunStatus::RequiresAction.to_string(), "requires_action");
        assert_eq!(RunStatus::InProgress.to_string(), "in_progress");
    }

    #[test]
    fn failed_run_carries_last_error() {
        let run: ThreadRun = serde_json::from_value(json!({
            "id": "run_1",
            "thread_id": "thread_1",
            "assistant_id": "asst_1",
            "status": "failed",
            "created_at": 1_719_000_000,
            "last_error": {"code": "server_error", "message": "upstream failed"}
        }))
        .unwrap();

        assert!(matches!(run.status, RunStatus::Failed));
        assert_eq!(run.last_error.unwrap().code, "server_error");
    }

    #[test]
    fn tool_approval_serializes_headers() {
        let approval = ToolApproval {
            tool_call_id: "call_1".into(),
            approve: true,
            headers: HashMap::from([("Authorization".to_string(), "Bearer k".to_string())]),
        };

        let body = serde_json::to_value(&approval).unwrap();
        assert_eq!(body["tool_call_id"], "call_1");
        assert_eq!(body["approve"], true);
        assert_eq!(body["headers"]["Authorization"], "Bearer k");
    }

    #[test]
    fn tool_approval_without_headers_omits_field() {
        let approval = ToolApproval {
            tool_call_id: "call_1".into(),
            approve: true,
            headers: HashMap::new(),
        };

        let body = serde_json::to_value(&approval).unwrap();
        assert!(body.get("headers").is_none());
    }

    #[test]
    fn create_run_request_keeps_sampling_settings() {
        let request = CreateRunRequest::builder()
            .assistant_id("asst_1")
            .instructions("Answer briefly.")
            .max_completion_tokens(10_240)
            .max_prompt_tokens(20_480)
            .temperature(0.1)
            .top_p(0.1)
            .build();

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["assistant_id"], "asst_1");
        assert_eq!(body["max_completion_tokens"], 10_240);
        assert_eq!(body["max_prompt_tokens"], 20_480);
        assert_eq!(body["temperature"], 0.1);
        assert_eq!(body["top_p"], 0.1);
        assert!(body.get("tool_resources").is_none());
    }
}
