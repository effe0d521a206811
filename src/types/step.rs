//! Run steps and their detail payloads.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use strum::Display;

/// One unit of work inside a run (message creation, tool calls, activity).
#[derive(Debug, Clone, Deserialize)]
pub struct RunStep {
    pub id: String,
    pub run_id: String,
    pub thread_id: String,
    pub status: StepStatus,
    #[serde(default)]
    pub step_details: Option<StepDetails>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created_at: DateTime<Utc>,
}

/// Lifecycle status of a run step.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StepStatus {
    InProgress,
    Cancelled,
    Failed,
    Completed,
    Expired,
}

/// Detail payload attached to a step.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepDetails {
    MessageCreation {
        message_creation: MessageCreationRef,
    },
    ToolCalls {
        #[serde(default)]
        tool_calls: Vec<StepToolCall>,
    },
    /// Server-side activity, e.g. an MCP server enumerating its tools.
    Activity {
        #[serde(default)]
        activities: Vec<RunStepActivity>,
    },
    #[serde(other)]
    Unknown,
}

/// Reference to the message a step produced.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageCreationRef {
    pub message_id: String,
}

/// A tool call recorded in step details. Only identity is surfaced; the
/// per-kind payloads stay on the service.
#[derive(Debug, Clone, Deserialize)]
pub struct StepToolCall {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// One activity entry: the functions a remote server exposed.
///
/// BTreeMap keeps the rendering order stable.
#[derive(Debug, Clone, Deserialize)]
pub struct RunStepActivity {
    #[serde(default)]
    pub tools: BTreeMap<String, ActivityFunction>,
}

/// A function surfaced by an activity, with its parameter schema.
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityFunction {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parameters: ActivityParameters,
}

/// JSON-schema-shaped parameter listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivityParameters {
    #[serde(default)]
    pub properties: BTreeMap<String, ActivityArgument>,
    #[serde(default)]
    pub required: Vec<String>,
}

impl ActivityParameters {
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// One declared argument of an activity function.
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityArgument {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub description: String,
}
