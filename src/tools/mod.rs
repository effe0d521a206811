//! Tool configuration attached to agents.
//!
//! Two tool kinds matter here: the hosted code interpreter, which needs no
//! configuration beyond its presence, and MCP servers, which carry a label,
//! an endpoint URL, request headers, and an approval policy. Headers and the
//! approval policy travel in `tool_resources`, separate from the tool
//! definition itself, and approvals echo the headers back per call.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::ToolApproval;

/// A tool definition as it appears in agent create requests and responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolDefinition {
    /// Hosted sandbox for running model-written code.
    CodeInterpreter,
    /// Remote MCP server reachable over SSE.
    Mcp {
        server_label: String,
        server_url: String,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        allowed_tools: Option<Vec<String>>,
    },
    #[serde(other)]
    Unknown,
}

/// When the service should pause a run to ask for tool-call approval.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalMode {
    /// Every call requires an explicit approval round-trip.
    Always,
    /// Calls run without pausing. Approvals may still be requested when the
    /// service decides a call needs one.
    Never,
}

/// Client-side handle for one MCP server: definition, headers, approval mode.
#[derive(Debug, Clone)]
pub struct McpTool {
    server_label: String,
    server_url: String,
    headers: HashMap<String, String>,
    require_approval: ApprovalMode,
}

impl McpTool {
    /// New MCP tool with no headers and approval required on every call.
    pub fn new(server_label: impl Into<String>, server_url: impl Into<String>) -> Self {
        Self {
            server_label: server_label.into(),
            server_url: server_url.into(),
            headers: HashMap::new(),
            require_approval: ApprovalMode::Always,
        }
    }

    pub fn server_label(&self) -> &str {
        &self.server_label
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Set a header forwarded to the server on every call. Setting the same
    /// key again replaces the previous value.
    pub fn update_headers(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(key.into(), value.into());
    }

    pub fn set_approval_mode(&mut self, mode: ApprovalMode) {
        self.require_approval = mode;
    }

    /// The `tools` entry for this server.
    pub fn definition(&self) -> ToolDefinition {
        ToolDefinition::Mcp {
            server_label: self.server_label.clone(),
            server_url: self.server_url.clone(),
            allowed_tools: None,
        }
    }

    /// The `tool_resources` entry carrying headers and the approval policy.
    pub fn resources(&self) -> ToolResources {
        ToolResources {
            mcp: vec![McpToolResource {
                server_label: self.server_label.clone(),
                headers: self.headers.clone(),
                require_approval: self.require_approval,
            }],
        }
    }

    /// Approve one tool call, echoing this server's headers so the service
    /// forwards them with the approved call.
    pub fn approve(&self, tool_call_id: impl Into<String>) -> ToolApproval {
        ToolApproval {
            tool_call_id: tool_call_id.into(),
            approve: true,
            headers: self.headers.clone(),
        }
    }
}

/// Per-tool configuration blocks sent alongside tool definitions.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ToolResources {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mcp: Vec<McpToolResource>,
}

impl ToolResources {
    pub fn is_empty(&self) -> bool {
        self.mcp.is_empty()
    }
}

/// Resource block for one MCP server.
#[derive(Debug, Clone, Serialize)]
pub struct McpToolResource {
    pub server_label: String,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
    pub require_approval: ApprovalMode,
}
