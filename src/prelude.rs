//! Convenience re-exports for common use.

pub use crate::client::AgentsClient;
pub use crate::config::IngotConfig;
pub use crate::error::{IngotError, Result};
pub use crate::handler::{AgentEventHandler, ConsoleHandler, RunAction, RunDriver};
pub use crate::stream::StreamEvent;
pub use crate::tools::{ApprovalMode, McpTool, ToolDefinition, ToolResources};
pub use crate::types::{
    Agent, AgentThread, CreateAgentRequest, CreateRunRequest, MessageRole, RunStatus, ThreadRun,
    ToolApproval,
};
