//! Console rendering of run events.

use std::io;

use async_trait::async_trait;

use crate::error::Result;
use crate::tools::McpTool;
use crate::types::{MessageDeltaEvent, RunStep, StepDetails, ThreadMessage, ThreadRun};

use super::{AgentEventHandler, RunAction};

/// Renders run events to a writer and auto-approves MCP tool calls with the
/// configured server's headers.
pub struct ConsoleHandler<W> {
    out: W,
    mcp: McpTool,
}

impl ConsoleHandler<io::Stdout> {
    pub fn stdout(mcp: McpTool) -> Self {
        Self::new(io::stdout(), mcp)
    }
}

impl<W: io::Write + Send> ConsoleHandler<W> {
    pub fn new(out: W, mcp: McpTool) -> Self {
        Self { out, mcp }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[async_trait]
impl<W: io::Write + Send> AgentEventHandler for ConsoleHandler<W> {
    async fn on_message_delta(&mut self, delta: &MessageDeltaEvent) -> Result<()> {
        write!(self.out, "{}", delta.text())?;
        self.out.flush()?;
        Ok(())
    }

    async fn on_thread_message(&mut self, message: &ThreadMessage) -> Result<()> {
        if message.is_completed_assistant_message() {
            writeln!(self.out)?;
        }
        Ok(())
    }

    async fn on_thread_run(&mut self, run: &ThreadRun) -> Result<Option<RunAction>> {
        let Some(action) = run.required_action.as_ref() else {
            return Ok(None);
        };
        if !action.is_submit_tool_approval() {
            return Ok(None);
        }

        let tool_calls = action.tool_calls();
        if tool_calls.is_empty() {
            writeln!(self.out, "No tool calls provided - cancelling run")?;
            return Ok(Some(RunAction::Cancel));
        }

        let mut approvals = Vec::new();
        for call in tool_calls {
            if !call.is_mcp() {
                continue;
            }
            let name = call.name.as_deref().unwrap_or(&call.kind);
            writeln!(self.out, "Approving tool call: {} ({name})", call.id)?;
            approvals.push(self.mcp.approve(&call.id));
        }

        if approvals.is_empty() {
            return Ok(None);
        }
        Ok(Some(RunAction::SubmitApprovals(approvals)))
    }

    async fn on_run_step(&mut self, step: &RunStep) -> Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Step {} status: {}", step.id, step.status)?;

        match &step.step_details {
            Some(StepDetails::ToolCalls { tool_calls }) if !tool_calls.is_empty() => {
                writeln!(self.out, "  MCP Tool calls:")?;
                for call in tool_calls {
                    writeln!(
                        self.out,
                        "    Tool Call ID: {}",
                        call.id.as_deref().unwrap_or("unknown")
                    )?;
                    writeln!(
                        self.out,
                        "    Type: {}",
                        call.kind.as_deref().unwrap_or("unknown")
                    )?;
                }
            }
            Some(StepDetails::Activity { activities }) => {
                for activity in activities {
                    for (name, function) in &activity.tools {
                        writeln!(
                            self.out,
                            "  The function {name} with description \"{}\" will be called.",
                            function.description
                        )?;
                        if function.parameters.is_empty() {
                            writeln!(self.out, "This function has no parameters")?;
                            continue;
                        }
                        writeln!(self.out, "  Function parameters:")?;
                        for (argument, schema) in &function.parameters.properties {
                            writeln!(self.out, "      {argument}")?;
                            writeln!(
                                self.out,
                                "      Type: {}",
                                schema.kind.as_deref().unwrap_or("unknown")
                            )?;
                            writeln!(self.out, "      Description: {}", schema.description)?;
                        }
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    async fn on_done(&mut self) -> Result<()> {
        writeln!(self.out)?;
        Ok(())
    }
}
