//! Event handling for streamed runs.
//!
//! A [`AgentEventHandler`] receives typed stream events and may answer a run
//! pause with a [`RunAction`]. The [`RunDriver`] owns the consume loop:
//! submitting approvals swaps to the resumed stream, cancellation keeps
//! draining the current one until the service closes it.

mod console;

pub use console::ConsoleHandler;

use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::StreamExt;
use tracing::debug;

use crate::client::AgentsClient;
use crate::error::Result;
use crate::stream::StreamEvent;
use crate::types::{MessageDeltaEvent, RunStep, ThreadMessage, ThreadRun, ToolApproval};

/// Handler reaction to a paused run.
#[derive(Debug)]
pub enum RunAction {
    /// Approve (or decline) the requested tool calls and resume the run.
    SubmitApprovals(Vec<ToolApproval>),
    /// Cancel the run.
    Cancel,
}

/// Callbacks for events of one streamed run.
///
/// All methods default to no-ops so implementations only write the ones
/// they care about.
#[async_trait]
pub trait AgentEventHandler: Send {
    /// A fragment of assistant text arrived.
    async fn on_message_delta(&mut self, _delta: &MessageDeltaEvent) -> Result<()> {
        Ok(())
    }

    /// A message snapshot arrived (created, in progress, or completed).
    async fn on_thread_message(&mut self, _message: &ThreadMessage) -> Result<()> {
        Ok(())
    }

    /// A run snapshot arrived. Return an action to resolve a
    /// `requires_action` pause; `None` leaves the run alone.
    async fn on_thread_run(&mut self, _run: &ThreadRun) -> Result<Option<RunAction>> {
        Ok(None)
    }

    /// A run step changed state.
    async fn on_run_step(&mut self, _step: &RunStep) -> Result<()> {
        Ok(())
    }

    /// The stream reached its terminal marker.
    async fn on_done(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Drives a run's event stream through a handler until it finishes.
pub struct RunDriver<'a, H> {
    client: &'a AgentsClient,
    handler: &'a mut H,
}

impl<'a, H: AgentEventHandler> RunDriver<'a, H> {
    pub fn new(client: &'a AgentsClient, handler: &'a mut H) -> Self {
        Self { client, handler }
    }

    /// Consume stream events until the terminal marker or the body closes.
    ///
    /// Approval submission abandons the paused stream and continues on the
    /// resumed one the service returns.
    pub async fn run_until_done(
        mut self,
        thread_id: &str,
        stream: BoxStream<'static, Result<StreamEvent>>,
    ) -> Result<()> {
        let mut stream = stream;
        loop {
            let mut resumed = None;

            while let Some(event) = stream.next().await {
                match event? {
                    StreamEvent::MessageDelta(delta) => {
                        self.handler.on_message_delta(&delta).await?;
                    }
                    StreamEvent::ThreadMessage(message) => {
                        self.handler.on_thread_message(&message).await?;
                    }
                    StreamEvent::ThreadRun(run) => {
                        match self.handler.on_thread_run(&run).await? {
                            Some(RunAction::SubmitApprovals(approvals)) => {
                                resumed = Some(
                                    self.client
                                        .submit_tool_approvals_stream(
                                            thread_id, &run.id, &approvals,
                                        )
                                        .await?,
                                );
                                break;
                            }
                            Some(RunAction::Cancel) => {
                                self.client.cancel_run(thread_id, &run.id).await?;
                            }
                            None => {}
                        }
                    }
                    StreamEvent::RunStep(step) => {
                        self.handler.on_run_step(&step).await?;
                    }
                    StreamEvent::Done => {
                        self.handler.on_done().await?;
                        return Ok(());
                    }
                    StreamEvent::Unknown { event } => {
                        debug!(event = %event, "ignoring event");
                    }
                }
            }

            match resumed {
                Some(next) => stream = next,
                // Body closed without a done marker.
                None => return Ok(()),
            }
        }
    }
}
