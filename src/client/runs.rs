//! Run operations: streamed creation, approval submission, cancellation.

use futures::stream::BoxStream;
use reqwest::header::ACCEPT;
use serde_json::json;
use tracing::debug;

use crate::error::{IngotError, Result};
use crate::stream::{run_event_stream, StreamEvent};
use crate::types::{CreateRunRequest, ThreadRun, ToolApproval};

use super::{shared_client, AgentsClient};

impl AgentsClient {
    /// Start a run and stream its events. `stream` is forced on; the
    /// non-streaming form of this endpoint is not used here.
    pub async fn create_run_stream(
        &self,
        thread_id: &str,
        request: &CreateRunRequest,
    ) -> Result<BoxStream<'static, Result<StreamEvent>>> {
        let mut body = serde_json::to_value(request)?;
        if let Some(obj) = body.as_object_mut() {
            obj.insert("stream".into(), json!(true));
        }

        debug!(thread = thread_id, "create_run stream");

        let resp = shared_client()
            .post(self.url(&format!("threads/{thread_id}/runs")))
            .headers(self.headers())
            .header(ACCEPT, "text/event-stream")
            .json(&body)
            .send()
            .await?;

        let resp = self.check(resp).await?;
        Ok(run_event_stream(resp))
    }

    /// Submit tool approvals for a paused run and resume streaming it.
    pub async fn submit_tool_approvals_stream(
        &self,
        thread_id: &str,
        run_id: &str,
        approvals: &[ToolApproval],
    ) -> Result<BoxStream<'static, Result<StreamEvent>>> {
        if approvals.is_empty() {
            return Err(IngotError::Stream(
                "no approvals to submit".to_string(),
            ));
        }

        debug!(thread = thread_id, run = run_id, "submit_tool_approvals stream");

        let resp = shared_client()
            .post(self.url(&format!(
                "threads/{thread_id}/runs/{run_id}/submit_tool_outputs"
            )))
            .headers(self.headers())
            .header(ACCEPT, "text/event-stream")
            .json(&json!({"tool_approvals": approvals, "stream": true}))
            .send()
            .await?;

        let resp = self.check(resp).await?;
        Ok(run_event_stream(resp))
    }

    /// Cancel an in-flight run.
    pub async fn cancel_run(&self, thread_id: &str, run_id: &str) -> Result<ThreadRun> {
        debug!(thread = thread_id, run = run_id, "cancel_run");

        let resp = shared_client()
            .post(self.url(&format!("threads/{thread_id}/runs/{run_id}/cancel")))
            .headers(self.headers())
            .json(&json!({}))
            .send()
            .await?;

        Ok(self.check(resp).await?.json().await?)
    }
}
