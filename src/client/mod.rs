//! HTTP client for the agents service.
//!
//! Thin typed wrapper over the REST surface: agents, threads, messages,
//! files, and streamed runs (see [`runs`]). Every request carries the
//! project bearer token and an `api-version` query parameter.

mod runs;

use std::sync::OnceLock;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::json;
use tracing::debug;

use crate::config::IngotConfig;
use crate::error::{status_to_error, Result};
use crate::types::{
    Agent, AgentThread, CreateAgentRequest, DeletionStatus, FileList, MessageRole, ThreadMessage,
};

static SHARED_CLIENT: OnceLock<reqwest::Client> = OnceLock::new();

/// Get (or create) the shared reqwest client.
fn shared_client() -> &'static reqwest::Client {
    SHARED_CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .pool_max_idle_per_host(10)
            .build()
            .expect("Failed to build HTTP client")
    })
}

/// Build default headers for a Bearer-token API.
fn bearer_headers(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Ok(val) = HeaderValue::from_str(&format!("Bearer {token}")) {
        headers.insert(AUTHORIZATION, val);
    }
    headers
}

/// Client bound to one project endpoint.
#[derive(Debug, Clone)]
pub struct AgentsClient {
    endpoint: String,
    token: String,
    api_version: String,
}

impl AgentsClient {
    /// Create with explicit endpoint, token, and API version.
    /// `endpoint`: e.g., "https://myresource.services.ai.azure.com/api/projects/my-project"
    pub fn new(
        endpoint: impl Into<String>,
        token: impl Into<String>,
        api_version: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            token: token.into(),
            api_version: api_version.into(),
        }
    }

    pub fn from_config(config: &IngotConfig) -> Self {
        Self::new(
            &config.project_endpoint,
            &config.access_token,
            &config.api_version,
        )
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!(
            "{}/{}?api-version={}",
            self.endpoint,
            path.trim_start_matches('/'),
            self.api_version
        )
    }

    pub(crate) async fn check(&self, resp: reqwest::Response) -> Result<reqwest::Response> {
        let status = resp.status().as_u16();
        if !(200..300).contains(&status) {
            let body_text = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body_text));
        }
        Ok(resp)
    }

    pub(crate) fn headers(&self) -> HeaderMap {
        bearer_headers(&self.token)
    }

    /// Create an agent.
    pub async fn create_agent(&self, request: &CreateAgentRequest) -> Result<Agent> {
        debug!(model = request.model.as_str(), "create_agent");

        let resp = shared_client()
            .post(self.url("assistants"))
            .headers(self.headers())
            .json(request)
            .send()
            .await?;

        Ok(self.check(resp).await?.json().await?)
    }

    /// Delete an agent.
    pub async fn delete_agent(&self, agent_id: &str) -> Result<DeletionStatus> {
        debug!(agent = agent_id, "delete_agent");

        let resp = shared_client()
            .delete(self.url(&format!("assistants/{agent_id}")))
            .headers(self.headers())
            .send()
            .await?;

        Ok(self.check(resp).await?.json().await?)
    }

    /// Create an empty conversation thread.
    pub async fn create_thread(&self) -> Result<AgentThread> {
        debug!("create_thread");

        let resp = shared_client()
            .post(self.url("threads"))
            .headers(self.headers())
            .json(&json!({}))
            .send()
            .await?;

        Ok(self.check(resp).await?.json().await?)
    }

    /// Delete a thread and its messages.
    pub async fn delete_thread(&self, thread_id: &str) -> Result<DeletionStatus> {
        debug!(thread = thread_id, "delete_thread");

        let resp = shared_client()
            .delete(self.url(&format!("threads/{thread_id}")))
            .headers(self.headers())
            .send()
            .await?;

        Ok(self.check(resp).await?.json().await?)
    }

    /// Append a message to a thread.
    pub async fn create_message(
        &self,
        thread_id: &str,
        role: MessageRole,
        content: &str,
    ) -> Result<ThreadMessage> {
        debug!(thread = thread_id, "create_message");

        let resp = shared_client()
            .post(self.url(&format!("threads/{thread_id}/messages")))
            .headers(self.headers())
            .json(&json!({"role": role, "content": content}))
            .send()
            .await?;

        Ok(self.check(resp).await?.json().await?)
    }

    /// List files stored in the project.
    pub async fn list_files(&self) -> Result<FileList> {
        debug!("list_files");

        let resp = shared_client()
            .get(self.url("files"))
            .headers(self.headers())
            .send()
            .await?;

        Ok(self.check(resp).await?.json().await?)
    }

    /// Delete a stored file.
    pub async fn delete_file(&self, file_id: &str) -> Result<DeletionStatus> {
        debug!(file = file_id, "delete_file");

        let resp = shared_client()
            .delete(self.url(&format!("files/{file_id}")))
            .headers(self.headers())
            .send()
            .await?;

        Ok(self.check(resp).await?.json().await?)
    }
}
