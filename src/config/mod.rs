//! Environment-sourced configuration.

use std::path::Path;

use crate::error::{IngotError, Result};

/// Default service API version sent as the `api-version` query parameter.
pub const DEFAULT_API_VERSION: &str = "2025-05-01";

/// Connection settings for the agent service and the MCP gateway.
///
/// All values come from the environment (a `.env` file is honored when
/// present). The access token is the bearer credential for the agents API;
/// `az account get-access-token --resource 'https://ai.azure.com'` yields one.
#[derive(Debug, Clone)]
pub struct IngotConfig {
    /// Project endpoint, e.g. `https://myresource.services.ai.azure.com/api/projects/myproject`.
    pub project_endpoint: String,
    /// Model deployment the agent is bound to, e.g. `gpt-4o`.
    pub model_deployment: String,
    /// Bearer token for the agents API.
    pub access_token: String,
    /// Gateway base URL hosting the MCP server.
    pub gateway_url: String,
    /// Subscription key used as the remote tool's bearer credential.
    pub subscription_key: String,
    /// Service API version.
    pub api_version: String,
}

impl IngotConfig {
    /// Load from environment variables (FOUNDRY_PROJECT_ENDPOINT, etc.).
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable lookup. Seam for tests.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let require = |var: &str| {
            lookup(var)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| {
                    IngotError::Configuration(format!("missing environment variable {var}"))
                })
        };

        Ok(Self {
            project_endpoint: trim_url(&require("FOUNDRY_PROJECT_ENDPOINT")?),
            model_deployment: require("MODEL_DEPLOYMENT_NAME")?,
            access_token: require("FOUNDRY_ACCESS_TOKEN")?,
            gateway_url: trim_url(&require("APIM_RESOURCE_GATEWAY_URL")?),
            subscription_key: require("APIM_SUBSCRIPTIONS_KEY")?,
            api_version: lookup("FOUNDRY_API_VERSION")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
        })
    }
}

fn trim_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// Read the agent instruction file, trimmed of surrounding whitespace.
pub fn load_instructions(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| {
        IngotError::Configuration(format!(
            "cannot read instructions file {}: {e}",
            path.display()
        ))
    })?;
    let text = text.trim();
    if text.is_empty() {
        return Err(IngotError::Configuration(format!(
            "instructions file {} is empty",
            path.display()
        )));
    }
    Ok(text.to_string())
}
