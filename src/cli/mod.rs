//! CLI entry point for Ingot.

use clap::Parser;

/// Ingot agent shell
#[derive(Parser, Debug)]
#[command(name = "ingot", version, about = "Ingot — streamed agent runs with MCP tools")]
pub struct Cli {
    /// Path to the agent instructions file
    #[arg(short, long, default_value = "instructions.txt")]
    pub instructions: String,

    /// Agent name shown in the hosted UI
    #[arg(long, default_value = "Ingot MCP Agent")]
    pub agent_name: String,

    /// Project endpoint (overrides FOUNDRY_PROJECT_ENDPOINT)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Model deployment (overrides MODEL_DEPLOYMENT_NAME)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Service API version (overrides FOUNDRY_API_VERSION)
    #[arg(long)]
    pub api_version: Option<String>,
}

impl Cli {
    /// Parse CLI arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
