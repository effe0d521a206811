//! Ingot — terminal client for the Azure AI Foundry Agent Service.
//!
//! Creates an agent wired with a code interpreter and an MCP server, opens a
//! conversation thread, and drives streamed runs: message deltas render
//! token-by-token, and MCP tool calls that pause a run are approved with the
//! server's configured headers and resubmitted.
//!
//! # Quick start
//!
//! ```no_run
//! use ingot::client::AgentsClient;
//! use ingot::config::IngotConfig;
//! use ingot::handler::{ConsoleHandler, RunDriver};
//! use ingot::tools::McpTool;
//! use ingot::types::{CreateRunRequest, MessageRole};
//!
//! # async fn example() -> ingot::error::Result<()> {
//! let config = IngotConfig::from_env()?;
//! let client = AgentsClient::from_config(&config);
//!
//! let thread = client.create_thread().await?;
//! client
//!     .create_message(&thread.id, MessageRole::User, "What's the weather in Lisbon?")
//!     .await?;
//!
//! let mut mcp = McpTool::new("weather", format!("{}/weather-mcp/sse", config.gateway_url));
//! mcp.update_headers("Authorization", format!("Bearer {}", config.subscription_key));
//!
//! let request = CreateRunRequest::builder().assistant_id("asst_123").build();
//! let stream = client.create_run_stream(&thread.id, &request).await?;
//!
//! let mut handler = ConsoleHandler::stdout(mcp);
//! RunDriver::new(&client, &mut handler)
//!     .run_until_done(&thread.id, stream)
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod handler;
pub mod prelude;
pub mod stream;
pub mod tools;
pub mod types;
