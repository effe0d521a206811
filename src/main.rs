//! Ingot binary entry point: initialize the agent, then run the REPL.

use std::io::{BufRead, Write};

use tracing::error;
use tracing_subscriber::EnvFilter;

use ingot::cli::Cli;
use ingot::client::AgentsClient;
use ingot::config::{load_instructions, IngotConfig};
use ingot::error::Result;
use ingot::handler::{ConsoleHandler, RunDriver};
use ingot::tools::{ApprovalMode, McpTool, ToolDefinition};
use ingot::types::{Agent, AgentThread, CreateAgentRequest, CreateRunRequest, MessageRole};

const MAX_COMPLETION_TOKENS: u32 = 10_240;
const MAX_PROMPT_TOKENS: u32 = 20_480;
const TEMPERATURE: f64 = 0.1;
const TOP_P: f64 = 0.1;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")),
        )
        .init();

    let cli = Cli::parse_args();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = IngotConfig::from_env()?;
    if let Some(endpoint) = cli.endpoint {
        config.project_endpoint = endpoint.trim_end_matches('/').to_string();
    }
    if let Some(model) = cli.model {
        config.model_deployment = model;
    }
    if let Some(api_version) = cli.api_version {
        config.api_version = api_version;
    }

    let instructions = load_instructions(&cli.instructions)?;
    let client = AgentsClient::from_config(&config);
    let mcp = weather_tool(&config);

    let (agent, thread) =
        initialize(&client, &config, &cli.agent_name, &instructions, &mcp).await?;
    println!("Initialization complete.");

    let save = repl(&client, &agent, &thread, &mcp).await;

    if save {
        println!("The agent has not been deleted, so you can continue experimenting with it in the hosted UI.");
        println!(
            "Navigate to https://ai.azure.com, select your project, then the agents playground, then select agent id: {}",
            agent.id
        );
    } else {
        cleanup(&client, &agent, &thread).await?;
        println!("The agent resources have been cleaned up.");
    }

    Ok(())
}

/// The demo's MCP server: the gateway's weather endpoint, authenticated with
/// the subscription key. Approval mode `never`; the service may still raise
/// approval actions, which the console handler resolves.
fn weather_tool(config: &IngotConfig) -> McpTool {
    let mut mcp = McpTool::new(
        "weather",
        format!("{}/weather-mcp/sse", config.gateway_url),
    );
    mcp.update_headers(
        "Authorization",
        format!("Bearer {}", config.subscription_key),
    );
    mcp.set_approval_mode(ApprovalMode::Never);
    mcp
}

/// Create the agent (code interpreter + MCP tool) and an empty thread.
async fn initialize(
    client: &AgentsClient,
    config: &IngotConfig,
    agent_name: &str,
    instructions: &str,
    mcp: &McpTool,
) -> Result<(Agent, AgentThread)> {
    let request = CreateAgentRequest::builder()
        .model(config.model_deployment.clone())
        .name(agent_name)
        .instructions(instructions)
        .tools(vec![ToolDefinition::CodeInterpreter, mcp.definition()])
        .tool_resources(mcp.resources())
        .temperature(TEMPERATURE)
        .build();

    println!("Creating agent...");
    let agent = client.create_agent(&request).await.map_err(|e| {
        error!("An error occurred initializing the agent: {e}");
        e
    })?;
    println!("Created agent, ID: {}", agent.id);

    println!("Creating thread...");
    let thread = client.create_thread().await.map_err(|e| {
        error!("An error occurred creating the thread: {e}");
        e
    })?;
    println!("Created thread, ID: {}", thread.id);

    Ok((agent, thread))
}

/// Read queries from stdin until `exit` or `save`. Returns true for `save`.
/// EOF behaves like `exit` so resources still get cleaned up.
async fn repl(client: &AgentsClient, agent: &Agent, thread: &AgentThread, mcp: &McpTool) -> bool {
    let stdin = std::io::stdin();
    loop {
        print!("\n\nEnter your query (type exit or save to finish): ");
        let _ = std::io::stdout().flush();

        let Some(prompt) = read_query(&mut stdin.lock()) else {
            return false;
        };
        if prompt.is_empty() {
            continue;
        }
        match prompt.to_lowercase().as_str() {
            "exit" => return false,
            "save" => return true,
            _ => {}
        }

        if let Err(e) = post_message(client, agent, thread, mcp, &prompt).await {
            println!("An error occurred posting the message: {e}");
        }
    }
}

/// Read one query line, trimmed. `None` on EOF; a read error is printed
/// first so a broken terminal is distinguishable from Ctrl+D. Both take the
/// exit path, which still cleans up the remote resources.
fn read_query(input: &mut impl BufRead) -> Option<String> {
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim().to_string()),
        Err(e) => {
            eprintln!("Error reading input: {e}");
            None
        }
    }
}

/// Post one user message and drive the resulting streamed run to completion.
async fn post_message(
    client: &AgentsClient,
    agent: &Agent,
    thread: &AgentThread,
    mcp: &McpTool,
    content: &str,
) -> Result<()> {
    client
        .create_message(&thread.id, MessageRole::User, content)
        .await?;

    let request = CreateRunRequest::builder()
        .assistant_id(agent.id.clone())
        .maybe_instructions(agent.instructions.clone())
        .max_completion_tokens(MAX_COMPLETION_TOKENS)
        .max_prompt_tokens(MAX_PROMPT_TOKENS)
        .temperature(TEMPERATURE)
        .top_p(TOP_P)
        .build();

    let stream = client.create_run_stream(&thread.id, &request).await?;

    let mut handler = ConsoleHandler::stdout(mcp.clone());
    RunDriver::new(client, &mut handler)
        .run_until_done(&thread.id, stream)
        .await
}

/// Delete uploaded files, then the thread, then the agent.
async fn cleanup(client: &AgentsClient, agent: &Agent, thread: &AgentThread) -> Result<()> {
    let files = client.list_files().await?;
    for file in &files.data {
        client.delete_file(&file.id).await?;
    }
    client.delete_thread(&thread.id).await?;
    client.delete_agent(&agent.id).await?;
    Ok(())
}
