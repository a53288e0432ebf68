//! # OLP Chat — Maryland OLP AI Chat service
//!
//! Usage:
//!   olpchat serve                          # HTTP API on 0.0.0.0:5000
//!   olpchat serve --port 8080              # Custom port
//!   olpchat ask what is a MWEE             # One query, JSON envelope on stdout
//!   olpchat topics                         # List FAQ topics
//!   olpchat --config ./olpchat.toml serve  # Explicit config file

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use olpchat_agent::ChatAgent;
use olpchat_core::config::OlpChatConfig;
use olpchat_knowledge::KnowledgeBase;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "olpchat",
    version,
    about = "🌳 Maryland OLP AI Chat — environmental literacy FAQ service"
)]
struct Cli {
    /// Config file (default: $OLPCHAT_CONFIG or ~/.olpchat/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API
    Serve {
        /// Bind address (overrides config and HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port (overrides config and PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Answer one question and print the response envelope
    Ask {
        /// The question
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// List FAQ topics with their categories
    Topics,
}

fn load_config(path: Option<&Path>) -> Result<OlpChatConfig> {
    match path {
        Some(path) => {
            let mut config = OlpChatConfig::load_from(path)?;
            config.apply_env();
            Ok(config)
        }
        None => Ok(OlpChatConfig::load()?),
    }
}

/// Expand `~` in a configured path.
fn expand_path(p: &str) -> String {
    shellexpand::tilde(p).to_string()
}

fn load_knowledge(config: &OlpChatConfig) -> Result<KnowledgeBase> {
    match &config.knowledge.path {
        Some(path) => {
            let path = expand_path(path);
            KnowledgeBase::from_path(Path::new(&path))
                .with_context(|| format!("failed to load knowledge base from {path}"))
        }
        None => KnowledgeBase::builtin().context("built-in knowledge base is invalid"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "olpchat=debug,olpchat_gateway=debug,olpchat_agent=debug,olpchat_providers=debug,olpchat_knowledge=debug,tower_http=debug"
    } else {
        "olpchat=info,olpchat_gateway=info,olpchat_agent=info,olpchat_providers=info,olpchat_knowledge=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_target(false)
        .init();

    let mut config = load_config(cli.config.as_deref())?;
    let knowledge = Arc::new(load_knowledge(&config)?);

    match cli.command {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.gateway.host = host;
            }
            if let Some(port) = port {
                config.gateway.port = port;
            }
            tracing::info!(
                "🌳 {} v{} — {} topics, mode '{}'",
                config.identity.name,
                env!("CARGO_PKG_VERSION"),
                knowledge.len(),
                config.llm.mode
            );
            olpchat_gateway::start(config, knowledge).await?;
        }
        Command::Ask { query } => {
            let agent = ChatAgent::from_config(&config, knowledge)?;
            let response = agent.respond(&query.join(" ")).await;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Command::Topics => {
            for (topic, category) in knowledge.topics() {
                println!("{topic:<40} {category}");
            }
        }
    }

    Ok(())
}
