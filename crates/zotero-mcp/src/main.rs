//! Zotero MCP Server - Entry Point
//!
//! Serves a Zotero library's tools over stdio.

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use zotero_mcp::config::{Config, LibraryType};
use zotero_mcp::server::McpServer;

#[derive(Parser, Debug)]
#[command(name = "zotero-mcp")]
#[command(about = "MCP server for a Zotero library")]
#[command(version)]
struct Cli {
    /// Zotero library id (user or group id)
    #[arg(long, env = "LIBRARY_ID", default_value = "")]
    library_id: String,

    /// Library type: `group` for a group library, anything else for a user library
    #[arg(long, env = "LIBRARY_TYPE", default_value = "user")]
    library_type: String,

    /// Zotero API key
    #[arg(long, env = "ZOTERO_API_KEY", default_value = "", hide_env_values = true)]
    api_key: String,

    /// Override the Zotero Web API base URL
    #[arg(long, env = "ZOTERO_API_URL")]
    api_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

impl Cli {
    fn config(&self) -> Config {
        let config = Config::new(
            self.library_id.clone(),
            LibraryType::from_str_loose(&self.library_type),
            self.api_key.clone(),
        );

        match self.api_url.as_deref() {
            Some(url) if !url.is_empty() => config.with_api_url(url),
            _ => config,
        }
    }
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    // stdout carries the protocol
    if json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Values already in the environment win over the .env file.
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    let config = cli.config();
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        library = %config.library_prefix(),
        has_api_key = config.has_api_key(),
        "Starting Zotero MCP server"
    );

    McpServer::new(config).run_stdio().await?;

    Ok(())
}
