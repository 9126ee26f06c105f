mod config;
mod prompts;
mod render;
mod server;

use std::sync::Arc;

use rmcp::{ServiceExt, transport::stdio};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tips_core::store::TipStore;

use config::Config;
use server::CopilotTipsServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting copilot-tips MCP server");

    let config = Config::from_env();
    info!(data_path = %config.data_path.display(), "configuration loaded");

    // The catalog loads lazily on the first operation; an absent document
    // just means an empty catalog
    let store = Arc::new(TipStore::from_file(config.data_path));

    let server = CopilotTipsServer::new(store);

    info!("MCP server ready, serving on stdio");
    let service = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!(error = %e, "MCP server error");
    })?;

    service.waiting().await?;
    info!("MCP server shut down");
    Ok(())
}
