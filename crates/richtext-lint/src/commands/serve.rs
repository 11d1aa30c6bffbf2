//! Serve command: run the MCP server on stdio.

use anyhow::Context;
use clap::Args;
use richtext_lint_core::config::Config;
use rmcp::ServiceExt;
use tracing::{info, instrument};

use crate::server::ProjectServer;

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {}

/// Serve MCP requests on stdin/stdout until the client disconnects.
///
/// Logs go to stderr and the log file; stdout belongs to the protocol.
#[instrument(name = "cmd_serve", skip_all)]
pub async fn cmd_serve(
    _args: ServeArgs,
    max_input: Option<usize>,
    config: Config,
) -> anyhow::Result<()> {
    let server = ProjectServer::from_config(&config, max_input)
        .context("failed to prepare MCP server")?;
    info!(
        entities = ?config.entities,
        "starting MCP server on stdio"
    );

    let service = server
        .serve(rmcp::transport::stdio())
        .await
        .context("failed to start MCP server")?;
    let reason = service
        .waiting()
        .await
        .context("MCP server terminated unexpectedly")?;
    info!(?reason, "MCP server stopped");
    Ok(())
}
