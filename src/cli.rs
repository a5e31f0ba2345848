//! CLI for the admin gateway
//!
//! Commands:
//! - nimbusdb start: boot the gateway and enter the serving loop
//!
//! The gateway holds no durable state of its own; the standalone binary wires
//! the in-memory reference store behind the HTTP surface.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::gateway::{AdminServer, GatewayConfig};
use crate::query::{BasicQueryParser, NullSeriesWriter};
use crate::store::MemoryStore;

/// NimbusDB - administrative gateway for the cluster control plane
#[derive(Parser, Debug)]
#[command(name = "nimbusdb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the admin gateway
    Start {
        /// Host to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Port to bind to
        #[arg(long, default_value_t = 8086)]
        port: u16,

        /// Require credentials on protected endpoints
        #[arg(long)]
        auth: bool,
    },
}

/// CLI-level failure; anything here is fatal.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("runtime error: {0}")]
    Runtime(std::io::Error),

    #[error("server error: {0}")]
    Server(std::io::Error),
}

pub type CliResult<T> = Result<T, CliError>;

/// Parse arguments and run the selected command.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Start { host, port, auth } => start(GatewayConfig {
            host,
            port,
            auth_enabled: auth,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    }
}

/// Boot the gateway and serve until the process is terminated.
pub fn start(config: GatewayConfig) -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let store = Arc::new(MemoryStore::new());
    let server = AdminServer::new(
        config,
        store.clone(),
        Arc::new(BasicQueryParser),
        Arc::new(NullSeriesWriter::new(store)),
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    runtime.block_on(server.start()).map_err(CliError::Server)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_command_defaults() {
        let cli = Cli::parse_from(["nimbusdb", "start"]);
        let Command::Start { host, port, auth } = cli.command;
        assert_eq!(host, "0.0.0.0");
        assert_eq!(port, 8086);
        assert!(!auth);
    }

    #[test]
    fn test_start_command_with_auth() {
        let cli = Cli::parse_from(["nimbusdb", "start", "--port", "9090", "--auth"]);
        let Command::Start { port, auth, .. } = cli.command;
        assert_eq!(port, 9090);
        assert!(auth);
    }
}
