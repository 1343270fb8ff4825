//! Serve command for running the assessment server
//!
//! Loads every task rule file, then serves:
//! - WebSocket sessions on `/ws`
//! - a small read-only HTTP API under `/api`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use numeracy_server::{NumeracyServer, ServerConfig};
use tracing::info;

use crate::config::{ConfigLoader, NumeracyConfig};

/// Arguments for the serve command
///
/// Flags override the merged user and project config.
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Directory containing task rule files
    #[arg(long)]
    pub rules_dir: Option<PathBuf>,
}

impl ServeArgs {
    /// Apply command-line flags on top of loaded configuration
    pub fn apply(&self, mut config: NumeracyConfig) -> NumeracyConfig {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(dir) = &self.rules_dir {
            config.rules.dir = dir.clone();
        }
        config
    }
}

/// Run the serve command
pub async fn run(args: ServeArgs) -> Result<()> {
    let config = args.apply(ConfigLoader::load()?);
    let server_config = ServerConfig::new(config.server.host.clone(), config.server.port);

    info!(
        "Starting numeracy server on {} with rules from {}",
        server_config.addr(),
        config.rules.dir.display()
    );

    let server = NumeracyServer::from_rules_dir(server_config, &config.rules.dir)
        .with_context(|| format!("Failed to load rules from {}", config.rules.dir.display()))?;
    server.run().await?;

    Ok(())
}
