//! numeracy-server - HTTP and WebSocket transport for assessment sessions
//!
//! Each WebSocket connection on `/ws` owns exactly one assessment session.
//! The server itself only holds the read-only task registry plus a few
//! counters; all decision logic lives in `numeracy-core`.

mod error;
pub mod http;
mod state;
pub mod ws;

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use numeracy_core::TaskRegistry;
use tokio::net::TcpListener;

pub use error::ServerError;
pub use http::create_router;
pub use state::AppState;

/// The main numeracy server
pub struct NumeracyServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl NumeracyServer {
    /// Create a server for an already loaded task registry
    pub fn new(config: ServerConfig, tasks: TaskRegistry) -> Self {
        Self {
            config,
            state: Arc::new(AppState::new(tasks)),
        }
    }

    /// Create a server, loading every rule file in `rules_dir`.
    ///
    /// Fails if any rule file is invalid, so a broken task is never offered.
    pub fn from_rules_dir(config: ServerConfig, rules_dir: &Path) -> Result<Self, ServerError> {
        let tasks = TaskRegistry::load_dir(rules_dir)?;
        if tasks.is_empty() {
            tracing::warn!("No task definitions found in {}", rules_dir.display());
        }
        Ok(Self::new(config, tasks))
    }

    /// Create a server with custom state (for testing)
    pub fn with_state(config: ServerConfig, state: Arc<AppState>) -> Self {
        Self { config, state }
    }

    /// Get the server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get the shared application state
    pub fn state(&self) -> Arc<AppState> {
        Arc::clone(&self.state)
    }

    /// Run the server, binding to the configured address
    pub async fn run(self) -> Result<(), ServerError> {
        let addr = self.config.addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| ServerError::Bind {
                addr: addr.clone(),
                source: e,
            })?;

        self.run_with_listener(listener).await
    }

    /// Run the server on an already bound listener
    pub async fn run_with_listener(self, listener: TcpListener) -> Result<(), ServerError> {
        let local = listener
            .local_addr()
            .map_err(|e| ServerError::Internal(e.to_string()))?;
        tracing::info!(
            "numeracy server listening on {} ({} task(s))",
            local,
            self.state.tasks.len()
        );

        let router = create_router(self.state);
        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))?;

        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7450,
        }
    }
}

impl ServerConfig {
    /// Create a new ServerConfig with the specified host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Returns the socket address string (e.g., "127.0.0.1:7450")
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
