//! Shared test utilities for numeracy-server integration tests

pub mod client;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use numeracy_core::TaskRegistry;
use numeracy_server::{AppState, NumeracyServer, ServerConfig};
use tokio::net::TcpListener;

/// Rule files shipped with the workspace
pub fn bundled_rules_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../rules")
}

/// Creates a test server with the bundled rules, returns state and address
#[allow(dead_code)]
pub async fn create_test_server() -> (Arc<AppState>, SocketAddr) {
    let tasks = TaskRegistry::load_dir(&bundled_rules_dir()).expect("bundled rules load");
    create_test_server_with_tasks(tasks).await
}

/// Creates a test server with a custom task registry
#[allow(dead_code)]
pub async fn create_test_server_with_tasks(tasks: TaskRegistry) -> (Arc<AppState>, SocketAddr) {
    let state = Arc::new(AppState::new(tasks));

    let server = NumeracyServer::with_state(ServerConfig::default(), Arc::clone(&state));
    let addr = spawn_server(server).await;

    (state, addr)
}

/// Spawns server in background task, returns bound address
async fn spawn_server(server: NumeracyServer) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let _ = server.run_with_listener(listener).await;
    });

    // Brief delay to ensure server is accepting connections
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    addr
}
