//! HTTP server module

mod api;

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;

use crate::AppState;
use crate::ws::ws_handler;

pub use api::{
    HealthResponse, OutcomeListResponse, SessionCountResponse, TaskListResponse, TaskSummary,
};

/// Create the HTTP router with all routes configured
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(api::health))
        .route("/api/tasks", get(api::list_tasks))
        .route("/api/sessions", get(api::session_count))
        .route("/api/outcomes", get(api::list_outcomes))
        .route("/ws", get(ws_handler))
        // The canvas UI may be served from another origin
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use axum_test::TestServer;
    use numeracy_core::{RuleFormat, TaskRegistry, parse_task};

    use super::*;

    fn state_with_task() -> Arc<AppState> {
        let mut tasks = TaskRegistry::new();
        let task = parse_task(
            "task_id: \"6x8\"\ndescription: six eights\ninitial_prompt: { text: \"Go\" }\n",
            RuleFormat::Yaml,
            Path::new("6x8.yaml"),
        )
        .unwrap();
        tasks.insert(task).unwrap();
        Arc::new(AppState::new(tasks))
    }

    #[tokio::test]
    async fn test_router_has_health_endpoint() {
        let server = TestServer::new(create_router(state_with_task())).unwrap();

        let response = server.get("/api/health").await;
        response.assert_status_ok();
        let health: HealthResponse = response.json();
        assert_eq!(health.status, "ok");
        assert_eq!(health.tasks, 1);
    }

    #[tokio::test]
    async fn test_tasks_endpoint_lists_loaded_tasks() {
        let server = TestServer::new(create_router(state_with_task())).unwrap();

        let tasks: TaskListResponse = server.get("/api/tasks").await.json();
        assert_eq!(tasks.tasks.len(), 1);
        assert_eq!(tasks.tasks[0].task_id, "6x8");
        assert_eq!(tasks.tasks[0].description.as_deref(), Some("six eights"));
    }

    #[tokio::test]
    async fn test_sessions_endpoint_starts_at_zero() {
        let server = TestServer::new(create_router(state_with_task())).unwrap();

        let count: SessionCountResponse = server.get("/api/sessions").await.json();
        assert_eq!(count.active_sessions, 0);
    }

    #[tokio::test]
    async fn test_outcomes_endpoint_starts_empty() {
        let server = TestServer::new(create_router(state_with_task())).unwrap();

        let response = server.get("/api/outcomes").await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["outcomes"], serde_json::json!([]));
    }
}
