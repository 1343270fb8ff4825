//! REST API handlers

use std::sync::Arc;

use axum::{Json, extract::State};
use numeracy_core::AssessmentResult;
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the server
    pub status: String,
    /// Server version
    pub version: String,
    /// Seconds since server started
    pub uptime_seconds: i64,
    /// Number of loaded tasks
    pub tasks: usize,
}

/// Health check endpoint
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        tasks: state.tasks.len(),
    })
}

/// Summary of a loaded task
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskSummary {
    pub task_id: String,
    pub description: Option<String>,
    pub probes: usize,
}

/// Response for listing tasks
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskListResponse {
    pub tasks: Vec<TaskSummary>,
}

/// List the tasks sessions can be opened for
pub async fn list_tasks(State(state): State<Arc<AppState>>) -> Json<TaskListResponse> {
    let tasks = state
        .tasks
        .iter()
        .map(|task| TaskSummary {
            task_id: task.task_id().to_string(),
            description: task.description().map(str::to_string),
            probes: task.probes().len(),
        })
        .collect();

    Json(TaskListResponse { tasks })
}

/// Response for the active session count
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionCountResponse {
    pub active_sessions: usize,
}

pub async fn session_count(State(state): State<Arc<AppState>>) -> Json<SessionCountResponse> {
    Json(SessionCountResponse {
        active_sessions: state.active_session_count(),
    })
}

/// Response for completed session outcomes
#[derive(Debug, Serialize)]
pub struct OutcomeListResponse {
    pub outcomes: Vec<AssessmentResult>,
}

/// Results of sessions that reached completion, oldest first
pub async fn list_outcomes(State(state): State<Arc<AppState>>) -> Json<OutcomeListResponse> {
    Json(OutcomeListResponse {
        outcomes: state.outcomes().await,
    })
}
