//! API request handlers

use crate::activity::ActivityEntry;
use crate::catalog::{self, CompletionSummary, Task, TaskCatalog};
use crate::dashboard::Dashboard;
use crate::error::TrackerError;
use crate::events::{EventEmitter, HybridEmitter};
use crate::snapshots::{IntegrationStatus, SeoScore};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

/// Shared server state
pub struct ServerState {
    pub dashboard: Arc<Dashboard>,
    /// Local broadcast (WebSocket clients) + optional revalidation notifier
    pub event_bus: Arc<HybridEmitter>,
}

/// Shared dashboard state
pub type DashboardState = Arc<ServerState>;

// ============================================================================
// Health check
// ============================================================================

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub profile: String,
}

/// Health check handler, verifies the store answers.
///
/// Returns 200 + `"ok"` when it does, 503 + `"unhealthy"` otherwise.
pub async fn health(State(state): State<DashboardState>) -> (StatusCode, Json<HealthResponse>) {
    let healthy = state.dashboard.health_check().await;

    let (http_status, status) = if healthy {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    (
        http_status,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            profile: state.dashboard.profile().to_string(),
        }),
    )
}

// ============================================================================
// Tasks
// ============================================================================

/// Full task catalog
pub async fn list_tasks(State(state): State<DashboardState>) -> Result<Json<TaskCatalog>, AppError> {
    Ok(Json(state.dashboard.tasks().get_tasks().await?))
}

/// Tasks of one category; unknown categories yield `[]`
pub async fn get_category_tasks(
    State(state): State<DashboardState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<Task>>, AppError> {
    Ok(Json(
        state.dashboard.tasks().get_category_tasks(&category).await?,
    ))
}

/// Flip one task's completion flag and return the updated catalog
pub async fn toggle_task(
    State(state): State<DashboardState>,
    Path((category, task_id)): Path<(String, u32)>,
) -> Result<Json<TaskCatalog>, AppError> {
    let catalog = state
        .dashboard
        .tasks()
        .toggle_task_completion(&category, task_id)
        .await?;
    Ok(Json(catalog))
}

// ============================================================================
// Completion
// ============================================================================

/// Overall and per-category completion
pub async fn get_completion(
    State(state): State<DashboardState>,
) -> Result<Json<CompletionSummary>, AppError> {
    let catalog = state.dashboard.tasks().get_tasks().await?;
    Ok(Json(catalog::summarize(&catalog)))
}

#[derive(Serialize)]
pub struct CategoryCompletionResponse {
    pub category: String,
    pub percent: u8,
}

/// Completion of one category; unknown categories are 0
pub async fn get_category_completion(
    State(state): State<DashboardState>,
    Path(category): Path<String>,
) -> Result<Json<CategoryCompletionResponse>, AppError> {
    let catalog = state.dashboard.tasks().get_tasks().await?;
    let percent = catalog::calculate_completion(&catalog, &category);
    Ok(Json(CategoryCompletionResponse { category, percent }))
}

// ============================================================================
// Activity & snapshots
// ============================================================================

/// Activity entries, most recent first
pub async fn get_activity(
    State(state): State<DashboardState>,
) -> Result<Json<Vec<ActivityEntry>>, AppError> {
    Ok(Json(state.dashboard.activity().read().await?))
}

pub async fn get_score(State(state): State<DashboardState>) -> Result<Json<SeoScore>, AppError> {
    Ok(Json(state.dashboard.snapshots().get_score().await?))
}

pub async fn get_integrations(
    State(state): State<DashboardState>,
) -> Result<Json<IntegrationStatus>, AppError> {
    Ok(Json(state.dashboard.snapshots().get_integrations().await?))
}

// ============================================================================
// Revalidation
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct RevalidateRequest {
    pub path: Option<String>,
}

#[derive(Serialize)]
pub struct RevalidateResponse {
    pub revalidated: bool,
    pub message: String,
}

/// Ask subscribers to refresh their view of `path`
pub async fn revalidate(
    State(state): State<DashboardState>,
    payload: Result<Json<RevalidateRequest>, JsonRejection>,
) -> Result<Json<RevalidateResponse>, AppError> {
    let Json(req) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let path = req
        .path
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::BadRequest("Path is required".to_string()))?;

    state.event_bus.emit_revalidated(&path);
    info!(path = %path, "Path revalidated");

    Ok(Json(RevalidateResponse {
        revalidated: true,
        message: format!("Path {} revalidated successfully", path),
    }))
}

// ============================================================================
// Error handling
// ============================================================================

/// Application error type
#[derive(Debug)]
pub enum AppError {
    Internal(anyhow::Error),
    NotFound(String),
    BadRequest(String),
    ServiceUnavailable(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::Internal(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl From<TrackerError> for AppError {
    fn from(err: TrackerError) -> Self {
        match err {
            TrackerError::NotFound { .. } | TrackerError::UnknownCategory(_) => {
                AppError::NotFound(err.to_string())
            }
            TrackerError::StorageUnavailable(_) => {
                error!(error = %err, "Storage request failed");
                AppError::ServiceUnavailable(err.to_string())
            }
            TrackerError::Malformed { .. } => {
                error!(error = %err, "Stored document is malformed");
                AppError::Internal(err.into())
            }
        }
    }
}
