//! API route definitions

use super::handlers::{self, DashboardState};
use super::ws_handlers;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the API router
pub fn create_router(state: DashboardState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // ====================================================================
        // Tasks
        // ====================================================================
        .route("/api/tasks", get(handlers::list_tasks))
        .route("/api/tasks/{category}", get(handlers::get_category_tasks))
        .route(
            "/api/tasks/{category}/{task_id}/toggle",
            post(handlers::toggle_task),
        )
        // Completion
        .route("/api/completion", get(handlers::get_completion))
        .route(
            "/api/completion/{category}",
            get(handlers::get_category_completion),
        )
        // ====================================================================
        // Activity & snapshots
        // ====================================================================
        .route("/api/activity", get(handlers::get_activity))
        .route("/api/score", get(handlers::get_score))
        .route("/api/integrations", get(handlers::get_integrations))
        // Revalidation
        .route("/api/revalidate", post(handlers::revalidate))
        // WebSocket change stream
        .route("/ws/events", get(ws_handlers::ws_events))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
