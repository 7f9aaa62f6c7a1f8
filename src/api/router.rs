//! Route table.

use axum::Router;
use axum::routing::{get, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, create_task, delete_task, get_metrics, get_task, health_check, list_tasks,
    mark_done, mark_undone, update_task,
};

/// Builds the application router with tracing and permissive CORS.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/todos", get(list_tasks).post(create_task))
        .route("/todos/metrics", get(get_metrics))
        .route(
            "/todos/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .route("/todos/{id}/done", put(mark_done))
        .route("/todos/{id}/undone", put(mark_undone))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
