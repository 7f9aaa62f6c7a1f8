//! HTTP handlers for the `/todos` resource.
//!
//! Handlers translate between DTOs and domain types and delegate to
//! [`TaskService`]. Extractor rejections are turned into the same JSON error
//! body as service errors.

use std::num::NonZeroUsize;
use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};

use super::dto::{
    CreateTaskRequest, DeleteResponse, HealthResponse, ListTasksQuery, PageResponse, TaskResponse,
    UpdateTaskRequest,
};
use super::error::ApiErrorResponse;
use crate::domain::{CompletionMetrics, TaskDraft, TaskId};
use crate::infrastructure::{DEFAULT_PAGE_SIZE, ServerConfig};
use crate::service::{TaskService, build_page_request};

// =============================================================================
// Application State
// =============================================================================

/// Settings the handlers need at request time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppConfig {
    /// Page size used when a request omits `size`.
    pub default_page_size: NonZeroUsize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_page_size: NonZeroUsize::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroUsize::MIN),
        }
    }
}

impl From<&ServerConfig> for AppConfig {
    fn from(config: &ServerConfig) -> Self {
        Self {
            default_page_size: config.default_page_size,
        }
    }
}

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub service: Arc<TaskService>,
    pub config: AppConfig,
}

impl AppState {
    #[must_use]
    pub fn new(service: TaskService) -> Self {
        Self::with_config(service, AppConfig::default())
    }

    #[must_use]
    pub fn with_config(service: TaskService, config: AppConfig) -> Self {
        Self {
            service: Arc::new(service),
            config,
        }
    }
}

// =============================================================================
// GET /todos
// =============================================================================

/// Lists tasks with filtering, sorting and pagination.
///
/// # Query Parameters
///
/// - `name`: case-insensitive substring of the task name
/// - `priority`: comma-separated list of `HIGH`, `MEDIUM`, `LOW`
/// - `doneStatus`: `DONE` or `NOT_DONE`
/// - `page`: zero-based page index (default: 0)
/// - `size`: page size (default: configured default page size)
/// - `sortBy`: comma-separated sort fields (`dueDate`, `priority`)
/// - `order`: comma-separated `ASC`/`DESC`, aligned with `sortBy`; no more entries than `sortBy`
///
/// # Errors
///
/// - **400 `REQUEST_PARAMS_TYPE_MISMATCH`**: a parameter has the wrong type
/// - **400 `INVALID_PAGE_REQUEST`**: negative page, non-positive size or unknown order
/// - **400 `UNSUPPORTED_SORT_FIELD`**: a sort field has no comparator
pub async fn list_tasks(
    State(state): State<AppState>,
    query: Result<Query<ListTasksQuery>, QueryRejection>,
) -> Result<Json<PageResponse<TaskResponse>>, ApiErrorResponse> {
    let Query(query) = query?;

    let criteria = query.criteria()?;
    let default_size = i64::try_from(state.config.default_page_size.get()).unwrap_or(i64::MAX);
    let request = build_page_request(
        query.page.unwrap_or(0),
        query.size.unwrap_or(default_size),
        query.sort_by(),
        query.order(),
    )?;

    let page = state.service.find_tasks(&criteria, &request);
    Ok(Json(PageResponse::from(page)))
}

// =============================================================================
// GET /todos/{id}
// =============================================================================

/// Returns a single task.
///
/// # Errors
///
/// - **404 `NOT_FOUND`**: no task has the given ID
pub async fn get_task(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
) -> Result<Json<TaskResponse>, ApiErrorResponse> {
    let Path(id) = path?;
    let task = state.service.get(TaskId::new(id))?;
    Ok(Json(TaskResponse::from(task)))
}

// =============================================================================
// POST /todos
// =============================================================================

/// Creates a new task.
///
/// # Response
///
/// - **201 Created**: the stored task
///
/// # Errors
///
/// - **400 `INVALID_TODO_PROPERTIES`**: malformed body, or invalid name or priority
pub async fn create_task(
    State(state): State<AppState>,
    body: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TaskResponse>), ApiErrorResponse> {
    let Json(request) = body?;
    let task = state.service.create(TaskDraft::from(request))?;
    Ok((StatusCode::CREATED, Json(TaskResponse::from(task))))
}

// =============================================================================
// PUT /todos/{id}
// =============================================================================

/// Replaces the name, due date and priority of a task.
///
/// # Errors
///
/// - **404 `NOT_FOUND`**: no task has the given ID
/// - **400 `INVALID_TODO_PROPERTIES`**: malformed body, or invalid name or priority
pub async fn update_task(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
    body: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> Result<Json<TaskResponse>, ApiErrorResponse> {
    let Path(id) = path?;
    let Json(request) = body?;
    let task = state
        .service
        .update(TaskId::new(id), TaskDraft::from(request))?;
    Ok(Json(TaskResponse::from(task)))
}

// =============================================================================
// PUT /todos/{id}/done, PUT /todos/{id}/undone
// =============================================================================

/// Marks a task as done.
///
/// # Errors
///
/// - **404 `NOT_FOUND`**: no task has the given ID
pub async fn mark_done(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
) -> Result<Json<TaskResponse>, ApiErrorResponse> {
    let Path(id) = path?;
    let task = state.service.mark_done(TaskId::new(id))?;
    Ok(Json(TaskResponse::from(task)))
}

/// Marks a task as not done.
///
/// # Errors
///
/// - **404 `NOT_FOUND`**: no task has the given ID
pub async fn mark_undone(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
) -> Result<Json<TaskResponse>, ApiErrorResponse> {
    let Path(id) = path?;
    let task = state.service.mark_undone(TaskId::new(id))?;
    Ok(Json(TaskResponse::from(task)))
}

// =============================================================================
// DELETE /todos/{id}
// =============================================================================

/// Deletes a task.
///
/// # Errors
///
/// - **404 `NOT_FOUND`**: no task has the given ID
pub async fn delete_task(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
) -> Result<Json<DeleteResponse>, ApiErrorResponse> {
    let Path(id) = path?;
    let deleted = state.service.delete(TaskId::new(id))?;
    Ok(Json(DeleteResponse { deleted }))
}

// =============================================================================
// GET /todos/metrics
// =============================================================================

/// Returns the average completion time in seconds, overall (`ALL`) and per
/// priority tier with at least one done task.
///
/// `ALL` is `null` when no task is done.
pub async fn get_metrics(State(state): State<AppState>) -> Json<CompletionMetrics> {
    Json(state.service.metrics())
}

// =============================================================================
// GET /health
// =============================================================================

/// Health check endpoint.
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0"
/// }
/// ```
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

// =============================================================================
// Tests
// =============================================================================
