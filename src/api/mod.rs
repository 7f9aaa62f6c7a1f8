//! API module for HTTP handlers.
//!
//! This module contains route definitions and request/response handlers.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;

pub use dto::{
    CreateTaskRequest, DeleteResponse, HealthResponse, ListTasksQuery, PageResponse, TaskResponse,
    UpdateTaskRequest,
};
pub use error::{ApiError, ApiErrorResponse};
pub use handlers::{
    AppConfig, AppState, create_task, delete_task, get_metrics, get_task, health_check,
    list_tasks, mark_done, mark_undone, update_task,
};
pub use router::build_router;
