//! Service layer.
//!
//! [`TaskService`] is the single entry point for task queries, mutations
//! and metrics. It owns the identifier sequence and serializes mutations.

mod error;
mod task_service;

pub use error::TaskServiceError;
pub use task_service::{TaskService, build_page_request};
