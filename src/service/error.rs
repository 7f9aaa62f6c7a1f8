//! Errors raised by [`TaskService`](super::TaskService).

use thiserror::Error;

use crate::domain::{PageRequestError, SortParseError, TaskId, TaskValidationError};

/// Failures of task queries and mutations.
///
/// Every failed precondition maps to exactly one variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskServiceError {
    /// Name or priority failed validation on create or update.
    #[error("Invalid task properties: {0}")]
    InvalidTaskProperties(#[from] TaskValidationError),

    #[error("Task not found: {0}")]
    TaskNotFound(TaskId),

    /// Malformed page index, page size or sort direction.
    #[error("Invalid page request: {0}")]
    InvalidPageRequest(String),

    #[error("Unsupported sort field: '{0}'")]
    UnsupportedSortField(String),
}

impl From<PageRequestError> for TaskServiceError {
    fn from(error: PageRequestError) -> Self {
        Self::InvalidPageRequest(error.to_string())
    }
}

impl From<SortParseError> for TaskServiceError {
    fn from(error: SortParseError) -> Self {
        match error {
            SortParseError::UnsupportedField(field) => Self::UnsupportedSortField(field),
            SortParseError::InvalidDirection(_) | SortParseError::UnmatchedDirections { .. } => {
                Self::InvalidPageRequest(error.to_string())
            }
        }
    }
}
