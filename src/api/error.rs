//! API error handling.
//!
//! Every failure is answered with a JSON body `{ "error": CODE, "message": text }`.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::domain::UnknownVariant;
use crate::service::TaskServiceError;

pub const INVALID_TODO_PROPERTIES: &str = "INVALID_TODO_PROPERTIES";
pub const NOT_FOUND: &str = "NOT_FOUND";
pub const INVALID_PAGE_REQUEST: &str = "INVALID_PAGE_REQUEST";
pub const UNSUPPORTED_SORT_FIELD: &str = "UNSUPPORTED_SORT_FIELD";
pub const REQUEST_PARAMS_TYPE_MISMATCH: &str = "REQUEST_PARAMS_TYPE_MISMATCH";

// =============================================================================
// API Error
// =============================================================================

/// API error structure for JSON responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub error: String,
    /// Human-readable error message.
    pub message: String,
}

impl ApiError {
    #[must_use]
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

// =============================================================================
// API Error Response
// =============================================================================

/// API error response containing status code and error details.
#[derive(Debug, Clone)]
pub struct ApiErrorResponse {
    pub status: StatusCode,
    pub error: ApiError,
}

impl ApiErrorResponse {
    #[must_use]
    pub const fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }

    /// Creates a 400 Bad Request response.
    #[must_use]
    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ApiError::new(code, message))
    }

    /// Creates a 404 Not Found response.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, ApiError::new(NOT_FOUND, message))
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<TaskServiceError> for ApiErrorResponse {
    fn from(error: TaskServiceError) -> Self {
        let message = error.to_string();
        match error {
            TaskServiceError::InvalidTaskProperties(_) => {
                Self::bad_request(INVALID_TODO_PROPERTIES, message)
            }
            TaskServiceError::TaskNotFound(_) => Self::not_found(message),
            TaskServiceError::InvalidPageRequest(_) => {
                Self::bad_request(INVALID_PAGE_REQUEST, message)
            }
            TaskServiceError::UnsupportedSortField(_) => {
                Self::bad_request(UNSUPPORTED_SORT_FIELD, message)
            }
        }
    }
}

impl From<UnknownVariant> for ApiErrorResponse {
    fn from(error: UnknownVariant) -> Self {
        Self::bad_request(REQUEST_PARAMS_TYPE_MISMATCH, error.to_string())
    }
}

impl From<JsonRejection> for ApiErrorResponse {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!(error = %rejection.body_text(), "Rejected request body");
        Self::bad_request(INVALID_TODO_PROPERTIES, rejection.body_text())
    }
}

impl From<QueryRejection> for ApiErrorResponse {
    fn from(rejection: QueryRejection) -> Self {
        tracing::warn!(error = %rejection.body_text(), "Rejected query parameters");
        Self::bad_request(REQUEST_PARAMS_TYPE_MISMATCH, rejection.body_text())
    }
}

impl From<PathRejection> for ApiErrorResponse {
    fn from(rejection: PathRejection) -> Self {
        tracing::warn!(error = %rejection.body_text(), "Rejected path parameter");
        Self::bad_request(REQUEST_PARAMS_TYPE_MISMATCH, rejection.body_text())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TaskId, TaskValidationError};
    use rstest::rstest;

    #[rstest]
    fn test_api_error_serializes_error_and_message() {
        let json = serde_json::to_value(ApiError::new(NOT_FOUND, "Task not found: 3")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "error": "NOT_FOUND", "message": "Task not found: 3" })
        );
    }

    #[rstest]
    #[case(
        TaskServiceError::InvalidTaskProperties(TaskValidationError::BlankName),
        StatusCode::BAD_REQUEST,
        INVALID_TODO_PROPERTIES
    )]
    #[case(TaskServiceError::TaskNotFound(TaskId::new(4)), StatusCode::NOT_FOUND, NOT_FOUND)]
    #[case(
        TaskServiceError::InvalidPageRequest("bad".to_string()),
        StatusCode::BAD_REQUEST,
        INVALID_PAGE_REQUEST
    )]
    #[case(
        TaskServiceError::UnsupportedSortField("name".to_string()),
        StatusCode::BAD_REQUEST,
        UNSUPPORTED_SORT_FIELD
    )]
    fn test_service_error_mapping(
        #[case] error: TaskServiceError,
        #[case] status: StatusCode,
        #[case] code: &str,
    ) {
        let message = error.to_string();
        let response = ApiErrorResponse::from(error);
        assert_eq!(response.status, status);
        assert_eq!(response.error.error, code);
        assert_eq!(response.error.message, message);
    }

    #[rstest]
    fn test_unknown_variant_is_type_mismatch() {
        let response = ApiErrorResponse::from(UnknownVariant {
            kind: "priority",
            value: "URGENT".to_string(),
        });
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error.error, REQUEST_PARAMS_TYPE_MISMATCH);
        assert_eq!(response.error.message, "Unknown priority: 'URGENT'");
    }
}
