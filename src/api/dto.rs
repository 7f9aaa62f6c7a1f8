//! Data Transfer Objects for the HTTP API.
//!
//! Field names are camelCase on the wire.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    CompletionStatus, FilterCriteria, Page, Priority, Task, TaskDraft, UnknownVariant,
};

// =============================================================================
// Request DTOs
// =============================================================================

/// Body of `POST /todos`.
///
/// Every field is optional here so that a missing name or priority is
/// reported as invalid task properties rather than a malformed body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub name: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<Priority>,
}

impl From<CreateTaskRequest> for TaskDraft {
    fn from(request: CreateTaskRequest) -> Self {
        Self {
            name: request.name,
            due_date: request.due_date,
            priority: request.priority,
        }
    }
}

/// Body of `PUT /todos/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub name: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<Priority>,
}

impl From<UpdateTaskRequest> for TaskDraft {
    fn from(request: UpdateTaskRequest) -> Self {
        Self {
            name: request.name,
            due_date: request.due_date,
            priority: request.priority,
        }
    }
}

/// Query parameters of `GET /todos`.
///
/// `priority`, `sortBy` and `order` are comma-separated lists. Empty values
/// are treated as absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTasksQuery {
    pub name: Option<String>,
    pub priority: Option<String>,
    pub done_status: Option<String>,
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

impl ListTasksQuery {
    /// Converts the filter parameters into [`FilterCriteria`].
    ///
    /// # Errors
    ///
    /// Returns [`UnknownVariant`] if a priority or status label is not
    /// recognized.
    pub fn criteria(&self) -> Result<FilterCriteria, UnknownVariant> {
        let mut criteria = FilterCriteria::new();

        if let Some(name) = non_blank(self.name.as_deref()) {
            criteria = criteria.with_name(name);
        }

        if let Some(priorities) = non_blank(self.priority.as_deref()) {
            let priorities = priorities
                .split(',')
                .map(str::trim)
                .filter(|label| !label.is_empty())
                .map(str::parse::<Priority>)
                .collect::<Result<Vec<_>, _>>()?;
            criteria = criteria.with_priorities(priorities);
        }

        if let Some(status) = non_blank(self.done_status.as_deref()) {
            criteria = criteria.with_status(status.parse::<CompletionStatus>()?);
        }

        Ok(criteria)
    }

    pub fn sort_by(&self) -> Option<&str> {
        non_blank(self.sort_by.as_deref())
    }

    pub fn order(&self) -> Option<&str> {
        non_blank(self.order.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}

// =============================================================================
// Response DTOs
// =============================================================================

/// A task as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: u64,
    pub name: String,
    pub due_date: Option<NaiveDate>,
    /// `DONE` or `NOT_DONE`.
    pub is_done: CompletionStatus,
    pub done_date: Option<DateTime<Utc>>,
    pub priority: Priority,
    pub creation_date: DateTime<Utc>,
}

impl From<&Task> for TaskResponse {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().value(),
            name: task.name().to_string(),
            due_date: task.due_date(),
            is_done: task.status(),
            done_date: task.completed_at().map(|at| *at.as_datetime()),
            priority: task.priority(),
            creation_date: *task.created_at().as_datetime(),
        }
    }
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self::from(&task)
    }
}

/// One page of results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub page: usize,
    pub size: usize,
    pub total_elements: usize,
    pub total_pages: usize,
}

impl<T> From<Page<Task>> for PageResponse<T>
where
    T: From<Task>,
{
    fn from(page: Page<Task>) -> Self {
        let total_pages = page.total_pages();
        let page = page.map(T::from);
        Self {
            content: page.items,
            page: page.page,
            size: page.size,
            total_elements: page.total,
            total_pages,
        }
    }
}

/// Body returned by `DELETE /todos/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub deleted: bool,
}

/// Body returned by `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

// =============================================================================
// Tests
// =============================================================================
