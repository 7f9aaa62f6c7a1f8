//! Task lifecycle and query orchestration.
//!
//! Queries run filter, sort and paginate over a snapshot of the store.
//! Mutations validate, assign identifiers, apply status transitions and
//! persist through the [`TaskRepository`].

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use super::TaskServiceError;
use crate::domain::{
    CompletionMetrics, CompletionStatus, FilterCriteria, Page, PageRequest, SortOrder, Task,
    TaskDraft, TaskId, compute_metrics, paginate,
};
use crate::infrastructure::{Clock, TaskRepository};

/// Hands out task identifiers in increasing order, starting at 1.
///
/// Identifiers are never reused within the lifetime of the sequence.
#[derive(Debug)]
struct TaskIdSequence {
    next: u64,
}

impl TaskIdSequence {
    /// Starts after the highest identifier already present.
    fn starting_after(highest: Option<TaskId>) -> Self {
        Self {
            next: highest.map_or(1, |id| id.value().saturating_add(1)),
        }
    }

    fn next_id(&mut self) -> TaskId {
        let id = TaskId::new(self.next);
        self.next = self.next.saturating_add(1);
        id
    }
}

/// Builds a [`PageRequest`] from raw query values.
///
/// `sort_by` and `order` are comma-separated lists aligned by position.
///
/// # Errors
///
/// Returns [`TaskServiceError::InvalidPageRequest`] for a negative page, a
/// non-positive size, an unknown direction or more directions than fields, and
/// [`TaskServiceError::UnsupportedSortField`] for a field with no comparator.
pub fn build_page_request(
    page: i64,
    size: i64,
    sort_by: Option<&str>,
    order: Option<&str>,
) -> Result<PageRequest, TaskServiceError> {
    let sort = SortOrder::parse(sort_by, order)?;
    Ok(PageRequest::new(page, size)?.with_sort(sort))
}

/// Orchestrates task queries and mutations.
///
/// All mutations run while holding the identifier sequence lock, so the
/// read-modify-write steps against the store never interleave.
pub struct TaskService {
    repository: Arc<dyn TaskRepository>,
    clock: Arc<dyn Clock>,
    sequence: Mutex<TaskIdSequence>,
}

impl fmt::Debug for TaskService {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("TaskService")
            .field("clock", &self.clock)
            .field("sequence", &self.sequence)
            .finish_non_exhaustive()
    }
}

impl TaskService {
    /// Creates a service over `repository`.
    ///
    /// New identifiers continue after the highest one already stored.
    #[must_use]
    pub fn new(repository: Arc<dyn TaskRepository>, clock: Arc<dyn Clock>) -> Self {
        let highest = repository.find_all().iter().map(Task::id).max();
        Self {
            repository,
            clock,
            sequence: Mutex::new(TaskIdSequence::starting_after(highest)),
        }
    }

    /// Returns one page of the tasks matching `criteria`, ordered as
    /// `request` asks.
    ///
    /// The page total counts every matching task, not just those on the page.
    pub fn find_tasks(&self, criteria: &FilterCriteria, request: &PageRequest) -> Page<Task> {
        let mut candidates = if criteria.is_unrestricted() {
            self.repository.find_all()
        } else {
            self.repository.find_matching(criteria)
        };
        request.sort().sort(&mut candidates);

        let page = paginate(&candidates, request);
        tracing::debug!(
            total = page.total,
            page = page.page,
            size = page.size,
            returned = page.items.len(),
            "Tasks queried"
        );
        page
    }

    /// Looks up a single task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] if no task has `id`.
    pub fn get(&self, id: TaskId) -> Result<Task, TaskServiceError> {
        self.repository
            .find_by_id(id)
            .ok_or(TaskServiceError::TaskNotFound(id))
    }

    /// Validates `draft` and stores it as a new, not-done task.
    ///
    /// No identifier is consumed when validation fails.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::InvalidTaskProperties`] if the name or
    /// priority is invalid.
    pub fn create(&self, draft: TaskDraft) -> Result<Task, TaskServiceError> {
        let details = draft.validate().inspect_err(|error| {
            tracing::warn!(%error, "Rejected task creation");
        })?;

        let mut sequence = self.sequence.lock();
        let task = Task::new(sequence.next_id(), details, self.clock.now());
        let task = self.repository.insert(task);

        tracing::info!(task_id = %task.id(), priority = %task.priority(), "Task created");
        Ok(task)
    }

    /// Replaces the name, due date and priority of a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] if no task has `id`, and
    /// otherwise [`TaskServiceError::InvalidTaskProperties`] if the new
    /// properties are invalid.
    pub fn update(&self, id: TaskId, draft: TaskDraft) -> Result<Task, TaskServiceError> {
        let _guard = self.sequence.lock();
        let existing = self.get(id)?;
        let details = draft.validate().inspect_err(|error| {
            tracing::warn!(task_id = %id, %error, "Rejected task update");
        })?;

        let task = self.persist(existing.with_details(details))?;
        tracing::info!(task_id = %id, "Task updated");
        Ok(task)
    }

    /// Moves a task to `status`.
    ///
    /// The completion time is set when the task becomes done and cleared
    /// when it becomes not done. Setting the current status again changes
    /// nothing.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] if no task has `id`.
    pub fn set_completion_status(
        &self,
        id: TaskId,
        status: CompletionStatus,
    ) -> Result<Task, TaskServiceError> {
        let _guard = self.sequence.lock();
        let existing = self.get(id)?;
        let previous = existing.status();

        let task = self.persist(existing.with_status(status, self.clock.now()))?;
        tracing::info!(task_id = %id, from = %previous, to = %status, "Task status changed");
        Ok(task)
    }

    /// Marks a task as done.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] if no task has `id`.
    pub fn mark_done(&self, id: TaskId) -> Result<Task, TaskServiceError> {
        self.set_completion_status(id, CompletionStatus::Done)
    }

    /// Marks a task as not done.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] if no task has `id`.
    pub fn mark_undone(&self, id: TaskId) -> Result<Task, TaskServiceError> {
        self.set_completion_status(id, CompletionStatus::NotDone)
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] if nothing was removed.
    pub fn delete(&self, id: TaskId) -> Result<bool, TaskServiceError> {
        let _guard = self.sequence.lock();
        if !self.repository.remove(id) {
            tracing::warn!(task_id = %id, "Delete targeted a missing task");
            return Err(TaskServiceError::TaskNotFound(id));
        }

        tracing::info!(task_id = %id, "Task deleted");
        Ok(true)
    }

    /// Computes completion metrics over every stored task.
    pub fn metrics(&self) -> CompletionMetrics {
        let tasks = self.repository.find_all();
        let metrics = compute_metrics(&tasks);
        tracing::debug!(groups = metrics.len(), "Completion metrics computed");
        metrics
    }

    /// Returns the number of stored tasks.
    pub fn count(&self) -> usize {
        self.repository.count()
    }

    fn persist(&self, task: Task) -> Result<Task, TaskServiceError> {
        let id = task.id();
        self.repository
            .replace(id, task)
            .ok_or(TaskServiceError::TaskNotFound(id))
    }
}

// =============================================================================
// Tests
// =============================================================================
