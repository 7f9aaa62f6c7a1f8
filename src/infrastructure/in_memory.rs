//! In-memory repository implementation.
//!
//! Records live in a `Vec` behind a `parking_lot::RwLock`, so reads run in
//! parallel and the vector order is the store order (insertion order).

use std::sync::Arc;

use parking_lot::RwLock;

use crate::domain::{FilterCriteria, Task, TaskId};
use crate::infrastructure::TaskRepository;

/// In-memory implementation of [`TaskRepository`].
///
/// Cloning is cheap and clones share the same records.
///
/// # Example
///
/// ```
/// use todo_service::domain::{Task, TaskDraft, TaskId, Priority, Timestamp};
/// use todo_service::infrastructure::{InMemoryTaskRepository, TaskRepository};
///
/// let repository = InMemoryTaskRepository::new();
/// let details = TaskDraft::new("My task", Priority::High).validate().unwrap();
/// repository.insert(Task::new(TaskId::new(1), details, Timestamp::now()));
///
/// assert!(repository.find_by_id(TaskId::new(1)).is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    tasks: Arc<RwLock<Vec<Task>>>,
}

impl InMemoryTaskRepository {
    /// Creates a new empty in-memory task repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with `tasks`, in order.
    #[must_use]
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: Arc::new(RwLock::new(tasks)),
        }
    }
}

impl TaskRepository for InMemoryTaskRepository {
    fn find_all(&self) -> Vec<Task> {
        self.tasks.read().clone()
    }

    fn find_matching(&self, criteria: &FilterCriteria) -> Vec<Task> {
        self.tasks
            .read()
            .iter()
            .filter(|task| criteria.matches(task))
            .cloned()
            .collect()
    }

    fn find_by_id(&self, id: TaskId) -> Option<Task> {
        self.tasks.read().iter().find(|task| task.id() == id).cloned()
    }

    fn insert(&self, task: Task) -> Task {
        self.tasks.write().push(task.clone());
        task
    }

    fn replace(&self, id: TaskId, task: Task) -> Option<Task> {
        let mut guard = self.tasks.write();
        let slot = guard.iter_mut().find(|existing| existing.id() == id)?;
        *slot = task;
        Some(slot.clone())
    }

    fn remove(&self, id: TaskId) -> bool {
        let mut guard = self.tasks.write();
        let before = guard.len();
        guard.retain(|task| task.id() != id);
        guard.len() != before
    }

    fn count(&self) -> usize {
        self.tasks.read().len()
    }
}

// =============================================================================
// Tests
// =============================================================================
