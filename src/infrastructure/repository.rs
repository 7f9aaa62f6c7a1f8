//! Record store contract.
//!
//! The service only needs a handful of operations over a collection of
//! tasks. Implementations must keep a stable iteration order (the "store
//! order") that callers rely on when no sort is requested.

use crate::domain::{FilterCriteria, Task, TaskId};

/// Storage for task records.
///
/// Operations are synchronous and infallible: the backends in this crate
/// hold records in memory. A missing record is reported through `Option`
/// or `bool`, never as an error.
pub trait TaskRepository: Send + Sync {
    /// Returns every task in store order.
    fn find_all(&self) -> Vec<Task>;

    /// Returns the tasks matching `criteria` in store order.
    ///
    /// Must behave exactly like filtering [`find_all`](Self::find_all) with
    /// [`FilterCriteria::matches`].
    fn find_matching(&self, criteria: &FilterCriteria) -> Vec<Task> {
        self.find_all()
            .into_iter()
            .filter(|task| criteria.matches(task))
            .collect()
    }

    /// Finds a task by its ID.
    fn find_by_id(&self, id: TaskId) -> Option<Task>;

    /// Appends a task and returns it.
    fn insert(&self, task: Task) -> Task;

    /// Replaces the task stored under `id`, keeping its position.
    ///
    /// Returns the stored task, or `None` if no task has that ID.
    fn replace(&self, id: TaskId, task: Task) -> Option<Task>;

    /// Removes the task with the given ID.
    ///
    /// Returns `true` if a task was removed.
    fn remove(&self, id: TaskId) -> bool;

    /// Counts all tasks.
    fn count(&self) -> usize {
        self.find_all().len()
    }
}
