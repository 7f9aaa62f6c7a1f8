//! Filter criteria for task queries.
//!
//! Every field of [`FilterCriteria`] is optional and an absent field never
//! excludes a task. A task matches when it satisfies each present
//! sub-criterion independently.

use std::collections::BTreeSet;

use super::task::{CompletionStatus, Priority, Task};

/// A composable, all-optional filter over name, priority and status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Case-insensitive substring the task name must contain.
    pub name: Option<String>,
    /// Acceptable priorities. `None` or an empty set accepts every priority.
    pub priorities: Option<BTreeSet<Priority>>,
    /// Required completion status.
    pub status: Option<CompletionStatus>,
}

impl FilterCriteria {
    /// Creates criteria that match every task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..self
        }
    }

    #[must_use]
    pub fn with_priorities(self, priorities: impl IntoIterator<Item = Priority>) -> Self {
        Self {
            priorities: Some(priorities.into_iter().collect()),
            ..self
        }
    }

    #[must_use]
    pub fn with_status(self, status: CompletionStatus) -> Self {
        Self {
            status: Some(status),
            ..self
        }
    }

    /// Returns `true` if no sub-criterion would exclude anything.
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.name.is_none()
            && self.priorities.as_ref().is_none_or(BTreeSet::is_empty)
            && self.status.is_none()
    }

    /// Returns `true` if the task satisfies every present sub-criterion.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.matches_name(task) && self.matches_priority(task) && self.matches_status(task)
    }

    fn matches_name(&self, task: &Task) -> bool {
        self.name.as_deref().is_none_or(|needle| {
            task.name()
                .to_lowercase()
                .contains(&needle.to_lowercase())
        })
    }

    fn matches_priority(&self, task: &Task) -> bool {
        self.priorities
            .as_ref()
            .is_none_or(|priorities| priorities.is_empty() || priorities.contains(&task.priority()))
    }

    fn matches_status(&self, task: &Task) -> bool {
        self.status.is_none_or(|status| task.status() == status)
    }
}

/// Returns `true` if `task` satisfies `criteria`.
#[must_use]
pub fn matches(task: &Task, criteria: &FilterCriteria) -> bool {
    criteria.matches(task)
}

/// Keeps the tasks that satisfy `criteria`, preserving their order.
pub fn filter_tasks<I>(tasks: I, criteria: &FilterCriteria) -> Vec<Task>
where
    I: IntoIterator<Item = Task>,
{
    tasks
        .into_iter()
        .filter(|task| criteria.matches(task))
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
