//! Completion-time metrics.
//!
//! Only completed tasks contribute. The result always has an `"ALL"` entry
//! and one entry per priority tier that has at least one completed task.

use std::collections::BTreeMap;

use serde::Serialize;

use super::task::{Priority, Task};

/// Label of the entry averaging over every completed task.
pub const ALL_LABEL: &str = "ALL";

/// Average completion duration in seconds, keyed by group label.
///
/// `"ALL"` maps to `None` when no task is completed. Priority entries are
/// only present for tiers with completed tasks and are never `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CompletionMetrics {
    averages: BTreeMap<String, Option<f64>>,
}

impl CompletionMetrics {
    /// Average over all completed tasks, `None` if there are none.
    #[must_use]
    pub fn overall(&self) -> Option<f64> {
        self.averages.get(ALL_LABEL).copied().flatten()
    }

    /// Average over completed tasks of `priority`, `None` if there are none.
    #[must_use]
    pub fn for_priority(&self, priority: Priority) -> Option<f64> {
        self.averages.get(priority.as_str()).copied().flatten()
    }

    /// Looks up an entry by label.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<Option<f64>> {
        self.averages.get(label).copied()
    }

    /// Returns the labels present, in ascending order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.averages.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.averages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.averages.is_empty()
    }
}

/// Running sum of completion durations for one group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Accumulator {
    total_seconds: i64,
    count: u32,
}

impl Accumulator {
    const fn single(seconds: i64) -> Self {
        Self {
            total_seconds: seconds,
            count: 1,
        }
    }

    const fn combine(self, other: Self) -> Self {
        Self {
            total_seconds: self.total_seconds + other.total_seconds,
            count: self.count + other.count,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn average(self) -> Option<f64> {
        (self.count > 0).then(|| self.total_seconds as f64 / f64::from(self.count))
    }
}

/// Durations of completed tasks, overall and per priority.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct CompletionTally {
    overall: Accumulator,
    by_priority: BTreeMap<Priority, Accumulator>,
}

impl CompletionTally {
    fn single(priority: Priority, seconds: i64) -> Self {
        let entry = Accumulator::single(seconds);
        Self {
            overall: entry,
            by_priority: BTreeMap::from([(priority, entry)]),
        }
    }

    /// Merges two tallies; associative, with `default()` as identity.
    fn combine(self, other: Self) -> Self {
        let by_priority = other
            .by_priority
            .into_iter()
            .fold(self.by_priority, |mut merged, (priority, entry)| {
                let current = merged.entry(priority).or_default();
                *current = current.combine(entry);
                merged
            });
        Self {
            overall: self.overall.combine(other.overall),
            by_priority,
        }
    }

    fn into_metrics(self) -> CompletionMetrics {
        let averages = std::iter::once((ALL_LABEL.to_string(), self.overall.average()))
            .chain(
                self.by_priority
                    .into_iter()
                    .map(|(priority, entry)| (priority.as_str().to_string(), entry.average())),
            )
            .collect();
        CompletionMetrics { averages }
    }
}

fn tally<'a, I>(tasks: I) -> CompletionTally
where
    I: IntoIterator<Item = &'a Task>,
{
    tasks
        .into_iter()
        .filter_map(|task| {
            task.time_to_complete()
                .map(|duration| CompletionTally::single(task.priority(), duration.num_seconds()))
        })
        .fold(CompletionTally::default(), CompletionTally::combine)
}

/// Computes the average completion duration overall and per priority.
///
/// Durations are counted in whole seconds per task. Incomplete tasks are
/// ignored, so the result does not depend on the current time.
pub fn compute_metrics<'a, I>(tasks: I) -> CompletionMetrics
where
    I: IntoIterator<Item = &'a Task>,
{
    tally(tasks).into_metrics()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::task::{CompletionStatus, TaskDraft, TaskId, Timestamp};
    use chrono::Duration;
    use rstest::rstest;

    fn created_at() -> Timestamp {
        Timestamp::now()
    }

    fn open_task(id: u64, priority: Priority) -> Task {
        let details = TaskDraft::new(format!("Task {id}"), priority).validate().unwrap();
        Task::new(TaskId::new(id), details, created_at())
    }

    fn done_task(id: u64, priority: Priority, seconds: i64) -> Task {
        let task = open_task(id, priority);
        let completed_at = task.created_at().plus(Duration::seconds(seconds));
        task.with_status(CompletionStatus::Done, completed_at)
    }

    #[rstest]
    fn test_no_done_tasks_yields_only_all() {
        let tasks = vec![open_task(1, Priority::High), open_task(2, Priority::Low)];
        let metrics = compute_metrics(&tasks);

        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics.get(ALL_LABEL), Some(None));
        assert_eq!(metrics.overall(), None);
    }

    #[rstest]
    fn test_empty_input_yields_only_all() {
        let metrics = compute_metrics(&Vec::new());
        assert_eq!(metrics.labels().collect::<Vec<_>>(), vec![ALL_LABEL]);
    }

    #[rstest]
    fn test_single_done_task() {
        let tasks = vec![done_task(1, Priority::High, 100)];
        let metrics = compute_metrics(&tasks);

        assert_eq!(metrics.len(), 2);
        assert_eq!(metrics.overall(), Some(100.0));
        assert_eq!(metrics.for_priority(Priority::High), Some(100.0));
    }

    #[rstest]
    fn test_groups_average_separately_and_skip_empty_tiers() {
        let tasks = vec![
            done_task(1, Priority::High, 100),
            done_task(2, Priority::High, 300),
            done_task(3, Priority::Low, 50),
            open_task(4, Priority::Medium),
        ];
        let metrics = compute_metrics(&tasks);

        assert_eq!(metrics.overall(), Some(150.0));
        assert_eq!(metrics.for_priority(Priority::High), Some(200.0));
        assert_eq!(metrics.for_priority(Priority::Low), Some(50.0));
        assert_eq!(metrics.get("MEDIUM"), None);
        assert_eq!(metrics.labels().collect::<Vec<_>>(), vec!["ALL", "HIGH", "LOW"]);
    }

    #[rstest]
    #[case(0)]
    #[case(2)]
    #[case(5)]
    fn test_tallies_of_split_input_combine_to_whole(#[case] split: usize) {
        let tasks = vec![
            done_task(1, Priority::High, 100),
            open_task(2, Priority::Medium),
            done_task(3, Priority::Low, 50),
            done_task(4, Priority::High, 300),
            done_task(5, Priority::Medium, 7),
        ];
        let (left, right) = tasks.split_at(split);

        assert_eq!(tally(left).combine(tally(right)), tally(&tasks));
    }

    #[rstest]
    fn test_tally_combine_is_associative_with_identity() {
        let a = CompletionTally::single(Priority::High, 10);
        let b = CompletionTally::single(Priority::Low, 20);
        let c = CompletionTally::single(Priority::High, 30);

        assert_eq!(
            a.clone().combine(b.clone()).combine(c.clone()),
            a.clone().combine(b.combine(c))
        );
        assert_eq!(CompletionTally::default().combine(a.clone()), a);
    }

    #[rstest]
    fn test_serializes_as_flat_object() {
        let tasks = vec![done_task(1, Priority::High, 100)];
        let json = serde_json::to_value(compute_metrics(&tasks)).unwrap();
        assert_eq!(json, serde_json::json!({ "ALL": 100.0, "HIGH": 100.0 }));

        let json = serde_json::to_value(compute_metrics(&Vec::new())).unwrap();
        assert_eq!(json, serde_json::json!({ "ALL": null }));
    }
}
