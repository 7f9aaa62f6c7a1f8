//! Task domain model.
//!
//! This module contains the core entity of the service together with its
//! value objects and the rules that keep a task internally consistent:
//!
//! - names are trimmed and limited to [`MAX_NAME_LENGTH`] characters
//! - `completed_at` is present if and only if the task is `DONE`
//! - `created_at` never changes after construction

use std::fmt;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of characters allowed in a task name (after trimming).
pub const MAX_NAME_LENGTH: usize = 120;

// =============================================================================
// Value Objects - Newtypes
// =============================================================================

/// Unique identifier for a task.
///
/// Identifiers are assigned sequentially by the service starting at 1 and
/// are never reused, even after the task they named has been deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    /// Creates a `TaskId` from its numeric value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the numeric value of the identifier.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// A timestamp wrapper for `DateTime<Utc>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a `Timestamp` from a `DateTime<Utc>`.
    #[must_use]
    pub const fn from_datetime(datetime: DateTime<Utc>) -> Self {
        Self(datetime)
    }

    /// Returns the inner `DateTime<Utc>`.
    #[must_use]
    pub const fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Returns the current time as a `Timestamp`.
    ///
    /// **Note**: This reads the system clock. Service code obtains the time
    /// through a [`Clock`](crate::infrastructure::Clock) instead.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Returns a new timestamp shifted by `duration`.
    #[must_use]
    pub fn plus(self, duration: Duration) -> Self {
        Self(self.0 + duration)
    }

    /// Returns the elapsed time from `earlier` to `self`.
    #[must_use]
    pub fn since(&self, earlier: &Self) -> Duration {
        self.0 - earlier.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0.format("%Y-%m-%d %H:%M:%S UTC"))
    }
}

// =============================================================================
// Enums
// =============================================================================

/// The priority tier of a task.
///
/// The declaration order defines the sort order: `High < Medium < Low`, so an
/// ascending sort lists the most urgent tasks first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// All priority tiers in sort order.
    pub const ALL: [Self; 3] = [Self::High, Self::Medium, Self::Low];

    /// Returns the wire label of the tier (`HIGH`, `MEDIUM`, `LOW`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl std::str::FromStr for Priority {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "HIGH" => Ok(Self::High),
            "MEDIUM" => Ok(Self::Medium),
            "LOW" => Ok(Self::Low),
            _ => Err(UnknownVariant {
                kind: "priority",
                value: value.to_string(),
            }),
        }
    }
}

/// Whether a task has been completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompletionStatus {
    Done,
    #[default]
    NotDone,
}

impl CompletionStatus {
    /// Returns the wire label of the status (`DONE`, `NOT_DONE`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Done => "DONE",
            Self::NotDone => "NOT_DONE",
        }
    }
}

impl fmt::Display for CompletionStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl std::str::FromStr for CompletionStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "DONE" => Ok(Self::Done),
            "NOT_DONE" => Ok(Self::NotDone),
            _ => Err(UnknownVariant {
                kind: "completion status",
                value: value.to_string(),
            }),
        }
    }
}

/// Returned when parsing an enumeration label that is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {kind}: '{value}'")]
pub struct UnknownVariant {
    /// Human-readable name of the enumeration.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

// =============================================================================
// Validation
// =============================================================================

/// Reasons a set of task properties is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskValidationError {
    #[error("Name is required")]
    MissingName,

    #[error("Name must not be blank")]
    BlankName,

    #[error("Name must not exceed {max} characters (got {actual})")]
    NameTooLong { max: usize, actual: usize },

    #[error("Priority is required")]
    MissingPriority,
}

/// Unvalidated task properties, as supplied on create or update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub name: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<Priority>,
}

impl TaskDraft {
    /// Creates a draft with a name and priority and no due date.
    #[must_use]
    pub fn new(name: impl Into<String>, priority: Priority) -> Self {
        Self {
            name: Some(name.into()),
            due_date: None,
            priority: Some(priority),
        }
    }

    /// Returns a new draft with the given due date.
    #[must_use]
    pub fn with_due_date(self, due_date: NaiveDate) -> Self {
        Self {
            due_date: Some(due_date),
            ..self
        }
    }

    /// Validates the draft, producing the properties a task may carry.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError`] if the name is absent, blank or too
    /// long, or if the priority is absent.
    pub fn validate(self) -> Result<TaskDetails, TaskValidationError> {
        let name = validate_name(self.name.as_deref())?;
        let priority = self.priority.ok_or(TaskValidationError::MissingPriority)?;

        Ok(TaskDetails {
            name,
            due_date: self.due_date,
            priority,
        })
    }
}

/// Validated, user-editable task properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDetails {
    pub name: String,
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
}

/// Validates a task name and returns it trimmed.
///
/// # Errors
///
/// Returns [`TaskValidationError`] if the name is absent, blank after
/// trimming, or longer than [`MAX_NAME_LENGTH`] characters.
pub fn validate_name(name: Option<&str>) -> Result<String, TaskValidationError> {
    let name = name.ok_or(TaskValidationError::MissingName)?.trim();

    if name.is_empty() {
        return Err(TaskValidationError::BlankName);
    }

    let length = name.chars().count();
    if length > MAX_NAME_LENGTH {
        return Err(TaskValidationError::NameTooLong {
            max: MAX_NAME_LENGTH,
            actual: length,
        });
    }

    Ok(name.to_string())
}

// =============================================================================
// Task
// =============================================================================

/// A single to-do record.
///
/// Fields are private so the completion invariant cannot be broken from
/// outside: `completed_at` is `Some` exactly when `status` is `Done`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    name: String,
    due_date: Option<NaiveDate>,
    priority: Priority,
    status: CompletionStatus,
    completed_at: Option<Timestamp>,
    created_at: Timestamp,
}

impl Task {
    /// Creates a new, not-yet-completed task from validated properties.
    #[must_use]
    pub fn new(id: TaskId, details: TaskDetails, created_at: Timestamp) -> Self {
        Self {
            id,
            name: details.name,
            due_date: details.due_date,
            priority: details.priority,
            status: CompletionStatus::NotDone,
            completed_at: None,
            created_at,
        }
    }

    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    #[must_use]
    pub const fn status(&self) -> CompletionStatus {
        self.status
    }

    /// Returns when the task was last marked as done, if it is done.
    #[must_use]
    pub const fn completed_at(&self) -> Option<Timestamp> {
        self.completed_at
    }

    #[must_use]
    pub const fn created_at(&self) -> Timestamp {
        self.created_at
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.status == CompletionStatus::Done
    }

    /// Returns a new task with its editable properties replaced.
    ///
    /// Status and timestamps are left untouched.
    #[must_use]
    pub fn with_details(self, details: TaskDetails) -> Self {
        Self {
            name: details.name,
            due_date: details.due_date,
            priority: details.priority,
            ..self
        }
    }

    /// Returns a new task with the given completion status.
    ///
    /// Moving to `Done` records `at`, but no earlier than creation, as the
    /// completion time; moving to `NotDone` clears it. Setting the status the
    /// task already has is a no-op and keeps the existing completion time.
    #[must_use]
    pub fn with_status(self, status: CompletionStatus, at: Timestamp) -> Self {
        if self.status == status {
            return self;
        }

        let completed_at = match status {
            CompletionStatus::Done => Some(at.max(self.created_at)),
            CompletionStatus::NotDone => None,
        };

        Self {
            status,
            completed_at,
            ..self
        }
    }

    /// Returns the time between creation and completion, if the task is done.
    #[must_use]
    pub fn time_to_complete(&self) -> Option<Duration> {
        self.completed_at
            .map(|completed_at| completed_at.since(&self.created_at))
    }

    /// Returns how long the task took, or has taken so far.
    ///
    /// For done tasks this is creation to completion and does not depend on
    /// `now`; otherwise it is creation to `now`.
    #[must_use]
    pub fn completion_duration(&self, now: &Timestamp) -> Duration {
        self.time_to_complete()
            .unwrap_or_else(|| now.since(&self.created_at))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn test_timestamp() -> Timestamp {
        Timestamp::from_datetime(
            DateTime::parse_from_rfc3339("2025-07-01T12:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        )
    }

    fn test_task(name: &str, priority: Priority) -> Task {
        let details = TaskDraft::new(name, priority).validate().unwrap();
        Task::new(TaskId::new(1), details, test_timestamp())
    }

    // -------------------------------------------------------------------------
    // Name Validation Tests
    // -------------------------------------------------------------------------

    #[rstest]
    fn test_validate_name_trims_whitespace() {
        assert_eq!(validate_name(Some("  Write docs  ")).unwrap(), "Write docs");
    }

    #[rstest]
    #[case(None, TaskValidationError::MissingName)]
    #[case(Some(""), TaskValidationError::BlankName)]
    #[case(Some("   \t "), TaskValidationError::BlankName)]
    fn test_validate_name_rejects_absent_or_blank(
        #[case] name: Option<&str>,
        #[case] expected: TaskValidationError,
    ) {
        assert_eq!(validate_name(name).unwrap_err(), expected);
    }

    #[rstest]
    fn test_validate_name_accepts_maximum_length() {
        let name = "a".repeat(MAX_NAME_LENGTH);
        assert_eq!(validate_name(Some(&name)).unwrap().len(), MAX_NAME_LENGTH);
    }

    #[rstest]
    fn test_validate_name_rejects_too_long() {
        let name = "a".repeat(MAX_NAME_LENGTH + 1);
        assert_eq!(
            validate_name(Some(&name)).unwrap_err(),
            TaskValidationError::NameTooLong {
                max: MAX_NAME_LENGTH,
                actual: MAX_NAME_LENGTH + 1,
            }
        );
    }

    #[rstest]
    fn test_validate_name_counts_characters_not_bytes() {
        let name = "é".repeat(MAX_NAME_LENGTH);
        assert!(validate_name(Some(&name)).is_ok());
    }

    #[rstest]
    fn test_draft_without_priority_is_rejected() {
        let draft = TaskDraft {
            name: Some("Task".to_string()),
            due_date: None,
            priority: None,
        };
        assert_eq!(
            draft.validate().unwrap_err(),
            TaskValidationError::MissingPriority
        );
    }

    // -------------------------------------------------------------------------
    // Enum Tests
    // -------------------------------------------------------------------------

    #[rstest]
    fn test_priority_ordering_most_urgent_first() {
        assert!(Priority::High < Priority::Medium);
        assert!(Priority::Medium < Priority::Low);
    }

    #[rstest]
    #[case("HIGH", Priority::High)]
    #[case("medium", Priority::Medium)]
    #[case(" Low ", Priority::Low)]
    fn test_priority_from_str(#[case] input: &str, #[case] expected: Priority) {
        assert_eq!(input.parse::<Priority>().unwrap(), expected);
    }

    #[rstest]
    fn test_priority_from_str_rejects_unknown() {
        assert!("URGENT".parse::<Priority>().is_err());
    }

    #[rstest]
    fn test_completion_status_serializes_as_screaming_snake_case() {
        let json = serde_json::to_string(&CompletionStatus::NotDone).unwrap();
        assert_eq!(json, "\"NOT_DONE\"");
        assert_eq!(
            "not_done".parse::<CompletionStatus>().unwrap(),
            CompletionStatus::NotDone
        );
    }

    // -------------------------------------------------------------------------
    // Task Tests
    // -------------------------------------------------------------------------

    #[rstest]
    fn test_task_new_is_not_done() {
        let task = test_task("Test API", Priority::High);
        assert_eq!(task.status(), CompletionStatus::NotDone);
        assert!(task.completed_at().is_none());
        assert_eq!(task.created_at(), test_timestamp());
    }

    #[rstest]
    fn test_with_status_done_records_completion_time() {
        let completed_at = test_timestamp().plus(Duration::seconds(100));
        let task = test_task("Test", Priority::Low).with_status(CompletionStatus::Done, completed_at);

        assert!(task.is_done());
        assert_eq!(task.completed_at(), Some(completed_at));
        assert!(task.completed_at().unwrap() >= task.created_at());
    }

    #[rstest]
    #[case(1)]
    #[case(3600)]
    fn test_with_status_done_before_creation_clamps_to_creation(#[case] seconds_early: i64) {
        let early = test_timestamp().plus(Duration::seconds(-seconds_early));
        let task = test_task("Test", Priority::Low).with_status(CompletionStatus::Done, early);

        assert_eq!(task.completed_at(), Some(task.created_at()));
        assert_eq!(task.time_to_complete(), Some(Duration::zero()));
    }

    #[rstest]
    fn test_with_status_not_done_clears_completion_time() {
        let task = test_task("Test", Priority::Low)
            .with_status(CompletionStatus::Done, test_timestamp().plus(Duration::seconds(5)))
            .with_status(CompletionStatus::NotDone, test_timestamp().plus(Duration::seconds(9)));

        assert!(!task.is_done());
        assert!(task.completed_at().is_none());
    }

    #[rstest]
    fn test_with_status_same_status_keeps_completion_time() {
        let first = test_timestamp().plus(Duration::seconds(5));
        let task = test_task("Test", Priority::Low)
            .with_status(CompletionStatus::Done, first)
            .with_status(CompletionStatus::Done, first.plus(Duration::seconds(60)));

        assert_eq!(task.completed_at(), Some(first));
    }

    #[rstest]
    fn test_with_details_keeps_status_and_timestamps() {
        let completed_at = test_timestamp().plus(Duration::seconds(5));
        let task = test_task("Old", Priority::Low).with_status(CompletionStatus::Done, completed_at);
        let details = TaskDraft::new("New", Priority::High)
            .with_due_date(NaiveDate::from_ymd_opt(2025, 8, 4).unwrap())
            .validate()
            .unwrap();

        let updated = task.with_details(details);

        assert_eq!(updated.name(), "New");
        assert_eq!(updated.priority(), Priority::High);
        assert_eq!(updated.due_date(), NaiveDate::from_ymd_opt(2025, 8, 4));
        assert_eq!(updated.completed_at(), Some(completed_at));
        assert_eq!(updated.created_at(), test_timestamp());
    }

    #[rstest]
    fn test_completion_duration_done_ignores_now() {
        let task = test_task("Test", Priority::High)
            .with_status(CompletionStatus::Done, test_timestamp().plus(Duration::seconds(100)));
        let much_later = test_timestamp().plus(Duration::days(3));

        assert_eq!(task.completion_duration(&much_later), Duration::seconds(100));
    }

    #[rstest]
    fn test_completion_duration_not_done_uses_now() {
        let task = test_task("Test", Priority::High);
        let now = test_timestamp().plus(Duration::seconds(42));

        assert_eq!(task.completion_duration(&now), Duration::seconds(42));
        assert!(task.time_to_complete().is_none());
    }
}
