//! Domain module for task management.
//!
//! This module holds the task entity and the pure query logic run over a
//! record set: filtering, ordering, pagination and completion metrics.

pub mod criteria;
pub mod metrics;
pub mod ordering;
pub mod pagination;
pub mod task;

pub use criteria::{FilterCriteria, filter_tasks};
pub use metrics::{ALL_LABEL, CompletionMetrics, compute_metrics};
pub use ordering::{SortDirection, SortField, SortKey, SortOrder, SortParseError};
pub use pagination::{Page, PageRequest, PageRequestError, paginate};
pub use task::{
    CompletionStatus, MAX_NAME_LENGTH, Priority, Task, TaskDetails, TaskDraft, TaskId,
    TaskValidationError, Timestamp, UnknownVariant,
};
