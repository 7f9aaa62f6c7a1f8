//! Multi-key ordering of tasks.
//!
//! A [`SortOrder`] is an ordered list of [`SortKey`]s compared
//! lexicographically. Each key compares one [`SortField`] in its own
//! [`SortDirection`]. Absent values (a task without a due date) always sort
//! after present ones, whatever the direction.
//!
//! Sorting uses a stable algorithm, so tasks that are equal on every key keep
//! their input order, and an empty `SortOrder` leaves the input untouched.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::task::Task;

// =============================================================================
// Errors
// =============================================================================

/// Errors produced while reading sort keys from their textual form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SortParseError {
    /// The field has no comparator.
    #[error("Unsupported sort field: '{0}'")]
    UnsupportedField(String),

    /// The direction is neither ascending nor descending.
    #[error("Invalid sort direction: '{0}' (expected ASC or DESC)")]
    InvalidDirection(String),

    /// More directions were given than there are fields to apply them to.
    #[error("{directions} sort direction(s) given for {fields} sort field(s)")]
    UnmatchedDirections { fields: usize, directions: usize },
}

// =============================================================================
// Sort Keys
// =============================================================================

/// The task fields that can be sorted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    DueDate,
    Priority,
}

impl SortField {
    /// Returns the wire name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DueDate => "dueDate",
            Self::Priority => "priority",
        }
    }

    fn compare(self, left: &Task, right: &Task, direction: SortDirection) -> Ordering {
        match self {
            Self::DueDate => compare_nulls_last(left.due_date(), right.due_date(), direction),
            Self::Priority => {
                compare_nulls_last(Some(left.priority()), Some(right.priority()), direction)
            }
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = SortParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "dueDate" => Ok(Self::DueDate),
            "priority" => Ok(Self::Priority),
            other => Err(SortParseError::UnsupportedField(other.to_string())),
        }
    }
}

/// Sort direction of a single key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

impl FromStr for SortDirection {
    type Err = SortParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "ASC" | "ASCENDING" => Ok(Self::Ascending),
            "DESC" | "DESCENDING" => Ok(Self::Descending),
            _ => Err(SortParseError::InvalidDirection(value.to_string())),
        }
    }
}

/// A `(field, direction)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortKey {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortKey {
    #[must_use]
    pub const fn ascending(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Ascending,
        }
    }

    #[must_use]
    pub const fn descending(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Descending,
        }
    }

    /// Compares two tasks on this key alone.
    #[must_use]
    pub fn compare(&self, left: &Task, right: &Task) -> Ordering {
        self.field.compare(left, right, self.direction)
    }
}

/// Orders present values by `direction` and puts absent values last.
fn compare_nulls_last<T: Ord>(
    left: Option<T>,
    right: Option<T>,
    direction: SortDirection,
) -> Ordering {
    match (left, right) {
        (Some(left), Some(right)) => direction.apply(left.cmp(&right)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

// =============================================================================
// Sort Order
// =============================================================================

/// An ordered list of sort keys. The first key decides unless tied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortOrder {
    keys: Vec<SortKey>,
}

impl SortOrder {
    /// Creates an order that leaves input untouched.
    #[must_use]
    pub const fn unsorted() -> Self {
        Self { keys: Vec::new() }
    }

    #[must_use]
    pub fn new(keys: Vec<SortKey>) -> Self {
        Self { keys }
    }

    /// Reads sort keys from comma-separated field and direction lists.
    ///
    /// Directions are matched to fields by position; a field without a
    /// matching direction, or with a blank one, sorts ascending. Blank
    /// entries in `fields` are skipped, so an empty or absent list yields
    /// [`SortOrder::unsorted`].
    ///
    /// # Errors
    ///
    /// Returns [`SortParseError::InvalidDirection`] for an unknown direction,
    /// [`SortParseError::UnmatchedDirections`] when there are more directions
    /// than fields, and [`SortParseError::UnsupportedField`] for an unknown
    /// field.
    pub fn parse(fields: Option<&str>, directions: Option<&str>) -> Result<Self, SortParseError> {
        let fields = split_list(fields);
        let directions = split_list(directions)
            .into_iter()
            .map(|token| {
                if token.is_empty() {
                    Ok(SortDirection::default())
                } else {
                    token.parse()
                }
            })
            .collect::<Result<Vec<SortDirection>, _>>()?;

        if directions.len() > fields.len() {
            return Err(SortParseError::UnmatchedDirections {
                fields: fields.len(),
                directions: directions.len(),
            });
        }

        let keys = fields
            .iter()
            .enumerate()
            .filter(|(_, field)| !field.is_empty())
            .map(|(index, field)| {
                Ok(SortKey {
                    field: field.parse()?,
                    direction: directions.get(index).copied().unwrap_or_default(),
                })
            })
            .collect::<Result<Vec<_>, SortParseError>>()?;

        Ok(Self { keys })
    }

    #[must_use]
    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    #[must_use]
    pub fn is_unsorted(&self) -> bool {
        self.keys.is_empty()
    }

    /// Compares two tasks lexicographically over all keys.
    #[must_use]
    pub fn compare(&self, left: &Task, right: &Task) -> Ordering {
        compare(left, right, &self.keys)
    }

    /// Sorts the tasks in place. Equal tasks keep their relative order.
    pub fn sort(&self, tasks: &mut [Task]) {
        if self.is_unsorted() {
            return;
        }
        tasks.sort_by(|left, right| self.compare(left, right));
    }
}

/// Splits a comma-separated list into trimmed tokens. A blank list has none.
fn split_list(list: Option<&str>) -> Vec<&str> {
    list.filter(|list| !list.trim().is_empty())
        .map(|list| list.split(',').map(str::trim).collect())
        .unwrap_or_default()
}

impl FromIterator<SortKey> for SortOrder {
    fn from_iter<I: IntoIterator<Item = SortKey>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Compares two tasks over `keys`, first key first.
#[must_use]
pub fn compare(left: &Task, right: &Task, keys: &[SortKey]) -> Ordering {
    keys.iter().fold(Ordering::Equal, |ordering, key| {
        ordering.then_with(|| key.compare(left, right))
    })
}

// =============================================================================
// Tests
// =============================================================================
