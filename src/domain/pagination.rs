//! Offset-based pagination.
//!
//! [`paginate`] cuts one page out of an already filtered and ordered list and
//! reports the unsliced length as the total.

use thiserror::Error;

use super::ordering::SortOrder;

/// Reasons a page request is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageRequestError {
    #[error("Page index must not be negative (got {0})")]
    NegativePage(i64),

    #[error("Page size must be greater than 0 (got {0})")]
    NonPositiveSize(i64),
}

// =============================================================================
// Page Request
// =============================================================================

/// Zero-based page index, page size and the ordering to apply before slicing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    size: usize,
    sort: SortOrder,
}

impl PageRequest {
    /// Creates an unsorted page request.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError`] if `page` is negative or `size` is not
    /// positive.
    pub fn new(page: i64, size: i64) -> Result<Self, PageRequestError> {
        let page = usize::try_from(page).map_err(|_| PageRequestError::NegativePage(page))?;
        let size = usize::try_from(size)
            .ok()
            .filter(|size| *size > 0)
            .ok_or(PageRequestError::NonPositiveSize(size))?;

        Ok(Self {
            page,
            size,
            sort: SortOrder::unsorted(),
        })
    }

    /// Returns a new request with the given ordering.
    #[must_use]
    pub fn with_sort(self, sort: SortOrder) -> Self {
        Self { sort, ..self }
    }

    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    #[must_use]
    pub const fn sort(&self) -> &SortOrder {
        &self.sort
    }

    /// Returns the index of the first item on the page, or `None` if it
    /// does not fit in `usize`.
    #[must_use]
    pub const fn offset(&self) -> Option<usize> {
        self.page.checked_mul(self.size)
    }
}

// =============================================================================
// Page
// =============================================================================

/// One page of items plus the number of items across all pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub size: usize,
}

impl<T> Page<T> {
    /// Returns the total number of pages (0 if there are no items).
    #[must_use]
    pub const fn total_pages(&self) -> usize {
        if self.size == 0 {
            return 0;
        }
        self.total.div_ceil(self.size)
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page.saturating_add(1) < self.total_pages()
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 0
    }

    /// Transforms the items while keeping the page metadata.
    pub fn map<U, F>(self, function: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(function).collect(),
            total: self.total,
            page: self.page,
            size: self.size,
        }
    }
}

/// Returns the requested page of `ordered`.
///
/// A page that starts at or beyond the end is empty rather than an error.
/// The sort order carried by `request` is not applied here.
#[must_use]
pub fn paginate<T: Clone>(ordered: &[T], request: &PageRequest) -> Page<T> {
    let total = ordered.len();
    let start = request.offset().unwrap_or(usize::MAX).min(total);
    let end = start.saturating_add(request.size()).min(total);

    Page {
        items: ordered[start..end].to_vec(),
        total,
        page: request.page(),
        size: request.size(),
    }
}

// =============================================================================
// Tests
// =============================================================================
