//! Offset pagination.

use serde::{Deserialize, Serialize};

/// Default page size when the caller does not pass `limit`.
pub const DEFAULT_LIMIT: u32 = 10;

/// Largest accepted page size.
pub const MAX_LIMIT: u32 = 20;

/// A 1-based page request.
///
/// Bounds (`page >= 1`, `limit` in `1..=MAX_LIMIT`) are enforced by the API
/// layer before a `Page` is built; storage only turns it into LIMIT/OFFSET.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// 1-based page number.
    pub page: u64,
    /// Items per page.
    pub limit: u32,
}

impl Page {
    /// Create a page request.
    #[must_use]
    pub const fn new(page: u64, limit: u32) -> Self {
        Self { page, limit }
    }

    /// Zero-based row offset: `(page - 1) * limit`, saturating.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.page
            .saturating_sub(1)
            .saturating_mul(u64::from(self.limit))
    }

    /// Page size as a row count.
    #[must_use]
    pub fn limit(&self) -> u64 {
        u64::from(self.limit)
    }

    /// Slice an already ordered sequence down to this page.
    pub fn apply<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        let skip = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(self.limit).unwrap_or(usize::MAX);
        items.into_iter().skip(skip).take(take).collect()
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(1, DEFAULT_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_starts_at_zero() {
        assert_eq!(Page::new(1, 10).offset(), 0);
    }

    #[test]
    fn offset_is_page_minus_one_times_limit() {
        assert_eq!(Page::new(3, 20).offset(), 40);
        assert_eq!(Page::new(2, 7).offset(), 7);
    }

    #[test]
    fn offset_saturates_for_far_pages() {
        assert_eq!(Page::new(u64::MAX, 20).offset(), u64::MAX);
        assert!(Page::new(5_000_000_000, 10).apply(1..=11).is_empty());
    }

    #[test]
    fn apply_slices_in_order() {
        let items: Vec<u32> = (1..=11).collect();
        assert_eq!(Page::new(1, 5).apply(items.clone()), vec![1, 2, 3, 4, 5]);
        assert_eq!(Page::new(3, 5).apply(items.clone()), vec![11]);
        assert!(Page::new(4, 5).apply(items).is_empty());
    }

    #[test]
    fn default_is_first_page_of_ten() {
        assert_eq!(Page::default(), Page::new(1, DEFAULT_LIMIT));
    }
}
