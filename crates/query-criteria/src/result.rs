//! Consumer-facing page of results.
//!
//! Criteria are translated and executed elsewhere. This trait only fixes the
//! shape that executors hand back, so callers can paginate without knowing
//! which store produced the page.

/// A page of results produced by executing criteria.
///
/// Implementors supply the items and the counters; the derived figures have
/// default implementations.
pub trait PaginatedResult {
    /// Item type.
    type Item;

    /// The items on the current page.
    fn items(&self) -> &[Self::Item];

    /// Total number of items across all pages.
    fn total(&self) -> u64;

    /// Items per page.
    fn per_page(&self) -> u64;

    /// Current page number, 1-based.
    fn current_page(&self) -> u64;

    /// Last page number. At least 1, even when there are no items.
    fn last_page(&self) -> u64 {
        match self.per_page() {
            0 => 1,
            per_page => self.total().div_ceil(per_page).max(1),
        }
    }

    /// Returns `true` if there are pages after the current one.
    fn has_more_pages(&self) -> bool {
        self.current_page() < self.last_page()
    }

    /// Number of items on the current page.
    fn count(&self) -> usize {
        self.items().len()
    }

    /// Returns `true` if the current page is empty.
    fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Returns `true` if the current page has items.
    fn is_not_empty(&self) -> bool {
        !self.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Slice<'a> {
        items: &'a [u32],
        total: u64,
        per_page: u64,
        current_page: u64,
    }

    impl PaginatedResult for Slice<'_> {
        type Item = u32;

        fn items(&self) -> &[u32] {
            self.items
        }
        fn total(&self) -> u64 {
            self.total
        }
        fn per_page(&self) -> u64 {
            self.per_page
        }
        fn current_page(&self) -> u64 {
            self.current_page
        }
    }

    #[test]
    fn derived_figures() {
        let page = Slice {
            items: &[1, 2, 3],
            total: 53,
            per_page: 25,
            current_page: 1,
        };
        assert_eq!(page.last_page(), 3);
        assert!(page.has_more_pages());
        assert_eq!(page.count(), 3);
        assert!(page.is_not_empty());
    }

    #[test]
    fn last_page_of_empty_result() {
        let page = Slice {
            items: &[],
            total: 0,
            per_page: 25,
            current_page: 1,
        };
        assert_eq!(page.last_page(), 1);
        assert!(!page.has_more_pages());
        assert!(page.is_empty());
    }

    #[test]
    fn exact_multiple_has_no_extra_page() {
        let page = Slice {
            items: &[1],
            total: 50,
            per_page: 25,
            current_page: 2,
        };
        assert_eq!(page.last_page(), 2);
        assert!(!page.has_more_pages());
    }

    #[test]
    fn zero_per_page() {
        let page = Slice {
            items: &[],
            total: 10,
            per_page: 0,
            current_page: 1,
        };
        assert_eq!(page.last_page(), 1);
    }
}
