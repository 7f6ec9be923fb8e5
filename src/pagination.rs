/// Fixed-size page slicing over ordered collections.
///
/// Pages are 1-based. Out-of-range page numbers clamp to the nearest valid
/// page instead of erroring: anything below 1 becomes page 1, anything past
/// the end becomes the last page. An empty collection has exactly one empty
/// page. Repeated calls over a static collection return identical results.
use serde::{Deserialize, Serialize};

/// Default page size for every list endpoint.
pub const DEFAULT_POSTS_PER_PAGE: u64 = 10;

/// Slices ordered collections into fixed-size pages.
#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    per_page: u64,
}

/// Location of one page within a collection, in SQL LIMIT/OFFSET terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBounds {
    /// Clamped 1-based page number
    pub number: u64,
    /// Total page count (at least 1)
    pub total_pages: u64,
    pub limit: i64,
    pub offset: i64,
}

/// One page of items plus the metadata the presentation layer renders
/// (page count, current page, neighbor existence).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: u64,
    pub total_pages: u64,
    pub total_items: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> Page<T> {
    pub fn from_bounds(items: Vec<T>, bounds: PageBounds, total_items: u64) -> Self {
        Self {
            items,
            number: bounds.number,
            total_pages: bounds.total_pages,
            total_items,
            has_next: bounds.number < bounds.total_pages,
            has_previous: bounds.number > 1,
        }
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_POSTS_PER_PAGE)
    }
}

impl Paginator {
    /// A page size of zero makes no sense; it is bumped to 1.
    pub fn new(per_page: u64) -> Self {
        Self {
            per_page: per_page.max(1),
        }
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    /// ceil(total_items / per_page), with a minimum of one page.
    pub fn total_pages(&self, total_items: u64) -> u64 {
        total_items.div_ceil(self.per_page).max(1)
    }

    /// Clamp a requested page number and translate it to LIMIT/OFFSET.
    /// The requested number is signed because it arrives from a query string.
    pub fn locate(&self, total_items: u64, requested: i64) -> PageBounds {
        let total_pages = self.total_pages(total_items);
        let number = if requested < 1 {
            1
        } else {
            (requested as u64).min(total_pages)
        };

        PageBounds {
            number,
            total_pages,
            limit: self.per_page as i64,
            offset: ((number - 1) * self.per_page) as i64,
        }
    }

    /// Slice an in-memory collection. Used by tests and anywhere the full
    /// ordered set is already materialized.
    pub fn paginate<T: Clone>(&self, items: &[T], requested: i64) -> Page<T> {
        let total_items = items.len() as u64;
        let bounds = self.locate(total_items, requested);
        let start = bounds.offset as usize;
        let end = (start + bounds.limit as usize).min(items.len());
        let slice = if start < items.len() {
            items[start..end].to_vec()
        } else {
            Vec::new()
        };

        Page::from_bounds(slice, bounds, total_items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_is_ceiling_of_items_over_size() {
        for per_page in 1..=7u64 {
            let paginator = Paginator::new(per_page);
            for n in 0..=45u64 {
                let items: Vec<u64> = (0..n).collect();
                let page = paginator.paginate(&items, 1);
                let expected = n.div_ceil(per_page).max(1);
                assert_eq!(page.total_pages, expected, "n={} per_page={}", n, per_page);
            }
        }
    }

    #[test]
    fn last_page_holds_the_remainder() {
        for per_page in 1..=7u64 {
            let paginator = Paginator::new(per_page);
            for n in 1..=45u64 {
                let items: Vec<u64> = (0..n).collect();
                let last = paginator.total_pages(n) as i64;
                let page = paginator.paginate(&items, last);
                let expected = if n % per_page == 0 { per_page } else { n % per_page };
                assert_eq!(
                    page.items.len() as u64,
                    expected,
                    "n={} per_page={}",
                    n,
                    per_page
                );
            }
        }
    }

    #[test]
    fn thirteen_items_split_ten_and_three() {
        let paginator = Paginator::default();
        let items: Vec<u64> = (0..13).collect();

        let first = paginator.paginate(&items, 1);
        assert_eq!(first.items.len(), 10);
        assert!(first.has_next);
        assert!(!first.has_previous);

        let second = paginator.paginate(&items, 2);
        assert_eq!(second.items, vec![10, 11, 12]);
        assert!(!second.has_next);
        assert!(second.has_previous);
    }

    #[test]
    fn out_of_range_pages_clamp_to_nearest_valid() {
        let paginator = Paginator::default();
        let items: Vec<u64> = (0..13).collect();

        // Past the end clamps to the last page.
        let third = paginator.paginate(&items, 3);
        let second = paginator.paginate(&items, 2);
        assert_eq!(third.number, 2);
        assert_eq!(third.items, second.items);

        // Below the start clamps to the first page.
        let zeroth = paginator.paginate(&items, 0);
        assert_eq!(zeroth.number, 1);
        let negative = paginator.paginate(&items, -4);
        assert_eq!(negative.number, 1);
    }

    #[test]
    fn empty_collection_yields_one_empty_page() {
        let paginator = Paginator::default();
        let items: Vec<u64> = Vec::new();

        let page = paginator.paginate(&items, 5);
        assert_eq!(page.number, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());
        assert!(!page.has_next);
        assert!(!page.has_previous);
    }

    #[test]
    fn repeated_reads_are_identical() {
        let paginator = Paginator::new(4);
        let items: Vec<u64> = (0..11).collect();

        let a = paginator.paginate(&items, 2);
        let b = paginator.paginate(&items, 2);
        assert_eq!(a.items, b.items);
        assert_eq!(a.number, b.number);
        assert_eq!(a.total_pages, b.total_pages);
    }

    #[test]
    fn bounds_translate_to_limit_offset() {
        let paginator = Paginator::default();
        let bounds = paginator.locate(13, 2);
        assert_eq!(
            bounds,
            PageBounds {
                number: 2,
                total_pages: 2,
                limit: 10,
                offset: 10,
            }
        );
    }
}
