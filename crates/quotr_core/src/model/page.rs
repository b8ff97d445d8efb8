//! Page-number pagination shared by list use-cases.
//!
//! # Invariants
//! - Page numbers are 1-based.
//! - Page 1 always exists, even for an empty result.
//! - Any other page outside `1..=num_pages` does not exist.

use serde::{Deserialize, Serialize};

/// Fixed number of records per list page.
pub const PAGE_SIZE: u32 = 20;

/// Requested 1-based page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    number: u32,
}

/// SQL `LIMIT`/`OFFSET` pair for one resolved page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub limit: u32,
    pub offset: u64,
}

impl PageRequest {
    pub fn new(number: u32) -> Self {
        Self { number }
    }

    pub fn first() -> Self {
        Self::new(1)
    }

    pub fn number(self) -> u32 {
        self.number
    }

    /// Resolves the storage window for this page against `total_count`.
    ///
    /// Returns `None` when the page does not exist.
    pub fn window(self, total_count: u64) -> Option<PageWindow> {
        if self.number == 0 || self.number > num_pages(total_count) {
            return None;
        }
        Some(PageWindow {
            limit: PAGE_SIZE,
            offset: u64::from(self.number - 1) * u64::from(PAGE_SIZE),
        })
    }
}

/// One page of ordered results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: u32,
    pub total_count: u64,
    pub num_pages: u32,
    pub has_previous: bool,
    pub has_next: bool,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total_count: u64) -> Self {
        let num_pages = num_pages(total_count);
        Self {
            items,
            number: request.number,
            total_count,
            num_pages,
            has_previous: request.number > 1,
            has_next: request.number < num_pages,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn num_pages(total_count: u64) -> u32 {
    if total_count == 0 {
        return 1;
    }
    let pages = total_count.div_ceil(u64::from(PAGE_SIZE));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::{Page, PageRequest, PageWindow, PAGE_SIZE};

    #[test]
    fn first_page_of_empty_result_exists() {
        assert_eq!(
            PageRequest::first().window(0),
            Some(PageWindow {
                limit: PAGE_SIZE,
                offset: 0,
            })
        );
        assert_eq!(PageRequest::new(2).window(0), None);
    }

    #[test]
    fn page_zero_never_exists() {
        assert_eq!(PageRequest::new(0).window(100), None);
    }

    #[test]
    fn last_partial_page_is_addressable() {
        let window = PageRequest::new(3).window(41).unwrap();
        assert_eq!(window.offset, 40);
        assert_eq!(PageRequest::new(4).window(41), None);
        assert_eq!(PageRequest::new(2).window(40).unwrap().offset, 20);
        assert_eq!(PageRequest::new(3).window(40), None);
    }

    #[test]
    fn page_flags_follow_position() {
        let page = Page::new(vec![1, 2], PageRequest::new(2), 45);
        assert_eq!(page.num_pages, 3);
        assert!(page.has_previous);
        assert!(page.has_next);

        let empty: Page<i32> = Page::new(Vec::new(), PageRequest::first(), 0);
        assert!(empty.is_empty());
        assert!(!empty.has_previous);
        assert!(!empty.has_next);
    }
}
