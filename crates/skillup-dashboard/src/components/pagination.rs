//! Footer for paginated tables

use skillup_types::Page;
use std::fmt;

/// Position within a paginated list
///
/// Page numbers are zero-based internally and shown one-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Zero-based current page
    pub page: u32,
    /// Items per page
    pub size: u32,
    /// Items across all pages
    pub total_elements: u64,
    /// Number of pages
    pub total_pages: u32,
}

impl Pagination {
    /// Footer for `page`, using `size` when the page does not report one
    pub fn of<T>(page: &Page<T>, size: u32) -> Self {
        Self {
            page: page.page,
            size: if page.size == 0 { size } else { page.size },
            total_elements: page.total_elements,
            total_pages: page.total_pages,
        }
    }

    /// Whether a previous page exists
    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.page > 0
    }

    /// Whether a next page exists
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages
    }

    /// One-based range of items on the current page
    #[must_use]
    pub fn showing(&self) -> (u64, u64) {
        if self.total_elements == 0 {
            return (0, 0);
        }
        let start = u64::from(self.page) * u64::from(self.size) + 1;
        let end = (start + u64::from(self.size) - 1).min(self.total_elements);
        (start.min(end), end)
    }
}

impl fmt::Display for Pagination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (start, end) = self.showing();
        write!(
            f,
            "Showing {start} to {end} of {} results | Page {} of {}",
            self.total_elements,
            self.page + 1,
            self.total_pages.max(1)
        )?;
        if self.has_prev() {
            write!(f, " | prev: --page {}", self.page)?;
        }
        if self.has_next() {
            write!(f, " | next: --page {}", self.page + 2)?;
        }
        Ok(())
    }
}
