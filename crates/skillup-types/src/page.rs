//! Paginated list envelope and request parameters

use serde::{Deserialize, Serialize};
use std::fmt;

/// One page of a server-side (or locally sliced) list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,

    /// Zero-based page index
    #[serde(default, alias = "number")]
    pub page: u32,

    /// Requested page size
    #[serde(default)]
    pub size: u32,

    /// Total items across all pages
    #[serde(default)]
    pub total_elements: u64,

    /// Total number of pages
    #[serde(default)]
    pub total_pages: u32,

    /// Whether this is the first page
    #[serde(default)]
    pub first: bool,

    /// Whether this is the last page
    #[serde(default)]
    pub last: bool,
}

impl<T> Page<T> {
    /// Wrap an unpaginated result (e.g. a search) as a single page
    #[must_use]
    pub fn single(content: Vec<T>) -> Self {
        let len = content.len();
        Self {
            content,
            page: 0,
            size: u32::try_from(len).unwrap_or(u32::MAX),
            total_elements: len as u64,
            total_pages: 1,
            first: true,
            last: true,
        }
    }

    /// An empty first page
    #[must_use]
    pub const fn empty(size: u32) -> Self {
        Self {
            content: Vec::new(),
            page: 0,
            size,
            total_elements: 0,
            total_pages: 0,
            first: true,
            last: true,
        }
    }

    /// Whether a following page exists
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages
    }

    /// Whether a preceding page exists
    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.page > 0
    }
}

/// Sort order accepted by list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending
    Asc,
    /// Descending
    #[default]
    Desc,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        })
    }
}

/// Page selection sent with list requests
///
/// Values are signed so that out-of-range input from callers survives until
/// the protocol layer rejects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Zero-based page index
    pub page: i64,
    /// Items per page
    pub size: i64,
}

impl PageRequest {
    /// Build a page request
    #[must_use]
    pub const fn new(page: i64, size: i64) -> Self {
        Self { page, size }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 0, size: 10 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_page() {
        let page = Page::single(vec!["a", "b", "c"]);
        assert_eq!(page.size, 3);
        assert_eq!(page.total_elements, 3);
        assert_eq!(page.total_pages, 1);
        assert!(page.first && page.last);
        assert!(!page.has_next());
        assert!(!page.has_prev());
    }

    #[test]
    fn test_spring_style_page_number_alias() {
        let page: Page<u8> = serde_json::from_str(
            r#"{"content": [1, 2], "number": 2, "size": 2, "totalElements": 9, "totalPages": 5}"#,
        )
        .unwrap();
        assert_eq!(page.page, 2);
        assert!(page.has_next());
        assert!(page.has_prev());
    }

    #[test]
    fn test_sort_direction_display() {
        assert_eq!(SortDirection::default().to_string(), "desc");
        assert_eq!(SortDirection::Asc.to_string(), "asc");
    }
}
