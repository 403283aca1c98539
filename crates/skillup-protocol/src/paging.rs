//! Slice an in-memory list into a [`Page`]

use skillup_types::Page;

/// Page `index` (zero based) of `items`, `size` per page
///
/// An index past the end yields an empty page that still reports the true
/// totals. A zero size yields an empty page.
#[must_use]
pub fn paginate<T: Clone>(items: &[T], index: u32, size: u32) -> Page<T> {
    let total = items.len();
    if size == 0 {
        return Page {
            total_elements: total as u64,
            ..Page::empty(0)
        };
    }

    let per_page = size as usize;
    let total_pages = u32::try_from(total.div_ceil(per_page)).unwrap_or(u32::MAX);
    let start = (index as usize).saturating_mul(per_page).min(total);
    let end = start.saturating_add(per_page).min(total);

    Page {
        content: items[start..end].to_vec(),
        page: index,
        size,
        total_elements: total as u64,
        total_pages,
        first: index == 0,
        last: index.saturating_add(1) >= total_pages,
    }
}
