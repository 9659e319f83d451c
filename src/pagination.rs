//! Page slicing for the posts index

use serde::Serialize;

/// Position within a paginated listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    /// 1-based page number
    pub current_page: usize,
    /// Always at least 1, even for an empty listing
    pub total_pages: usize,
}

impl Pagination {
    pub fn new(current_page: usize, total_pages: usize) -> Self {
        let total_pages = total_pages.max(1);
        Self {
            current_page: current_page.clamp(1, total_pages),
            total_pages,
        }
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// Number of pages needed for `count` items; never less than 1
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1)).max(1)
}

/// Items on one page plus the pagination state
#[derive(Debug, Clone, PartialEq)]
pub struct PageSlice<'a, T> {
    pub items: &'a [T],
    pub pagination: Pagination,
}

/// Slice out page `page` (1-based) of `items`.
///
/// Page 0 is treated as page 1. Pages past the end yield no items but still
/// report the real page count.
pub fn paginate<T>(items: &[T], page_size: usize, page: usize) -> PageSlice<'_, T> {
    let page_size = page_size.max(1);
    let total = total_pages(items.len(), page_size);
    let page = page.max(1);

    let start = (page - 1).saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());

    PageSlice {
        items: &items[start..end],
        pagination: Pagination {
            current_page: page,
            total_pages: total,
        },
    }
}

/// Route of a posts index page: page 1 is the listing root
pub fn page_path(base: &str, page: usize) -> String {
    let base = base.trim_matches('/');
    if page <= 1 {
        format!("{}/", base)
    } else {
        format!("{}/page/{}/", base, page)
    }
}
