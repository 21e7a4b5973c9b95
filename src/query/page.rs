//! Pagination: fixed-size page slicing and the compact page-number window
//! (with ellipses) rendered by navigation controls.

use serde::{Serialize, Serializer};

/// Window radius around the current page
const WINDOW_RADIUS: i64 = 2;

/// One slice of an ordered collection, 1-indexed
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
    pub total_pages: u32,
    pub has_prev: bool,
    pub has_next: bool,
}

impl<T> Page<T> {
    /// Slice an already-filtered, already-sorted collection.
    ///
    /// Pages are 1-indexed; a page beyond the end yields an empty item list
    /// with the counts intact.
    pub fn slice(items: Vec<T>, page: u32, per_page: u32) -> Self {
        let per_page = per_page.max(1);
        let page = page.max(1);
        let total = items.len() as u64;
        let total_pages = (total as u32).div_ceil(per_page);

        let start = ((page - 1) * per_page) as usize;
        let items: Vec<T> = items
            .into_iter()
            .skip(start)
            .take(per_page as usize)
            .collect();

        Self {
            items,
            page,
            per_page,
            total,
            total_pages,
            has_prev: page > 1,
            has_next: page < total_pages,
        }
    }

    /// Page-number marks for this slice's navigation controls
    pub fn window(&self) -> Vec<PageMark> {
        page_window(self.page, self.total_pages)
    }
}

/// A mark in the page-number strip: a page button or an ellipsis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMark {
    Page(u32),
    Ellipsis,
}

impl Serialize for PageMark {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PageMark::Page(n) => serializer.serialize_u32(*n),
            PageMark::Ellipsis => serializer.serialize_str("..."),
        }
    }
}

/// Compute the visible page-number strip.
///
/// Emits page 1; an ellipsis if the window start exceeds page 2; all pages
/// within the radius of `current` clamped to `[2, total - 1]`; an ellipsis if
/// the window end is below `total - 1`; and the final page when more than one
/// page exists.
pub fn page_window(current: u32, total: u32) -> Vec<PageMark> {
    if total == 0 {
        return Vec::new();
    }

    let current = i64::from(current);
    let total = i64::from(total);
    let mut marks = Vec::new();

    marks.push(PageMark::Page(1));
    if current - WINDOW_RADIUS > 2 {
        marks.push(PageMark::Ellipsis);
    }

    let start = (current - WINDOW_RADIUS).max(2);
    let end = (current + WINDOW_RADIUS).min(total - 1);
    for page in start..=end {
        marks.push(PageMark::Page(page as u32));
    }

    if current + WINDOW_RADIUS < total - 1 {
        marks.push(PageMark::Ellipsis);
        marks.push(PageMark::Page(total as u32));
    } else if total > 1 {
        marks.push(PageMark::Page(total as u32));
    }

    marks
}
