//! Page arithmetic and the windowed page-number bar.

use std::fmt;
use std::ops::{Range, RangeInclusive};

/// Numbered buttons shown per window
pub const WINDOW_WIDTH: usize = 10;

/// `ceil(total / size)`, zero for an empty set or a zero size
pub fn total_pages(total: usize, size: usize) -> usize {
    if size == 0 {
        return 0;
    }
    total.div_ceil(size)
}

/// Index range of 0-based `page` within `total` items, clamped to the end
pub fn page_range(total: usize, page: usize, size: usize) -> Range<usize> {
    let start = page.saturating_mul(size).min(total);
    let end = start.saturating_add(size).min(total);
    start..end
}

/// `items[page*size .. page*size+size]`, clamped
pub fn page_slice<T>(items: &[T], page: usize, size: usize) -> &[T] {
    &items[page_range(items.len(), page, size)]
}

/// Visible window of page buttons
///
/// `current` is 1-based, matching the numbers on the buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub current: usize,
    pub total_pages: usize,
    pub start: usize,
    pub end: usize,
}

impl PageWindow {
    pub fn new(current: usize, total_pages: usize) -> Self {
        let current = current.max(1);
        let start = (current - 1) / WINDOW_WIDTH * WINDOW_WIDTH + 1;
        let end = (start + WINDOW_WIDTH - 1).min(total_pages);
        Self {
            current,
            total_pages,
            start,
            end,
        }
    }

    /// Window for a 0-based page index
    pub fn for_index(page: usize, total_pages: usize) -> Self {
        Self::new(page + 1, total_pages)
    }

    /// Button numbers in this window, empty when there are no pages
    pub fn pages(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }

    pub fn has_previous(&self) -> bool {
        self.current > 1
    }

    pub fn has_next(&self) -> bool {
        self.current < self.total_pages
    }
}

impl fmt::Display for PageWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prev = if self.has_previous() { "« Prev" } else { "  ----" };
        write!(f, "{prev}")?;
        for n in self.pages() {
            if n == self.current {
                write!(f, " [{n}]")?;
            } else {
                write!(f, " {n}")?;
            }
        }
        let next = if self.has_next() { "Next »" } else { "----  " };
        write!(f, " {next}")
    }
}
