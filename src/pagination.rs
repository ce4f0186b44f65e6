//! Page counting and the page-link window.

use crate::error::{HjrsError, Result};
use serde::{Deserialize, Serialize};

/// One slot in the rendered page-link row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageSlot {
    Page(u32),
    Ellipsis,
}

impl std::fmt::Display for PageSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Page(n) => write!(f, "{}", n),
            Self::Ellipsis => f.write_str("..."),
        }
    }
}

/// Window size of the page-link row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Layout {
    /// Up to five numbered links.
    #[default]
    Desktop,
    /// Up to three numbered links.
    Compact,
}

/// Number of pages for `total_count` results, at least 1.
pub fn page_count(total_count: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 1;
    }
    let pages = total_count.div_ceil(u64::from(page_size)).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Whether pagination controls are rendered at all.
pub fn shows_controls(page_count: u32) -> bool {
    page_count > 1
}

/// Page-link row for `current` out of `page_count` pages.
pub fn page_window(current: u32, page_count: u32, layout: Layout) -> Vec<PageSlot> {
    match layout {
        Layout::Desktop => desktop_window(current, page_count),
        Layout::Compact => compact_window(current, page_count),
    }
}

fn desktop_window(current: u32, total: u32) -> Vec<PageSlot> {
    use PageSlot::{Ellipsis, Page};

    if total <= 5 {
        return (1..=total).map(Page).collect();
    }

    let mut slots = Vec::with_capacity(7);
    if current <= 3 {
        slots.extend((1..=4).map(Page));
        slots.push(Ellipsis);
        slots.push(Page(total));
    } else if current >= total - 2 {
        slots.push(Page(1));
        slots.push(Ellipsis);
        slots.extend((total - 3..=total).map(Page));
    } else {
        slots.push(Page(1));
        slots.push(Ellipsis);
        slots.extend((current - 1..=current + 1).map(Page));
        slots.push(Ellipsis);
        slots.push(Page(total));
    }
    slots
}

fn compact_window(current: u32, total: u32) -> Vec<PageSlot> {
    use PageSlot::{Ellipsis, Page};

    if total <= 3 {
        return (1..=total).map(Page).collect();
    }

    let mut slots = Vec::with_capacity(5);
    if current <= 2 {
        slots.extend((1..=2).map(Page));
        slots.push(Ellipsis);
        slots.push(Page(total));
    } else if current >= total - 1 {
        slots.push(Page(1));
        slots.push(Ellipsis);
        slots.extend((total - 1..=total).map(Page));
    } else {
        slots.push(Page(1));
        slots.push(Ellipsis);
        slots.push(Page(current));
        slots.push(Ellipsis);
        slots.push(Page(total));
    }
    slots
}

/// 1-based `(first, last)` result numbers shown on `page`.
///
/// Returns `(0, 0)` when there are no results.
pub fn showing_range(page: u32, page_size: u32, total_count: u64) -> (u64, u64) {
    if total_count == 0 {
        return (0, 0);
    }
    let page = u64::from(page.max(1));
    let size = u64::from(page_size);
    let first = (page - 1) * size + 1;
    let last = (page * size).min(total_count);
    (first.min(total_count), last)
}

/// Accept a requested page only if it exists among `page_count` pages.
pub fn check_page(page: u32, page_count: u32) -> Result<u32> {
    if page < 1 || page > page_count {
        return Err(HjrsError::InvalidQuery(format!(
            "Page {} out of range (1-{})",
            page, page_count
        )));
    }
    Ok(page)
}
