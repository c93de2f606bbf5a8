// crates/dino_plugin/src/paging.rs
//! 3x3 item grids split into pages.

use std::ops::Range;

pub const COLUMNS: u32 = 3;
pub const ROWS: u32 = 3;
pub const PER_PAGE: usize = (COLUMNS * ROWS) as usize;

/// Paging for one menu screen and one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Paging {
    pub page: usize,
    pub page_count: usize,
    item_count: usize,
}

impl Paging {
    /// Clamps `requested` into the valid page range for `item_count` items.
    pub fn new(item_count: usize, requested: usize) -> Self {
        let page_count = item_count.div_ceil(PER_PAGE);
        let page = requested.min(page_count.saturating_sub(1));
        Self { page, page_count, item_count }
    }

    pub fn has_prev(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self) -> bool {
        self.page + 1 < self.page_count
    }

    /// Indices (into the filtered item list) shown on the current page.
    pub fn visible(&self) -> Range<usize> {
        let start = self.page * PER_PAGE;
        start.min(self.item_count)..(start + PER_PAGE).min(self.item_count)
    }
}

/// Column and row of the `i`-th item on its page.
pub fn grid_cell(i: usize) -> (u32, u32) {
    let slot = (i % PER_PAGE) as u32;
    (slot % COLUMNS, slot / COLUMNS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_items_make_two_pages_and_clamp() {
        let p = Paging::new(10, 5);
        assert_eq!(p.page_count, 2);
        assert_eq!(p.page, 1);
        assert!(p.has_prev());
        assert!(!p.has_next());
        assert_eq!(p.visible(), 9..10);
    }

    #[test]
    fn first_page_only_offers_next() {
        let p = Paging::new(12, 0);
        assert!(!p.has_prev());
        assert!(p.has_next());
        assert_eq!(p.visible(), 0..9);
    }

    #[test]
    fn no_items_no_pages() {
        let p = Paging::new(0, 3);
        assert_eq!(p.page_count, 0);
        assert_eq!(p.page, 0);
        assert!(!p.has_prev() && !p.has_next());
        assert!(p.visible().is_empty());
    }

    #[test]
    fn cells_wrap_per_page() {
        assert_eq!(grid_cell(0), (0, 0));
        assert_eq!(grid_cell(5), (2, 1));
        assert_eq!(grid_cell(9), (0, 0));
    }
}
