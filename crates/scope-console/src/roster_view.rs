//! Roster paging and the live-feed troop cycler.

use std::ops::Range;

use scope_model::ROSTER_PAGE_SIZE;

/// Fixed-size window over the roster plus a row cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterPager {
    total: usize,
    page_size: usize,
    offset: usize,
    cursor: usize,
}

impl RosterPager {
    pub fn new(total: usize) -> Self {
        Self::with_page_size(total, ROSTER_PAGE_SIZE)
    }

    pub fn with_page_size(total: usize, page_size: usize) -> Self {
        Self {
            total,
            page_size: page_size.max(1),
            offset: 0,
            cursor: 0,
        }
    }

    pub fn visible_range(&self) -> Range<usize> {
        self.offset..(self.offset + self.page_size).min(self.total)
    }

    pub fn has_next(&self) -> bool {
        self.offset + self.page_size < self.total
    }

    pub fn has_previous(&self) -> bool {
        self.offset > 0
    }

    /// Returns `false` at the last page.
    pub fn next_page(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.offset += self.page_size;
        self.cursor = self.offset;
        true
    }

    /// Returns `false` at the first page.
    pub fn previous_page(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.offset = self.offset.saturating_sub(self.page_size);
        self.cursor = self.offset;
        true
    }

    /// Move the cursor down, turning the page when it leaves the window.
    pub fn cursor_down(&mut self) {
        if self.cursor + 1 >= self.total {
            return;
        }
        self.cursor += 1;
        if self.cursor >= self.offset + self.page_size {
            self.offset += self.page_size;
        }
    }

    pub fn cursor_up(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        if self.cursor < self.offset {
            self.offset = self.offset.saturating_sub(self.page_size);
        }
    }

    /// Roster index under the cursor, `None` for an empty roster.
    pub fn selected_index(&self) -> Option<usize> {
        (self.cursor < self.total).then_some(self.cursor)
    }

    /// "1-5 of 8"; "0-0 of 0" when empty.
    pub fn label(&self) -> String {
        let range = self.visible_range();
        if range.is_empty() {
            return format!("0-0 of {}", self.total);
        }
        format!("{}-{} of {}", range.start + 1, range.end, self.total)
    }
}

/// Rotating index over the active troops shown in the live feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedCycler {
    len: usize,
    index: usize,
}

impl FeedCycler {
    pub fn new(len: usize) -> Self {
        Self { len, index: 0 }
    }

    pub fn index(&self) -> Option<usize> {
        (self.len > 0).then_some(self.index)
    }

    pub fn next(&mut self) {
        if self.len == 0 {
            return;
        }
        self.index = (self.index + 1) % self.len;
    }

    pub fn previous(&mut self) {
        if self.len == 0 {
            return;
        }
        self.index = if self.index == 0 { self.len - 1 } else { self.index - 1 };
    }

    /// "TROOP 2/5"; "TROOP 0/0" when nothing is active.
    pub fn label(&self) -> String {
        match self.index() {
            Some(i) => format!("TROOP {}/{}", i + 1, self.len),
            None => "TROOP 0/0".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pager_clamps_at_both_ends() {
        let mut p = RosterPager::new(8);
        assert_eq!(p.label(), "1-5 of 8");
        assert!(!p.previous_page());
        assert!(p.next_page());
        assert_eq!(p.visible_range(), 5..8);
        assert_eq!(p.label(), "6-8 of 8");
        assert!(!p.next_page());
        assert!(p.previous_page());
        assert_eq!(p.label(), "1-5 of 8");
    }

    #[test]
    fn pager_cursor_turns_pages() {
        let mut p = RosterPager::new(8);
        for _ in 0..5 {
            p.cursor_down();
        }
        assert_eq!(p.selected_index(), Some(5));
        assert_eq!(p.visible_range(), 5..8);
        for _ in 0..10 {
            p.cursor_down();
        }
        assert_eq!(p.selected_index(), Some(7));
        p.cursor_up();
        p.cursor_up();
        p.cursor_up();
        assert_eq!(p.selected_index(), Some(4));
        assert_eq!(p.visible_range(), 0..5);
    }

    #[test]
    fn empty_pager() {
        let mut p = RosterPager::new(0);
        assert_eq!(p.label(), "0-0 of 0");
        assert_eq!(p.selected_index(), None);
        p.cursor_down();
        assert!(!p.next_page());
    }

    #[test]
    fn cycler_wraps() {
        let mut c = FeedCycler::new(5);
        assert_eq!(c.label(), "TROOP 1/5");
        c.previous();
        assert_eq!(c.index(), Some(4));
        c.next();
        assert_eq!(c.index(), Some(0));
        c.next();
        assert_eq!(c.label(), "TROOP 2/5");
    }

    #[test]
    fn empty_cycler_is_noop() {
        let mut c = FeedCycler::new(0);
        c.next();
        c.previous();
        assert_eq!(c.index(), None);
        assert_eq!(c.label(), "TROOP 0/0");
    }
}
