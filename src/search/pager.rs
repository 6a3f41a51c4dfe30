//! Incremental pagination over a composed result list.
//!
//! Purely a view: no network activity. The intersection sentinel on the
//! client fires [`IncrementalPager::load_more`], including once immediately
//! on first render, which reveals the initial page.

use crate::models::TeacherListing;

/// Fixed-size incremental pager.
#[derive(Debug, Clone)]
pub struct IncrementalPager {
    items: Vec<TeacherListing>,
    visible: usize,
    page_size: usize,
}

impl IncrementalPager {
    pub fn new(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            visible: 0,
            page_size: page_size.max(1),
        }
    }

    /// Install a new composed list. Any new list identity resets the view to
    /// the first (empty) page; the next `load_more` reveals page one.
    pub fn set_list(&mut self, items: Vec<TeacherListing>) {
        self.items = items;
        self.visible = 0;
    }

    /// Reveal the next fixed-size slice. Returns the new visible length.
    pub fn load_more(&mut self) -> usize {
        self.visible = (self.visible + self.page_size).min(self.items.len());
        self.visible
    }

    /// Whether another `load_more` would reveal anything.
    pub fn has_more(&self) -> bool {
        self.visible < self.items.len()
    }

    /// The currently visible prefix.
    pub fn visible(&self) -> &[TeacherListing] {
        &self.items[..self.visible]
    }

    pub fn visible_len(&self) -> usize {
        self.visible
    }

    /// Total size of the composed list.
    pub fn total(&self) -> usize {
        self.items.len()
    }

    /// Grow the visible prefix to at least `target` (capped to the list).
    pub fn reveal_up_to(&mut self, target: usize) -> usize {
        while self.visible < target.min(self.items.len()) {
            self.load_more();
        }
        self.visible
    }
}
