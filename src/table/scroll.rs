//! Affixed header scroll synchronisation.

use crate::host::TableSurface;

/// Keeps the affixed header scrolled to the same horizontal offset as the
/// content viewport, writing only when the offset changed.
#[derive(Debug, Default)]
pub struct HeaderScrollSync {
    last_left: Option<f64>,
}

impl HeaderScrollSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Propagate `left` to the affixed header unless it is the offset written
    /// last. Returns whether a write happened.
    pub fn sync(&mut self, left: f64, surface: &mut impl TableSurface) -> bool {
        if self
            .last_left
            .is_some_and(|last| (last - left).abs() <= f64::EPSILON)
        {
            return false;
        }
        self.last_left = Some(left);
        surface.set_affix_scroll_left(left);
        true
    }

    /// Forget the last offset so the next sync always writes
    pub fn reset(&mut self) {
        self.last_left = None;
    }

    pub fn last_left(&self) -> Option<f64> {
        self.last_left
    }
}
