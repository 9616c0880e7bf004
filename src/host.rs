//! Collaborators owned by the rendering environment.
//!
//! The table view never touches the DOM directly. It reads measurements
//! through [`TableSurface`], subscribes to scroll/resize notifications through
//! [`EventSource`], and defers work to the next rendering tick through
//! [`TickSource`]. The wasm build implements all three over `web-sys`; tests
//! use an in-memory host.

use crate::config::DEFAULT_SCROLLBAR_WIDTH;
use crate::error::Result;
use crate::types::{MeasuredCell, Measurements, Rect, ScrollMetrics};

/// Read access to the rendered table
pub trait TableSurface {
    /// Header rows (`thead > tr`), each a list of measured header cells
    fn header_rows(&self) -> Vec<Vec<MeasuredCell>>;

    /// Heights of the body rows (`tbody > tr`) in render order
    fn body_row_heights(&self) -> Vec<f64>;

    /// Height of `thead`, if rendered
    fn header_height(&self) -> Option<f64>;

    /// Height of `tfoot`, if rendered
    fn footer_height(&self) -> Option<f64>;

    /// Scroll geometry of the content viewport, if mounted
    fn content_metrics(&self) -> Option<ScrollMetrics>;

    /// Bounding box of the content viewport, if mounted
    fn content_rect(&self) -> Option<Rect>;

    /// Rendered height of the affixed header, if any
    fn affix_header_height(&self) -> Option<f64>;

    /// Scroll the affixed header horizontally
    fn set_affix_scroll_left(&mut self, left: f64);

    /// Width of the platform's vertical scrollbar
    fn scrollbar_width(&self) -> f64 {
        DEFAULT_SCROLLBAR_WIDTH
    }

    /// Everything the layout passes need, in one read
    fn measure(&self) -> Measurements {
        Measurements {
            header_rows: self.header_rows(),
            row_heights: self.body_row_heights(),
            header_height: self.header_height(),
            footer_height: self.footer_height(),
        }
    }
}

/// Notifications the table view subscribes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Listen {
    /// `resize` on the window
    WindowResize,
    /// `scroll` on the document (affixed header visibility)
    DocumentScroll,
    /// `scroll` on the table content viewport
    ContentScroll,
}

/// Handle of a registered listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Subscription side of the host
pub trait EventSource {
    fn listen(&mut self, kind: Listen) -> Result<ListenerId>;
    fn unlisten(&mut self, id: ListenerId);
}

/// Handle of a requested tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(pub i64);

/// Deferral side of the host: run something once the current render committed.
///
/// When the tick fires, the host calls [`FixedTable::on_tick`](crate::FixedTable::on_tick).
pub trait TickSource {
    fn request_tick(&mut self) -> Result<TickHandle>;
    fn cancel_tick(&mut self, handle: TickHandle);
}

/// A complete host for [`FixedTable`](crate::FixedTable)
pub trait Host: TableSurface + EventSource + TickSource {}

impl<T: TableSurface + EventSource + TickSource> Host for T {}

/// Event delivered by a host to the table view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    Resize,
    DocumentScroll,
    ContentScroll,
    Tick,
}

impl From<Listen> for HostEvent {
    fn from(kind: Listen) -> Self {
        match kind {
            Listen::WindowResize => Self::Resize,
            Listen::DocumentScroll => Self::DocumentScroll,
            Listen::ContentScroll => Self::ContentScroll,
        }
    }
}
