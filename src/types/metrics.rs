use serde::{Deserialize, Serialize};

/// Bounding box of a rendered element, in CSS pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }
}

/// Scroll geometry of the table content viewport
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollMetrics {
    pub scroll_left: f64,
    pub scroll_top: f64,
    pub scroll_width: f64,
    pub scroll_height: f64,
    pub client_width: f64,
    pub client_height: f64,
}

impl ScrollMetrics {
    /// Content is taller than the viewport (header must stay fixed)
    pub fn overflows_vertically(&self) -> bool {
        self.scroll_height > self.client_height
    }

    /// Content is wider than the viewport
    pub fn overflows_horizontally(&self) -> bool {
        self.scroll_width > self.client_width
    }
}

/// Whether the frozen column bands should paint their scroll shadow
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnShadow {
    pub left: bool,
    pub right: bool,
}

impl ColumnShadow {
    /// Shadow state for the current horizontal scroll offset.
    ///
    /// The left shadow shows as soon as anything scrolled under the left band;
    /// the right one until the viewport reaches the end of the content.
    pub fn from_metrics(metrics: &ScrollMetrics) -> Self {
        Self {
            left: metrics.scroll_left > 0.0,
            right: metrics.client_width + metrics.scroll_left < metrics.scroll_width,
        }
    }
}

/// Viewport position of the content area, used to place a virtual-scroll header
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HeaderPosition {
    pub top: f64,
    pub left: f64,
}
