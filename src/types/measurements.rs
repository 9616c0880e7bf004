use serde::{Deserialize, Serialize};

use super::Key;

/// A rendered header cell (`th`) and its measured width
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasuredCell {
    /// Value of the cell's `data-colkey` attribute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub col_key: Option<Key>,
    /// Visible text, only used for diagnostics
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub width: f64,
}

impl MeasuredCell {
    pub fn new(col_key: impl Into<Key>, width: f64) -> Self {
        Self {
            col_key: Some(col_key.into()),
            label: String::new(),
            width,
        }
    }
}

/// Everything the layout passes read from the rendered table.
///
/// Anything the host could not measure (not rendered yet) is simply absent
/// and treated as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurements {
    /// Header rows (`thead > tr`), each a list of header cells
    #[serde(default)]
    pub header_rows: Vec<Vec<MeasuredCell>>,
    /// Body row heights (`tbody > tr`), in render order
    #[serde(default)]
    pub row_heights: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer_height: Option<f64>,
}

impl Measurements {
    pub fn row_height(&self, index: usize) -> f64 {
        self.row_heights.get(index).copied().unwrap_or(0.0)
    }
}
