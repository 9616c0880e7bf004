use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Key;

/// Helper function for serde skip_serializing_if
pub(crate) fn is_false(b: &bool) -> bool {
    !b
}

/// Pinned position of one column or row.
///
/// Offsets are in CSS pixels measured from the edge the item is frozen to.
/// An offset that does not apply is left unset rather than zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedPosition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Index of the column among its siblings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    /// Last column of the left frozen band on its header level
    #[serde(default, skip_serializing_if = "is_false")]
    pub last_left_fixed_col: bool,
    /// First column of the right frozen band on its header level
    #[serde(default, skip_serializing_if = "is_false")]
    pub first_right_fixed_col: bool,
}

/// Fixed positions of every column and every frozen row of a table.
///
/// Columns and rows are kept in separate maps so a row id can never shadow a
/// column key. The map is always rebuilt whole; see
/// [`compute_positions`](crate::layout::compute_positions).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FixedPositionMap {
    pub columns: BTreeMap<Key, FixedPosition>,
    pub rows: BTreeMap<Key, FixedPosition>,
}

impl FixedPositionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn column(&self, key: &Key) -> Option<&FixedPosition> {
        self.columns.get(key)
    }

    pub fn row(&self, key: &Key) -> Option<&FixedPosition> {
        self.rows.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.rows.is_empty()
    }

    pub fn clear(&mut self) {
        self.columns.clear();
        self.rows.clear();
    }

    /// Entry for a row, created empty when missing
    pub(crate) fn row_entry(&mut self, key: Key) -> &mut FixedPosition {
        self.rows.entry(key).or_default()
    }
}
