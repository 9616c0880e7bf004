//! Per-cell class and offset decisions for frozen columns and rows.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::config::FixedRows;
use crate::types::{Column, FixedEdge, FixedPositionMap, Key};

/// Class names applied to frozen cells, rows and the content viewport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedClasses {
    pub left: String,
    pub right: String,
    pub last_left: String,
    pub first_right: String,
    pub left_shadow: String,
    pub right_shadow: String,
    pub top: String,
    pub bottom: String,
    pub first_bottom: String,
    pub without_border_bottom: String,
}

impl FixedClasses {
    pub fn with_prefix(prefix: &str) -> Self {
        let cell = format!("{prefix}-table__cell--fixed");
        let content = format!("{prefix}-table__content--scrollable-to");
        let row = format!("{prefix}-table__row--fixed");
        Self {
            left: format!("{cell}-left"),
            right: format!("{cell}-right"),
            last_left: format!("{cell}-left-last"),
            first_right: format!("{cell}-right-first"),
            left_shadow: format!("{content}-left"),
            right_shadow: format!("{content}-right"),
            top: format!("{row}-top"),
            bottom: format!("{row}-bottom"),
            first_bottom: format!("{row}-bottom-first"),
            without_border_bottom: format!("{prefix}-table__row--without-border-bottom"),
        }
    }
}

impl Default for FixedClasses {
    fn default() -> Self {
        Self::with_prefix(crate::config::DEFAULT_CLASS_PREFIX)
    }
}

/// Classes and inline offsets for one cell or row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CellFixedStyle {
    pub classes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<f64>,
}

impl CellFixedStyle {
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
            && self.left.is_none()
            && self.right.is_none()
            && self.top.is_none()
            && self.bottom.is_none()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Inline style declarations, e.g. `left: 80px;`
    pub fn css(&self) -> String {
        let mut out = String::new();
        for (prop, value) in [
            ("left", self.left),
            ("right", self.right),
            ("top", self.top),
            ("bottom", self.bottom),
        ] {
            if let Some(v) = value {
                if !out.is_empty() {
                    out.push(' ');
                }
                let _ = write!(out, "{prop}: {v}px;");
            }
        }
        out
    }

    fn push_if(&mut self, on: bool, class: &str) {
        if on {
            self.classes.push(class.to_string());
        }
    }
}

/// Style of a header/body cell belonging to `column`.
///
/// Empty when the column has no entry in the map.
pub fn column_fixed_style(
    column: &Column,
    index: usize,
    map: &FixedPositionMap,
    classes: &FixedClasses,
) -> CellFixedStyle {
    let Some(pos) = map.column(&column.key_or(index)) else {
        return CellFixedStyle::default();
    };
    let is_left = column.is_fixed(FixedEdge::Left);
    let is_right = column.is_fixed(FixedEdge::Right);

    let mut style = CellFixedStyle::default();
    style.push_if(is_left, &classes.left);
    style.push_if(is_right, &classes.right);
    style.push_if(is_left && pos.last_left_fixed_col, &classes.last_left);
    style.push_if(is_right && pos.first_right_fixed_col, &classes.first_right);
    if is_left {
        style.left = pos.left;
    }
    if is_right {
        style.right = pos.right;
    }
    style
}

/// Style of the body row at `row_index` out of `row_count`.
///
/// Empty when no frozen row band is configured.
pub fn row_fixed_style(
    row_id: Option<&Key>,
    row_index: usize,
    row_count: usize,
    fixed_rows: Option<FixedRows>,
    map: &FixedPositionMap,
    classes: &FixedClasses,
) -> CellFixedStyle {
    let Some(band) = fixed_rows.filter(|b| !b.is_empty()) else {
        return CellFixedStyle::default();
    };
    let bottom = band.bottom.min(row_count);
    let fixed_top = row_index < band.top;
    let fixed_bottom = row_index.saturating_add(bottom) >= row_count;
    let first_bottom = row_count.checked_sub(bottom);
    let pos = row_id.and_then(|id| map.row(id));

    let mut style = CellFixedStyle::default();
    style.push_if(fixed_top, &classes.top);
    style.push_if(fixed_bottom, &classes.bottom);
    style.push_if(first_bottom == Some(row_index), &classes.first_bottom);
    style.push_if(
        first_bottom.and_then(|f| f.checked_sub(1)) == Some(row_index),
        &classes.without_border_bottom,
    );
    if fixed_top {
        style.top = Some(pos.and_then(|p| p.top).unwrap_or(0.0));
    }
    if fixed_bottom {
        style.bottom = Some(pos.and_then(|p| p.bottom).unwrap_or(0.0));
    }
    style
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::types::FixedPosition;
    use test_case::test_case;

    fn map_with_row(id: i64, top: Option<f64>, bottom: Option<f64>) -> FixedPositionMap {
        let mut map = FixedPositionMap::new();
        map.rows.insert(
            Key::Index(id),
            FixedPosition {
                top,
                bottom,
                ..FixedPosition::default()
            },
        );
        map
    }

    #[test]
    fn test_class_names_follow_prefix() {
        let classes = FixedClasses::with_prefix("acme");
        assert_eq!(classes.left, "acme-table__cell--fixed-left");
        assert_eq!(classes.first_right, "acme-table__cell--fixed-right-first");
        assert_eq!(classes.right_shadow, "acme-table__content--scrollable-to-right");
        assert_eq!(classes.first_bottom, "acme-table__row--fixed-bottom-first");
    }

    #[test]
    fn test_column_style_left_boundary() {
        let col = Column::new("a").fixed(FixedEdge::Left);
        let mut map = FixedPositionMap::new();
        map.columns.insert(
            Key::from("a"),
            FixedPosition {
                left: Some(80.0),
                last_left_fixed_col: true,
                ..FixedPosition::default()
            },
        );
        let classes = FixedClasses::default();
        let style = column_fixed_style(&col, 0, &map, &classes);
        assert!(style.has_class(&classes.left));
        assert!(style.has_class(&classes.last_left));
        assert_eq!(style.left, Some(80.0));
        assert_eq!(style.right, None);
        assert_eq!(style.css(), "left: 80px;");
    }

    #[test]
    fn test_column_style_without_entry_is_empty() {
        let col = Column::new("a").fixed(FixedEdge::Left);
        let style = column_fixed_style(&col, 0, &FixedPositionMap::new(), &FixedClasses::default());
        assert!(style.is_empty());
    }

    // 5 rows, 1 frozen top row, 2 frozen bottom rows
    #[test_case(0, true, false, false, false ; "top row")]
    #[test_case(1, false, false, false, false ; "middle row")]
    #[test_case(2, false, false, false, true ; "row before bottom band")]
    #[test_case(3, false, true, true, false ; "first bottom row")]
    #[test_case(4, false, true, false, false ; "last row")]
    fn test_row_style_classes(index: usize, top: bool, bottom: bool, first: bool, no_border: bool) {
        let classes = FixedClasses::default();
        let style = row_fixed_style(
            None,
            index,
            5,
            Some(FixedRows::new(1, 2)),
            &FixedPositionMap::new(),
            &classes,
        );
        assert_eq!(style.has_class(&classes.top), top);
        assert_eq!(style.has_class(&classes.bottom), bottom);
        assert_eq!(style.has_class(&classes.first_bottom), first);
        assert_eq!(style.has_class(&classes.without_border_bottom), no_border);
    }

    #[test]
    fn test_oversized_bottom_band_covers_every_row() {
        let classes = FixedClasses::default();
        let band = Some(FixedRows::new(0, usize::MAX));
        for index in 0..3 {
            let style = row_fixed_style(None, index, 3, band, &FixedPositionMap::new(), &classes);
            assert!(style.has_class(&classes.bottom));
            assert_eq!(style.has_class(&classes.first_bottom), index == 0);
            assert!(!style.has_class(&classes.without_border_bottom));
        }
    }

    #[test]
    fn test_row_style_offsets_from_map() {
        let map = map_with_row(9, Some(40.0), None);
        let style = row_fixed_style(
            Some(&Key::Index(9)),
            0,
            3,
            Some(FixedRows::new(1, 0)),
            &map,
            &FixedClasses::default(),
        );
        assert_eq!(style.top, Some(40.0));
        assert_eq!(style.bottom, None);
        assert_eq!(style.css(), "top: 40px;");
    }

    #[test]
    fn test_row_style_without_band_is_empty() {
        let map = map_with_row(1, Some(0.0), None);
        let style = row_fixed_style(Some(&Key::Index(1)), 0, 3, None, &map, &FixedClasses::default());
        assert!(style.is_empty());
    }
}
