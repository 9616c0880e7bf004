//! Table configuration.
//!
//! Every layout-affecting table prop lives here as a named field with a
//! documented default, resolved once per recomputation.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StickyGridError};

/// Default row identity field
pub const DEFAULT_ROW_KEY: &str = "id";

/// Default CSS class prefix
pub const DEFAULT_CLASS_PREFIX: &str = "t";

/// Scrollbar width assumed until the host measures the real one (px)
pub const DEFAULT_SCROLLBAR_WIDTH: f64 = 6.0;

/// Frozen row band: number of leading and trailing rows pinned to the
/// top/bottom of the viewport.
///
/// Serialized as `[top, bottom]`; a missing bottom count means zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<usize>", into = "Vec<usize>")]
pub struct FixedRows {
    pub top: usize,
    pub bottom: usize,
}

impl FixedRows {
    pub fn new(top: usize, bottom: usize) -> Self {
        Self { top, bottom }
    }

    pub fn is_empty(&self) -> bool {
        self.top == 0 && self.bottom == 0
    }
}

impl From<Vec<usize>> for FixedRows {
    fn from(v: Vec<usize>) -> Self {
        Self {
            top: v.first().copied().unwrap_or(0),
            bottom: v.get(1).copied().unwrap_or(0),
        }
    }
}

impl From<FixedRows> for Vec<usize> {
    fn from(rows: FixedRows) -> Self {
        vec![rows.top, rows.bottom]
    }
}

/// Body scrolling mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollType {
    #[default]
    Lazy,
    /// Virtual scroll: the header cannot use CSS sticky and is positioned by hand
    Virtual,
}

/// CSS `table-layout`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableLayout {
    #[default]
    Fixed,
    Auto,
}

/// Layout-affecting props of a table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableConfig {
    /// Field holding a row's identity; dotted paths reach into nested objects
    pub row_key: String,
    /// Frozen top/bottom row band
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_rows: Option<FixedRows>,
    pub bordered: bool,
    /// Header sticks to the top of the page once the table header scrolls away
    pub header_affixed_top: bool,
    pub scroll_type: ScrollType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_height: Option<f64>,
    pub table_layout: TableLayout,
    /// Explicit content width (CSS length), when the table is wider than its box
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_content_width: Option<String>,
    pub class_prefix: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            row_key: DEFAULT_ROW_KEY.to_string(),
            fixed_rows: None,
            bordered: false,
            header_affixed_top: false,
            scroll_type: ScrollType::Lazy,
            max_height: None,
            table_layout: TableLayout::Fixed,
            table_content_width: None,
            class_prefix: DEFAULT_CLASS_PREFIX.to_string(),
        }
    }
}

impl TableConfig {
    /// Parse a config from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the layout passes cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.row_key.trim().is_empty() {
            return Err(StickyGridError::Config("rowKey must not be empty".into()));
        }
        if let Some(h) = self.max_height {
            if !h.is_finite() || h < 0.0 {
                return Err(StickyGridError::Config(format!(
                    "maxHeight must be a non-negative number, got {h}"
                )));
            }
        }
        Ok(())
    }

    /// Frozen row band, `(0, 0)` when none is configured
    pub fn fixed_rows_band(&self) -> FixedRows {
        self.fixed_rows.unwrap_or_default()
    }

    pub fn has_fixed_rows(&self) -> bool {
        !self.fixed_rows_band().is_empty()
    }

    pub fn is_virtual_scroll(&self) -> bool {
        self.scroll_type == ScrollType::Virtual
    }

    /// Header cell widths are only needed by an affixed or virtual-scroll header
    pub fn needs_th_widths(&self) -> bool {
        self.header_affixed_top || self.is_virtual_scroll()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_json() {
        let config = TableConfig::from_json("{}").unwrap();
        assert_eq!(config, TableConfig::default());
        assert_eq!(config.row_key, "id");
        assert!(!config.needs_th_widths());
        assert_eq!(config.fixed_rows_band(), FixedRows::new(0, 0));
    }

    #[test]
    fn test_fixed_rows_accepts_short_array() {
        let config = TableConfig::from_json(r#"{"fixedRows":[2]}"#).unwrap();
        assert_eq!(config.fixed_rows, Some(FixedRows::new(2, 0)));
        assert!(config.has_fixed_rows());

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains(r#""fixedRows":[2,0]"#));
    }

    #[test]
    fn test_virtual_scroll_needs_th_widths() {
        let config = TableConfig::from_json(r#"{"scrollType":"virtual"}"#).unwrap();
        assert!(config.needs_th_widths());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(TableConfig::from_json(r#"{"rowKey":" "}"#).is_err());
        assert!(TableConfig::from_json(r#"{"maxHeight":-1}"#).is_err());
        let err = TableConfig::from_json(r#"{"maxHeight":-1}"#).unwrap_err();
        assert!(matches!(err, StickyGridError::Config(_)));
    }
}
