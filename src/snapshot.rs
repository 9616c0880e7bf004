//! Measured layout snapshots.
//!
//! A snapshot is everything the fixed layout depends on, captured at one
//! instant: columns, rows, config and the measurements of the rendered table.
//! The CLI and the `compute_fixed_layout` wasm export evaluate snapshots
//! without a live host.

use serde::{Deserialize, Serialize};

use crate::config::TableConfig;
use crate::error::Result;
use crate::layout::{compute_positions, row_id, ColumnTree};
use crate::types::{Column, ColumnShadow, FixedPositionMap, Key, Measurements, ScrollMetrics};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSnapshot {
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub rows: Vec<serde_json::Value>,
    #[serde(default)]
    pub config: TableConfig,
    #[serde(default)]
    pub measurements: Measurements,
    /// Content viewport scroll state, for the shadow flags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<ScrollMetrics>,
}

/// Result of evaluating a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotLayout {
    pub positions: FixedPositionMap,
    pub shadow: ColumnShadow,
    pub is_fixed_header: bool,
    pub is_width_overflow: bool,
}

impl LayoutSnapshot {
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Self = serde_json::from_str(json)?;
        snapshot.config.validate()?;
        Ok(snapshot)
    }

    pub fn row_ids(&self) -> Vec<Option<Key>> {
        self.rows
            .iter()
            .map(|row| row_id(row, &self.config.row_key))
            .collect()
    }

    pub fn evaluate(&self) -> SnapshotLayout {
        let tree = ColumnTree::build(&self.columns);
        let positions = compute_positions(&tree, &self.row_ids(), &self.measurements, &self.config);
        let metrics = self.metrics.unwrap_or_default();
        let shadow = if tree.has_fixed_columns() {
            ColumnShadow::from_metrics(&metrics)
        } else {
            ColumnShadow::default()
        };
        SnapshotLayout {
            positions,
            shadow,
            is_fixed_header: metrics.overflows_vertically(),
            is_width_overflow: metrics.overflows_horizontally(),
        }
    }
}
