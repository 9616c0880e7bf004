//! Layout engine for fixed (sticky) columns and rows.
//!
//! This module handles:
//! - Flattening the column tree (multi-level headers) into an arena
//! - Left/right offsets of frozen columns and the band boundary flags
//! - Top/bottom offsets of the frozen row bands
//! - Turning the position map into per-cell class and offset decisions

mod calculator;
mod column_tree;
mod fixed_columns;
mod fixed_rows;
mod styles;

pub use calculator::compute_positions;
pub use column_tree::{ColumnNode, ColumnTree};
pub use fixed_columns::{assign_left_offsets, assign_right_offsets, mark_band_boundaries};
pub use fixed_rows::{assign_row_offsets, row_id};
pub use styles::{column_fixed_style, row_fixed_style, CellFixedStyle, FixedClasses};
