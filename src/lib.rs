//! stickygrid - fixed columns and rows for web data tables
//!
//! Computes where frozen columns and rows of an HTML table must be pinned and
//! keeps that layout current while the table scrolls and resizes:
//! - Left/right offsets of fixed columns, multi-level headers included
//! - Top/bottom offsets of the frozen row bands
//! - Band boundary flags and scroll shadows
//! - Fixed/affixed header state, table width, header cell widths
//! - Tree row selection propagation
//!
//! # Usage (Rust)
//!
//! ```no_run
//! use stickygrid::{Column, FixedEdge, LayoutSnapshot};
//!
//! let snapshot = LayoutSnapshot {
//!     columns: vec![
//!         Column::new("name").fixed(FixedEdge::Left),
//!         Column::new("desc"),
//!     ],
//!     ..LayoutSnapshot::default()
//! };
//! let layout = snapshot.evaluate();
//! println!("{:?}", layout.positions.columns);
//! ```

pub mod config;
pub mod error;
pub mod host;
pub mod layout;
pub mod snapshot;
pub mod table;
pub mod tree_select;
pub mod types;

#[cfg(target_arch = "wasm32")]
pub mod web;

use wasm_bindgen::prelude::*;

pub use config::{FixedRows, TableConfig};
pub use error::{Result, StickyGridError};
pub use host::{EventSource, Host, HostEvent, Listen, ListenerId, TableSurface, TickHandle, TickSource};
pub use snapshot::{LayoutSnapshot, SnapshotLayout};
pub use table::{FixedTable, TableState, Work};
pub use types::*;

#[cfg(target_arch = "wasm32")]
pub use web::WebTable;

/// Evaluate a measured layout snapshot and return the fixed layout
///
/// # Arguments
/// * `snapshot` - A `LayoutSnapshot` object (columns, rows, config, measurements)
///
/// # Errors
/// Returns an error if the snapshot cannot be deserialized or its config is invalid.
#[wasm_bindgen]
pub fn compute_fixed_layout(snapshot: JsValue) -> std::result::Result<JsValue, JsValue> {
    let snapshot: LayoutSnapshot = serde_wasm_bindgen::from_value(snapshot)?;
    snapshot
        .config
        .validate()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let layout = snapshot.evaluate();

    serde::Serialize::serialize(&layout, &serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

/// Evaluate a snapshot given as JSON and return the layout as JSON
///
/// # Errors
/// Returns an error if the JSON is invalid or the config is rejected.
#[wasm_bindgen]
pub fn compute_fixed_layout_json(snapshot: &str) -> std::result::Result<String, JsValue> {
    let snapshot = LayoutSnapshot::from_json(snapshot).map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_json::to_string(&snapshot.evaluate())
        .map_err(|e| JsValue::from_str(&format!("JSON serialization error: {e}")))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
