//! Full rebuild of the fixed position map.

use super::fixed_columns::{assign_left_offsets, assign_right_offsets, mark_band_boundaries};
use super::fixed_rows::assign_row_offsets;
use super::ColumnTree;
use crate::config::TableConfig;
use crate::types::{FixedPosition, FixedPositionMap, Key, Measurements};

/// Compute the position of every column and every frozen row.
///
/// Always builds a fresh map: the result depends only on the arguments, so
/// running it twice on the same inputs yields the same map.
pub fn compute_positions(
    tree: &ColumnTree,
    row_ids: &[Option<Key>],
    measurements: &Measurements,
    config: &TableConfig,
) -> FixedPositionMap {
    let mut slots: Vec<FixedPosition> = tree
        .nodes()
        .map(|(_, node)| FixedPosition {
            index: Some(node.index),
            ..FixedPosition::default()
        })
        .collect();

    mark_band_boundaries(tree, &mut slots);
    record_fixed_widths(tree, measurements, &mut slots);
    assign_left_offsets(tree, tree.roots(), 0.0, &mut slots);
    assign_right_offsets(tree, tree.roots(), 0.0, &mut slots);

    let mut map = FixedPositionMap::new();
    for ((_, node), slot) in tree.nodes().zip(slots) {
        map.columns.insert(node.key.clone(), slot);
    }
    assign_row_offsets(row_ids, config.fixed_rows_band(), measurements, &mut map);
    map
}

/// Copy measured header cell widths onto fixed columns.
///
/// Cells are matched by `data-colkey`, falling back to the cell's position in
/// its header row. A fixed column without a rendered cell keeps no width and
/// counts as zero wide.
fn record_fixed_widths(tree: &ColumnTree, measurements: &Measurements, slots: &mut [FixedPosition]) {
    for row in &measurements.header_rows {
        for (j, cell) in row.iter().enumerate() {
            let key = match &cell.col_key {
                Some(key) => key.clone(),
                None => {
                    log::warn!(
                        "{} missing colKey. colKey is required for fixed column feature.",
                        cell.label
                    );
                    Key::position(j)
                }
            };
            let Some(id) = tree.find(&key) else {
                continue;
            };
            let is_fixed = tree.node(id).is_some_and(|n| n.fixed.is_some());
            if let (true, Some(slot)) = (is_fixed, slots.get_mut(id)) {
                slot.width = Some(cell.width);
            }
        }
    }
}
