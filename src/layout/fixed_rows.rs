//! Top/bottom offsets of the frozen row bands.

use crate::config::FixedRows;
use crate::types::{FixedPositionMap, Key, Measurements};

/// Pin the leading `band.top` rows under the header and the trailing
/// `band.bottom` rows above the footer.
///
/// `row_ids` holds the resolved id of every body row in render order; `None`
/// marks a row whose id could not be read. Such a row still takes up its
/// height in the band but gets no published entry.
pub fn assign_row_offsets(
    row_ids: &[Option<Key>],
    band: FixedRows,
    measurements: &Measurements,
    map: &mut FixedPositionMap,
) {
    let count = row_ids.len();
    let top_count = band.top.min(count);
    let bottom_count = band.bottom.min(count);

    let mut next_top = measurements.header_height.unwrap_or(0.0);
    for (i, id) in row_ids.iter().enumerate().take(top_count) {
        let height = measurements.row_height(i);
        match id {
            Some(id) => {
                let entry = map.row_entry(id.clone());
                entry.top = Some(next_top);
                entry.height = Some(height);
            }
            None => log::debug!("frozen top row {i} has no id, offset not published"),
        }
        next_top += height;
    }

    let mut next_bottom = measurements.footer_height.unwrap_or(0.0);
    for (i, id) in row_ids.iter().enumerate().skip(count - bottom_count).rev() {
        let height = measurements.row_height(i);
        match id {
            Some(id) => {
                let entry = map.row_entry(id.clone());
                entry.bottom = Some(next_bottom);
                entry.height = Some(height);
            }
            None => log::debug!("frozen bottom row {i} has no id, offset not published"),
        }
        next_bottom += height;
    }
}

/// Read a row's id from its record. A key present verbatim wins; otherwise
/// dotted paths (`"meta.id"`) reach into nested objects.
pub fn row_id(row: &serde_json::Value, row_key: &str) -> Option<Key> {
    let value = match row.get(row_key) {
        Some(value) => value,
        None => row_key
            .split('.')
            .try_fold(row, |value, part| value.get(part))?,
    };
    Key::from_json(value)
}
