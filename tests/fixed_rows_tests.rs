//! Tests for frozen row bands
//!
//! The leading `fixedRows[0]` rows stick below the header and the trailing
//! `fixedRows[1]` rows stick above the footer.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::*;
use serde_json::json;
use stickygrid::layout::{assign_row_offsets, row_id};
use stickygrid::{FixedPositionMap, FixedRows, Key, Measurements, TableConfig};

fn ids(n: i64) -> Vec<Option<Key>> {
    (0..n).map(|i| Some(Key::Index(i))).collect()
}

fn offsets(
    row_ids: &[Option<Key>],
    band: FixedRows,
    measurements: &Measurements,
) -> FixedPositionMap {
    let mut map = FixedPositionMap::new();
    assign_row_offsets(row_ids, band, measurements, &mut map);
    map
}

mod top_band {
    use super::*;

    #[test]
    fn test_top_rows_stack_from_zero() {
        let m = Measurements {
            row_heights: vec![20.0, 30.0, 40.0],
            ..Measurements::default()
        };
        let map = offsets(&ids(3), FixedRows::new(2, 0), &m);

        assert_eq!(map.row(&Key::Index(0)).unwrap().top, Some(0.0));
        assert_eq!(map.row(&Key::Index(1)).unwrap().top, Some(20.0));
        assert_eq!(map.row(&Key::Index(1)).unwrap().height, Some(30.0));
        assert!(map.row(&Key::Index(2)).is_none());
    }

    #[test]
    fn test_top_rows_start_below_header() {
        let m = Measurements {
            row_heights: vec![20.0, 30.0],
            header_height: Some(48.0),
            ..Measurements::default()
        };
        let map = offsets(&ids(2), FixedRows::new(2, 0), &m);

        assert_eq!(map.row(&Key::Index(0)).unwrap().top, Some(48.0));
        assert_eq!(map.row(&Key::Index(1)).unwrap().top, Some(68.0));
    }

    #[test]
    fn test_band_larger_than_row_count_is_clamped() {
        let m = Measurements {
            row_heights: vec![10.0, 10.0, 10.0],
            ..Measurements::default()
        };
        let map = offsets(&ids(3), FixedRows::new(10, 0), &m);
        assert_eq!(map.rows.len(), 3);
        assert_eq!(map.row(&Key::Index(2)).unwrap().top, Some(20.0));
    }

    #[test]
    fn test_row_without_id_still_takes_space() {
        let m = Measurements {
            row_heights: vec![25.0, 35.0],
            ..Measurements::default()
        };
        let map = offsets(&[None, Some(Key::Index(7))], FixedRows::new(2, 0), &m);
        assert_eq!(map.rows.len(), 1);
        assert_eq!(map.row(&Key::Index(7)).unwrap().top, Some(25.0));
    }

    #[test]
    fn test_unmeasured_rows_count_as_zero_high() {
        let map = offsets(&ids(2), FixedRows::new(2, 0), &Measurements::default());
        assert_eq!(map.row(&Key::Index(1)).unwrap().top, Some(0.0));
    }
}

mod bottom_band {
    use super::*;

    #[test]
    fn test_bottom_rows_stack_from_the_end() {
        let m = Measurements {
            row_heights: vec![10.0, 20.0, 30.0, 40.0, 50.0],
            ..Measurements::default()
        };
        let map = offsets(&ids(5), FixedRows::new(0, 2), &m);

        assert_eq!(map.row(&Key::Index(4)).unwrap().bottom, Some(0.0));
        assert_eq!(map.row(&Key::Index(3)).unwrap().bottom, Some(50.0));
        assert!(map.row(&Key::Index(2)).is_none());
    }

    #[test]
    fn test_bottom_rows_start_above_footer() {
        let m = Measurements {
            row_heights: vec![10.0, 20.0, 30.0],
            footer_height: Some(12.0),
            ..Measurements::default()
        };
        let map = offsets(&ids(3), FixedRows::new(0, 2), &m);

        assert_eq!(map.row(&Key::Index(2)).unwrap().bottom, Some(12.0));
        assert_eq!(map.row(&Key::Index(1)).unwrap().bottom, Some(42.0));
    }

    #[test]
    fn test_row_in_both_bands_gets_both_offsets() {
        let m = Measurements {
            row_heights: vec![10.0, 20.0],
            ..Measurements::default()
        };
        let map = offsets(&ids(2), FixedRows::new(2, 2), &m);
        let first = map.row(&Key::Index(0)).unwrap();
        assert_eq!(first.top, Some(0.0));
        assert_eq!(first.bottom, Some(20.0));
    }
}

mod row_ids {
    use super::*;

    #[test]
    fn test_string_and_integer_ids() {
        assert_eq!(row_id(&json!({"id": 3}), "id"), Some(Key::Index(3)));
        assert_eq!(row_id(&json!({"id": "r3"}), "id"), Some(Key::from("r3")));
    }

    #[test]
    fn test_dotted_row_key() {
        let row = json!({"meta": {"uid": "abc"}});
        assert_eq!(row_id(&row, "meta.uid"), Some(Key::from("abc")));
        assert_eq!(row_id(&row, "meta.missing"), None);
    }

    #[test]
    fn test_non_scalar_id_is_unresolved() {
        assert_eq!(row_id(&json!({"id": null}), "id"), None);
        assert_eq!(row_id(&json!({"id": [1]}), "id"), None);
        assert_eq!(row_id(&json!({}), "id"), None);
    }
}

mod row_styles {
    use super::*;

    fn table_with_band(band: FixedRows) -> stickygrid::FixedTable<MockHost> {
        let host = MockHost::with_measurements(Measurements {
            row_heights: vec![40.0; 5],
            header_height: Some(50.0),
            ..Measurements::default()
        });
        let config = TableConfig {
            fixed_rows: Some(band),
            ..TableConfig::default()
        };
        let mut table = mounted(host, config);
        table.set_rows(rows(5)).unwrap();
        drain(&mut table);
        table
    }

    #[test]
    fn test_top_row_style() {
        let table = table_with_band(FixedRows::new(1, 2));
        let style = table.row_style(0);
        assert!(style.has_class("t-table__row--fixed-top"));
        assert_eq!(style.top, Some(50.0));
        assert_eq!(style.bottom, None);
    }

    #[test]
    fn test_bottom_band_classes() {
        let table = table_with_band(FixedRows::new(1, 2));

        let before = table.row_style(2);
        assert!(before.has_class("t-table__row--without-border-bottom"));
        assert_eq!(before.classes.len(), 1);

        let first = table.row_style(3);
        assert!(first.has_class("t-table__row--fixed-bottom"));
        assert!(first.has_class("t-table__row--fixed-bottom-first"));
        assert_eq!(first.bottom, Some(40.0));

        let last = table.row_style(4);
        assert!(last.has_class("t-table__row--fixed-bottom"));
        assert!(!last.has_class("t-table__row--fixed-bottom-first"));
        assert_eq!(last.bottom, Some(0.0));
    }

    #[test]
    fn test_no_band_means_no_row_style() {
        let table = table_with_band(FixedRows::new(0, 0));
        assert!(table.row_style(0).is_empty());
        assert!(table.positions().rows.is_empty());
    }

    #[test]
    fn test_row_key_change_re_resolves_ids() {
        let mut table = table_with_band(FixedRows::new(1, 0));
        assert!(table.positions().row(&Key::Index(0)).is_some());

        let config = TableConfig {
            row_key: "uid".into(),
            fixed_rows: Some(FixedRows::new(1, 0)),
            ..TableConfig::default()
        };
        table.set_config(config).unwrap();
        drain(&mut table);
        assert!(table.row_ids().iter().all(Option::is_none));
        assert!(table.positions().rows.is_empty());
    }
}
