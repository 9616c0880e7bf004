//! Common test utilities.
//!
//! `MockHost` stands in for the browser: tests set the measurements and
//! scroll geometry it reports, fire ticks by hand and inspect which
//! listeners are attached.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_possible_wrap
)]

use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

use stickygrid::{
    Column, EventSource, FixedEdge, FixedTable, Listen, ListenerId, MeasuredCell, Measurements,
    Rect, Result, ScrollMetrics, StickyGridError, TableConfig, TableSurface, TickHandle,
    TickSource,
};

// ============================================================================
// Mock host
// ============================================================================

#[derive(Debug, Default)]
pub struct MockHost {
    pub measurements: Measurements,
    pub metrics: Option<ScrollMetrics>,
    pub rect: Option<Rect>,
    pub affix_height: Option<f64>,
    /// Every offset written to the affixed header, in order
    pub affix_writes: Vec<f64>,
    /// Attached listeners by id
    pub listeners: BTreeMap<u64, Listen>,
    pub next_listener: u64,
    /// Attached listener count, readable after the host was moved or dropped
    pub live: Rc<Cell<usize>>,
    pub ticks_requested: usize,
    pub ticks_cancelled: Vec<TickHandle>,
    pub fail_listen: bool,
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_measurements(measurements: Measurements) -> Self {
        Self {
            measurements,
            ..Self::default()
        }
    }

    pub fn is_listening(&self, kind: Listen) -> bool {
        self.listeners.values().any(|&k| k == kind)
    }
}

impl TableSurface for MockHost {
    fn header_rows(&self) -> Vec<Vec<MeasuredCell>> {
        self.measurements.header_rows.clone()
    }

    fn body_row_heights(&self) -> Vec<f64> {
        self.measurements.row_heights.clone()
    }

    fn header_height(&self) -> Option<f64> {
        self.measurements.header_height
    }

    fn footer_height(&self) -> Option<f64> {
        self.measurements.footer_height
    }

    fn content_metrics(&self) -> Option<ScrollMetrics> {
        self.metrics
    }

    fn content_rect(&self) -> Option<Rect> {
        self.rect
    }

    fn affix_header_height(&self) -> Option<f64> {
        self.affix_height
    }

    fn set_affix_scroll_left(&mut self, left: f64) {
        self.affix_writes.push(left);
    }
}

impl EventSource for MockHost {
    fn listen(&mut self, kind: Listen) -> Result<ListenerId> {
        if self.fail_listen {
            return Err(StickyGridError::Host("listen refused".into()));
        }
        self.next_listener += 1;
        self.listeners.insert(self.next_listener, kind);
        self.live.set(self.live.get() + 1);
        Ok(ListenerId(self.next_listener))
    }

    fn unlisten(&mut self, id: ListenerId) {
        if self.listeners.remove(&id.0).is_some() {
            self.live.set(self.live.get() - 1);
        }
    }
}

impl TickSource for MockHost {
    fn request_tick(&mut self) -> Result<TickHandle> {
        self.ticks_requested += 1;
        Ok(TickHandle(self.ticks_requested as i64))
    }

    fn cancel_tick(&mut self, handle: TickHandle) {
        self.ticks_cancelled.push(handle);
    }
}

// ============================================================================
// Builders
// ============================================================================

/// Scroll geometry of a viewport `client` wide showing content `scroll` wide
pub fn metrics(scroll_left: f64, scroll_width: f64, client_width: f64) -> ScrollMetrics {
    ScrollMetrics {
        scroll_left,
        scroll_top: 0.0,
        scroll_width,
        scroll_height: 200.0,
        client_width,
        client_height: 200.0,
    }
}

/// One header row with a measured cell per `(key, width)`
pub fn header(cells: &[(&str, f64)]) -> Vec<MeasuredCell> {
    cells
        .iter()
        .map(|&(key, width)| MeasuredCell::new(key, width))
        .collect()
}

/// `[left, left, none, right]` with widths 80, 120, 300, 60
pub fn four_columns() -> (Vec<Column>, Measurements) {
    let columns = vec![
        Column::new("sel").fixed(FixedEdge::Left),
        Column::new("name").fixed(FixedEdge::Left),
        Column::new("desc"),
        Column::new("op").fixed(FixedEdge::Right),
    ];
    let measurements = Measurements {
        header_rows: vec![header(&[
            ("sel", 80.0),
            ("name", 120.0),
            ("desc", 300.0),
            ("op", 60.0),
        ])],
        ..Measurements::default()
    };
    (columns, measurements)
}

/// `n` rows `{ "id": i }`
pub fn rows(n: usize) -> Vec<serde_json::Value> {
    (0..n).map(|i| serde_json::json!({ "id": i })).collect()
}

/// A mounted table over `host` with every startup tick drained
pub fn mounted(host: MockHost, config: TableConfig) -> FixedTable<MockHost> {
    let mut table = FixedTable::new(host, config).unwrap();
    table.mount().unwrap();
    table.on_tick().unwrap();
    drain(&mut table);
    table
}

/// Run ticks until no work is pending
pub fn drain(table: &mut FixedTable<MockHost>) {
    for _ in 0..8 {
        if table.pending_work().is_empty() {
            return;
        }
        table.on_tick().unwrap();
    }
    panic!("work still pending after 8 ticks: {:?}", table.pending_work());
}
