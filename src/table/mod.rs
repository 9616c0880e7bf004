//! Table view controller.
//!
//! [`FixedTable`] owns the column/row model and everything derived from
//! measuring the rendered table: the fixed position map, the column shadow,
//! the fixed/affixed header flags, the table width and the header cell widths.
//! Structural changes schedule the passes they affect on the next tick; scroll
//! and resize notifications arrive through [`FixedTable::handle`].

mod listeners;
mod scheduler;
mod scroll;

pub use listeners::ListenerSet;
pub use scheduler::{TickScheduler, Work};
pub use scroll::HeaderScrollSync;

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::TableConfig;
use crate::error::Result;
use crate::host::{Host, HostEvent, Listen};
use crate::layout::{
    column_fixed_style, compute_positions, row_fixed_style, row_id, CellFixedStyle, ColumnTree,
    FixedClasses,
};
use crate::types::{Column, ColumnShadow, FixedPositionMap, HeaderPosition, Key};

/// Passes a config change invalidates
pub fn config_change_work(old: &TableConfig, new: &TableConfig) -> Work {
    let mut work = Work::empty();
    if old.bordered != new.bordered {
        work |= Work::FIXED_STATUS | Work::FIXED_HEADER | Work::TH_WIDTHS | Work::TABLE_WIDTH;
    }
    if old.table_layout != new.table_layout || old.table_content_width != new.table_content_width {
        work |= Work::FIXED_STATUS | Work::TH_WIDTHS;
    }
    if old.fixed_rows != new.fixed_rows || old.row_key != new.row_key {
        work |= Work::FIXED_STATUS | Work::TH_WIDTHS;
    }
    if old.max_height != new.max_height {
        work |= Work::FIXED_HEADER;
    }
    if old.needs_th_widths() != new.needs_th_widths() {
        work |= Work::TH_WIDTHS;
    }
    work
}

/// Derived state exposed to renderers, in one serializable value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableState {
    pub is_fixed_header: bool,
    pub is_width_overflow: bool,
    pub is_fixed_column: bool,
    pub show_affix_header: bool,
    pub table_width: f64,
    pub scrollbar_width: f64,
    pub th_widths: BTreeMap<Key, f64>,
    pub header_position: HeaderPosition,
    pub shadow: ColumnShadow,
}

pub struct FixedTable<H: Host> {
    host: H,
    config: TableConfig,
    classes: FixedClasses,
    columns: Vec<Column>,
    tree: ColumnTree,
    rows: Vec<serde_json::Value>,
    row_ids: Vec<Option<Key>>,
    positions: Arc<FixedPositionMap>,
    shadow: ColumnShadow,
    is_fixed_header: bool,
    is_width_overflow: bool,
    show_affix_header: bool,
    table_width: f64,
    th_widths: BTreeMap<Key, f64>,
    header_position: HeaderPosition,
    header_sync: HeaderScrollSync,
    scheduler: TickScheduler,
    listeners: ListenerSet,
    /// Last listener sync failed; retried on the next tick
    listeners_stale: bool,
    mounted: bool,
}

impl<H: Host> FixedTable<H> {
    pub fn new(host: H, config: TableConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            host,
            classes: FixedClasses::with_prefix(&config.class_prefix),
            config,
            columns: Vec::new(),
            tree: ColumnTree::default(),
            rows: Vec::new(),
            row_ids: Vec::new(),
            positions: Arc::new(FixedPositionMap::new()),
            shadow: ColumnShadow::default(),
            is_fixed_header: false,
            is_width_overflow: false,
            show_affix_header: true,
            table_width: 0.0,
            th_widths: BTreeMap::new(),
            header_position: HeaderPosition::default(),
            header_sync: HeaderScrollSync::new(),
            scheduler: TickScheduler::new(),
            listeners: ListenerSet::new(),
            listeners_stale: false,
            mounted: false,
        })
    }

    /// The table has been rendered: measure everything on the next tick and
    /// subscribe to the notifications the active features need.
    pub fn mount(&mut self) -> Result<()> {
        self.mounted = true;
        self.schedule(Work::all())?;
        self.sync_listeners()
    }

    /// Tear down: cancel the pending tick, detach every listener and drop the
    /// published map. Safe to call more than once.
    pub fn detach(&mut self) {
        self.scheduler.cancel(&mut self.host);
        self.listeners.clear(&mut self.host);
        self.listeners_stale = false;
        self.header_sync.reset();
        self.positions = Arc::new(FixedPositionMap::new());
        self.mounted = false;
    }

    pub fn set_columns(&mut self, columns: Vec<Column>) -> Result<()> {
        self.tree = ColumnTree::build(&columns);
        self.columns = columns;
        self.schedule(
            Work::FIXED_STATUS
                | Work::COLUMN_SHADOW
                | Work::FIXED_HEADER
                | Work::TH_WIDTHS
                | Work::TABLE_WIDTH,
        )?;
        self.sync_listeners()
    }

    /// Replace the body rows
    pub fn set_rows(&mut self, rows: Vec<serde_json::Value>) -> Result<()> {
        self.rows = rows;
        self.resolve_row_ids();
        self.schedule(Work::FIXED_STATUS | Work::FIXED_HEADER | Work::TH_WIDTHS)
    }

    fn resolve_row_ids(&mut self) {
        self.row_ids = self
            .rows
            .iter()
            .map(|row| row_id(row, &self.config.row_key))
            .collect();
    }

    pub fn set_config(&mut self, config: TableConfig) -> Result<()> {
        config.validate()?;
        let work = config_change_work(&self.config, &config);
        if config.class_prefix != self.config.class_prefix {
            self.classes = FixedClasses::with_prefix(&config.class_prefix);
        }
        if config.needs_th_widths() != self.config.needs_th_widths() {
            self.header_sync.reset();
        }
        let row_key_changed = config.row_key != self.config.row_key;
        self.config = config;
        if row_key_changed {
            self.resolve_row_ids();
        }
        self.schedule(work)?;
        self.sync_listeners()
    }

    /// Dispatch a host notification
    pub fn handle(&mut self, event: HostEvent) -> Result<()> {
        match event {
            HostEvent::Resize => self.on_resize(),
            HostEvent::DocumentScroll => {
                self.on_document_scroll();
                Ok(())
            }
            HostEvent::ContentScroll => {
                self.on_content_scroll();
                Ok(())
            }
            HostEvent::Tick => self.on_tick(),
        }
    }

    /// Horizontal scroll of the content viewport: update the shadow and keep
    /// the affixed header aligned.
    pub fn on_content_scroll(&mut self) {
        let Some(metrics) = self.host.content_metrics() else {
            return;
        };
        if self.is_fixed_column() {
            self.shadow = ColumnShadow::from_metrics(&metrics);
        }
        if self.config.needs_th_widths() {
            self.header_sync.sync(metrics.scroll_left, &mut self.host);
        }
    }

    /// Force the affixed header to the content's current scroll offset
    pub fn resync_header_scroll(&mut self) {
        self.header_sync.reset();
        self.on_content_scroll();
    }

    /// Window resize: recompute the width now and re-measure on the next tick
    pub fn on_resize(&mut self) -> Result<()> {
        self.update_table_width();
        let mut work = Work::FIXED_HEADER;
        if self.config.needs_th_widths() {
            work |= Work::TH_WIDTHS;
        }
        if self.is_fixed_column() || self.is_fixed_header {
            work |= Work::FIXED_STATUS | Work::COLUMN_SHADOW;
        }
        self.schedule(work)
    }

    /// Alias of [`on_resize`](Self::on_resize) for hosts that know the table
    /// changed size without a window resize (e.g. a parent became visible).
    pub fn refresh(&mut self) -> Result<()> {
        self.on_resize()
    }

    /// Document scroll: hide the affixed header once the table has scrolled
    /// out of view entirely.
    pub fn on_document_scroll(&mut self) {
        let Some(rect) = self.host.content_rect() else {
            return;
        };
        let affix_height = self.host.affix_header_height().unwrap_or(0.0);
        self.show_affix_header = affix_height - rect.top < rect.height;
    }

    /// The deferred tick fired: run every pending pass
    pub fn on_tick(&mut self) -> Result<()> {
        let work = self.scheduler.take();
        if !self.mounted {
            return Ok(());
        }
        let mut follow_up = Work::empty();
        let mut resync = self.listeners_stale;

        if work.contains(Work::FIXED_HEADER) && self.update_fixed_header() {
            // Both flags feed the table width and the fixed passes
            follow_up |= Work::FIXED_STATUS | Work::TH_WIDTHS | Work::TABLE_WIDTH;
            resync = true;
        }
        if work.contains(Work::TABLE_WIDTH) {
            self.update_table_width();
        }
        if work.contains(Work::TH_WIDTHS) {
            self.update_th_widths();
        }
        if work.contains(Work::FIXED_STATUS) {
            self.update_positions();
        }
        if work.contains(Work::COLUMN_SHADOW) && self.is_fixed_column() {
            if let Some(metrics) = self.host.content_metrics() {
                self.shadow = ColumnShadow::from_metrics(&metrics);
            }
        }
        self.schedule(follow_up)?;
        if resync {
            self.sync_listeners()?;
        }
        Ok(())
    }

    fn schedule(&mut self, work: Work) -> Result<()> {
        if !self.mounted {
            return Ok(());
        }
        self.scheduler.schedule(work, &mut self.host)
    }

    fn wanted_listeners(&self) -> Vec<Listen> {
        if !self.mounted {
            return Vec::new();
        }
        let mut wanted = vec![Listen::ContentScroll];
        if self.is_fixed_column() || self.is_fixed_header || self.config.needs_th_widths() {
            wanted.push(Listen::WindowResize);
        }
        if self.config.header_affixed_top {
            wanted.push(Listen::DocumentScroll);
        }
        wanted
    }

    fn sync_listeners(&mut self) -> Result<()> {
        let wanted = self.wanted_listeners();
        self.listeners_stale = true;
        self.listeners.sync(&wanted, &mut self.host)?;
        self.listeners_stale = false;
        Ok(())
    }

    /// Returns whether either flag changed
    fn update_fixed_header(&mut self) -> bool {
        let Some(metrics) = self.host.content_metrics() else {
            return false;
        };
        let is_fixed_header = metrics.overflows_vertically();
        let is_width_overflow = metrics.overflows_horizontally();
        if let Some(rect) = self.host.content_rect() {
            self.header_position = HeaderPosition {
                top: rect.top,
                left: rect.left,
            };
        }
        let changed =
            is_fixed_header != self.is_fixed_header || is_width_overflow != self.is_width_overflow;
        self.is_fixed_header = is_fixed_header;
        self.is_width_overflow = is_width_overflow;
        changed
    }

    fn update_table_width(&mut self) {
        let Some(rect) = self.host.content_rect() else {
            return;
        };
        // The vertical scrollbar eats into the width once the header is fixed
        let scrollbar = if self.is_fixed_header {
            self.host.scrollbar_width()
        } else {
            0.0
        };
        let border = match (self.config.bordered, self.tree.has_right_fixed_columns()) {
            (false, _) => 0.0,
            (true, true) => 1.0,
            (true, false) => 2.0,
        };
        self.table_width = rect.width - scrollbar - border;
    }

    fn update_th_widths(&mut self) {
        if !self.config.needs_th_widths() {
            return;
        }
        self.update_table_width();
        let mut widths = BTreeMap::new();
        for row in self.host.header_rows() {
            for (j, cell) in row.into_iter().enumerate() {
                let key = cell.col_key.unwrap_or_else(|| Key::position(j));
                widths.insert(key, cell.width);
            }
        }
        self.th_widths = widths;
        self.resync_header_scroll();
    }

    fn update_positions(&mut self) {
        if !self.is_fixed_column() && !self.config.has_fixed_rows() {
            if !self.positions.is_empty() {
                self.positions = Arc::new(FixedPositionMap::new());
            }
            return;
        }
        let measurements = self.host.measure();
        let map = compute_positions(&self.tree, &self.row_ids, &measurements, &self.config);
        self.positions = Arc::new(map);
    }

    /// Published position map snapshot
    pub fn positions(&self) -> Arc<FixedPositionMap> {
        Arc::clone(&self.positions)
    }

    pub fn column_shadow(&self) -> ColumnShadow {
        self.shadow
    }

    /// Shadow classes for the content viewport
    pub fn shadow_classes(&self) -> Vec<String> {
        let mut classes = Vec::new();
        if self.shadow.left {
            classes.push(self.classes.left_shadow.clone());
        }
        if self.shadow.right {
            classes.push(self.classes.right_shadow.clone());
        }
        classes
    }

    /// Style of the column at `index` among its siblings
    pub fn column_style(&self, column: &Column, index: usize) -> CellFixedStyle {
        column_fixed_style(column, index, &self.positions, &self.classes)
    }

    /// Style of the body row at `row_index`
    pub fn row_style(&self, row_index: usize) -> CellFixedStyle {
        let id = self.row_ids.get(row_index).and_then(Option::as_ref);
        row_fixed_style(
            id,
            row_index,
            self.row_ids.len(),
            self.config.fixed_rows,
            &self.positions,
            &self.classes,
        )
    }

    pub fn is_fixed_column(&self) -> bool {
        self.tree.has_fixed_columns()
    }

    pub fn is_fixed_header(&self) -> bool {
        self.is_fixed_header
    }

    pub fn is_width_overflow(&self) -> bool {
        self.is_width_overflow
    }

    pub fn show_affix_header(&self) -> bool {
        self.show_affix_header
    }

    pub fn table_width(&self) -> f64 {
        self.table_width
    }

    pub fn th_widths(&self) -> &BTreeMap<Key, f64> {
        &self.th_widths
    }

    pub fn header_position(&self) -> HeaderPosition {
        self.header_position
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[serde_json::Value] {
        &self.rows
    }

    /// Resolved id of every body row, `None` where the row has no id
    pub fn row_ids(&self) -> &[Option<Key>] {
        &self.row_ids
    }

    pub fn classes(&self) -> &FixedClasses {
        &self.classes
    }

    pub fn pending_work(&self) -> Work {
        self.scheduler.pending()
    }

    pub fn active_listeners(&self) -> usize {
        self.listeners.len()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn state(&self) -> TableState {
        TableState {
            is_fixed_header: self.is_fixed_header,
            is_width_overflow: self.is_width_overflow,
            is_fixed_column: self.is_fixed_column(),
            show_affix_header: self.show_affix_header,
            table_width: self.table_width,
            scrollbar_width: self.host.scrollbar_width(),
            th_widths: self.th_widths.clone(),
            header_position: self.header_position,
            shadow: self.shadow,
        }
    }
}

impl<H: Host> Drop for FixedTable<H> {
    fn drop(&mut self) {
        self.detach();
    }
}
