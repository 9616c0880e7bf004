//! Row selection for tree tables.
//!
//! With `check_strictly` off, checking a row also checks every selectable
//! descendant and unchecking it removes them. Descendant lists are cached per
//! [`TreeSelect`] instance, keyed by row id, so two tables never share cache
//! entries. Call [`TreeSelect::invalidate`] whenever the row data changes.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{HashMap, HashSet};

use crate::error::{Result, StickyGridError};
use crate::layout::row_id;
use crate::types::Key;

/// Where a tree table finds row ids and children
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TreeConfig {
    pub row_key: String,
    pub children_key: String,
    /// Selection does not propagate to descendants
    pub check_strictly: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            row_key: crate::config::DEFAULT_ROW_KEY.to_string(),
            children_key: "children".to_string(),
            check_strictly: true,
        }
    }
}

impl TreeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.row_key.trim().is_empty() {
            return Err(StickyGridError::Config("rowKey must not be empty".into()));
        }
        if self.children_key.trim().is_empty() {
            return Err(StickyGridError::Config("childrenKey must not be empty".into()));
        }
        Ok(())
    }
}

/// One row of the flattened tree
#[derive(Debug, Clone, PartialEq)]
pub struct TreeRow {
    pub key: Key,
    pub row: Value,
    pub disabled: bool,
    pub level: usize,
    pub parent: Option<Key>,
}

/// Every row of a tree table by id, in depth-first render order
#[derive(Debug, Clone, Default)]
pub struct TreeStore {
    order: Vec<Key>,
    rows: HashMap<Key, TreeRow>,
}

impl TreeStore {
    /// Flatten nested `rows`. Rows without an id are skipped along with
    /// their subtree.
    pub fn build(rows: &[Value], config: &TreeConfig, is_disabled: impl Fn(&Value) -> bool) -> Self {
        let mut store = Self::default();
        store.push_rows(rows, config, &is_disabled, 0, None);
        store
    }

    fn push_rows(
        &mut self,
        rows: &[Value],
        config: &TreeConfig,
        is_disabled: &dyn Fn(&Value) -> bool,
        level: usize,
        parent: Option<&Key>,
    ) {
        for row in rows {
            let Some(key) = row_id(row, &config.row_key) else {
                log::debug!("tree row without {} skipped", config.row_key);
                continue;
            };
            self.order.push(key.clone());
            self.rows.insert(
                key.clone(),
                TreeRow {
                    key: key.clone(),
                    row: row.clone(),
                    disabled: is_disabled(row),
                    level,
                    parent: parent.cloned(),
                },
            );
            if let Some(children) = children_of(row, &config.children_key) {
                self.push_rows(children, config, is_disabled, level + 1, Some(&key));
            }
        }
    }

    pub fn get(&self, key: &Key) -> Option<&TreeRow> {
        self.rows.get(key)
    }

    pub fn is_disabled(&self, key: &Key) -> bool {
        self.rows.get(key).is_some_and(|r| r.disabled)
    }

    /// Rows in depth-first order
    pub fn iter(&self) -> impl Iterator<Item = &TreeRow> {
        self.order.iter().filter_map(|k| self.rows.get(k))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

fn children_of<'a>(row: &'a Value, children_key: &str) -> Option<&'a [Value]> {
    row.get(children_key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .filter(|c| !c.is_empty())
}

/// Selectable descendants of a row
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChildrenData {
    pub all_children: Vec<Value>,
    pub all_children_keys: Vec<Key>,
}

/// Check or uncheck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectKind {
    Check,
    Uncheck,
}

/// What the user toggled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectTarget {
    /// The header "check all" box
    All,
    Row(Key),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectChange {
    pub kind: SelectKind,
    pub target: SelectTarget,
}

/// Selected keys and their row data after a change
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub keys: Vec<Key>,
    pub rows: Vec<Value>,
}

#[derive(Debug, Clone, Default)]
pub struct TreeSelect {
    config: TreeConfig,
    cache: HashMap<Key, ChildrenData>,
}

impl TreeSelect {
    pub fn new(config: TreeConfig) -> Self {
        Self {
            config,
            cache: HashMap::new(),
        }
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Drop cached descendant lists
    pub fn invalidate(&mut self) {
        self.cache.clear();
    }

    /// All selectable descendants of `key`, nearest first.
    ///
    /// Disabled rows are left out but their own descendants are still visited.
    pub fn children_data(&mut self, store: &TreeStore, key: &Key) -> ChildrenData {
        if let Some(cached) = self.cache.get(key) {
            return cached.clone();
        }
        let mut data = ChildrenData::default();
        if let Some(row) = store.get(key) {
            collect_children(store, &row.row, &self.config, &mut data);
        }
        self.cache.insert(key.clone(), data.clone());
        data
    }

    /// Apply a selection change on top of the keys the checkbox column reports.
    pub fn on_select_change(
        &mut self,
        store: &TreeStore,
        row_keys: Vec<Key>,
        change: &SelectChange,
    ) -> Selection {
        let keys = match (&change.target, change.kind) {
            (SelectTarget::All, SelectKind::Check) => store
                .iter()
                .filter(|r| !r.disabled)
                .map(|r| r.key.clone())
                .collect(),
            (SelectTarget::All, SelectKind::Uncheck) => Vec::new(),
            (SelectTarget::Row(_), _) if self.config.check_strictly => row_keys,
            (SelectTarget::Row(key), SelectKind::Check) => {
                let children = self.children_data(store, key);
                let mut seen: HashSet<Key> = HashSet::new();
                row_keys
                    .into_iter()
                    .chain(children.all_children_keys)
                    .filter(|k| seen.insert(k.clone()))
                    .collect()
            }
            (SelectTarget::Row(key), SelectKind::Uncheck) => {
                let children = self.children_data(store, key);
                let remove: HashSet<&Key> = children.all_children_keys.iter().collect();
                row_keys.into_iter().filter(|k| !remove.contains(k)).collect()
            }
        };
        let rows = rows_by_keys(store, &keys);
        Selection { keys, rows }
    }
}

fn collect_children(store: &TreeStore, row: &Value, config: &TreeConfig, out: &mut ChildrenData) {
    let Some(children) = children_of(row, &config.children_key) else {
        return;
    };
    for child in children {
        let Some(key) = row_id(child, &config.row_key) else {
            continue;
        };
        if !store.is_disabled(&key) {
            out.all_children.push(child.clone());
            out.all_children_keys.push(key);
        }
    }
    for child in children {
        collect_children(store, child, config, out);
    }
}

/// Row data for `keys`, skipping keys not in the store
pub fn rows_by_keys(store: &TreeStore, keys: &[Key]) -> Vec<Value> {
    keys.iter()
        .filter_map(|k| store.get(k).map(|r| r.row.clone()))
        .collect()
}
