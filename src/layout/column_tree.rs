//! Flattened column tree.
//!
//! The column tree is stored as an arena so passes can follow parent links
//! and walk header levels without borrowing through nested `Vec`s.

use std::collections::HashMap;

use crate::types::{Column, FixedEdge, Key};

/// A column in the flattened tree
#[derive(Debug, Clone)]
pub struct ColumnNode {
    pub key: Key,
    pub fixed: Option<FixedEdge>,
    /// Index among its siblings
    pub index: usize,
    /// Header level (0 = top row of the header)
    pub level: usize,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
}

impl ColumnNode {
    pub fn is_fixed(&self, edge: FixedEdge) -> bool {
        self.fixed == Some(edge)
    }
}

/// Arena of column nodes plus per-level ordering
#[derive(Debug, Clone, Default)]
pub struct ColumnTree {
    nodes: Vec<ColumnNode>,
    roots: Vec<usize>,
    /// Nodes of each header level, left to right across parents
    levels: Vec<Vec<usize>>,
    by_key: HashMap<Key, usize>,
    has_fixed: bool,
    has_right_fixed: bool,
}

impl ColumnTree {
    pub fn build(columns: &[Column]) -> Self {
        let mut tree = Self::default();
        tree.roots = tree.push_level(columns, 0, None);
        tree
    }

    fn push_level(&mut self, columns: &[Column], level: usize, parent: Option<usize>) -> Vec<usize> {
        let mut ids = Vec::with_capacity(columns.len());
        for (index, col) in columns.iter().enumerate() {
            let id = self.nodes.len();
            let key = col.key_or(index);
            if col.fixed.is_some() {
                self.has_fixed = true;
            }
            if col.is_fixed(FixedEdge::Right) {
                self.has_right_fixed = true;
            }
            self.nodes.push(ColumnNode {
                key: key.clone(),
                fixed: col.fixed,
                index,
                level,
                parent,
                children: Vec::new(),
            });
            // Later duplicates win, same as a plain map insert
            self.by_key.insert(key, id);

            if self.levels.len() <= level {
                self.levels.resize_with(level + 1, Vec::new);
            }
            if let Some(nodes) = self.levels.get_mut(level) {
                nodes.push(id);
            }

            if !col.children.is_empty() {
                let children = self.push_level(&col.children, level + 1, Some(id));
                if let Some(node) = self.nodes.get_mut(id) {
                    node.children = children;
                }
            }
            ids.push(id);
        }
        ids
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: usize) -> Option<&ColumnNode> {
        self.nodes.get(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (usize, &ColumnNode)> {
        self.nodes.iter().enumerate()
    }

    /// Top-level column ids, left to right
    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    /// Node ids per header level
    pub fn levels(&self) -> &[Vec<usize>] {
        &self.levels
    }

    pub fn find(&self, key: &Key) -> Option<usize> {
        self.by_key.get(key).copied()
    }

    /// Any column frozen to either edge
    pub fn has_fixed_columns(&self) -> bool {
        self.has_fixed
    }

    pub fn has_right_fixed_columns(&self) -> bool {
        self.has_right_fixed
    }
}
