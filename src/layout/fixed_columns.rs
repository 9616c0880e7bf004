//! Left/right offsets of frozen columns and the band boundary flags.
//!
//! `slots` is indexed by [`ColumnTree`] node id and must already carry the
//! measured width of every fixed column.

use super::ColumnTree;
use crate::types::{FixedEdge, FixedPosition};

/// Walk `ids` left to right, pinning left-frozen columns.
///
/// A left column starts where the previous left sibling ends, or at `base`
/// (the parent's offset, 0 at the top level). The walk over a sibling list
/// stops at the first right-frozen column.
pub fn assign_left_offsets(tree: &ColumnTree, ids: &[usize], base: f64, slots: &mut [FixedPosition]) {
    let mut next = base;
    for &id in ids {
        let Some(node) = tree.node(id) else {
            continue;
        };
        if node.is_fixed(FixedEdge::Right) {
            return;
        }
        let child_base = next;
        if node.is_fixed(FixedEdge::Left) {
            if let Some(slot) = slots.get_mut(id) {
                slot.left = Some(next);
                next += slot.width.unwrap_or(0.0);
            }
        }
        if !node.children.is_empty() {
            assign_left_offsets(tree, &node.children, child_base, slots);
        }
    }
}

/// Mirror of [`assign_left_offsets`], walking right to left from the right edge.
pub fn assign_right_offsets(
    tree: &ColumnTree,
    ids: &[usize],
    base: f64,
    slots: &mut [FixedPosition],
) {
    let mut next = base;
    for &id in ids.iter().rev() {
        let Some(node) = tree.node(id) else {
            continue;
        };
        if node.is_fixed(FixedEdge::Left) {
            return;
        }
        let child_base = next;
        if node.is_fixed(FixedEdge::Right) {
            if let Some(slot) = slots.get_mut(id) {
                slot.right = Some(next);
                next += slot.width.unwrap_or(0.0);
            }
        }
        if !node.children.is_empty() {
            assign_right_offsets(tree, &node.children, child_base, slots);
        }
    }
}

/// Flag the last column of the left band and the first of the right band on
/// every header level.
///
/// Levels are walked top-down: a nested column can only be a boundary when
/// its parent is one, so parents must be settled first.
pub fn mark_band_boundaries(tree: &ColumnTree, slots: &mut [FixedPosition]) {
    for level in tree.levels() {
        for (i, &id) in level.iter().enumerate() {
            let Some(node) = tree.node(id) else {
                continue;
            };
            let (parent_last_left, parent_first_right) = match node.parent {
                None => (true, true),
                Some(p) => slots.get(p).map_or((false, false), |s| {
                    (s.last_left_fixed_col, s.first_right_fixed_col)
                }),
            };
            let next_is_left = level
                .get(i + 1)
                .and_then(|&n| tree.node(n))
                .is_some_and(|n| n.is_fixed(FixedEdge::Left));
            let prev_is_right = i
                .checked_sub(1)
                .and_then(|p| level.get(p))
                .and_then(|&n| tree.node(n))
                .is_some_and(|n| n.is_fixed(FixedEdge::Right));

            let Some(slot) = slots.get_mut(id) else {
                continue;
            };
            if parent_last_left && node.is_fixed(FixedEdge::Left) && !next_is_left {
                slot.last_left_fixed_col = true;
            }
            if parent_first_right && node.is_fixed(FixedEdge::Right) && !prev_is_right {
                slot.first_right_fixed_col = true;
            }
        }
    }
}
