// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-region propagation.
//!
//! When an element changes, the pixels under its leaves are stale. Painting
//! is back-to-front without clearing, so repainting only the changed leaves
//! would leave the leaves behind them unpainted and the leaves in front of
//! them covered. The propagator therefore queues:
//!
//! 1. every leaf of the changed subtree (the *seeds*), then
//! 2. every leaf reachable from `root` whose bounds overlap a queued leaf,
//!    repeated until a full scan queues nothing new.
//!
//! The result is sorted with [`order::sort_back_to_front`] and returned as a
//! [`RedrawSet`]. Before sorting, the queued leaves are laid out in tree
//! traversal order, so leaves that tie on z-index and depth come out in
//! traversal order no matter which overlap discovered them.
//!
//! The "already queued" flags live in a scratch vector created per call, so
//! the tree itself is never written to and the same tree can be queried from
//! several places at once.

use alloc::vec;
use alloc::vec::Vec;

use crate::element::{ElementId, ElementTree};
use crate::order;

/// The ordered leaves to repaint after a change, plus diagnostic counts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RedrawSet {
    /// Leaves to repaint, back-to-front.
    pub leaves: Vec<ElementId>,
    /// Number of leaves queued directly from the changed subtrees.
    pub seed_leaves: usize,
    /// Number of leaves reachable from the traversal root.
    pub candidate_leaves: usize,
}

impl RedrawSet {
    /// Returns `true` if nothing needs repainting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Returns the number of queued leaves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    /// Returns `true` if `id` is queued.
    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.leaves.contains(&id)
    }
}

/// Computes the leaves to repaint after `changed` was modified.
///
/// A changed container seeds every leaf beneath it; a container with no
/// leaves yields an empty set. Leaves outside `root`'s subtree are never
/// queued.
#[must_use]
pub fn redraw_set(tree: &ElementTree, changed: ElementId, root: ElementId) -> RedrawSet {
    redraw_set_many(tree, &[changed], root)
}

/// Like [`redraw_set`], but seeds the queue with the leaves of every element
/// in `changed`. A leaf reached through more than one changed element is
/// queued once.
#[must_use]
pub fn redraw_set_many(tree: &ElementTree, changed: &[ElementId], root: ElementId) -> RedrawSet {
    let candidates = tree.all_leaves(root);
    if candidates.is_empty() {
        return RedrawSet::default();
    }

    let mut reachable = vec![false; tree.element_count()];
    for leaf in &candidates {
        reachable[leaf.slot()] = true;
    }

    let mut queued = vec![false; tree.element_count()];
    let mut worklist = Vec::new();
    for &id in changed {
        for leaf in tree.leaves(id) {
            let slot = leaf.slot();
            if reachable[slot] && !queued[slot] {
                queued[slot] = true;
                worklist.push(leaf);
            }
        }
    }
    let seed_leaves = worklist.len();

    // Each queued leaf is scanned against every candidate exactly once, so
    // the worklist drains only when no queued leaf has an unqueued neighbor.
    let mut cursor = 0;
    while let Some(&target) = worklist.get(cursor) {
        cursor += 1;
        let area = tree.bounds(target);
        if area.is_empty() {
            continue;
        }
        for &other in &candidates {
            let slot = other.slot();
            if !queued[slot] && tree.bounds(other).overlaps(area) {
                queued[slot] = true;
                worklist.push(other);
            }
        }
    }

    let mut leaves: Vec<ElementId> = candidates
        .iter()
        .copied()
        .filter(|leaf| queued[leaf.slot()])
        .collect();
    order::sort_back_to_front(tree, &mut leaves);

    RedrawSet {
        leaves,
        seed_leaves,
        candidate_leaves: candidates.len(),
    }
}

/// Returns every leaf under `root`, back-to-front, without an overlap search.
#[must_use]
pub fn full_set(tree: &ElementTree, root: ElementId) -> RedrawSet {
    let mut leaves = tree.all_leaves(root);
    order::sort_back_to_front(tree, &mut leaves);
    let count = leaves.len();
    RedrawSet {
        leaves,
        seed_leaves: count,
        candidate_leaves: count,
    }
}
