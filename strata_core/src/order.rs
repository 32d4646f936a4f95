// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Back-to-front compositing order.
//!
//! Paint order is decided per leaf by two keys, compared in order:
//!
//! 1. **z-index**: lower values are behind.
//! 2. **depth**: on equal z-index, the shallower leaf is behind.
//!
//! Leaves that tie on both keys keep their relative input order, which the
//! propagator supplies in tree traversal order. The sort is therefore a
//! stable sort, and repeated runs over the same tree always agree.
//!
//! z-indices are compared with [`f32::total_cmp`] after folding `-0.0` into
//! `0.0`, so the order is total even if a caller stores a NaN.

use alloc::vec::Vec;
use core::cmp::Ordering;

use crate::element::{ElementId, ElementTree};

#[inline]
fn z_key(z: f32) -> f32 {
    // `-0.0 + 0.0 == 0.0`, which keeps `total_cmp` from splitting the zeros.
    z + 0.0
}

/// Compares two elements in back-to-front order.
///
/// Returns [`Ordering::Less`] if `a` is painted before (behind) `b`.
#[must_use]
pub fn compare(tree: &ElementTree, a: ElementId, b: ElementId) -> Ordering {
    let za = z_key(tree.z_index(a));
    let zb = z_key(tree.z_index(b));
    za.total_cmp(&zb)
        .then_with(|| tree.depth(a).cmp(&tree.depth(b)))
}

/// Returns `true` if `a` is strictly behind `b`.
#[must_use]
pub fn is_behind(tree: &ElementTree, a: ElementId, b: ElementId) -> bool {
    compare(tree, a, b) == Ordering::Less
}

/// Sorts `ids` back-to-front in place, keeping the input order of ties.
pub fn sort_back_to_front(tree: &ElementTree, ids: &mut [ElementId]) {
    ids.sort_by(|&a, &b| compare(tree, a, b));
}

/// Returns a back-to-front copy of `ids`.
#[must_use]
pub fn order(tree: &ElementTree, ids: &[ElementId]) -> Vec<ElementId> {
    let mut sorted = ids.to_vec();
    sort_back_to_front(tree, &mut sorted);
    sorted
}
