// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree traversal utilities.

use super::id::{ElementId, INVALID};
use super::tree::ElementTree;

/// An iterator over the direct children of an element, in insertion order.
///
/// Created by [`ElementTree::children`].
#[derive(Debug)]
pub struct Children<'a> {
    tree: &'a ElementTree,
    current: u32,
}

impl<'a> Children<'a> {
    pub(crate) fn new(tree: &'a ElementTree, first: u32) -> Self {
        Self {
            tree,
            current: first,
        }
    }
}

impl Iterator for Children<'_> {
    type Item = ElementId;

    fn next(&mut self) -> Option<ElementId> {
        if self.current == INVALID {
            return None;
        }
        let idx = self.current;
        self.current = self.tree.next_sibling[idx as usize];
        Some(ElementId(idx))
    }
}

/// A depth-first, pre-order iterator over the leaves of a subtree.
///
/// Created by [`ElementTree::leaves`]. The walk follows parent and sibling
/// links instead of keeping a stack, so it uses constant memory regardless of
/// tree depth. Leaves come out in child insertion order.
#[derive(Debug)]
pub struct Leaves<'a> {
    tree: &'a ElementTree,
    start: u32,
    next: u32,
}

impl<'a> Leaves<'a> {
    pub(crate) fn new(tree: &'a ElementTree, start: u32) -> Self {
        Self {
            tree,
            start,
            next: start,
        }
    }

    /// Returns the node visited after `idx` in pre-order, staying inside the
    /// subtree rooted at `self.start`.
    fn successor(&self, idx: u32) -> u32 {
        let first = self.tree.first_child[idx as usize];
        if first != INVALID {
            return first;
        }
        let mut node = idx;
        loop {
            if node == self.start {
                return INVALID;
            }
            let sibling = self.tree.next_sibling[node as usize];
            if sibling != INVALID {
                return sibling;
            }
            node = self.tree.parent[node as usize];
            if node == INVALID {
                return INVALID;
            }
        }
    }
}

impl Iterator for Leaves<'_> {
    type Item = ElementId;

    fn next(&mut self) -> Option<ElementId> {
        while self.next != INVALID {
            let idx = self.next;
            self.next = self.successor(idx);
            if self.tree.is_leaf_at(idx) {
                return Some(ElementId(idx));
            }
        }
        None
    }
}
