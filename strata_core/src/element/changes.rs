// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draining recorded mutations.
//!
//! Every mutator on [`ElementTree`] marks one dirty channel (see
//! [`dirty`](crate::dirty)). [`ElementTree::take_changes`] drains all of them
//! in one go:
//!
//! 1. **GEOMETRY**: elements whose bounds changed.
//! 2. **PAINT**: elements whose fill or stroke changed.
//! 3. **APPEARANCE**: leaves whose radii, text, or font changed.
//! 4. **`Z_ORDER`**: leaves whose z-index changed.
//! 5. **TOPOLOGY**: elements attached since the last drain.
//!
//! Each list is in ascending element order, so draining the same sequence of
//! mutations always yields the same [`TreeChanges`].

use alloc::vec::Vec;

use super::id::ElementId;
use super::tree::ElementTree;
use crate::dirty;

/// The set of changes recorded between two [`ElementTree::take_changes`]
/// calls.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeChanges {
    /// Elements whose bounds changed.
    pub geometry: Vec<ElementId>,
    /// Elements whose paint changed.
    pub paint: Vec<ElementId>,
    /// Leaves whose appearance changed.
    pub appearance: Vec<ElementId>,
    /// Leaves whose z-index changed.
    pub z_order: Vec<ElementId>,
    /// Elements attached to a parent.
    pub attached: Vec<ElementId>,
}

impl TreeChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.geometry.clear();
        self.paint.clear();
        self.appearance.clear();
        self.z_order.clear();
        self.attached.clear();
    }

    /// Returns `true` if nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.geometry.is_empty()
            && self.paint.is_empty()
            && self.appearance.is_empty()
            && self.z_order.is_empty()
            && self.attached.is_empty()
    }

    /// Returns every changed element once, in ascending order.
    #[must_use]
    pub fn elements(&self) -> Vec<ElementId> {
        let mut all: Vec<ElementId> = self
            .geometry
            .iter()
            .chain(&self.paint)
            .chain(&self.appearance)
            .chain(&self.z_order)
            .chain(&self.attached)
            .copied()
            .collect();
        all.sort_unstable();
        all.dedup();
        all
    }
}

impl ElementTree {
    /// Drains every dirty channel and returns what changed.
    pub fn take_changes(&mut self) -> TreeChanges {
        let mut changes = TreeChanges::default();
        self.take_changes_into(&mut changes);
        changes
    }

    /// Like [`take_changes`](Self::take_changes), but reuses a
    /// caller-provided buffer to avoid allocation.
    pub fn take_changes_into(&mut self, changes: &mut TreeChanges) {
        changes.clear();
        self.drain_channel(dirty::GEOMETRY, &mut changes.geometry);
        self.drain_channel(dirty::PAINT, &mut changes.paint);
        self.drain_channel(dirty::APPEARANCE, &mut changes.appearance);
        self.drain_channel(dirty::Z_ORDER, &mut changes.z_order);
        self.drain_channel(dirty::TOPOLOGY, &mut changes.attached);
    }

    /// Records `changes` again, each element on the channel it was drained
    /// from.
    ///
    /// Used to put back a drained set whose redraw did not complete, so the
    /// next [`take_changes`](Self::take_changes) still reports it. Changes
    /// recorded since the drain are kept.
    pub fn restore_changes(&mut self, changes: &TreeChanges) {
        let channels = [
            (dirty::GEOMETRY, &changes.geometry),
            (dirty::PAINT, &changes.paint),
            (dirty::APPEARANCE, &changes.appearance),
            (dirty::Z_ORDER, &changes.z_order),
            (dirty::TOPOLOGY, &changes.attached),
        ];
        for (channel, ids) in channels {
            for id in ids {
                self.dirty.mark(id.0, channel);
            }
        }
    }

    fn drain_channel(&mut self, channel: understory_dirty::Channel, out: &mut Vec<ElementId>) {
        out.extend(
            self.dirty
                .drain(channel)
                .deterministic()
                .run()
                .map(ElementId),
        );
        out.sort_unstable();
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::appearance::{CornerRadii, Font, FontStyle};
    use crate::geometry::{Point, Rect};
    use crate::paint::{Color, Paint};

    #[test]
    fn attach_is_reported_once() {
        let mut tree = ElementTree::new();
        let root = tree.root();
        let a = tree.add_rect(root, Rect::new(0, 0, 10, 10));
        let g = tree.add_container(root);

        let changes = tree.take_changes();
        assert_eq!(changes.attached, vec![a, g]);
        assert!(tree.take_changes().is_empty(), "second drain is empty");
    }

    #[test]
    fn mutations_land_on_their_channel() {
        let mut tree = ElementTree::new();
        let root = tree.root();
        let rect = tree.add_rect(root, Rect::new(0, 0, 10, 10));
        let text = tree.add_text(root, Point::new(0, 0), Font::default(), false);
        let _ = tree.take_changes();

        tree.set_bounds(rect, Rect::new(0, 0, 20, 20));
        tree.set_paint(text, Paint::no_stroke(Color::BLACK));
        tree.set_corner_radii(rect, CornerRadii::uniform(2));
        tree.set_font(text, Font::new("Serif", 9, FontStyle::ITALIC));
        tree.set_z_index(rect, 1.0);

        let changes = tree.take_changes();
        assert_eq!(changes.geometry, vec![rect]);
        assert_eq!(changes.paint, vec![text]);
        assert_eq!(changes.appearance, vec![rect, text]);
        assert_eq!(changes.z_order, vec![rect]);
        assert!(changes.attached.is_empty());
        assert_eq!(changes.elements(), vec![rect, text]);
    }

    #[test]
    fn container_z_index_marks_each_leaf() {
        let mut tree = ElementTree::new();
        let root = tree.root();
        let g = tree.add_container(root);
        let a = tree.add_rect(g, Rect::new(0, 0, 1, 1));
        let b = tree.add_rect(g, Rect::new(0, 0, 1, 1));
        let _ = tree.take_changes();

        tree.set_z_index(g, -1.0);
        assert_eq!(tree.take_changes().z_order, vec![a, b]);
    }

    #[test]
    fn unchanged_fit_is_not_recorded() {
        let mut tree = ElementTree::new();
        let text = tree.add_text(tree.root(), Point::new(3, 3), Font::default(), false);
        let _ = tree.take_changes();

        assert!(!tree.fit_to_content(text, crate::geometry::Size::default()));
        assert!(tree.take_changes().is_empty());
    }

    #[test]
    fn restored_changes_are_drained_again() {
        let mut tree = ElementTree::new();
        let root = tree.root();
        let a = tree.add_rect(root, Rect::new(0, 0, 10, 10));
        let b = tree.add_rect(root, Rect::new(5, 5, 10, 10));
        let _ = tree.take_changes();

        tree.set_bounds(a, Rect::new(0, 0, 20, 20));
        tree.set_paint(b, Paint::no_stroke(Color::BLACK));
        let drained = tree.take_changes();
        assert!(tree.take_changes().is_empty());

        tree.set_z_index(b, 1.0);
        tree.restore_changes(&drained);
        let changes = tree.take_changes();
        assert_eq!(changes.geometry, vec![a]);
        assert_eq!(changes.paint, vec![b]);
        assert_eq!(changes.z_order, vec![b], "newer changes are kept");
    }

    #[test]
    fn take_changes_into_reuses_buffer() {
        let mut tree = ElementTree::new();
        let a = tree.add_rect(tree.root(), Rect::new(0, 0, 1, 1));
        let mut buf = TreeChanges::default();
        tree.take_changes_into(&mut buf);
        assert_eq!(buf.attached, vec![a]);
        tree.take_changes_into(&mut buf);
        assert!(buf.is_empty());
    }
}
