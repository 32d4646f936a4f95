// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render plan: the ordered leaves to paint in one pass.

use alloc::vec::Vec;

use strata_core::backend::{DrawBackend, with_clip};
use strata_core::element::{ElementId, ElementTree};
use strata_core::geometry::Rect;
use strata_core::propagate::{self, RedrawSet};

use crate::damage::DamageRegion;

/// A single paint command in the render plan.
///
/// Items are produced in back-to-front compositing order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderItem {
    /// The leaf to paint.
    pub element: ElementId,
    /// The leaf's bounds when the plan was built (updated if painting
    /// measured a new size).
    pub bounds: Rect,
    /// Clip applied while painting: the leaf's own bounds, or `None` for a
    /// leaf with empty bounds, which is painted unclipped so it can be
    /// measured.
    pub clip: Option<Rect>,
    /// z-index at plan time.
    pub z_index: f32,
    /// Tree depth.
    pub depth: u32,
}

/// Knobs for [`RenderPlan::execute`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaintOptions {
    /// Clip each leaf to its own bounds.
    pub clip_to_leaf_bounds: bool,
    /// Write measured text sizes back into the tree.
    pub fit_text_to_content: bool,
}

impl Default for PaintOptions {
    fn default() -> Self {
        Self {
            clip_to_leaf_bounds: true,
            fit_text_to_content: true,
        }
    }
}

/// Counters for one executed plan.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PaintStats {
    /// Leaves painted.
    pub painted: usize,
    /// Leaves whose bounds changed after measurement.
    pub resized: usize,
}

/// An ordered list of paint commands for a single pass.
#[derive(Clone, Debug, Default)]
pub struct RenderPlan {
    /// Items in back-to-front order.
    pub items: Vec<RenderItem>,
    /// Area touched by the pass.
    pub damage: DamageRegion,
    /// Leaves queued directly from the changed elements.
    pub seed_leaves: usize,
    /// Leaves reachable from the root when the plan was built.
    pub candidate_leaves: usize,
}

impl RenderPlan {
    /// Plans a full draw of every leaf reachable from the root.
    #[must_use]
    pub fn full(tree: &ElementTree) -> Self {
        let set = propagate::full_set(tree, tree.root());
        let mut plan = Self::from_set(tree, set);
        plan.damage = DamageRegion::Full;
        plan
    }

    /// Plans the repaint required after `changed` was modified.
    #[must_use]
    pub fn redraw(tree: &ElementTree, changed: ElementId) -> Self {
        Self::redraw_many(tree, &[changed])
    }

    /// Plans the repaint required after every element in `changed` was
    /// modified.
    #[must_use]
    pub fn redraw_many(tree: &ElementTree, changed: &[ElementId]) -> Self {
        let set = propagate::redraw_set_many(tree, changed, tree.root());
        let mut plan = Self::from_set(tree, set);
        plan.damage = DamageRegion::from_rects(plan.items.iter().map(|item| item.bounds));
        plan
    }

    fn from_set(tree: &ElementTree, set: RedrawSet) -> Self {
        let items = set
            .leaves
            .iter()
            .map(|&element| {
                let bounds = tree.bounds(element);
                RenderItem {
                    element,
                    bounds,
                    clip: (!bounds.is_empty()).then_some(bounds),
                    z_index: tree.z_index(element),
                    depth: tree.depth(element),
                }
            })
            .collect();
        Self {
            items,
            damage: DamageRegion::None,
            seed_leaves: set.seed_leaves,
            candidate_leaves: set.candidate_leaves,
        }
    }

    /// Returns the number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the plan paints nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the planned elements in paint order.
    pub fn elements(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.items.iter().map(|item| item.element)
    }

    /// Clears the plan for reuse.
    pub fn clear(&mut self) {
        self.items.clear();
        self.damage = DamageRegion::None;
        self.seed_leaves = 0;
        self.candidate_leaves = 0;
    }

    /// Paints every item, in order, on `backend`.
    ///
    /// Each leaf is painted inside its clip (unless disabled by `options`).
    /// When a text leaf reports a measured size different from its bounds,
    /// the tree is updated (marking the element's geometry dirty), and the
    /// item and damage region follow the new bounds.
    ///
    /// # Errors
    ///
    /// Returns the first backend error unchanged. Items after the failing
    /// one are not painted; the failing item's clip is still popped.
    pub fn execute<B: DrawBackend + ?Sized>(
        &mut self,
        tree: &mut ElementTree,
        backend: &mut B,
        options: PaintOptions,
    ) -> Result<PaintStats, B::Error> {
        let mut stats = PaintStats::default();
        for item in &mut self.items {
            let paint = tree.paint(item.element);
            let appearance = tree.appearance(item.element);
            let bounds = item.bounds;
            let measured = match item.clip.filter(|_| options.clip_to_leaf_bounds) {
                Some(clip) => with_clip(backend, clip, |b| appearance.render(bounds, &paint, b))?,
                None => appearance.render(bounds, &paint, backend)?,
            };
            stats.painted += 1;

            let Some(size) = measured else { continue };
            if options.fit_text_to_content && tree.fit_to_content(item.element, size) {
                item.bounds = tree.bounds(item.element);
                self.damage.add_rect(item.bounds);
                stats.resized += 1;
            }
        }
        Ok(stats)
    }
}
