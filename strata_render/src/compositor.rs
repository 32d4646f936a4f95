// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame driver: plans, paints, flushes, and traces redraw passes.
//!
//! [`Compositor`] is the produced interface of the engine. It owns no scene
//! state, only its [`CompositorConfig`], a pass counter, and the last known
//! viewport size; the [`ElementTree`] and the backend are borrowed per call.
//!
//! Each pass follows the same steps:
//!
//! 1. Emit [`RedrawBeginEvent`].
//! 2. Build a [`RenderPlan`] (full, or via the dirty-region propagator).
//! 3. Emit [`RedrawSetEvent`].
//! 4. Execute the plan on the backend.
//! 5. Flush according to [`FlushPolicy`] and emit [`FlushEvent`].
//!
//! # Measured text
//!
//! Painting a text leaf may grow its bounds. During a full draw everything is
//! repainted anyway, so [`Compositor::draw`] discards all recorded changes.
//! During an incremental pass the growth is left recorded, and the next
//! [`Compositor::redraw_pending`] repaints whatever the new bounds overlap.

use strata_core::backend::RenderBackend;
use strata_core::element::{ElementId, ElementTree};
use strata_core::geometry::Size;
use strata_core::trace::{
    FlushEvent, RedrawBeginEvent, RedrawKind, RedrawSetEvent, Tracer, ViewportEvent, count_u32,
};

use crate::damage::DamageRegion;
use crate::plan::{PaintOptions, PaintStats, RenderPlan};

/// When the compositor calls [`RenderBackend::flush`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FlushPolicy {
    /// Flush at the end of every pass that painted something.
    #[default]
    EveryPass,
    /// Never flush; the caller batches passes and flushes itself.
    Manual,
}

/// Configuration for the [`Compositor`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompositorConfig {
    /// Clip each leaf's paint to its own bounds.
    pub clip_to_leaf_bounds: bool,
    /// Grow text leaves to their measured size after painting.
    pub fit_text_to_content: bool,
    /// When to flush the backend.
    pub flush: FlushPolicy,
}

impl CompositorConfig {
    /// One flush per pass, suited to event-driven UIs.
    #[must_use]
    pub const fn interactive() -> Self {
        Self {
            clip_to_leaf_bounds: true,
            fit_text_to_content: true,
            flush: FlushPolicy::EveryPass,
        }
    }

    /// Caller-controlled flushing, for coalescing several passes into one
    /// presented frame.
    #[must_use]
    pub const fn batched() -> Self {
        Self {
            flush: FlushPolicy::Manual,
            ..Self::interactive()
        }
    }

    /// Returns the per-plan paint options.
    #[must_use]
    pub const fn paint_options(&self) -> PaintOptions {
        PaintOptions {
            clip_to_leaf_bounds: self.clip_to_leaf_bounds,
            fit_text_to_content: self.fit_text_to_content,
        }
    }
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self::interactive()
    }
}

/// Outcome of one redraw pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PassReport {
    /// Pass counter value of this pass.
    pub frame_index: u64,
    /// What started the pass.
    pub kind: RedrawKind,
    /// Paint counters.
    pub stats: PaintStats,
    /// Area touched by the pass.
    pub damage: DamageRegion,
    /// Whether the backend was flushed.
    pub flushed: bool,
}

/// Drives redraw passes for one scene and one backend.
#[derive(Clone, Debug, Default)]
pub struct Compositor {
    config: CompositorConfig,
    frame_index: u64,
    viewport: Size,
}

impl Compositor {
    /// Creates a compositor with the given configuration.
    #[must_use]
    pub fn new(config: CompositorConfig) -> Self {
        Self {
            config,
            frame_index: 0,
            viewport: Size::default(),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &CompositorConfig {
        &self.config
    }

    /// Returns the number of passes started so far.
    #[must_use]
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Returns the last viewport size given to the backend.
    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Initializes the backend surface. Call once before the first pass.
    ///
    /// # Errors
    ///
    /// Returns the backend's error unchanged.
    pub fn init<B: RenderBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        width: u32,
        height: u32,
        tracer: &mut Tracer<'_>,
    ) -> Result<(), B::Error> {
        backend.init(width, height)?;
        self.set_viewport(width, height, tracer);
        Ok(())
    }

    /// Resizes the backend viewport and repaints the whole scene.
    ///
    /// # Errors
    ///
    /// Returns the backend's error unchanged.
    pub fn resize<B: RenderBackend + ?Sized>(
        &mut self,
        tree: &mut ElementTree,
        backend: &mut B,
        width: u32,
        height: u32,
        tracer: &mut Tracer<'_>,
    ) -> Result<PassReport, B::Error> {
        backend.update_viewport_size(width, height)?;
        self.set_viewport(width, height, tracer);
        self.draw(tree, backend, tracer)
    }

    /// Paints every leaf back-to-front without an overlap search.
    ///
    /// Changes recorded before or during the pass are discarded.
    ///
    /// # Errors
    ///
    /// Returns the first backend error unchanged.
    pub fn draw<B: RenderBackend + ?Sized>(
        &mut self,
        tree: &mut ElementTree,
        backend: &mut B,
        tracer: &mut Tracer<'_>,
    ) -> Result<PassReport, B::Error> {
        let frame_index = self.begin(RedrawKind::Full, 0, tracer);
        let plan = RenderPlan::full(tree);
        let report = self.run(frame_index, RedrawKind::Full, plan, tree, backend, tracer)?;
        let _ = tree.take_changes();
        Ok(report)
    }

    /// Repaints the leaves affected by a change to `changed`.
    ///
    /// Each leaf is clipped to the bounds it had when the pass started. A
    /// text leaf that grows when measured is therefore cut off at its old
    /// bounds; the growth is recorded and a later
    /// [`redraw_pending`](Self::redraw_pending) paints it in full.
    ///
    /// # Errors
    ///
    /// Returns the first backend error unchanged.
    pub fn redraw<B: RenderBackend + ?Sized>(
        &mut self,
        tree: &mut ElementTree,
        changed: ElementId,
        backend: &mut B,
        tracer: &mut Tracer<'_>,
    ) -> Result<PassReport, B::Error> {
        self.redraw_many(tree, &[changed], backend, tracer)
    }

    /// Repaints the leaves affected by changes to every element in
    /// `changed`, in one pass.
    ///
    /// Recorded changes are left in place; a later
    /// [`redraw_pending`](Self::redraw_pending) still sees them.
    ///
    /// # Errors
    ///
    /// Returns the first backend error unchanged.
    pub fn redraw_many<B: RenderBackend + ?Sized>(
        &mut self,
        tree: &mut ElementTree,
        changed: &[ElementId],
        backend: &mut B,
        tracer: &mut Tracer<'_>,
    ) -> Result<PassReport, B::Error> {
        let kind = RedrawKind::Incremental;
        let frame_index = self.begin(kind, changed.len(), tracer);
        let plan = RenderPlan::redraw_many(tree, changed);
        self.run(frame_index, kind, plan, tree, backend, tracer)
    }

    /// Repaints everything recorded since the previous drain.
    ///
    /// Returns `Ok(None)` without touching the backend when nothing changed.
    ///
    /// # Errors
    ///
    /// Returns the first backend error unchanged. The drained changes are
    /// recorded again, so the next call retries them.
    pub fn redraw_pending<B: RenderBackend + ?Sized>(
        &mut self,
        tree: &mut ElementTree,
        backend: &mut B,
        tracer: &mut Tracer<'_>,
    ) -> Result<Option<PassReport>, B::Error> {
        let changes = tree.take_changes();
        if changes.is_empty() {
            return Ok(None);
        }
        let changed = changes.elements();
        let kind = RedrawKind::Pending;
        let frame_index = self.begin(kind, changed.len(), tracer);
        let plan = RenderPlan::redraw_many(tree, &changed);
        match self.run(frame_index, kind, plan, tree, backend, tracer) {
            Ok(report) => Ok(Some(report)),
            Err(err) => {
                tree.restore_changes(&changes);
                Err(err)
            }
        }
    }

    fn set_viewport(&mut self, width: u32, height: u32, tracer: &mut Tracer<'_>) {
        self.viewport = Size::new(width, height);
        tracer.viewport(&ViewportEvent {
            frame_index: self.frame_index,
            width,
            height,
        });
    }

    fn begin(&mut self, kind: RedrawKind, changed: usize, tracer: &mut Tracer<'_>) -> u64 {
        let frame_index = self.frame_index;
        self.frame_index += 1;
        tracer.redraw_begin(&RedrawBeginEvent {
            frame_index,
            kind,
            changed_elements: count_u32(changed),
        });
        frame_index
    }

    fn run<B: RenderBackend + ?Sized>(
        &self,
        frame_index: u64,
        kind: RedrawKind,
        mut plan: RenderPlan,
        tree: &mut ElementTree,
        backend: &mut B,
        tracer: &mut Tracer<'_>,
    ) -> Result<PassReport, B::Error> {
        tracer.redraw_set(&RedrawSetEvent {
            frame_index,
            seed_leaves: count_u32(plan.seed_leaves),
            queued_leaves: count_u32(plan.len()),
            candidate_leaves: count_u32(plan.candidate_leaves),
        });

        let stats = plan.execute(tree, backend, self.config.paint_options())?;

        #[cfg(feature = "trace-rich")]
        self.trace_rich(frame_index, &plan, tracer);

        let flushed = self.config.flush == FlushPolicy::EveryPass && stats.painted > 0;
        if flushed {
            backend.flush()?;
        }
        tracer.flush(&FlushEvent {
            frame_index,
            painted_leaves: count_u32(stats.painted),
            resized_leaves: count_u32(stats.resized),
            flushed,
        });

        Ok(PassReport {
            frame_index,
            kind,
            stats,
            damage: plan.damage,
            flushed,
        })
    }

    #[cfg(feature = "trace-rich")]
    fn trace_rich(&self, frame_index: u64, plan: &RenderPlan, tracer: &mut Tracer<'_>) {
        use alloc::vec::Vec;
        use strata_core::geometry::Rect;
        use strata_core::trace::LeafPaint;

        if !tracer.is_enabled() {
            return;
        }
        let clip = self.config.clip_to_leaf_bounds;
        let leaves: Vec<LeafPaint> = plan
            .items
            .iter()
            .map(|item| LeafPaint {
                element_index: item.element.index(),
                clip: item.clip.filter(|_| clip),
                z_index: item.z_index,
                depth: item.depth,
            })
            .collect();
        tracer.leaf_paints(frame_index, &leaves);

        match &plan.damage {
            DamageRegion::Full => {
                let view = Rect::from_origin_size(0, 0, self.viewport.width, self.viewport.height);
                tracer.damage_rects(frame_index, &[view]);
            }
            DamageRegion::Rects(rects) => tracer.damage_rects(frame_index, rects),
            DamageRegion::None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use strata_core::appearance::{Font, FontStyle};
    use strata_core::geometry::{Point, Rect};
    use strata_debug::backend::{DrawCommand, RecordingBackend, RecordingError};

    use super::*;

    fn scene() -> (ElementTree, [ElementId; 3]) {
        let mut tree = ElementTree::new();
        let root = tree.root();
        let a = tree.add_rect(root, Rect::new(0, 0, 100, 100));
        let b = tree.add_rect(root, Rect::new(70, 70, 120, 120));
        let c = tree.add_rect(root, Rect::new(200, 200, 300, 300));
        (tree, [a, b, c])
    }

    fn flushes(backend: &RecordingBackend) -> usize {
        backend
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Flush))
            .count()
    }

    #[test]
    fn config_presets() {
        assert_eq!(CompositorConfig::default(), CompositorConfig::interactive());
        assert_eq!(CompositorConfig::batched().flush, FlushPolicy::Manual);
        assert!(CompositorConfig::batched().clip_to_leaf_bounds);
    }

    #[test]
    fn init_then_draw() {
        let (mut tree, _) = scene();
        let mut backend = RecordingBackend::new();
        let mut compositor = Compositor::default();
        let mut tracer = Tracer::none();

        compositor
            .init(&mut backend, 640, 480, &mut tracer)
            .unwrap();
        let report = compositor.draw(&mut tree, &mut backend, &mut tracer).unwrap();

        assert_eq!(compositor.viewport(), Size::new(640, 480));
        assert_eq!(report.frame_index, 0);
        assert_eq!(report.kind, RedrawKind::Full);
        assert_eq!(report.stats.painted, 3);
        assert!(report.flushed);
        assert_eq!(backend.commands()[0], DrawCommand::Init { width: 640, height: 480 });
        assert_eq!(flushes(&backend), 1);
        assert!(tree.take_changes().is_empty(), "draw discards changes");
    }

    #[test]
    fn redraw_pending_is_a_no_op_when_clean() {
        let (mut tree, _) = scene();
        let mut backend = RecordingBackend::new();
        let mut compositor = Compositor::default();
        let mut tracer = Tracer::none();
        compositor.draw(&mut tree, &mut backend, &mut tracer).unwrap();
        backend.clear();

        let report = compositor
            .redraw_pending(&mut tree, &mut backend, &mut tracer)
            .unwrap();
        assert_eq!(report, None);
        assert!(backend.commands().is_empty());
        assert_eq!(compositor.frame_index(), 1);
    }

    #[test]
    fn redraw_pending_repaints_overlaps_of_changes() {
        let (mut tree, [a, b, c]) = scene();
        let mut backend = RecordingBackend::new();
        let mut compositor = Compositor::default();
        let mut tracer = Tracer::none();
        compositor.draw(&mut tree, &mut backend, &mut tracer).unwrap();
        backend.clear();

        tree.set_paint(b, strata_core::paint::Paint::default());
        let report = compositor
            .redraw_pending(&mut tree, &mut backend, &mut tracer)
            .unwrap()
            .unwrap();

        assert_eq!(report.kind, RedrawKind::Pending);
        assert_eq!(report.stats.painted, 2);
        assert_eq!(
            backend.draw_areas(),
            vec![tree.bounds(a), tree.bounds(b)],
            "{c:?} is disjoint and stays untouched"
        );
        assert_eq!(flushes(&backend), 1);
    }

    #[test]
    fn failed_pending_pass_keeps_changes_for_retry() {
        let (mut tree, [a, b, _]) = scene();
        let mut backend = RecordingBackend::new();
        let mut compositor = Compositor::default();
        let mut tracer = Tracer::none();
        compositor.draw(&mut tree, &mut backend, &mut tracer).unwrap();
        backend.clear();

        tree.set_bounds(a, Rect::new(0, 0, 90, 90));
        backend.fail_on_draw(1);
        let err = compositor
            .redraw_pending(&mut tree, &mut backend, &mut tracer)
            .unwrap_err();
        assert_eq!(err, RecordingError::Injected { call: 1 });
        assert_eq!(backend.clip_depth(), 0);

        let report = compositor
            .redraw_pending(&mut tree, &mut backend, &mut tracer)
            .unwrap()
            .expect("failed changes are redrawn");
        assert_eq!(report.stats.painted, 2);
        assert_eq!(backend.draw_areas(), vec![tree.bounds(a), tree.bounds(b)]);
        assert_eq!(
            compositor
                .redraw_pending(&mut tree, &mut backend, &mut tracer)
                .unwrap(),
            None
        );
    }

    #[test]
    fn grown_text_is_completed_by_redraw_pending() {
        let mut tree = ElementTree::new();
        let text = tree.add_text(
            tree.root(),
            Point::new(0, 0),
            Font::new("Mono", 10, FontStyle::REGULAR),
            false,
        );
        tree.set_text(text, "ab");
        let mut backend = RecordingBackend::new();
        let mut compositor = Compositor::default();
        let mut tracer = Tracer::none();
        compositor.draw(&mut tree, &mut backend, &mut tracer).unwrap();
        assert_eq!(tree.bounds(text), Rect::new(0, 0, 10, 10));
        backend.clear();

        tree.set_text(text, "abcd");
        let report = compositor
            .redraw(&mut tree, text, &mut backend, &mut tracer)
            .unwrap();
        assert_eq!(report.stats.resized, 1);
        assert_eq!(tree.bounds(text), Rect::new(0, 0, 20, 10));

        let report = compositor
            .redraw_pending(&mut tree, &mut backend, &mut tracer)
            .unwrap()
            .expect("growth is pending");
        assert_eq!(report.stats.resized, 0);

        let clips: Vec<Option<Rect>> = backend
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { clip, .. } => Some(*clip),
                _ => None,
            })
            .collect();
        assert_eq!(
            clips,
            vec![Some(Rect::new(0, 0, 10, 10)), Some(Rect::new(0, 0, 20, 10))]
        );
    }

    #[test]
    fn redraw_of_empty_container_does_not_flush() {
        let (mut tree, _) = scene();
        let group = tree.add_container(tree.root());
        let mut backend = RecordingBackend::new();
        let mut compositor = Compositor::default();

        let report = compositor
            .redraw(&mut tree, group, &mut backend, &mut Tracer::none())
            .unwrap();
        assert_eq!(report.stats, PaintStats::default());
        assert!(!report.flushed);
        assert!(backend.commands().is_empty());
    }

    #[test]
    fn batched_config_leaves_flushing_to_the_caller() {
        let (mut tree, [a, ..]) = scene();
        let mut backend = RecordingBackend::new();
        let mut compositor = Compositor::new(CompositorConfig::batched());
        let mut tracer = Tracer::none();

        compositor.draw(&mut tree, &mut backend, &mut tracer).unwrap();
        compositor
            .redraw(&mut tree, a, &mut backend, &mut tracer)
            .unwrap();
        assert_eq!(flushes(&backend), 0);
        assert_eq!(compositor.frame_index(), 2);
    }

    #[test]
    fn resize_updates_viewport_and_redraws_everything() {
        let (mut tree, _) = scene();
        let mut backend = RecordingBackend::new();
        let mut compositor = Compositor::default();
        let mut tracer = Tracer::none();
        compositor.init(&mut backend, 100, 100, &mut tracer).unwrap();

        let report = compositor
            .resize(&mut tree, &mut backend, 300, 200, &mut tracer)
            .unwrap();
        assert_eq!(report.damage, DamageRegion::Full);
        assert_eq!(report.stats.painted, 3);
        assert_eq!(compositor.viewport(), Size::new(300, 200));
        assert!(
            backend
                .commands()
                .contains(&DrawCommand::Viewport { width: 300, height: 200 })
        );
    }

    #[test]
    fn text_growth_is_repainted_by_the_next_pending_pass() {
        let mut tree = ElementTree::new();
        let root = tree.root();
        let label = tree.add_text(root, Point::new(0, 0), Font::new("Mono", 10, FontStyle::BOLD), false);
        tree.set_text(label, "hello");
        let cover = tree.add_rect(root, Rect::new(20, 0, 40, 10));
        tree.set_z_index(cover, 1.0);

        let mut backend = RecordingBackend::new();
        let mut compositor = Compositor::default();
        let mut tracer = Tracer::none();
        compositor.draw(&mut tree, &mut backend, &mut tracer).unwrap();
        assert_eq!(tree.bounds(label), Rect::new(0, 0, 25, 10));

        tree.set_text(label, "hi");
        compositor
            .redraw(&mut tree, label, &mut backend, &mut tracer)
            .unwrap();
        backend.clear();

        // "hi" shrank the label, which was recorded during the pass.
        let report = compositor
            .redraw_pending(&mut tree, &mut backend, &mut tracer)
            .unwrap()
            .unwrap();
        assert_eq!(report.stats.painted, 1);
        assert_eq!(tree.bounds(label), Rect::new(0, 0, 10, 10));
    }

    #[test]
    fn backend_errors_propagate_unchanged() {
        let (mut tree, _) = scene();
        let mut backend = RecordingBackend::new();
        backend.fail_on_draw(3);
        let mut compositor = Compositor::default();

        let err = compositor
            .draw(&mut tree, &mut backend, &mut Tracer::none())
            .unwrap_err();
        assert_eq!(err, RecordingError::Injected { call: 3 });
        assert_eq!(flushes(&backend), 0);
        assert_eq!(backend.clip_depth(), 0);
    }

    #[cfg(feature = "trace")]
    #[test]
    fn passes_are_traced() {
        use strata_debug::recorder::{RecordedEvent, RecorderSink, decode};

        let (mut tree, [a, ..]) = scene();
        let mut backend = RecordingBackend::new();
        let mut compositor = Compositor::default();
        let mut sink = RecorderSink::new();
        {
            let mut tracer = Tracer::new(&mut sink);
            compositor.init(&mut backend, 320, 320, &mut tracer).unwrap();
            compositor.draw(&mut tree, &mut backend, &mut tracer).unwrap();
            compositor
                .redraw(&mut tree, a, &mut backend, &mut tracer)
                .unwrap();
        }

        let events: Vec<_> = decode(sink.as_bytes()).collect();
        let sets: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                RecordedEvent::RedrawSet(set) => Some(set.queued_leaves),
                _ => None,
            })
            .collect();
        assert_eq!(sets, vec![3, 2]);
        assert!(matches!(events[0], RecordedEvent::Viewport(_)));
        assert!(matches!(events.last(), Some(RecordedEvent::Flush(f)) if f.frame_index == 1));
    }
}
