// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for redraw passes.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! compositor calls at each stage of a pass. All method bodies default to
//! no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! A pass emits, in order: [`ViewportEvent`] (only on init or resize),
//! [`RedrawBeginEvent`], [`RedrawSetEvent`], the `trace-rich` events, and
//! finally [`FlushEvent`].
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).
//! - `trace-rich` (implies `trace`): gates [`LeafPaint`] and damage-rectangle
//!   events plus the corresponding `TraceSink` methods.

#[cfg(feature = "trace-rich")]
use crate::geometry::Rect;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// What started a redraw pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RedrawKind {
    /// Every leaf is repainted (startup, resize, full invalidation).
    Full,
    /// An explicit redraw of one or more changed elements.
    Incremental,
    /// A redraw of everything recorded since the previous drain.
    Pending,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when the backend viewport is initialized or resized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewportEvent {
    /// Pass counter at the time of the change.
    pub frame_index: u64,
    /// New viewport width.
    pub width: u32,
    /// New viewport height.
    pub height: u32,
}

/// Marks the beginning of a redraw pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RedrawBeginEvent {
    /// Monotonic pass counter.
    pub frame_index: u64,
    /// What started the pass.
    pub kind: RedrawKind,
    /// Number of changed elements seeding the pass (0 for full passes).
    pub changed_elements: u32,
}

/// Emitted once the redraw set is known.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RedrawSetEvent {
    /// Pass counter.
    pub frame_index: u64,
    /// Leaves queued directly from the changed elements.
    pub seed_leaves: u32,
    /// Leaves queued in total, seeds included.
    pub queued_leaves: u32,
    /// Leaves reachable from the traversal root.
    pub candidate_leaves: u32,
}

/// Emitted after the last leaf of a pass has been painted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlushEvent {
    /// Pass counter.
    pub frame_index: u64,
    /// Leaves painted during the pass.
    pub painted_leaves: u32,
    /// Text leaves whose bounds changed after measurement.
    pub resized_leaves: u32,
    /// Whether the backend was flushed at the end of the pass.
    pub flushed: bool,
}

/// One painted leaf, in paint order.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LeafPaint {
    /// Index of the painted leaf.
    pub element_index: u32,
    /// Clip applied while painting, if any.
    pub clip: Option<Rect>,
    /// z-index used for ordering.
    pub z_index: f32,
    /// Tree depth used for ordering.
    pub depth: u32,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the compositor.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when the viewport is initialized or resized.
    fn on_viewport(&mut self, e: &ViewportEvent) {
        _ = e;
    }

    /// Called at the beginning of a redraw pass.
    fn on_redraw_begin(&mut self, e: &RedrawBeginEvent) {
        _ = e;
    }

    /// Called once the redraw set is computed.
    fn on_redraw_set(&mut self, e: &RedrawSetEvent) {
        _ = e;
    }

    /// Called at the end of a redraw pass.
    fn on_flush(&mut self, e: &FlushEvent) {
        _ = e;
    }

    /// Called with the painted leaves of a pass (requires `trace-rich`).
    #[cfg(feature = "trace-rich")]
    fn on_leaf_paints(&mut self, frame_index: u64, leaves: &[LeafPaint]) {
        _ = (frame_index, leaves);
    }

    /// Called with the damaged rectangles of a pass (requires `trace-rich`).
    #[cfg(feature = "trace-rich")]
    fn on_damage_rects(&mut self, frame_index: u64, rects: &[Rect]) {
        _ = (frame_index, rects);
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Returns `true` if events reach a sink.
    ///
    /// Use this to skip building rich payloads nobody will see.
    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        #[cfg(feature = "trace")]
        {
            self.sink.is_some()
        }
        #[cfg(not(feature = "trace"))]
        {
            false
        }
    }

    /// Emits a [`ViewportEvent`].
    #[inline]
    pub fn viewport(&mut self, e: &ViewportEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_viewport(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RedrawBeginEvent`].
    #[inline]
    pub fn redraw_begin(&mut self, e: &RedrawBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_redraw_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RedrawSetEvent`].
    #[inline]
    pub fn redraw_set(&mut self, e: &RedrawSetEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_redraw_set(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`FlushEvent`].
    #[inline]
    pub fn flush(&mut self, e: &FlushEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_flush(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits painted leaves (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn leaf_paints(&mut self, frame_index: u64, leaves: &[LeafPaint]) {
        if let Some(s) = &mut self.sink {
            s.on_leaf_paints(frame_index, leaves);
        }
    }

    /// Emits damage rectangles (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn damage_rects(&mut self, frame_index: u64, rects: &[Rect]) {
        if let Some(s) = &mut self.sink {
            s.on_damage_rects(frame_index, rects);
        }
    }
}

/// Saturating `usize` to `u32` conversion for event counters.
#[inline]
#[must_use]
pub fn count_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_begin() -> RedrawBeginEvent {
        RedrawBeginEvent {
            frame_index: 42,
            kind: RedrawKind::Incremental,
            changed_elements: 3,
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_redraw_begin(&sample_begin());
        sink.on_flush(&FlushEvent {
            frame_index: 42,
            painted_leaves: 0,
            resized_leaves: 0,
            flushed: true,
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        assert!(!tracer.is_enabled());
        tracer.redraw_begin(&sample_begin());
        tracer.viewport(&ViewportEvent {
            frame_index: 0,
            width: 640,
            height: 480,
        });
    }

    #[test]
    fn count_saturates() {
        assert_eq!(count_u32(7), 7);
        assert_eq!(count_u32(usize::MAX), u32::MAX);
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            begins: Vec<u64>,
            queued: Vec<u32>,
        }
        impl TraceSink for RecordingSink {
            fn on_redraw_begin(&mut self, e: &RedrawBeginEvent) {
                self.begins.push(e.frame_index);
            }
            fn on_redraw_set(&mut self, e: &RedrawSetEvent) {
                self.queued.push(e.queued_leaves);
            }
        }

        let mut sink = RecordingSink {
            begins: Vec::new(),
            queued: Vec::new(),
        };
        let mut tracer = Tracer::new(&mut sink);
        assert!(tracer.is_enabled());
        tracer.redraw_begin(&sample_begin());
        tracer.redraw_set(&RedrawSetEvent {
            frame_index: 42,
            seed_leaves: 1,
            queued_leaves: 4,
            candidate_leaves: 9,
        });
        // Access sink after tracer is dropped.
        drop(tracer);
        assert_eq!(sink.begins, &[42]);
        assert_eq!(sink.queued, &[4]);
    }
}
