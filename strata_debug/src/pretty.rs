// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use strata_core::geometry::Rect;
use strata_core::trace::{
    FlushEvent, LeafPaint, RedrawBeginEvent, RedrawKind, RedrawSetEvent, TraceSink, ViewportEvent,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    verbose: bool,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("verbose", &self.verbose)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
            verbose: false,
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self {
            writer,
            verbose: false,
        }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            verbose: false,
        }
    }

    /// Also prints one line per painted leaf and damage rectangle.
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn kind_name(kind: RedrawKind) -> &'static str {
    match kind {
        RedrawKind::Full => "full",
        RedrawKind::Incremental => "incremental",
        RedrawKind::Pending => "pending",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_viewport(&mut self, e: &ViewportEvent) {
        let _ = writeln!(
            self.writer,
            "[viewport] frame={} size={}x{}",
            e.frame_index, e.width, e.height,
        );
    }

    fn on_redraw_begin(&mut self, e: &RedrawBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[redraw] frame={} kind={} changed={}",
            e.frame_index,
            kind_name(e.kind),
            e.changed_elements,
        );
    }

    fn on_redraw_set(&mut self, e: &RedrawSetEvent) {
        let _ = writeln!(
            self.writer,
            "[set] frame={} seeds={} queued={}/{}",
            e.frame_index, e.seed_leaves, e.queued_leaves, e.candidate_leaves,
        );
    }

    fn on_flush(&mut self, e: &FlushEvent) {
        let flushed = if e.flushed { "flushed" } else { "held" };
        let _ = writeln!(
            self.writer,
            "[flush] frame={} painted={} resized={} {flushed}",
            e.frame_index, e.painted_leaves, e.resized_leaves,
        );
    }

    fn on_leaf_paints(&mut self, frame_index: u64, leaves: &[LeafPaint]) {
        let _ = writeln!(
            self.writer,
            "[paint] frame={frame_index} leaves={}",
            leaves.len(),
        );
        if !self.verbose {
            return;
        }
        for leaf in leaves {
            let _ = match leaf.clip {
                Some(clip) => writeln!(
                    self.writer,
                    "  #{} z={} depth={} clip={clip:?}",
                    leaf.element_index, leaf.z_index, leaf.depth,
                ),
                None => writeln!(
                    self.writer,
                    "  #{} z={} depth={} unclipped",
                    leaf.element_index, leaf.z_index, leaf.depth,
                ),
            };
        }
    }

    fn on_damage_rects(&mut self, frame_index: u64, rects: &[Rect]) {
        let _ = writeln!(
            self.writer,
            "[damage] frame={frame_index} rects={}",
            rects.len(),
        );
        if self.verbose {
            for rect in rects {
                let _ = writeln!(self.writer, "  {rect:?}");
            }
        }
    }
}
