// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Builds a small scene and drives it through a few edit/redraw cycles.
//!
//! Every pass is traced to both a
//! [`PrettyPrintSink`](strata_debug::pretty::PrettyPrintSink) on stdout and a
//! [`RecorderSink`](strata_debug::recorder::RecorderSink); the recording is
//! exported as JSON at the end. Drawing goes to a
//! [`RecordingBackend`](strata_debug::backend::RecordingBackend), whose
//! command log is summarized after each pass.

use std::fs::File;
use std::io::BufWriter;

use strata_core::appearance::{CornerRadii, Font, FontStyle};
use strata_core::element::{ElementId, ElementTree};
use strata_core::geometry::{Point, Rect};
use strata_core::paint::{Color, Paint};
use strata_core::trace::{
    FlushEvent, LeafPaint, RedrawBeginEvent, RedrawSetEvent, TraceSink, Tracer, ViewportEvent,
};
use strata_render::{Compositor, CompositorConfig, PassReport};

use strata_debug::backend::{DrawCommand, RecordingBackend};
use strata_debug::pretty::PrettyPrintSink;
use strata_debug::recorder::RecorderSink;

/// Forwards every event to both sinks.
struct Fanout<'a> {
    pretty: &'a mut PrettyPrintSink,
    recorder: &'a mut RecorderSink,
}

impl TraceSink for Fanout<'_> {
    fn on_viewport(&mut self, e: &ViewportEvent) {
        self.pretty.on_viewport(e);
        self.recorder.on_viewport(e);
    }

    fn on_redraw_begin(&mut self, e: &RedrawBeginEvent) {
        self.pretty.on_redraw_begin(e);
        self.recorder.on_redraw_begin(e);
    }

    fn on_redraw_set(&mut self, e: &RedrawSetEvent) {
        self.pretty.on_redraw_set(e);
        self.recorder.on_redraw_set(e);
    }

    fn on_flush(&mut self, e: &FlushEvent) {
        self.pretty.on_flush(e);
        self.recorder.on_flush(e);
    }

    fn on_leaf_paints(&mut self, frame_index: u64, leaves: &[LeafPaint]) {
        self.pretty.on_leaf_paints(frame_index, leaves);
        self.recorder.on_leaf_paints(frame_index, leaves);
    }

    fn on_damage_rects(&mut self, frame_index: u64, rects: &[Rect]) {
        self.pretty.on_damage_rects(frame_index, rects);
        self.recorder.on_damage_rects(frame_index, rects);
    }
}

struct Scene {
    tree: ElementTree,
    card: ElementId,
    backdrop: ElementId,
    badge: ElementId,
    footer: ElementId,
    title: ElementId,
}

fn build_scene() -> Scene {
    let mut tree = ElementTree::new();
    let root = tree.root();

    let backdrop = tree.add_rect(root, Rect::new(0, 0, 300, 300));
    tree.set_paint(backdrop, Paint::no_stroke(Color::from_rgb8(0x20, 0x24, 0x30)));
    tree.set_z_index(backdrop, -1.0);

    let panel = tree.add_container(root);
    let card = tree.add_rect(panel, Rect::new(0, 0, 100, 100));
    tree.set_paint(
        card,
        Paint::new(Color::from_rgb8(0xe0, 0x60, 0x40), Color::WHITE, 2),
    );
    tree.set_corner_radii(card, CornerRadii::uniform(8));
    let badge = tree.add_rect(panel, Rect::new(70, 70, 120, 120));
    tree.set_paint(badge, Paint::no_stroke(Color::from_rgb8(0x40, 0xa0, 0xe0)));

    let footer = tree.add_rect(root, Rect::new(200, 200, 300, 300));
    tree.set_paint(footer, Paint::no_stroke(Color::from_rgb8(0x60, 0x60, 0x60)));

    let title = tree.add_text(
        root,
        Point::new(130, 10),
        Font::new("Sans", 16, FontStyle::BOLD),
        false,
    );
    tree.set_text(title, "Strata");
    tree.set_paint(title, Paint::no_stroke(Color::WHITE));

    Scene {
        tree,
        card,
        backdrop,
        badge,
        footer,
        title,
    }
}

fn summarize(label: &str, report: Option<&PassReport>, backend: &mut RecordingBackend) {
    let commands = backend.take_commands();
    let draws = commands
        .iter()
        .filter(|c| matches!(c, DrawCommand::Rect { .. } | DrawCommand::Text { .. }))
        .count();
    match report {
        Some(report) => println!(
            "  {label}: frame {} painted {} leaves ({draws} draw calls), damage {:?}",
            report.frame_index, report.stats.painted, report.damage,
        ),
        None => println!("  {label}: nothing to redraw"),
    }
}

fn main() {
    let mut pretty = PrettyPrintSink::new(Box::new(std::io::stdout())).verbose(true);
    let mut recorder = RecorderSink::new();

    let Scene {
        mut tree,
        card,
        backdrop,
        badge,
        footer,
        title,
    } = build_scene();
    let mut backend = RecordingBackend::new();
    let mut compositor = Compositor::new(CompositorConfig::interactive());

    {
        let mut fanout = Fanout {
            pretty: &mut pretty,
            recorder: &mut recorder,
        };
        let mut tracer = Tracer::new(&mut fanout);

        compositor
            .init(&mut backend, 320, 320, &mut tracer)
            .expect("recording backend never fails to init");
        let report = compositor
            .draw(&mut tree, &mut backend, &mut tracer)
            .expect("recording backend never fails");
        summarize("initial draw", Some(&report), &mut backend);

        // Recoloring the card pulls in the badge and the backdrop, and the
        // backdrop in turn pulls in the footer and the title.
        tree.set_paint(card, Paint::no_stroke(Color::from_rgb8(0x80, 0xd0, 0x60)));
        let report = compositor
            .redraw(&mut tree, card, &mut backend, &mut tracer)
            .expect("recording backend never fails");
        summarize("recolor card", Some(&report), &mut backend);

        // Once the backdrop no longer reaches the footer, moving the badge
        // leaves the footer and the title alone.
        tree.set_bounds(backdrop, Rect::new(0, 0, 150, 150));
        tree.set_bounds(badge, Rect::new(60, 60, 110, 110));
        let report = compositor
            .redraw_many(&mut tree, &[backdrop, badge], &mut backend, &mut tracer)
            .expect("recording backend never fails");
        summarize("shrink backdrop, move badge", Some(&report), &mut backend);
        let _ = tree.take_changes();

        // Batched edits are drained and redrawn together.
        tree.set_z_index(footer, 2.0);
        tree.set_text(title, "Strata demo");
        let report = compositor
            .redraw_pending(&mut tree, &mut backend, &mut tracer)
            .expect("recording backend never fails");
        summarize("pending edits", report.as_ref(), &mut backend);

        // The title grew when it was measured; its new bounds are pending.
        let report = compositor
            .redraw_pending(&mut tree, &mut backend, &mut tracer)
            .expect("recording backend never fails");
        summarize("title growth", report.as_ref(), &mut backend);

        let report = compositor
            .redraw_pending(&mut tree, &mut backend, &mut tracer)
            .expect("recording backend never fails");
        summarize("idle", report.as_ref(), &mut backend);

        let report = compositor
            .resize(&mut tree, &mut backend, 640, 480, &mut tracer)
            .expect("recording backend never fails");
        summarize("resize", Some(&report), &mut backend);
    }

    // -- export JSON trace -------------------------------------------------
    let path = "scene_trace.json";
    let file = File::create(path).expect("failed to create scene_trace.json");
    let mut writer = BufWriter::new(file);
    strata_debug::json::export(recorder.as_bytes(), &mut writer)
        .expect("failed to write JSON trace");

    println!("Wrote {path} ({} passes)", compositor.frame_index());
}
