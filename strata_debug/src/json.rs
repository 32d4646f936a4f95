// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON exporter for recorded traces.
//!
//! [`export`] reads recorded bytes from a
//! [`RecorderSink`](super::recorder::RecorderSink) and writes a JSON array
//! with one object per event. Every object carries `"event"` and
//! `"frame_index"`; the remaining fields mirror the event struct. Rectangles
//! are written as `[x0, y0, x1, y1]`.

use std::io::{self, Write};

use serde_json::{Value, json};

use strata_core::geometry::Rect;
use strata_core::trace::RedrawKind;

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as a pretty-printed JSON array.
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let events: Vec<Value> = decode(bytes).map(|e| to_json(&e)).collect();
    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

/// Converts one recorded event to its JSON object.
#[must_use]
pub fn to_json(event: &RecordedEvent) -> Value {
    match event {
        RecordedEvent::Viewport(e) => json!({
            "event": "Viewport",
            "frame_index": e.frame_index,
            "width": e.width,
            "height": e.height,
        }),
        RecordedEvent::RedrawBegin(e) => json!({
            "event": "RedrawBegin",
            "frame_index": e.frame_index,
            "kind": kind_name(e.kind),
            "changed_elements": e.changed_elements,
        }),
        RecordedEvent::RedrawSet(e) => json!({
            "event": "RedrawSet",
            "frame_index": e.frame_index,
            "seed_leaves": e.seed_leaves,
            "queued_leaves": e.queued_leaves,
            "candidate_leaves": e.candidate_leaves,
        }),
        RecordedEvent::Flush(e) => json!({
            "event": "Flush",
            "frame_index": e.frame_index,
            "painted_leaves": e.painted_leaves,
            "resized_leaves": e.resized_leaves,
            "flushed": e.flushed,
        }),
        RecordedEvent::LeafPaints {
            frame_index,
            leaves,
        } => {
            let leaves: Vec<Value> = leaves
                .iter()
                .map(|leaf| {
                    json!({
                        "element": leaf.element_index,
                        "clip": leaf.clip.map(rect_json),
                        "z_index": leaf.z_index,
                        "depth": leaf.depth,
                    })
                })
                .collect();
            json!({
                "event": "LeafPaints",
                "frame_index": frame_index,
                "leaves": leaves,
            })
        }
        RecordedEvent::DamageRects { frame_index, rects } => {
            let rects: Vec<Value> = rects.iter().copied().map(rect_json).collect();
            json!({
                "event": "DamageRects",
                "frame_index": frame_index,
                "rects": rects,
            })
        }
    }
}

fn rect_json(r: Rect) -> Value {
    json!([r.min.x, r.min.y, r.max.x, r.max.y])
}

fn kind_name(kind: RedrawKind) -> &'static str {
    match kind {
        RedrawKind::Full => "Full",
        RedrawKind::Incremental => "Incremental",
        RedrawKind::Pending => "Pending",
    }
}
