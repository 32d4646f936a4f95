// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as tagged little-endian records. [`decode`] reads them back as
//! an iterator of [`RecordedEvent`].
//!
//! Rich events ([`on_leaf_paints`](TraceSink::on_leaf_paints),
//! [`on_damage_rects`](TraceSink::on_damage_rects)) are length-prefixed and
//! stored in full.

use strata_core::geometry::Rect;
use strata_core::trace::{
    FlushEvent, LeafPaint, RedrawBeginEvent, RedrawKind, RedrawSetEvent, TraceSink, ViewportEvent,
    count_u32,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_VIEWPORT: u8 = 1;
const TAG_REDRAW_BEGIN: u8 = 2;
const TAG_REDRAW_SET: u8 = 3;
const TAG_FLUSH: u8 = 4;
const TAG_LEAF_PAINTS: u8 = 5;
const TAG_DAMAGE_RECTS: u8 = 6;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_i32(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_rect(&mut self, r: Rect) {
        self.write_i32(r.min.x);
        self.write_i32(r.min.y);
        self.write_i32(r.max.x);
        self.write_i32(r.max.y);
    }

    fn write_option_rect(&mut self, r: Option<Rect>) {
        match r {
            Some(rect) => {
                self.write_u8(1);
                self.write_rect(rect);
            }
            None => {
                self.write_u8(0);
                self.write_rect(Rect::default());
            }
        }
    }

    fn write_kind(&mut self, kind: RedrawKind) {
        self.write_u8(match kind {
            RedrawKind::Full => 0,
            RedrawKind::Incremental => 1,
            RedrawKind::Pending => 2,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_viewport(&mut self, e: &ViewportEvent) {
        self.write_u8(TAG_VIEWPORT);
        self.write_u64(e.frame_index);
        self.write_u32(e.width);
        self.write_u32(e.height);
    }

    fn on_redraw_begin(&mut self, e: &RedrawBeginEvent) {
        self.write_u8(TAG_REDRAW_BEGIN);
        self.write_u64(e.frame_index);
        self.write_kind(e.kind);
        self.write_u32(e.changed_elements);
    }

    fn on_redraw_set(&mut self, e: &RedrawSetEvent) {
        self.write_u8(TAG_REDRAW_SET);
        self.write_u64(e.frame_index);
        self.write_u32(e.seed_leaves);
        self.write_u32(e.queued_leaves);
        self.write_u32(e.candidate_leaves);
    }

    fn on_flush(&mut self, e: &FlushEvent) {
        self.write_u8(TAG_FLUSH);
        self.write_u64(e.frame_index);
        self.write_u32(e.painted_leaves);
        self.write_u32(e.resized_leaves);
        self.write_u8(u8::from(e.flushed));
    }

    fn on_leaf_paints(&mut self, frame_index: u64, leaves: &[LeafPaint]) {
        let count = count_u32(leaves.len());
        self.write_u8(TAG_LEAF_PAINTS);
        self.write_u64(frame_index);
        self.write_u32(count);
        for leaf in leaves.iter().take(count as usize) {
            self.write_u32(leaf.element_index);
            self.write_option_rect(leaf.clip);
            self.write_u32(leaf.z_index.to_bits());
            self.write_u32(leaf.depth);
        }
    }

    fn on_damage_rects(&mut self, frame_index: u64, rects: &[Rect]) {
        let count = count_u32(rects.len());
        self.write_u8(TAG_DAMAGE_RECTS);
        self.write_u64(frame_index);
        self.write_u32(count);
        for &rect in rects.iter().take(count as usize) {
            self.write_rect(rect);
        }
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordedEvent {
    /// A [`ViewportEvent`].
    Viewport(ViewportEvent),
    /// A [`RedrawBeginEvent`].
    RedrawBegin(RedrawBeginEvent),
    /// A [`RedrawSetEvent`].
    RedrawSet(RedrawSetEvent),
    /// A [`FlushEvent`].
    Flush(FlushEvent),
    /// The painted leaves of a pass.
    LeafPaints {
        /// Pass counter.
        frame_index: u64,
        /// Painted leaves in paint order.
        leaves: Vec<LeafPaint>,
    },
    /// The damaged rectangles of a pass.
    DamageRects {
        /// Pass counter.
        frame_index: u64,
        /// Damaged rectangles.
        rects: Vec<Rect>,
    },
}

impl RecordedEvent {
    /// Returns the pass counter the event belongs to.
    #[must_use]
    pub fn frame_index(&self) -> u64 {
        match self {
            Self::Viewport(e) => e.frame_index,
            Self::RedrawBegin(e) => e.frame_index,
            Self::RedrawSet(e) => e.frame_index,
            Self::Flush(e) => e.frame_index,
            Self::LeafPaints { frame_index, .. } | Self::DamageRects { frame_index, .. } => {
                *frame_index
            }
        }
    }
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
///
/// Iteration stops at the first unknown tag or truncated record.
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        let bytes = self.data.get(self.pos..self.pos + N)?;
        self.pos += N;
        bytes.try_into().ok()
    }

    fn read_u8(&mut self) -> Option<u8> {
        self.take::<1>().map(|[v]| v)
    }

    fn read_u32(&mut self) -> Option<u32> {
        self.take().map(u32::from_le_bytes)
    }

    fn read_i32(&mut self) -> Option<i32> {
        self.take().map(i32::from_le_bytes)
    }

    fn read_u64(&mut self) -> Option<u64> {
        self.take().map(u64::from_le_bytes)
    }

    fn read_rect(&mut self) -> Option<Rect> {
        Some(Rect::new(
            self.read_i32()?,
            self.read_i32()?,
            self.read_i32()?,
            self.read_i32()?,
        ))
    }

    fn read_option_rect(&mut self) -> Option<Option<Rect>> {
        let present = self.read_u8()?;
        let rect = self.read_rect()?;
        Some((present != 0).then_some(rect))
    }

    fn read_kind(&mut self) -> Option<RedrawKind> {
        Some(match self.read_u8()? {
            0 => RedrawKind::Full,
            1 => RedrawKind::Incremental,
            2 => RedrawKind::Pending,
            _ => return None,
        })
    }

    fn decode_viewport(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Viewport(ViewportEvent {
            frame_index: self.read_u64()?,
            width: self.read_u32()?,
            height: self.read_u32()?,
        }))
    }

    fn decode_redraw_begin(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::RedrawBegin(RedrawBeginEvent {
            frame_index: self.read_u64()?,
            kind: self.read_kind()?,
            changed_elements: self.read_u32()?,
        }))
    }

    fn decode_redraw_set(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::RedrawSet(RedrawSetEvent {
            frame_index: self.read_u64()?,
            seed_leaves: self.read_u32()?,
            queued_leaves: self.read_u32()?,
            candidate_leaves: self.read_u32()?,
        }))
    }

    fn decode_flush(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Flush(FlushEvent {
            frame_index: self.read_u64()?,
            painted_leaves: self.read_u32()?,
            resized_leaves: self.read_u32()?,
            flushed: self.read_u8()? != 0,
        }))
    }

    fn decode_leaf_paints(&mut self) -> Option<RecordedEvent> {
        let frame_index = self.read_u64()?;
        let count = self.read_u32()?;
        let mut leaves = Vec::new();
        for _ in 0..count {
            leaves.push(LeafPaint {
                element_index: self.read_u32()?,
                clip: self.read_option_rect()?,
                z_index: f32::from_bits(self.read_u32()?),
                depth: self.read_u32()?,
            });
        }
        Some(RecordedEvent::LeafPaints {
            frame_index,
            leaves,
        })
    }

    fn decode_damage_rects(&mut self) -> Option<RecordedEvent> {
        let frame_index = self.read_u64()?;
        let count = self.read_u32()?;
        let mut rects = Vec::new();
        for _ in 0..count {
            rects.push(self.read_rect()?);
        }
        Some(RecordedEvent::DamageRects { frame_index, rects })
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_VIEWPORT => self.decode_viewport(),
            TAG_REDRAW_BEGIN => self.decode_redraw_begin(),
            TAG_REDRAW_SET => self.decode_redraw_set(),
            TAG_FLUSH => self.decode_flush(),
            TAG_LEAF_PAINTS => self.decode_leaf_paints(),
            TAG_DAMAGE_RECTS => self.decode_damage_rects(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
