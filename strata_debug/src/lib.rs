// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, and JSON export for strata diagnostics.
//!
//! This crate provides [`TraceSink`](strata_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`]: compact binary recording with
//!   [`recorder::decode`] for playback.
//! - [`json::export`]: writes recorded bytes as a JSON array.
//!
//! It also provides [`backend::RecordingBackend`], a
//! [`RenderBackend`](strata_core::backend::RenderBackend) that records draw
//! calls instead of rasterizing, used as the test double across the
//! workspace.

pub mod backend;
pub mod json;
pub mod pretty;
pub mod recorder;
