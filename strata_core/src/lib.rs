// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element tree, compositing order and dirty-region propagation for
//! retained-mode 2D scenes.
//!
//! `strata_core` holds the part of a retained-mode scene graph that decides
//! *what* must be repainted after a mutation and *in which order*. It is
//! `no_std` compatible (with `alloc`) and stores elements in struct-of-arrays
//! form addressed by index handles.
//!
//! # Architecture
//!
//! ```text
//!   application mutates ElementTree ──► TreeChanges (dirty channels)
//!                  │
//!                  ▼
//!   propagate::redraw_set() ──► RedrawSet (leaves, back-to-front)
//!                  │               ▲
//!                  │               └── order::compare (z-index, depth)
//!                  ▼
//!   Appearance::render() ──► DrawBackend (draw_rect / draw_text, clip scope)
//! ```
//!
//! **[`element`]**: the tree. Containers group children; leaves own exactly
//! one [`Appearance`](appearance::Appearance) and are the only elements that
//! are painted or tested for overlap.
//!
//! **[`order`]**: the back-to-front compositing comparator. Lower z-index is
//! behind; equal z-index falls back to tree depth (shallower is behind).
//!
//! **[`propagate`]**: the dirty-region propagator. Starting from the leaves
//! of a changed element it queues every leaf that transitively overlaps the
//! queue, then sorts the result with [`order`].
//!
//! **[`dirty`]**: channel constants for the multi-channel change tracker that
//! records mutations between frames.
//!
//! **[`backend`]**: the [`DrawBackend`](backend::DrawBackend) and
//! [`RenderBackend`](backend::RenderBackend) traits rendering backends
//! implement.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) and the zero-overhead
//! [`Tracer`](trace::Tracer) wrapper for redraw instrumentation.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Gates per-leaf paint
//!   and damage-rect events.

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

pub mod appearance;
pub mod backend;
pub mod dirty;
pub mod element;
pub mod geometry;
pub mod order;
pub mod paint;
pub mod propagate;
pub mod trace;
