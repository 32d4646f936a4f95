// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render plans, damage summaries, and the frame driver for strata.
//!
//! This crate sits between [`strata_core`]'s element tree and propagator and
//! a concrete [`RenderBackend`](strata_core::backend::RenderBackend). It
//! defines:
//!
//! - [`RenderItem`]: a single leaf to paint, with its clip and ordering keys
//! - [`RenderPlan`]: the ordered items of one pass, and their execution
//! - [`DamageRegion`]: the area a pass touched
//! - [`Compositor`]: the `draw` / `redraw` / `redraw_pending` frame driver,
//!   configured by [`CompositorConfig`]
//!
//! ```rust,ignore
//! let mut compositor = Compositor::new(CompositorConfig::interactive());
//! compositor.init(&mut backend, 800, 600, &mut Tracer::none())?;
//! compositor.draw(&mut tree, &mut backend, &mut Tracer::none())?;
//!
//! tree.set_bounds(button, Rect::new(10, 10, 90, 40));
//! compositor.redraw_pending(&mut tree, &mut backend, &mut Tracer::none())?;
//! ```
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in `strata_core`.
//! - `trace` (disabled by default): Enables `strata_core/trace`.
//! - `trace-rich` (disabled by default, implies `trace`): Emits per-leaf paint
//!   and damage-rectangle events.

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

mod compositor;
mod damage;
mod plan;

pub use compositor::{Compositor, CompositorConfig, FlushPolicy, PassReport};
pub use damage::DamageRegion;
pub use plan::{PaintOptions, PaintStats, RenderItem, RenderPlan};
