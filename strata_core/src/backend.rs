// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for rendering integrations.
//!
//! Strata splits rasterization into *backend* implementations that live
//! outside this crate (a native rasterizer, an immediate-mode GL context, a
//! web canvas, or a test double). Each backend provides two pieces:
//!
//! - **Drawing**: implements [`DrawBackend`]: paint a rounded rectangle,
//!   paint and measure a text run, and push/pop a clip rectangle.
//!
//! - **Lifecycle**: implements [`RenderBackend`] on top: one-time
//!   initialization, viewport resizes, and [`flush`](RenderBackend::flush),
//!   which makes the accumulated draw commands visible.
//!
//! # Errors
//!
//! Backend failures are opaque to the core. Every method returns the
//! backend's own [`Error`](DrawBackend::Error) type, and callers propagate it
//! outward unchanged; the core has no retry policy.
//!
//! # Crate boundaries
//!
//! `strata_core` owns the data model, the propagator, and this contract.
//! Backends depend on `strata_core` and translate calls into their native
//! drawing API. Application code drives both through a frame loop such as
//! `strata_render::Compositor`.

use crate::appearance::{CornerRadii, TextAppearance};
use crate::geometry::{Point, Rect, Size};
use crate::paint::Paint;

/// Paints leaf appearances.
///
/// Draw calls arrive in back-to-front compositing order. There is no
/// framebuffer clear between them; later calls paint over earlier ones.
pub trait DrawBackend {
    /// The error produced when a backend call fails.
    type Error;

    /// Paints a rectangle covering `area`, rounded by `radii`.
    fn draw_rect(
        &mut self,
        area: Rect,
        radii: &CornerRadii,
        paint: &Paint,
    ) -> Result<(), Self::Error>;

    /// Paints `text` with its top-left corner at `origin` and returns the
    /// measured extent of the run.
    fn draw_text(
        &mut self,
        origin: Point,
        text: &TextAppearance,
        paint: &Paint,
    ) -> Result<Size, Self::Error>;

    /// Restricts subsequent drawing to `clip`, nesting inside any clip that
    /// is already active.
    fn push_clip(&mut self, clip: Rect) -> Result<(), Self::Error>;

    /// Restores the clip that was active before the matching
    /// [`push_clip`](Self::push_clip).
    fn pop_clip(&mut self) -> Result<(), Self::Error>;
}

/// A [`DrawBackend`] bound to a window or surface.
///
/// # Frame loop pseudocode
///
/// ```rust,ignore
/// backend.init(width, height)?;
/// compositor.draw(&mut tree, &mut backend, &mut tracer)?;
///
/// loop {
///     let event = next_event();
///     apply_to_tree(&mut tree, event);
///     // Repaint only what the mutation touched, then flush.
///     compositor.redraw_pending(&mut tree, &mut backend, &mut tracer)?;
/// }
/// ```
pub trait RenderBackend: DrawBackend {
    /// Prepares a surface of the given size. Called once before the first
    /// frame.
    fn init(&mut self, width: u32, height: u32) -> Result<(), Self::Error>;

    /// Informs the backend that the surface changed size.
    fn update_viewport_size(&mut self, width: u32, height: u32) -> Result<(), Self::Error>;

    /// Makes all draw commands issued since the previous flush visible.
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// Runs `f` with drawing restricted to `clip`.
///
/// The clip is popped whether or not `f` succeeds. If `f` fails, its error is
/// returned even when restoring the clip fails too.
pub fn with_clip<B, R, F>(backend: &mut B, clip: Rect, f: F) -> Result<R, B::Error>
where
    B: DrawBackend + ?Sized,
    F: FnOnce(&mut B) -> Result<R, B::Error>,
{
    backend.push_clip(clip)?;
    let result = f(backend);
    let restored = backend.pop_clip();
    let value = result?;
    restored?;
    Ok(value)
}
