// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fill and stroke description for leaf elements.

/// An 8-bit-per-channel RGBA color (not premultiplied).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Self = Self::from_rgba8(255, 255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::from_rgba8(0, 0, 0, 255);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::from_rgba8(0, 0, 0, 0);

    /// Creates a color from its four channels.
    #[inline]
    #[must_use]
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color.
    #[inline]
    #[must_use]
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba8(r, g, b, 255)
    }

    /// Returns the channels normalized to `0.0..=1.0`, in RGBA order.
    #[must_use]
    pub fn to_f32_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a].map(|c| f32::from(c) / 255.0)
    }
}

/// How a leaf is filled and stroked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Paint {
    /// Interior color.
    pub fill: Color,
    /// Border color.
    pub stroke: Color,
    /// Border width in pixels; `0` disables the stroke.
    pub stroke_width: u32,
}

impl Paint {
    /// Creates a paint with both a fill and a stroke.
    #[inline]
    #[must_use]
    pub const fn new(fill: Color, stroke: Color, stroke_width: u32) -> Self {
        Self {
            fill,
            stroke,
            stroke_width,
        }
    }

    /// Creates a fill-only paint.
    #[inline]
    #[must_use]
    pub const fn no_stroke(fill: Color) -> Self {
        Self::new(fill, Color::TRANSPARENT, 0)
    }

    /// Returns `true` if the stroke contributes to the drawing.
    #[inline]
    #[must_use]
    pub const fn has_stroke(&self) -> bool {
        self.stroke_width > 0 && self.stroke.a > 0
    }
}
