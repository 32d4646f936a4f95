// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integer geometry in window/device coordinates.
//!
//! Element bounds are half-open, axis-aligned integer boxes: a [`Rect`]
//! covers the pixels `min.x..max.x` by `min.y..max.y`. Conversions into
//! [`kurbo`] types are provided for backends that draw with floating-point
//! geometry.

use core::fmt;

/// A point in device pixels.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Creates a point.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Converts to a [`kurbo::Point`].
    #[inline]
    #[must_use]
    pub fn to_kurbo(self) -> kurbo::Point {
        kurbo::Point::new(f64::from(self.x), f64::from(self.y))
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A measured extent, as reported by a backend's text layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Creates a size.
    #[inline]
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A half-open, axis-aligned integer rectangle.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Top-left corner (inclusive).
    pub min: Point,
    /// Bottom-right corner (exclusive).
    pub max: Point,
}

impl Rect {
    /// The rectangle covering the whole positive coordinate space.
    ///
    /// Used as the area of a tree's root element.
    pub const MAXIMAL: Self = Self::new(0, 0, i32::MAX, i32::MAX);

    /// Creates a rectangle from its corner coordinates `(x0, y0)`–`(x1, y1)`.
    #[inline]
    #[must_use]
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min: Point::new(x0, y0),
            max: Point::new(x1, y1),
        }
    }

    /// Creates a rectangle from its top-left corner and size.
    #[inline]
    #[must_use]
    pub const fn from_origin_size(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self::new(
            x,
            y,
            x.saturating_add_unsigned(width),
            y.saturating_add_unsigned(height),
        )
    }

    /// Returns the rectangle's width, or zero if it is inverted.
    #[inline]
    #[must_use]
    pub const fn width(self) -> u32 {
        if self.max.x > self.min.x {
            self.max.x.abs_diff(self.min.x)
        } else {
            0
        }
    }

    /// Returns the rectangle's height, or zero if it is inverted.
    #[inline]
    #[must_use]
    pub const fn height(self) -> u32 {
        if self.max.y > self.min.y {
            self.max.y.abs_diff(self.min.y)
        } else {
            0
        }
    }

    /// Returns the size of the rectangle.
    #[inline]
    #[must_use]
    pub const fn size(self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Returns `true` if the rectangle covers no pixels.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Returns `true` if `self` and `other` share at least one pixel.
    ///
    /// Empty rectangles overlap nothing, including themselves.
    #[inline]
    #[must_use]
    pub const fn overlaps(self, other: Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    /// Returns `true` if `point` lies inside the rectangle.
    #[inline]
    #[must_use]
    pub const fn contains(self, point: Point) -> bool {
        self.min.x <= point.x
            && point.x < self.max.x
            && self.min.y <= point.y
            && point.y < self.max.y
    }

    /// Returns the shared area of two rectangles, or `None` if they do not
    /// overlap.
    #[must_use]
    pub fn intersect(self, other: Self) -> Option<Self> {
        if !self.overlaps(other) {
            return None;
        }
        Some(Self::new(
            self.min.x.max(other.min.x),
            self.min.y.max(other.min.y),
            self.max.x.min(other.max.x),
            self.max.y.min(other.max.y),
        ))
    }

    /// Returns the smallest rectangle containing both rectangles.
    ///
    /// Empty rectangles do not contribute.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        Self::new(
            self.min.x.min(other.min.x),
            self.min.y.min(other.min.y),
            self.max.x.max(other.max.x),
            self.max.y.max(other.max.y),
        )
    }

    /// Returns a rectangle with the same origin and the given size.
    #[inline]
    #[must_use]
    pub const fn with_size(self, size: Size) -> Self {
        Self::from_origin_size(self.min.x, self.min.y, size.width, size.height)
    }

    /// Converts to a [`kurbo::Rect`].
    #[inline]
    #[must_use]
    pub fn to_kurbo(self) -> kurbo::Rect {
        kurbo::Rect::from_points(self.min.to_kurbo(), self.max.to_kurbo())
    }
}

impl fmt::Debug for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}]",
            self.min.x, self.min.y, self.max.x, self.max.y
        )
    }
}

impl From<Rect> for kurbo::Rect {
    fn from(rect: Rect) -> Self {
        rect.to_kurbo()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_boxes() {
        let a = Rect::new(0, 0, 100, 100);
        let b = Rect::new(70, 70, 120, 120);
        let c = Rect::new(200, 200, 300, 300);
        assert!(a.overlaps(b));
        assert!(b.overlaps(a));
        assert!(!a.overlaps(c));
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Rect::new(0, 0, 100, 100);
        let b = Rect::new(100, 0, 200, 100);
        assert!(!a.overlaps(b));
        assert!(a.overlaps(Rect::new(99, 99, 102, 102)));
    }

    #[test]
    fn identical_boxes_overlap() {
        let a = Rect::new(10, 10, 20, 20);
        assert!(a.overlaps(a));
    }

    #[test]
    fn empty_boxes_overlap_nothing() {
        let text = Rect::new(5, 5, 5, 5);
        assert!(text.is_empty());
        assert!(!text.overlaps(Rect::MAXIMAL));
        assert!(!Rect::MAXIMAL.overlaps(text));
    }

    #[test]
    fn from_origin_size_matches_corners() {
        assert_eq!(
            Rect::from_origin_size(10, 20, 30, 40),
            Rect::new(10, 20, 40, 60)
        );
        let r = Rect::from_origin_size(i32::MAX - 1, 0, 10, 10);
        assert_eq!(r.max.x, i32::MAX, "origin-size construction saturates");
    }

    #[test]
    fn intersect_and_union() {
        let a = Rect::new(0, 0, 100, 100);
        let b = Rect::new(50, 60, 150, 160);
        assert_eq!(a.intersect(b), Some(Rect::new(50, 60, 100, 100)));
        assert_eq!(a.union(b), Rect::new(0, 0, 150, 160));
        assert_eq!(a.intersect(Rect::new(200, 200, 300, 300)), None);
        assert_eq!(a.union(Rect::default()), a);
    }

    #[test]
    fn maximal_rect_dimensions() {
        assert_eq!(Rect::MAXIMAL.width(), i32::MAX as u32);
        assert!(Rect::MAXIMAL.contains(Point::new(1_000_000, 3)));
        assert!(!Rect::MAXIMAL.contains(Point::new(-1, 3)));
    }

    #[test]
    fn with_size_keeps_origin() {
        let r = Rect::new(10, 10, 10, 10).with_size(Size::new(42, 12));
        assert_eq!(r, Rect::new(10, 10, 52, 22));
        assert_eq!(r.size(), Size::new(42, 12));
    }

    #[test]
    fn kurbo_conversion() {
        let k: kurbo::Rect = Rect::new(1, 2, 3, 4).into();
        assert_eq!(k, kurbo::Rect::new(1.0, 2.0, 3.0, 4.0));
    }
}
