// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Leaf appearances and their dispatch to a backend.
//!
//! Every leaf owns exactly one [`Appearance`]. The variant decides which
//! backend call paints it: rectangles go to
//! [`draw_rect`](DrawBackend::draw_rect), text goes to
//! [`draw_text`](DrawBackend::draw_text), which also reports the measured
//! extent so the leaf can grow to fit its content.

use alloc::string::String;

use crate::backend::DrawBackend;
use crate::geometry::{Point, Rect, Size};
use crate::paint::Paint;

/// Per-corner radii of a rounded rectangle.
///
/// Each corner carries an `(x, y)` radius so elliptical corners can be
/// expressed; backends that only support circular corners use
/// [`to_kurbo`](Self::to_kurbo).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CornerRadii {
    /// Top-left corner.
    pub top_left: Point,
    /// Top-right corner.
    pub top_right: Point,
    /// Bottom-left corner.
    pub bottom_left: Point,
    /// Bottom-right corner.
    pub bottom_right: Point,
}

impl CornerRadii {
    /// Square corners.
    pub const ZERO: Self = Self::uniform(0);

    /// Creates circular radii, one per corner.
    #[must_use]
    pub const fn new(top_left: i32, top_right: i32, bottom_left: i32, bottom_right: i32) -> Self {
        Self {
            top_left: Point::new(top_left, top_left),
            top_right: Point::new(top_right, top_right),
            bottom_left: Point::new(bottom_left, bottom_left),
            bottom_right: Point::new(bottom_right, bottom_right),
        }
    }

    /// Gives all four corners the same circular radius.
    #[must_use]
    pub const fn uniform(radius: i32) -> Self {
        Self::uniform_xy(radius, radius)
    }

    /// Gives all four corners the same elliptical radius.
    #[must_use]
    pub const fn uniform_xy(x: i32, y: i32) -> Self {
        let r = Point::new(x, y);
        Self {
            top_left: r,
            top_right: r,
            bottom_left: r,
            bottom_right: r,
        }
    }

    /// Returns the radii in top-left, top-right, bottom-left, bottom-right
    /// order.
    #[must_use]
    pub const fn to_array(self) -> [Point; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_left,
            self.bottom_right,
        ]
    }

    /// Returns `true` if every corner is square.
    #[must_use]
    pub fn is_square(self) -> bool {
        self.to_array().iter().all(|r| r.x <= 0 || r.y <= 0)
    }

    /// Converts to circular [`kurbo::RoundedRectRadii`].
    ///
    /// Elliptical corners collapse to the smaller of their two radii.
    #[must_use]
    pub fn to_kurbo(self) -> kurbo::RoundedRectRadii {
        let circular = |p: Point| f64::from(p.x.min(p.y).max(0));
        kurbo::RoundedRectRadii::new(
            circular(self.top_left),
            circular(self.top_right),
            circular(self.bottom_right),
            circular(self.bottom_left),
        )
    }
}

/// A (optionally rounded) rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RectAppearance {
    /// Corner radii.
    pub corner_radii: CornerRadii,
}

impl RectAppearance {
    /// Returns the rounded rectangle covering `bounds`.
    #[must_use]
    pub fn rounded_rect(&self, bounds: Rect) -> kurbo::RoundedRect {
        kurbo::RoundedRect::from_rect(bounds.to_kurbo(), self.corner_radii.to_kurbo())
    }
}

/// Bold/italic selection for a [`Font`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FontStyle {
    /// Heavy weight.
    pub bold: bool,
    /// Slanted.
    pub italic: bool,
}

impl FontStyle {
    /// Neither bold nor italic.
    pub const REGULAR: Self = Self {
        bold: false,
        italic: false,
    };
    /// Bold only.
    pub const BOLD: Self = Self {
        bold: true,
        italic: false,
    };
    /// Italic only.
    pub const ITALIC: Self = Self {
        bold: false,
        italic: true,
    };
    /// Bold and italic.
    pub const BOLD_ITALIC: Self = Self {
        bold: true,
        italic: true,
    };
}

/// Font selection for a text run.
///
/// The family name is resolved to an actual font resource by the backend.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Font {
    /// Family name, e.g. `"DejaVu Sans"`.
    pub family: String,
    /// Size in pixels.
    pub size: u32,
    /// Weight and slant.
    pub style: FontStyle,
}

impl Font {
    /// Creates a font description.
    #[must_use]
    pub fn new(family: impl Into<String>, size: u32, style: FontStyle) -> Self {
        Self {
            family: family.into(),
            size,
            style,
        }
    }
}

/// A run of text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TextAppearance {
    /// The text to draw.
    pub content: String,
    /// Font used to draw it.
    pub font: Font,
    /// Whether the user may edit the text (text inputs).
    pub editable: bool,
}

/// The visual descriptor owned by a leaf element.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Appearance {
    /// A rectangle with per-corner radii.
    Rect(RectAppearance),
    /// A text run.
    Text(TextAppearance),
}

impl Appearance {
    /// Issues the draw command for this appearance.
    ///
    /// Returns the measured extent for text so the caller can grow the
    /// leaf's bounds; rectangles return `None`.
    pub fn render<B: DrawBackend + ?Sized>(
        &self,
        bounds: Rect,
        paint: &Paint,
        backend: &mut B,
    ) -> Result<Option<Size>, B::Error> {
        match self {
            Self::Rect(rect) => {
                backend.draw_rect(bounds, &rect.corner_radii, paint)?;
                Ok(None)
            }
            Self::Text(text) => backend.draw_text(bounds.min, text, paint).map(Some),
        }
    }

    /// Returns the text descriptor, if this is a text appearance.
    #[must_use]
    pub fn as_text(&self) -> Option<&TextAppearance> {
        match self {
            Self::Text(text) => Some(text),
            Self::Rect(_) => None,
        }
    }

    /// Returns the rectangle descriptor, if this is a rectangle appearance.
    #[must_use]
    pub fn as_rect(&self) -> Option<&RectAppearance> {
        match self {
            Self::Rect(rect) => Some(rect),
            Self::Text(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[derive(Debug, Default)]
    struct CallLog {
        calls: Vec<&'static str>,
    }

    impl DrawBackend for CallLog {
        type Error = core::convert::Infallible;

        fn draw_rect(
            &mut self,
            _area: Rect,
            _radii: &CornerRadii,
            _paint: &Paint,
        ) -> Result<(), Self::Error> {
            self.calls.push("rect");
            Ok(())
        }

        fn draw_text(
            &mut self,
            _origin: Point,
            text: &TextAppearance,
            _paint: &Paint,
        ) -> Result<Size, Self::Error> {
            self.calls.push("text");
            let chars = u32::try_from(text.content.chars().count()).unwrap();
            Ok(Size::new(chars * 8, text.font.size))
        }

        fn push_clip(&mut self, _clip: Rect) -> Result<(), Self::Error> {
            Ok(())
        }

        fn pop_clip(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    #[test]
    fn render_dispatches_on_variant() {
        let mut log = CallLog::default();
        let paint = Paint::default();
        let rect = Appearance::Rect(RectAppearance::default());
        let text = Appearance::Text(TextAppearance {
            content: "hello".into(),
            font: Font::new("Sans", 12, FontStyle::REGULAR),
            editable: false,
        });

        let Ok(measured) = rect.render(Rect::new(0, 0, 10, 10), &paint, &mut log);
        assert_eq!(measured, None);
        let Ok(measured) = text.render(Rect::new(0, 0, 0, 0), &paint, &mut log);
        assert_eq!(measured, Some(Size::new(40, 12)));
        assert_eq!(log.calls, ["rect", "text"]);
    }

    #[test]
    fn elliptical_radii_collapse_for_kurbo() {
        let radii = CornerRadii::uniform_xy(8, 4).to_kurbo();
        assert_eq!(radii, kurbo::RoundedRectRadii::from_single_radius(4.0));
        assert!(CornerRadii::ZERO.is_square());
        assert!(!CornerRadii::uniform(3).is_square());
    }

    #[test]
    fn corner_order_is_tl_tr_bl_br() {
        let radii = CornerRadii::new(1, 2, 3, 4);
        let xs: Vec<i32> = radii.to_array().iter().map(|p| p.x).collect();
        assert_eq!(xs, [1, 2, 3, 4]);
    }
}
