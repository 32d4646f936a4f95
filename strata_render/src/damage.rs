// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spatial damage tracking for partial re-rendering.

use alloc::vec::Vec;

use strata_core::geometry::Rect;

/// A region of the output touched by a redraw pass.
///
/// Backends with a retained framebuffer can use this to present only the
/// areas that were repainted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum DamageRegion {
    /// The entire output was redrawn.
    #[default]
    Full,
    /// A list of repainted leaf rectangles, in paint order.
    ///
    /// Empty rectangles are never stored.
    Rects(Vec<Rect>),
    /// Nothing was repainted; the previous frame can be reused.
    None,
}

impl DamageRegion {
    /// Builds a damage list from leaf rectangles, dropping empty ones.
    #[must_use]
    pub fn from_rects(rects: impl IntoIterator<Item = Rect>) -> Self {
        let rects: Vec<Rect> = rects.into_iter().filter(|r| !r.is_empty()).collect();
        if rects.is_empty() {
            Self::None
        } else {
            Self::Rects(rects)
        }
    }

    /// Returns `true` if no region needs redrawing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Full => false,
            Self::Rects(rects) => rects.is_empty(),
            Self::None => true,
        }
    }

    /// Adds one rectangle. Empty rectangles are ignored.
    pub fn add_rect(&mut self, rect: Rect) {
        if rect.is_empty() {
            return;
        }
        match self {
            Self::Full => {}
            Self::Rects(rects) => rects.push(rect),
            Self::None => *self = Self::Rects(alloc::vec![rect]),
        }
    }

    /// Merges another damage region into this one.
    pub fn merge(&mut self, other: &Self) {
        match (&mut *self, other) {
            (Self::Full, _) | (_, Self::Full) => *self = Self::Full,
            (Self::None, _) => *self = other.clone(),
            (_, Self::None) => {}
            (Self::Rects(a), Self::Rects(b)) => a.extend_from_slice(b),
        }
    }

    /// Returns the smallest rectangle covering the damage, clamped to
    /// `viewport`.
    ///
    /// [`Full`](Self::Full) covers the whole viewport.
    #[must_use]
    pub fn union_rect(&self, viewport: Rect) -> Option<Rect> {
        match self {
            Self::Full => (!viewport.is_empty()).then_some(viewport),
            Self::Rects(rects) => rects
                .iter()
                .fold(Rect::default(), |acc, r| acc.union(*r))
                .intersect(viewport),
            Self::None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    const VIEW: Rect = Rect::new(0, 0, 800, 600);

    #[test]
    fn from_rects_drops_empty() {
        let damage = DamageRegion::from_rects([Rect::new(0, 0, 0, 10), Rect::new(1, 1, 2, 2)]);
        assert_eq!(damage, DamageRegion::Rects(vec![Rect::new(1, 1, 2, 2)]));
        assert_eq!(
            DamageRegion::from_rects([Rect::new(5, 5, 5, 5)]),
            DamageRegion::None
        );
    }

    #[test]
    fn merge_full_wins() {
        let mut damage = DamageRegion::Rects(vec![Rect::new(0, 0, 1, 1)]);
        damage.merge(&DamageRegion::Full);
        assert_eq!(damage, DamageRegion::Full);

        let mut none = DamageRegion::None;
        none.merge(&DamageRegion::None);
        assert!(none.is_empty());
    }

    #[test]
    fn merge_concatenates_rects() {
        let mut damage = DamageRegion::None;
        damage.merge(&DamageRegion::Rects(vec![Rect::new(0, 0, 1, 1)]));
        damage.merge(&DamageRegion::Rects(vec![Rect::new(5, 5, 6, 6)]));
        assert_eq!(
            damage,
            DamageRegion::Rects(vec![Rect::new(0, 0, 1, 1), Rect::new(5, 5, 6, 6)])
        );
    }

    #[test]
    fn add_rect_promotes_none() {
        let mut damage = DamageRegion::None;
        damage.add_rect(Rect::new(0, 0, 0, 0));
        assert!(damage.is_empty());
        damage.add_rect(Rect::new(2, 2, 4, 4));
        assert_eq!(damage, DamageRegion::Rects(vec![Rect::new(2, 2, 4, 4)]));
    }

    #[test]
    fn union_rect_clamps_to_viewport() {
        let damage = DamageRegion::Rects(vec![Rect::new(10, 10, 20, 20), Rect::new(700, 500, 900, 700)]);
        assert_eq!(damage.union_rect(VIEW), Some(Rect::new(10, 10, 800, 600)));
        assert_eq!(DamageRegion::Full.union_rect(VIEW), Some(VIEW));
        assert_eq!(DamageRegion::None.union_rect(VIEW), None);

        let offscreen = DamageRegion::Rects(vec![Rect::new(900, 900, 950, 950)]);
        assert_eq!(offscreen.union_rect(VIEW), None);
    }
}
