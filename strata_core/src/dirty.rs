// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! Strata records element mutations between frames with multi-channel dirty
//! tracking (via [`understory_dirty`]). Each channel represents an
//! independent category of change.
//!
//! # Propagation semantics
//!
//! All channels are **local-only**: only the explicitly marked element
//! appears in the drain output. Nothing about an element's paint is inherited
//! from its ancestors. A container z-index change is a one-shot edit of every
//! descendant leaf, so [`ElementTree::set_z_index`] marks those leaves
//! directly.
//!
//! Spatial fan-out (which *other* leaves must be repainted because they
//! overlap a changed one) is not dirty tracking; it is computed at redraw
//! time by [`propagate`](crate::propagate).
//!
//! # Consumption
//!
//! [`ElementTree::take_changes`] drains all channels into a
//! [`TreeChanges`](crate::element::TreeChanges) value that a frame loop turns
//! into one incremental redraw.
//!
//! [`ElementTree::set_z_index`]: crate::element::ElementTree::set_z_index
//! [`ElementTree::take_changes`]: crate::element::ElementTree::take_changes

use understory_dirty::Channel;

/// Bounding rectangle changed (move, resize, text reflow).
pub const GEOMETRY: Channel = Channel::new(0);

/// Fill, stroke, or stroke width changed.
pub const PAINT: Channel = Channel::new(1);

/// Appearance contents changed (corner radii, text, font).
pub const APPEARANCE: Channel = Channel::new(2);

/// Compositing position changed (z-index).
pub const Z_ORDER: Channel = Channel::new(3);

/// Element was attached to the tree.
pub const TOPOLOGY: Channel = Channel::new(4);
