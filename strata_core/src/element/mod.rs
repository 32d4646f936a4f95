// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element tree data model.
//!
//! An *element* is a node in the scene tree. Each element has:
//!
//! - An identity ([`ElementId`]): an index handle into the tree's arrays.
//! - Topology: a parent, and for containers an ordered child list. Child
//!   order records insertion only; it does not affect paint order.
//! - A depth (root = 0, child = parent + 1), a bounding [`Rect`], a z-index,
//!   and a [`Paint`].
//! - A kind ([`ElementKind`]): a **container** groups children and is never
//!   painted; a **leaf** has no children and owns one
//!   [`Appearance`](crate::appearance::Appearance).
//!
//! Elements are stored in struct-of-arrays layout for cache-friendly
//! traversal. Only leaf bounds take part in overlap and paint decisions.
//!
//! # Dirty tracking
//!
//! Mutators mark the corresponding [`dirty`](crate::dirty) channel;
//! [`ElementTree::take_changes`] drains them into [`TreeChanges`].
//!
//! [`Rect`]: crate::geometry::Rect
//! [`Paint`]: crate::paint::Paint

mod changes;
mod id;
mod traverse;
mod tree;

pub use changes::TreeChanges;
pub use id::{ElementId, INVALID};
pub use traverse::{Children, Leaves};
pub use tree::{ElementKind, ElementTree};
