// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays element storage with allocation, topology, and property
//! management.

use alloc::string::String;
use alloc::vec::Vec;

use understory_dirty::{CycleHandling, DirtyTracker};

use crate::appearance::{Appearance, CornerRadii, Font, RectAppearance, TextAppearance};
use crate::dirty;
use crate::geometry::{Point, Rect, Size};
use crate::paint::Paint;

use super::id::{ElementId, INVALID};
use super::traverse::{Children, Leaves};

/// The two kinds of element.
#[derive(Clone, Debug, PartialEq)]
pub enum ElementKind {
    /// Groups children; never painted itself.
    Container,
    /// Childless and paintable, with exactly one appearance.
    Leaf(Appearance),
}

/// Struct-of-arrays storage for every element of one scene.
///
/// Elements are addressed by [`ElementId`] handles. Slot 0 is the root: a
/// container at depth 0 whose area is [`Rect::MAXIMAL`]. Every other element
/// is attached to exactly one parent, once, and is never re-parented or
/// destroyed.
#[derive(Debug)]
pub struct ElementTree {
    // -- Topology --
    pub(crate) parent: Vec<u32>,
    pub(crate) first_child: Vec<u32>,
    pub(crate) last_child: Vec<u32>,
    pub(crate) next_sibling: Vec<u32>,
    pub(crate) depth: Vec<u32>,

    // -- Properties --
    pub(crate) bounds: Vec<Rect>,
    pub(crate) z_index: Vec<f32>,
    pub(crate) paint: Vec<Paint>,
    pub(crate) kind: Vec<ElementKind>,

    // -- Dirty tracking --
    pub(crate) dirty: DirtyTracker<u32>,
}

impl Default for ElementTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementTree {
    /// Creates a tree holding only its root element.
    #[must_use]
    pub fn new() -> Self {
        let mut tree = Self {
            parent: Vec::new(),
            first_child: Vec::new(),
            last_child: Vec::new(),
            next_sibling: Vec::new(),
            depth: Vec::new(),
            bounds: Vec::new(),
            z_index: Vec::new(),
            paint: Vec::new(),
            kind: Vec::new(),
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
        };
        let _root = tree.alloc(ElementKind::Container, Rect::MAXIMAL);
        tree
    }

    /// Returns the root element.
    #[inline]
    #[must_use]
    pub const fn root(&self) -> ElementId {
        ElementId(0)
    }

    /// Returns the number of elements, including the root and any detached
    /// elements.
    #[inline]
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.kind.len()
    }

    // -- Allocation API --

    /// Creates a detached container.
    ///
    /// Detached elements are not part of the scene until they are
    /// [attached](Self::attach).
    pub fn create_container(&mut self) -> ElementId {
        self.alloc(ElementKind::Container, Rect::default())
    }

    /// Creates a detached leaf with the given bounds and appearance.
    pub fn create_leaf(&mut self, bounds: Rect, appearance: Appearance) -> ElementId {
        self.alloc(ElementKind::Leaf(appearance), bounds)
    }

    /// Creates a container and attaches it to `parent`.
    pub fn add_container(&mut self, parent: ElementId) -> ElementId {
        let id = self.create_container();
        self.attach(id, parent);
        id
    }

    /// Creates a rectangle leaf covering `bounds` and attaches it to `parent`.
    pub fn add_rect(&mut self, parent: ElementId, bounds: Rect) -> ElementId {
        let id = self.create_leaf(bounds, Appearance::Rect(RectAppearance::default()));
        self.attach(id, parent);
        id
    }

    /// Creates an empty text leaf at `origin` and attaches it to `parent`.
    ///
    /// The leaf starts with empty bounds at `origin`; it grows to the measured
    /// size of its text the first time it is painted.
    pub fn add_text(
        &mut self,
        parent: ElementId,
        origin: Point,
        font: Font,
        editable: bool,
    ) -> ElementId {
        let appearance = Appearance::Text(TextAppearance {
            content: String::new(),
            font,
            editable,
        });
        let bounds = Rect::new(origin.x, origin.y, origin.x, origin.y);
        let id = self.create_leaf(bounds, appearance);
        self.attach(id, parent);
        id
    }

    /// Creates an editable text leaf at `origin` and attaches it to `parent`.
    pub fn add_text_input(&mut self, parent: ElementId, origin: Point, font: Font) -> ElementId {
        self.add_text(parent, origin, font, true)
    }

    // -- Topology API --

    /// Appends `child` to `parent`'s children.
    ///
    /// The child's depth becomes `parent`'s depth plus one (descendants of a
    /// detached container follow), and its own z-index is reset to zero.
    ///
    /// # Panics
    ///
    /// Panics if `child` already has a parent, if `child` is the root, if
    /// `parent` is a leaf, or if `parent` lies inside `child`'s subtree.
    pub fn attach(&mut self, child: ElementId, parent: ElementId) {
        self.validate(child);
        self.validate(parent);
        let c = child.0;
        let p = parent.0;
        assert!(c != self.root().0, "cannot attach the root element");
        assert!(
            self.parent[c as usize] == INVALID,
            "element already has a parent"
        );
        assert!(
            matches!(self.kind[p as usize], ElementKind::Container),
            "cannot attach children to a leaf element"
        );
        let mut ancestor = p;
        while ancestor != INVALID {
            assert!(ancestor != c, "attaching would create a cycle");
            ancestor = self.parent[ancestor as usize];
        }

        self.parent[c as usize] = p;
        self.next_sibling[c as usize] = INVALID;
        if self.first_child[p as usize] == INVALID {
            self.first_child[p as usize] = c;
        } else {
            let last = self.last_child[p as usize];
            self.next_sibling[last as usize] = c;
        }
        self.last_child[p as usize] = c;

        self.z_index[c as usize] = 0.0;
        self.assign_subtree_depth(c, self.depth[p as usize] + 1);
        self.dirty.mark(c, dirty::TOPOLOGY);
    }

    /// Returns the parent of an element, if any.
    #[must_use]
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.validate(id);
        let p = self.parent[id.slot()];
        (p != INVALID).then_some(ElementId(p))
    }

    /// Returns an iterator over the direct children of an element.
    #[must_use]
    pub fn children(&self, id: ElementId) -> Children<'_> {
        self.validate(id);
        Children::new(self, self.first_child[id.slot()])
    }

    /// Returns a pre-order iterator over every leaf in `id`'s subtree.
    ///
    /// A leaf yields only itself.
    #[must_use]
    pub fn leaves(&self, id: ElementId) -> Leaves<'_> {
        self.validate(id);
        Leaves::new(self, id.0)
    }

    /// Collects [`leaves`](Self::leaves) into a vector.
    #[must_use]
    pub fn all_leaves(&self, id: ElementId) -> Vec<ElementId> {
        self.leaves(id).collect()
    }

    /// Returns `true` if `id` is the root or is connected to it.
    #[must_use]
    pub fn is_attached(&self, id: ElementId) -> bool {
        self.validate(id);
        let mut node = id.0;
        while self.parent[node as usize] != INVALID {
            node = self.parent[node as usize];
        }
        node == self.root().0
    }

    // -- Property getters --

    /// Returns the depth of an element (root = 0).
    #[must_use]
    pub fn depth(&self, id: ElementId) -> u32 {
        self.validate(id);
        self.depth[id.slot()]
    }

    /// Returns the bounding rectangle of an element.
    ///
    /// Only leaf bounds take part in overlap and paint decisions; a
    /// container's bounds are informational.
    #[must_use]
    pub fn bounds(&self, id: ElementId) -> Rect {
        self.validate(id);
        self.bounds[id.slot()]
    }

    /// Returns the z-index of an element.
    #[must_use]
    pub fn z_index(&self, id: ElementId) -> f32 {
        self.validate(id);
        self.z_index[id.slot()]
    }

    /// Returns the paint of an element.
    #[must_use]
    pub fn paint(&self, id: ElementId) -> Paint {
        self.validate(id);
        self.paint[id.slot()]
    }

    /// Returns whether an element is a container or a leaf.
    #[must_use]
    pub fn kind(&self, id: ElementId) -> &ElementKind {
        self.validate(id);
        &self.kind[id.slot()]
    }

    /// Returns `true` if the element is a leaf.
    #[must_use]
    pub fn is_leaf(&self, id: ElementId) -> bool {
        self.validate(id);
        self.is_leaf_at(id.0)
    }

    /// Returns the appearance of a leaf.
    ///
    /// # Panics
    ///
    /// Panics if `id` is a container.
    #[must_use]
    pub fn appearance(&self, id: ElementId) -> &Appearance {
        self.validate(id);
        match &self.kind[id.slot()] {
            ElementKind::Leaf(appearance) => appearance,
            ElementKind::Container => panic!("container {id:?} has no appearance"),
        }
    }

    /// Returns the text descriptor of a text leaf.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a text leaf.
    #[must_use]
    pub fn text(&self, id: ElementId) -> &TextAppearance {
        match self.appearance(id) {
            Appearance::Text(text) => text,
            Appearance::Rect(_) => panic!("element {id:?} is not a text leaf"),
        }
    }

    // -- Mutation API (auto-marks dirty) --

    /// Moves or resizes an element.
    pub fn set_bounds(&mut self, id: ElementId, bounds: Rect) {
        self.validate(id);
        self.bounds[id.slot()] = bounds;
        self.dirty.mark(id.0, dirty::GEOMETRY);
    }

    /// Sets the fill and stroke of an element.
    pub fn set_paint(&mut self, id: ElementId, paint: Paint) {
        self.validate(id);
        self.paint[id.slot()] = paint;
        self.dirty.mark(id.0, dirty::PAINT);
    }

    /// Sets the z-index of a leaf, or shifts every leaf below a container.
    ///
    /// On a leaf, `z` replaces the leaf's z-index. On a container, `z` is
    /// added to the current z-index of every descendant leaf; this is a
    /// one-shot edit, so calling it twice accumulates, and leaves attached
    /// later are unaffected.
    pub fn set_z_index(&mut self, id: ElementId, z: f32) {
        self.validate(id);
        if self.is_leaf_at(id.0) {
            self.z_index[id.slot()] = z;
            self.dirty.mark(id.0, dirty::Z_ORDER);
            return;
        }
        let leaves = self.all_leaves(id);
        for leaf in leaves {
            self.z_index[leaf.slot()] += z;
            self.dirty.mark(leaf.0, dirty::Z_ORDER);
        }
    }

    /// Sets the corner radii of a rectangle leaf.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a rectangle leaf.
    pub fn set_corner_radii(&mut self, id: ElementId, radii: CornerRadii) {
        self.validate(id);
        match &mut self.kind[id.slot()] {
            ElementKind::Leaf(Appearance::Rect(rect)) => rect.corner_radii = radii,
            _ => panic!("element {id:?} is not a rectangle leaf"),
        }
        self.dirty.mark(id.0, dirty::APPEARANCE);
    }

    /// Replaces the content of a text leaf.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a text leaf.
    pub fn set_text(&mut self, id: ElementId, content: impl Into<String>) {
        self.text_mut(id).content = content.into();
        self.dirty.mark(id.0, dirty::APPEARANCE);
    }

    /// Replaces the font of a text leaf.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a text leaf.
    pub fn set_font(&mut self, id: ElementId, font: Font) {
        self.text_mut(id).font = font;
        self.dirty.mark(id.0, dirty::APPEARANCE);
    }

    /// Resizes a leaf to its measured content size, keeping its origin.
    ///
    /// Returns `true` (and marks the geometry channel) if the bounds changed.
    pub fn fit_to_content(&mut self, id: ElementId, size: Size) -> bool {
        self.validate(id);
        let current = self.bounds[id.slot()];
        let fitted = current.with_size(size);
        if fitted == current {
            return false;
        }
        self.bounds[id.slot()] = fitted;
        self.dirty.mark(id.0, dirty::GEOMETRY);
        true
    }

    // -- Internal helpers --

    /// Appends a detached element.
    fn alloc(&mut self, kind: ElementKind, bounds: Rect) -> ElementId {
        let idx = u32::try_from(self.kind.len()).unwrap_or(INVALID);
        assert!(idx != INVALID, "element arena is full");
        self.parent.push(INVALID);
        self.first_child.push(INVALID);
        self.last_child.push(INVALID);
        self.next_sibling.push(INVALID);
        self.depth.push(0);
        self.bounds.push(bounds);
        self.z_index.push(0.0);
        self.paint.push(Paint::default());
        self.kind.push(kind);
        ElementId(idx)
    }

    /// Panics if the handle does not belong to this tree's arena.
    fn validate(&self, id: ElementId) {
        assert!(
            id.slot() < self.kind.len(),
            "unknown {id:?} (tree holds {} elements)",
            self.kind.len()
        );
    }

    pub(crate) fn is_leaf_at(&self, idx: u32) -> bool {
        matches!(self.kind[idx as usize], ElementKind::Leaf(_))
    }

    fn text_mut(&mut self, id: ElementId) -> &mut TextAppearance {
        self.validate(id);
        match &mut self.kind[id.slot()] {
            ElementKind::Leaf(Appearance::Text(text)) => text,
            _ => panic!("element {id:?} is not a text leaf"),
        }
    }

    /// Sets the depth of `idx` and recomputes it for every descendant.
    fn assign_subtree_depth(&mut self, idx: u32, depth: u32) {
        self.depth[idx as usize] = depth;
        let mut stack = Vec::new();
        stack.push(idx);
        while let Some(node) = stack.pop() {
            let child_depth = self.depth[node as usize] + 1;
            let mut child = self.first_child[node as usize];
            while child != INVALID {
                self.depth[child as usize] = child_depth;
                stack.push(child);
                child = self.next_sibling[child as usize];
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::appearance::FontStyle;

    fn sans() -> Font {
        Font::new("Sans", 14, FontStyle::REGULAR)
    }

    #[test]
    fn root_is_maximal_container() {
        let tree = ElementTree::new();
        let root = tree.root();
        assert_eq!(tree.depth(root), 0);
        assert_eq!(tree.bounds(root), Rect::MAXIMAL);
        assert_eq!(tree.z_index(root), 0.0);
        assert_eq!(tree.parent(root), None);
        assert!(!tree.is_leaf(root));
        assert!(tree.is_attached(root));
    }

    #[test]
    fn attach_sets_parent_depth_and_order() {
        let mut tree = ElementTree::new();
        let root = tree.root();
        let group = tree.add_container(root);
        let a = tree.add_rect(group, Rect::new(0, 0, 10, 10));
        let b = tree.add_rect(group, Rect::new(5, 5, 15, 15));

        assert_eq!(tree.parent(a), Some(group));
        assert_eq!(tree.depth(group), 1);
        assert_eq!(tree.depth(a), 2);
        let kids: Vec<_> = tree.children(group).collect();
        assert_eq!(kids, vec![a, b]);
    }

    #[test]
    fn attaching_detached_subtree_recomputes_depth() {
        let mut tree = ElementTree::new();
        let root = tree.root();
        let outer = tree.add_container(root);

        let detached = tree.create_container();
        let inner = tree.create_container();
        tree.attach(inner, detached);
        let leaf = tree.create_leaf(
            Rect::new(0, 0, 1, 1),
            Appearance::Rect(RectAppearance::default()),
        );
        tree.attach(leaf, inner);
        assert!(!tree.is_attached(leaf));

        tree.attach(detached, outer);
        assert!(tree.is_attached(leaf));
        assert_eq!(tree.depth(detached), 2);
        assert_eq!(tree.depth(inner), 3);
        assert_eq!(tree.depth(leaf), 4);
    }

    #[test]
    fn attach_resets_z_index() {
        let mut tree = ElementTree::new();
        let leaf = tree.create_leaf(
            Rect::new(0, 0, 1, 1),
            Appearance::Rect(RectAppearance::default()),
        );
        tree.set_z_index(leaf, 4.0);
        tree.attach(leaf, tree.root());
        assert_eq!(tree.z_index(leaf), 0.0);
    }

    #[test]
    #[should_panic(expected = "element already has a parent")]
    fn reparenting_panics() {
        let mut tree = ElementTree::new();
        let root = tree.root();
        let group = tree.add_container(root);
        let leaf = tree.add_rect(root, Rect::new(0, 0, 1, 1));
        tree.attach(leaf, group);
    }

    #[test]
    #[should_panic(expected = "cannot attach the root element")]
    fn attaching_root_panics() {
        let mut tree = ElementTree::new();
        let group = tree.create_container();
        tree.attach(tree.root(), group);
    }

    #[test]
    #[should_panic(expected = "cannot attach children to a leaf element")]
    fn attaching_to_leaf_panics() {
        let mut tree = ElementTree::new();
        let leaf = tree.add_rect(tree.root(), Rect::new(0, 0, 1, 1));
        let child = tree.create_container();
        tree.attach(child, leaf);
    }

    #[test]
    #[should_panic(expected = "attaching would create a cycle")]
    fn cycle_panics() {
        let mut tree = ElementTree::new();
        let outer = tree.create_container();
        let inner = tree.create_container();
        tree.attach(inner, outer);
        tree.attach(outer, inner);
    }

    #[test]
    #[should_panic(expected = "has no appearance")]
    fn container_appearance_panics() {
        let tree = ElementTree::new();
        let _ = tree.appearance(tree.root());
    }

    #[test]
    #[should_panic(expected = "is not a rectangle leaf")]
    fn corner_radii_on_text_panics() {
        let mut tree = ElementTree::new();
        let text = tree.add_text(tree.root(), Point::new(0, 0), sans(), false);
        tree.set_corner_radii(text, CornerRadii::uniform(3));
    }

    #[test]
    #[should_panic(expected = "unknown ElementId")]
    fn foreign_handle_panics() {
        let mut big = ElementTree::new();
        let far = big.add_rect(big.root(), Rect::new(0, 0, 1, 1));
        let small = ElementTree::new();
        let _ = small.bounds(far);
    }

    #[test]
    fn all_leaves_is_preorder_insertion_order() {
        let mut tree = ElementTree::new();
        let root = tree.root();
        let a = tree.add_rect(root, Rect::new(0, 0, 1, 1));
        let g = tree.add_container(root);
        let b = tree.add_rect(g, Rect::new(0, 0, 1, 1));
        let h = tree.add_container(g);
        let c = tree.add_rect(h, Rect::new(0, 0, 1, 1));
        let d = tree.add_rect(g, Rect::new(0, 0, 1, 1));
        let e = tree.add_rect(root, Rect::new(0, 0, 1, 1));
        let empty = tree.add_container(root);

        assert_eq!(tree.all_leaves(root), vec![a, b, c, d, e]);
        assert_eq!(tree.all_leaves(g), vec![b, c, d]);
        assert_eq!(tree.all_leaves(h), vec![c]);
        assert_eq!(tree.all_leaves(d), vec![d], "a leaf yields itself");
        assert!(tree.all_leaves(empty).is_empty());
    }

    #[test]
    fn container_z_index_is_additive_and_one_shot() {
        let mut tree = ElementTree::new();
        let root = tree.root();
        let g = tree.add_container(root);
        let a = tree.add_rect(g, Rect::new(0, 0, 1, 1));
        let inner = tree.add_container(g);
        let b = tree.add_rect(inner, Rect::new(0, 0, 1, 1));
        tree.set_z_index(b, 1.5);

        tree.set_z_index(g, 2.0);
        assert_eq!(tree.z_index(a), 2.0);
        assert_eq!(tree.z_index(b), 3.5);

        tree.set_z_index(g, 2.0);
        assert_eq!(tree.z_index(a), 4.0, "container z-index accumulates");

        let late = tree.add_rect(g, Rect::new(0, 0, 1, 1));
        assert_eq!(tree.z_index(late), 0.0, "leaves added later are unaffected");
        assert_eq!(tree.z_index(g), 0.0, "containers carry no z-index");
    }

    #[test]
    fn text_leaf_starts_empty_and_fits_content() {
        let mut tree = ElementTree::new();
        let text = tree.add_text_input(tree.root(), Point::new(10, 20), sans());
        assert!(tree.bounds(text).is_empty());
        assert!(tree.text(text).editable);

        tree.set_text(text, "hi");
        assert_eq!(tree.text(text).content, "hi");

        assert!(tree.fit_to_content(text, Size::new(16, 14)));
        assert_eq!(tree.bounds(text), Rect::new(10, 20, 26, 34));
        assert!(!tree.fit_to_content(text, Size::new(16, 14)));
    }

    #[test]
    fn set_font_replaces_font() {
        let mut tree = ElementTree::new();
        let text = tree.add_text(tree.root(), Point::new(0, 0), sans(), false);
        tree.set_font(text, Font::new("Mono", 20, FontStyle::BOLD));
        assert_eq!(tree.text(text).font.size, 20);
        assert!(tree.text(text).font.style.bold);
    }
}
