// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The 2D-tree itself.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::mem;

use kurbo::{Point, Rect};

use crate::error::KdTreeError;
use crate::geom::{
    Orientation, Side, UNBOUNDED, is_valid_point, point_distance_squared, rect_contains,
    rect_distance_squared, rect_overlaps, side_of, split_rect,
};

struct Node<V> {
    point: Point,
    value: V,
    /// Region of the plane routed to this node. Set once at insertion.
    rect: Rect,
    orientation: Orientation,
    lower: Option<Box<Node<V>>>,
    upper: Option<Box<Node<V>>>,
    /// Number of nodes in this subtree, including this one.
    len: usize,
}

impl<V> Node<V> {
    fn leaf(point: Point, value: V, rect: Rect, orientation: Orientation) -> Self {
        Self {
            point,
            value,
            rect,
            orientation,
            lower: None,
            upper: None,
            len: 1,
        }
    }

    #[inline]
    fn child(&self, side: Side) -> Option<&Self> {
        match side {
            Side::Lower => self.lower.as_deref(),
            Side::Upper => self.upper.as_deref(),
        }
    }

    #[inline]
    fn child_mut(&mut self, side: Side) -> &mut Option<Box<Self>> {
        match side {
            Side::Lower => &mut self.lower,
            Side::Upper => &mut self.upper,
        }
    }

    fn update_len(&mut self) {
        self.len = 1 + subtree_len(self.lower.as_deref()) + subtree_len(self.upper.as_deref());
    }
}

#[inline]
fn subtree_len<V>(node: Option<&Node<V>>) -> usize {
    node.map_or(0, |n| n.len)
}

/// A 2D-tree mapping distinct points to values.
///
/// Each level splits the plane alternately on `x` and `y`. Points strictly
/// below a node's coordinate on its axis go to the lower subtree, everything
/// else (ties included) goes to the upper subtree.
///
/// The shape depends only on insertion order and is never rebalanced: sorted
/// input produces a tree as deep as it is long.
pub struct KdTree<V> {
    root: Option<Box<Node<V>>>,
}

impl<V> Default for KdTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for KdTree<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KdTree")
            .field("len", &self.len())
            .field("height", &self.height())
            .finish_non_exhaustive()
    }
}

impl<V> KdTree<V> {
    /// Create an empty tree.
    pub const fn new() -> Self {
        Self { root: None }
    }

    /// Whether the tree holds no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of distinct points in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        subtree_len(self.root.as_deref())
    }

    /// Number of nodes on the longest root-to-leaf path; 0 when empty.
    pub fn height(&self) -> usize {
        fn height_of<V>(node: Option<&Node<V>>) -> usize {
            node.map_or(0, |n| {
                1 + height_of(n.lower.as_deref()).max(height_of(n.upper.as_deref()))
            })
        }
        height_of(self.root.as_deref())
    }

    /// Remove every point.
    pub fn clear(&mut self) {
        self.root = None;
    }

    /// Associate `value` with `point`.
    ///
    /// If the point is already present its value is replaced and the old one
    /// returned; the tree's shape does not change. Otherwise a new node is
    /// added and `Ok(None)` is returned.
    ///
    /// Fails with [`KdTreeError::InvalidArgument`] if a coordinate is NaN or
    /// infinite.
    pub fn insert(&mut self, point: Point, value: V) -> Result<Option<V>, KdTreeError> {
        if !is_valid_point(point) {
            return Err(KdTreeError::InvalidArgument { point });
        }
        Ok(Self::insert_at(
            &mut self.root,
            point,
            value,
            UNBOUNDED,
            Orientation::Horizontal,
        ))
    }

    /// `rect` and `orientation` are what a new node created in `slot` gets;
    /// the caller derives them from the parent.
    fn insert_at(
        slot: &mut Option<Box<Node<V>>>,
        point: Point,
        value: V,
        rect: Rect,
        orientation: Orientation,
    ) -> Option<V> {
        let Some(node) = slot.as_deref_mut() else {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                target: "understory_kdtree",
                ?point,
                ?rect,
                ?orientation,
                "bounding rectangle for inserted point"
            );
            *slot = Some(Box::new(Node::leaf(point, value, rect, orientation)));
            return None;
        };

        if node.point == point {
            #[cfg(feature = "tracing")]
            tracing::trace!(target: "understory_kdtree", ?point, "replaced value");
            return Some(mem::replace(&mut node.value, value));
        }

        let side = side_of(point, node.point, node.orientation);
        let child_rect = split_rect(node.rect, node.point, node.orientation, side);
        let child_orientation = node.orientation.flip();
        let replaced = Self::insert_at(
            node.child_mut(side),
            point,
            value,
            child_rect,
            child_orientation,
        );
        if replaced.is_none() {
            node.update_len();
        }
        replaced
    }

    fn find(&self, point: Point) -> Option<&Node<V>> {
        let mut cur = self.root.as_deref();
        while let Some(node) = cur {
            if node.point == point {
                return Some(node);
            }
            cur = node.child(side_of(point, node.point, node.orientation));
        }
        None
    }

    /// The value stored at exactly `point`.
    ///
    /// Returns `None` when the point is absent, including for points with
    /// non-finite coordinates, which can never be stored.
    pub fn get(&self, point: Point) -> Option<&V> {
        if !is_valid_point(point) {
            return None;
        }
        self.find(point).map(|n| &n.value)
    }

    /// Mutable access to the value stored at exactly `point`.
    pub fn get_mut(&mut self, point: Point) -> Option<&mut V> {
        if !is_valid_point(point) {
            return None;
        }
        let mut cur = self.root.as_deref_mut();
        while let Some(node) = cur {
            if node.point == point {
                return Some(&mut node.value);
            }
            cur = node
                .child_mut(side_of(point, node.point, node.orientation))
                .as_deref_mut();
        }
        None
    }

    /// Whether `point` is stored in the tree.
    ///
    /// Fails with [`KdTreeError::InvalidArgument`] if a coordinate is NaN or
    /// infinite.
    pub fn contains(&self, point: Point) -> Result<bool, KdTreeError> {
        if !is_valid_point(point) {
            return Err(KdTreeError::InvalidArgument { point });
        }
        Ok(self.find(point).is_some())
    }

    /// All points, lower subtree first, then the node, then the upper subtree.
    ///
    /// The order reflects the tree's shape, not coordinate order.
    pub fn points(&self) -> Vec<Point> {
        let mut out = Vec::with_capacity(self.len());
        self.visit_in_order(|p, _| out.push(p));
        out
    }

    /// All `(point, value)` pairs in the same order as [`points`][Self::points].
    pub fn entries(&self) -> Vec<(Point, &V)> {
        let mut out = Vec::with_capacity(self.len());
        self.visit_in_order(|p, v| out.push((p, v)));
        out
    }

    fn visit_in_order<'a, F: FnMut(Point, &'a V)>(&'a self, mut f: F) {
        fn walk<'a, V, F: FnMut(Point, &'a V)>(node: Option<&'a Node<V>>, f: &mut F) {
            let Some(n) = node else {
                return;
            };
            walk(n.lower.as_deref(), f);
            f(n.point, &n.value);
            walk(n.upper.as_deref(), f);
        }
        walk(self.root.as_deref(), &mut f);
    }

    /// All points inside the closed rectangle `rect`.
    ///
    /// Boundary points count as inside. Corners may be given in any order.
    /// Order follows the traversal and is not sorted by coordinate.
    pub fn range(&self, rect: Rect) -> Vec<Point> {
        let mut out = Vec::new();
        self.visit_range(rect, |p, _| out.push(p));
        out
    }

    /// Visit every entry whose point lies inside `rect` (does not allocate result storage).
    ///
    /// Corners may be given in any order. Subtrees whose region does not
    /// touch `rect` are skipped entirely.
    pub fn visit_range<'a, F: FnMut(Point, &'a V)>(&'a self, rect: Rect, mut f: F) {
        fn walk<'a, V, F: FnMut(Point, &'a V)>(node: Option<&'a Node<V>>, rect: Rect, f: &mut F) {
            let Some(n) = node else {
                return;
            };
            if !rect_overlaps(n.rect, rect) {
                return;
            }
            // The query may straddle the split line, so both sides are checked.
            walk(n.lower.as_deref(), rect, f);
            if rect_contains(rect, n.point) {
                f(n.point, &n.value);
            }
            walk(n.upper.as_deref(), rect, f);
        }
        walk(self.root.as_deref(), rect.abs(), &mut f);
    }

    /// The stored point closest to `query` by Euclidean distance.
    ///
    /// When several points are equally close, any one of them is returned.
    /// Fails with [`KdTreeError::Empty`] on an empty tree and with
    /// [`KdTreeError::InvalidArgument`] for a non-finite query.
    pub fn nearest(&self, query: Point) -> Result<Point, KdTreeError> {
        self.nearest_entry(query).map(|(p, _)| p)
    }

    /// Like [`nearest`][Self::nearest], also returning the stored value.
    pub fn nearest_entry(&self, query: Point) -> Result<(Point, &V), KdTreeError> {
        if !is_valid_point(query) {
            return Err(KdTreeError::InvalidArgument { point: query });
        }
        let root = self.root.as_deref().ok_or(KdTreeError::Empty)?;
        let mut best = Champion {
            node: root,
            dist2: point_distance_squared(root.point, query),
        };
        nearest_in(Some(root), query, &mut best);
        Ok((best.node.point, &best.node.value))
    }
}

/// Closest node seen so far during a nearest-neighbor search.
struct Champion<'a, V> {
    node: &'a Node<V>,
    dist2: f64,
}

fn nearest_in<'a, V>(node: Option<&'a Node<V>>, query: Point, best: &mut Champion<'a, V>) {
    let Some(n) = node else {
        return;
    };

    let d = point_distance_squared(n.point, query);
    if d < best.dist2 {
        best.node = n;
        best.dist2 = d;
    }

    // Nothing in this region can beat the champion.
    if rect_distance_squared(n.rect, query) >= best.dist2 {
        return;
    }

    let (near, far) = match side_of(query, n.point, n.orientation) {
        Side::Lower => (n.lower.as_deref(), n.upper.as_deref()),
        Side::Upper => (n.upper.as_deref(), n.lower.as_deref()),
    };
    nearest_in(near, query, best);
    nearest_in(far, query, best);
}
