// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Planar helpers on top of [`kurbo`] used by the tree.
//!
//! All rectangle predicates here treat a [`Rect`] as a *closed* region:
//! points on the boundary are inside. This differs from [`Rect::contains`],
//! which is half-open.

use core::cmp::Ordering;

use kurbo::{Point, Rect};

/// The whole plane, used as the region of the root node.
pub const UNBOUNDED: Rect = Rect::new(
    f64::NEG_INFINITY,
    f64::NEG_INFINITY,
    f64::INFINITY,
    f64::INFINITY,
);

/// Which coordinate a node splits on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// Split by a vertical line; points are compared on `x`.
    Horizontal,
    /// Split by a horizontal line; points are compared on `y`.
    Vertical,
}

impl Orientation {
    /// The orientation used one level deeper in the tree.
    #[inline]
    pub const fn flip(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    /// The coordinate of `p` this orientation compares.
    #[inline]
    pub const fn coord(self, p: Point) -> f64 {
        match self {
            Self::Horizontal => p.x,
            Self::Vertical => p.y,
        }
    }
}

/// The side of a split a point is routed to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Side {
    /// Strictly less than the split coordinate (left or bottom).
    Lower,
    /// Greater than or equal to the split coordinate (right or top).
    Upper,
}

/// Sign of `a.axis - b.axis` along `orientation`.
///
/// Incomparable coordinates (NaN) compare as equal; callers reject such
/// points before they reach the tree.
#[inline]
pub fn axis_cmp(a: Point, b: Point, orientation: Orientation) -> Ordering {
    orientation
        .coord(a)
        .partial_cmp(&orientation.coord(b))
        .unwrap_or(Ordering::Equal)
}

/// Route `p` against a node holding `split`.
///
/// Ties go to [`Side::Upper`]. Insertion, lookup, nearest-neighbor ordering
/// and region splitting all go through here so they agree on every tie.
#[inline]
pub fn side_of(p: Point, split: Point, orientation: Orientation) -> Side {
    match axis_cmp(p, split, orientation) {
        Ordering::Less => Side::Lower,
        Ordering::Equal | Ordering::Greater => Side::Upper,
    }
}

/// Clip `rect` to one side of the split line through `split`.
#[inline]
pub fn split_rect(rect: Rect, split: Point, orientation: Orientation, side: Side) -> Rect {
    match (orientation, side) {
        (Orientation::Horizontal, Side::Lower) => Rect::new(rect.x0, rect.y0, split.x, rect.y1),
        (Orientation::Horizontal, Side::Upper) => Rect::new(split.x, rect.y0, rect.x1, rect.y1),
        (Orientation::Vertical, Side::Lower) => Rect::new(rect.x0, rect.y0, rect.x1, split.y),
        (Orientation::Vertical, Side::Upper) => Rect::new(rect.x0, split.y, rect.x1, rect.y1),
    }
}

/// Whether the closed rectangle contains `p`.
#[inline]
pub fn rect_contains(rect: Rect, p: Point) -> bool {
    rect.x0 <= p.x && p.x <= rect.x1 && rect.y0 <= p.y && p.y <= rect.y1
}

/// Whether two closed rectangles overlap.
///
/// Rectangles that only share an edge or a corner are considered to overlap.
#[inline]
pub fn rect_overlaps(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && a.x1 >= b.x0 && a.y0 <= b.y1 && a.y1 >= b.y0
}

/// Squared Euclidean distance between two points.
#[inline]
pub fn point_distance_squared(a: Point, b: Point) -> f64 {
    (a - b).hypot2()
}

/// Squared distance from `p` to the nearest point of the closed rectangle.
///
/// Zero when `p` is inside. Infinite bounds are fine as long as `p` is finite.
#[inline]
pub fn rect_distance_squared(rect: Rect, p: Point) -> f64 {
    let dx = if p.x < rect.x0 {
        rect.x0 - p.x
    } else if p.x > rect.x1 {
        p.x - rect.x1
    } else {
        0.0
    };
    let dy = if p.y < rect.y0 {
        rect.y0 - p.y
    } else if p.y > rect.y1 {
        p.y - rect.y1
    } else {
        0.0
    };
    dx * dx + dy * dy
}

/// Whether both coordinates of `p` are finite.
#[inline]
pub fn is_valid_point(p: Point) -> bool {
    p.x.is_finite() && p.y.is_finite()
}
