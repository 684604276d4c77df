// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_kdtree --heading-base-level=0

//! Understory KdTree: a 2D point index.
//!
//! [`KdTree`] maps distinct planar points to values and answers three kinds
//! of query:
//!
//! - Exact lookup with [`KdTree::get`] and [`KdTree::contains`].
//! - Range search for every point inside a closed rectangle with [`KdTree::range`]
//!   (or [`KdTree::visit_range`] to avoid allocating).
//! - Nearest neighbor with [`KdTree::nearest`].
//!
//! Points and rectangles are [`kurbo`] types. Each node caches the region of
//! the plane routed to it when it is inserted, and both range and nearest
//! searches skip subtrees whose region cannot contribute.
//!
//! The tree is never rebalanced: its shape depends only on insertion order.
//! Random input gives logarithmic depth on average, sorted input gives a
//! tree as deep as it is long. There is no removal.
//!
//! ## Features
//!
//! - `std` *(default)*: use `std` in `kurbo`, `thiserror` and `tracing`.
//! - `libm`: `no_std` numeric support for `kurbo`.
//! - `tracing` *(default)*: emit a `debug` event with the derived bounding
//!   rectangle of every newly inserted point.
//!
//! # Example
//!
//! ```rust
//! use understory_kdtree::{KdTree, KdTreeError, Point, Rect};
//!
//! let mut tree = KdTree::new();
//! tree.insert(Point::new(2.0, 3.0), "a").unwrap();
//! tree.insert(Point::new(4.0, 2.0), "b").unwrap();
//! tree.insert(Point::new(3.0, 3.0), "c").unwrap();
//!
//! // Re-inserting a point replaces its value.
//! assert_eq!(tree.insert(Point::new(2.0, 3.0), "A"), Ok(Some("a")));
//! assert_eq!(tree.len(), 3);
//! assert_eq!(tree.get(Point::new(2.0, 3.0)), Some(&"A"));
//!
//! // Rectangles are closed: boundary points are included.
//! let hits = tree.range(Rect::new(1.0, 2.5, 3.0, 3.5));
//! assert_eq!(hits.len(), 2);
//!
//! assert_eq!(tree.nearest(Point::new(4.2, 1.5)), Ok(Point::new(4.0, 2.0)));
//!
//! let empty: KdTree<u8> = KdTree::new();
//! assert_eq!(empty.nearest(Point::ZERO), Err(KdTreeError::Empty));
//! ```
//!
//! ### Float semantics
//!
//! Stored and queried points must have finite coordinates. Operations that
//! can fail report [`KdTreeError::InvalidArgument`] otherwise; [`KdTree::get`]
//! simply finds nothing.

#![no_std]

extern crate alloc;

mod error;
pub mod geom;
mod tree;

pub use error::KdTreeError;
pub use kurbo::{Point, Rect};
pub use tree::KdTree;
