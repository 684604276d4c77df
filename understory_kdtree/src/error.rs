// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by [`KdTree`][crate::KdTree].

use kurbo::Point;

/// Failure of a [`KdTree`][crate::KdTree] operation.
///
/// Every check happens before the tree is touched, so an error never leaves
/// a partial mutation behind.
///
/// Equality compares the payload point, so an `InvalidArgument` carrying a
/// NaN coordinate is not equal to itself; match on the variant instead.
#[derive(Copy, Clone, Debug, PartialEq, thiserror::Error)]
pub enum KdTreeError {
    /// The point has a NaN or infinite coordinate and cannot be ordered.
    #[error("invalid point {point:?}: coordinates must be finite")]
    InvalidArgument {
        /// The rejected point.
        point: Point,
    },
    /// A nearest-neighbor query was made on an empty tree.
    #[error("nearest-neighbor query on an empty tree")]
    Empty,
}
