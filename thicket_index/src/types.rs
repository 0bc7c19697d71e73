// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Record and bookkeeping types shared by the three indexes.

use alloc::vec::Vec;

use kurbo::Point;

/// Projection of a stored record onto the 2D plane.
///
/// An index stores records of an opaque type `T` and only ever inspects them
/// through this trait, exactly once at ingest. Extra payload (a z coordinate,
/// an intensity value, an id) rides along untouched.
pub trait PointRecord {
    /// The record's position in the indexed plane.
    fn position(&self) -> Point;
}

impl PointRecord for Point {
    fn position(&self) -> Point {
        *self
    }
}

impl PointRecord for (f64, f64) {
    fn position(&self) -> Point {
        Point::new(self.0, self.1)
    }
}

impl PointRecord for [f64; 2] {
    fn position(&self) -> Point {
        Point::new(self[0], self[1])
    }
}

impl PointRecord for [f64; 3] {
    fn position(&self) -> Point {
        Point::new(self[0], self[1])
    }
}

/// Rows from readers that hand out variable-length records.
/// The first two entries must be the x and y coordinates.
impl PointRecord for Vec<f64> {
    fn position(&self) -> Point {
        Point::new(self[0], self[1])
    }
}

/// A stored record together with its projected 2D point.
#[derive(Clone, Debug)]
pub struct Datum<T> {
    record: T,
    point: Point,
}

impl<T: PointRecord> Datum<T> {
    /// Project `record` once and pair it with the result.
    ///
    /// Coordinates are assumed finite; debug builds assert.
    pub fn new(record: T) -> Self {
        let point = record.position();
        debug_assert!(
            point.x.is_finite() && point.y.is_finite(),
            "record projects to a non-finite point"
        );
        Self { record, point }
    }
}

impl<T> Datum<T> {
    /// The projected position.
    pub fn point(&self) -> Point {
        self.point
    }

    /// The stored record.
    pub fn record(&self) -> &T {
        &self.record
    }
}

/// Inclusive index range over a tree's leaf array.
///
/// Leaves are appended in recursion order, so the leaves under any subtree
/// occupy one contiguous span of the array.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LeafRange {
    /// First leaf index covered by the subtree.
    pub start: usize,
    /// Last leaf index covered by the subtree (inclusive).
    pub end: usize,
}

impl LeafRange {
    /// Range covering a single leaf.
    pub const fn single(idx: usize) -> Self {
        Self { start: idx, end: idx }
    }

    /// Range spanning `start..=end`.
    pub const fn span(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Whether the range covers exactly one leaf.
    pub const fn is_single(self) -> bool {
        self.start == self.end
    }
}

/// Errors reported at the public API boundary.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Constructor received inverted domain bounds.
    #[error("invalid domain bounds: x [{x0}, {x1}], y [{y0}, {y1}]")]
    InvalidBounds {
        /// Minimum x as passed.
        x0: f64,
        /// Maximum x as passed.
        x1: f64,
        /// Minimum y as passed.
        y0: f64,
        /// Maximum y as passed.
        y1: f64,
    },

    /// `query_knn` was asked for zero neighbours.
    #[error("k must be at least 1")]
    InvalidK,

    /// A record lies outside the configured domain of an index that does
    /// not admit such points.
    #[error("point ({x}, {y}) lies outside the configured domain")]
    OutOfDomain {
        /// Offending x coordinate.
        x: f64,
        /// Offending y coordinate.
        y: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn projection_runs_once_at_ingest() {
        let datum = Datum::new([3.0, 4.0, 99.0]);
        assert_eq!(datum.point(), Point::new(3.0, 4.0));
        assert_eq!(datum.record()[2], 99.0);
    }

    #[test]
    fn vec_records_project_from_leading_coords() {
        let datum = Datum::new(vec![1.5, 2.5, 0.0, 7.0]);
        assert_eq!(datum.point(), Point::new(1.5, 2.5));
    }

    #[test]
    fn leaf_range_single() {
        let r = LeafRange::single(5);
        assert!(r.is_single());
        assert_eq!(r, LeafRange::span(5, 5));
        assert!(!LeafRange::span(2, 3).is_single());
    }
}
