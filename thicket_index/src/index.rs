// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The query protocol shared by the three index types.

use alloc::vec::Vec;

use crate::types::Error;

/// Common query surface of [`Quadtree`](crate::Quadtree),
/// [`Zgrid`](crate::Zgrid), and [`Rtree`](crate::Rtree).
///
/// All three answer k-nearest-neighbour queries with the same best-first
/// browsing loop and the same result contract, so code that only queries can
/// stay generic over the index it runs against.
pub trait PointIndex<T> {
    /// The `k` stored records nearest to `(x, y)`, ordered **farthest
    /// first** (the last element is the nearest neighbour).
    ///
    /// Returns fewer than `k` records when the index holds fewer; an empty
    /// index yields an empty vector. `k == 0` is rejected with
    /// [`Error::InvalidK`].
    fn query_knn(&self, k: usize, x: f64, y: f64) -> Result<Vec<T>, Error>;

    /// Number of records stored.
    fn len(&self) -> usize;

    /// Whether the index holds no records.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
