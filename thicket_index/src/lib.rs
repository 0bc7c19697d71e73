// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thicket Index: point indexes for 2D data.
//!
//! Thicket Index is a reusable building block for nearest-neighbour queries
//! over in-memory point sets (point clouds, samples, markers).
//!
//! - Build a [`Quadtree`], [`Zgrid`], or [`Rtree`] over any record type that
//!   can report an `(x, y)` position (see [`PointRecord`]).
//! - Ask each of them the same question through [`PointIndex::query_knn`]:
//!   the k stored records nearest to a query point, ordered farthest first.
//! - Records are opaque to the index; extra payload (a z coordinate, an id,
//!   an intensity) rides along and comes back out of queries untouched.
//!
//! The three structures share one geometric substrate and one best-first
//! "distance browsing" query loop: a min-heap of subtree bounds ordered by
//! distance to the query point, paired with a bounded max-heap of candidate
//! records. The loop stops as soon as no unexplored subtree can beat the
//! worst candidate in hand, so query cost scales with the neighbourhood, not
//! the point set.
//!
//! # Example
//!
//! ```rust
//! use thicket_index::{PointIndex, Quadtree};
//!
//! let mut qt: Quadtree<[f64; 2]> = Quadtree::new(0.0, 4.0, 0.0, 4.0)?;
//! qt.build(vec![[0.5, 0.5], [1.5, 2.5], [3.0, 1.0], [2.0, 3.5]])?;
//!
//! // Farthest-first order: the nearest neighbour comes out last.
//! let hits = qt.query_knn(2, 0.0, 0.0)?;
//! assert_eq!(hits.last(), Some(&[0.5, 0.5]));
//! # Ok::<(), thicket_index::Error>(())
//! ```
//!
//! Code that only queries can stay generic over the index:
//!
//! ```rust
//! use thicket_index::{PointIndex, Rtree, Zgrid};
//!
//! fn nearest<I: PointIndex<[f64; 2]>>(index: &I, x: f64, y: f64) -> Option<[f64; 2]> {
//!     index.query_knn(1, x, y).ok()?.pop()
//! }
//!
//! let records = vec![[1.0, 1.0], [6.0, 2.0], [3.0, 7.0]];
//!
//! let mut zg: Zgrid<[f64; 2]> = Zgrid::new(0.0, 8.0, 0.0, 8.0)?;
//! zg.build(records.clone(), 2)?;
//!
//! let mut rt: Rtree<[f64; 2]> = Rtree::new(0.0, 8.0, 0.0, 8.0)?;
//! rt.build(records);
//!
//! assert_eq!(nearest(&zg, 0.0, 0.0), Some([1.0, 1.0]));
//! assert_eq!(nearest(&rt, 0.0, 0.0), Some([1.0, 1.0]));
//! # Ok::<(), thicket_index::Error>(())
//! ```
//!
//! # Choosing an index
//!
//! - [`Quadtree`]: adaptive recursive partition; balanced trees on roughly
//!   uniform data, graceful degradation on clustered data. Rejects records
//!   outside its domain.
//! - [`Zgrid`]: a flat `2^r × 2^r` bucket grid under an implicit tree;
//!   cheapest to build, best when the data spread is known up front. Records
//!   outside the domain clamp into the nearest edge cell.
//! - [`Rtree`]: point-by-point insertion with Guttman quadratic splits; no
//!   domain assumptions (the root rectangle grows to cover whatever is
//!   inserted) at the cost of a heavier build.
//!
//! # Float semantics
//!
//! Coordinates are `f64` and assumed finite; debug builds assert. Distances
//! are compared with a total order, so queries are deterministic for any
//! input that obeys that assumption.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod geom;
pub mod index;
pub mod quadtree;
pub mod queue;
pub mod rtree;
pub mod types;
pub mod zgrid;

pub use index::PointIndex;
pub use quadtree::{DEFAULT_LEAF_CAPACITY, Quadtree};
pub use rtree::{MAX_ENTRIES, Rtree};
pub use types::{Datum, Error, LeafRange, PointRecord};
pub use zgrid::Zgrid;
