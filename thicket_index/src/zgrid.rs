// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Z-order grid: a uniform `2^r × 2^r` bucket grid addressed by
//! interleaved-bit codes, with a full implicit quadtree of depth `r` on top
//! for distance browsing.
//!
//! Binning is a single hashing pass, so construction cost is linear in the
//! input. The implicit tree stores no data; leaves are looked up by code in
//! the grid. Unlike the quadtree, leafness here is the absence of children —
//! every internal node of a full tree spans a multi-cell range, but a
//! degenerate range check would misfire at depth `r`.

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;

use kurbo::{Point, Rect};

use crate::geom::{self, BOUNDS_NUDGE, MAX_RESOLUTION};
use crate::index::PointIndex;
use crate::queue::{NearestQueue, NodeQueue};
use crate::types::{Datum, Error, LeafRange, PointRecord};

struct ZNode {
    depth: usize,
    code: usize,
    bounds: Rect,
    center: Point,
    leaf_range: LeafRange,
    children: Option<Box<[ZNode; 4]>>,
}

impl ZNode {
    fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

/// Uniform Z-order grid with an implicit quadtree for k-NN queries.
pub struct Zgrid<T> {
    bounds: Rect,
    resolution: u32,
    root: ZNode,
    cells: Vec<Vec<Datum<T>>>,
    count: usize,
}

impl<T> Zgrid<T> {
    /// Create an empty grid over the domain `[x0, x1] × [y0, y1]`.
    ///
    /// The upper bounds are nudged outward by a tiny ε so records sitting
    /// exactly on the maximum edge hash into the last cell row/column rather
    /// than one past it. The resolution is chosen at [`build`](Self::build)
    /// time.
    pub fn new(x0: f64, x1: f64, y0: f64, y1: f64) -> Result<Self, Error> {
        if x0 > x1 || y0 > y1 {
            return Err(Error::InvalidBounds { x0, x1, y0, y1 });
        }
        let bounds = Rect::new(x0, y0, x1 + BOUNDS_NUDGE, y1 + BOUNDS_NUDGE);
        Ok(Self {
            bounds,
            resolution: 0,
            root: Self::build_implicit(0, 0, bounds, 0),
            cells: vec![Vec::new()],
            count: 0,
        })
    }

    /// Ingest `records` into a `2^resolution × 2^resolution` grid.
    ///
    /// Every datum lands in the bucket addressed by its Z-order hash;
    /// records outside the domain clamp into the nearest edge cell. Building
    /// twice replaces the previous contents.
    ///
    /// # Panics
    ///
    /// Panics when `resolution` exceeds [`MAX_RESOLUTION`].
    pub fn build<I>(&mut self, records: I, resolution: u32) -> Result<(), Error>
    where
        I: IntoIterator<Item = T>,
        T: PointRecord,
    {
        assert!(
            resolution <= MAX_RESOLUTION,
            "resolution {resolution} exceeds the supported maximum {MAX_RESOLUTION}"
        );
        self.resolution = resolution;
        self.count = 0;
        self.cells.clear();
        self.cells.resize_with(1 << (2 * resolution), Vec::new);
        for record in records {
            let datum = Datum::new(record);
            let code = geom::zorder_hash(datum.point(), &self.bounds, resolution);
            self.cells[code].push(datum);
            self.count += 1;
        }
        self.root = Self::build_implicit(0, 0, self.bounds, resolution);
        Ok(())
    }

    /// Build the full implicit tree: every node down to depth `resolution`
    /// owns four children; the leaf layer is addressed by cell code.
    fn build_implicit(depth: usize, code: usize, bounds: Rect, resolution: u32) -> ZNode {
        let height = resolution as usize - depth;
        let mut node = ZNode {
            depth,
            code,
            bounds,
            center: bounds.center(),
            leaf_range: LeafRange::span(code << (2 * height), ((code + 1) << (2 * height)) - 1),
            children: None,
        };
        if height > 0 {
            let quads = geom::child_bounds(&node.bounds, node.center);
            let next = node.depth + 1;
            let children = Box::new([
                Self::build_implicit(next, node.code << 2, quads[0], resolution),
                Self::build_implicit(next, (node.code << 2) | 1, quads[1], resolution),
                Self::build_implicit(next, (node.code << 2) | 2, quads[2], resolution),
                Self::build_implicit(next, (node.code << 2) | 3, quads[3], resolution),
            ]);
            debug_assert!(
                node.leaf_range.start == children[0].leaf_range.start
                    && node.leaf_range.end == children[3].leaf_range.end
            );
            node.children = Some(children);
        }
        node
    }

    /// Number of grid cells (`4^resolution`).
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// The resolution the grid was last built with.
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// The configured (nudged) domain.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl<T: Clone> PointIndex<T> for Zgrid<T> {
    fn query_knn(&self, k: usize, x: f64, y: f64) -> Result<Vec<T>, Error> {
        if k == 0 {
            return Err(Error::InvalidK);
        }
        let origin = Point::new(x, y);
        let mut nodes = NodeQueue::new(origin);
        nodes.push(&self.root, &self.root.bounds);
        let mut nearest = NearestQueue::new(origin, k);

        while let Some((node, dist)) = nodes.pop() {
            if nearest.len() == k && nearest.worst_dist().is_some_and(|worst| worst <= dist) {
                break;
            }
            if node.is_leaf() {
                for datum in &self.cells[node.code] {
                    nearest.offer(datum);
                }
            } else if let Some(children) = &node.children {
                for child in children.iter() {
                    nodes.push(child, &child.bounds);
                }
            }
        }
        Ok(nearest.into_records())
    }

    fn len(&self) -> usize {
        self.count
    }
}

impl<T> Debug for Zgrid<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Zgrid")
            .field("bounds", &self.bounds)
            .field("resolution", &self.resolution)
            .field("cells", &self.cells.len())
            .field("len", &self.count)
            .finish_non_exhaustive()
    }
}
