// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Region quadtree built by recursive top-down partitioning.
//!
//! The tree owns a flat array of leaf buckets; every node records the
//! contiguous span of that array its subtree covers (see
//! [`LeafRange`]), which falls out of appending leaves in recursion order.
//! Nodes carry hierarchical Z-order codes: each level contributes two bits
//! selecting the child quadrant.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;

use kurbo::{Point, Rect};

use crate::geom::{self, BOUNDS_NUDGE};
use crate::index::PointIndex;
use crate::queue::{NearestQueue, NodeQueue};
use crate::types::{Datum, Error, LeafRange, PointRecord};

/// Records a leaf bucket may hold before it is partitioned further.
pub const DEFAULT_LEAF_CAPACITY: usize = 16;

struct QNode {
    depth: usize,
    code: u64,
    bounds: Rect,
    center: Point,
    leaf_range: LeafRange,
    children: Option<Box<[QNode; 4]>>,
}

impl QNode {
    fn is_leaf(&self) -> bool {
        self.leaf_range.is_single()
    }
}

/// Region quadtree over a rectangular domain.
pub struct Quadtree<T> {
    bounds: Rect,
    leaf_capacity: usize,
    root: QNode,
    leaves: Vec<Vec<Datum<T>>>,
    count: usize,
}

impl<T> Quadtree<T> {
    /// Create an empty quadtree over the domain `[x0, x1] × [y0, y1]` with
    /// the default leaf capacity.
    ///
    /// The upper bounds are nudged outward by a tiny ε so records sitting
    /// exactly on the maximum edge stay inside the partition.
    pub fn new(x0: f64, x1: f64, y0: f64, y1: f64) -> Result<Self, Error> {
        Self::with_leaf_capacity(x0, x1, y0, y1, DEFAULT_LEAF_CAPACITY)
    }

    /// Like [`Quadtree::new`], with an explicit leaf capacity.
    pub fn with_leaf_capacity(
        x0: f64,
        x1: f64,
        y0: f64,
        y1: f64,
        leaf_capacity: usize,
    ) -> Result<Self, Error> {
        if x0 > x1 || y0 > y1 {
            return Err(Error::InvalidBounds { x0, x1, y0, y1 });
        }
        let bounds = Rect::new(x0, y0, x1 + BOUNDS_NUDGE, y1 + BOUNDS_NUDGE);
        let mut leaves = Vec::new();
        let root = Self::build_node(&mut leaves, 0, 0, bounds, Vec::new(), leaf_capacity);
        Ok(Self {
            bounds,
            leaf_capacity,
            root,
            leaves,
            count: 0,
        })
    }

    /// Ingest `records` and construct the partition.
    ///
    /// Every record must project inside the configured domain; the first one
    /// outside aborts the build with [`Error::OutOfDomain`]. Building twice
    /// replaces the previous contents.
    pub fn build<I>(&mut self, records: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = T>,
        T: PointRecord,
    {
        let mut data = Vec::new();
        for record in records {
            let datum = Datum::new(record);
            let p = datum.point();
            if !geom::contains(&self.bounds, p) {
                return Err(Error::OutOfDomain { x: p.x, y: p.y });
            }
            data.push(datum);
        }
        self.count = data.len();
        self.leaves.clear();
        self.root = Self::build_node(&mut self.leaves, 0, 0, self.bounds, data, self.leaf_capacity);
        Ok(())
    }

    /// Partition `data` under a node at `depth` with Z-order `code`.
    ///
    /// Buckets small enough become leaves appended to the tree's leaf array;
    /// anything larger is split across the four quadrants, recursing in
    /// child-index order so the array stays in Z-order.
    fn build_node(
        leaves: &mut Vec<Vec<Datum<T>>>,
        depth: usize,
        code: u64,
        bounds: Rect,
        data: Vec<Datum<T>>,
        leaf_capacity: usize,
    ) -> QNode {
        let mut node = QNode {
            depth,
            code,
            bounds,
            center: bounds.center(),
            leaf_range: LeafRange::single(leaves.len()),
            children: None,
        };
        if data.len() <= leaf_capacity {
            leaves.push(data);
            return node;
        }

        let mut parts = [Vec::new(), Vec::new(), Vec::new(), Vec::new()];
        for datum in data {
            parts[geom::quadrant(node.center, datum.point())].push(datum);
        }
        let quads = geom::child_bounds(&node.bounds, node.center);
        let [sw, se, nw, ne] = parts;
        let next = node.depth + 1;
        let children = Box::new([
            Self::build_node(leaves, next, node.code << 2, quads[0], sw, leaf_capacity),
            Self::build_node(leaves, next, (node.code << 2) | 1, quads[1], se, leaf_capacity),
            Self::build_node(leaves, next, (node.code << 2) | 2, quads[2], nw, leaf_capacity),
            Self::build_node(leaves, next, (node.code << 2) | 3, quads[3], ne, leaf_capacity),
        ]);
        node.leaf_range =
            LeafRange::span(children[0].leaf_range.start, children[3].leaf_range.end);
        node.children = Some(children);
        node
    }

    /// Number of leaf buckets (including empty ones).
    pub fn num_leaves(&self) -> usize {
        self.leaves.len()
    }

    /// The configured (nudged) domain.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// The depth shared by every leaf, if the tree is perfectly balanced.
    pub fn uniform_depth(&self) -> Option<usize> {
        Self::leaf_depth(&self.root)
    }

    fn leaf_depth(node: &QNode) -> Option<usize> {
        match &node.children {
            None => Some(node.depth),
            Some(children) => {
                let first = Self::leaf_depth(&children[0])?;
                for child in &children[1..] {
                    if Self::leaf_depth(child)? != first {
                        return None;
                    }
                }
                Some(first)
            }
        }
    }
}

impl<T: Clone> PointIndex<T> for Quadtree<T> {
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
                for datum in &self.leaves[node.leaf_range.start] {
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

impl<T> Debug for Quadtree<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Quadtree")
            .field("bounds", &self.bounds)
            .field("leaf_capacity", &self.leaf_capacity)
            .field("num_leaves", &self.leaves.len())
            .field("len", &self.count)
            .finish_non_exhaustive()
    }
}
