// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! R-tree with Guttman-style quadratic splits, built by point-by-point
//! insertion.
//!
//! Entries form a tagged union: a leaf entry carries an index into the
//! tree's datum store under a degenerate point rectangle, an internal entry
//! owns a child node under the minimum bounding rectangle of that node's
//! entries. Overflow is detected by the node itself but resolved one level
//! up, where the overflowing entry can be replaced by the two split groups;
//! the root gets an extra level first ([`split_root`](Rtree::split_root)
//! has no parent to lean on).

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;

use kurbo::{Point, Rect};

use crate::geom;
use crate::index::PointIndex;
use crate::queue::{NearestQueue, NodeQueue};
use crate::types::{Datum, Error, PointRecord};

/// Fan-out bound: a node holding more than this many entries is split.
pub const MAX_ENTRIES: usize = 8;

enum EntryKind {
    /// Index of the datum in the tree's store.
    Leaf(usize),
    Node(Box<RNode>),
}

struct REntry {
    mbr: Rect,
    kind: EntryKind,
}

impl REntry {
    /// Number of data points reachable through this entry.
    fn load(&self) -> usize {
        match &self.kind {
            EntryKind::Leaf(_) => 1,
            EntryKind::Node(node) => node.load,
        }
    }
}

#[derive(Default)]
struct RNode {
    load: usize,
    entries: Vec<REntry>,
}

impl RNode {
    /// A node is a leaf when every entry is a datum (an empty node counts).
    fn is_leaf(&self) -> bool {
        self.entries
            .iter()
            .all(|e| matches!(e.kind, EntryKind::Leaf(_)))
    }

    /// Insert a datum, returning whether this node now overflows.
    fn insert(&mut self, idx: usize, p: Point) -> bool {
        if self.is_leaf() {
            self.entries.push(REntry {
                mbr: geom::point_rect(p),
                kind: EntryKind::Leaf(idx),
            });
        } else {
            let branch = self.choose_branch(p);
            let entry = &mut self.entries[branch];
            entry.mbr = entry.mbr.union_pt(p);
            let overflow = match &mut entry.kind {
                EntryKind::Node(child) => child.insert(idx, p),
                EntryKind::Leaf(_) => unreachable!("choose_branch on a leaf node"),
            };
            if overflow {
                self.split(branch);
            }
        }
        self.load += 1;
        self.entries.len() > MAX_ENTRIES
    }

    /// The entry whose MBR needs the least area expansion to admit `p`;
    /// ties go to the smaller rectangle.
    fn choose_branch(&self, p: Point) -> usize {
        let mut best = 0;
        let mut best_expansion = f64::INFINITY;
        let mut best_area = f64::INFINITY;
        for (i, entry) in self.entries.iter().enumerate() {
            let area = entry.mbr.area();
            let expansion = entry.mbr.union_pt(p).area() - area;
            if expansion < best_expansion || (expansion == best_expansion && area < best_area) {
                best = i;
                best_expansion = expansion;
                best_area = area;
            }
        }
        best
    }

    /// Split the overflowing child at `branch` into two fresh groups.
    ///
    /// Runs at the parent of the overflowing node: the old entry is removed
    /// and the whole pool of its child entries is redistributed into two new
    /// entries appended here, so the caller must still check this node for
    /// overflow afterwards.
    fn split(&mut self, branch: usize) {
        let pool = match self.entries.remove(branch).kind {
            EntryKind::Node(node) => node.entries,
            EntryKind::Leaf(_) => unreachable!("split of a datum entry"),
        };
        let (s1, s2) = Self::pick_seeds(&pool);
        let mut g1 = REntry {
            mbr: pool[s1].mbr,
            kind: EntryKind::Node(Box::default()),
        };
        let mut g2 = REntry {
            mbr: pool[s2].mbr,
            kind: EntryKind::Node(Box::default()),
        };
        Self::distribute(&mut g1, &mut g2, pool);
        self.entries.push(g1);
        self.entries.push(g2);
    }

    /// Quadratic seed pick: the pair of entries whose combined bounding box
    /// wastes the most area.
    fn pick_seeds(pool: &[REntry]) -> (usize, usize) {
        let mut best = (0, 1);
        let mut max_waste = f64::NEG_INFINITY;
        for i in 0..pool.len() {
            for j in (i + 1)..pool.len() {
                let waste =
                    pool[i].mbr.union(pool[j].mbr).area() - pool[i].mbr.area() - pool[j].mbr.area();
                if waste > max_waste {
                    max_waste = waste;
                    best = (i, j);
                }
            }
        }
        best
    }

    /// Hand the pool out one entry at a time, most-decided first, each into
    /// the group needing less expansion (ties to the smaller group MBR).
    fn distribute(g1: &mut REntry, g2: &mut REntry, mut pool: Vec<REntry>) {
        while !pool.is_empty() {
            let next = pool.remove(Self::pick_next(g1, g2, &pool));

            let e1 = g1.mbr.union(next.mbr);
            let e2 = g2.mbr.union(next.mbr);
            let d1 = e1.area() - g1.mbr.area();
            let d2 = e2.area() - g2.mbr.area();

            let into_first = d1 < d2 || (d1 == d2 && g1.mbr.area() < g2.mbr.area());
            let (group, expanded) = if into_first { (&mut *g1, e1) } else { (&mut *g2, e2) };
            group.mbr = expanded;
            match &mut group.kind {
                EntryKind::Node(node) => {
                    node.load += next.load();
                    node.entries.push(next);
                }
                EntryKind::Leaf(_) => unreachable!("distribute into a datum entry"),
            }
        }
    }

    /// The pool entry with the greatest expansion preference between the two
    /// groups.
    fn pick_next(g1: &REntry, g2: &REntry, pool: &[REntry]) -> usize {
        let mut best = 0;
        let mut max_diff = 0.0;
        for (i, entry) in pool.iter().enumerate() {
            let d1 = g1.mbr.union(entry.mbr).area() - g1.mbr.area();
            let d2 = g2.mbr.union(entry.mbr).area() - g2.mbr.area();
            let diff = (d1 - d2).abs();
            if diff > max_diff {
                max_diff = diff;
                best = i;
            }
        }
        best
    }
}

/// R-tree over 2D points with quadratic-split insertion.
pub struct Rtree<T> {
    root: REntry,
    data: Vec<Datum<T>>,
}

impl<T> Rtree<T> {
    /// Create an empty tree for the domain `[x0, x1] × [y0, y1]`.
    ///
    /// The domain only validates the caller's configuration; the root MBR is
    /// seeded from the first inserted point and records outside the domain
    /// are accepted by growing it.
    pub fn new(x0: f64, x1: f64, y0: f64, y1: f64) -> Result<Self, Error> {
        if x0 > x1 || y0 > y1 {
            return Err(Error::InvalidBounds { x0, x1, y0, y1 });
        }
        Ok(Self {
            root: REntry {
                mbr: geom::point_rect(Point::new(x0, y0)),
                kind: EntryKind::Node(Box::default()),
            },
            data: Vec::new(),
        })
    }

    /// Insert one record.
    pub fn insert(&mut self, record: T)
    where
        T: PointRecord,
    {
        let datum = Datum::new(record);
        let p = datum.point();
        self.data.push(datum);
        let idx = self.data.len() - 1;

        // First point re-seeds the placeholder MBR so no artificial
        // rectangle ever enters a distance computation.
        self.root.mbr = if idx == 0 {
            geom::point_rect(p)
        } else {
            self.root.mbr.union_pt(p)
        };

        if self.root_node_mut().insert(idx, p) {
            self.split_root();
        }
    }

    /// Insert every record of `records` in sequence.
    pub fn build<I>(&mut self, records: I)
    where
        I: IntoIterator<Item = T>,
        T: PointRecord,
    {
        for record in records {
            self.insert(record);
        }
    }

    /// Grow the tree by a level: a fresh root adopts the old root as its
    /// only entry and immediately splits it.
    fn split_root(&mut self) {
        let mbr = self.root.mbr;
        let old_root = core::mem::replace(
            &mut self.root,
            REntry {
                mbr,
                kind: EntryKind::Node(Box::default()),
            },
        );
        let node = self.root_node_mut();
        node.load = old_root.load();
        node.entries.push(old_root);
        node.split(0);
    }

    fn root_node(&self) -> &RNode {
        match &self.root.kind {
            EntryKind::Node(node) => node,
            EntryKind::Leaf(_) => unreachable!("root entry is always internal"),
        }
    }

    fn root_node_mut(&mut self) -> &mut RNode {
        match &mut self.root.kind {
            EntryKind::Node(node) => node,
            EntryKind::Leaf(_) => unreachable!("root entry is always internal"),
        }
    }

    /// Number of data points reachable from the root.
    pub fn get_load(&self) -> usize {
        self.root_node().load
    }

    /// The current root MBR (degenerate until the first insert).
    pub fn mbr(&self) -> Rect {
        self.root.mbr
    }
}

impl<T: Clone> PointIndex<T> for Rtree<T> {
    fn query_knn(&self, k: usize, x: f64, y: f64) -> Result<Vec<T>, Error> {
        if k == 0 {
            return Err(Error::InvalidK);
        }
        let origin = Point::new(x, y);
        let mut nodes = NodeQueue::new(origin);
        nodes.push(&self.root, &self.root.mbr);
        let mut nearest = NearestQueue::new(origin, k);

        while let Some((entry, dist)) = nodes.pop() {
            if nearest.len() == k && nearest.worst_dist().is_some_and(|worst| worst <= dist) {
                break;
            }
            match &entry.kind {
                EntryKind::Leaf(idx) => nearest.offer(&self.data[*idx]),
                EntryKind::Node(node) => {
                    for child in &node.entries {
                        nodes.push(child, &child.mbr);
                    }
                }
            }
        }
        Ok(nearest.into_records())
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}

impl<T> Debug for Rtree<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Rtree")
            .field("mbr", &self.root.mbr)
            .field("root_entries", &self.root_node().entries.len())
            .field("load", &self.root_node().load)
            .field("len", &self.data.len())
            .finish_non_exhaustive()
    }
}
