// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The two priority queues that drive distance browsing.
//!
//! [`NodeQueue`] is a min-heap of hierarchy elements (tree nodes or R-tree
//! entries) keyed by the distance from the query point to their bounding
//! rectangle. [`NearestQueue`] is a max-heap of candidate data, bounded to
//! the k best seen so far, so its top is always the candidate that would be
//! evicted next. Both carry the query origin and compute distances on push.
//!
//! Distances are compared with [`f64::total_cmp`], which gives the heaps a
//! total order even though the keys are floats.

use alloc::collections::BinaryHeap;
use alloc::vec::Vec;
use core::cmp::Ordering;

use kurbo::{Point, Rect};

use crate::geom;
use crate::types::Datum;

struct NodeSlot<E> {
    dist: f64,
    elem: E,
}

impl<E> PartialEq for NodeSlot<E> {
    fn eq(&self, other: &Self) -> bool {
        self.dist.total_cmp(&other.dist) == Ordering::Equal
    }
}

impl<E> Eq for NodeSlot<E> {}

impl<E> PartialOrd for NodeSlot<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for NodeSlot<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the closest element surfaces first.
        other.dist.total_cmp(&self.dist)
    }
}

/// Min-heap of hierarchy elements, keyed by distance to their bounds.
pub struct NodeQueue<E> {
    origin: Point,
    heap: BinaryHeap<NodeSlot<E>>,
}

impl<E> NodeQueue<E> {
    /// An empty queue for a query issued at `origin`.
    pub fn new(origin: Point) -> Self {
        Self {
            origin,
            heap: BinaryHeap::new(),
        }
    }

    /// Enqueue `elem`, keyed by the distance from the origin to `bounds`.
    pub fn push(&mut self, elem: E, bounds: &Rect) {
        let dist = geom::rect_distance(self.origin, bounds);
        self.heap.push(NodeSlot { dist, elem });
    }

    /// Dequeue the closest element together with its distance.
    pub fn pop(&mut self) -> Option<(E, f64)> {
        self.heap.pop().map(|slot| (slot.elem, slot.dist))
    }

    /// Distance of the closest queued element.
    pub fn peek_dist(&self) -> Option<f64> {
        self.heap.peek().map(|slot| slot.dist)
    }

    /// Number of queued elements.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

struct CandidateSlot<'a, T> {
    dist: f64,
    datum: &'a Datum<T>,
}

impl<T> PartialEq for CandidateSlot<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.dist.total_cmp(&other.dist) == Ordering::Equal
    }
}

impl<T> Eq for CandidateSlot<'_, T> {}

impl<T> PartialOrd for CandidateSlot<'_, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for CandidateSlot<'_, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Natural order: the farthest candidate surfaces first.
        self.dist.total_cmp(&other.dist)
    }
}

/// Max-heap of the k best candidates seen so far.
pub struct NearestQueue<'a, T> {
    origin: Point,
    cap: usize,
    heap: BinaryHeap<CandidateSlot<'a, T>>,
}

impl<'a, T> NearestQueue<'a, T> {
    /// An empty queue holding at most `cap` candidates for a query at
    /// `origin`.
    pub fn new(origin: Point, cap: usize) -> Self {
        Self {
            origin,
            cap,
            heap: BinaryHeap::with_capacity(cap + 1),
        }
    }

    /// Admit `datum` if the queue is below capacity, otherwise replace the
    /// current worst candidate when `datum` is closer.
    pub fn offer(&mut self, datum: &'a Datum<T>) {
        let dist = self.origin.distance(datum.point());
        if self.heap.len() < self.cap {
            self.heap.push(CandidateSlot { dist, datum });
        } else if self.worst_dist().is_some_and(|worst| worst > dist) {
            self.heap.pop();
            self.heap.push(CandidateSlot { dist, datum });
        }
    }

    /// Distance of the worst candidate currently held.
    pub fn worst_dist(&self) -> Option<f64> {
        self.heap.peek().map(|slot| slot.dist)
    }

    /// Number of candidates currently held.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether no candidate has been admitted yet.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drain into the result order: farthest candidate first.
    pub fn into_records(mut self) -> Vec<T>
    where
        T: Clone,
    {
        let mut out = Vec::with_capacity(self.heap.len());
        while let Some(slot) = self.heap.pop() {
            out.push(slot.datum.record().clone());
        }
        out
    }
}
