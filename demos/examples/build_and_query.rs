// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Build and query basics.
//!
//! Build all three indexes over the same generated point set, run the same
//! query against each, and show that they agree.
//!
//! Run:
//! - `cargo run -p thicket_demos --example build_and_query`

use thicket_index::{PointIndex, Quadtree, Rtree, Zgrid};

/// A small deterministic point set: a jittered grid over [0, 64)².
fn generate_points() -> Vec<[f64; 2]> {
    let mut out = Vec::with_capacity(64 * 64);
    let mut state = 0x2545_F491_4F6C_DD1Du64;
    let mut jitter = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        (state >> 11) as f64 / (1u64 << 53) as f64
    };
    for cx in 0..64 {
        for cy in 0..64 {
            out.push([f64::from(cx) + jitter(), f64::from(cy) + jitter()]);
        }
    }
    out
}

fn main() {
    let points = generate_points();
    println!("indexing {} points", points.len());

    let mut quadtree = Quadtree::new(0.0, 64.0, 0.0, 64.0).expect("valid bounds");
    quadtree.build(points.clone()).expect("points are in-domain");
    println!("quadtree: {} leaves", quadtree.num_leaves());

    let mut zgrid = Zgrid::new(0.0, 64.0, 0.0, 64.0).expect("valid bounds");
    zgrid.build(points.clone(), 5).expect("build");
    println!("zgrid: {} cells at resolution {}", zgrid.size(), zgrid.resolution());

    let mut rtree = Rtree::new(0.0, 64.0, 0.0, 64.0).expect("valid bounds");
    rtree.build(points);
    println!("rtree: load {}", rtree.get_load());

    // The same query against all three; results come back farthest first.
    let (k, x, y) = (8, 31.5, 31.5);
    let from_quadtree = quadtree.query_knn(k, x, y).expect("k >= 1");
    let from_zgrid = zgrid.query_knn(k, x, y).expect("k >= 1");
    let from_rtree = rtree.query_knn(k, x, y).expect("k >= 1");

    println!("nearest {k} to ({x}, {y}):");
    for record in from_quadtree.iter().rev() {
        println!("  [{:.3}, {:.3}]", record[0], record[1]);
    }

    assert_eq!(from_quadtree, from_zgrid, "zgrid must agree with quadtree");
    assert_eq!(from_quadtree, from_rtree, "rtree must agree with quadtree");
    println!("all three indexes agree");
}
