// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Thicket Index: build a quadtree and run a k-NN query.

use thicket_index::{PointIndex, Quadtree};

fn main() {
    let records = vec![
        [0.5, 0.5, 10.0],
        [1.5, 2.5, 11.0],
        [3.0, 1.0, 12.0],
        [2.0, 3.5, 13.0],
        [3.5, 3.5, 14.0],
    ];

    let mut qt: Quadtree<[f64; 3]> = Quadtree::new(0.0, 4.0, 0.0, 4.0).expect("valid bounds");
    qt.build(records).expect("records are in-domain");

    // Results come back farthest first; the nearest neighbour is last.
    let hits = qt.query_knn(3, 0.0, 0.0).expect("k >= 1");
    println!("nearest 3 to the origin, closest last:");
    for record in &hits {
        println!("  x={} y={} z={}", record[0], record[1], record[2]);
    }
}
