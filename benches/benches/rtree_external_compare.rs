// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use thicket_index::{PointIndex, Rtree};

use rstar::RTree;

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

const EXTENT: f64 = 500.0;

fn gen_uniform_points(count: usize) -> Vec<[f64; 2]> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|_| [rng.next_f64() * EXTENT, rng.next_f64() * EXTENT])
        .collect()
}

fn gen_queries(count: usize) -> Vec<[f64; 2]> {
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    (0..count)
        .map(|_| [rng.next_f64() * EXTENT, rng.next_f64() * EXTENT])
        .collect()
}

fn bench_rtree_external_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_external_compare");
    for &n in &[10_000usize, 100_000] {
        let points = gen_uniform_points(n);
        let queries = gen_queries(64);
        group.throughput(Throughput::Elements(n as u64));

        group.bench_function(format!("thicket_build_n{n}"), |b| {
            b.iter_batched(
                || points.clone(),
                |pts| {
                    let mut rt = Rtree::new(0.0, EXTENT, 0.0, EXTENT).unwrap();
                    rt.build(pts);
                    black_box(rt.get_load());
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("rstar_build_bulk_n{n}"), |b| {
            b.iter_batched(
                || points.clone(),
                |pts| {
                    let tree = RTree::bulk_load(pts);
                    black_box(tree.size());
                },
                BatchSize::SmallInput,
            )
        });

        let mut rt = Rtree::new(0.0, EXTENT, 0.0, EXTENT).unwrap();
        rt.build(points.clone());
        let rstar_tree = RTree::bulk_load(points);

        group.bench_function(format!("thicket_knn16_n{n}"), |b| {
            b.iter(|| {
                for q in &queries {
                    black_box(rt.query_knn(16, q[0], q[1]).unwrap());
                }
            })
        });

        group.bench_function(format!("rstar_knn16_n{n}"), |b| {
            b.iter(|| {
                for q in &queries {
                    let hits: Vec<&[f64; 2]> =
                        rstar_tree.nearest_neighbor_iter(q).take(16).collect();
                    black_box(hits);
                }
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rtree_external_compare);
criterion_main!(benches);
