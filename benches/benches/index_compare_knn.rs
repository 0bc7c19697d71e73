// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use thicket_index::{PointIndex, Quadtree, Rtree, Zgrid};

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

fn gen_clustered_points(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<[f64; 2]> {
    let mut rng = Rng::new(0xBADC_F00D_1234_5678);
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    for _ in 0..n_clusters {
        let cx = rng.next_f64() * EXTENT;
        let cy = rng.next_f64() * EXTENT;
        for _ in 0..per_cluster {
            out.push([
                (cx + (rng.next_f64() - 0.5) * spread).clamp(0.0, EXTENT),
                (cy + (rng.next_f64() - 0.5) * spread).clamp(0.0, EXTENT),
            ]);
        }
    }
    out
}

fn gen_queries(count: usize) -> Vec<(f64, f64)> {
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    (0..count)
        .map(|_| (rng.next_f64() * EXTENT, rng.next_f64() * EXTENT))
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for &n in &[10_000usize, 100_000] {
        let points = gen_uniform_points(n);
        group.throughput(Throughput::Elements(n as u64));

        group.bench_function(format!("quadtree_n{n}"), |b| {
            b.iter_batched(
                || points.clone(),
                |pts| {
                    let mut qt = Quadtree::new(0.0, EXTENT, 0.0, EXTENT).unwrap();
                    qt.build(pts).unwrap();
                    black_box(qt.num_leaves());
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("zgrid_n{n}"), |b| {
            b.iter_batched(
                || points.clone(),
                |pts| {
                    let mut zg = Zgrid::new(0.0, EXTENT, 0.0, EXTENT).unwrap();
                    zg.build(pts, 6).unwrap();
                    black_box(zg.size());
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("rtree_n{n}"), |b| {
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
    }
    group.finish();
}

fn bench_query_knn(c: &mut Criterion) {
    let n = 100_000;
    let points = gen_uniform_points(n);
    let queries = gen_queries(64);

    let mut qt = Quadtree::new(0.0, EXTENT, 0.0, EXTENT).unwrap();
    qt.build(points.clone()).unwrap();
    let mut zg = Zgrid::new(0.0, EXTENT, 0.0, EXTENT).unwrap();
    zg.build(points.clone(), 6).unwrap();
    let mut rt = Rtree::new(0.0, EXTENT, 0.0, EXTENT).unwrap();
    rt.build(points);

    let mut group = c.benchmark_group("query_knn_uniform_100k");
    group.throughput(Throughput::Elements(queries.len() as u64));
    for &k in &[1usize, 16, 64] {
        group.bench_function(format!("quadtree_k{k}"), |b| {
            b.iter(|| {
                for &(x, y) in &queries {
                    black_box(qt.query_knn(k, x, y).unwrap());
                }
            })
        });
        group.bench_function(format!("zgrid_k{k}"), |b| {
            b.iter(|| {
                for &(x, y) in &queries {
                    black_box(zg.query_knn(k, x, y).unwrap());
                }
            })
        });
        group.bench_function(format!("rtree_k{k}"), |b| {
            b.iter(|| {
                for &(x, y) in &queries {
                    black_box(rt.query_knn(k, x, y).unwrap());
                }
            })
        });
    }
    group.finish();
}

fn bench_query_knn_clustered(c: &mut Criterion) {
    let points = gen_clustered_points(200, 500, 12.0);
    let queries = gen_queries(64);

    let mut qt = Quadtree::new(0.0, EXTENT, 0.0, EXTENT).unwrap();
    qt.build(points.clone()).unwrap();
    let mut rt = Rtree::new(0.0, EXTENT, 0.0, EXTENT).unwrap();
    rt.build(points);

    let mut group = c.benchmark_group("query_knn_clustered_100k");
    group.throughput(Throughput::Elements(queries.len() as u64));
    group.bench_function("quadtree_k16", |b| {
        b.iter(|| {
            for &(x, y) in &queries {
                black_box(qt.query_knn(16, x, y).unwrap());
            }
        })
    });
    group.bench_function("rtree_k16", |b| {
        b.iter(|| {
            for &(x, y) in &queries {
                black_box(rt.query_knn(16, x, y).unwrap());
            }
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_build,
    bench_query_knn,
    bench_query_knn_clustered
);
criterion_main!(benches);
