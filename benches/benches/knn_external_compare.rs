// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_quadtree::{Aabb, Point, QuadTree};

use rstar::{AABB, Envelope, RTree};

const WORLD: Aabb = Aabb::from_center_half(1000.0, 1000.0, 1000.0, 1000.0);

fn gen_grid_points(n: usize, cell: f64) -> Vec<[f64; 2]> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            out.push([x as f64 * cell + 0.5 * cell, y as f64 * cell + 0.5 * cell]);
        }
    }
    out
}

fn build_quadtree(points: &[[f64; 2]]) -> QuadTree<u32> {
    let mut tree = QuadTree::new(WORLD);
    for (i, &[x, y]) in points.iter().enumerate() {
        let _ = tree.insert(Point::new(x, y, i as u32));
    }
    tree
}

fn bench_external_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("knn_external_compare");
    let query = Aabb::from_center_half(700.0, 700.0, 300.0, 300.0);
    let envelope = AABB::from_corners(
        [query.min().x, query.min().y],
        [query.max().x, query.max().y],
    );
    for &n in &[64usize, 128] {
        let points = gen_grid_points(n, 2000.0 / n as f64);
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_function(format!("understory_build_search_n{}", n), |b| {
            b.iter(|| {
                let tree = build_quadtree(&points);
                black_box(tree.search(&query).len());
            });
        });

        group.bench_function(format!("rstar_build_search_n{}", n), |b| {
            b.iter_batched(
                || points.clone(),
                |pts| {
                    let tree = RTree::bulk_load(pts);
                    black_box(tree.locate_in_envelope(&envelope).count());
                },
                BatchSize::SmallInput,
            )
        });

        let quadtree = build_quadtree(&points);
        let rtree = RTree::bulk_load(points.clone());
        group.bench_function(format!("understory_k_nearest16_n{}", n), |b| {
            b.iter(|| black_box(quadtree.k_nearest(&query, 16).len()));
        });
        group.bench_function(format!("rstar_nearest16_n{}", n), |b| {
            let center = [query.center.x, query.center.y];
            b.iter(|| {
                let hits = rtree
                    .nearest_neighbor_iter(&center)
                    .filter(|p| envelope.contains_point(p))
                    .take(16)
                    .count();
                black_box(hits);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_external_compare);
criterion_main!(benches);
