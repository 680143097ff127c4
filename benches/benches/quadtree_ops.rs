// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_quadtree::{Aabb, Config, Point, PointId, QuadTree};

const WORLD: Aabb = Aabb::from_center_half(1000.0, 1000.0, 1000.0, 1000.0);

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

fn gen_grid_points(n: usize, cell: f64) -> Vec<(f64, f64)> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            out.push((x as f64 * cell + 0.5 * cell, y as f64 * cell + 0.5 * cell));
        }
    }
    out
}

fn gen_random_points(count: usize) -> Vec<(f64, f64)> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|_| (rng.next_f64() * 2000.0, rng.next_f64() * 2000.0))
        .collect()
}

fn gen_clustered_points(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<(f64, f64)> {
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut centers = Vec::with_capacity(n_clusters);
    for _ in 0..n_clusters {
        centers.push((
            200.0 + rng.next_f64() * 1600.0,
            200.0 + rng.next_f64() * 1600.0,
        ));
    }
    for (cx, cy) in centers {
        for _ in 0..per_cluster {
            let dx = (rng.next_f64() - 0.5) * spread;
            let dy = (rng.next_f64() - 0.5) * spread;
            out.push((cx + dx, cy + dy));
        }
    }
    out
}

fn build(points: &[(f64, f64)], config: Config) -> (QuadTree<u32>, Vec<PointId>) {
    let mut tree = QuadTree::with_config(WORLD, config);
    let ids = points
        .iter()
        .enumerate()
        .filter_map(|(i, &(x, y))| tree.insert(Point::new(x, y, i as u32)))
        .collect();
    (tree, ids)
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for &n in &[32usize, 64, 128] {
        let points = gen_grid_points(n, 2000.0 / n as f64);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("grid_n{}", n), |b| {
            b.iter_batched(
                || QuadTree::<u32>::new(WORLD),
                |mut tree| {
                    for (i, &(x, y)) in points.iter().enumerate() {
                        let _ = tree.insert(Point::new(x, y, i as u32));
                    }
                    black_box(tree.node_count());
                },
                BatchSize::SmallInput,
            )
        });
    }
    let points = gen_clustered_points(16, 256, 40.0);
    for &capacity in &[4usize, 8, 32] {
        let config = Config::default().with_capacity(capacity);
        group.bench_function(format!("clustered_cap{}", capacity), |b| {
            b.iter_batched(
                || QuadTree::<u32>::with_config(WORLD, config),
                |mut tree| {
                    for (i, &(x, y)) in points.iter().enumerate() {
                        let _ = tree.insert(Point::new(x, y, i as u32));
                    }
                    black_box(tree.len());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    let (tree, _) = build(&gen_random_points(16_384), Config::default());
    group.bench_function("random_many_small_boxes", |b| {
        b.iter(|| {
            let mut total = 0usize;
            for q in 0..256 {
                let x = (q % 16) as f64 * 125.0 + 60.0;
                let y = (q / 16) as f64 * 125.0 + 60.0;
                total += tree.search(&Aabb::from_center_half(x, y, 40.0, 40.0)).len();
            }
            black_box(total);
        });
    });
    group.bench_function("random_quarter_box", |b| {
        b.iter(|| {
            let hits = tree.search(&Aabb::from_center_half(800.0, 800.0, 500.0, 500.0));
            black_box(hits.len());
        });
    });
    group.finish();
}

fn bench_k_nearest(c: &mut Criterion) {
    let mut group = c.benchmark_group("k_nearest");
    let (tree, _) = build(&gen_random_points(16_384), Config::default());
    for &k in &[1usize, 8, 32] {
        group.bench_function(format!("random_k{}", k), |b| {
            b.iter(|| {
                let mut total = 0usize;
                for q in 0..64 {
                    let x = (q % 8) as f64 * 250.0 + 125.0;
                    let y = (q / 8) as f64 * 250.0 + 125.0;
                    let query = Aabb::from_center_half(x, y, 60.0, 60.0);
                    total += tree.k_nearest(&query, k).len();
                }
                black_box(total);
            });
        });
    }
    group.bench_function("random_k8_filtered_even", |b| {
        let query = Aabb::from_center_half(1000.0, 1000.0, 80.0, 80.0);
        b.iter(|| {
            let hits = tree.k_nearest_filtered(&query, 8, |p| p.payload() % 2 == 0);
            black_box(hits.len());
        });
    });
    group.finish();
}

fn bench_update_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_churn");
    let points = gen_random_points(4096);
    group.throughput(Throughput::Elements(points.len() as u64));
    group.bench_function("small_moves", |b| {
        b.iter_batched(
            || build(&points, Config::default()),
            |(mut tree, ids)| {
                for (j, id) in ids.into_iter().enumerate() {
                    let (x, y) = points[j];
                    let dx = (j % 5) as f64 - 2.0;
                    let dy = ((j * 7) % 5) as f64 - 2.0;
                    black_box(tree.update(id, x + dx, y + dy));
                }
            },
            BatchSize::SmallInput,
        )
    });
    group.bench_function("cross_domain_moves", |b| {
        b.iter_batched(
            || build(&points, Config::default()),
            |(mut tree, ids)| {
                for (j, id) in ids.into_iter().enumerate() {
                    let (x, y) = points[points.len() - 1 - j];
                    black_box(tree.update(id, x, y));
                }
            },
            BatchSize::SmallInput,
        )
    });
    group.bench_function("remove_all", |b| {
        b.iter_batched(
            || build(&points, Config::default()),
            |(mut tree, ids)| {
                for id in ids {
                    black_box(tree.remove(id));
                }
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_insert,
    bench_search,
    bench_k_nearest,
    bench_update_churn
);
criterion_main!(benches);
