// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage: insert, search, k-nearest, update, and remove.

use tracing::info;
use understory_quadtree::{Aabb, Config, Point, QuadTree};

fn main() -> anyhow::Result<()> {
    understory_quadtree_demos::init_logging();

    let boundary = Aabb::from_center_half(0.0, 0.0, 10.0, 10.0);
    let mut tree = QuadTree::try_new(boundary, Config::default().with_capacity(2))?;

    let mut ids = Vec::new();
    for (x, y, label) in [
        (1.0, 1.0, "a"),
        (2.0, 2.0, "b"),
        (3.0, 3.0, "c"),
        (-1.0, -1.0, "d"),
        (0.0, 5.0, "e"),
        (5.0, 0.0, "f"),
    ] {
        let id = tree
            .insert(Point::new(x, y, label))
            .ok_or_else(|| anyhow::anyhow!("{label} is outside the tree"))?;
        ids.push(id);
    }
    info!(?tree, "built");

    let query = Aabb::from_center_half(0.0, 0.0, 10.0, 10.0);
    let nearest: Vec<_> = tree
        .k_nearest(&query, 4)
        .into_iter()
        .map(|(_, p)| *p.payload())
        .collect();
    println!("4 nearest to origin: {:?}", nearest);

    let vowels: Vec<_> = tree
        .k_nearest_filtered(&query, 2, |p| matches!(*p.payload(), "a" | "e"))
        .into_iter()
        .map(|(_, p)| *p.payload())
        .collect();
    println!("nearest vowels: {:?}", vowels);

    // Move `a` across the domain, then drop `b`.
    tree.update(ids[0], -8.0, 8.0);
    tree.remove(ids[1]);

    let corner = Aabb::from_center_half(-8.0, 8.0, 1.0, 1.0);
    for (id, p) in tree.search(&corner) {
        println!("{:?} at {:?}: {}", id, p.coordinates(), p.payload());
    }
    println!(
        "{} points in {} nodes ({} leaves)",
        tree.len(),
        tree.node_count(),
        tree.leaf_count()
    );
    Ok(())
}
