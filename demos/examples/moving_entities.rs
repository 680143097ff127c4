// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Entities wandering around a bounded arena, relocated with `update` each tick.
//!
//! Run with `RUST_LOG=understory_quadtree=debug` to see relocations and evictions.

use tracing::info;
use understory_quadtree::{Aabb, Config, Point, PointId, QuadTree};

struct Entity {
    id: PointId,
    velocity: (f64, f64),
}

fn main() -> anyhow::Result<()> {
    understory_quadtree_demos::init_logging();

    let arena = Aabb::from_center_half(50.0, 50.0, 50.0, 50.0);
    let mut tree = QuadTree::try_new(arena, Config::default().with_capacity(4))?;

    let mut entities = Vec::new();
    for i in 0..64_u32 {
        let x = f64::from(i % 8) * 12.0 + 6.0;
        let y = f64::from(i / 8) * 12.0 + 6.0;
        let velocity = (f64::from(i % 5) - 2.0, f64::from(i % 3) - 1.0);
        if let Some(id) = tree.insert(Point::new(x, y, i)) {
            entities.push(Entity { id, velocity });
        }
    }

    for tick in 0..20 {
        let mut evicted = 0;
        entities.retain(|e| {
            let Some(p) = tree.get(e.id) else {
                return false;
            };
            let (x, y) = p.coordinates();
            let kept = tree.update(e.id, x + e.velocity.0 * 2.0, y + e.velocity.1 * 2.0);
            if !kept {
                evicted += 1;
            }
            kept
        });
        let crowd = tree
            .k_nearest(&Aabb::from_center_half(50.0, 50.0, 10.0, 10.0), 5)
            .len();
        info!(
            tick,
            alive = tree.len(),
            evicted,
            nodes = tree.node_count(),
            crowd,
            "tick"
        );
    }
    println!(
        "{} entities left, tree depth {}",
        tree.len(),
        tree.max_depth_reached()
    );
    Ok(())
}
