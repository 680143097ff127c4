// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Find places within a radius in meters of a latitude/longitude.
//!
//! Set `QUADTREE_DEMO_CONFIG` to a TOML file to change the domain or tunables.

use kurbo::Point as LatLon;
use tracing::info;
use understory_quadtree::{Aabb, Point};
use understory_quadtree_demos::DemoConfig;

const PLACES: &[(f64, f64, &str)] = &[
    (48.8584, 2.2945, "Eiffel Tower"),
    (48.8606, 2.3376, "Louvre"),
    (48.8530, 2.3499, "Notre-Dame"),
    (48.8867, 2.3431, "Sacre-Coeur"),
    (48.8049, 2.1204, "Versailles"),
    (51.5007, -0.1246, "Big Ben"),
    (40.6892, -74.0445, "Statue of Liberty"),
    (-33.8568, 151.2153, "Sydney Opera House"),
];

fn main() -> anyhow::Result<()> {
    understory_quadtree_demos::init_logging();

    let config = DemoConfig::from_env()?;
    let mut tree = config.build()?;
    for &(lat, lon, name) in PLACES {
        if tree.insert(Point::new(lat, lon, name)).is_none() {
            info!(name, "outside the configured world, skipped");
        }
    }
    info!(?tree, "loaded places");

    let here = LatLon::new(48.8566, 2.3522);
    for meters in [1_000.0, 5_000.0, 25_000.0] {
        let query = Aabb::around(here, meters);
        let nearest: Vec<_> = tree
            .k_nearest(&query, 3)
            .into_iter()
            .map(|(_, p)| *p.payload())
            .collect();
        println!(
            "within {:>6} m: {} places, nearest {:?}",
            meters,
            tree.search(&query).len(),
            nearest
        );
    }
    Ok(())
}
