// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_quadtree --heading-base-level=0

//! Understory Quadtree: an adaptive 2D point index.
//!
//! Understory Quadtree stores `(x, y, payload)` points inside a fixed rectangular domain and
//! answers "what is near here" questions.
//!
//! - Insert, remove, and move points through stable [`PointId`] handles.
//! - Query every point inside an axis-aligned box with [`QuadTree::search`].
//! - Ask for the `k` closest points inside a box with [`QuadTree::k_nearest`], optionally
//!   filtered by payload.
//! - Size query boxes in meters around a latitude/longitude with the [`geo`] helpers.
//!
//! Leaves split into four quadrants (NW, NE, SW, SE) once they hold [`Config::capacity`]
//! points, down to [`Config::max_depth`]. Nodes never merge, so the shape of the tree only
//! grows until [`QuadTree::clear`].
//!
//! # Example
//!
//! ```rust
//! use understory_quadtree::{Aabb, Point, QuadTree};
//!
//! let mut tree = QuadTree::new(Aabb::from_center_half(0.0, 0.0, 10.0, 10.0));
//! let a = tree.insert(Point::new(1.0, 1.0, "a")).unwrap();
//! let _b = tree.insert(Point::new(2.0, 2.0, "b")).unwrap();
//! let _d = tree.insert(Point::new(-1.0, -1.0, "d")).unwrap();
//!
//! // Points outside the domain are rejected.
//! assert!(tree.insert(Point::new(50.0, 0.0, "far")).is_none());
//!
//! // Closest first; equal distances keep the order they were found in.
//! let near: Vec<_> = tree
//!     .k_nearest(&Aabb::from_center_half(0.0, 0.0, 5.0, 5.0), 2)
//!     .into_iter()
//!     .map(|(_, p)| *p.payload())
//!     .collect();
//! assert_eq!(near, ["a", "d"]);
//!
//! // Move `a` out of the query box.
//! assert!(tree.update(a, 9.0, 9.0));
//! let hits = tree.search(&Aabb::from_center_half(0.0, 0.0, 3.0, 3.0));
//! assert_eq!(hits.len(), 2);
//! ```
//!
//! Geographic callers can size a box in meters. Coordinates are `x` = latitude and
//! `y` = longitude, in degrees:
//!
//! ```rust
//! use kurbo::Point as LatLon;
//! use understory_quadtree::{Aabb, Config, Point, QuadTree};
//!
//! let world = Aabb::from_center_half(0.0, 0.0, 90.0, 180.0);
//! let mut tree = QuadTree::try_new(world, Config::default().with_capacity(4)).unwrap();
//! tree.insert(Point::new(48.8584, 2.2945, "tower")).unwrap();
//! tree.insert(Point::new(48.8606, 2.3376, "museum")).unwrap();
//! tree.insert(Point::new(51.5007, -0.1246, "clock")).unwrap();
//!
//! let around = Aabb::around(LatLon::new(48.8566, 2.3522), 5_000.0);
//! let hits = tree.search(&around);
//! assert_eq!(hits.len(), 2);
//! ```
//!
//! ## k-nearest accuracy
//!
//! [`QuadTree::k_nearest`] expands from the first leaf that touches the query through its
//! ancestors, and stops descending once it has `k` results. When the query spans several
//! quadrants this is an approximation: a later quadrant is not consulted for closer points.
//!
//! ### Float semantics
//!
//! Coordinates are assumed to be finite (no NaNs). [`QuadTree::try_new`] rejects non-finite
//! boundaries; the other entry points do not check.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod config;
pub mod error;
mod float;
pub mod geo;
mod query;
pub mod tree;
pub mod types;

pub use config::Config;
pub use error::Error;
pub use geo::{earth_radius, half_extent_for_radius};
pub use tree::{PointId, QuadTree};
pub use types::{Aabb, Point};

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn every_stored_point_sits_in_its_leaf() {
        let mut tree = QuadTree::with_config(
            Aabb::from_center_half(50.0, 50.0, 50.0, 50.0),
            Config::default().with_capacity(3).with_max_depth(4),
        );
        let mut ids = Vec::new();
        for i in 0..200_u32 {
            let x = f64::from((i * 37) % 101);
            let y = f64::from((i * 53) % 97);
            ids.push(tree.insert(Point::new(x, y, i)).unwrap());
        }
        for (n, id) in ids.iter().enumerate() {
            if n % 3 == 0 {
                assert!(tree.remove(*id));
            } else if n % 3 == 1 {
                let p = tree.get(*id).unwrap().position();
                assert!(tree.update(*id, 100.0 - p.x, p.y * 0.5));
            }
        }

        for node in &tree.nodes {
            if node.is_leaf() {
                for &slot in &node.points {
                    let at = tree.position_of(slot).unwrap();
                    assert!(types::rect_contains(&node.bounds, at), "{at:?} escaped");
                }
            } else {
                assert!(node.points.is_empty(), "internal node holds points");
            }
        }
        assert!(tree.max_depth_reached() <= 4);
        assert_eq!(tree.len(), ids.iter().filter(|id| tree.contains(**id)).count());

        let all = tree.search(&tree.boundary());
        assert_eq!(all.len(), tree.len());
    }

    #[test]
    fn geo_box_finds_nearby_places() {
        let world = Aabb::from_center_half(0.0, 0.0, 90.0, 180.0);
        let mut tree = QuadTree::new(world);
        tree.insert(Point::new(0.001, 0.001, "close")).unwrap();
        tree.insert(Point::new(0.5, 0.5, "far")).unwrap();

        let origin = Point::new(0.0, 0.0, ());
        let query = Aabb::new(origin.position(), origin.half_extent(1_000.0));
        let hits: Vec<_> = tree
            .k_nearest(&query, 5)
            .into_iter()
            .map(|(_, p)| *p.payload())
            .collect();
        assert_eq!(hits, ["close"]);
    }
}
