// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geodesic sizing for query boxes.
//!
//! These helpers turn a radius in meters into degree offsets so callers can build an
//! [`Aabb`](crate::Aabb) around a geographic location. The convention is `x` = latitude and
//! `y` = longitude, in degrees.
//!
//! The tree itself never uses this module: [`QuadTree::k_nearest`](crate::QuadTree::k_nearest)
//! ranks by plain Euclidean distance on raw coordinates. Accuracy degrades near the poles, and
//! boxes crossing the antimeridian are not wrapped.

use kurbo::Vec2;

use crate::float::{cos, sin, sqrt};

/// WGS-84 major semi-axis in meters.
pub const WGS84_SEMI_MAJOR: f64 = 6_378_137.0;

/// WGS-84 minor semi-axis in meters.
pub const WGS84_SEMI_MINOR: f64 = 6_356_752.3;

/// Earth radius in meters at the given latitude (radians) on the WGS-84 ellipsoid.
pub fn earth_radius(latitude: f64) -> f64 {
    let (a, b) = (WGS84_SEMI_MAJOR, WGS84_SEMI_MINOR);
    let (c, s) = (cos(latitude), sin(latitude));
    let an = a * a * c;
    let bn = b * b * s;
    let ad = a * c;
    let bd = b * s;
    sqrt((an * an + bn * bn) / (ad * ad + bd * bd))
}

/// Degree offsets `(Δx, Δy)` of a box approximating a circle of `meters` around `center`.
///
/// `Δx` (latitude) uses the local Earth radius; `Δy` (longitude) uses the radius of the
/// parallel through `center`, so it grows towards the poles.
pub fn half_extent_for_radius(center: kurbo::Point, meters: f64) -> Vec2 {
    let latitude = center.x.to_radians();
    let radius = earth_radius(latitude);
    let parallel = radius * cos(latitude);
    Vec2::new(
        (meters / radius).to_degrees(),
        (meters / parallel).to_degrees(),
    )
}
