// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types: stored points and center/half-extent boxes.

use kurbo::{Rect, Vec2};

use crate::geo;

/// A stored location with an opaque payload.
///
/// Coordinates are plain `f64` values; when used with the [geodesic helpers](crate::geo),
/// `x` is latitude and `y` is longitude, both in degrees.
///
/// Points are addressed by [`PointId`](crate::PointId) once inserted, so two points with the
/// same coordinates stay distinct entities.
#[derive(Clone, Debug, PartialEq)]
pub struct Point<P> {
    x: f64,
    y: f64,
    payload: P,
}

impl<P> Point<P> {
    /// Create a point at `(x, y)` carrying `payload`.
    pub const fn new(x: f64, y: f64, payload: P) -> Self {
        Self { x, y, payload }
    }

    /// The x coordinate.
    pub const fn x(&self) -> f64 {
        self.x
    }

    /// The y coordinate.
    pub const fn y(&self) -> f64 {
        self.y
    }

    /// Both coordinates as a tuple.
    pub const fn coordinates(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// The location as a Kurbo point.
    pub const fn position(&self) -> kurbo::Point {
        kurbo::Point::new(self.x, self.y)
    }

    /// Borrow the payload.
    pub const fn payload(&self) -> &P {
        &self.payload
    }

    /// Consume the point, returning its payload.
    pub fn into_payload(self) -> P {
        self.payload
    }

    /// Euclidean distance from this point to `other`.
    pub fn distance_to(&self, other: kurbo::Point) -> f64 {
        self.position().distance(other)
    }

    /// Degree offsets of a box approximating a circle of `meters` around this point.
    ///
    /// See [`geo::half_extent_for_radius`].
    pub fn half_extent(&self, meters: f64) -> Vec2 {
        geo::half_extent_for_radius(self.position(), meters)
    }

    pub(crate) fn set_position(&mut self, at: kurbo::Point) {
        self.x = at.x;
        self.y = at.y;
    }
}

/// Axis-aligned bounding box stored as a center and half-extents.
///
/// The box covers `[center.x - half.x, center.x + half.x] × [center.y - half.y, center.y + half.y]`
/// and all predicates treat it as closed. Half-extents are expected to be non-negative; the
/// predicates do not check. Floats are assumed to be finite (no NaNs).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    /// Center of the box.
    pub center: kurbo::Point,
    /// Half width (`x`) and half height (`y`).
    pub half: Vec2,
}

impl Aabb {
    /// Create a box from its center and half-extents.
    pub const fn new(center: kurbo::Point, half: Vec2) -> Self {
        Self { center, half }
    }

    /// Create a box from raw center and half-extent components.
    pub const fn from_center_half(center_x: f64, center_y: f64, half_x: f64, half_y: f64) -> Self {
        Self {
            center: kurbo::Point::new(center_x, center_y),
            half: Vec2::new(half_x, half_y),
        }
    }

    /// Box approximating a circle of `meters` around a geographic `center`.
    ///
    /// See [`geo::half_extent_for_radius`] for the coordinate convention.
    pub fn around(center: kurbo::Point, meters: f64) -> Self {
        Self::new(center, geo::half_extent_for_radius(center, meters))
    }

    /// Minimum corner.
    pub fn min(&self) -> kurbo::Point {
        self.center - self.half
    }

    /// Maximum corner.
    pub fn max(&self) -> kurbo::Point {
        self.center + self.half
    }

    /// Whether the point lies inside the closed box.
    pub fn contains_point(&self, p: kurbo::Point) -> bool {
        let (min, max) = (self.min(), self.max());
        p.x >= min.x && p.y >= min.y && p.x <= max.x && p.y <= max.y
    }

    /// Whether the two closed boxes overlap. Touching boxes intersect.
    pub fn intersects(&self, other: &Self) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        b_max.x >= a_min.x && b_max.y >= a_min.y && b_min.x <= a_max.x && b_min.y <= a_max.y
    }

    /// The four equal quadrants of this box, ordered NW, NE, SW, SE.
    ///
    /// "North" is towards larger `y`. These are the boxes a tree node splits into.
    pub fn quadrants(&self) -> [Self; 4] {
        split_rect(&self.to_rect()).map(Self::from_rect)
    }

    /// Convert to a Kurbo rectangle.
    pub fn to_rect(&self) -> Rect {
        Rect::from_points(self.min(), self.max())
    }

    /// Convert from a Kurbo rectangle. The rectangle is normalized first.
    pub fn from_rect(rect: Rect) -> Self {
        let rect = rect.abs();
        Self::new(rect.center(), Vec2::new(rect.width() * 0.5, rect.height() * 0.5))
    }
}

impl From<Rect> for Aabb {
    fn from(rect: Rect) -> Self {
        Self::from_rect(rect)
    }
}

// Tree nodes keep min/max rectangles so that sibling quadrants share their edges exactly;
// deriving each child from a center and half-extents can leave ulp-wide gaps.

/// Inclusive point containment for a normalized rectangle.
pub(crate) fn rect_contains(r: &Rect, p: kurbo::Point) -> bool {
    p.x >= r.x0 && p.y >= r.y0 && p.x <= r.x1 && p.y <= r.y1
}

/// Inclusive overlap test for normalized rectangles.
pub(crate) fn rect_intersects(a: &Rect, b: &Rect) -> bool {
    b.x1 >= a.x0 && b.y1 >= a.y0 && b.x0 <= a.x1 && b.y0 <= a.y1
}

/// Split a normalized rectangle into NW, NE, SW, SE quadrants.
pub(crate) fn split_rect(r: &Rect) -> [Rect; 4] {
    let c = r.center();
    [
        Rect::new(r.x0, c.y, c.x, r.y1),
        Rect::new(c.x, c.y, r.x1, r.y1),
        Rect::new(r.x0, r.y0, c.x, c.y),
        Rect::new(c.x, r.y0, r.x1, c.y),
    ]
}
