// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: arena nodes, subdivision, and mutation.

use alloc::vec;
use alloc::vec::Vec;
use kurbo::Rect;
use tracing::{debug, trace};

use crate::config::Config;
use crate::error::Error;
use crate::types::{Aabb, Point, rect_contains, split_rect};

/// Generational handle for a point stored in a [`QuadTree`].
///
/// Handles are how the tree tells points apart: two points with identical coordinates get
/// distinct handles. A handle stays valid across [`QuadTree::update`] and becomes stale once
/// the point is removed; a later insert that reuses the slot bumps its generation, so stale
/// handles never alias a different point.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PointId(u32, u32);

impl PointId {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Point handles are intentionally 32-bit; higher bits are truncated by design."
    )]
    const fn new(idx: usize, generation: u32) -> Self {
        Self(idx as u32, generation)
    }

    const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Index of a node in the tree's arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeIdx(usize);

impl NodeIdx {
    pub(crate) const ROOT: Self = Self(0);

    const fn new(i: usize) -> Self {
        Self(i)
    }

    pub(crate) const fn get(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) bounds: Rect,
    pub(crate) depth: u32,
    // Upward link only; the arena owns every node.
    pub(crate) parent: Option<NodeIdx>,
    // NW, NE, SW, SE once split.
    pub(crate) children: Option<[NodeIdx; 4]>,
    // Point slots; always empty once `children` is set.
    pub(crate) points: Vec<usize>,
}

impl Node {
    fn new(bounds: Rect, depth: u32, parent: Option<NodeIdx>) -> Self {
        Self {
            bounds,
            depth,
            parent,
            children: None,
            points: Vec::new(),
        }
    }

    pub(crate) fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

#[derive(Clone, Debug)]
struct Slot<P> {
    generation: u32,
    point: Option<Point<P>>,
}

/// Outcome of relocating a point found under a node.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Relocation {
    /// The point is not stored under this node.
    Missing,
    /// New coordinates are still inside the owning leaf.
    Stayed,
    /// The point moved to another leaf.
    Moved,
    /// New coordinates are outside the tree's domain; the point is no longer stored.
    Evicted,
}

/// An adaptive point quadtree over a fixed rectangular domain.
///
/// The tree starts as a single leaf covering `boundary`. A leaf that already holds
/// [`Config::capacity`] points splits into four quadrants on the next insert, unless it sits at
/// [`Config::max_depth`], in which case it keeps growing. Nodes never merge back.
///
/// Nodes live in an arena and refer to their parent by index, so upward traversal
/// ([`update`](Self::update) and [`k_nearest`](Self::k_nearest)) never involves ownership.
pub struct QuadTree<P> {
    boundary: Aabb,
    config: Config,
    pub(crate) nodes: Vec<Node>,
    slots: Vec<Slot<P>>,
    free_list: Vec<usize>,
    len: usize,
}

impl<P> core::fmt::Debug for QuadTree<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("QuadTree")
            .field("boundary", &self.boundary)
            .field("config", &self.config)
            .field("nodes", &self.nodes.len())
            .field("leaves", &self.leaf_count())
            .field("points", &self.len)
            .field("free_list", &self.free_list.len())
            .finish_non_exhaustive()
    }
}

impl<P> QuadTree<P> {
    /// Create an empty tree covering `boundary` with the default [`Config`].
    pub fn new(boundary: Aabb) -> Self {
        Self::with_config(boundary, Config::default())
    }

    /// Create an empty tree covering `boundary` with explicit tunables.
    ///
    /// Neither argument is checked; see [`try_new`](Self::try_new) for a validating constructor.
    pub fn with_config(boundary: Aabb, config: Config) -> Self {
        Self {
            boundary,
            config,
            nodes: vec![Node::new(boundary.to_rect(), 0, None)],
            slots: Vec::new(),
            free_list: Vec::new(),
            len: 0,
        }
    }

    /// Create an empty tree after validating `config` and `boundary`.
    ///
    /// Rejects a zero capacity, non-finite coordinates, and negative half-extents.
    pub fn try_new(boundary: Aabb, config: Config) -> Result<Self, Error> {
        if let Err(err) = config.validate() {
            debug!(?config, %err, "rejected tree config");
            return Err(err);
        }
        let Aabb { center, half } = boundary;
        if !center.is_finite() || !half.is_finite() || half.x < 0.0 || half.y < 0.0 {
            debug!(?boundary, "rejected tree boundary");
            return Err(Error::InvalidBoundary {
                center_x: center.x,
                center_y: center.y,
                half_x: half.x,
                half_y: half.y,
            });
        }
        Ok(Self::with_config(boundary, config))
    }

    /// The domain covered by the tree.
    pub fn boundary(&self) -> Aabb {
        self.boundary
    }

    /// The tunables this tree was built with.
    pub fn config(&self) -> Config {
        self.config
    }

    /// Number of stored points.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if no points are stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total number of nodes, internal and leaf.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of leaf nodes.
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Depth of the deepest node (the root is depth 0).
    pub fn max_depth_reached(&self) -> u32 {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    /// Whether `id` refers to a stored point.
    pub fn contains(&self, id: PointId) -> bool {
        self.slot_of(id).is_some()
    }

    /// Borrow a stored point.
    pub fn get(&self, id: PointId) -> Option<&Point<P>> {
        self.slot_of(id).and_then(|slot| self.slots[slot].point.as_ref())
    }

    /// Iterate all stored points in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (PointId, &Point<P>)> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, s)| {
            s.point
                .as_ref()
                .map(|p| (PointId::new(i, s.generation), p))
        })
    }

    /// Drop every point and collapse the tree back to a single root leaf.
    ///
    /// Handles issued before the call become stale.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.nodes.push(Node::new(self.boundary.to_rect(), 0, None));
        self.free_list.clear();
        for (i, slot) in self.slots.iter_mut().enumerate() {
            slot.point = None;
            self.free_list.push(i);
        }
        self.len = 0;
    }

    /// Insert a point. Returns its handle, or `None` if it lies outside the tree's boundary.
    pub fn insert(&mut self, point: Point<P>) -> Option<PointId> {
        let at = point.position();
        if !rect_contains(&self.nodes[NodeIdx::ROOT.get()].bounds, at) {
            return None;
        }
        let slot = self.alloc(point);
        if !self.insert_at(NodeIdx::ROOT, slot, at) {
            self.release(slot);
            return None;
        }
        Some(PointId::new(slot, self.slots[slot].generation))
    }

    /// Remove a point. Returns `false` if the handle is stale or unknown.
    pub fn remove(&mut self, id: PointId) -> bool {
        self.take(id).is_some()
    }

    /// Remove a point and hand it back to the caller.
    pub fn take(&mut self, id: PointId) -> Option<Point<P>> {
        let slot = self.slot_of(id)?;
        let at = self.position_of(slot)?;
        if !self.remove_at(NodeIdx::ROOT, slot, at) {
            return None;
        }
        self.release(slot)
    }

    /// Move a point to `(x, y)`.
    ///
    /// If the new location is still inside the leaf that holds the point, only the coordinates
    /// change. Otherwise the point leaves that leaf and is re-inserted starting from it, walking
    /// up through the ancestors until one accepts it.
    ///
    /// Returns `false` if the handle is stale, or if the new location is outside the tree's
    /// boundary. In the latter case the point is dropped from the tree and its handle becomes
    /// stale.
    pub fn update(&mut self, id: PointId, x: f64, y: f64) -> bool {
        let Some(slot) = self.slot_of(id) else {
            return false;
        };
        let Some(from) = self.position_of(slot) else {
            return false;
        };
        let to = kurbo::Point::new(x, y);
        match self.update_at(NodeIdx::ROOT, slot, from, to) {
            Relocation::Missing => false,
            Relocation::Stayed | Relocation::Moved => true,
            Relocation::Evicted => {
                debug!(slot, x, y, "point left the tree's domain");
                self.release(slot);
                false
            }
        }
    }

    pub(crate) fn position_of(&self, slot: usize) -> Option<kurbo::Point> {
        self.slots.get(slot)?.point.as_ref().map(Point::position)
    }

    pub(crate) fn entry(&self, slot: usize) -> Option<(PointId, &Point<P>)> {
        let s = self.slots.get(slot)?;
        s.point.as_ref().map(|p| (PointId::new(slot, s.generation), p))
    }

    fn slot_of(&self, id: PointId) -> Option<usize> {
        let s = self.slots.get(id.idx())?;
        (s.generation == id.1 && s.point.is_some()).then_some(id.idx())
    }

    fn alloc(&mut self, point: Point<P>) -> usize {
        self.len += 1;
        if let Some(idx) = self.free_list.pop() {
            let slot = &mut self.slots[idx];
            slot.generation = slot.generation.saturating_add(1);
            slot.point = Some(point);
            idx
        } else {
            self.slots.push(Slot {
                generation: 1,
                point: Some(point),
            });
            self.slots.len() - 1
        }
    }

    fn release(&mut self, slot: usize) -> Option<Point<P>> {
        let point = self.slots[slot].point.take()?;
        self.free_list.push(slot);
        self.len -= 1;
        Some(point)
    }

    /// Place `slot` at or below `idx`. Fails if `at` is outside the node.
    fn insert_at(&mut self, idx: NodeIdx, slot: usize, at: kurbo::Point) -> bool {
        let node = &self.nodes[idx.get()];
        if !rect_contains(&node.bounds, at) {
            return false;
        }
        if node.is_leaf() {
            // Leaves at the depth ceiling overflow instead of splitting.
            if node.points.len() < self.config.capacity || node.depth >= self.config.max_depth {
                self.nodes[idx.get()].points.push(slot);
                return true;
            }
            self.subdivide(idx);
        }
        let Some(children) = self.nodes[idx.get()].children else {
            return false;
        };
        children
            .into_iter()
            .any(|child| self.insert_at(child, slot, at))
    }

    /// Split a leaf into four quadrants and push its points down. No-op on internal nodes.
    fn subdivide(&mut self, idx: NodeIdx) {
        let node = &self.nodes[idx.get()];
        if node.children.is_some() {
            return;
        }
        let depth = node.depth + 1;
        let quads = split_rect(&node.bounds);
        let first = self.nodes.len();
        for bounds in quads {
            self.nodes.push(Node::new(bounds, depth, Some(idx)));
        }
        let children = [0, 1, 2, 3].map(|i| NodeIdx::new(first + i));
        let held = core::mem::take(&mut self.nodes[idx.get()].points);
        self.nodes[idx.get()].children = Some(children);
        trace!(node = idx.get(), depth, migrated = held.len(), "subdivided leaf");

        for slot in held {
            let Some(at) = self.position_of(slot) else {
                continue;
            };
            let placed = children
                .into_iter()
                .any(|child| self.insert_at(child, slot, at));
            debug_assert!(placed, "quadrants must cover every point of their parent");
        }
    }

    /// Remove `slot` from the leaf under `idx` that holds it.
    fn remove_at(&mut self, idx: NodeIdx, slot: usize, at: kurbo::Point) -> bool {
        let node = &mut self.nodes[idx.get()];
        if !rect_contains(&node.bounds, at) {
            return false;
        }
        if let Some(children) = node.children {
            return children
                .into_iter()
                .any(|child| self.remove_at(child, slot, at));
        }
        match node.points.iter().position(|&s| s == slot) {
            Some(pos) => {
                node.points.swap_remove(pos);
                true
            }
            None => false,
        }
    }

    fn update_at(
        &mut self,
        idx: NodeIdx,
        slot: usize,
        from: kurbo::Point,
        to: kurbo::Point,
    ) -> Relocation {
        let node = &self.nodes[idx.get()];
        if !rect_contains(&node.bounds, from) {
            return Relocation::Missing;
        }
        if let Some(children) = node.children {
            for child in children {
                match self.update_at(child, slot, from, to) {
                    Relocation::Missing => {}
                    done => return done,
                }
            }
            return Relocation::Missing;
        }

        let Some(pos) = node.points.iter().position(|&s| s == slot) else {
            return Relocation::Missing;
        };
        let stays = rect_contains(&node.bounds, to);
        if let Some(point) = self.slots[slot].point.as_mut() {
            point.set_position(to);
        }
        if stays {
            return Relocation::Stayed;
        }

        self.nodes[idx.get()].points.swap_remove(pos);
        if self.reinsert_from(idx, slot, to) {
            debug!(slot, from_leaf = idx.get(), "relocated point");
            Relocation::Moved
        } else {
            Relocation::Evicted
        }
    }

    /// Insert starting at `idx`, retrying at each ancestor until one accepts the point.
    fn reinsert_from(&mut self, idx: NodeIdx, slot: usize, at: kurbo::Point) -> bool {
        let mut current = Some(idx);
        while let Some(node) = current {
            if self.insert_at(node, slot, at) {
                return true;
            }
            current = self.nodes[node.get()].parent;
        }
        false
    }
}
