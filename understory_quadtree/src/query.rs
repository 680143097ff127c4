// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Range and nearest-neighbor queries.

use alloc::vec;
use alloc::vec::Vec;
use kurbo::Rect;

use crate::tree::{NodeIdx, PointId, QuadTree};
use crate::types::{Aabb, Point, rect_contains, rect_intersects};

/// Per-call state for a k-nearest search.
struct Nearest<'a, P> {
    query: Rect,
    center: kurbo::Point,
    k: usize,
    filter: &'a dyn Fn(&Point<P>) -> bool,
    visited: Vec<bool>,
}

impl<P> QuadTree<P> {
    /// All points inside `query`, in traversal order.
    ///
    /// Subtrees whose bounds do not touch `query` are skipped. Each point appears at most once.
    pub fn search(&self, query: &Aabb) -> Vec<(PointId, &Point<P>)> {
        let mut slots = Vec::new();
        self.search_at(NodeIdx::ROOT, &query.to_rect(), &mut slots);
        slots.into_iter().filter_map(|s| self.entry(s)).collect()
    }

    /// Up to `k` points inside `query`, nearest to `query.center` first.
    ///
    /// Equivalent to [`k_nearest_filtered`](Self::k_nearest_filtered) with a filter that
    /// accepts everything.
    pub fn k_nearest(&self, query: &Aabb, k: usize) -> Vec<(PointId, &Point<P>)> {
        self.k_nearest_filtered(query, k, |_| true)
    }

    /// Up to `k` points inside `query` that pass `filter`, nearest to `query.center` first.
    ///
    /// Distances are Euclidean on raw coordinates. Points at equal distance keep the order in
    /// which the search found them.
    ///
    /// The search starts at the first leaf (in NW, NE, SW, SE order) that touches `query` and
    /// expands outward through its ancestors. The descent from the root stops as soon as it
    /// has gathered `k` points, so when `query` spans several quadrants a later quadrant is not
    /// consulted even if it holds closer points: the result is approximate in that case.
    pub fn k_nearest_filtered<F>(&self, query: &Aabb, k: usize, filter: F) -> Vec<(PointId, &Point<P>)>
    where
        F: Fn(&Point<P>) -> bool,
    {
        if k == 0 {
            return Vec::new();
        }
        let mut state = Nearest {
            query: query.to_rect(),
            center: query.center,
            k,
            filter: &filter,
            visited: vec![false; self.nodes.len()],
        };
        self.nearest_descend(NodeIdx::ROOT, &mut state)
            .into_iter()
            .filter_map(|s| self.entry(s))
            .collect()
    }

    fn search_at(&self, idx: NodeIdx, query: &Rect, out: &mut Vec<usize>) {
        let node = &self.nodes[idx.get()];
        if !rect_intersects(&node.bounds, query) {
            return;
        }
        out.extend(node.points.iter().copied().filter(|&slot| {
            self.position_of(slot)
                .is_some_and(|at| rect_contains(query, at))
        }));
        if let Some(children) = node.children {
            for child in children {
                self.search_at(child, query, out);
            }
        }
    }

    /// Walk down to the leaves touching the query, expanding from each until `k` are found.
    fn nearest_descend(&self, idx: NodeIdx, state: &mut Nearest<'_, P>) -> Vec<usize> {
        let node = &self.nodes[idx.get()];
        if !rect_intersects(&node.bounds, &state.query) {
            return Vec::new();
        }
        let Some(children) = node.children else {
            let mut found = self.nearest_expand(idx, state);
            found.truncate(state.k);
            return found;
        };
        let mut found = Vec::new();
        for child in children {
            found.extend(self.nearest_descend(child, state));
            if found.len() >= state.k {
                found.truncate(state.k);
                return found;
            }
        }
        found
    }

    /// Gather candidates at `idx`, its children, and its ancestors, skipping visited nodes.
    fn nearest_expand(&self, idx: NodeIdx, state: &mut Nearest<'_, P>) -> Vec<usize> {
        if core::mem::replace(&mut state.visited[idx.get()], true) {
            return Vec::new();
        }
        let node = &self.nodes[idx.get()];
        if !rect_intersects(&node.bounds, &state.query) {
            return Vec::new();
        }

        let mut found: Vec<(usize, f64)> = Vec::new();
        for &slot in &node.points {
            let Some((_, point)) = self.entry(slot) else {
                continue;
            };
            let at = point.position();
            if rect_contains(&state.query, at) && (state.filter)(point) {
                found.push((slot, at.distance(state.center)));
            }
        }
        let mut neighbors = Vec::new();
        if let Some(children) = node.children {
            neighbors.extend(children);
        }
        neighbors.extend(node.parent);
        for next in neighbors {
            for slot in self.nearest_expand(next, state) {
                if let Some(at) = self.position_of(slot) {
                    found.push((slot, at.distance(state.center)));
                }
            }
        }

        // Stable: equal distances keep discovery order.
        found.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(core::cmp::Ordering::Equal));
        found.truncate(state.k);
        found.into_iter().map(|(slot, _)| slot).collect()
    }
}
