// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shape tunables for a [`QuadTree`](crate::QuadTree).

use crate::error::Error;

/// Default number of points a leaf holds before it splits.
pub const DEFAULT_CAPACITY: usize = 8;

/// Default deepest level at which a leaf may still split.
pub const DEFAULT_MAX_DEPTH: u32 = 6;

/// Subdivision policy for a tree.
///
/// The tree reads these values on every insert. They are fixed when the tree is built; to
/// reshape an index, build a new tree and re-insert.
///
/// - `capacity`: a leaf with fewer points than this accepts new points directly.
/// - `max_depth`: leaves at this depth never split and may exceed `capacity`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Points a leaf holds before it splits.
    pub capacity: usize,
    /// Deepest level (root is 0) at which a leaf may still split.
    pub max_depth: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Config {
    /// Replace the leaf capacity.
    #[must_use]
    pub const fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Replace the maximum subdivision depth.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Check that the tunables describe a usable tree.
    pub fn validate(&self) -> Result<(), Error> {
        if self.capacity == 0 {
            return Err(Error::ZeroCapacity);
        }
        Ok(())
    }
}
