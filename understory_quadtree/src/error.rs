// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction-time errors.

use thiserror::Error;

/// Errors reported when validating a [`Config`](crate::Config) or a root boundary.
///
/// Tree operations themselves never fail with an error: they report success with
/// `bool`/`Option` and return empty results for queries that match nothing.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum Error {
    /// Leaves must be able to hold at least one point.
    #[error("leaf capacity must be at least 1")]
    ZeroCapacity,

    /// The root boundary has a non-finite coordinate or a negative half-extent.
    #[error("invalid root boundary: center ({center_x}, {center_y}), half ({half_x}, {half_y})")]
    InvalidBoundary {
        /// Center x of the rejected boundary.
        center_x: f64,
        /// Center y of the rejected boundary.
        center_y: f64,
        /// Half width of the rejected boundary.
        half_x: f64,
        /// Half height of the rejected boundary.
        half_y: f64,
    },
}
