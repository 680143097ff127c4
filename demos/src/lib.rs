// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared setup for the `understory_quadtree` demos.
//!
//! Each demo reads an optional TOML file describing the tree's domain and tunables:
//!
//! ```toml
//! [world]
//! center_x = 0.0
//! center_y = 0.0
//! half_x = 90.0
//! half_y = 180.0
//!
//! [tree]
//! capacity = 4
//! max_depth = 8
//! ```
//!
//! Missing files and missing keys fall back to defaults.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::EnvFilter;
use understory_quadtree::{Aabb, Config, QuadTree};

/// Environment variable naming the TOML file the demos read.
pub const CONFIG_ENV: &str = "QUADTREE_DEMO_CONFIG";

/// Root configuration for a demo run.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct DemoConfig {
    /// Domain covered by the tree.
    #[serde(default)]
    pub world: WorldConfig,
    /// Subdivision tunables.
    #[serde(default)]
    pub tree: Config,
}

/// Domain of the tree as a center and half-extents.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Center x (latitude for geographic demos).
    pub center_x: f64,
    /// Center y (longitude for geographic demos).
    pub center_y: f64,
    /// Half width.
    pub half_x: f64,
    /// Half height.
    pub half_y: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        // The whole globe in latitude/longitude degrees.
        Self {
            center_x: 0.0,
            center_y: 0.0,
            half_x: 90.0,
            half_y: 180.0,
        }
    }
}

impl WorldConfig {
    /// The domain as a box.
    pub fn boundary(&self) -> Aabb {
        Aabb::from_center_half(self.center_x, self.center_y, self.half_x, self.half_y)
    }
}

impl DemoConfig {
    /// Parse a config from TOML text.
    pub fn from_toml(contents: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load from `path`, or use defaults if the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            Self::from_toml(&contents).with_context(|| format!("parsing {}", path.display()))
        } else {
            info!("No {} found, using default config", path.display());
            Ok(Self::default())
        }
    }

    /// Load from the file named by [`CONFIG_ENV`], defaulting to `quadtree.toml`.
    pub fn from_env() -> anyhow::Result<Self> {
        let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| "quadtree.toml".into());
        Self::load(path)
    }

    /// Build an empty tree, validating the config and domain.
    pub fn build<P>(&self) -> anyhow::Result<QuadTree<P>> {
        QuadTree::try_new(self.world.boundary(), self.tree).context("invalid demo config")
    }

    /// Render as pretty TOML.
    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Install a `tracing` subscriber honoring `RUST_LOG`, defaulting to `info`.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}
