// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scene files: a world region, an optional tree config, and id-tagged boxes.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{bail, Context, Result};
use orthtree::{BroadPhase, Dimensions, Item, Region, SpatialTree, TreeBroadPhase, TreeConfig};
use serde::Deserialize;
use tracing::{debug, info};

/// One boxed object in a scene.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneItem {
    /// Caller id, unique within the scene.
    pub id: usize,
    /// Object bounds.
    pub bounds: Region,
}

/// Scene file contents.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scene {
    /// Root region of the tree.
    pub world: Region,
    /// Tree settings; omitted fields take the library defaults.
    #[serde(default)]
    pub config: TreeConfig,
    /// Objects to index.
    #[serde(default)]
    pub items: Vec<SceneItem>,
}

/// Command-line replacements for fields of the scene's config block.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigOverrides {
    /// Replacement dimension count (2 or 3).
    pub dimensions: Option<u8>,
    /// Replacement node capacity.
    pub capacity: Option<usize>,
    /// Replacement depth ceiling.
    pub max_depth: Option<u32>,
}

impl ConfigOverrides {
    /// Applies the overrides to `base` and validates the result.
    pub fn apply(&self, base: TreeConfig) -> Result<TreeConfig> {
        let mut config = base;
        if let Some(dims) = self.dimensions {
            config = config.with_dimensions(Dimensions::try_from(dims)?);
        }
        if let Some(capacity) = self.capacity {
            config = config.with_capacity(capacity);
        }
        if let Some(max_depth) = self.max_depth {
            config = config.with_max_depth(max_depth);
        }
        config.validate()?;
        Ok(config)
    }
}

impl Scene {
    /// Parses a scene from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let scene: Self = serde_json::from_str(text).context("parse scene json")?;
        scene.check_ids()?;
        Ok(scene)
    }

    /// Reads and parses a scene file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read scene {}", path.display()))?;
        let scene = Self::from_json(&text).with_context(|| format!("load {}", path.display()))?;
        info!(
            path = %path.display(),
            items = scene.items.len(),
            "scene loaded"
        );
        Ok(scene)
    }

    fn check_ids(&self) -> Result<()> {
        let mut seen = BTreeSet::new();
        for item in &self.items {
            if !seen.insert(item.id) {
                bail!("duplicate item id {}", item.id);
            }
        }
        Ok(())
    }

    /// Bounds of item `id`, if present.
    pub fn bounds_of(&self, id: usize) -> Option<&Region> {
        self.items.iter().find(|i| i.id == id).map(|i| &i.bounds)
    }

    /// Builds a tree over the scene, inserting items in file order.
    pub fn build_tree(&self, config: TreeConfig) -> Result<SpatialTree<usize>> {
        let mut tree = SpatialTree::with_config(self.world, config)?;
        tree.extend(self.items.iter().map(|i| Item::new(i.bounds, i.id)));
        debug!(items = tree.len(), "tree built");
        Ok(tree)
    }

    /// Registers every item with a tree-backed broad phase.
    pub fn build_broad_phase(&self, config: TreeConfig) -> Result<TreeBroadPhase> {
        let mut bp = TreeBroadPhase::with_config(self.world, config)?;
        for item in &self.items {
            bp.upsert(item.id, item.bounds);
        }
        Ok(bp)
    }
}
