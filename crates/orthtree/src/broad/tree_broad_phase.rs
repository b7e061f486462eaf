// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Bound::{Excluded, Unbounded};

use tracing::debug;

use crate::config::{ConfigError, Dimensions, TreeConfig};
use crate::tree::node::SpatialTree;
use crate::types::item::Item;
use crate::types::region::Region;

/// Id-keyed store of boxes that can report which of them touch.
///
/// Whatever structure sits behind it, a `pairs()` answer depends only on the
/// registered boxes: each pair is written smaller id first and the list
/// ascends, so a tree-backed store and the all-pairs store can be compared
/// with `==`.
pub trait BroadPhase {
    /// Registers `id` with `bounds`, replacing any earlier bounds for it.
    fn upsert(&mut self, id: usize, bounds: Region);
    /// Forgets `id`; unknown ids are ignored.
    fn remove(&mut self, id: usize);
    /// Every pair of registered ids whose boxes overlap, in ascending order.
    fn pairs(&self) -> Vec<(usize, usize)>;
}

/// Broad phase backed by a [`SpatialTree`] rebuilt on every query.
///
/// Proxies live in an id-ordered map. `pairs()` builds a fresh tree over
/// `world` (inserting in ascending id order), asks it for each proxy's
/// candidates, and keeps those whose boxes overlap on the axes the tree's
/// [`Dimensions`] make active. Rebuilding per query
/// matches the usual tick loop: move everything, rebuild, query, discard.
///
/// Proxies outside `world` are still indexed; they sink toward whichever
/// children their coordinates classify into and are found the same way.
#[derive(Debug, Clone)]
pub struct TreeBroadPhase {
    world: Region,
    config: TreeConfig,
    proxies: BTreeMap<usize, Region>,
}

impl TreeBroadPhase {
    /// Creates an empty broad phase over `world` using the default tree
    /// configuration.
    #[must_use]
    pub fn new(world: Region) -> Self {
        Self {
            world,
            config: TreeConfig::default(),
            proxies: BTreeMap::new(),
        }
    }

    /// Creates an empty broad phase with an explicit tree configuration.
    pub fn with_config(world: Region, config: TreeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            world,
            config,
            proxies: BTreeMap::new(),
        })
    }

    /// Number of proxies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.proxies.len()
    }

    /// `true` when no proxies are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.proxies.is_empty()
    }

    /// Bounds registered for `id`.
    #[must_use]
    pub fn get(&self, id: usize) -> Option<&Region> {
        self.proxies.get(&id)
    }

    /// Builds the tree for the current proxy set.
    #[must_use]
    pub fn build(&self) -> SpatialTree<usize> {
        let mut tree = SpatialTree::root(self.world, self.config);
        tree.extend(
            self.proxies
                .iter()
                .map(|(id, bounds)| Item::new(*bounds, *id)),
        );
        let stats = tree.stats();
        debug!(
            proxies = self.proxies.len(),
            nodes = stats.nodes,
            depth = stats.max_depth_reached,
            "rebuilt broad-phase tree"
        );
        tree
    }

    /// Ids the tree reports as candidates for `id`, ascending, excluding `id`
    /// itself. `None` if `id` is not registered.
    #[must_use]
    pub fn candidates(&self, id: usize) -> Option<Vec<usize>> {
        let bounds = self.proxies.get(&id)?;
        let tree = self.build();
        let mut out: Vec<usize> = tree
            .retrieve(bounds)
            .into_iter()
            .map(|item| *item.payload())
            .filter(|other| *other != id)
            .collect();
        out.sort_unstable();
        Some(out)
    }

    /// Every canonical pair the tree reports as a candidate, without the box
    /// overlap filter applied by [`BroadPhase::pairs`].
    #[must_use]
    pub fn candidate_pairs(&self) -> Vec<(usize, usize)> {
        self.collect_pairs(false)
    }

    fn collect_pairs(&self, require_overlap: bool) -> Vec<(usize, usize)> {
        let tree = self.build();
        let dims = self.config.dimensions();
        let mut pairs = BTreeSet::new();
        let mut scratch = Vec::new();
        for (&id, bounds) in &self.proxies {
            scratch.clear();
            tree.retrieve_into(bounds, &mut scratch);
            for item in &scratch {
                let other = *item.payload();
                if other == id {
                    continue;
                }
                if require_overlap && !bounds.overlaps_in(item.bounds(), dims) {
                    continue;
                }
                pairs.insert((id.min(other), id.max(other)));
            }
        }
        // BTreeSet iteration is already canonical and sorted.
        pairs.into_iter().collect()
    }
}

impl BroadPhase for TreeBroadPhase {
    fn upsert(&mut self, id: usize, bounds: Region) {
        self.proxies.insert(id, bounds);
    }

    fn remove(&mut self, id: usize) {
        self.proxies.remove(&id);
    }

    fn pairs(&self) -> Vec<(usize, usize)> {
        self.collect_pairs(true)
    }
}

/// All-pairs `O(n^2)` baseline.
///
/// Kept as the reference that [`TreeBroadPhase`] is checked against in tests
/// and benchmarks; built with the same [`Dimensions`], both must report
/// identical pair lists.
#[derive(Debug, Clone)]
pub struct BruteForceBroadPhase {
    dimensions: Dimensions,
    proxies: BTreeMap<usize, Region>,
}

impl Default for BruteForceBroadPhase {
    fn default() -> Self {
        Self::with_dimensions(Dimensions::Three)
    }
}

impl BruteForceBroadPhase {
    /// Creates an empty baseline that compares boxes on all three axes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty baseline that compares boxes on the axes active
    /// under `dimensions`.
    #[must_use]
    pub const fn with_dimensions(dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            proxies: BTreeMap::new(),
        }
    }
}

impl BroadPhase for BruteForceBroadPhase {
    fn upsert(&mut self, id: usize, bounds: Region) {
        self.proxies.insert(id, bounds);
    }

    fn remove(&mut self, id: usize) {
        self.proxies.remove(&id);
    }

    fn pairs(&self) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for (lo_id, lo) in &self.proxies {
            // Map order hands out ids ascending, so every pair is already
            // written smaller id first.
            for (hi_id, hi) in self.proxies.range((Excluded(*lo_id), Unbounded)) {
                if lo.overlaps_in(hi, self.dimensions) {
                    out.push((*lo_id, *hi_id));
                }
            }
        }
        out
    }
}
