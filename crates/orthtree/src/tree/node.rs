// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use tracing::trace;

use super::stats::TreeStats;
use crate::config::{ConfigError, TreeConfig};
use crate::types::item::Item;
use crate::types::region::Region;

/// Region quadtree (2-D) or octree (3-D) over axis-aligned boxes.
///
/// Every node is itself a `SpatialTree`: it owns a region, the items that
/// straddle one of its split planes, and either no children (leaf) or exactly
/// [`Dimensions::child_count`](crate::Dimensions::child_count) of them.
///
/// Child numbering: bit `k` of a child index selects the high half of axis
/// `k` (x = bit 0, y = bit 1, z = bit 2). A coordinate equal to a midpoint
/// belongs to the high half; [`classify`](Self::classify) and the child
/// regions built on split follow the same rule.
///
/// Items never move up the tree and are never duplicated: each lives in the
/// deepest node whose region it fits without straddling a split plane, as of
/// the last redistribution pass that saw it.
#[derive(Debug)]
pub struct SpatialTree<T> {
    region: Region,
    depth: u32,
    config: TreeConfig,
    items: Vec<Item<T>>,
    children: Vec<SpatialTree<T>>,
}

impl<T> SpatialTree<T> {
    /// Creates an empty root over `region` with the default configuration.
    #[must_use]
    pub fn new(region: Region) -> Self {
        Self::node(region, 0, TreeConfig::default())
    }

    /// Creates an empty root over `region` with an explicit configuration.
    pub fn with_config(region: Region, config: TreeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::root(region, config))
    }

    /// Root over a configuration the caller has already validated.
    pub(crate) const fn root(region: Region, config: TreeConfig) -> Self {
        Self::node(region, 0, config)
    }

    const fn node(region: Region, depth: u32, config: TreeConfig) -> Self {
        Self {
            region,
            depth,
            config,
            items: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Region this node is responsible for.
    #[must_use]
    pub const fn region(&self) -> &Region {
        &self.region
    }

    /// Distance from the root (the root is 0).
    #[must_use]
    pub const fn depth(&self) -> u32 {
        self.depth
    }

    /// Configuration shared by the whole tree.
    #[must_use]
    pub const fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// `true` until the node has been split.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Child nodes in index order; empty for a leaf.
    #[must_use]
    pub fn children(&self) -> &[SpatialTree<T>] {
        &self.children
    }

    /// Items held by this node only, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[Item<T>] {
        &self.items
    }

    /// Number of items stored in this node and all of its descendants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len() + self.children.iter().map(Self::len).sum::<usize>()
    }

    /// `true` when neither this node nor any descendant holds an item.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.children.iter().all(Self::is_empty)
    }

    /// Returns the child that fully contains `bounds`, or `None` when `bounds`
    /// straddles a split plane on any active axis.
    ///
    /// Pure function of `bounds` and this node's region; it does not matter
    /// whether the node has been split yet.
    #[must_use]
    pub fn classify(&self, bounds: &Region) -> Option<usize> {
        let (min, max) = (bounds.min(), bounds.max());
        let mut index = 0;
        for axis in 0..self.config.dimensions().axes() {
            let mid = self.region.midpoint(axis);
            if min[axis] >= mid {
                index |= 1 << axis;
            } else if max[axis] >= mid {
                return None;
            }
        }
        Some(index)
    }

    /// Region of child `index` under the numbering described on the type.
    fn child_region(&self, index: usize) -> Region {
        let mut min = self.region.min();
        let mut max = self.region.max();
        for axis in 0..self.config.dimensions().axes() {
            let mid = self.region.midpoint(axis);
            if index & (1 << axis) == 0 {
                max[axis] = mid;
            } else {
                min[axis] = mid;
            }
        }
        // Halves of a valid region are valid: min <= mid <= max per axis.
        Region::from_valid(min, max)
    }

    /// Materializes the children of a leaf. Leaves `items` untouched.
    fn split(&mut self) {
        debug_assert!(self.children.is_empty(), "split called on a split node");
        let count = self.config.dimensions().child_count();
        self.children = (0..count)
            .map(|index| Self::node(self.child_region(index), self.depth + 1, self.config))
            .collect();
        trace!(depth = self.depth, children = count, "split node");
    }

    /// Inserts `item`.
    ///
    /// A split node forwards the item to the child that fully contains it.
    /// Otherwise the item is appended here; if that pushes the node past its
    /// capacity while it is still above `max_depth`, the node splits (once)
    /// and every held item that now fits a child is pushed down.
    pub fn insert(&mut self, item: Item<T>) {
        if !self.children.is_empty() {
            if let Some(index) = self.classify(item.bounds()) {
                self.children[index].insert(item);
                return;
            }
        }

        self.items.push(item);

        if self.items.len() > self.config.capacity() && self.depth < self.config.max_depth() {
            if self.children.is_empty() {
                self.split();
            }
            self.redistribute();
        }
    }

    /// One pass over the held items in insertion order; items that fit a
    /// child move down, straddlers stay and keep their relative order.
    fn redistribute(&mut self) {
        let held = std::mem::take(&mut self.items);
        let before = held.len();
        for item in held {
            match self.classify(item.bounds()) {
                Some(index) => self.children[index].insert(item),
                None => self.items.push(item),
            }
        }
        trace!(
            depth = self.depth,
            moved = before - self.items.len(),
            kept = self.items.len(),
            "redistributed items"
        );
    }

    /// Returns every item that may overlap `query`.
    ///
    /// The result is a superset of the true overlaps; callers run their own
    /// exact test on it. Order: this node's items first, then the descent in
    /// child-index order.
    #[must_use]
    pub fn retrieve(&self, query: &Region) -> Vec<&Item<T>> {
        let mut out = Vec::new();
        self.retrieve_into(query, &mut out);
        out
    }

    /// Same as [`retrieve`](Self::retrieve) but appends into `out`, so a
    /// per-tick query loop can reuse one buffer.
    pub fn retrieve_into<'a>(&'a self, query: &Region, out: &mut Vec<&'a Item<T>>) {
        out.extend(self.items.iter());
        if self.children.is_empty() {
            return;
        }
        match self.classify(query) {
            Some(index) => self.children[index].retrieve_into(query, out),
            None => {
                for child in &self.children {
                    child.retrieve_into(query, out);
                }
            }
        }
    }

    /// Drops every item and every descendant, returning the node to an empty
    /// leaf. Region, depth and configuration are kept. Idempotent.
    pub fn clear(&mut self) {
        self.items.clear();
        self.children.clear();
    }

    /// Iterates over every stored item, pre-order: a node's items, then its
    /// children in index order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            stack: vec![self],
            current: [].iter(),
        }
    }

    /// Structural summary of this subtree.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        self.accumulate(&mut stats);
        stats
    }

    fn accumulate(&self, stats: &mut TreeStats) {
        stats.nodes += 1;
        stats.items += self.items.len();
        stats.max_items_in_node = stats.max_items_in_node.max(self.items.len());
        stats.max_depth_reached = stats.max_depth_reached.max(self.depth);
        if self.children.is_empty() {
            stats.leaves += 1;
        }
        for child in &self.children {
            child.accumulate(stats);
        }
    }
}

impl<T> Extend<Item<T>> for SpatialTree<T> {
    fn extend<I: IntoIterator<Item = Item<T>>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<'a, T> IntoIterator for &'a SpatialTree<T> {
    type Item = &'a Item<T>;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Pre-order iterator over the items of a [`SpatialTree`].
#[derive(Debug)]
pub struct Iter<'a, T> {
    stack: Vec<&'a SpatialTree<T>>,
    current: std::slice::Iter<'a, Item<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a Item<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.current.next() {
                return Some(item);
            }
            let node = self.stack.pop()?;
            self.current = node.items.iter();
            self.stack.extend(node.children.iter().rev());
        }
    }
}
