// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

/// Structural summary returned by [`SpatialTree::stats`](crate::SpatialTree::stats).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeStats {
    /// Nodes in the subtree, the root included.
    pub nodes: usize,
    /// Nodes that have not been split.
    pub leaves: usize,
    /// Stored items.
    pub items: usize,
    /// Deepest node depth present.
    pub max_depth_reached: u32,
    /// Largest item list held by a single node.
    pub max_items_in_node: usize,
}
