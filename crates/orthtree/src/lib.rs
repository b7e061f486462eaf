// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![doc = r"Region quadtree/octree for broad-phase candidate queries.

This crate provides:
- Validated axis-aligned boxes (`Region`) and caller items (`Item`).
- A single recursive node type (`SpatialTree`) that runs as a quadtree or an
  octree depending on `TreeConfig::dimensions`.
- A `BroadPhase` trait with a tree-backed implementation and an all-pairs
  baseline.

Design notes:
- Deterministic: child numbering is fixed (bit `k` = high half of axis `k`),
  midpoint ties go to the high half, and pair outputs are canonical.
- Float32 throughout; malformed boxes are rejected when a `Region` is built,
  so tree operations themselves cannot fail.
- The tree only narrows candidates; exact overlap tests belong to the caller.
"]

/// Broad-phase pairing on top of the tree.
pub mod broad;
/// Tree configuration and its validation.
pub mod config;
/// The recursive region tree.
pub mod tree;
/// Foundational box types.
pub mod types;

pub use broad::tree_broad_phase::{BroadPhase, BruteForceBroadPhase, TreeBroadPhase};
pub use config::{ConfigError, Dimensions, TreeConfig, MAX_DEPTH_LIMIT};
pub use tree::node::{Iter, SpatialTree};
pub use tree::stats::TreeStats;
pub use types::item::Item;
pub use types::region::{InvalidBoundsError, Region, AXES};
