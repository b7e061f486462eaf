// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! The recursive region tree.
//!
//! A node is either a leaf or split into `2^d` equal children; the only
//! transition is leaf → split, undone only by `clear()`.

#[doc = "`SpatialTree` node type and its item iterator."]
pub mod node;
#[doc = "Structural summary of a tree."]
pub mod stats;
