// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Pairing boxes through the region tree.
//!
//! Every [`BroadPhase`](tree_broad_phase::BroadPhase) here reports a pair as
//! `(smaller id, larger id)` in a list that ascends with no repeats. Boxes
//! that only touch on a face still pair up. Only the axes active under the
//! tree's [`Dimensions`](crate::Dimensions) are compared, so a planar broad
//! phase pairs boxes by their xy footprint.

#[doc = "Tree-backed broad phase, the all-pairs baseline, and the trait."]
pub mod tree_broad_phase;
