// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Box types shared by the tree and the broad phase.
//!
//! Determinism notes:
//! - Midpoints are computed the same way for classification and for child
//!   regions, so a box on a split plane always lands on the same side.
//! - Overlap is inclusive on faces to avoid pair churn on contact boundaries.

#[doc = "Caller items: a box plus an opaque payload."]
pub mod item;
#[doc = "Validated axis-aligned boxes."]
pub mod region;
