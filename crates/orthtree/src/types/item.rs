// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use super::region::Region;

/// A caller-owned box stored in a [`SpatialTree`](crate::SpatialTree).
///
/// `payload` is opaque to the tree: it is carried along and handed back by
/// queries but never inspected. Use a cheap handle (an id, an index, or a
/// reference) rather than the object itself.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Item<T> {
    bounds: Region,
    payload: T,
}

impl<T> Item<T> {
    /// Pairs a bounding box with its payload.
    #[must_use]
    pub const fn new(bounds: Region, payload: T) -> Self {
        Self { bounds, payload }
    }

    /// Bounding box used for classification.
    #[must_use]
    pub const fn bounds(&self) -> &Region {
        &self.bounds
    }

    /// Caller payload.
    #[must_use]
    pub const fn payload(&self) -> &T {
        &self.payload
    }

    /// Consumes the item and returns its payload.
    #[must_use]
    pub fn into_payload(self) -> T {
        self.payload
    }
}
