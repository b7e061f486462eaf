// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Tree configuration: dimension mode, node capacity, and depth ceiling.

use thiserror::Error;

/// Deepest `max_depth` accepted by [`TreeConfig::validate`].
///
/// Past this point `f32` child regions stop shrinking for any realistic world
/// size, so further levels would only add recursion.
pub const MAX_DEPTH_LIMIT: u32 = 32;

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Only planar (2) and volumetric (3) trees exist.
    #[error("unsupported dimension count {0}; expected 2 or 3")]
    UnsupportedDimensions(u8),
    /// A node must be able to hold at least one item.
    #[error("capacity must be at least 1")]
    ZeroCapacity,
    /// `max_depth` above [`MAX_DEPTH_LIMIT`].
    #[error("max_depth {0} exceeds the limit of {}", MAX_DEPTH_LIMIT)]
    DepthLimit(u32),
}

/// Number of active axes, selecting quadtree or octree mode.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u8", into = "u8")
)]
pub enum Dimensions {
    /// x and y; four children per split.
    #[default]
    Two,
    /// x, y and z; eight children per split.
    Three,
}

impl Dimensions {
    /// Number of axes considered by classification.
    #[must_use]
    pub const fn axes(self) -> usize {
        match self {
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    /// Children created by a split (`2^axes`).
    #[must_use]
    pub const fn child_count(self) -> usize {
        1 << self.axes()
    }
}

impl TryFrom<u8> for Dimensions {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            other => Err(ConfigError::UnsupportedDimensions(other)),
        }
    }
}

impl From<Dimensions> for u8 {
    fn from(dims: Dimensions) -> Self {
        match dims {
            Dimensions::Two => 2,
            Dimensions::Three => 3,
        }
    }
}

/// Settings shared by every node of one tree.
///
/// Defaults: two dimensions, capacity 10, max depth 4. Missing fields in a
/// serialized config take these defaults.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct TreeConfig {
    dimensions: Dimensions,
    capacity: usize,
    max_depth: u32,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            dimensions: Dimensions::Two,
            capacity: 10,
            max_depth: 4,
        }
    }
}

impl TreeConfig {
    /// Builds and validates a configuration.
    pub fn new(
        dimensions: Dimensions,
        capacity: usize,
        max_depth: u32,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            dimensions,
            capacity,
            max_depth,
        };
        config.validate()?;
        Ok(config)
    }

    /// Replaces the dimension mode.
    #[must_use]
    pub const fn with_dimensions(mut self, dimensions: Dimensions) -> Self {
        self.dimensions = dimensions;
        self
    }

    /// Replaces the per-node capacity.
    #[must_use]
    pub const fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Replaces the depth ceiling.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Checks every field against its supported range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.max_depth > MAX_DEPTH_LIMIT {
            return Err(ConfigError::DepthLimit(self.max_depth));
        }
        Ok(())
    }

    /// Dimension mode.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Items a node holds before it attempts to split.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Deepest level at which nodes may still be created.
    #[must_use]
    pub const fn max_depth(&self) -> u32 {
        self.max_depth
    }
}
