// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use thiserror::Error;

use crate::config::Dimensions;

/// Number of coordinate slots carried by every [`Region`].
///
/// Planar regions leave the `z` slot at `[0, 0]`; a tree running in
/// two-dimensional mode never looks at it.
pub const AXES: usize = 3;

/// Error returned when a box fails validation at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InvalidBoundsError {
    /// `min` is greater than `max` on `axis`.
    #[error("inverted bounds on axis {axis}: min {min} > max {max}")]
    Inverted {
        /// Axis index (0 = x, 1 = y, 2 = z).
        axis: usize,
        /// Offending minimum.
        min: f32,
        /// Offending maximum.
        max: f32,
    },
    /// A coordinate on `axis` is NaN or infinite.
    #[error("non-finite coordinate on axis {axis}")]
    NonFinite {
        /// Axis index (0 = x, 1 = y, 2 = z).
        axis: usize,
    },
    /// The corners do not carry the same number of coordinates, or carry
    /// something other than two or three.
    #[error("expected 2 or 3 coordinates per corner, got min={min} max={max}")]
    Arity {
        /// Coordinates supplied for the minimum corner.
        min: usize,
        /// Coordinates supplied for the maximum corner.
        max: usize,
    },
}

/// Axis-aligned box used both for node regions and for item bounds.
///
/// Invariants:
/// - `min[k] <= max[k]` on every axis.
/// - Every coordinate is finite.
///
/// Both are checked by the constructors, so tree operations never have to
/// re-validate a `Region`.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawRegion", into = "RawRegion")
)]
pub struct Region {
    min: [f32; AXES],
    max: [f32; AXES],
}

impl Region {
    /// Constructs a region from its minimum and maximum corners.
    pub fn new(min: [f32; AXES], max: [f32; AXES]) -> Result<Self, InvalidBoundsError> {
        for axis in 0..AXES {
            let (lo, hi) = (min[axis], max[axis]);
            if !lo.is_finite() || !hi.is_finite() {
                return Err(InvalidBoundsError::NonFinite { axis });
            }
            if lo > hi {
                return Err(InvalidBoundsError::Inverted {
                    axis,
                    min: lo,
                    max: hi,
                });
            }
        }
        Ok(Self { min, max })
    }

    /// Constructs a planar region; the `z` extent is pinned to `[0, 0]`.
    pub fn new_2d(min: [f32; 2], max: [f32; 2]) -> Result<Self, InvalidBoundsError> {
        Self::new([min[0], min[1], 0.0], [max[0], max[1], 0.0])
    }

    /// Builds a planar region from its origin corner and its width/height.
    pub fn from_origin_size_2d(
        origin: [f32; 2],
        size: [f32; 2],
    ) -> Result<Self, InvalidBoundsError> {
        Self::new_2d(
            [origin[0], origin[1]],
            [origin[0] + size[0], origin[1] + size[1]],
        )
    }

    /// Builds a region from its origin corner and its width/height/depth.
    pub fn from_origin_size(
        origin: [f32; AXES],
        size: [f32; AXES],
    ) -> Result<Self, InvalidBoundsError> {
        Self::new(
            origin,
            [
                origin[0] + size[0],
                origin[1] + size[1],
                origin[2] + size[2],
            ],
        )
    }

    /// Builds a region centered at `center` with the given half-extents.
    pub fn from_center_half_extents(
        center: [f32; AXES],
        half: [f32; AXES],
    ) -> Result<Self, InvalidBoundsError> {
        Self::new(
            [
                center[0] - half[0],
                center[1] - half[1],
                center[2] - half[2],
            ],
            [
                center[0] + half[0],
                center[1] + half[1],
                center[2] + half[2],
            ],
        )
    }

    /// Builds a region from coordinate lists of matching length 2 or 3.
    ///
    /// Two coordinates per corner give a planar region (see
    /// [`new_2d`](Self::new_2d)).
    pub fn from_slices(min: &[f32], max: &[f32]) -> Result<Self, InvalidBoundsError> {
        match (min, max) {
            (&[x0, y0], &[x1, y1]) => Self::new_2d([x0, y0], [x1, y1]),
            (&[x0, y0, z0], &[x1, y1, z1]) => Self::new([x0, y0, z0], [x1, y1, z1]),
            _ => Err(InvalidBoundsError::Arity {
                min: min.len(),
                max: max.len(),
            }),
        }
    }

    /// Builds a region from parts that are already known to be valid.
    pub(crate) const fn from_valid(min: [f32; AXES], max: [f32; AXES]) -> Self {
        Self { min, max }
    }

    /// Returns the minimum corner.
    #[must_use]
    pub const fn min(&self) -> [f32; AXES] {
        self.min
    }

    /// Returns the maximum corner.
    #[must_use]
    pub const fn max(&self) -> [f32; AXES] {
        self.max
    }

    /// Returns the extent along each axis.
    #[must_use]
    pub fn size(&self) -> [f32; AXES] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    /// Returns the midpoint of `axis`.
    ///
    /// Halves are summed rather than the width being halved so that extreme
    /// but finite bounds cannot overflow; the result is clamped back into
    /// `[min, max]` to absorb rounding on subnormal inputs.
    #[must_use]
    pub fn midpoint(&self, axis: usize) -> f32 {
        let (lo, hi) = (self.min[axis], self.max[axis]);
        (lo * 0.5 + hi * 0.5).clamp(lo, hi)
    }

    /// Returns the center point.
    #[must_use]
    pub fn center(&self) -> [f32; AXES] {
        [self.midpoint(0), self.midpoint(1), self.midpoint(2)]
    }

    /// Returns `true` if this region overlaps another on all three axes
    /// (inclusive on faces).
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.overlaps_in(other, Dimensions::Three)
    }

    /// Overlap test restricted to the axes active under `dims`; a planar
    /// tree compares footprints and ignores `z`.
    #[must_use]
    pub fn overlaps_in(&self, other: &Self, dims: Dimensions) -> bool {
        // Inclusive so that touching boxes still pair up in the broad phase.
        (0..dims.axes()).all(|k| self.min[k] <= other.max[k] && other.min[k] <= self.max[k])
    }

    /// Returns `true` if `other` lies entirely inside this region (faces
    /// included).
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        (0..AXES).all(|k| self.min[k] <= other.min[k] && other.max[k] <= self.max[k])
    }

    /// Returns the smallest region enclosing both inputs.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut min = self.min;
        let mut max = self.max;
        for k in 0..AXES {
            min[k] = min[k].min(other.min[k]);
            max[k] = max[k].max(other.max[k]);
        }
        Self { min, max }
    }

    /// Grows the region by a uniform margin `m` on every axis.
    ///
    /// A negative margin that would invert an axis, or a margin that pushes
    /// a coordinate out of `f32` range, is rejected.
    pub fn inflate(&self, m: f32) -> Result<Self, InvalidBoundsError> {
        Self::new(
            [self.min[0] - m, self.min[1] - m, self.min[2] - m],
            [self.max[0] + m, self.max[1] + m, self.max[2] + m],
        )
    }
}

/// Wire form of a [`Region`]: two coordinate lists of length 2 or 3.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RawRegion {
    min: Vec<f32>,
    max: Vec<f32>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawRegion> for Region {
    type Error = InvalidBoundsError;

    fn try_from(raw: RawRegion) -> Result<Self, Self::Error> {
        Self::from_slices(&raw.min, &raw.max)
    }
}

#[cfg(feature = "serde")]
impl From<Region> for RawRegion {
    fn from(region: Region) -> Self {
        Self {
            min: region.min.to_vec(),
            max: region.max.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_inverted_axis() {
        let err = Region::new([0.0, 5.0, 0.0], [1.0, 4.0, 0.0]).unwrap_err();
        assert_eq!(
            err,
            InvalidBoundsError::Inverted {
                axis: 1,
                min: 5.0,
                max: 4.0
            }
        );
    }

    #[test]
    fn rejects_non_finite() {
        let err = Region::new_2d([f32::NAN, 0.0], [1.0, 1.0]).unwrap_err();
        assert_eq!(err, InvalidBoundsError::NonFinite { axis: 0 });
        let err = Region::new([0.0; 3], [1.0, 1.0, f32::INFINITY]).unwrap_err();
        assert_eq!(err, InvalidBoundsError::NonFinite { axis: 2 });
    }

    #[test]
    fn degenerate_boxes_are_valid() {
        let point = Region::new([3.0; 3], [3.0; 3]).unwrap();
        assert_eq!(point.size(), [0.0; 3]);
        assert_eq!(point.center(), [3.0; 3]);
    }

    #[test]
    fn origin_size_matches_corner_form() {
        let a = Region::from_origin_size_2d([10.0, 10.0], [5.0, 5.0]).unwrap();
        let b = Region::new_2d([10.0, 10.0], [15.0, 15.0]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn midpoint_survives_extreme_bounds() {
        let r = Region::new_2d([-f32::MAX, -f32::MAX], [f32::MAX, f32::MAX]).unwrap();
        assert_eq!(r.midpoint(0), 0.0);
        assert!(r.midpoint(1).is_finite());
    }

    #[test]
    fn overlap_is_inclusive_on_faces() {
        let a = Region::new_2d([0.0, 0.0], [1.0, 1.0]).unwrap();
        let b = Region::new_2d([1.0, 0.0], [2.0, 1.0]).unwrap();
        let c = Region::new_2d([1.5, 0.0], [2.0, 1.0]).unwrap();
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn planar_overlap_ignores_z() {
        let low = Region::new([1.0, 1.0, 1.0], [5.0, 5.0, 2.0]).unwrap();
        let high = Region::new([1.0, 1.0, 80.0], [5.0, 5.0, 81.0]).unwrap();
        assert!(low.overlaps_in(&high, Dimensions::Two));
        assert!(!low.overlaps_in(&high, Dimensions::Three));
        assert!(!low.overlaps(&high));
    }

    #[test]
    fn slices_take_two_or_three_coordinates() {
        let planar = Region::from_slices(&[0.0, 1.0], &[2.0, 3.0]).unwrap();
        assert_eq!(planar, Region::new_2d([0.0, 1.0], [2.0, 3.0]).unwrap());
        let solid = Region::from_slices(&[0.0; 3], &[1.0; 3]).unwrap();
        assert_eq!(solid.max(), [1.0; 3]);
        assert_eq!(
            Region::from_slices(&[0.0, 0.0], &[1.0, 1.0, 1.0]),
            Err(InvalidBoundsError::Arity { min: 2, max: 3 })
        );
        assert!(matches!(
            Region::from_slices(&[2.0, 0.0], &[1.0, 1.0]),
            Err(InvalidBoundsError::Inverted { axis: 0, .. })
        ));
    }

    #[test]
    fn union_and_contains() {
        let a = Region::new_2d([0.0, 0.0], [1.0, 1.0]).unwrap();
        let b = Region::new_2d([4.0, -2.0], [5.0, 0.5]).unwrap();
        let u = a.union(&b);
        assert_eq!(u.min(), [0.0, -2.0, 0.0]);
        assert_eq!(u.max(), [5.0, 1.0, 0.0]);
        assert!(u.contains(&a));
        assert!(u.contains(&b));
        assert!(!a.contains(&u));
    }

    #[test]
    fn inflate_rejects_inverting_margin() {
        let a = Region::new_2d([0.0, 0.0], [1.0, 1.0]).unwrap();
        assert_eq!(
            a.inflate(0.5).unwrap(),
            Region::new([-0.5; 3], [1.5, 1.5, 0.5]).unwrap()
        );
        assert!(a.inflate(-1.0).is_err());
    }
}
