use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::ops::{BitOr, BitOrAssign};

use super::geometry::{DataRect, Interval, Orientation};

/// A curve sample: `x` is the primary coordinate, `y` the secondary one.
pub type CurvePoint = DVec2;

/// A corridor sample: a value on the primary axis and a band on the secondary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CorridorSample {
    pub value: f64,
    pub bound: Interval,
}

impl CorridorSample {
    pub const fn new(value: f64, lower: f64, upper: f64) -> Self {
        Self {
            value,
            bound: Interval::new(lower, upper),
        }
    }
}

/// Common behaviour of the sample types a series can hold.
///
/// `interpolate` must be exact at `t == 0.0` and `t == 1.0`, which is why the
/// implementations blend with `a * (1 - t) + b * t`.
pub trait Sample: Copy + Default + Send + Sync + 'static {
    /// Coordinate used to order and search samples along `orientation`.
    fn coordinate(&self, orientation: Orientation) -> f64;

    /// Copy of the sample with the search coordinate replaced.
    fn with_coordinate(self, orientation: Orientation, value: f64) -> Self;

    fn interpolate(&self, other: &Self, t: f64) -> Self;

    /// Area covered by the sample in data space.
    fn extent(&self) -> DataRect;

    /// Whether the extent along `orientation` is just the search coordinate.
    /// Only then do sorted coordinates bound the extent from the endpoints.
    fn is_point_along(orientation: Orientation) -> bool;
}

#[inline]
fn blend(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

impl Sample for DVec2 {
    fn coordinate(&self, orientation: Orientation) -> f64 {
        match orientation {
            Orientation::Horizontal => self.x,
            Orientation::Vertical => self.y,
        }
    }

    fn with_coordinate(mut self, orientation: Orientation, value: f64) -> Self {
        match orientation {
            Orientation::Horizontal => self.x = value,
            Orientation::Vertical => self.y = value,
        }
        self
    }

    fn interpolate(&self, other: &Self, t: f64) -> Self {
        DVec2::new(blend(self.x, other.x, t), blend(self.y, other.y, t))
    }

    fn extent(&self) -> DataRect {
        DataRect::from_point(*self)
    }

    fn is_point_along(_orientation: Orientation) -> bool {
        true
    }
}

/// Corridors are searched by `value` horizontally and by the lower bound
/// of the band vertically.
impl Sample for CorridorSample {
    fn coordinate(&self, orientation: Orientation) -> f64 {
        match orientation {
            Orientation::Horizontal => self.value,
            Orientation::Vertical => self.bound.lower,
        }
    }

    fn with_coordinate(mut self, orientation: Orientation, value: f64) -> Self {
        match orientation {
            Orientation::Horizontal => self.value = value,
            Orientation::Vertical => self.bound.lower = value,
        }
        self
    }

    fn interpolate(&self, other: &Self, t: f64) -> Self {
        CorridorSample {
            value: blend(self.value, other.value, t),
            bound: Interval::new(
                blend(self.bound.lower, other.bound.lower, t),
                blend(self.bound.upper, other.bound.upper, t),
            ),
        }
    }

    fn extent(&self) -> DataRect {
        DataRect::new(Interval::new(self.value, self.value), self.bound.normalized())
    }

    fn is_point_along(orientation: Orientation) -> bool {
        orientation == Orientation::Horizontal
    }
}

/// Caller supplied guarantees about a series. They are trusted, not checked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesHints(u8);

impl SeriesHints {
    pub const NONE: SeriesHints = SeriesHints(0);
    /// Primary coordinates are non-decreasing.
    pub const MONOTONIC_PRIMARY: SeriesHints = SeriesHints(1 << 0);
    /// Secondary coordinates are non-decreasing.
    pub const MONOTONIC_SECONDARY: SeriesHints = SeriesHints(1 << 1);
    /// The bounding rectangle may be used for clipping decisions.
    pub const HAS_BOUNDING_RECT: SeriesHints = SeriesHints(1 << 2);

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: SeriesHints) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn set(&mut self, other: SeriesHints, on: bool) {
        if on {
            self.0 |= other.0;
        } else {
            self.0 &= !other.0;
        }
    }

    pub const fn is_monotonic(self, orientation: Orientation) -> bool {
        match orientation {
            Orientation::Horizontal => self.contains(Self::MONOTONIC_PRIMARY),
            Orientation::Vertical => self.contains(Self::MONOTONIC_SECONDARY),
        }
    }
}

impl BitOr for SeriesHints {
    type Output = SeriesHints;

    fn bitor(self, rhs: SeriesHints) -> SeriesHints {
        SeriesHints(self.0 | rhs.0)
    }
}

impl BitOrAssign for SeriesHints {
    fn bitor_assign(&mut self, rhs: SeriesHints) {
        self.0 |= rhs.0;
    }
}
