use glam::{DVec2, Vec2};
use serde::{Deserialize, Serialize};

/// Direction along which a series is probed or searched.
///
/// `Horizontal` works on the primary (x) coordinate, `Vertical` on the
/// secondary (y) coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// Closed interval `[lower, upper]` in data units.
///
/// The bounds are stored as given: an interval with `lower > upper` is
/// representable and reported as invalid rather than silently swapped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub lower: f64,
    pub upper: f64,
}

impl Interval {
    pub const fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// True when both bounds are finite and `lower <= upper`.
    pub fn is_valid(&self) -> bool {
        self.lower.is_finite() && self.upper.is_finite() && self.lower <= self.upper
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }

    pub fn intersects(&self, other: &Interval) -> bool {
        self.lower <= other.upper && other.lower <= self.upper
    }

    /// Smallest interval covering both.
    pub fn united(&self, other: &Interval) -> Interval {
        Interval::new(self.lower.min(other.lower), self.upper.max(other.upper))
    }

    pub fn extend_to(&mut self, value: f64) {
        self.lower = self.lower.min(value);
        self.upper = self.upper.max(value);
    }

    /// Interval with the bounds swapped if needed.
    pub fn normalized(&self) -> Interval {
        if self.lower <= self.upper {
            *self
        } else {
            Interval::new(self.upper, self.lower)
        }
    }

    /// An "empty" accumulator suitable for folding with [`Interval::extend_to`].
    pub(crate) fn inverted_infinite() -> Interval {
        Interval::new(f64::INFINITY, f64::NEG_INFINITY)
    }
}

/// Axis aligned rectangle in data space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DataRect {
    pub x: Interval,
    pub y: Interval,
}

impl DataRect {
    pub const fn new(x: Interval, y: Interval) -> Self {
        Self { x, y }
    }

    pub fn from_point(point: DVec2) -> Self {
        Self {
            x: Interval::new(point.x, point.x),
            y: Interval::new(point.y, point.y),
        }
    }

    pub fn width(&self) -> f64 {
        self.x.width()
    }

    pub fn height(&self) -> f64 {
        self.y.width()
    }

    pub fn united(&self, other: &DataRect) -> DataRect {
        DataRect::new(self.x.united(&other.x), self.y.united(&other.y))
    }

    pub fn is_valid(&self) -> bool {
        self.x.is_valid() && self.y.is_valid()
    }

    pub fn interval(&self, orientation: Orientation) -> Interval {
        match orientation {
            Orientation::Horizontal => self.x,
            Orientation::Vertical => self.y,
        }
    }

    pub(crate) fn interval_mut(&mut self, orientation: Orientation) -> &mut Interval {
        match orientation {
            Orientation::Horizontal => &mut self.x,
            Orientation::Vertical => &mut self.y,
        }
    }
}

/// Rectangle in canvas (device pixel) coordinates, y growing downwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CanvasRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl CanvasRect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left && point.x <= self.right() && point.y >= self.top && point.y <= self.bottom()
    }

    /// Moves a box of `size` anchored at `top_left` so that it stays inside
    /// the rectangle. Boxes larger than the rectangle stick to its top-left.
    pub fn clamp_box(&self, top_left: Vec2, size: Vec2) -> Vec2 {
        let max_x = (self.right() - size.x).max(self.left);
        let max_y = (self.bottom() - size.y).max(self.top);
        Vec2::new(top_left.x.clamp(self.left, max_x), top_left.y.clamp(self.top, max_y))
    }
}
