use serde::{Deserialize, Serialize};

use super::geometry::{Interval, Orientation};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimeUnit {
    Seconds,
    Milliseconds,
    Microseconds,
    Nanoseconds,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum AxisFormat {
    #[default]
    Numeric,
    Time(TimeUnit),
}

/// The axes a view can scale items against.
///
/// Item axis pairs and per-axis view state are indexed by this enum, so an
/// axis outside the supported set cannot be expressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    XBottom,
    YLeft,
}

impl Axis {
    pub const COUNT: usize = 2;
    pub const ALL: [Axis; Axis::COUNT] = [Axis::XBottom, Axis::YLeft];

    pub const fn index(self) -> usize {
        match self {
            Axis::XBottom => 0,
            Axis::YLeft => 1,
        }
    }

    pub fn from_index(index: usize) -> Option<Axis> {
        Axis::ALL.get(index).copied()
    }

    pub const fn orientation(self) -> Orientation {
        match self {
            Axis::XBottom => Orientation::Horizontal,
            Axis::YLeft => Orientation::Vertical,
        }
    }

    pub const fn is_x(self) -> bool {
        matches!(self.orientation(), Orientation::Horizontal)
    }
}

/// Tick positions produced by a graduation, in data units.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TickSet {
    pub majors: Vec<f64>,
    pub mediums: Vec<f64>,
    pub minors: Vec<f64>,
}

impl TickSet {
    pub fn is_empty(&self) -> bool {
        self.majors.is_empty() && self.mediums.is_empty() && self.minors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.majors.len() + self.mediums.len() + self.minors.len()
    }
}

/// Boundary and tick state of one axis of a view.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisState {
    pub boundaries: Interval,
    pub ticks: TickSet,
    pub format: AxisFormat,
    pub boundaries_dirty: bool,
    pub ticks_dirty: bool,
}

impl AxisState {
    pub fn new(boundaries: Interval) -> Self {
        Self {
            boundaries,
            ticks: TickSet::default(),
            format: AxisFormat::Numeric,
            boundaries_dirty: true,
            ticks_dirty: true,
        }
    }

    pub fn span(&self) -> f64 {
        self.boundaries.width()
    }

    pub(crate) fn clear_dirty(&mut self) {
        self.boundaries_dirty = false;
        self.ticks_dirty = false;
    }
}

impl Default for AxisState {
    fn default() -> Self {
        Self::new(Interval::new(0.0, 100.0))
    }
}
