use serde::{Deserialize, Serialize};
use std::ops::{BitOr, BitOrAssign};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use super::axis::Axis;

/// What changed in a view since the last broadcast.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ChangeFlags(u8);

impl ChangeFlags {
    pub const NONE: ChangeFlags = ChangeFlags(0);
    pub const X_BOUNDARIES: ChangeFlags = ChangeFlags(1 << 0);
    pub const Y_BOUNDARIES: ChangeFlags = ChangeFlags(1 << 1);
    pub const X_TICKMARKS: ChangeFlags = ChangeFlags(1 << 2);
    pub const Y_TICKMARKS: ChangeFlags = ChangeFlags(1 << 3);
    pub const CANVAS_GEOMETRY: ChangeFlags = ChangeFlags(1 << 4);

    pub const fn boundaries(axis: Axis) -> ChangeFlags {
        match axis {
            Axis::XBottom => Self::X_BOUNDARIES,
            Axis::YLeft => Self::Y_BOUNDARIES,
        }
    }

    pub const fn tickmarks(axis: Axis) -> ChangeFlags {
        match axis {
            Axis::XBottom => Self::X_TICKMARKS,
            Axis::YLeft => Self::Y_TICKMARKS,
        }
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: ChangeFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn intersects(self, other: ChangeFlags) -> bool {
        self.0 & other.0 != 0
    }

    /// Any boundary or tick change, canvas geometry excluded.
    pub const fn affects_axes(self) -> bool {
        self.0 & !Self::CANVAS_GEOMETRY.0 != 0
    }
}

impl BitOr for ChangeFlags {
    type Output = ChangeFlags;

    fn bitor(self, rhs: ChangeFlags) -> ChangeFlags {
        ChangeFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for ChangeFlags {
    fn bitor_assign(&mut self, rhs: ChangeFlags) {
        self.0 |= rhs.0;
    }
}

/// A coalescing repaint request.
///
/// Any number of [`notify`](Self::notify) calls between two
/// [`take`](Self::take) calls amount to a single pending request.
#[derive(Debug, Default)]
pub struct ChangeSignal {
    pending: AtomicBool,
    delivered: AtomicU64,
}

impl ChangeSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a repaint. Returns `true` if this call raised the request.
    pub fn notify(&self) -> bool {
        let raised = !self.pending.swap(true, Ordering::AcqRel);
        if raised {
            self.delivered.fetch_add(1, Ordering::Relaxed);
        }
        raised
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Consumes the pending request.
    pub fn take(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }

    /// Number of requests raised so far, coalesced ones not counted.
    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }
}

/// Space in which an item emits its vertices.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoordinateSpace {
    /// Vertices are in pixels; the item rebuilds on canvas changes.
    Canvas,
    /// Vertices are in data units and mapped by the node matrix.
    #[default]
    Plot,
}

/// Whether an item created its series itself or was handed a shared one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Ownership {
    Owned,
    Borrowed,
}

/// Key of an item attached to a view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub(crate) u64);

impl ItemId {
    pub fn raw(self) -> u64 {
        self.0
    }
}
