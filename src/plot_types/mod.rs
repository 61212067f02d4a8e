// Plot item types

pub mod corridor;
pub mod cursor;
pub mod curve;

pub use corridor::PlotCorridor;
pub use cursor::{PlotCursor, Probe};
pub use curve::PlotCurve;

use glam::DVec2;
use std::any::Any;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::data_types::{
    Axis, AxisState, CanvasRect, ChangeFlags, ChangeSignal, CoordinateSpace, DataRect, Orientation,
};
use crate::rendering::PlotNode;
use crate::transform::PlotTransform;

static VIEW_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Identity of a [`PlotView`](crate::view::PlotView).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(u64);

impl ViewId {
    pub(crate) fn next() -> Self {
        Self(VIEW_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// What an item sees of the view while rebuilding its node.
pub struct RenderContext<'a> {
    /// Transform of the item's axis pair.
    pub transform: &'a PlotTransform,
    pub canvas: CanvasRect,
    /// Data range covered by the canvas, `None` if the transform is singular.
    pub visible: Option<DataRect>,
    pub x_axis: &'a AxisState,
    pub y_axis: &'a AxisState,
}

/// State shared by every item type.
#[derive(Debug, Clone)]
pub struct ItemBase {
    title: String,
    x_axis: Axis,
    y_axis: Axis,
    z: f64,
    space: CoordinateSpace,
    visible: bool,
    dirty: bool,
    built_version: Option<u64>,
    view: Option<ViewId>,
    repaint: Option<Arc<ChangeSignal>>,
}

impl ItemBase {
    pub fn new(space: CoordinateSpace) -> Self {
        Self {
            title: String::new(),
            x_axis: Axis::XBottom,
            y_axis: Axis::YLeft,
            z: 0.0,
            space,
            visible: true,
            dirty: true,
            built_version: None,
            view: None,
            repaint: None,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.mark_dirty();
    }

    pub fn x_axis(&self) -> Axis {
        self.x_axis
    }

    pub fn y_axis(&self) -> Axis {
        self.y_axis
    }

    pub fn set_axes(&mut self, x_axis: Axis, y_axis: Axis) {
        if (self.x_axis, self.y_axis) != (x_axis, y_axis) {
            self.x_axis = x_axis;
            self.y_axis = y_axis;
            self.mark_dirty();
        }
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    /// Sets the z of a detached item. Attached items are re-sorted through
    /// [`PlotView::set_item_z`](crate::view::PlotView::set_item_z).
    pub fn set_z(&mut self, z: f64) {
        self.z = z;
    }

    pub fn coordinate_space(&self) -> CoordinateSpace {
        self.space
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            self.visible = visible;
            self.mark_dirty();
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Requests a geometry rebuild on the next paint.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
        self.request_repaint();
    }

    pub fn view(&self) -> Option<ViewId> {
        self.view
    }

    pub fn is_attached(&self) -> bool {
        self.view.is_some()
    }

    pub fn request_repaint(&self) {
        if let Some(signal) = &self.repaint {
            signal.notify();
        }
    }

    pub(crate) fn repaint_signal(&self) -> Option<&Arc<ChangeSignal>> {
        self.repaint.as_ref()
    }

    pub(crate) fn attach(&mut self, view: ViewId, repaint: Arc<ChangeSignal>) {
        self.view = Some(view);
        self.repaint = Some(repaint);
        self.dirty = true;
        self.built_version = None;
    }

    pub(crate) fn detach(&mut self) {
        self.view = None;
        self.repaint = None;
    }

    pub(crate) fn built(&mut self, version: Option<u64>) {
        self.dirty = false;
        self.built_version = version;
    }

    pub(crate) fn built_version(&self) -> Option<u64> {
        self.built_version
    }

    pub(crate) fn set_dirty_silently(&mut self) {
        self.dirty = true;
    }
}

/// An item hosted by a [`PlotView`](crate::view::PlotView).
pub trait PlotItem: Send + Sync + Any {
    fn base(&self) -> &ItemBase;

    fn base_mut(&mut self) -> &mut ItemBase;

    /// Rebuilds the primitives of `node`. Plot space vertices are relative
    /// to `node.origin`, which the view has already set; the view sets the
    /// node matrix afterwards.
    fn update_node(&mut self, ctx: &RenderContext<'_>, node: &mut PlotNode);

    /// Reacts to a change broadcast of the view.
    ///
    /// Plot space items ignore a lone canvas geometry change since their
    /// node matrix already follows the canvas; anything else, or any change
    /// for a canvas space item, requests a rebuild.
    fn view_changed(&mut self, flags: ChangeFlags) {
        if flags.is_empty() {
            return;
        }
        let base = self.base_mut();
        if base.coordinate_space() == CoordinateSpace::Plot && !flags.affects_axes() {
            return;
        }
        base.set_dirty_silently();
    }

    /// Version of the displayed series; a change triggers a rebuild.
    fn data_version(&self) -> Option<u64> {
        None
    }

    /// Data extent for auto-scaling.
    fn bounding_rect(&self) -> Option<DataRect> {
        None
    }

    /// Data points of this item at `position` along `orientation`, for
    /// cursor readouts.
    fn probe(&self, _orientation: Orientation, _position: f64) -> Vec<DVec2> {
        Vec::new()
    }

    /// Position a cursor item wants its siblings probed at.
    fn cursor_request(&self) -> Option<(Orientation, f64)> {
        None
    }

    fn set_probes(&mut self, _probes: Vec<Probe>) {}

    /// Links the item's series to the view's repaint signal.
    fn observe_data(&mut self, _signal: &Arc<ChangeSignal>) {}

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}
