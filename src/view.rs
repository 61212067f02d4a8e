//! The plot canvas: axis state, the item registry and the paint pass.

use glam::{DAffine2, DVec2, Vec2};
use std::sync::Arc;
use tracing::{debug, info, trace};

use crate::data_types::{
    Axis, AxisFormat, AxisState, CanvasRect, ChangeFlags, ChangeSignal, CoordinateSpace, DataRect,
    Interval, ItemId, Orientation, PlotConfig, TickSet,
};
use crate::plot_types::{ItemBase, PlotCursor, PlotItem, Probe, RenderContext, ViewId};
use crate::rendering::PlotNode;
use crate::scales::{Graduation, LinearGraduation};
use crate::transform::PlotTransform;

/// Outcome of one [`PlotView::paint`] pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PaintStats {
    /// Changes broadcast to the items in this pass.
    pub flags: ChangeFlags,
    /// Items whose node geometry was rebuilt.
    pub rebuilt: usize,
    /// Nodes of detached items waiting in [`PlotView::take_retired_nodes`].
    pub retired: usize,
}

struct Entry {
    id: ItemId,
    z: f64,
    item: Box<dyn PlotItem>,
    node: PlotNode,
}

/// A canvas displaying items against a pair of axes.
///
/// Items are owned by the view while attached and kept in ascending z order;
/// items with equal z keep their attach order. Mutations only record what
/// changed and raise the repaint signal; the work happens in
/// [`paint`](Self::paint).
pub struct PlotView {
    id: ViewId,
    config: PlotConfig,
    graduation: Box<dyn Graduation>,
    axes: [AxisState; Axis::COUNT],
    canvas: CanvasRect,
    entries: Vec<Entry>,
    next_item: u64,
    retired: Vec<ItemId>,
    pending: ChangeFlags,
    signal: Arc<ChangeSignal>,
}

impl PlotView {
    pub fn new(config: PlotConfig) -> Self {
        let config = config.validated();
        let mut axes = [AxisState::default(), AxisState::default()];
        axes[Axis::XBottom.index()].format = config.x_format;
        axes[Axis::YLeft.index()].format = config.y_format;

        let mut view = Self {
            id: ViewId::next(),
            config,
            graduation: Box::new(LinearGraduation),
            axes,
            canvas: CanvasRect::default(),
            entries: Vec::new(),
            next_item: 0,
            retired: Vec::new(),
            pending: ChangeFlags::NONE,
            signal: Arc::new(ChangeSignal::new()),
        };
        view.regraduate_all();
        info!(view = ?view.id, "plot view created");
        view
    }

    /// Replaces the tick generator and recomputes all ticks.
    pub fn with_graduation(mut self, graduation: impl Graduation + 'static) -> Self {
        self.graduation = Box::new(graduation);
        self.regraduate_all();
        self
    }

    fn regraduate_all(&mut self) {
        for axis in Axis::ALL {
            let ticks = self.graduate(self.axes[axis.index()].boundaries);
            let state = &mut self.axes[axis.index()];
            if state.ticks != ticks {
                state.ticks = ticks;
                state.ticks_dirty = true;
                self.pending |= ChangeFlags::tickmarks(axis);
            }
        }
    }

    fn graduate(&self, interval: Interval) -> TickSet {
        self.graduation.graduate(
            interval.lower,
            interval.upper,
            self.config.min_ticks,
            self.config.max_ticks,
        )
    }

    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    /// The coalescing repaint request of this view.
    pub fn signal(&self) -> &Arc<ChangeSignal> {
        &self.signal
    }

    pub fn needs_repaint(&self) -> bool {
        self.signal.is_pending()
    }

    pub fn axis_state(&self, axis: Axis) -> &AxisState {
        &self.axes[axis.index()]
    }

    pub fn boundaries(&self, axis: Axis) -> Interval {
        self.axes[axis.index()].boundaries
    }

    /// Sets the boundaries of `axis` and regraduates it.
    ///
    /// Setting the current boundaries again changes nothing. Otherwise the
    /// boundaries are always flagged, the ticks only if they differ from the
    /// previous set.
    pub fn set_boundaries(&mut self, axis: Axis, boundaries: Interval) {
        if self.axes[axis.index()].boundaries == boundaries {
            return;
        }
        let ticks = self.graduate(boundaries);
        let state = &mut self.axes[axis.index()];
        state.boundaries = boundaries;
        state.boundaries_dirty = true;
        let mut flags = ChangeFlags::boundaries(axis);
        if state.ticks != ticks {
            state.ticks = ticks;
            state.ticks_dirty = true;
            flags |= ChangeFlags::tickmarks(axis);
        }
        self.pending |= flags;
        debug!(
            ?axis,
            lower = boundaries.lower,
            upper = boundaries.upper,
            ticks_changed = flags.contains(ChangeFlags::tickmarks(axis)),
            "boundaries changed"
        );
        self.signal.notify();
    }

    pub fn tickmarks(&self, axis: Axis) -> &TickSet {
        &self.axes[axis.index()].ticks
    }

    pub fn set_axis_format(&mut self, axis: Axis, format: AxisFormat) {
        let state = &mut self.axes[axis.index()];
        if state.format != format {
            state.format = format;
            state.ticks_dirty = true;
            self.pending |= ChangeFlags::tickmarks(axis);
            self.signal.notify();
        }
    }

    pub fn canvas_rect(&self) -> CanvasRect {
        self.canvas
    }

    pub fn set_canvas_rect(&mut self, canvas: CanvasRect) {
        if self.canvas == canvas {
            return;
        }
        debug!(
            width = canvas.width,
            height = canvas.height,
            "canvas resized"
        );
        self.canvas = canvas;
        self.pending |= ChangeFlags::CANVAS_GEOMETRY;
        self.signal.notify();
    }

    /// Data to canvas transform of an axis pair.
    pub fn transformation(&self, x_axis: Axis, y_axis: Axis) -> PlotTransform {
        transformation_for(&self.axes, self.canvas, x_axis, y_axis)
    }

    /// The canvas mapped back into the data space of an axis pair.
    pub fn visible_rect(&self, x_axis: Axis, y_axis: Axis) -> Option<DataRect> {
        self.transformation(x_axis, y_axis).visible_rect()
    }

    /// Attaches an item and returns its key.
    pub fn attach(&mut self, item: impl PlotItem) -> ItemId {
        self.attach_boxed(Box::new(item))
    }

    pub fn attach_boxed(&mut self, mut item: Box<dyn PlotItem>) -> ItemId {
        let id = ItemId(self.next_item);
        self.next_item += 1;
        item.base_mut().attach(self.id, self.signal.clone());
        item.observe_data(&self.signal);

        let z = item.base().z();
        debug!(item = id.raw(), z, title = item.base().title(), "item attached");
        self.insert(Entry {
            id,
            z,
            item,
            node: PlotNode::new(id, z),
        });
        self.signal.notify();
        id
    }

    fn insert(&mut self, entry: Entry) {
        let index = self.entries.partition_point(|e| e.z <= entry.z);
        self.entries.insert(index, entry);
    }

    fn position(&self, id: ItemId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    /// Detaches an item and hands it back. Its node is queued for the host
    /// to release.
    pub fn detach(&mut self, id: ItemId) -> Option<Box<dyn PlotItem>> {
        let index = self.position(id)?;
        let mut entry = self.entries.remove(index);
        entry.item.base_mut().detach();
        self.retired.push(id);
        debug!(item = id.raw(), "item detached");
        self.signal.notify();
        Some(entry.item)
    }

    /// Detaches and drops an item.
    pub fn remove(&mut self, id: ItemId) -> bool {
        self.detach(id).is_some()
    }

    /// Moves an item in the stacking order. Its node is recreated.
    pub fn set_item_z(&mut self, id: ItemId, z: f64) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        let mut entry = self.entries.remove(index);
        entry.z = z;
        entry.item.base_mut().set_z(z);
        entry.item.base_mut().set_dirty_silently();
        entry.node = PlotNode::new(id, z);
        self.insert(entry);
        self.signal.notify();
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.position(id).is_some()
    }

    pub fn item(&self, id: ItemId) -> Option<&dyn PlotItem> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.item.as_ref())
    }

    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut dyn PlotItem> {
        self.entries
            .iter_mut()
            .find(|e| e.id == id)
            .map(|e| e.item.as_mut())
    }

    pub fn item_as<T: PlotItem>(&self, id: ItemId) -> Option<&T> {
        self.item(id)?.as_any().downcast_ref()
    }

    pub fn item_as_mut<T: PlotItem>(&mut self, id: ItemId) -> Option<&mut T> {
        self.item_mut(id)?.as_any_mut().downcast_mut()
    }

    /// Attached items in ascending z order.
    pub fn items(&self) -> impl Iterator<Item = (ItemId, &dyn PlotItem)> {
        self.entries.iter().map(|e| (e.id, e.item.as_ref()))
    }

    /// Scene nodes in drawing order.
    pub fn nodes(&self) -> impl Iterator<Item = &PlotNode> {
        self.entries.iter().map(|e| &e.node)
    }

    pub fn node(&self, id: ItemId) -> Option<&PlotNode> {
        self.entries.iter().find(|e| e.id == id).map(|e| &e.node)
    }

    /// Keys of the nodes dropped since the last call.
    pub fn take_retired_nodes(&mut self) -> Vec<ItemId> {
        std::mem::take(&mut self.retired)
    }

    /// Moves a cursor item under a canvas point.
    ///
    /// Returns `false` if `id` is not an attached [`PlotCursor`] or the
    /// transform of its axes is singular.
    pub fn set_cursor_canvas_position(&mut self, id: ItemId, point: Vec2) -> bool {
        let Some((x_axis, y_axis)) = self
            .item(id)
            .map(|item| (item.base().x_axis(), item.base().y_axis()))
        else {
            return false;
        };
        let transform = self.transformation(x_axis, y_axis);
        self.item_as_mut::<PlotCursor>(id)
            .is_some_and(|cursor| cursor.set_canvas_position(point, &transform))
    }

    /// Union of the bounding rects of the visible items scaled against
    /// `axis`, along that axis.
    pub fn items_extent(&self, axis: Axis) -> Option<Interval> {
        let orientation = axis.orientation();
        self.entries
            .iter()
            .filter(|e| {
                let base = e.item.base();
                base.is_visible() && (base.x_axis() == axis || base.y_axis() == axis)
            })
            .filter_map(|e| e.item.bounding_rect())
            .map(|rect| rect.interval(orientation))
            .reduce(|a, b| a.united(&b))
    }

    /// Brings every node up to date.
    ///
    /// Accumulated changes are broadcast once to every item, items whose
    /// series changed are marked for rebuild, then dirty items rebuild their
    /// node. Node matrices always follow the current transforms.
    pub fn paint(&mut self) -> PaintStats {
        self.update_probes();
        self.signal.take();

        let flags = std::mem::take(&mut self.pending);
        if !flags.is_empty() {
            for entry in &mut self.entries {
                entry.item.view_changed(flags);
            }
        }

        let axes = &self.axes;
        let canvas = self.canvas;
        let mut rebuilt = 0;
        for entry in &mut self.entries {
            let version = entry.item.data_version();
            let base = entry.item.base_mut();
            if version.is_some() && version != base.built_version() {
                base.set_dirty_silently();
            }

            let transform = transformation_for(axes, canvas, base.x_axis(), base.y_axis());
            let space = base.coordinate_space();
            entry.node.z = entry.z;
            if base.is_dirty() {
                let visible = transform.visible_rect();
                entry.node.origin = match (space, visible) {
                    (CoordinateSpace::Plot, Some(rect)) => DVec2::new(rect.x.lower, rect.y.lower),
                    _ => DVec2::ZERO,
                };
                let ctx = RenderContext {
                    transform: &transform,
                    canvas,
                    visible,
                    x_axis: &axes[base.x_axis().index()],
                    y_axis: &axes[base.y_axis().index()],
                };
                entry.item.update_node(&ctx, &mut entry.node);
                entry.item.base_mut().built(version);
                rebuilt += 1;
                trace!(
                    item = entry.id.raw(),
                    vertices = entry.node.vertex_count(),
                    "node rebuilt"
                );
            }

            entry.node.matrix = match space {
                CoordinateSpace::Plot => {
                    transform.matrix() * DAffine2::from_translation(entry.node.origin)
                }
                CoordinateSpace::Canvas => DAffine2::IDENTITY,
            };
            // Clips cover the whole canvas and follow it across resizes.
            if let Some(clip) = entry.node.clip.as_mut() {
                *clip = canvas;
            }
        }

        for state in &mut self.axes {
            state.clear_dirty();
        }

        let stats = PaintStats {
            flags,
            rebuilt,
            retired: self.retired.len(),
        };
        debug!(?flags, rebuilt, retired = stats.retired, items = self.entries.len(), "paint");
        stats
    }

    /// Reads the siblings of every positioned cursor.
    fn update_probes(&mut self) {
        let requests: Vec<(usize, Orientation, f64)> = self
            .entries
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.item.cursor_request().map(|(o, p)| (i, o, p)))
            .collect();

        for (index, orientation, position) in requests {
            let probes = self.probe_siblings(index, orientation, position);
            self.entries[index].item.set_probes(probes);
        }
    }

    fn probe_siblings(&self, cursor: usize, orientation: Orientation, position: f64) -> Vec<Probe> {
        let mut probes = Vec::new();
        for (i, entry) in self.entries.iter().enumerate() {
            let base: &ItemBase = entry.item.base();
            if i == cursor || !base.is_visible() {
                continue;
            }
            let transform = self.transformation(base.x_axis(), base.y_axis());
            let value_axis = match orientation {
                Orientation::Horizontal => base.y_axis(),
                Orientation::Vertical => base.x_axis(),
            };
            let state = &self.axes[value_axis.index()];
            for point in entry.item.probe(orientation, position) {
                let value = match orientation {
                    Orientation::Horizontal => point.y,
                    Orientation::Vertical => point.x,
                };
                probes.push(Probe {
                    item: entry.id,
                    value,
                    anchor: transform.data_to_canvas(point),
                    format: state.format,
                    span: state.span(),
                });
            }
        }
        probes
    }
}

impl Default for PlotView {
    fn default() -> Self {
        Self::new(PlotConfig::default())
    }
}

fn transformation_for(
    axes: &[AxisState; Axis::COUNT],
    canvas: CanvasRect,
    x_axis: Axis,
    y_axis: Axis,
) -> PlotTransform {
    let rect = DataRect::new(axes[x_axis.index()].boundaries, axes[y_axis.index()].boundaries);
    PlotTransform::new(rect, canvas)
}
