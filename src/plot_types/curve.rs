use glam::DVec2;
use parking_lot::RwLock;
use std::any::Any;
use std::sync::Arc;
use tracing::trace;

use super::{ItemBase, PlotItem, RenderContext};
use crate::data_types::{
    shared, ChangeSignal, CoordinateSpace, CurveConfig, CurveData, CurvePoint, CurveSeries,
    DataRect, Interval, Orientation, Ownership, Sample, SeriesData, SeriesHints, SharedSeries,
};
use crate::rendering::{build_curve_strip, needs_clipping, PlotNode, Primitive};

type CurveSource = Arc<RwLock<dyn SeriesData<Sample = CurvePoint>>>;

/// Polyline through the points of a series.
pub struct PlotCurve {
    base: ItemBase,
    data: CurveSource,
    ownership: Ownership,
    config: CurveConfig,
}

impl PlotCurve {
    /// Creates a curve owning `data`.
    pub fn new(data: CurveData) -> Self {
        Self::from_source(shared(data), Ownership::Owned)
    }

    /// Creates a curve displaying a series the application keeps writing to.
    pub fn with_shared<D>(data: SharedSeries<D>) -> Self
    where
        D: SeriesData<Sample = CurvePoint> + 'static,
    {
        Self::from_source(data, Ownership::Borrowed)
    }

    fn from_source(data: CurveSource, ownership: Ownership) -> Self {
        Self {
            base: ItemBase::new(CoordinateSpace::Plot),
            data,
            ownership,
            config: CurveConfig::default(),
        }
    }

    pub fn with_config(mut self, config: CurveConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.base.set_title(title);
        self
    }

    pub fn data(&self) -> &CurveSource {
        &self.data
    }

    pub fn ownership(&self) -> Ownership {
        self.ownership
    }

    pub fn config(&self) -> &CurveConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: CurveConfig) {
        if self.config != config {
            self.config = config;
            self.base.mark_dirty();
        }
    }

    /// Replaces the displayed series with one owned by the curve.
    pub fn set_data(&mut self, data: CurveData) {
        self.data = shared(data);
        self.ownership = Ownership::Owned;
        if let Some(signal) = self.base.repaint_signal().cloned() {
            self.data.write().observe(&signal);
        }
        self.base.mark_dirty();
    }
}

impl PlotItem for PlotCurve {
    fn base(&self) -> &ItemBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ItemBase {
        &mut self.base
    }

    fn update_node(&mut self, ctx: &RenderContext<'_>, node: &mut PlotNode) {
        node.primitives.clear();
        node.clip = None;
        let Some(visible) = ctx.visible else {
            return;
        };
        if !self.base.is_visible() {
            return;
        }

        let data = self.data.read();
        let vertices = build_curve_strip(&*data, &visible, node.origin, self.config.color);
        let hints = data.hints();
        let bounding = if hints.contains(SeriesHints::HAS_BOUNDING_RECT) {
            data.bounding_rect()
        } else {
            None
        };
        if needs_clipping(hints, bounding, &visible) {
            node.clip = Some(ctx.canvas);
        }
        trace!(
            title = self.base.title(),
            samples = data.count(),
            vertices = vertices.len(),
            clipped = node.clip.is_some(),
            "curve rebuilt"
        );

        if vertices.len() > 1 {
            node.primitives.push(Primitive::LineStrip {
                vertices,
                width: self.config.line_width,
            });
        }
    }

    fn data_version(&self) -> Option<u64> {
        Some(self.data.read().version())
    }

    fn bounding_rect(&self) -> Option<DataRect> {
        self.data.read().bounding_rect()
    }

    /// Positions outside the sampled span give nothing rather than an
    /// extrapolation.
    fn probe(&self, orientation: Orientation, position: f64) -> Vec<DVec2> {
        let data = self.data.read();
        let count = data.count();
        if count == 0 || !data.hints().is_monotonic(orientation) {
            return Vec::new();
        }
        let span = Interval::new(
            data.sample_at(0).coordinate(orientation),
            data.sample_at(count - 1).coordinate(orientation),
        )
        .normalized();
        if !span.contains(position) {
            return Vec::new();
        }
        vec![data.interpolated_point(orientation, position)]
    }

    fn observe_data(&mut self, signal: &Arc<ChangeSignal>) {
        self.data.write().observe(signal);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}
