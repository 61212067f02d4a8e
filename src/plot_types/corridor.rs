use glam::DVec2;
use parking_lot::RwLock;
use std::any::Any;
use std::sync::Arc;
use tracing::trace;

use super::{ItemBase, PlotItem, RenderContext};
use crate::data_types::{
    shared, ChangeSignal, CoordinateSpace, CorridorConfig, CorridorData, CorridorSample,
    CorridorSeries, DataRect, Interval, Orientation, Ownership, SeriesData, SeriesHints,
    SharedSeries,
};
use crate::rendering::{build_corridor_geometry, needs_clipping, PlotNode, Primitive};

type CorridorSource = Arc<RwLock<dyn SeriesData<Sample = CorridorSample>>>;

/// Filled band between a lower and an upper bound.
pub struct PlotCorridor {
    base: ItemBase,
    data: CorridorSource,
    ownership: Ownership,
    config: CorridorConfig,
}

impl PlotCorridor {
    pub fn new(data: CorridorData) -> Self {
        Self::from_source(shared(data), Ownership::Owned)
    }

    pub fn with_shared<D>(data: SharedSeries<D>) -> Self
    where
        D: SeriesData<Sample = CorridorSample> + 'static,
    {
        Self::from_source(data, Ownership::Borrowed)
    }

    fn from_source(data: CorridorSource, ownership: Ownership) -> Self {
        Self {
            base: ItemBase::new(CoordinateSpace::Plot),
            data,
            ownership,
            config: CorridorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: CorridorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.base.set_title(title);
        self
    }

    pub fn data(&self) -> &CorridorSource {
        &self.data
    }

    pub fn ownership(&self) -> Ownership {
        self.ownership
    }

    pub fn config(&self) -> &CorridorConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: CorridorConfig) {
        if self.config != config {
            self.config = config;
            self.base.mark_dirty();
        }
    }

    pub fn set_data(&mut self, data: CorridorData) {
        self.data = shared(data);
        self.ownership = Ownership::Owned;
        if let Some(signal) = self.base.repaint_signal().cloned() {
            self.data.write().observe(&signal);
        }
        self.base.mark_dirty();
    }
}

impl PlotItem for PlotCorridor {
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
        let geometry = build_corridor_geometry(
            &*data,
            &visible,
            node.origin,
            self.config.fill_color,
            self.config.border_color,
        );
        // A sorted lower bound says nothing about where the band ends.
        let mut hints = data.hints();
        hints.set(SeriesHints::MONOTONIC_SECONDARY, false);
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
            band = geometry.band.len(),
            clipped = node.clip.is_some(),
            "corridor rebuilt"
        );

        if geometry.band.len() < 4 {
            return;
        }
        let width = self.config.border_width;
        node.primitives.push(Primitive::TriangleStrip {
            vertices: geometry.band,
        });
        if width > 0.0 {
            node.primitives.push(Primitive::LineStrip {
                vertices: geometry.lower,
                width,
            });
            node.primitives.push(Primitive::LineStrip {
                vertices: geometry.upper,
                width,
            });
        }
    }

    fn data_version(&self) -> Option<u64> {
        Some(self.data.read().version())
    }

    fn bounding_rect(&self) -> Option<DataRect> {
        self.data.read().bounding_rect()
    }

    /// Reads both bounds; only horizontal probes are supported. Positions
    /// outside the sampled span give nothing rather than an extrapolation.
    fn probe(&self, orientation: Orientation, position: f64) -> Vec<DVec2> {
        if orientation != Orientation::Horizontal {
            return Vec::new();
        }
        let data = self.data.read();
        let count = data.count();
        if count == 0 || !data.hints().is_monotonic(Orientation::Horizontal) {
            return Vec::new();
        }
        let span = Interval::new(data.sample_at(0).value, data.sample_at(count - 1).value)
            .normalized();
        if !span.contains(position) {
            return Vec::new();
        }
        let sample = data.interpolated_sample(position);
        vec![
            DVec2::new(sample.value, sample.bound.lower),
            DVec2::new(sample.value, sample.bound.upper),
        ]
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
