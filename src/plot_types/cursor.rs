//! Crosshair style cursor reading the values of its sibling items.

use glam::Vec2;
use std::any::Any;
use tracing::trace;

use super::{ItemBase, PlotItem, RenderContext};
use crate::data_types::{
    AxisFormat, CanvasRect, CoordinateSpace, CursorConfig, ItemId, Orientation,
};
use crate::rendering::{PlotNode, Primitive, Vertex};
use crate::scales::format_tick;
use crate::transform::PlotTransform;

/// Value of one sibling item at the cursor position.
#[derive(Clone, Debug, PartialEq)]
pub struct Probe {
    pub item: ItemId,
    /// The coordinate read off the sibling, across the cursor line.
    pub value: f64,
    /// Canvas position of the probed point.
    pub anchor: Vec2,
    pub format: AxisFormat,
    /// Span of the axis `value` belongs to.
    pub span: f64,
}

/// A line across the canvas at a data position, labelled with the values
/// of every other item at that position.
///
/// Horizontal cursors probe along x and draw a vertical line; vertical
/// cursors probe along y and draw a horizontal one.
pub struct PlotCursor {
    base: ItemBase,
    orientation: Orientation,
    position: Option<f64>,
    probes: Vec<Probe>,
    config: CursorConfig,
}

impl PlotCursor {
    pub fn new(orientation: Orientation) -> Self {
        let mut base = ItemBase::new(CoordinateSpace::Canvas);
        base.set_z(f64::MAX);
        Self {
            base,
            orientation,
            position: None,
            probes: Vec::new(),
            config: CursorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: CursorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Data position along the cursor orientation.
    pub fn position(&self) -> Option<f64> {
        self.position
    }

    pub fn probes(&self) -> &[Probe] {
        &self.probes
    }

    pub fn set_position(&mut self, value: f64) {
        if self.position != Some(value) {
            self.position = Some(value);
            self.base.mark_dirty();
        }
    }

    pub fn clear_position(&mut self) {
        if self.position.take().is_some() {
            self.base.mark_dirty();
        }
    }

    /// Moves the cursor under a canvas point, mapped through `transform`.
    ///
    /// Returns `false` if the transform cannot be inverted.
    pub fn set_canvas_position(&mut self, point: Vec2, transform: &PlotTransform) -> bool {
        let pixel = match self.orientation {
            Orientation::Horizontal => point.x,
            Orientation::Vertical => point.y,
        };
        match transform.invert_value(self.orientation, pixel) {
            Some(value) => {
                self.set_position(value);
                true
            }
            None => false,
        }
    }

    fn line(&self, pixel: f32, canvas: CanvasRect) -> [Vertex; 2] {
        let color = self.config.line_color;
        match self.orientation {
            Orientation::Horizontal => [
                Vertex::new(pixel, canvas.top, color),
                Vertex::new(pixel, canvas.bottom(), color),
            ],
            Orientation::Vertical => [
                Vertex::new(canvas.left, pixel, color),
                Vertex::new(canvas.right(), pixel, color),
            ],
        }
    }

    fn label(&self, text: String, anchor: Vec2, canvas: CanvasRect) -> Primitive {
        let offset = Vec2::from(self.config.label_offset);
        let size = Vec2::from(self.config.label_size);
        let position = canvas.clamp_box(anchor + offset, size);
        Primitive::Label {
            text,
            position: position.to_array(),
            color: self.config.label_color,
        }
    }
}

impl PlotItem for PlotCursor {
    fn base(&self) -> &ItemBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ItemBase {
        &mut self.base
    }

    fn update_node(&mut self, ctx: &RenderContext<'_>, node: &mut PlotNode) {
        node.primitives.clear();
        node.clip = None;
        let Some(position) = self.position else {
            return;
        };
        if !self.base.is_visible() || ctx.canvas.is_empty() {
            return;
        }

        let canvas = ctx.canvas;
        let pixel = ctx.transform.map_value(self.orientation, position) as f32;
        let (lower, upper) = match self.orientation {
            Orientation::Horizontal => (canvas.left, canvas.right()),
            Orientation::Vertical => (canvas.top, canvas.bottom()),
        };
        if !pixel.is_finite() || pixel < lower || pixel > upper {
            return;
        }

        node.primitives.push(Primitive::LineStrip {
            vertices: self.line(pixel, canvas).to_vec(),
            width: 1.0,
        });

        let axis = match self.orientation {
            Orientation::Horizontal => ctx.x_axis,
            Orientation::Vertical => ctx.y_axis,
        };
        let text = format_tick(position, axis.span(), &axis.format);
        let anchor = match self.orientation {
            Orientation::Horizontal => Vec2::new(pixel, canvas.bottom()),
            Orientation::Vertical => Vec2::new(canvas.left, pixel),
        };
        node.primitives.push(self.label(text, anchor, canvas));

        for probe in &self.probes {
            let text = format_tick(probe.value, probe.span, &probe.format);
            node.primitives.push(self.label(text, probe.anchor, canvas));
        }
        trace!(position, probes = self.probes.len(), "cursor rebuilt");
    }

    fn cursor_request(&self) -> Option<(Orientation, f64)> {
        self.position
            .filter(|_| self.base.is_visible())
            .map(|position| (self.orientation, position))
    }

    fn set_probes(&mut self, probes: Vec<Probe>) {
        if self.probes != probes {
            self.probes = probes;
            self.base.mark_dirty();
        }
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
