//! Viewport culled geometry for sampled series.
//!
//! Builders emit vertex runs in data space, relative to an origin near the
//! visible window so that large coordinates survive the cast to `f32`; the
//! node matrix of the owning item adds the origin back and maps the run onto
//! the canvas. For a series that is monotonic along the
//! culling axis the work per frame is `O(log n + visible)`: two binary searches
//! locate the visible window and the run starts and ends on samples
//! interpolated exactly at the window edges, so no clip is needed along that
//! axis.

use bytemuck::{Pod, Zeroable};
use glam::{DAffine2, DVec2};
use std::iter;

use crate::data_types::{
    interpolate_segment, CanvasRect, Color, CorridorSample, CurvePoint, DataRect, Interval,
    ItemId, Orientation, Sample, SeriesData, SeriesHints,
};

/// GPU ready vertex.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub fn new(x: f32, y: f32, color: Color) -> Self {
        Self {
            position: [x, y],
            color: color.to_array(),
        }
    }

    /// Vertex of `point` relative to `origin`, subtracted in `f64`.
    pub fn from_data(point: DVec2, origin: DVec2, color: Color) -> Self {
        let p = (point - origin).as_vec2();
        Self::new(p.x, p.y, color)
    }
}

/// One drawable primitive of a node.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    LineStrip { vertices: Vec<Vertex>, width: f32 },
    TriangleStrip { vertices: Vec<Vertex> },
    /// Text anchored at its top-left corner, in canvas pixels.
    Label {
        text: String,
        position: [f32; 2],
        color: Color,
    },
}

impl Primitive {
    pub fn vertices(&self) -> &[Vertex] {
        match self {
            Primitive::LineStrip { vertices, .. } | Primitive::TriangleStrip { vertices } => vertices,
            Primitive::Label { .. } => &[],
        }
    }
}

/// Per item transform node of the scene.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotNode {
    pub item: ItemId,
    pub z: f64,
    /// Data space offset of the vertices.
    pub origin: DVec2,
    /// Maps the item's vertices onto the canvas, origin included.
    pub matrix: DAffine2,
    /// Rectangular clip in canvas pixels, if the geometry may overshoot.
    pub clip: Option<CanvasRect>,
    pub primitives: Vec<Primitive>,
}

impl PlotNode {
    pub fn new(item: ItemId, z: f64) -> Self {
        Self {
            item,
            z,
            origin: DVec2::ZERO,
            matrix: DAffine2::IDENTITY,
            clip: None,
            primitives: Vec::new(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.primitives.iter().map(|p| p.vertices().len()).sum()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Label { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Visible part of a monotonic series.
///
/// The run is `first`, the samples strictly between `from` and `to`, then
/// `last`. `first`/`last` are either real end samples or samples
/// interpolated at the window edges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleWindow<S> {
    pub from: usize,
    pub to: usize,
    pub first: S,
    pub last: S,
}

impl<S: Sample> SampleWindow<S> {
    pub fn samples<'a, D>(&'a self, data: &'a D) -> impl Iterator<Item = S> + 'a
    where
        D: SeriesData<Sample = S> + ?Sized,
    {
        iter::once(self.first)
            .chain((self.from + 1..self.to).map(move |i| data.sample_at(i)))
            .chain(iter::once(self.last))
    }

    /// Number of samples in the run, edge samples included.
    pub fn vertex_count(&self) -> usize {
        2 + self.to.saturating_sub(self.from + 1)
    }
}

/// Locates the samples of `data` visible in `range` along `orientation`.
///
/// `data` must be monotonic along `orientation`. Returns `None` when the
/// series does not reach into `range` or `range` is invalid.
pub fn visible_window<D>(
    data: &D,
    orientation: Orientation,
    range: Interval,
) -> Option<SampleWindow<D::Sample>>
where
    D: SeriesData + ?Sized,
{
    let count = data.count();
    if count == 0 || !range.is_valid() {
        return None;
    }
    let head = data.sample_at(0);
    let tail = data.sample_at(count - 1);
    let series = Interval::new(head.coordinate(orientation), tail.coordinate(orientation));
    if !series.intersects(&range) {
        return None;
    }

    let (from, first) = match data.upper_index(orientation, range.lower) {
        Some(i) if i > 0 => (i - 1, interpolate_segment(data, orientation, i - 1, range.lower)),
        _ => (0, head),
    };
    let (to, last) = match data.upper_index(orientation, range.upper) {
        Some(i) if i > 0 => (i, interpolate_segment(data, orientation, i - 1, range.upper)),
        _ => (count - 1, tail),
    };

    Some(SampleWindow {
        from,
        to,
        first,
        last,
    })
}

/// Axis along which a series with `hints` can be culled, primary first.
pub fn culling_orientation(hints: SeriesHints) -> Option<Orientation> {
    if hints.is_monotonic(Orientation::Horizontal) {
        Some(Orientation::Horizontal)
    } else if hints.is_monotonic(Orientation::Vertical) {
        Some(Orientation::Vertical)
    } else {
        None
    }
}

/// Line strip of the visible part of a curve, in data coordinates relative
/// to `origin`.
pub fn build_curve_strip<D>(
    data: &D,
    visible: &DataRect,
    origin: DVec2,
    color: Color,
) -> Vec<Vertex>
where
    D: SeriesData<Sample = CurvePoint> + ?Sized,
{
    match culling_orientation(data.hints()) {
        Some(orientation) => visible_window(data, orientation, visible.interval(orientation))
            .map(|window| {
                let mut vertices = Vec::with_capacity(window.vertex_count());
                vertices.extend(
                    window
                        .samples(data)
                        .map(|p| Vertex::from_data(p, origin, color)),
                );
                vertices
            })
            .unwrap_or_default(),
        None => {
            if !visible.is_valid() {
                return Vec::new();
            }
            (0..data.count())
                .map(|i| Vertex::from_data(data.sample_at(i), origin, color))
                .collect()
        }
    }
}

/// Geometry of a corridor: the filled band and its two borders.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CorridorGeometry {
    /// Triangle strip alternating lower and upper bound vertices.
    pub band: Vec<Vertex>,
    pub lower: Vec<Vertex>,
    pub upper: Vec<Vertex>,
}

impl CorridorGeometry {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            band: Vec::with_capacity(capacity * 2),
            lower: Vec::with_capacity(capacity),
            upper: Vec::with_capacity(capacity),
        }
    }

    fn push(&mut self, sample: CorridorSample, origin: DVec2, fill: Color, border: Color) {
        let lower = DVec2::new(sample.value, sample.bound.lower);
        let upper = DVec2::new(sample.value, sample.bound.upper);
        self.band.push(Vertex::from_data(lower, origin, fill));
        self.band.push(Vertex::from_data(upper, origin, fill));
        self.lower.push(Vertex::from_data(lower, origin, border));
        self.upper.push(Vertex::from_data(upper, origin, border));
    }

    pub fn is_empty(&self) -> bool {
        self.band.is_empty()
    }
}

/// Band and border geometry of the visible part of a corridor.
///
/// The index window is computed once along the primary axis and shared by
/// the three primitives. Vertices are relative to `origin`.
pub fn build_corridor_geometry<D>(
    data: &D,
    visible: &DataRect,
    origin: DVec2,
    fill: Color,
    border: Color,
) -> CorridorGeometry
where
    D: SeriesData<Sample = CorridorSample> + ?Sized,
{
    if data.hints().is_monotonic(Orientation::Horizontal) {
        let Some(window) = visible_window(data, Orientation::Horizontal, visible.x) else {
            return CorridorGeometry::default();
        };
        let mut geometry = CorridorGeometry::with_capacity(window.vertex_count());
        for sample in window.samples(data) {
            geometry.push(sample, origin, fill, border);
        }
        geometry
    } else {
        if !visible.is_valid() {
            return CorridorGeometry::default();
        }
        let mut geometry = CorridorGeometry::with_capacity(data.count());
        for i in 0..data.count() {
            geometry.push(data.sample_at(i), origin, fill, border);
        }
        geometry
    }
}

/// Whether geometry built for `visible` may leave the canvas.
///
/// Both axes monotonic: the culled run already ends on the edges. One axis
/// monotonic: only when the bounding rect (usable only with
/// `HAS_BOUNDING_RECT`) exceeds the visible range on the other axis.
/// Otherwise clipping is required.
pub fn needs_clipping(hints: SeriesHints, bounding: Option<DataRect>, visible: &DataRect) -> bool {
    let primary = hints.is_monotonic(Orientation::Horizontal);
    let secondary = hints.is_monotonic(Orientation::Vertical);
    if primary && secondary {
        return false;
    }
    if !(primary || secondary) || !hints.contains(SeriesHints::HAS_BOUNDING_RECT) {
        return true;
    }
    let Some(rect) = bounding else {
        return true;
    };

    let unsorted = if primary {
        Orientation::Vertical
    } else {
        Orientation::Horizontal
    };
    let range = visible.interval(unsorted).normalized();
    let extent = rect.interval(unsorted);
    extent.lower < range.lower || extent.upper > range.upper
}
