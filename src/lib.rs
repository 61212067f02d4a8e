//! plot_core: data series, viewport culled rendering and cursors for 2D plots

pub mod data_types;
pub mod input;
pub mod plot_types;
pub mod rendering;
pub mod scales;
pub mod transform;
pub mod utils;
pub mod view;
pub mod view_controller;

pub use data_types::{
    Axis, CorridorData, CorridorSample, CurveData, CurvePoint, DataRect, Interval, Orientation,
    PlotConfig, SeriesData, SeriesHints,
};
pub use input::{CursorController, PointerEvent};
pub use plot_types::{PlotCorridor, PlotCurve, PlotCursor, PlotItem};
pub use view::{PaintStats, PlotView};
