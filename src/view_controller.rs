use crate::data_types::{Axis, CanvasRect, Interval};
use crate::view::PlotView;

/// ViewController maps interactions (pan, zoom, auto-fit) onto axis
/// boundaries. Every change goes through [`PlotView::set_boundaries`], so the
/// usual change broadcast follows.
pub struct ViewController;

impl ViewController {
    /// Smallest span a zoom may shrink an axis to.
    pub const MIN_SPAN: f64 = 1e-9;

    /// Boundaries after dragging the canvas by `delta_pixels` along an axis
    /// `total_pixels` long.
    pub fn compute_pan(range: Interval, delta_pixels: f32, total_pixels: f32, is_y: bool) -> Interval {
        if total_pixels <= 0.0 {
            return range;
        }
        let ratio = range.width() / total_pixels as f64;

        // Dragging right pulls smaller x values into view; dragging down
        // (positive in canvas space) pulls larger y values into view.
        let delta_data = if is_y {
            delta_pixels as f64 * ratio
        } else {
            -delta_pixels as f64 * ratio
        };
        Interval::new(range.lower + delta_data, range.upper + delta_data)
    }

    /// Pans `axis` by a pixel delta measured on the canvas of `view`.
    pub fn pan_axis(view: &mut PlotView, axis: Axis, delta_pixels: f32) {
        let canvas = view.canvas_rect();
        let total = axis_pixels(canvas, axis);
        let range = Self::compute_pan(view.boundaries(axis), delta_pixels, total, !axis.is_x());
        view.set_boundaries(axis, range);
    }

    /// Boundaries after scaling the span by `factor` around the point at
    /// `pivot_pct` of the range, which stays in place.
    pub fn compute_zoom(range: Interval, pivot_pct: f64, factor: f64) -> Interval {
        let span = range.width();
        let mut factor = factor;
        if span * factor < Self::MIN_SPAN {
            factor = Self::MIN_SPAN / span;
        }
        let pivot = range.lower + span * pivot_pct;
        let new_span = span * factor;
        let lower = pivot - new_span * pivot_pct;
        Interval::new(lower, lower + new_span)
    }

    /// Zooms `axis` at a pivot expressed as a fraction of its range.
    pub fn zoom_axis_at(view: &mut PlotView, axis: Axis, pivot_pct: f64, factor: f64) {
        let range = view.boundaries(axis);
        if !range.is_valid() || range.width() <= 0.0 {
            return;
        }
        view.set_boundaries(axis, Self::compute_zoom(range, pivot_pct, factor));
    }

    /// Calculates the new bounds for an auto-fit with an optional margin.
    pub fn compute_auto_fit(min: f64, max: f64, margin_pct: f64) -> Interval {
        if !min.is_finite() || !max.is_finite() {
            return Interval::new(0.0, 100.0);
        }

        let span = if (max - min).abs() < f64::EPSILON {
            1.0 // Avoids a zero span
        } else {
            max - min
        };

        Interval::new(min - span * margin_pct, max + span * margin_pct)
    }

    /// Fits `axis` to the extent of the visible items scaled against it.
    ///
    /// Returns `false` and leaves the axis alone when no item has data.
    pub fn auto_fit_axis(view: &mut PlotView, axis: Axis, margin_pct: f64) -> bool {
        let Some(extent) = view.items_extent(axis) else {
            return false;
        };
        let range = Self::compute_auto_fit(extent.lower, extent.upper, margin_pct);
        view.set_boundaries(axis, range);
        true
    }

    /// Calculates a zoom factor based on a wheel or pixel delta.
    pub fn compute_zoom_factor(delta: f32, sensitivity: f32) -> f64 {
        let factor = 1.0 + (delta.abs() / sensitivity) as f64;
        if delta > 0.0 {
            1.0 / factor
        } else {
            factor
        }
    }
}

fn axis_pixels(canvas: CanvasRect, axis: Axis) -> f32 {
    if axis.is_x() {
        canvas.width
    } else {
        canvas.height
    }
}
