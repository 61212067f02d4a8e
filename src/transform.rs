//! Affine projection between data space and canvas space.

use glam::{DAffine2, DVec2, Vec2};

use crate::data_types::{CanvasRect, DataRect, Interval, Orientation};

/// Affine map from a data rectangle onto a canvas rectangle.
///
/// Built as `translate(-x1, -y1)`, then `scale(w / (x2 - x1), h / (y1 - y2))`,
/// then `translate(left, bottom)`. The y factor is negative so that data y
/// grows upwards while canvas y grows downwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotTransform {
    forward: DAffine2,
    inverse: Option<DAffine2>,
    data: DataRect,
    canvas: CanvasRect,
}

impl PlotTransform {
    pub fn new(data: DataRect, canvas: CanvasRect) -> Self {
        let (x1, x2) = padded(data.x);
        let (y1, y2) = padded(data.y);
        let scale = DVec2::new(
            canvas.width as f64 / (x2 - x1),
            canvas.height as f64 / (y1 - y2),
        );
        let forward = DAffine2::from_translation(DVec2::new(canvas.left as f64, canvas.bottom() as f64))
            * DAffine2::from_scale(scale)
            * DAffine2::from_translation(DVec2::new(-x1, -y1));

        let det = forward.matrix2.determinant();
        let inverse = (det != 0.0 && det.is_finite() && forward.is_finite()).then(|| forward.inverse());

        Self {
            forward,
            inverse,
            data,
            canvas,
        }
    }

    /// The transform of canvas space items: canvas coordinates pass through.
    pub fn identity(canvas: CanvasRect) -> Self {
        Self {
            forward: DAffine2::IDENTITY,
            inverse: Some(DAffine2::IDENTITY),
            data: DataRect::new(
                Interval::new(canvas.left as f64, canvas.right() as f64),
                Interval::new(canvas.top as f64, canvas.bottom() as f64),
            ),
            canvas,
        }
    }

    pub fn matrix(&self) -> DAffine2 {
        self.forward
    }

    pub fn data_rect(&self) -> DataRect {
        self.data
    }

    pub fn canvas_rect(&self) -> CanvasRect {
        self.canvas
    }

    pub fn is_invertible(&self) -> bool {
        self.inverse.is_some()
    }

    pub fn data_to_canvas(&self, point: DVec2) -> Vec2 {
        let mapped = self.forward.transform_point2(point);
        if mapped.is_finite() {
            mapped.as_vec2()
        } else {
            Vec2::ZERO
        }
    }

    pub fn canvas_to_data(&self, point: Vec2) -> Option<DVec2> {
        self.inverse
            .map(|inverse| inverse.transform_point2(point.as_dvec2()))
    }

    /// Canvas coordinate of a data value along one axis.
    pub fn map_value(&self, orientation: Orientation, value: f64) -> f64 {
        match orientation {
            Orientation::Horizontal => self.forward.matrix2.x_axis.x * value + self.forward.translation.x,
            Orientation::Vertical => self.forward.matrix2.y_axis.y * value + self.forward.translation.y,
        }
    }

    /// Data value of a canvas coordinate along one axis.
    pub fn invert_value(&self, orientation: Orientation, pixel: f32) -> Option<f64> {
        let inverse = self.inverse?;
        let pixel = pixel as f64;
        Some(match orientation {
            Orientation::Horizontal => inverse.matrix2.x_axis.x * pixel + inverse.translation.x,
            Orientation::Vertical => inverse.matrix2.y_axis.y * pixel + inverse.translation.y,
        })
    }

    /// The canvas rectangle mapped back into data space.
    ///
    /// Bounds keep the orientation of the axis boundaries: inverted
    /// boundaries give an invalid interval, which renders nothing.
    pub fn visible_rect(&self) -> Option<DataRect> {
        let c = self.canvas;
        let x = Interval::new(
            self.invert_value(Orientation::Horizontal, c.left)?,
            self.invert_value(Orientation::Horizontal, c.right())?,
        );
        let y = Interval::new(
            self.invert_value(Orientation::Vertical, c.bottom())?,
            self.invert_value(Orientation::Vertical, c.top)?,
        );
        Some(DataRect::new(x, y))
    }
}

/// Widens zero-width spans so the scale factor stays finite.
fn padded(interval: Interval) -> (f64, f64) {
    let (mut lower, mut upper) = (interval.lower, interval.upper);
    if (upper - lower).abs() < f64::EPSILON {
        lower -= 0.5;
        upper += 0.5;
    }
    (lower, upper)
}
