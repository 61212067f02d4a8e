use glam::{DVec2, Vec2};
use plot_core::data_types::{CanvasRect, DataRect, Interval, Orientation};
use plot_core::transform::PlotTransform;

fn transform(x: (f64, f64), y: (f64, f64), canvas: CanvasRect) -> PlotTransform {
    PlotTransform::new(
        DataRect::new(Interval::new(x.0, x.1), Interval::new(y.0, y.1)),
        canvas,
    )
}

#[test]
fn test_plot_transform_flips_y() {
    let t = transform((0.0, 100.0), (0.0, 100.0), CanvasRect::new(0.0, 0.0, 200.0, 100.0));

    assert_eq!(t.data_to_canvas(DVec2::new(0.0, 0.0)), Vec2::new(0.0, 100.0));
    assert_eq!(t.data_to_canvas(DVec2::new(100.0, 100.0)), Vec2::new(200.0, 0.0));
    assert_eq!(t.data_to_canvas(DVec2::new(50.0, 50.0)), Vec2::new(100.0, 50.0));

    let back = t.canvas_to_data(Vec2::new(100.0, 50.0)).unwrap();
    assert!((back - DVec2::new(50.0, 50.0)).length() < 1e-9);
}

#[test]
fn test_plot_transform_with_offset_canvas() {
    let t = transform((-10.0, 10.0), (5.0, 15.0), CanvasRect::new(40.0, 20.0, 400.0, 200.0));

    assert_eq!(t.map_value(Orientation::Horizontal, -10.0), 40.0);
    assert_eq!(t.map_value(Orientation::Horizontal, 10.0), 440.0);
    assert_eq!(t.map_value(Orientation::Vertical, 5.0), 220.0);
    assert_eq!(t.map_value(Orientation::Vertical, 15.0), 20.0);

    let x = t.invert_value(Orientation::Horizontal, 240.0).unwrap();
    let y = t.invert_value(Orientation::Vertical, 120.0).unwrap();
    assert!(x.abs() < 1e-9);
    assert!((y - 10.0).abs() < 1e-9);
}

#[test]
fn test_visible_rect_is_the_data_rect() {
    let t = transform((2.0, 8.0), (-1.0, 1.0), CanvasRect::new(0.0, 0.0, 300.0, 150.0));
    let visible = t.visible_rect().unwrap();
    assert!((visible.x.lower - 2.0).abs() < 1e-9);
    assert!((visible.x.upper - 8.0).abs() < 1e-9);
    assert!((visible.y.lower + 1.0).abs() < 1e-9);
    assert!((visible.y.upper - 1.0).abs() < 1e-9);
}

#[test]
fn test_inverted_boundaries_give_invalid_visible_rect() {
    let t = transform((100.0, 0.0), (0.0, 1.0), CanvasRect::new(0.0, 0.0, 100.0, 100.0));
    let visible = t.visible_rect().unwrap();
    assert!(!visible.x.is_valid());
    assert!(visible.y.is_valid());
}

#[test]
fn test_zero_span_is_padded() {
    let t = transform((5.0, 5.0), (0.0, 10.0), CanvasRect::new(0.0, 0.0, 100.0, 100.0));
    assert!(t.is_invertible());
    assert_eq!(t.map_value(Orientation::Horizontal, 5.0), 50.0);
}

#[test]
fn test_empty_canvas_is_not_invertible() {
    let t = transform((0.0, 10.0), (0.0, 10.0), CanvasRect::new(0.0, 0.0, 0.0, 100.0));
    assert!(!t.is_invertible());
    assert_eq!(t.canvas_to_data(Vec2::new(1.0, 1.0)), None);
    assert_eq!(t.visible_rect(), None);
    assert_eq!(t.invert_value(Orientation::Horizontal, 1.0), None);
}

#[test]
fn test_identity_passes_canvas_points() {
    let canvas = CanvasRect::new(10.0, 10.0, 50.0, 50.0);
    let t = PlotTransform::identity(canvas);
    assert_eq!(t.data_to_canvas(DVec2::new(12.0, 30.0)), Vec2::new(12.0, 30.0));
    assert_eq!(t.canvas_rect(), canvas);
}
