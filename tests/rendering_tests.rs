use glam::DVec2;
use plot_core::data_types::{
    Color, CorridorData, CorridorSample, CurveData, DataRect, Interval, Orientation, SeriesData,
    SeriesHints,
};
use plot_core::rendering::{
    build_corridor_geometry, build_curve_strip, culling_orientation, needs_clipping,
    visible_window,
};

fn sine_curve(count: usize) -> CurveData {
    CurveData::new(
        (0..count)
            .map(|i| DVec2::new(i as f64, (i as f64 * 0.01).sin()))
            .collect(),
    )
    .with_hints(SeriesHints::MONOTONIC_PRIMARY)
}

#[test]
fn test_culled_strip_covers_only_visible_window() {
    let data = sine_curve(10_000);
    let visible = DataRect::new(Interval::new(5000.5, 5100.5), Interval::new(-2.0, 2.0));

    let vertices = build_curve_strip(&data, &visible, DVec2::ZERO, Color::BLUE);
    // 100 samples strictly inside the window plus the two edge samples.
    assert_eq!(vertices.len(), 102);

    let y = |i: usize| (i as f64 * 0.01).sin();
    let first_y = y(5000) * 0.5 + y(5001) * 0.5;
    let last_y = y(5100) * 0.5 + y(5101) * 0.5;
    assert_eq!(vertices[0].position, [5000.5, first_y as f32]);
    assert_eq!(vertices[101].position, [5100.5, last_y as f32]);
    assert_eq!(vertices[1].position, [5001.0, y(5001) as f32]);
}

#[test]
fn test_epoch_coordinates_keep_precision_relative_to_origin() {
    let start = 1.7e12;
    let data = CurveData::new(
        (0..60)
            .map(|i| DVec2::new(start + i as f64 * 1000.0, i as f64))
            .collect(),
    )
    .with_hints(SeriesHints::MONOTONIC_PRIMARY);
    let visible = DataRect::new(Interval::new(start, start + 59_000.0), Interval::new(0.0, 60.0));
    let origin = DVec2::new(visible.x.lower, visible.y.lower);

    let vertices = build_curve_strip(&data, &visible, origin, Color::BLUE);
    assert_eq!(vertices.len(), 60);
    for (i, vertex) in vertices.iter().enumerate() {
        assert_eq!(vertex.position, [i as f32 * 1000.0, i as f32]);
    }

    let corridor = CorridorData::new(
        (0..3)
            .map(|i| CorridorSample::new(start + i as f64 * 1000.0, -1.0, 1.0))
            .collect(),
    )
    .with_hints(SeriesHints::MONOTONIC_PRIMARY);
    let geometry = build_corridor_geometry(&corridor, &visible, origin, Color::BLUE, Color::BLACK);
    let xs: Vec<f32> = geometry.lower.iter().map(|v| v.position[0]).collect();
    assert_eq!(xs, vec![0.0, 1000.0, 2000.0]);
    assert_eq!(geometry.upper[2].position, [2000.0, 1.0]);
}

#[test]
fn test_window_clamps_to_series_ends() {
    let data = sine_curve(100);
    let window = visible_window(&data, Orientation::Horizontal, Interval::new(-50.0, 49.5)).unwrap();
    assert_eq!(window.from, 0);
    assert_eq!(window.first, DVec2::new(0.0, 0.0));
    assert_eq!(window.last.x, 49.5);

    let window = visible_window(&data, Orientation::Horizontal, Interval::new(90.0, 500.0)).unwrap();
    assert_eq!(window.to, 99);
    assert_eq!(window.last.x, 99.0);
    assert_eq!(window.first.x, 90.0);
}

#[test]
fn test_window_outside_series_is_empty() {
    let data = sine_curve(100);
    assert!(visible_window(&data, Orientation::Horizontal, Interval::new(200.0, 300.0)).is_none());
    assert!(visible_window(&data, Orientation::Horizontal, Interval::new(-20.0, -10.0)).is_none());
    // Inverted boundaries render nothing.
    assert!(visible_window(&data, Orientation::Horizontal, Interval::new(60.0, 40.0)).is_none());
    assert!(visible_window(&CurveData::default(), Orientation::Horizontal, Interval::new(0.0, 1.0)).is_none());
}

#[test]
fn test_unsorted_curve_is_not_culled() {
    let data = CurveData::new(vec![
        DVec2::new(0.0, 0.0),
        DVec2::new(5.0, 1.0),
        DVec2::new(2.0, 2.0),
        DVec2::new(100.0, 3.0),
    ]);
    let visible = DataRect::new(Interval::new(0.0, 10.0), Interval::new(0.0, 10.0));
    assert_eq!(culling_orientation(data.hints()), None);
    assert_eq!(build_curve_strip(&data, &visible, DVec2::ZERO, Color::BLACK).len(), 4);
}

#[test]
fn test_curve_culled_along_secondary_axis() {
    let data = CurveData::new((0..50).map(|i| DVec2::new((i % 7) as f64, i as f64)).collect())
        .with_hints(SeriesHints::MONOTONIC_SECONDARY);
    assert_eq!(culling_orientation(data.hints()), Some(Orientation::Vertical));

    let visible = DataRect::new(Interval::new(0.0, 10.0), Interval::new(10.5, 20.5));
    let vertices = build_curve_strip(&data, &visible, DVec2::ZERO, Color::BLACK);
    assert_eq!(vertices.len(), 12);
    assert_eq!(vertices[0].position[1], 10.5);
    assert_eq!(vertices[11].position[1], 20.5);
}

#[test]
fn test_corridor_geometry_shares_one_window() {
    let data = CorridorData::new(
        (0..1000)
            .map(|i| CorridorSample::new(i as f64, -1.0 - i as f64, 1.0 + i as f64))
            .collect(),
    )
    .with_hints(SeriesHints::MONOTONIC_PRIMARY);
    let visible = DataRect::new(Interval::new(10.5, 20.5), Interval::new(-100.0, 100.0));

    let geometry = build_corridor_geometry(&data, &visible, DVec2::ZERO, Color::BLUE, Color::BLACK);
    assert_eq!(geometry.lower.len(), 12);
    assert_eq!(geometry.upper.len(), 12);
    assert_eq!(geometry.band.len(), 24);
    assert_eq!(geometry.lower[0].position, [10.5, -11.5]);
    assert_eq!(geometry.upper[0].position, [10.5, 11.5]);
    assert_eq!(geometry.band[0].color, Color::BLUE.to_array());
    assert_eq!(geometry.lower[0].color, Color::BLACK.to_array());
}

#[test]
fn test_needs_clipping() {
    let visible = DataRect::new(Interval::new(0.0, 10.0), Interval::new(0.0, 10.0));
    let inside = DataRect::new(Interval::new(-50.0, 50.0), Interval::new(1.0, 9.0));
    let overshoot = DataRect::new(Interval::new(-50.0, 50.0), Interval::new(-1.0, 9.0));

    let both = SeriesHints::MONOTONIC_PRIMARY | SeriesHints::MONOTONIC_SECONDARY;
    assert!(!needs_clipping(both, None, &visible));
    assert!(needs_clipping(SeriesHints::NONE, Some(inside), &visible));

    // Without HAS_BOUNDING_RECT the rect is not trusted.
    assert!(needs_clipping(SeriesHints::MONOTONIC_PRIMARY, Some(inside), &visible));

    let primary = SeriesHints::MONOTONIC_PRIMARY | SeriesHints::HAS_BOUNDING_RECT;
    assert!(!needs_clipping(primary, Some(inside), &visible));
    assert!(needs_clipping(primary, Some(overshoot), &visible));
    assert!(needs_clipping(primary, None, &visible));

    let secondary = SeriesHints::MONOTONIC_SECONDARY | SeriesHints::HAS_BOUNDING_RECT;
    let transposed = DataRect::new(inside.y, inside.x);
    assert!(!needs_clipping(secondary, Some(transposed), &visible));
    assert!(needs_clipping(secondary, Some(DataRect::new(overshoot.y, overshoot.x)), &visible));
}
