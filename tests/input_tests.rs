use glam::DVec2;
use plot_core::data_types::{Axis, CanvasRect, CurveData, Interval, Orientation, SeriesHints};
use plot_core::input::{CursorController, PointerEvent};
use plot_core::plot_types::{PlotCursor, PlotItem};
use plot_core::{PlotConfig, PlotCurve, PlotView};

fn view() -> PlotView {
    let mut view = PlotView::new(PlotConfig::default());
    view.set_canvas_rect(CanvasRect::new(0.0, 0.0, 400.0, 300.0));
    view.set_boundaries(Axis::XBottom, Interval::new(0.0, 100.0));
    view
}

fn cursor_position(view: &PlotView, controller: &CursorController) -> f64 {
    let id = controller.attached().unwrap();
    view.item_as::<PlotCursor>(id).unwrap().position().unwrap()
}

#[test]
fn test_press_move_release_cycle() {
    let mut view = view();
    let mut controller = CursorController::new(Orientation::Horizontal);
    assert!(controller.attached().is_none());

    assert!(controller.handle(&mut view, PointerEvent::press(200.0, 10.0)));
    let id = controller.attached().unwrap();
    assert_eq!(view.len(), 1);
    assert_eq!(view.item(id).unwrap().base().view(), Some(view.id()));
    assert!((cursor_position(&view, &controller) - 50.0).abs() < 1e-9);

    assert!(controller.handle(&mut view, PointerEvent::moved(300.0, 10.0)));
    assert!((cursor_position(&view, &controller) - 75.0).abs() < 1e-9);

    assert!(controller.handle(&mut view, PointerEvent::release(300.0, 10.0)));
    assert!(controller.attached().is_none());
    assert!(view.is_empty());
    assert_eq!(view.take_retired_nodes(), vec![id]);

    // Pressing again reuses the cursor under a new key.
    assert!(controller.handle(&mut view, PointerEvent::press(100.0, 10.0)));
    assert_ne!(controller.attached(), Some(id));
    assert!((cursor_position(&view, &controller) - 25.0).abs() < 1e-9);
}

#[test]
fn test_events_without_press_are_ignored() {
    let mut view = view();
    let mut controller = CursorController::new(Orientation::Vertical);

    assert!(!controller.handle(&mut view, PointerEvent::moved(10.0, 10.0)));
    assert!(!controller.handle(&mut view, PointerEvent::release(10.0, 10.0)));
    assert!(!controller.handle(&mut view, PointerEvent::press(500.0, 10.0)));
    assert!(view.is_empty());
}

#[test]
fn test_dragged_cursor_labels_siblings() {
    let mut view = view();
    view.set_boundaries(Axis::YLeft, Interval::new(0.0, 300.0));
    let data = CurveData::new((0..=100).map(|i| DVec2::new(i as f64, 3.0 * i as f64)).collect())
        .with_hints(SeriesHints::MONOTONIC_PRIMARY);
    view.attach(PlotCurve::new(data));

    let mut controller = CursorController::new(Orientation::Horizontal);
    controller.handle(&mut view, PointerEvent::press(40.0, 150.0));
    view.paint();

    let id = controller.attached().unwrap();
    let labels: Vec<String> = view.node(id).unwrap().labels().map(str::to_owned).collect();
    assert_eq!(labels, vec!["10.00".to_owned(), "30.00".to_owned()]);
}
