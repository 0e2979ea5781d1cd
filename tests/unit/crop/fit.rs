use super::*;
use kurbo::Shape;
use proptest::prelude::*;

fn rect_path(x: f64, y: f64, w: f64, h: f64) -> BezPath {
    Rect::new(x, y, x + w, y + h).to_path(0.1)
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6 * a.abs().max(b.abs()).max(1.0)
}

#[test]
fn unit_square_in_wide_container() {
    let square = rect_path(0.0, 0.0, 1.0, 1.0);
    let fitted = fit_path(&square, 200.0, 100.0, 0.8).unwrap();
    assert!(close(fitted.width, 80.0));
    assert!(close(fitted.height, 80.0));

    let rect = crop_rect(&fitted, 200.0, 100.0);
    assert!(close(rect.x0, 60.0) && close(rect.y0, 10.0));

    let placed = place_path(&fitted, 200.0, 100.0).bounding_box();
    assert!(close(placed.x0, 60.0) && close(placed.y0, 10.0));
    assert!(close(placed.x1, 140.0) && close(placed.y1, 90.0));
}

#[test]
fn tall_path_in_tall_container_is_width_limited() {
    let path = rect_path(5.0, 5.0, 10.0, 20.0);
    let fitted = fit_path(&path, 100.0, 400.0, 0.5).unwrap();
    assert!(close(fitted.width, 50.0));
    assert!(close(fitted.height, 100.0));
    let bb = fitted.path.bounding_box();
    assert!(close(bb.x0, 0.0) && close(bb.y0, 0.0));
}

#[test]
fn degenerate_inputs_are_absent() {
    let square = rect_path(0.0, 0.0, 1.0, 1.0);
    assert!(fit_path(&BezPath::new(), 100.0, 100.0, 0.8).is_none());
    assert!(fit_path(&square, 0.0, 100.0, 0.8).is_none());
    assert!(fit_path(&square, 100.0, -1.0, 0.8).is_none());
    assert!(fit_path(&square, 100.0, 100.0, 0.0).is_none());
    assert!(fit_path(&square, 100.0, 100.0, f64::NAN).is_none());
    assert!(fit_path(&square, f64::INFINITY, 100.0, 0.8).is_none());

    let mut line = BezPath::new();
    line.move_to((0.0, 0.0));
    line.line_to((10.0, 0.0));
    assert!(fit_path(&line, 100.0, 100.0, 0.8).is_none());
}

#[test]
fn scale_path_moves_bounding_origin() {
    let path = rect_path(10.0, 20.0, 4.0, 2.0);
    let out = scale_path(&path, Point::new(1.0, 1.0), 2.5);
    let bb = out.bounding_box();
    assert!(close(bb.x0, 1.0) && close(bb.y0, 1.0));
    assert!(close(bb.width(), 10.0) && close(bb.height(), 5.0));
    assert!(scale_path(&BezPath::new(), Point::ORIGIN, 2.0).elements().is_empty());
}

#[test]
fn curved_path_fits_by_its_control_points() {
    let mut arch = BezPath::new();
    arch.move_to((0.0, 0.0));
    arch.curve_to((0.0, -10.0), (10.0, -10.0), (10.0, 0.0));
    arch.line_to((10.0, 10.0));
    arch.line_to((0.0, 10.0));
    arch.close_path();
    assert!(close(arch.bounding_box().y0, -7.5));

    let fitted = fit_path(&arch, 100.0, 100.0, 1.0).unwrap();
    assert!(close(fitted.width, 50.0) && close(fitted.height, 100.0));

    let placed = place_path(&fitted, 100.0, 100.0);
    let hull = placed.control_box();
    assert!(close(hull.x0, 25.0) && close(hull.y0, 0.0));
    assert!(close(hull.x1, 75.0) && close(hull.y1, 100.0));
    // The curve apex sits below the top control points.
    assert!(close(placed.bounding_box().y0, 12.5));
    let rect = crop_rect(&fitted, 100.0, 100.0);
    assert!(close(rect.x0, hull.x0) && close(rect.y1, hull.y1));
}

fn path_strategy() -> impl Strategy<Value = BezPath> {
    (
        -500.0..500.0f64,
        -500.0..500.0f64,
        0.5..300.0f64,
        0.5..300.0f64,
        0.0..1.0f64,
    )
        .prop_map(|(x, y, w, h, notch)| {
            let mut p = BezPath::new();
            p.move_to((x, y));
            p.line_to((x + w, y));
            p.quad_to((x + w * notch, y + h * 0.5), (x + w, y + h));
            p.line_to((x, y + h));
            p.close_path();
            p
        })
}

proptest! {
    #[test]
    fn fit_preserves_aspect_and_fills_tighter_axis(
        path in path_strategy(),
        w in 1.0..2000.0f64,
        h in 1.0..2000.0f64,
        fill in 0.05..1.0f64,
    ) {
        let bb = path.control_box();
        let fitted = fit_path(&path, w, h, fill).unwrap();
        prop_assert!(close(fitted.width / fitted.height, bb.width() / bb.height()));
        prop_assert!(close((fitted.width / w).max(fitted.height / h), fill));

        let fb = fitted.path.control_box();
        prop_assert!(close(fb.width(), fitted.width));
        prop_assert!(close(fb.height(), fitted.height));
    }

    #[test]
    fn placed_path_is_centered(
        path in path_strategy(),
        w in 1.0..2000.0f64,
        h in 1.0..2000.0f64,
        fill in 0.05..1.0f64,
    ) {
        let fitted = fit_path(&path, w, h, fill).unwrap();
        let center = place_path(&fitted, w, h).control_box().center();
        prop_assert!((center.x - w / 2.0).abs() < 1e-6 * w.max(1.0));
        prop_assert!((center.y - h / 2.0).abs() < 1e-6 * h.max(1.0));
        let rect = crop_rect(&fitted, w, h);
        prop_assert!((rect.center().x - w / 2.0).abs() < 1e-9 * w.max(1.0));
        prop_assert!((rect.center().y - h / 2.0).abs() < 1e-9 * h.max(1.0));
    }

    #[test]
    fn scale_path_is_pure_and_repeatable(
        path in path_strategy(),
        tx in -100.0..100.0f64,
        ty in -100.0..100.0f64,
        s in 0.1..10.0f64,
    ) {
        let before = path.clone();
        let a = scale_path(&path, Point::new(tx, ty), s);
        let b = scale_path(&path, Point::new(tx, ty), s);
        prop_assert_eq!(&path, &before);
        prop_assert_eq!(a, b);
    }
}
