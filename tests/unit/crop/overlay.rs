use super::*;
use crate::present::PresentQueue;
use crate::render::cpu::CpuCanvas;

fn unit_square() -> BezPath {
    kurbo::Shape::to_path(&Rect::new(0.0, 0.0, 1.0, 1.0), 0.1)
}

fn overlay_200x100() -> CropOverlay {
    let mut overlay = CropOverlay::default();
    overlay.set_frame(Rect::new(0.0, 0.0, 200.0, 100.0));
    overlay.set_crop_path(Some(unit_square()));
    overlay
}

#[test]
fn config_defaults_and_validation() {
    let cfg = CropOverlayConfig::default();
    assert_eq!(cfg.max_fill_percent, 0.8);
    assert_eq!(cfg.shade_color, Color::rgba8(0, 0, 0, 204));
    assert!(cfg.crop_path_color.is_transparent());

    for bad in [0.0, -0.2, 1.5, f64::NAN] {
        assert!(CropOverlay::new(CropOverlayConfig::default().with_max_fill_percent(bad)).is_err());
    }
    assert!(CropOverlay::new(CropOverlayConfig::default().with_max_fill_percent(1.0)).is_ok());
}

#[test]
fn config_deserializes_with_defaults() {
    let cfg: CropOverlayConfig =
        serde_json::from_str(r##"{ "max_fill_percent": 0.5, "crop_path_color": "#ff000080" }"##)
            .unwrap();
    assert_eq!(cfg.max_fill_percent, 0.5);
    assert_eq!(cfg.shade_color, CropOverlayConfig::default().shade_color);
    assert_eq!(cfg.crop_path_color, Color::rgba8(255, 0, 0, 128));
    assert!(serde_json::from_str::<CropOverlayConfig>(r#"{ "bogus": 1 }"#).is_err());
}

#[test]
fn geometry_is_absent_until_refreshed() {
    let mut overlay = CropOverlay::default();
    assert!(overlay.crop_rect().is_none());
    overlay.set_frame(Rect::new(0.0, 0.0, 200.0, 100.0));
    overlay.refresh();
    assert!(overlay.crop_rect().is_none());
    overlay.set_crop_path(Some(unit_square()));
    assert!(overlay.crop_rect().is_none());
    overlay.refresh();
    let rect = overlay.crop_rect().unwrap();
    assert!((rect.x0 - 60.0).abs() < 1e-9 && (rect.y0 - 10.0).abs() < 1e-9);
    assert!((rect.width() - 80.0).abs() < 1e-9 && (rect.height() - 80.0).abs() < 1e-9);
    let placed = overlay.scaled_path_in_frame().unwrap();
    assert_eq!(kurbo::Shape::bounding_box(&placed), rect);
}

#[test]
fn refresh_recomputes_only_when_inputs_change() {
    let mut overlay = overlay_200x100();
    overlay.refresh();
    overlay.refresh();
    assert_eq!(overlay.fits_computed(), 1);

    overlay.set_frame(Rect::new(0.0, 0.0, 200.0, 100.0));
    overlay.refresh();
    assert_eq!(overlay.fits_computed(), 1);

    // Same size, new position.
    overlay.set_frame(Rect::new(30.0, 30.0, 230.0, 130.0));
    overlay.refresh();
    assert_eq!(overlay.fits_computed(), 1);

    overlay.set_frame(Rect::new(0.0, 0.0, 100.0, 100.0));
    overlay.refresh();
    assert_eq!(overlay.fits_computed(), 2);

    overlay.set_max_fill_percent(0.5).unwrap();
    overlay.refresh();
    assert_eq!(overlay.fits_computed(), 3);
    assert!((overlay.crop_rect().unwrap().width() - 50.0).abs() < 1e-9);

    overlay.set_crop_path(Some(unit_square()));
    overlay.refresh();
    assert_eq!(overlay.fits_computed(), 4);
}

#[test]
fn clearing_the_path_clears_geometry() {
    let mut overlay = overlay_200x100();
    overlay.refresh();
    assert!(overlay.crop_rect().is_some());
    overlay.set_crop_path(None);
    overlay.refresh();
    assert!(overlay.crop_rect().is_none());
    assert!(overlay.scaled_path_in_frame().is_none());
}

#[test]
fn geometry_goes_stale_as_soon_as_inputs_change() {
    let mut overlay = overlay_200x100();
    overlay.refresh();
    assert!(overlay.crop_rect().is_some());

    overlay.set_crop_path(None);
    assert!(overlay.crop_rect().is_none());
    assert!(overlay.scaled_path_in_frame().is_none());

    overlay.set_crop_path(Some(unit_square()));
    overlay.refresh();
    overlay.set_frame(Rect::new(0.0, 0.0, 400.0, 100.0));
    assert!(overlay.crop_rect().is_none());
    overlay.set_max_fill_percent(0.5).unwrap();
    assert!(overlay.crop_rect().is_none());
    overlay.refresh();
    let rect = overlay.crop_rect().unwrap();
    assert!((rect.x0 - 175.0).abs() < 1e-9 && (rect.width() - 50.0).abs() < 1e-9);
}

#[test]
fn draw_keeps_shade_and_hole_from_the_same_refresh() {
    let mut overlay = overlay_200x100();
    overlay.refresh();
    overlay.set_frame(Rect::new(0.0, 0.0, 400.0, 100.0));

    let blank = RasterImage::transparent(400, 100);
    let img = draw_over(&blank, &mut CpuCanvas::default(), |c| overlay.draw(c)).unwrap();
    assert_eq!(img.pixel(5, 5), Some([0, 0, 0, 204]));
    assert_eq!(img.pixel(100, 50), Some([0, 0, 0, 0]));
    assert_eq!(img.pixel(300, 50), Some([0, 0, 0, 0]));
}

#[test]
fn self_intersecting_path_is_cleared_by_nonzero_coverage() {
    let star = BezPath::from_svg("M50 0 L79 90 L2 35 L98 35 L21 90 Z").unwrap();
    let mut overlay = CropOverlay::default();
    overlay.set_frame(Rect::new(0.0, 0.0, 200.0, 200.0));
    overlay.set_crop_path(Some(star));
    let img = overlay.redraw(&mut CpuCanvas::default()).unwrap();
    // Central pentagon, winding number two.
    assert_eq!(img.pixel(100, 100), Some([0, 0, 0, 0]));
    // Top spike, winding number one.
    assert_eq!(img.pixel(100, 58), Some([0, 0, 0, 0]));
    assert_eq!(img.pixel(5, 5), Some([0, 0, 0, 204]));
}

#[test]
fn state_changes_post_coalesced_redraw_requests() {
    let queue = PresentQueue::new();
    let mut overlay = CropOverlay::default().with_redraw_requester(queue.requester());
    overlay.set_frame(Rect::new(0.0, 0.0, 10.0, 10.0));
    overlay.set_crop_path(Some(unit_square()));
    assert!(queue.drain());
    assert!(!queue.drain());

    overlay.set_frame(Rect::new(0.0, 0.0, 10.0, 10.0));
    overlay.set_shade_color(CropOverlayConfig::default().shade_color);
    assert!(!queue.drain());

    overlay.set_crop_path_color(Color::WHITE);
    assert!(queue.drain());
}

#[test]
fn redraw_shades_outside_and_clears_needs_redraw() {
    let mut overlay = overlay_200x100();
    assert!(overlay.needs_redraw());
    let img = overlay.redraw(&mut CpuCanvas::default()).unwrap();
    assert!(!overlay.needs_redraw());
    assert_eq!((img.width(), img.height()), (200, 100));
    assert_eq!(img.pixel(5, 5), Some([0, 0, 0, 204]));
    assert_eq!(img.pixel(195, 95), Some([0, 0, 0, 204]));
    assert_eq!(img.pixel(100, 50), Some([0, 0, 0, 0]));
    assert_eq!(img.pixel(61, 11), Some([0, 0, 0, 0]));
    assert_eq!(img.pixel(58, 50), Some([0, 0, 0, 204]));
}

#[test]
fn crop_path_color_fills_the_crop_region() {
    let mut overlay = overlay_200x100();
    overlay.set_crop_path_color(Color::rgba8(255, 0, 0, 255));
    let img = overlay.redraw(&mut CpuCanvas::default()).unwrap();
    assert_eq!(img.pixel(100, 50), Some([255, 0, 0, 255]));
    assert_eq!(img.pixel(5, 5), Some([0, 0, 0, 204]));
}

#[test]
fn without_a_path_the_whole_frame_is_shaded() {
    let mut overlay = CropOverlay::default();
    overlay.set_frame(Rect::new(0.0, 0.0, 20.0, 10.0));
    let img = overlay.redraw(&mut CpuCanvas::default()).unwrap();
    assert_eq!(img.pixel(10, 5), Some([0, 0, 0, 204]));
}

#[test]
fn empty_frame_cannot_be_drawn() {
    let mut overlay = CropOverlay::default();
    let err = overlay.redraw(&mut CpuCanvas::default()).unwrap_err();
    assert!(err.to_string().contains("too small"));
}

#[test]
fn overlay_ignores_pointer_input() {
    let mut overlay = overlay_200x100();
    overlay.refresh();
    assert!(!overlay.contains_point(Point::new(100.0, 50.0)));
    assert!(!overlay.contains_point(Point::new(1.0, 1.0)));
}
