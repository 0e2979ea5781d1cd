use super::*;
use crate::render::cpu::CpuCanvas;
use kurbo::Shape;

#[test]
fn triangle_vertices_scale_to_image_bounds() {
    let path = ShadeShape::TriangleBottomRight.path(Size::new(200.0, 100.0));
    let bb = path.bounding_box();
    assert_eq!(bb, kurbo::Rect::new(100.0, 50.0, 200.0, 100.0));
    assert!((path.area().abs() - 0.5 * 100.0 * 50.0).abs() < 1e-9);
}

#[test]
fn halves_cover_half_the_area() {
    let size = Size::new(40.0, 30.0);
    for shape in [
        ShadeShape::HalfTop,
        ShadeShape::HalfBottom,
        ShadeShape::HalfLeft,
        ShadeShape::HalfRight,
    ] {
        assert!((shape.path(size).area().abs() - 600.0).abs() < 1e-9, "{shape:?}");
    }
}

#[test]
fn names_parse_and_unknown_names_fail_at_construction() {
    assert_eq!(
        "triangle-bottom-right".parse::<ShadeShape>().unwrap(),
        ShadeShape::TriangleBottomRight
    );
    let err = ShadeEffect::named("hexagon", Color::BLACK).unwrap_err();
    assert!(err.to_string().contains("unknown shade shape"));
}

#[test]
fn shades_the_named_corner_only() {
    let base = RasterImage::solid(20, 20, Color::WHITE);
    let fx = ShadeEffect::new(ShadeShape::TriangleBottomRight, Color::rgba8(0, 255, 0, 255));
    let mut canvas = CpuCanvas::default();
    let out = fx.apply(&base, &mut canvas).unwrap();

    let corner = out.pixel(19, 19).unwrap();
    assert!(corner[1] >= 250 && corner[0] <= 5 && corner[3] == 255);
    assert_eq!(out.pixel(0, 0), Some([255, 255, 255, 255]));
    assert_eq!(out.pixel(19, 0), Some([255, 255, 255, 255]));
    assert_eq!(out.pixel(0, 19), Some([255, 255, 255, 255]));
}

#[test]
fn translucent_shade_blends_with_base() {
    let base = RasterImage::solid(10, 10, Color::WHITE);
    let fx = ShadeEffect::new(ShadeShape::HalfLeft, Color::rgba8(0, 0, 0, 128));
    let mut canvas = CpuCanvas::default();
    let out = fx.apply(&base, &mut canvas).unwrap();
    let px = out.pixel(1, 5).unwrap();
    assert_eq!(px[3], 255);
    assert!((120..=135).contains(&px[0]), "{px:?}");
    assert_eq!(out.pixel(8, 5), Some([255, 255, 255, 255]));
}
