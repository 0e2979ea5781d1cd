use super::*;
use crate::effects::{RectangleEffect, ShadeEffect, ShadeShape};
use crate::foundation::color::Color;
use crate::foundation::core::Rect;

fn red() -> Effect {
    RectangleEffect::new(Rect::new(2.0, 2.0, 12.0, 12.0), Color::rgba8(255, 0, 0, 255)).unwrap().into()
}

fn blue() -> Effect {
    RectangleEffect::new(Rect::new(6.0, 6.0, 16.0, 16.0), Color::rgba8(0, 0, 255, 255)).unwrap().into()
}

#[test]
fn empty_effect_list_returns_base() {
    let base = RasterImage::solid(8, 8, Color::rgba8(10, 20, 30, 255));
    let item = ImageWithEffects::new(base.clone());
    let out = item.render(&mut CpuCanvas::default()).unwrap();
    assert_eq!(out, base);
}

#[test]
fn render_is_idempotent_and_leaves_base_alone() {
    let base = RasterImage::solid(16, 16, Color::WHITE);
    let item = ImageWithEffects::new(base.clone()).with_effects([
        red(),
        ShadeEffect::new(ShadeShape::TriangleTopLeft, Color::rgba8(0, 0, 0, 100)).into(),
    ]);
    let mut canvas = CpuCanvas::default();
    let a = item.render(&mut canvas).unwrap();
    let b = item.render(&mut canvas).unwrap();
    assert_eq!(a.data(), b.data());
    assert_eq!(item.base(), &base);
}

#[test]
fn later_effects_draw_over_earlier_ones() {
    let base = RasterImage::solid(16, 16, Color::WHITE);
    let ab = ImageWithEffects::new(base.clone()).with_effects([red(), blue()]);
    let ba = ImageWithEffects::new(base).with_effects([blue(), red()]);
    let mut canvas = CpuCanvas::default();
    let out_ab = ab.render(&mut canvas).unwrap();
    let out_ba = ba.render(&mut canvas).unwrap();

    assert_ne!(out_ab.data(), out_ba.data());
    assert_eq!(out_ab.pixel(8, 8), Some([0, 0, 255, 255]));
    assert_eq!(out_ba.pixel(8, 8), Some([255, 0, 0, 255]));
}

#[test]
fn transparent_effect_is_a_no_op() {
    let base = RasterImage::solid(16, 16, Color::WHITE);
    let mut item = ImageWithEffects::new(base.clone());
    item.push(RectangleEffect::new(Rect::new(0.0, 0.0, 16.0, 16.0), Color::TRANSPARENT).unwrap());
    let out = item.render(&mut CpuCanvas::default()).unwrap();
    assert_eq!(out.data(), base.data());
    assert_eq!(item.effects().len(), 1);
}

#[test]
fn batch_preserves_input_order() {
    let items: Vec<_> = (0..6u8)
        .map(|i| {
            ImageWithEffects::new(RasterImage::solid(4, 4, Color::rgba8(i * 40, 0, 0, 255)))
        })
        .collect();
    let out = render_batch(&items, &BatchOpts::default().with_threads(Some(2))).unwrap();
    assert_eq!(out.len(), items.len());
    for (i, img) in out.iter().enumerate() {
        assert_eq!(img.pixel(0, 0), Some([i as u8 * 40, 0, 0, 255]));
    }
}

#[test]
fn batch_matches_sequential_render() {
    let items = vec![
        ImageWithEffects::new(RasterImage::solid(16, 16, Color::WHITE)).with_effects([red()]),
        ImageWithEffects::new(RasterImage::solid(16, 16, Color::BLACK)).with_effects([blue(), red()]),
    ];
    let batch = render_batch(&items, &BatchOpts::default()).unwrap();
    let mut canvas = CpuCanvas::default();
    for (item, got) in items.iter().zip(&batch) {
        assert_eq!(&item.render(&mut canvas).unwrap(), got);
    }
}

#[test]
fn zero_threads_is_rejected() {
    let err = render_batch(&[], &BatchOpts::default().with_threads(Some(0))).unwrap_err();
    assert!(err.to_string().contains("threads"));
}
