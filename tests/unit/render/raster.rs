use std::io::Cursor;

use super::*;

#[test]
fn byte_len_is_validated() {
    assert!(RasterImage::from_premul_rgba8(2, 2, vec![0; 16]).is_ok());
    let err = RasterImage::from_premul_rgba8(2, 2, vec![0; 15]).unwrap_err();
    assert!(err.to_string().contains("byte len mismatch"));
}

#[test]
fn solid_stores_premultiplied_pixels() {
    let img = RasterImage::solid(3, 2, Color::rgba8(255, 0, 0, 128));
    assert_eq!(img.data().len(), 3 * 2 * 4);
    assert_eq!(img.pixel(2, 1), Some([128, 0, 0, 128]));
    assert_eq!(img.pixel(3, 0), None);
}

#[test]
fn clones_share_storage_and_compare_equal() {
    let a = RasterImage::solid(4, 4, Color::WHITE);
    let b = a.clone();
    assert_eq!(a, b);
    assert_eq!(a.data().as_ptr(), b.data().as_ptr());
}

#[test]
fn decode_premultiplies_png_pixels() {
    let mut src = image::RgbaImage::new(2, 1);
    src.put_pixel(0, 0, image::Rgba([255, 255, 255, 128]));
    src.put_pixel(1, 0, image::Rgba([10, 20, 30, 255]));
    let mut encoded = Vec::new();
    src.write_to(&mut Cursor::new(&mut encoded), image::ImageFormat::Png)
        .unwrap();

    let img = RasterImage::decode(&encoded).unwrap();
    assert_eq!((img.width(), img.height()), (2, 1));
    assert_eq!(img.pixel(0, 0), Some([128, 128, 128, 128]));
    assert_eq!(img.pixel(1, 0), Some([10, 20, 30, 255]));

    let back = img.to_rgba_image().unwrap();
    assert_eq!(back.get_pixel(0, 0).0, [255, 255, 255, 128]);
}

#[test]
fn decode_rejects_garbage() {
    assert!(RasterImage::decode(b"definitely not an image").is_err());
}
