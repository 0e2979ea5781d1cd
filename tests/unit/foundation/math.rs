use super::*;

#[test]
fn fingerprint_is_stable_and_content_sensitive() {
    let a = fingerprint_bytes(b"font-bytes");
    assert_eq!(a, fingerprint_bytes(b"font-bytes"));
    assert_ne!(a, fingerprint_bytes(b"font-bytez"));
}

#[test]
fn premultiply_zeroes_transparent_pixels() {
    let mut px = vec![200, 100, 50, 0, 255, 255, 255, 255];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(px, vec![0, 0, 0, 0, 255, 255, 255, 255]);
}

#[test]
fn unpremultiply_inverts_premultiply_for_opaque_and_half_alpha() {
    let mut px = vec![255, 128, 0, 128, 10, 20, 30, 255];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[..4], &[128, 64, 0, 128]);
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[..4], &[255, 128, 0, 128]);
    assert_eq!(&px[4..], &[10, 20, 30, 255]);
}

#[test]
fn positive_finite_guard() {
    assert!(is_positive_finite(0.5));
    assert!(!is_positive_finite(0.0));
    assert!(!is_positive_finite(-1.0));
    assert!(!is_positive_finite(f64::NAN));
    assert!(!is_positive_finite(f64::INFINITY));
}

#[test]
fn over_transparent_src_is_noop_and_opaque_src_replaces() {
    let dst = [10, 20, 30, 40];
    assert_eq!(premul_over_px(dst, [255, 255, 255, 0]), dst);
    assert_eq!(premul_over_px(dst, [1, 2, 3, 255]), [1, 2, 3, 255]);
}

#[test]
fn over_half_alpha_blends() {
    let out = premul_over_px([0, 0, 255, 255], [128, 0, 0, 128]);
    assert_eq!(out, [128, 0, 127, 255]);
}
