use std::io::Cursor;

use super::*;
use crate::scratch::config::SeedOffset;

fn png(img: &RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img.clone())
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_round_trips_png_pixels() {
    let img = RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 40]));
    let back = decode_seed(&png(&img)).unwrap();
    assert_eq!(back, img);
}

#[test]
fn garbage_bytes_are_a_seed_error() {
    let err = decode_seed(b"not an image").unwrap_err();
    assert!(matches!(err, VeilError::Seed(_)));
}

#[test]
fn default_placement_is_centered_at_scale() {
    let cfg = SeedConfig::new("lemon.png");
    assert_eq!(placement(100, 50, &cfg, 400, 300), Some((170, 135, 60, 30)));
}

#[test]
fn offset_placement_is_fractional() {
    let mut cfg = SeedConfig::new("lemon.png");
    cfg.scale = 1.0;
    cfg.offset = Some(SeedOffset { x: 0.25, y: 0.5 });
    assert_eq!(placement(10, 10, &cfg, 200, 100), Some((50, 50, 10, 10)));
}

#[test]
fn vanishing_seed_has_no_placement() {
    let mut cfg = SeedConfig::new("dot.png");
    cfg.scale = 0.1;
    assert_eq!(placement(2, 2, &cfg, 100, 100), None);
}

#[test]
fn alpha_and_luminance_thresholds() {
    let alpha = SeedMaskMode::Alpha { threshold: 0 };
    assert!(pixel_erases([0, 0, 0, 1], alpha));
    assert!(!pixel_erases([255, 255, 255, 0], alpha));

    let luma = SeedMaskMode::Luminance { threshold: 128 };
    assert!(pixel_erases([0, 0, 0, 255], luma));
    assert!(!pixel_erases([255, 255, 255, 255], luma));
    assert!(!pixel_erases([0, 0, 0, 40], luma));
}

#[test]
fn coverage_follows_seed_alpha() {
    let mut img = RgbaImage::new(4, 4);
    img.put_pixel(1, 2, image::Rgba([0, 0, 0, 255]));
    let mut cfg = SeedConfig::new("s.png");
    cfg.scale = 1.0;
    let m = seed_coverage(&img, &cfg, 8, 8).unwrap().unwrap();
    assert_eq!((m.origin_x, m.origin_y, m.width, m.height), (2, 2, 4, 4));
    assert_eq!(m.coverage_at(3, 4), 255);
    assert_eq!(m.alpha.iter().filter(|&&a| a == 255).count(), 1);
}

#[test]
fn coverage_is_resized_before_thresholding() {
    let img = RgbaImage::from_pixel(10, 10, image::Rgba([0, 0, 0, 255]));
    let cfg = SeedConfig::new("s.png");
    let m = seed_coverage(&img, &cfg, 20, 20).unwrap().unwrap();
    assert_eq!((m.width, m.height), (6, 6));
    assert_eq!((m.origin_x, m.origin_y), (7, 7));
    assert!(m.alpha.iter().all(|&a| a == 255));
}

#[test]
fn oversized_seed_is_resampled_only_where_visible() {
    let img = RgbaImage::from_pixel(600, 600, image::Rgba([0, 0, 0, 255]));
    let mut cfg = SeedConfig::new("huge.png");
    cfg.scale = 100.0;
    let m = seed_coverage(&img, &cfg, 64, 48).unwrap().unwrap();
    assert_eq!((m.origin_x, m.origin_y, m.width, m.height), (0, 0, 64, 48));
    assert!(m.alpha.iter().all(|&a| a == 255));
}

#[test]
fn seed_hanging_off_the_edge_is_clipped() {
    let mut img = RgbaImage::new(10, 10);
    for y in 0..10 {
        img.put_pixel(9, y, image::Rgba([0, 0, 0, 255]));
    }
    let mut cfg = SeedConfig::new("s.png");
    cfg.scale = 1.0;
    cfg.offset = Some(SeedOffset { x: -0.25, y: 0.0 });
    // Seed spans x in -5..5 on a 20 px surface; only source columns 5..10 land on it.
    let m = seed_coverage(&img, &cfg, 20, 20).unwrap().unwrap();
    assert_eq!((m.origin_x, m.origin_y, m.width, m.height), (0, 0, 5, 10));
    assert_eq!(m.coverage_at(4, 3), 255);
    assert_eq!(m.coverage_at(3, 3), 0);
}

#[test]
fn seed_entirely_off_surface_has_no_coverage() {
    let img = RgbaImage::from_pixel(4, 4, image::Rgba([0, 0, 0, 255]));
    let mut cfg = SeedConfig::new("s.png");
    cfg.scale = 1.0;
    cfg.offset = Some(SeedOffset { x: 2.0, y: 0.0 });
    assert!(seed_coverage(&img, &cfg, 10, 10).unwrap().is_none());
}
