use std::io::Cursor;

use super::*;
use crate::{
    foundation::core::Viewport,
    scratch::{config::SeedMaskMode, host::HeadlessScratchHost},
};

const P: PointerId = PointerId(1);
const BELOW: ElementHandle = ElementHandle(42);

fn host(w: f64, h: f64) -> HeadlessScratchHost {
    HeadlessScratchHost::new(Viewport::new(w, h))
}

fn canvas(w: f64, h: f64) -> ScratchRevealCanvas<HeadlessScratchHost> {
    ScratchRevealCanvas::try_initialize(ScratchConfig::default(), host(w, h)).unwrap()
}

fn png(img: &image::RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img.clone())
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn fresh_overlay_is_covered_and_presented() {
    let c = canvas(64.0, 48.0);
    let s = c.surface().unwrap();
    assert_eq!((s.width(), s.height()), (64, 48));
    for (x, y) in [(0.0, 0.0), (31.5, 20.0), (63.9, 47.9)] {
        assert!(!c.is_revealed(x, y));
    }
    assert_eq!(c.host().damage, vec![Rect::new(0.0, 0.0, 64.0, 48.0)]);
}

#[test]
fn out_of_bounds_reads_revealed() {
    let c = canvas(10.0, 10.0);
    assert!(c.is_revealed(-1.0, 5.0));
    assert!(c.is_revealed(10.0, 5.0));
    assert!(c.is_revealed(5.0, f64::NAN));
}

#[test]
fn stroke_round_trip() {
    let mut c = canvas(400.0, 300.0);
    c.start_stroke(Point::new(100.0, 100.0));
    assert!(c.is_revealed(100.0, 100.0));
    assert!(!c.is_revealed(220.0, 100.0));
    assert!(c.host().scroll_locked);
    c.end_stroke();
    assert!(!c.host().scroll_locked);
    c.end_stroke();
    assert!(!c.host().scroll_locked);
}

#[test]
fn fast_strokes_leave_no_gap() {
    let mut c = canvas(800.0, 200.0);
    let d = c.config().brush_diameter;
    let (a, b) = (Point::new(70.0, 100.0), Point::new(730.0, 100.0));
    c.start_stroke(a);
    c.continue_stroke(b);
    for i in 0..=100 {
        let x = a.x + (b.x - a.x) * f64::from(i) / 100.0;
        for dy in [-(d * 0.5 - 3.0), 0.0, d * 0.5 - 3.0] {
            assert!(c.is_revealed(x, 100.0 + dy), "gap at ({x}, {dy})");
        }
    }
    assert!(!c.is_revealed(400.0, 100.0 + d * 0.5 + 2.0));
}

#[test]
fn continue_without_stroke_is_a_no_op() {
    let mut c = canvas(100.0, 100.0);
    c.continue_stroke(Point::new(50.0, 50.0));
    assert!(!c.is_revealed(50.0, 50.0));
    assert_eq!(c.host().damage.len(), 1);
}

#[test]
fn seed_mask_is_erased_at_initialization() {
    let mut seed = image::RgbaImage::new(10, 10);
    for y in 0..10 {
        for x in 0..5 {
            seed.put_pixel(x, y, image::Rgba([0, 0, 0, 255]));
        }
    }
    let mut cfg = ScratchConfig::viewport_with_seed("lemon.png");
    cfg.seed.as_mut().unwrap().scale = 1.0;
    let h = host(30.0, 30.0).with_seed("lemon.png", png(&seed));
    let c = ScratchRevealCanvas::try_initialize(cfg, h).unwrap();
    // Seed occupies 10..20; its left half is opaque.
    assert!(c.is_revealed(12.0, 15.0));
    assert!(!c.is_revealed(17.0, 15.0));
    assert!(!c.is_revealed(5.0, 15.0));
}

#[test]
fn luminance_seed_erases_dark_pixels() {
    let mut seed = image::RgbaImage::from_pixel(4, 4, image::Rgba([255, 255, 255, 255]));
    seed.put_pixel(0, 0, image::Rgba([0, 0, 0, 255]));
    let mut cfg = ScratchConfig::viewport_with_seed("art.png");
    let s = cfg.seed.as_mut().unwrap();
    s.scale = 1.0;
    s.mode = SeedMaskMode::Luminance { threshold: 128 };
    let c = ScratchRevealCanvas::try_initialize(cfg, host(8.0, 8.0).with_seed("art.png", png(&seed)))
        .unwrap();
    assert!(c.is_revealed(2.0, 2.0));
    assert!(!c.is_revealed(3.0, 2.0));
}

#[test]
fn missing_seed_keeps_overlay_covered() {
    let cfg = ScratchConfig::viewport_with_seed("nope.png");
    let c = ScratchRevealCanvas::try_initialize(cfg, host(20.0, 20.0)).unwrap();
    assert_eq!(c.revealed_fraction(), 0.0);
}

#[test]
fn missing_canvas_makes_overlay_inert() {
    let h = host(20.0, 20.0).without("#scratchContainer canvas");
    let mut c = ScratchRevealCanvas::initialize(ScratchConfig::default(), h);
    assert!(!c.is_active());
    c.start_stroke(Point::new(5.0, 5.0));
    c.handle_event(ScratchEvent::PointerEnter {
        screen: Point::ZERO,
    });
    assert!(!c.host().scroll_locked);
    assert!(c.host().damage.is_empty());
    assert!(c.is_revealed(5.0, 5.0));
    assert_eq!(c.revealed_fraction(), 1.0);

    let h = host(20.0, 20.0).with_container(None);
    let err = ScratchRevealCanvas::try_initialize(ScratchConfig::default(), h)
        .err()
        .unwrap();
    assert!(matches!(err, VeilError::MissingElement(_)));
}

#[test]
fn pass_through_skips_the_canvas_itself() {
    let h = host(100.0, 100.0).with_element(Rect::new(0.0, 0.0, 50.0, 50.0), BELOW);
    let mut c = ScratchRevealCanvas::try_initialize(ScratchConfig::default(), h).unwrap();
    assert_eq!(
        c.pass_through_point(Point::new(10.0, 10.0), Point::new(10.0, 10.0)),
        Some(BELOW)
    );
    assert_eq!(c.pass_through_point(Point::ZERO, Point::new(80.0, 80.0)), None);
    assert_eq!(c.host().clicks, vec![BELOW]);
    assert!(c.host().intercepting);
}

#[test]
fn click_on_revealed_area_passes_through() {
    let h = host(300.0, 300.0).with_element(Rect::new(0.0, 0.0, 300.0, 300.0), BELOW);
    let mut c = ScratchRevealCanvas::try_initialize(ScratchConfig::default(), h).unwrap();
    let at = Point::new(150.0, 150.0);

    // First tap scratches a covered point: no click.
    c.handle_event(ScratchEvent::PointerDown {
        pointer: P,
        pos: at,
        screen: at,
    });
    c.handle_event(ScratchEvent::PointerUp {
        pointer: P,
        pos: at,
        screen: at,
    });
    assert!(c.host().clicks.is_empty());
    assert!(c.is_revealed(150.0, 150.0));

    // Second tap within slop on the revealed point is forwarded.
    c.handle_event(ScratchEvent::PointerDown {
        pointer: P,
        pos: at,
        screen: at,
    });
    let nudged = at + crate::foundation::core::Vec2::new(3.0, 2.0);
    c.handle_event(ScratchEvent::PointerMove {
        pointer: P,
        pos: nudged,
        screen: nudged,
    });
    c.handle_event(ScratchEvent::PointerUp {
        pointer: P,
        pos: nudged,
        screen: nudged,
    });
    assert_eq!(c.host().clicks, vec![BELOW]);
    assert!(!c.host().scroll_locked);
}

#[test]
fn drag_beyond_slop_is_not_a_click() {
    let h = host(300.0, 300.0).with_element(Rect::new(0.0, 0.0, 300.0, 300.0), BELOW);
    let mut c = ScratchRevealCanvas::try_initialize(ScratchConfig::default(), h).unwrap();
    c.start_stroke(Point::new(100.0, 100.0));
    c.end_stroke();
    let from = Point::new(100.0, 100.0);
    let to = Point::new(120.0, 100.0);
    c.handle_event(ScratchEvent::PointerDown {
        pointer: P,
        pos: from,
        screen: from,
    });
    c.handle_event(ScratchEvent::PointerMove {
        pointer: P,
        pos: to,
        screen: to,
    });
    c.handle_event(ScratchEvent::PointerUp {
        pointer: P,
        pos: from,
        screen: from,
    });
    assert!(c.host().clicks.is_empty());
}

#[test]
fn other_pointers_do_not_end_or_extend_the_stroke() {
    let mut c = canvas(300.0, 100.0);
    let start = Point::new(50.0, 50.0);
    c.handle_event(ScratchEvent::PointerDown {
        pointer: P,
        pos: start,
        screen: start,
    });
    let far = Point::new(250.0, 50.0);
    c.handle_event(ScratchEvent::PointerMove {
        pointer: PointerId(9),
        pos: far,
        screen: far,
    });
    assert!(!c.is_revealed(250.0, 50.0));
    c.handle_event(ScratchEvent::PointerUp {
        pointer: PointerId(9),
        pos: far,
        screen: far,
    });
    assert!(c.is_stroking());
    c.handle_event(ScratchEvent::PointerCancel { pointer: P });
    assert!(!c.is_stroking());
    assert!(!c.host().scroll_locked);
}

#[test]
fn cursor_indicator_follows_the_pointer() {
    let mut c = canvas(100.0, 100.0);
    c.handle_event(ScratchEvent::PointerEnter {
        screen: Point::new(1.0, 2.0),
    });
    assert!(c.host().cursor.visible);
    c.handle_event(ScratchEvent::PointerMove {
        pointer: P,
        pos: Point::new(5.0, 6.0),
        screen: Point::new(15.0, 16.0),
    });
    assert_eq!(c.host().cursor.position, Point::new(15.0, 16.0));
    c.handle_event(ScratchEvent::PointerDown {
        pointer: P,
        pos: Point::new(5.0, 6.0),
        screen: Point::new(15.0, 16.0),
    });
    assert!(c.host().cursor.scratching);
    c.handle_event(ScratchEvent::PointerLeave);
    assert!(!c.host().cursor.visible);
    assert_eq!(c.cursor(), c.host().cursor);
}

#[test]
fn resize_rebuilds_and_discards_scratches() {
    let mut c = canvas(200.0, 200.0);
    c.start_stroke(Point::new(100.0, 100.0));
    c.end_stroke();
    assert!(c.revealed_fraction() > 0.0);
    c.host_mut().container = Some(Viewport::new(120.0, 80.0));
    c.handle_event(ScratchEvent::Resize);
    let s = c.surface().unwrap();
    assert_eq!((s.width(), s.height()), (120, 80));
    assert_eq!(c.revealed_fraction(), 0.0);
}

#[test]
fn resize_during_stroke_waits_for_the_stroke_to_end() {
    let mut c = canvas(200.0, 200.0);
    let at = Point::new(100.0, 100.0);
    c.handle_event(ScratchEvent::PointerDown {
        pointer: P,
        pos: at,
        screen: at,
    });
    c.host_mut().container = Some(Viewport::new(200.0, 150.0));
    c.handle_event(ScratchEvent::Resize);
    assert!(c.is_stroking());
    assert!(c.has_pending_resize());
    assert_eq!(c.surface().unwrap().height(), 200);
    assert!(c.is_revealed(100.0, 100.0));

    let next = Point::new(140.0, 100.0);
    c.handle_event(ScratchEvent::PointerMove {
        pointer: P,
        pos: next,
        screen: next,
    });
    assert!(c.is_revealed(140.0, 100.0));

    c.handle_event(ScratchEvent::PointerUp {
        pointer: P,
        pos: next,
        screen: next,
    });
    assert!(!c.is_stroking());
    assert!(!c.has_pending_resize());
    assert!(!c.host().scroll_locked);
    let s = c.surface().unwrap();
    assert_eq!((s.width(), s.height()), (200, 150));
    assert_eq!(c.revealed_fraction(), 0.0);
}

#[test]
fn overlay_returns_when_the_container_is_laid_out_again() {
    let mut c = canvas(200.0, 200.0);
    c.host_mut().container = None;
    c.on_resize();
    assert!(!c.is_active());
    assert!(c.is_revealed(100.0, 100.0));

    c.host_mut().container = Some(Viewport::new(200.0, 200.0));
    c.on_resize();
    assert!(c.is_active());
    assert!(!c.is_revealed(100.0, 100.0));
    assert_eq!(c.revealed_fraction(), 0.0);
}

#[test]
fn unlaid_container_at_initialize_recovers_on_resize() {
    let h = host(50.0, 50.0).with_container(None);
    let mut c = ScratchRevealCanvas::initialize(ScratchConfig::default(), h);
    assert!(!c.is_active());
    c.host_mut().container = Some(Viewport::new(50.0, 40.0));
    c.handle_event(ScratchEvent::Resize);
    assert!(c.is_active());
    assert_eq!(c.surface().unwrap().height(), 40);
}

#[test]
fn missing_anchor_stays_inert_across_resizes() {
    let h = host(20.0, 20.0).without("#scratchContainer");
    let mut c = ScratchRevealCanvas::initialize(ScratchConfig::default(), h);
    c.on_resize();
    assert!(!c.is_active());
    assert!(c.host().damage.is_empty());
}

#[test]
fn second_pointer_cannot_take_over_a_stroke() {
    let mut c = canvas(400.0, 100.0);
    let start = Point::new(50.0, 50.0);
    c.handle_event(ScratchEvent::PointerDown {
        pointer: P,
        pos: start,
        screen: start,
    });
    let other = Point::new(350.0, 50.0);
    c.handle_event(ScratchEvent::PointerDown {
        pointer: PointerId(7),
        pos: other,
        screen: other,
    });
    assert!(!c.is_revealed(350.0, 50.0));

    let next = Point::new(200.0, 50.0);
    c.handle_event(ScratchEvent::PointerMove {
        pointer: P,
        pos: next,
        screen: next,
    });
    assert!(c.is_revealed(200.0, 50.0));
    assert!(c.host().scroll_locked);

    c.handle_event(ScratchEvent::PointerUp {
        pointer: P,
        pos: next,
        screen: next,
    });
    assert!(!c.is_stroking());
    assert!(!c.host().scroll_locked);
    assert!(!c.host().cursor.scratching);
}

#[test]
fn fractional_container_sizes_truncate() {
    let c = canvas(99.7, 10.2);
    let img = c.to_rgba_image().unwrap();
    assert_eq!(img.dimensions(), (99, 10));
    assert_eq!(img.get_pixel(0, 0).0, [0x39, 0xff, 0x14, 255]);
}
