use super::*;

#[test]
fn missing_ctm_yields_origin() {
    assert_eq!(screen_to_logical(None, Point::new(40.0, 50.0)), Point::ZERO);
}

#[test]
fn singular_ctm_yields_origin() {
    let flat = Affine::scale_non_uniform(2.0, 0.0);
    assert_eq!(
        screen_to_logical(Some(flat), Point::new(40.0, 50.0)),
        Point::ZERO
    );
}

#[test]
fn scaled_and_offset_ctm_is_inverted() {
    let ctm = Affine::translate((100.0, 20.0)) * Affine::scale(2.0);
    let back = screen_to_logical(Some(ctm), Point::new(600.0, 270.0));
    assert!((back - Point::new(250.0, 125.0)).hypot() < 1e-9);
}
