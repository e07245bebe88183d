use super::*;

fn session(axis: Vec2, start_progress: f64) -> MorphSession {
    MorphSession {
        pointer: PointerId(1),
        active_point: 0,
        active_group: 0,
        drag_start: Point::new(100.0, 100.0),
        drag_start_progress: start_progress,
        axis,
    }
}

#[test]
fn axis_prefers_start_to_end() {
    let axis = MorphSession::drag_axis(
        Point::new(0.0, 0.0),
        Point::new(0.0, -50.0),
        Point::new(10.0, 10.0),
    );
    assert_eq!(axis, Vec2::new(0.0, -1.0));
}

#[test]
fn axis_falls_back_to_outward_then_zero() {
    let p = Point::new(20.0, 10.0);
    assert_eq!(
        MorphSession::drag_axis(p, p, Point::new(10.0, 10.0)),
        Vec2::new(1.0, 0.0)
    );
    assert_eq!(MorphSession::drag_axis(p, p, p), Vec2::ZERO);
}

#[test]
fn movement_is_projected_onto_axis() {
    let s = session(Vec2::new(1.0, 0.0), 0.0);
    // Perpendicular movement does nothing.
    assert_eq!(s.progress_at(Point::new(100.0, 400.0), 120.0), 0.0);
    assert_eq!(s.progress_at(Point::new(160.0, 400.0), 120.0), 0.5);
}

#[test]
fn progress_is_clamped_for_huge_deltas() {
    let s = session(Vec2::new(0.0, 1.0), 0.4);
    assert_eq!(s.progress_at(Point::new(100.0, 1e9), 120.0), 1.0);
    assert_eq!(s.progress_at(Point::new(100.0, -1e9), 120.0), 0.0);
}

#[test]
fn zero_axis_keeps_start_progress() {
    let s = session(Vec2::ZERO, 0.3);
    assert_eq!(s.progress_at(Point::new(500.0, 500.0), 120.0), 0.3);
}
