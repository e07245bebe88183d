use super::*;

fn rect() -> Rect {
    Rect::new(25.0, 25.0, 575.0, 775.0)
}

fn on_perimeter(r: Rect, p: Point) -> bool {
    let eps = 1e-9;
    let on_x = (p.x - r.x0).abs() < eps || (p.x - r.x1).abs() < eps;
    let on_y = (p.y - r.y0).abs() < eps || (p.y - r.y1).abs() < eps;
    let inside = p.x >= r.x0 - eps && p.x <= r.x1 + eps && p.y >= r.y0 - eps && p.y <= r.y1 + eps;
    inside && (on_x || on_y)
}

#[test]
fn upward_anchor_hits_top_center() {
    let r = rect();
    let s = anchor_arc_length(r, Vec2::new(0.0, -10.0));
    assert_eq!(point_at_arc_length(r, s), Point::new(300.0, 25.0));
}

#[test]
fn anchors_on_each_edge() {
    let r = rect();
    let right = point_at_arc_length(r, anchor_arc_length(r, Vec2::new(1.0, 0.0)));
    assert_eq!(right, Point::new(575.0, 400.0));
    let bottom = point_at_arc_length(r, anchor_arc_length(r, Vec2::new(0.0, 1.0)));
    assert_eq!(bottom, Point::new(300.0, 775.0));
    let left = point_at_arc_length(r, anchor_arc_length(r, Vec2::new(-1.0, 0.0)));
    assert_eq!(left, Point::new(25.0, 400.0));
}

#[test]
fn distribution_is_even_and_on_perimeter() {
    let r = rect();
    let pts = distribute_on_rect(r, 12, Winding::Clockwise, Vec2::new(0.0, -1.0));
    assert_eq!(pts.len(), 12);
    assert_eq!(pts[0], Point::new(300.0, 25.0));
    for p in &pts {
        assert!(on_perimeter(r, *p), "{p:?} not on perimeter");
    }
    // Clockwise from top center goes right first.
    assert!(pts[1].x > pts[0].x);
    assert_eq!(pts[1].y, 25.0);
}

#[test]
fn counter_clockwise_goes_left_first() {
    let r = rect();
    let pts = distribute_on_rect(r, 8, Winding::CounterClockwise, Vec2::new(0.0, -1.0));
    assert!(pts[1].x < pts[0].x);
}

#[test]
fn degenerate_rect_collapses_to_center() {
    let r = Rect::new(10.0, 10.0, 10.0, 10.0);
    let pts = distribute_on_rect(r, 4, Winding::Clockwise, Vec2::new(1.0, 1.0));
    assert!(pts.iter().all(|p| *p == Point::new(10.0, 10.0)));
}
