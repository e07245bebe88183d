use crate::{
    foundation::core::{Point, Rect, Vec2},
    geometry::shape::Winding,
};

/// Arc-length position (clockwise from the top-left corner) where the ray from the
/// rect's center along `dir` leaves the rect. A zero direction points straight up.
pub fn anchor_arc_length(rect: Rect, dir: Vec2) -> f64 {
    let w = rect.width();
    let h = rect.height();
    let dir = if dir.hypot2() > 0.0 {
        dir
    } else {
        Vec2::new(0.0, -1.0)
    };
    let c = rect.center();
    let tx = if dir.x != 0.0 {
        (w * 0.5) / dir.x.abs()
    } else {
        f64::INFINITY
    };
    let ty = if dir.y != 0.0 {
        (h * 0.5) / dir.y.abs()
    } else {
        f64::INFINITY
    };
    let t = tx.min(ty);
    let hit = if t.is_finite() { c + dir * t } else { c };

    if tx <= ty {
        if dir.x > 0.0 {
            w + (hit.y - rect.y0)
        } else {
            2.0 * w + h + (rect.y1 - hit.y)
        }
    } else if dir.y < 0.0 {
        hit.x - rect.x0
    } else {
        w + h + (rect.x1 - hit.x)
    }
}

/// Point at clockwise arc length `s` (wrapped) along the rect's perimeter, starting
/// at the top-left corner.
pub fn point_at_arc_length(rect: Rect, s: f64) -> Point {
    let w = rect.width();
    let h = rect.height();
    let p = 2.0 * (w + h);
    if p <= 0.0 {
        return rect.center();
    }
    let s = s.rem_euclid(p);
    if s <= w {
        Point::new(rect.x0 + s, rect.y0)
    } else if s <= w + h {
        Point::new(rect.x1, rect.y0 + (s - w))
    } else if s <= 2.0 * w + h {
        Point::new(rect.x1 - (s - w - h), rect.y1)
    } else {
        Point::new(rect.x0, rect.y1 - (s - 2.0 * w - h))
    }
}

/// Spread `n` points evenly along the perimeter of `rect`.
///
/// Point 0 lands where the ray from the center along `anchor_dir` meets the
/// perimeter; later points follow `winding`.
pub fn distribute_on_rect(rect: Rect, n: usize, winding: Winding, anchor_dir: Vec2) -> Vec<Point> {
    if n == 0 {
        return Vec::new();
    }
    let perimeter = 2.0 * (rect.width() + rect.height());
    let start = anchor_arc_length(rect, anchor_dir);
    let step = perimeter / n as f64;
    let sign = match winding {
        Winding::Clockwise => 1.0,
        Winding::CounterClockwise => -1.0,
    };
    (0..n)
        .map(|i| point_at_arc_length(rect, start + sign * step * i as f64))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/perimeter.rs"]
mod tests;
