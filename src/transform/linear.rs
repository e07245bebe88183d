//! Linear transform helpers.

use crate::foundation::core::{Point, Vec2};

#[inline]
/// Linearly interpolate between two vectors with clamped parameter `t`.
pub fn lerp_vec2(a: Vec2, b: Vec2, t: f64) -> Vec2 {
    let t = t.clamp(0.0, 1.0);
    Vec2::new(a.x + ((b.x - a.x) * t), a.y + ((b.y - a.y) * t))
}

#[inline]
/// Linearly interpolate between two points with clamped parameter `t`.
pub fn lerp_point(a: Point, b: Point, t: f64) -> Point {
    lerp_vec2(a.to_vec2(), b.to_vec2(), t).to_point()
}

/// Scale `p` about `center` by a uniform factor.
#[inline]
pub fn scale_about(p: Point, center: Point, factor: f64) -> Point {
    center + (p - center) * factor
}
