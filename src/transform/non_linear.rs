//! Non-linear transform utilities.

#[inline]
/// Clamp scalar value to normalized range `[0, 1]`.
pub fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

#[inline]
/// Clamp `x` into `[min, max]`, tolerating an inverted range by swapping it.
pub fn clamp_range(x: f64, min: f64, max: f64) -> f64 {
    if min <= max {
        x.clamp(min, max)
    } else {
        x.clamp(max, min)
    }
}
