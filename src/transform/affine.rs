//! Screen <-> logical coordinate conversion.

use crate::foundation::core::{Affine, Point};

const MIN_DETERMINANT: f64 = 1e-12;

/// Map a screen-space point into logical (viewBox) space.
///
/// `screen_ctm` maps logical coordinates to screen coordinates, as an SVG element's
/// screen CTM does. A missing or singular matrix yields the origin so the caller's
/// drag math degenerates to a no-op instead of failing.
pub fn screen_to_logical(screen_ctm: Option<Affine>, screen: Point) -> Point {
    let Some(ctm) = screen_ctm else {
        return Point::ZERO;
    };
    let det = ctm.determinant();
    if !det.is_finite() || det.abs() < MIN_DETERMINANT {
        return Point::ZERO;
    }
    ctm.inverse() * screen
}

#[cfg(test)]
#[path = "../../tests/unit/transform/affine.rs"]
mod tests;
