use crate::{
    foundation::{
        core::Point,
        error::{VeilError, VeilResult},
    },
    transform::linear::{lerp_point, scale_about},
};

/// Polygon traversal direction in a y-down coordinate space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Winding {
    Clockwise,
    CounterClockwise,
}

/// Shoelace signed area; positive means clockwise on screen (y grows downwards).
pub fn signed_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut acc = 0.0;
    for (i, p) in points.iter().enumerate() {
        let q = points[(i + 1) % points.len()];
        acc += p.x * q.y - q.x * p.y;
    }
    acc * 0.5
}

/// Degenerate (zero-area) polygons are treated as clockwise.
pub fn winding(points: &[Point]) -> Winding {
    if signed_area(points) < 0.0 {
        Winding::CounterClockwise
    } else {
        Winding::Clockwise
    }
}

/// Blend two equal-length shapes point by point.
pub fn lerp_shapes(a: &[Point], b: &[Point], t: f64) -> VeilResult<Vec<Point>> {
    if a.len() != b.len() {
        return Err(VeilError::validation(format!(
            "cannot blend shapes of {} and {} points",
            a.len(),
            b.len()
        )));
    }
    Ok(a.iter()
        .zip(b)
        .map(|(&p, &q)| lerp_point(p, q, t))
        .collect())
}

pub fn scale_shape_about(points: &[Point], center: Point, factor: f64) -> Vec<Point> {
    points
        .iter()
        .map(|&p| scale_about(p, center, factor))
        .collect()
}

/// Parse an SVG `points` attribute (`"x,y x,y ..."`; commas and whitespace are
/// interchangeable separators).
pub fn parse_points_attr(s: &str) -> VeilResult<Vec<Point>> {
    let nums = s
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(|t| {
            t.parse::<f64>()
                .map_err(|e| VeilError::validation(format!("invalid coordinate '{t}': {e}")))
        })
        .collect::<VeilResult<Vec<f64>>>()?;
    if nums.len() % 2 != 0 {
        return Err(VeilError::validation(
            "points attribute has an odd number of coordinates",
        ));
    }
    Ok(nums
        .chunks_exact(2)
        .map(|xy| Point::new(xy[0], xy[1]))
        .collect())
}

/// Format points for an SVG `points` attribute.
pub fn format_points_attr(points: &[Point]) -> String {
    let mut out = String::with_capacity(points.len() * 16);
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&format!("{},{}", p.x, p.y));
    }
    out
}

/// Same as [`format_points_attr`] with coordinates rounded to integers.
pub fn format_points_rounded(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", p.x.round() as i64, p.y.round() as i64))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/shape.rs"]
mod tests;
