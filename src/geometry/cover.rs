use crate::foundation::core::{Point, Rect, Size, Viewport};

/// Uniform screen-pixels-per-logical-unit scale of a `xMidYMid slice` viewBox.
///
/// Unusable viewports or logical sizes give `1.0`.
pub fn cover_scale(logical: Size, viewport: Viewport) -> f64 {
    if !viewport.is_usable() || logical.width <= 0.0 || logical.height <= 0.0 {
        return 1.0;
    }
    (viewport.width / logical.width).max(viewport.height / logical.height)
}

/// The part of the logical viewBox that remains visible once it is scaled to cover
/// the viewport and center-cropped.
pub fn visible_logical_rect(logical: Size, viewport: Viewport) -> Rect {
    let full = Rect::from_origin_size(Point::ZERO, logical);
    if !viewport.is_usable() || logical.width <= 0.0 || logical.height <= 0.0 {
        return full;
    }
    let s = cover_scale(logical, viewport);
    let w = (viewport.width / s).min(logical.width);
    let h = (viewport.height / s).min(logical.height);
    let x0 = (logical.width - w) * 0.5;
    let y0 = (logical.height - h) * 0.5;
    Rect::new(x0, y0, x0 + w, y0 + h)
}

/// Shrink `rect` by `edge` on every side and by an extra `top` on the top side.
///
/// Insets larger than the rect collapse it onto its center line instead of
/// producing an inverted rectangle.
pub fn inset_rect(rect: Rect, edge: f64, top: f64) -> Rect {
    let edge = edge.max(0.0);
    let top = top.max(0.0);
    let mut x0 = rect.x0 + edge;
    let mut x1 = rect.x1 - edge;
    let mut y0 = rect.y0 + edge + top;
    let mut y1 = rect.y1 - edge;
    if x0 > x1 {
        let cx = (rect.x0 + rect.x1) * 0.5;
        x0 = cx;
        x1 = cx;
    }
    if y0 > y1 {
        let cy = ((rect.y0 + edge + top).min(rect.y1) + (rect.y1 - edge).max(rect.y0)) * 0.5;
        y0 = cy;
        y1 = cy;
    }
    Rect::new(x0, y0, x1, y1)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/cover.rs"]
mod tests;
