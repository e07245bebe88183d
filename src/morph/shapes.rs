//! Responsive start/end shapes. Both functions are pure in `(config, viewport)`.

use crate::{
    foundation::{
        core::{Point, Viewport},
        error::VeilResult,
    },
    geometry::{
        cover::{cover_scale, inset_rect, visible_logical_rect},
        perimeter::distribute_on_rect,
        shape::{lerp_shapes, scale_shape_about, winding},
    },
    morph::config::MorphConfig,
    transform::non_linear::{clamp01, clamp_range},
};

/// Blend factor between the wide (0) and tall (1) reference shapes.
pub fn aspect_blend(config: &MorphConfig, viewport: Viewport) -> f64 {
    if config.tall_points.is_none() || !viewport.is_usable() {
        return 0.0;
    }
    let span = config.wide_aspect - config.tall_aspect;
    if span <= 0.0 {
        return 0.0;
    }
    clamp01((config.wide_aspect - viewport.aspect()) / span)
}

/// Uniform start-shape scale derived from viewport width.
pub fn responsive_scale(config: &MorphConfig, viewport: Viewport) -> f64 {
    let r = config.responsive;
    if !viewport.is_usable() {
        return r.max_scale;
    }
    clamp_range(viewport.width / r.reference_width, r.min_scale, r.max_scale)
}

/// The artistic start shape for `viewport`: the wide/tall references blended by
/// aspect ratio, then scaled about the logical center by viewport width.
pub fn start_shape_for(config: &MorphConfig, viewport: Viewport) -> VeilResult<Vec<Point>> {
    let blended = match &config.tall_points {
        Some(tall) => lerp_shapes(
            &config.start_points,
            tall,
            aspect_blend(config, viewport),
        )?,
        None => config.start_points.clone(),
    };
    Ok(scale_shape_about(
        &blended,
        config.logical_center(),
        responsive_scale(config, viewport),
    ))
}

/// The end shape for `viewport`: the visible part of the cover-scaled viewBox, inset
/// by the edge and header paddings, with the points spread evenly along its
/// perimeter in the start shape's winding order.
pub fn end_shape_for(config: &MorphConfig, viewport: Viewport) -> VeilResult<Vec<Point>> {
    let start = start_shape_for(config, viewport)?;
    let logical = config.logical_size();
    let scale = cover_scale(logical, viewport);
    let rect = inset_rect(
        visible_logical_rect(logical, viewport),
        config.edge_padding,
        config.header_padding_px / scale,
    );
    let anchor_dir = start
        .first()
        .map(|p| *p - rect.center())
        .unwrap_or_default();
    Ok(distribute_on_rect(
        rect,
        start.len(),
        winding(&start),
        anchor_dir,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/morph/shapes.rs"]
mod tests;
