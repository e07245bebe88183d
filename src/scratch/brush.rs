use kurbo::{Cap, Circle, Line, Shape, Stroke, StrokeOpts};

use crate::{
    foundation::{
        core::{BezPath, Point, Rect},
        error::{VeilError, VeilResult},
    },
    scratch::surface::CoverageMask,
};

const PATH_TOLERANCE: f64 = 0.1;

/// One brush movement between two pointer samples.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeSegment {
    pub from: Point,
    pub to: Point,
    pub brush_diameter: f64,
}

impl StrokeSegment {
    /// Round-capped outline of the segment: every point within `brush_diameter / 2`
    /// of the line between `from` and `to`.
    pub fn capsule(&self) -> BezPath {
        let style = Stroke::new(self.brush_diameter).with_caps(Cap::Round);
        kurbo::stroke(
            Line::new(self.from, self.to).path_elements(PATH_TOLERANCE),
            &style,
            &StrokeOpts::default(),
            PATH_TOLERANCE,
        )
    }

    pub fn is_degenerate(&self) -> bool {
        self.from == self.to
    }
}

/// Filled disc of `diameter` centered at `center`.
pub fn disc(center: Point, diameter: f64) -> BezPath {
    Circle::new(center, diameter * 0.5).to_path(PATH_TOLERANCE)
}

/// Rasterizes brush shapes into anti-aliased coverage tiles.
///
/// Only the shape's bounding box (clipped to the surface) is rendered; the render
/// context is reused while the tile size stays the same.
#[derive(Default)]
pub struct BrushRasterizer {
    ctx: Option<vello_cpu::RenderContext>,
}

impl std::fmt::Debug for BrushRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrushRasterizer")
            .field("cached_ctx", &self.ctx.is_some())
            .finish()
    }
}

impl BrushRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Coverage of `path` on a `surface_width x surface_height` surface.
    ///
    /// `None` when the path does not touch the surface.
    pub fn coverage(
        &mut self,
        path: &BezPath,
        surface_width: u32,
        surface_height: u32,
    ) -> VeilResult<Option<CoverageMask>> {
        let Some(tile) = tile_rect(path.bounding_box(), surface_width, surface_height) else {
            return Ok(None);
        };
        let (x0, y0) = (tile.x0 as i64, tile.y0 as i64);
        let width: u16 = (tile.width() as u32)
            .try_into()
            .map_err(|_| VeilError::raster("brush tile width exceeds u16"))?;
        let height: u16 = (tile.height() as u32)
            .try_into()
            .map_err(|_| VeilError::raster("brush tile height exceeds u16"))?;

        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            -tile.x0, -tile.y0,
        )));
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
        ctx.fill_path(&bezpath_to_cpu(path));
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        ctx.render_to_pixmap(&mut pixmap);
        self.ctx = Some(ctx);

        let alpha = pixmap
            .data_as_u8_slice()
            .chunks_exact(4)
            .map(|px| px[3])
            .collect();
        CoverageMask::new(x0, y0, u32::from(width), u32::from(height), alpha).map(Some)
    }

    pub fn disc(
        &mut self,
        center: Point,
        diameter: f64,
        surface_width: u32,
        surface_height: u32,
    ) -> VeilResult<Option<CoverageMask>> {
        self.coverage(&disc(center, diameter), surface_width, surface_height)
    }

    /// Capsule coverage; `None` for a zero-length segment, which the end discs already cover.
    pub fn segment(
        &mut self,
        segment: &StrokeSegment,
        surface_width: u32,
        surface_height: u32,
    ) -> VeilResult<Option<CoverageMask>> {
        if segment.is_degenerate() {
            return Ok(None);
        }
        self.coverage(&segment.capsule(), surface_width, surface_height)
    }
}

/// Pixel-aligned box around `bbox`, clipped to the surface.
fn tile_rect(bbox: Rect, surface_width: u32, surface_height: u32) -> Option<Rect> {
    if !bbox.x0.is_finite() || !bbox.y0.is_finite() || !bbox.x1.is_finite() || !bbox.y1.is_finite()
    {
        return None;
    }
    let clipped = bbox.expand().intersect(Rect::new(
        0.0,
        0.0,
        f64::from(surface_width),
        f64::from(surface_height),
    ));
    if clipped.width() <= 0.0 || clipped.height() <= 0.0 {
        return None;
    }
    Some(clipped)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/scratch/brush.rs"]
mod tests;
