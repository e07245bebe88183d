use image::{RgbaImage, imageops::FilterType};

use crate::{
    foundation::error::{VeilError, VeilResult},
    scratch::{
        config::{SeedConfig, SeedMaskMode},
        surface::CoverageMask,
    },
};

/// Decode encoded seed bytes (PNG, JPEG, ...) to straight RGBA8.
pub fn decode_seed(bytes: &[u8]) -> VeilResult<RgbaImage> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| VeilError::seed(format!("decode seed image: {e}")))?;
    Ok(img.to_rgba8())
}

/// Where a seed of `seed_width x seed_height` lands on the surface: origin and scaled size.
///
/// `None` when the scaled seed is empty.
pub fn placement(
    seed_width: u32,
    seed_height: u32,
    config: &SeedConfig,
    surface_width: u32,
    surface_height: u32,
) -> Option<(i64, i64, u32, u32)> {
    let w = (f64::from(seed_width) * config.scale).round();
    let h = (f64::from(seed_height) * config.scale).round();
    if !(w >= 1.0 && h >= 1.0) || w > f64::from(u32::MAX) || h > f64::from(u32::MAX) {
        return None;
    }
    let (sw, sh) = (f64::from(surface_width), f64::from(surface_height));
    let (x, y) = match config.offset {
        Some(o) => (o.x * sw, o.y * sh),
        None => ((sw - w) * 0.5, (sh - h) * 0.5),
    };
    Some((x.round() as i64, y.round() as i64, w as u32, h as u32))
}

/// Whether a straight-alpha seed pixel erases the overlay under it.
pub fn pixel_erases(px: [u8; 4], mode: SeedMaskMode) -> bool {
    match mode {
        SeedMaskMode::Alpha { threshold } => px[3] > threshold,
        SeedMaskMode::Luminance { threshold } => {
            let luma = (299 * u32::from(px[0]) + 587 * u32::from(px[1]) + 114 * u32::from(px[2])
                + 500)
                / 1000;
            px[3] > 127 && luma < u32::from(threshold)
        }
    }
}

/// Scale, place and threshold `seed` into a coverage tile for the surface.
///
/// Only the part of the scaled seed that lands on the surface is resampled, so the
/// tile never exceeds the surface whatever the scale.
pub fn seed_coverage(
    seed: &RgbaImage,
    config: &SeedConfig,
    surface_width: u32,
    surface_height: u32,
) -> VeilResult<Option<CoverageMask>> {
    let Some((x, y, w, h)) = placement(
        seed.width(),
        seed.height(),
        config,
        surface_width,
        surface_height,
    ) else {
        return Ok(None);
    };
    let (Some(cols), Some(rows)) = (
        SourceWindow::new(x, w, seed.width(), surface_width),
        SourceWindow::new(y, h, seed.height(), surface_height),
    ) else {
        return Ok(None);
    };

    let crop = image::imageops::crop_imm(
        seed,
        cols.src_start,
        rows.src_start,
        cols.src_len(),
        rows.src_len(),
    )
    .to_image();
    let scaled = if (cols.scaled_len(), rows.scaled_len()) == crop.dimensions() {
        crop
    } else {
        image::imageops::resize(
            &crop,
            cols.scaled_len(),
            rows.scaled_len(),
            FilterType::Triangle,
        )
    };

    let (tile_w, tile_h) = (cols.visible_len(), rows.visible_len());
    let mut alpha = Vec::with_capacity(tile_w as usize * tile_h as usize);
    for ty in 0..tile_h {
        let sy = rows.scaled_index(ty, scaled.height());
        for tx in 0..tile_w {
            let sx = cols.scaled_index(tx, scaled.width());
            let px = scaled.get_pixel(sx, sy).0;
            alpha.push(if pixel_erases(px, config.mode) { 255 } else { 0 });
        }
    }
    CoverageMask::new(cols.visible_start, rows.visible_start, tile_w, tile_h, alpha).map(Some)
}

/// One axis of the seed: which surface pixels it covers and which source pixels
/// feed them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct SourceWindow {
    /// Surface coordinates of the visible span, `[visible_start, visible_end)`.
    visible_start: i64,
    visible_end: i64,
    /// Source pixels cropped for resampling, `[src_start, src_end)`.
    src_start: u32,
    src_end: u32,
    /// Surface coordinate where the resampled crop begins.
    scaled_start: i64,
    scaled_end: i64,
}

impl SourceWindow {
    /// `origin`/`len` place the scaled seed on a surface axis of `surface_len`;
    /// `src_total` is the seed's size on that axis. `None` when nothing is visible.
    fn new(origin: i64, len: u32, src_total: u32, surface_len: u32) -> Option<Self> {
        let visible_start = origin.max(0);
        let visible_end = (origin + i64::from(len)).min(i64::from(surface_len));
        if visible_end <= visible_start {
            return None;
        }
        // Source pixels per scaled pixel; the margin keeps the filter support whole.
        let step = f64::from(src_total) / f64::from(len);
        let margin = step.ceil() + 1.0;
        let to_src = |v: i64| (v - origin) as f64 * step;
        let src_start = (to_src(visible_start) - margin).floor().max(0.0) as u32;
        let src_end = ((to_src(visible_end) + margin).ceil() as u32).min(src_total);
        let to_scaled = |s: u32| origin + (f64::from(s) / step).round() as i64;
        Some(Self {
            visible_start,
            visible_end,
            src_start,
            src_end,
            scaled_start: to_scaled(src_start),
            scaled_end: to_scaled(src_end).max(to_scaled(src_start) + 1),
        })
    }

    fn src_len(&self) -> u32 {
        self.src_end - self.src_start
    }

    fn scaled_len(&self) -> u32 {
        (self.scaled_end - self.scaled_start) as u32
    }

    fn visible_len(&self) -> u32 {
        (self.visible_end - self.visible_start) as u32
    }

    /// Index into the resampled crop for the `i`th visible pixel.
    fn scaled_index(&self, i: u32, scaled_len: u32) -> u32 {
        let idx = self.visible_start + i64::from(i) - self.scaled_start;
        idx.clamp(0, i64::from(scaled_len) - 1) as u32
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scratch/seed.rs"]
mod tests;
