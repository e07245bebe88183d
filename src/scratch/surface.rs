use crate::foundation::{
    core::{Rect, Rgba8Premul},
    error::{VeilError, VeilResult},
    math::mul_div255_u8,
};

/// Alpha-only coverage tile placed in surface pixel coordinates.
///
/// The origin may lie outside the surface; only the overlapping part is applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoverageMask {
    pub origin_x: i64,
    pub origin_y: i64,
    pub width: u32,
    pub height: u32,
    pub alpha: Vec<u8>,
}

impl CoverageMask {
    pub fn new(
        origin_x: i64,
        origin_y: i64,
        width: u32,
        height: u32,
        alpha: Vec<u8>,
    ) -> VeilResult<Self> {
        if alpha.len() != (width as usize).saturating_mul(height as usize) {
            return Err(VeilError::raster(format!(
                "coverage tile {width}x{height} has {} alpha bytes",
                alpha.len()
            )));
        }
        Ok(Self {
            origin_x,
            origin_y,
            width,
            height,
            alpha,
        })
    }

    /// Coverage at a surface pixel; 0 outside the tile.
    pub fn coverage_at(&self, x: i64, y: i64) -> u8 {
        let lx = x - self.origin_x;
        let ly = y - self.origin_y;
        if lx < 0 || ly < 0 || lx >= i64::from(self.width) || ly >= i64::from(self.height) {
            return 0;
        }
        self.alpha[ly as usize * self.width as usize + lx as usize]
    }

    pub fn is_empty(&self) -> bool {
        self.alpha.iter().all(|&a| a == 0)
    }
}

/// Premultiplied RGBA8 overlay. Alpha 0 reads as revealed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScratchSurface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl ScratchSurface {
    /// Largest edge the brush rasterizer can address.
    pub const MAX_EDGE: u32 = u16::MAX as u32;

    /// A fully transparent surface.
    pub fn new(width: u32, height: u32) -> VeilResult<Self> {
        if width > Self::MAX_EDGE || height > Self::MAX_EDGE {
            return Err(VeilError::raster(format!(
                "surface {width}x{height} exceeds {} pixels per edge",
                Self::MAX_EDGE
            )));
        }
        Ok(Self {
            width,
            height,
            data: vec![0; (width as usize) * (height as usize) * 4],
        })
    }

    /// A surface filled with `color`.
    pub fn filled(width: u32, height: u32, color: Rgba8Premul) -> VeilResult<Self> {
        let mut s = Self::new(width, height)?;
        s.fill(color);
        Ok(s)
    }

    pub fn fill(&mut self, color: Rgba8Premul) {
        let px = color.to_array();
        for dst in self.data.chunks_exact_mut(4) {
            dst.copy_from_slice(&px);
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }

    /// Premultiplied RGBA8 bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn pixel(&self, x: i64, y: i64) -> Option<[u8; 4]> {
        let i = self.index(x, y)?;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    pub fn alpha_at(&self, x: i64, y: i64) -> Option<u8> {
        self.index(x, y).map(|i| self.data[i + 3])
    }

    /// `dst = dst * (1 - mask)` on all four channels.
    ///
    /// Returns the touched pixel rectangle, or `None` when the mask misses the surface.
    pub fn destination_out(&mut self, mask: &CoverageMask) -> Option<Rect> {
        let x0 = mask.origin_x.max(0);
        let y0 = mask.origin_y.max(0);
        let x1 = (mask.origin_x + i64::from(mask.width)).min(i64::from(self.width));
        let y1 = (mask.origin_y + i64::from(mask.height)).min(i64::from(self.height));
        if x0 >= x1 || y0 >= y1 {
            return None;
        }

        let stride = self.width as usize * 4;
        for y in y0..y1 {
            let row = (y - mask.origin_y) as usize * mask.width as usize;
            let dst_row = y as usize * stride;
            for x in x0..x1 {
                let cov = mask.alpha[row + (x - mask.origin_x) as usize];
                if cov == 0 {
                    continue;
                }
                let keep = 255 - u16::from(cov);
                let i = dst_row + x as usize * 4;
                for c in &mut self.data[i..i + 4] {
                    *c = mul_div255_u8(u16::from(*c), keep);
                }
            }
        }
        Some(Rect::new(x0 as f64, y0 as f64, x1 as f64, y1 as f64))
    }

    /// Share of pixels whose alpha is below `epsilon`. An empty surface is fully revealed.
    pub fn revealed_fraction(&self, epsilon: u8) -> f64 {
        let total = self.data.len() / 4;
        if total == 0 {
            return 1.0;
        }
        let revealed = self
            .data
            .chunks_exact(4)
            .filter(|px| px[3] < epsilon)
            .count();
        revealed as f64 / total as f64
    }

    /// Straight-alpha copy for encoding.
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        let mut out = self.data.clone();
        unpremultiply_rgba8_in_place(&mut out);
        image::RgbaImage::from_fn(self.width, self.height, |x, y| {
            let i = (y as usize * self.width as usize + x as usize) * 4;
            image::Rgba([out[i], out[i + 1], out[i + 2], out[i + 3]])
        })
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * 4)
    }
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scratch/surface.rs"]
mod tests;
