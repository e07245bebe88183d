use crate::foundation::error::{VeilError, VeilResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Size, Vec2};

/// On-screen viewport (or container) size in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_usable(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn aspect(self) -> f64 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            0.0
        }
    }
}

/// Identifier of a pointer as reported by the host (mouse, pen or a touch contact).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct PointerId(pub i32);

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8Premul {
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(s: &str) -> VeilResult<Self> {
        let hex = s
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| VeilError::validation(format!("color '{s}' must start with '#'")))?;
        let nibble = |c: u8| -> VeilResult<u8> {
            (c as char)
                .to_digit(16)
                .map(|d| d as u8)
                .ok_or_else(|| VeilError::validation(format!("color '{s}' has non-hex digit")))
        };
        let bytes = hex.as_bytes();
        let (r, g, b, a) = match bytes.len() {
            3 => {
                let r = nibble(bytes[0])?;
                let g = nibble(bytes[1])?;
                let b = nibble(bytes[2])?;
                (r * 17, g * 17, b * 17, 255)
            }
            6 | 8 => {
                let byte = |i: usize| -> VeilResult<u8> {
                    Ok((nibble(bytes[i])? << 4) | nibble(bytes[i + 1])?)
                };
                let a = if bytes.len() == 8 { byte(6)? } else { 255 };
                (byte(0)?, byte(2)?, byte(4)?, a)
            }
            _ => {
                return Err(VeilError::validation(format!(
                    "color '{s}' must have 3, 6 or 8 hex digits"
                )));
            }
        };
        Ok(Self::from_straight_rgba(r, g, b, a))
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
