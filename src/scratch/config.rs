use std::{fs::File, io::BufReader, path::Path};

use crate::foundation::{
    core::Rgba8Premul,
    error::{VeilError, VeilResult},
};

/// Page elements a scratch canvas binds to.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScratchAnchors {
    pub container_selector: String,
    pub canvas_selector: String,
    /// Optional element that follows the pointer over the canvas.
    #[serde(default)]
    pub cursor_indicator_id: Option<String>,
}

impl Default for ScratchAnchors {
    fn default() -> Self {
        Self {
            container_selector: "#scratchContainer".to_string(),
            canvas_selector: "#scratchContainer canvas".to_string(),
            cursor_indicator_id: Some("cursorIndicator".to_string()),
        }
    }
}

/// Where the surface size comes from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sizing {
    /// The container's bounding box.
    #[default]
    Container,
    /// The window viewport.
    Viewport,
}

fn default_luminance_threshold() -> u8 {
    128
}

/// How seed pixels decide coverage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SeedMaskMode {
    /// Pixels whose alpha exceeds `threshold` erase.
    Alpha {
        #[serde(default)]
        threshold: u8,
    },
    /// Opaque pixels darker than `threshold` erase.
    Luminance {
        #[serde(default = "default_luminance_threshold")]
        threshold: u8,
    },
}

impl Default for SeedMaskMode {
    fn default() -> Self {
        Self::Alpha { threshold: 0 }
    }
}

/// Top-left placement of the seed as a fraction of the surface size.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SeedOffset {
    pub x: f64,
    pub y: f64,
}

fn default_seed_scale() -> f64 {
    0.6
}

/// Image erased into the overlay at initialization.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SeedConfig {
    /// Passed verbatim to [`crate::ScratchHost::read_seed`].
    pub path: String,
    /// Multiplier on the image's natural size.
    #[serde(default = "default_seed_scale")]
    pub scale: f64,
    /// Centered when absent.
    #[serde(default)]
    pub offset: Option<SeedOffset>,
    #[serde(default)]
    pub mode: SeedMaskMode,
}

impl SeedConfig {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            scale: default_seed_scale(),
            offset: None,
            mode: SeedMaskMode::default(),
        }
    }
}

fn default_brush_diameter() -> f64 {
    120.0
}

fn default_overlay_color() -> String {
    "#39ff14".to_string()
}

fn default_reveal_alpha_epsilon() -> u8 {
    10
}

fn default_click_slop() -> f64 {
    6.0
}

/// Configuration of one [`crate::ScratchRevealCanvas`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScratchConfig {
    #[serde(default)]
    pub anchors: ScratchAnchors,
    #[serde(default)]
    pub sizing: Sizing,
    /// Brush diameter in surface pixels.
    #[serde(default = "default_brush_diameter")]
    pub brush_diameter: f64,
    /// `#rgb`, `#rrggbb` or `#rrggbbaa`.
    #[serde(default = "default_overlay_color")]
    pub overlay_color: String,
    #[serde(default)]
    pub seed: Option<SeedConfig>,
    /// Alpha strictly below this reads as revealed.
    #[serde(default = "default_reveal_alpha_epsilon")]
    pub reveal_alpha_epsilon: u8,
    /// Maximum pointer travel, in pixels, for a down/up pair to count as a click.
    #[serde(default = "default_click_slop")]
    pub click_slop: f64,
}

impl Default for ScratchConfig {
    fn default() -> Self {
        Self {
            anchors: ScratchAnchors::default(),
            sizing: Sizing::default(),
            brush_diameter: default_brush_diameter(),
            overlay_color: default_overlay_color(),
            seed: None,
            reveal_alpha_epsilon: default_reveal_alpha_epsilon(),
            click_slop: default_click_slop(),
        }
    }
}

impl ScratchConfig {
    /// Full-window overlay with a seed image erased at 0.6 scale.
    pub fn viewport_with_seed(path: impl Into<String>) -> Self {
        Self {
            sizing: Sizing::Viewport,
            seed: Some(SeedConfig::new(path)),
            ..Self::default()
        }
    }

    pub fn from_json_str(s: &str) -> VeilResult<Self> {
        serde_json::from_str(s).map_err(|e| VeilError::serde(e.to_string()))
    }

    pub fn from_reader<R: std::io::Read>(r: R) -> VeilResult<Self> {
        serde_json::from_reader(r).map_err(|e| VeilError::serde(e.to_string()))
    }

    pub fn from_path(path: impl AsRef<Path>) -> VeilResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            VeilError::validation(format!("open scratch config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn to_json_pretty(&self) -> VeilResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| VeilError::serde(e.to_string()))
    }

    /// Parsed overlay color.
    pub fn overlay(&self) -> VeilResult<Rgba8Premul> {
        Rgba8Premul::from_hex(&self.overlay_color)
    }

    pub fn validate(&self) -> VeilResult<()> {
        if self.anchors.container_selector.trim().is_empty()
            || self.anchors.canvas_selector.trim().is_empty()
        {
            return Err(VeilError::validation(
                "anchors.container_selector/canvas_selector must not be empty",
            ));
        }
        if !self.brush_diameter.is_finite() || self.brush_diameter <= 0.0 {
            return Err(VeilError::validation(
                "brush_diameter must be finite and > 0",
            ));
        }
        self.overlay()?;
        if !self.click_slop.is_finite() || self.click_slop < 0.0 {
            return Err(VeilError::validation("click_slop must be finite and >= 0"));
        }
        if let Some(seed) = &self.seed {
            if seed.path.trim().is_empty() {
                return Err(VeilError::validation("seed.path must not be empty"));
            }
            if !seed.scale.is_finite() || seed.scale <= 0.0 {
                return Err(VeilError::validation("seed.scale must be finite and > 0"));
            }
            if let Some(o) = seed.offset
                && (!o.x.is_finite() || !o.y.is_finite())
            {
                return Err(VeilError::validation("seed.offset must be finite"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scratch/config.rs"]
mod tests;
