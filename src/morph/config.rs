use std::{fs::File, io::BufReader, path::Path};

use crate::{
    animation::ease::Ease,
    foundation::{
        core::{Point, Rgba8Premul, Size},
        error::{VeilError, VeilResult},
    },
    geometry::groups::PointGroups,
};

/// Page elements a morpher binds to.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MorphAnchors {
    pub svg_root_selector: String,
    pub polygon_element_id: String,
    pub handles_container_id: String,
    /// Extra polygons (e.g. a background copy) that mirror the mask's points.
    #[serde(default)]
    pub mirror_polygon_ids: Vec<String>,
}

/// Scaling of the start shape with viewport width.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ResponsiveScale {
    pub reference_width: f64,
    pub min_scale: f64,
    pub max_scale: f64,
}

impl Default for ResponsiveScale {
    fn default() -> Self {
        Self {
            reference_width: 1200.0,
            min_scale: 0.75,
            max_scale: 1.0,
        }
    }
}

/// Control point handle appearance. Colors are CSS color strings passed through to the host.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HandleStyle {
    pub radius: f64,
    /// Radius of the invisible hit target; at least `radius`.
    pub touch_radius: f64,
    pub fill: String,
    pub fill_hover: String,
    pub fill_drag: String,
    pub stroke: String,
    pub stroke_width: f64,
}

impl Default for HandleStyle {
    fn default() -> Self {
        Self {
            radius: 8.0,
            touch_radius: 24.0,
            fill: "#EAFF00".to_string(),
            fill_hover: "#F5FF66".to_string(),
            fill_drag: "#BFCC00".to_string(),
            stroke: "none".to_string(),
            stroke_width: 0.0,
        }
    }
}

fn default_wide_aspect() -> f64 {
    16.0 / 9.0
}

fn default_tall_aspect() -> f64 {
    9.0 / 16.0
}

fn default_drag_sensitivity() -> f64 {
    120.0
}

/// Configuration of one [`crate::PolygonMaskMorpher`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MorphConfig {
    /// Logical (viewBox) width.
    pub logical_width: f64,
    /// Logical (viewBox) height.
    pub logical_height: f64,
    /// Artistic start shape for wide viewports.
    pub start_points: Vec<Point>,
    /// Optional start shape for tall viewports, blended in by aspect ratio.
    #[serde(default)]
    pub tall_points: Option<Vec<Point>>,
    /// Viewport aspect (w/h) at or above which only `start_points` is used.
    #[serde(default = "default_wide_aspect")]
    pub wide_aspect: f64,
    /// Viewport aspect at or below which only `tall_points` is used.
    #[serde(default = "default_tall_aspect")]
    pub tall_aspect: f64,
    /// Partition of point indices; empty means one group holding every point.
    #[serde(default)]
    pub point_groups: Vec<Vec<usize>>,
    pub anchors: MorphAnchors,
    /// Logical units of drag along a point's start->end axis for a full 0->1 morph.
    #[serde(default = "default_drag_sensitivity")]
    pub drag_sensitivity: f64,
    #[serde(default)]
    pub easing: Ease,
    /// End-shape inset from the visible edges, in logical units.
    #[serde(default)]
    pub edge_padding: f64,
    /// Extra end-shape inset at the top reserved for a fixed header, in screen pixels.
    #[serde(default)]
    pub header_padding_px: f64,
    #[serde(default)]
    pub responsive: ResponsiveScale,
    #[serde(default)]
    pub handles: HandleStyle,
}

impl MorphConfig {
    /// Hero mask: 1000x600 viewBox, 12 points driven as four groups of three
    /// (top, right, bottom and left edges), with room for a fixed header.
    pub fn hero() -> Self {
        let p = |x: f64, y: f64| Point::new(x, y);
        Self {
            logical_width: 1000.0,
            logical_height: 600.0,
            start_points: vec![
                p(220.0, 140.0),
                p(480.0, 95.0),
                p(760.0, 150.0),
                p(850.0, 230.0),
                p(905.0, 330.0),
                p(820.0, 440.0),
                p(700.0, 500.0),
                p(470.0, 470.0),
                p(250.0, 515.0),
                p(150.0, 430.0),
                p(110.0, 300.0),
                p(170.0, 200.0),
            ],
            tall_points: Some(vec![
                p(400.0, 120.0),
                p(500.0, 90.0),
                p(600.0, 130.0),
                p(625.0, 220.0),
                p(640.0, 320.0),
                p(610.0, 420.0),
                p(590.0, 500.0),
                p(500.0, 530.0),
                p(410.0, 495.0),
                p(385.0, 410.0),
                p(360.0, 300.0),
                p(380.0, 200.0),
            ]),
            wide_aspect: default_wide_aspect(),
            tall_aspect: default_tall_aspect(),
            point_groups: vec![
                vec![0, 1, 2],
                vec![3, 4, 5],
                vec![6, 7, 8],
                vec![9, 10, 11],
            ],
            anchors: MorphAnchors {
                svg_root_selector: ".hero-svg".to_string(),
                polygon_element_id: "hero-polygon".to_string(),
                handles_container_id: "hero-control-points".to_string(),
                mirror_polygon_ids: Vec::new(),
            },
            drag_sensitivity: 160.0,
            easing: Ease::OutCubic,
            edge_padding: 20.0,
            header_padding_px: 80.0,
            responsive: ResponsiveScale {
                reference_width: 1440.0,
                min_scale: 0.8,
                max_scale: 1.0,
            },
            handles: HandleStyle {
                radius: 14.0,
                touch_radius: 24.0,
                fill: "#FFD700".to_string(),
                fill_hover: "#FFEC00".to_string(),
                fill_drag: "#FF6B00".to_string(),
                stroke: "#000".to_string(),
                stroke_width: 2.0,
            },
        }
    }

    /// Selected-works mask: 600x800 viewBox, 12 points that morph together.
    pub fn selected_works() -> Self {
        let p = |x: f64, y: f64| Point::new(x, y);
        Self {
            logical_width: 600.0,
            logical_height: 800.0,
            start_points: vec![
                p(300.0, 35.0),
                p(420.0, 95.0),
                p(545.0, 140.0),
                p(480.0, 280.0),
                p(565.0, 420.0),
                p(440.0, 520.0),
                p(300.0, 760.0),
                p(160.0, 520.0),
                p(35.0, 450.0),
                p(120.0, 300.0),
                p(55.0, 160.0),
                p(180.0, 95.0),
            ],
            tall_points: None,
            wide_aspect: default_wide_aspect(),
            tall_aspect: default_tall_aspect(),
            point_groups: Vec::new(),
            anchors: MorphAnchors {
                svg_root_selector: ".selected-works-svg".to_string(),
                polygon_element_id: "selected-works-polygon".to_string(),
                handles_container_id: "selected-works-control-points".to_string(),
                mirror_polygon_ids: vec!["selected-works-bg-polygon".to_string()],
            },
            drag_sensitivity: default_drag_sensitivity(),
            easing: Ease::OutCubic,
            edge_padding: 25.0,
            header_padding_px: 0.0,
            responsive: ResponsiveScale::default(),
            handles: HandleStyle::default(),
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
            VeilError::validation(format!("open morph config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn to_json_pretty(&self) -> VeilResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| VeilError::serde(e.to_string()))
    }

    pub fn logical_size(&self) -> Size {
        Size::new(self.logical_width, self.logical_height)
    }

    pub fn logical_center(&self) -> Point {
        Point::new(self.logical_width * 0.5, self.logical_height * 0.5)
    }

    pub fn point_count(&self) -> usize {
        self.start_points.len()
    }

    /// The validated point partition (one group of all points when none is configured).
    pub fn groups(&self) -> VeilResult<PointGroups> {
        if self.point_groups.is_empty() {
            PointGroups::single(self.point_count())
        } else {
            PointGroups::new(self.point_groups.clone(), self.point_count())
        }
    }

    pub fn validate(&self) -> VeilResult<()> {
        if !self.logical_width.is_finite()
            || !self.logical_height.is_finite()
            || self.logical_width <= 0.0
            || self.logical_height <= 0.0
        {
            return Err(VeilError::validation(
                "logical_width/logical_height must be finite and > 0",
            ));
        }
        if self.start_points.len() < 3 {
            return Err(VeilError::validation(
                "start_points must describe a polygon (>= 3 points)",
            ));
        }
        validate_points(&self.start_points, "start_points")?;
        if let Some(tall) = &self.tall_points {
            if tall.len() != self.start_points.len() {
                return Err(VeilError::validation(format!(
                    "tall_points has {} points, start_points has {}",
                    tall.len(),
                    self.start_points.len()
                )));
            }
            validate_points(tall, "tall_points")?;
            if !self.wide_aspect.is_finite()
                || !self.tall_aspect.is_finite()
                || self.wide_aspect <= self.tall_aspect
                || self.tall_aspect <= 0.0
            {
                return Err(VeilError::validation(
                    "wide_aspect must be > tall_aspect > 0",
                ));
            }
        }
        self.groups()?;
        if !self.drag_sensitivity.is_finite() || self.drag_sensitivity <= 0.0 {
            return Err(VeilError::validation(
                "drag_sensitivity must be finite and > 0",
            ));
        }
        for (v, field) in [
            (self.edge_padding, "edge_padding"),
            (self.header_padding_px, "header_padding_px"),
            (self.handles.radius, "handles.radius"),
            (self.handles.stroke_width, "handles.stroke_width"),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(VeilError::validation(format!(
                    "{field} must be finite and >= 0"
                )));
            }
        }
        if !self.handles.touch_radius.is_finite() || self.handles.touch_radius < self.handles.radius
        {
            return Err(VeilError::validation(
                "handles.touch_radius must be finite and >= handles.radius",
            ));
        }
        let r = self.responsive;
        if !r.reference_width.is_finite()
            || r.reference_width <= 0.0
            || !r.min_scale.is_finite()
            || !r.max_scale.is_finite()
            || r.min_scale <= 0.0
            || r.min_scale > r.max_scale
        {
            return Err(VeilError::validation(
                "responsive scale needs reference_width > 0 and 0 < min_scale <= max_scale",
            ));
        }
        for (v, field) in [
            (&self.anchors.svg_root_selector, "anchors.svg_root_selector"),
            (&self.anchors.polygon_element_id, "anchors.polygon_element_id"),
            (
                &self.anchors.handles_container_id,
                "anchors.handles_container_id",
            ),
        ] {
            if v.trim().is_empty() {
                return Err(VeilError::validation(format!("{field} must be non-empty")));
            }
        }
        for color in [
            &self.handles.fill,
            &self.handles.fill_hover,
            &self.handles.fill_drag,
        ] {
            // Only hex colors are checked; named CSS colors pass through untouched.
            if color.starts_with('#') {
                Rgba8Premul::from_hex(color)?;
            }
        }
        Ok(())
    }
}

fn validate_points(points: &[Point], field: &str) -> VeilResult<()> {
    if let Some(i) = points
        .iter()
        .position(|p| !p.x.is_finite() || !p.y.is_finite())
    {
        return Err(VeilError::validation(format!(
            "{field}[{i}] must have finite coordinates"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/morph/config.rs"]
mod tests;
