use crate::{
    foundation::core::Point,
    geometry::shape::format_points_attr,
    morph::core::MorphCore,
};

/// Visual state of one control point handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandleState {
    Idle,
    Hover,
    /// Member of the group being dragged.
    Active,
}

/// One control point handle as the host should draw it.
#[derive(Clone, Debug, PartialEq)]
pub struct HandleView {
    pub index: usize,
    pub group: usize,
    pub center: Point,
    pub radius: f64,
    pub touch_radius: f64,
    pub state: HandleState,
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
    /// `grabbing` for the handle under the finger, `grab` otherwise.
    pub cursor: &'static str,
}

/// Everything the host writes for one redraw. Built by [`MorphFrame::project`] from
/// a [`MorphCore`] with no other inputs.
#[derive(Clone, Debug, PartialEq)]
pub struct MorphFrame {
    pub points: Vec<Point>,
    /// Value for the polygon's `points` attribute.
    pub points_attr: String,
    /// Polygon ids to receive `points_attr`: the mask polygon, then its mirrors.
    pub polygon_ids: Vec<String>,
    pub handles: Vec<HandleView>,
    /// Document cursor override while dragging.
    pub body_cursor: Option<&'static str>,
}

impl MorphFrame {
    pub fn project(core: &MorphCore) -> Self {
        let cfg = core.config();
        let style = &cfg.handles;
        let session = core.session();
        let points = core.points().to_vec();

        let handles = points
            .iter()
            .enumerate()
            .map(|(index, &center)| {
                let group = core.groups().group_of(index).unwrap_or(0);
                let state = match (session, core.hovered()) {
                    (Some(s), _) if s.active_group == group => HandleState::Active,
                    (None, Some(h)) if h == index => HandleState::Hover,
                    _ => HandleState::Idle,
                };
                let fill = match state {
                    HandleState::Idle => &style.fill,
                    HandleState::Hover => &style.fill_hover,
                    HandleState::Active => &style.fill_drag,
                };
                let grabbing = session.is_some_and(|s| s.active_point == index);
                HandleView {
                    index,
                    group,
                    center,
                    radius: style.radius,
                    touch_radius: style.touch_radius,
                    state,
                    fill: fill.clone(),
                    stroke: style.stroke.clone(),
                    stroke_width: style.stroke_width,
                    cursor: if grabbing { "grabbing" } else { "grab" },
                }
            })
            .collect();

        let mut polygon_ids = Vec::with_capacity(1 + cfg.anchors.mirror_polygon_ids.len());
        polygon_ids.push(cfg.anchors.polygon_element_id.clone());
        polygon_ids.extend(cfg.anchors.mirror_polygon_ids.iter().cloned());

        Self {
            points_attr: format_points_attr(&points),
            points,
            polygon_ids,
            handles,
            body_cursor: session.map(|_| "grabbing"),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/morph/frame.rs"]
mod tests;
