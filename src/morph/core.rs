use crate::{
    foundation::{
        core::{Point, PointerId, Viewport},
        error::VeilResult,
        math::clamp_unit_snapped,
    },
    geometry::groups::PointGroups,
    morph::{
        config::MorphConfig,
        session::MorphSession,
        shapes::{end_shape_for, start_shape_for},
    },
    transform::linear::lerp_point,
};

/// Synthetic input record. Positions are logical (viewBox) coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MorphEvent {
    PointerDown {
        pointer: PointerId,
        point: usize,
        pos: Point,
    },
    PointerMove {
        pointer: PointerId,
        pos: Point,
    },
    PointerUp {
        pointer: PointerId,
    },
    PointerCancel {
        pointer: PointerId,
    },
    PointerEnter {
        point: usize,
    },
    PointerLeave {
        point: usize,
    },
    Resize(Viewport),
    AnimationFrame,
}

/// Side effect requested by a state transition, carried out by the host binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MorphEffect {
    CapturePointer { pointer: PointerId, handle: usize },
    ReleasePointer { pointer: PointerId, handle: usize },
    /// Schedule an animation frame; emitted at most once until the frame runs.
    RequestFrame,
    /// Project and commit the current state now.
    Commit,
}

/// Morph state for one polygon: shapes, per-group progress and the drag session.
///
/// Every transition is a plain method returning the effects it needs; nothing here
/// touches a host.
#[derive(Clone, Debug)]
pub struct MorphCore {
    config: MorphConfig,
    groups: PointGroups,
    viewport: Viewport,
    last_width: f64,
    start: Vec<Point>,
    end: Vec<Point>,
    current: Vec<Point>,
    progress: Vec<f64>,
    session: Option<MorphSession>,
    hover: Option<usize>,
    pending_resize: Option<Viewport>,
    frame_requested: bool,
}

impl MorphCore {
    pub fn new(config: MorphConfig, viewport: Viewport) -> VeilResult<Self> {
        config.validate()?;
        let groups = config.groups()?;
        let start = start_shape_for(&config, viewport)?;
        let end = end_shape_for(&config, viewport)?;
        let progress = vec![0.0; groups.len()];
        let mut core = Self {
            current: start.clone(),
            config,
            groups,
            viewport,
            last_width: viewport.width,
            start,
            end,
            progress,
            session: None,
            hover: None,
            pending_resize: None,
            frame_requested: false,
        };
        core.recompute_all();
        Ok(core)
    }

    pub fn config(&self) -> &MorphConfig {
        &self.config
    }

    pub fn groups(&self) -> &PointGroups {
        &self.groups
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn start_shape(&self) -> &[Point] {
        &self.start
    }

    pub fn end_shape(&self) -> &[Point] {
        &self.end
    }

    /// Rendered points: each group's start/end blend at its eased progress.
    pub fn points(&self) -> &[Point] {
        &self.current
    }

    pub fn session(&self) -> Option<&MorphSession> {
        self.session.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hover
    }

    pub fn pending_resize(&self) -> Option<Viewport> {
        self.pending_resize
    }

    pub fn frame_requested(&self) -> bool {
        self.frame_requested
    }

    pub fn compute_start_shape(&self, viewport: Viewport) -> VeilResult<Vec<Point>> {
        start_shape_for(&self.config, viewport)
    }

    pub fn compute_end_shape(&self, viewport: Viewport) -> VeilResult<Vec<Point>> {
        end_shape_for(&self.config, viewport)
    }

    /// One group's progress, or the mean over all groups for `None`.
    /// Unknown groups read as `0.0`.
    pub fn progress(&self, group: Option<usize>) -> f64 {
        match group {
            Some(g) => self.progress.get(g).copied().unwrap_or(0.0),
            None => {
                if self.progress.is_empty() {
                    0.0
                } else {
                    self.progress.iter().sum::<f64>() / self.progress.len() as f64
                }
            }
        }
    }

    pub fn apply(&mut self, event: MorphEvent) -> Vec<MorphEffect> {
        match event {
            MorphEvent::PointerDown {
                pointer,
                point,
                pos,
            } => self.pointer_down(pointer, point, pos),
            MorphEvent::PointerMove { pointer, pos } => self.pointer_move(pointer, pos),
            MorphEvent::PointerUp { pointer } | MorphEvent::PointerCancel { pointer } => {
                self.pointer_up(pointer)
            }
            MorphEvent::PointerEnter { point } => self.hover_enter(point),
            MorphEvent::PointerLeave { point } => self.hover_leave(point),
            MorphEvent::Resize(viewport) => self.resize(viewport),
            MorphEvent::AnimationFrame => self.animation_frame(),
        }
    }

    pub fn pointer_down(&mut self, pointer: PointerId, point: usize, pos: Point) -> Vec<MorphEffect> {
        if let Some(active) = &self.session {
            tracing::debug!(
                active_point = active.active_point,
                ignored_point = point,
                "morph drag already in progress"
            );
            return Vec::new();
        }
        let Some(group) = self.groups.group_of(point) else {
            tracing::warn!(point, "pointer down on unknown control point");
            return Vec::new();
        };
        let axis = MorphSession::drag_axis(
            self.start[point],
            self.end[point],
            self.config.logical_center(),
        );
        self.session = Some(MorphSession {
            pointer,
            active_point: point,
            active_group: group,
            drag_start: pos,
            drag_start_progress: self.progress[group],
            axis,
        });
        self.hover = None;
        tracing::debug!(point, group, "morph drag started");

        let mut effects = vec![MorphEffect::CapturePointer {
            pointer,
            handle: point,
        }];
        self.request_frame(&mut effects);
        effects
    }

    pub fn pointer_move(&mut self, pointer: PointerId, pos: Point) -> Vec<MorphEffect> {
        let Some(session) = self.session else {
            return Vec::new();
        };
        if session.pointer != pointer {
            return Vec::new();
        }
        let next = session.progress_at(pos, self.config.drag_sensitivity);
        let group = session.active_group;
        let mut effects = Vec::new();
        if next != self.progress[group] {
            self.progress[group] = next;
            self.recompute_group(group);
            self.request_frame(&mut effects);
        }
        effects
    }

    /// Ends the session for `pointer`; cancel is handled identically.
    pub fn pointer_up(&mut self, pointer: PointerId) -> Vec<MorphEffect> {
        let Some(session) = self.session else {
            return Vec::new();
        };
        if session.pointer != pointer {
            return Vec::new();
        }
        self.session = None;
        tracing::debug!(
            point = session.active_point,
            group = session.active_group,
            progress = self.progress[session.active_group],
            "morph drag ended"
        );

        let mut effects = vec![MorphEffect::ReleasePointer {
            pointer,
            handle: session.active_point,
        }];
        if let Some(viewport) = self.pending_resize.take() {
            tracing::debug!(?viewport, "applying resize deferred during drag");
            effects.extend(self.resize(viewport));
        }
        self.request_frame(&mut effects);
        effects
    }

    pub fn hover_enter(&mut self, point: usize) -> Vec<MorphEffect> {
        if self.session.is_some() || point >= self.current.len() || self.hover == Some(point) {
            return Vec::new();
        }
        self.hover = Some(point);
        let mut effects = Vec::new();
        self.request_frame(&mut effects);
        effects
    }

    pub fn hover_leave(&mut self, point: usize) -> Vec<MorphEffect> {
        if self.session.is_some() || self.hover != Some(point) {
            return Vec::new();
        }
        self.hover = None;
        let mut effects = Vec::new();
        self.request_frame(&mut effects);
        effects
    }

    /// Recompute shapes for a new viewport.
    ///
    /// Deferred while dragging; ignored when only the height changed.
    pub fn resize(&mut self, viewport: Viewport) -> Vec<MorphEffect> {
        if self.session.is_some() {
            self.pending_resize = Some(viewport);
            return Vec::new();
        }
        if !viewport.is_usable() {
            tracing::debug!(?viewport, "ignoring unusable viewport");
            return Vec::new();
        }
        if viewport.width == self.last_width {
            return Vec::new();
        }
        let (start, end) = match (
            start_shape_for(&self.config, viewport),
            end_shape_for(&self.config, viewport),
        ) {
            (Ok(start), Ok(end)) => (start, end),
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!(error = %e, "keeping previous morph shapes");
                return Vec::new();
            }
        };
        self.start = start;
        self.end = end;
        self.viewport = viewport;
        self.last_width = viewport.width;
        self.recompute_all();
        vec![MorphEffect::Commit]
    }

    /// Drive one group (or every group for `None`) to `value`, clamped to `[0, 1]`.
    pub fn set_progress(&mut self, value: f64, group: Option<usize>) -> Vec<MorphEffect> {
        let value = clamp_unit_snapped(value);
        match group {
            Some(g) if g < self.progress.len() => {
                self.progress[g] = value;
                self.recompute_group(g);
            }
            Some(g) => {
                tracing::warn!(group = g, "set_progress on unknown group");
                return Vec::new();
            }
            None => {
                self.progress.fill(value);
                self.recompute_all();
            }
        }
        vec![MorphEffect::Commit]
    }

    pub fn animation_frame(&mut self) -> Vec<MorphEffect> {
        if !self.frame_requested {
            return Vec::new();
        }
        self.frame_requested = false;
        vec![MorphEffect::Commit]
    }

    fn request_frame(&mut self, effects: &mut Vec<MorphEffect>) {
        if !self.frame_requested {
            self.frame_requested = true;
            effects.push(MorphEffect::RequestFrame);
        }
    }

    fn recompute_group(&mut self, group: usize) {
        let t = self.config.easing.apply(self.progress[group]);
        for &i in self.groups.members(group) {
            self.current[i] = lerp_point(self.start[i], self.end[i], t);
        }
    }

    fn recompute_all(&mut self) {
        for g in 0..self.groups.len() {
            self.recompute_group(g);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/morph/core.rs"]
mod tests;
