use crate::foundation::{
    core::{Point, PointerId, Vec2},
    math::clamp_unit_snapped,
};

/// Transient state of one drag gesture. At most one exists per morpher.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MorphSession {
    pub pointer: PointerId,
    pub active_point: usize,
    pub active_group: usize,
    /// Pointer position at pointer-down, in logical coordinates.
    pub drag_start: Point,
    pub drag_start_progress: f64,
    /// Unit drag axis, or zero when no axis could be derived.
    pub axis: Vec2,
}

impl MorphSession {
    /// Unit axis from the point's start position towards its end position.
    ///
    /// Falls back to the outward direction from `center` when start and end coincide,
    /// and to zero when that is degenerate too.
    pub fn drag_axis(start: Point, end: Point, center: Point) -> Vec2 {
        let along = end - start;
        if along.hypot2() > 0.0 {
            return along.normalize();
        }
        let outward = start - center;
        if outward.hypot2() > 0.0 {
            return outward.normalize();
        }
        Vec2::ZERO
    }

    /// Signed distance travelled along the axis since pointer-down.
    pub fn projected_delta(&self, pos: Point) -> f64 {
        (pos - self.drag_start).dot(self.axis)
    }

    /// Group progress for the pointer at `pos`, clamped to `[0, 1]`.
    pub fn progress_at(&self, pos: Point, drag_sensitivity: f64) -> f64 {
        if drag_sensitivity <= 0.0 {
            return self.drag_start_progress;
        }
        clamp_unit_snapped(self.drag_start_progress + self.projected_delta(pos) / drag_sensitivity)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/morph/session.rs"]
mod tests;
