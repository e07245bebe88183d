use crate::{
    foundation::{
        core::{Point, PointerId, Viewport},
        error::{VeilError, VeilResult},
    },
    geometry::shape::format_points_rounded,
    host::Anchor,
    morph::{
        config::MorphConfig,
        core::{MorphCore, MorphEffect, MorphEvent},
        frame::MorphFrame,
        host::MorphHost,
    },
    transform::affine::screen_to_logical,
};

/// A draggable polygon mask bound to a host.
///
/// Pointer positions passed in are screen coordinates; they are mapped into the
/// logical space through the host's screen CTM before reaching [`MorphCore`]. An
/// instance whose initialization failed is inert: every call is a no-op.
pub struct PolygonMaskMorpher<H: MorphHost> {
    host: H,
    core: Option<MorphCore>,
}

impl<H: MorphHost> PolygonMaskMorpher<H> {
    /// Bind to `host`. Failures are logged and leave the morpher inert.
    #[tracing::instrument(skip_all, fields(polygon = %config.anchors.polygon_element_id))]
    pub fn initialize(config: MorphConfig, host: H) -> Self {
        let core = match bind(&config, &host) {
            Ok(()) => match MorphCore::new(config, host.viewport()) {
                Ok(core) => Some(core),
                Err(e) => {
                    tracing::warn!(error = %e, "morph mask disabled");
                    None
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "morph mask disabled");
                None
            }
        };
        let mut morpher = Self { host, core };
        if let Some(core) = &morpher.core {
            tracing::debug!(points = core.points().len(), groups = core.groups().len(), "morph mask initialized");
            morpher.commit();
        }
        morpher
    }

    /// Like [`Self::initialize`] but reports the failure instead of going inert.
    pub fn try_initialize(config: MorphConfig, host: H) -> VeilResult<Self> {
        bind(&config, &host)?;
        let core = MorphCore::new(config, host.viewport())?;
        let mut morpher = Self {
            host,
            core: Some(core),
        };
        morpher.commit();
        Ok(morpher)
    }

    pub fn is_active(&self) -> bool {
        self.core.is_some()
    }

    pub fn core(&self) -> Option<&MorphCore> {
        self.core.as_ref()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// End shape for a viewport; empty when inert or when the geometry is unusable.
    pub fn compute_end_shape(&self, viewport_width: f64, viewport_height: f64) -> Vec<Point> {
        self.core
            .as_ref()
            .and_then(|c| {
                c.compute_end_shape(Viewport::new(viewport_width, viewport_height))
                    .ok()
            })
            .unwrap_or_default()
    }

    /// Start shape for a viewport; empty when inert or when the geometry is unusable.
    pub fn compute_start_shape(&self, viewport_width: f64, viewport_height: f64) -> Vec<Point> {
        self.core
            .as_ref()
            .and_then(|c| {
                c.compute_start_shape(Viewport::new(viewport_width, viewport_height))
                    .ok()
            })
            .unwrap_or_default()
    }

    pub fn on_pointer_down(&mut self, pointer: PointerId, point_index: usize, screen: Point) {
        let pos = self.to_logical(screen);
        self.dispatch(MorphEvent::PointerDown {
            pointer,
            point: point_index,
            pos,
        });
    }

    pub fn on_pointer_move(&mut self, pointer: PointerId, screen: Point) {
        if !self.core.as_ref().is_some_and(MorphCore::is_dragging) {
            return;
        }
        let pos = self.to_logical(screen);
        self.dispatch(MorphEvent::PointerMove { pointer, pos });
    }

    pub fn on_pointer_up(&mut self, pointer: PointerId) {
        self.dispatch(MorphEvent::PointerUp { pointer });
    }

    pub fn on_pointer_cancel(&mut self, pointer: PointerId) {
        self.dispatch(MorphEvent::PointerCancel { pointer });
    }

    pub fn on_pointer_enter(&mut self, point_index: usize) {
        self.dispatch(MorphEvent::PointerEnter { point: point_index });
    }

    pub fn on_pointer_leave(&mut self, point_index: usize) {
        self.dispatch(MorphEvent::PointerLeave { point: point_index });
    }

    pub fn on_viewport_resize(&mut self, width: f64, height: f64) {
        self.dispatch(MorphEvent::Resize(Viewport::new(width, height)));
    }

    pub fn on_animation_frame(&mut self) {
        self.dispatch(MorphEvent::AnimationFrame);
    }

    /// Feed an event record whose positions are in screen space.
    pub fn handle_event(&mut self, event: MorphEvent) {
        match event {
            MorphEvent::PointerDown {
                pointer,
                point,
                pos,
            } => self.on_pointer_down(pointer, point, pos),
            MorphEvent::PointerMove { pointer, pos } => self.on_pointer_move(pointer, pos),
            other => self.dispatch(other),
        }
    }

    pub fn progress(&self, group: Option<usize>) -> f64 {
        self.core.as_ref().map_or(0.0, |c| c.progress(group))
    }

    pub fn set_progress(&mut self, value: f64, group: Option<usize>) {
        let Some(core) = self.core.as_mut() else {
            return;
        };
        let effects = core.set_progress(value, group);
        self.run(effects);
    }

    pub fn points(&self) -> Vec<Point> {
        self.core
            .as_ref()
            .map(|c| c.points().to_vec())
            .unwrap_or_default()
    }

    /// Current points as rounded `x,y` pairs.
    pub fn points_string(&self) -> String {
        self.core
            .as_ref()
            .map(|c| format_points_rounded(c.points()))
            .unwrap_or_default()
    }

    /// The frame the host would receive if a commit happened now.
    pub fn frame(&self) -> Option<MorphFrame> {
        self.core.as_ref().map(MorphFrame::project)
    }

    fn to_logical(&self, screen: Point) -> Point {
        screen_to_logical(self.host.screen_ctm(), screen)
    }

    fn dispatch(&mut self, event: MorphEvent) {
        let Some(core) = self.core.as_mut() else {
            return;
        };
        let effects = core.apply(event);
        self.run(effects);
    }

    fn run(&mut self, effects: Vec<MorphEffect>) {
        for effect in effects {
            match effect {
                MorphEffect::CapturePointer { pointer, handle } => {
                    self.host.set_pointer_capture(pointer, handle)
                }
                MorphEffect::ReleasePointer { pointer, handle } => {
                    self.host.release_pointer_capture(pointer, handle)
                }
                MorphEffect::RequestFrame => self.host.request_animation_frame(),
                MorphEffect::Commit => self.commit(),
            }
        }
    }

    fn commit(&mut self) {
        if let Some(core) = &self.core {
            let frame = MorphFrame::project(core);
            tracing::trace!(points = %frame.points_attr, "morph commit");
            self.host.commit(&frame);
        }
    }
}

fn bind<H: MorphHost>(config: &MorphConfig, host: &H) -> VeilResult<()> {
    let anchors = &config.anchors;
    for anchor in [
        Anchor::Selector(&anchors.svg_root_selector),
        Anchor::Id(&anchors.polygon_element_id),
        Anchor::Id(&anchors.handles_container_id),
    ] {
        if !host.element_exists(anchor) {
            return Err(VeilError::missing_element(anchor.to_selector()));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/morph/morpher.rs"]
mod tests;
