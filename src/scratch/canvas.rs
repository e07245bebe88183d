use crate::{
    foundation::{
        core::{Point, PointerId, Rect},
        error::{VeilError, VeilResult},
    },
    host::{Anchor, ElementHandle},
    scratch::{
        brush::{BrushRasterizer, StrokeSegment},
        config::{ScratchConfig, SeedConfig, Sizing},
        host::{CursorIndicator, ScratchHost},
        seed::{decode_seed, seed_coverage},
        surface::ScratchSurface,
    },
};

/// Synthetic input record. `pos` is in surface pixels, `screen` in page coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScratchEvent {
    PointerDown {
        pointer: PointerId,
        pos: Point,
        screen: Point,
    },
    PointerMove {
        pointer: PointerId,
        pos: Point,
        screen: Point,
    },
    PointerUp {
        pointer: PointerId,
        pos: Point,
        screen: Point,
    },
    PointerCancel {
        pointer: PointerId,
    },
    PointerEnter {
        screen: Point,
    },
    PointerLeave,
    Resize,
}

#[derive(Clone, Copy, Debug)]
struct StrokeSession {
    /// `None` for strokes driven through the direct stroke API.
    pointer: Option<PointerId>,
    last: Point,
}

impl StrokeSession {
    fn accepts(&self, pointer: Option<PointerId>) -> bool {
        match (self.pointer, pointer) {
            (Some(own), Some(other)) => own == other,
            _ => true,
        }
    }
}

/// A down/up pair that turns into a passed-through click when it stays within slop.
#[derive(Clone, Copy, Debug)]
struct ClickGesture {
    pointer: PointerId,
    start: Point,
    max_slop: f64,
    moved: bool,
    revealed_at_start: bool,
}

impl ClickGesture {
    fn arm(pointer: PointerId, start: Point, max_slop: f64, revealed_at_start: bool) -> Self {
        Self {
            pointer,
            start,
            max_slop,
            moved: false,
            revealed_at_start,
        }
    }

    fn update(&mut self, pos: Point) {
        if !self.moved && (pos - self.start).hypot2() > self.max_slop * self.max_slop {
            self.moved = true;
        }
    }

    fn passes_through(&self) -> bool {
        !self.moved && self.revealed_at_start
    }
}

#[derive(Debug)]
struct ScratchState {
    surface: ScratchSurface,
    brush: BrushRasterizer,
    stroke: Option<StrokeSession>,
    click: Option<ClickGesture>,
    cursor_enabled: bool,
}

impl ScratchState {
    /// Erase a brush disc at `center` and, when given, the capsule of `segment`.
    /// Returns the union of the changed pixels.
    fn erase(
        &mut self,
        center: Point,
        diameter: f64,
        segment: Option<&StrokeSegment>,
    ) -> Option<Rect> {
        let (w, h) = (self.surface.width(), self.surface.height());
        let masks = [
            self.brush.disc(center, diameter, w, h),
            segment.map_or(Ok(None), |s| self.brush.segment(s, w, h)),
        ];
        let mut damage: Option<Rect> = None;
        for mask in masks {
            match mask {
                Ok(Some(m)) => {
                    if let Some(r) = self.surface.destination_out(&m) {
                        damage = Some(damage.map_or(r, |d| d.union(r)));
                    }
                }
                Ok(None) => {}
                Err(e) => tracing::warn!(error = %e, "scratch erase skipped"),
            }
        }
        damage
    }

    /// An open stroke owned by a pointer other than `pointer`.
    fn held_by_other(&self, pointer: Option<PointerId>) -> bool {
        self.stroke.is_some_and(|s| !s.accepts(pointer))
    }
}

/// An opaque overlay erased along pointer strokes, bound to a host.
///
/// An instance whose anchors were missing at initialization is inert for good:
/// nothing is covered and every call is a no-op. A bound instance that could not
/// size its surface is inert only until a later resize succeeds.
pub struct ScratchRevealCanvas<H: ScratchHost> {
    host: H,
    config: ScratchConfig,
    bound: bool,
    state: Option<ScratchState>,
    resize_pending: bool,
    cursor: CursorIndicator,
}

impl<H: ScratchHost> ScratchRevealCanvas<H> {
    /// Size, fill and seed the overlay. Failures are logged and leave the canvas inert.
    #[tracing::instrument(skip_all, fields(container = %config.anchors.container_selector))]
    pub fn initialize(config: ScratchConfig, mut host: H) -> Self {
        let (bound, state) = match bind(&config, &host) {
            Ok(cursor_enabled) => match build_state(&config, &mut host, cursor_enabled) {
                Ok(state) => (true, Some(state)),
                Err(e) => {
                    tracing::warn!(error = %e, "scratch overlay not built, retrying on resize");
                    (true, None)
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "scratch overlay disabled");
                (false, None)
            }
        };
        let mut canvas = Self {
            host,
            config,
            bound,
            state,
            resize_pending: false,
            cursor: CursorIndicator::default(),
        };
        canvas.present_all();
        canvas
    }

    /// Like [`Self::initialize`] but reports the failure instead of going inert.
    pub fn try_initialize(config: ScratchConfig, mut host: H) -> VeilResult<Self> {
        let state = build(&config, &mut host)?;
        let mut canvas = Self {
            host,
            config,
            bound: true,
            state: Some(state),
            resize_pending: false,
            cursor: CursorIndicator::default(),
        };
        canvas.present_all();
        Ok(canvas)
    }

    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    pub fn config(&self) -> &ScratchConfig {
        &self.config
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

    pub fn surface(&self) -> Option<&ScratchSurface> {
        self.state.as_ref().map(|s| &s.surface)
    }

    pub fn cursor(&self) -> CursorIndicator {
        self.cursor
    }

    pub fn is_stroking(&self) -> bool {
        self.state.as_ref().is_some_and(|s| s.stroke.is_some())
    }

    /// Whether the overlay is (nearly) transparent at a surface pixel.
    ///
    /// Points outside the surface, and every point of an inert canvas, are revealed.
    pub fn is_revealed(&self, x: f64, y: f64) -> bool {
        let Some(state) = &self.state else {
            return true;
        };
        if !x.is_finite() || !y.is_finite() {
            return true;
        }
        state
            .surface
            .alpha_at(x.floor() as i64, y.floor() as i64)
            .is_none_or(|a| a < self.config.reveal_alpha_epsilon)
    }

    /// Share of surface pixels currently revealed.
    pub fn revealed_fraction(&self) -> f64 {
        self.state.as_ref().map_or(1.0, |s| {
            s.surface.revealed_fraction(self.config.reveal_alpha_epsilon)
        })
    }

    /// Straight-alpha snapshot of the overlay.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        self.surface().map(ScratchSurface::to_rgba_image)
    }

    /// Begin a stroke and erase a disc at `point`. Page scroll stays locked until
    /// [`Self::end_stroke`].
    pub fn start_stroke(&mut self, point: Point) {
        self.begin_stroke(None, point);
    }

    /// Erase a disc at `point` and the capsule from the previous sample. No-op without a stroke.
    pub fn continue_stroke(&mut self, point: Point) {
        self.extend_stroke(None, point);
    }

    pub fn end_stroke(&mut self) {
        self.finish_stroke(None);
    }

    /// Forward a click at `screen` to the page element under the canvas.
    ///
    /// Returns the element that received the click.
    pub fn pass_through_point(&mut self, point: Point, screen: Point) -> Option<ElementHandle> {
        self.state.as_ref()?;
        self.host.set_pointer_interception(false);
        let hit = self.host.hit_test(screen);
        self.host.set_pointer_interception(true);

        let target = hit.filter(|&h| Some(h) != self.host.canvas_element())?;
        tracing::debug!(x = point.x, y = point.y, ?target, "scratch click passed through");
        self.host.dispatch_click(target);
        Some(target)
    }

    /// Rebuild the overlay for the current size. Scratched pixels are discarded.
    ///
    /// While a stroke is open the rebuild waits for the stroke to end.
    pub fn on_resize(&mut self) {
        if !self.bound {
            return;
        }
        if self.is_stroking() {
            self.resize_pending = true;
            tracing::debug!("scratch resize deferred until stroke ends");
            return;
        }
        self.rebuild();
    }

    pub fn has_pending_resize(&self) -> bool {
        self.resize_pending
    }

    pub fn handle_event(&mut self, event: ScratchEvent) {
        if self.state.is_none() && event != ScratchEvent::Resize {
            return;
        }
        match event {
            ScratchEvent::PointerDown {
                pointer,
                pos,
                screen,
            } => {
                if self
                    .state
                    .as_ref()
                    .is_some_and(|s| s.held_by_other(Some(pointer)))
                {
                    tracing::trace!(?pointer, "extra pointer ignored during stroke");
                    return;
                }
                let revealed = self.is_revealed(pos.x, pos.y);
                let slop = self.config.click_slop;
                if let Some(state) = self.state.as_mut() {
                    state.click = Some(ClickGesture::arm(pointer, pos, slop, revealed));
                }
                self.cursor.position = screen;
                self.begin_stroke(Some(pointer), pos);
            }
            ScratchEvent::PointerMove {
                pointer,
                pos,
                screen,
            } => {
                if let Some(click) = self.state.as_mut().and_then(|s| s.click.as_mut())
                    && click.pointer == pointer
                {
                    click.update(pos);
                }
                self.cursor.position = screen;
                self.push_cursor();
                self.extend_stroke(Some(pointer), pos);
            }
            ScratchEvent::PointerUp {
                pointer,
                pos,
                screen,
            } => {
                self.finish_stroke(Some(pointer));
                let click = self
                    .state
                    .as_mut()
                    .and_then(|s| s.click.take_if(|c| c.pointer == pointer));
                if let Some(mut click) = click {
                    click.update(pos);
                    if click.passes_through() {
                        self.pass_through_point(pos, screen);
                    }
                }
            }
            ScratchEvent::PointerCancel { pointer } => {
                self.finish_stroke(Some(pointer));
                if let Some(state) = self.state.as_mut() {
                    state.click = None;
                }
            }
            ScratchEvent::PointerEnter { screen } => {
                self.cursor.visible = true;
                self.cursor.position = screen;
                self.push_cursor();
            }
            ScratchEvent::PointerLeave => {
                self.cursor.visible = false;
                self.push_cursor();
            }
            ScratchEvent::Resize => self.on_resize(),
        }
    }

    fn begin_stroke(&mut self, pointer: Option<PointerId>, point: Point) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        if state.held_by_other(pointer) {
            return;
        }
        let restarted = state.stroke.is_some();
        state.stroke = Some(StrokeSession {
            pointer,
            last: point,
        });
        if !restarted {
            self.host.set_scroll_locked(true);
            tracing::debug!(x = point.x, y = point.y, "scratch stroke started");
        }
        self.cursor.scratching = true;
        self.push_cursor();
        self.erase(point, None);
    }

    fn extend_stroke(&mut self, pointer: Option<PointerId>, point: Point) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        let Some(stroke) = state.stroke.as_mut().filter(|s| s.accepts(pointer)) else {
            return;
        };
        let segment = StrokeSegment {
            from: stroke.last,
            to: point,
            brush_diameter: self.config.brush_diameter,
        };
        stroke.last = point;
        self.erase(point, Some(segment));
    }

    fn finish_stroke(&mut self, pointer: Option<PointerId>) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        if state.stroke.take_if(|s| s.accepts(pointer)).is_none() {
            return;
        }
        self.host.set_scroll_locked(false);
        self.cursor.scratching = false;
        self.push_cursor();
        tracing::debug!(
            revealed = self.revealed_fraction(),
            "scratch stroke ended"
        );
        if self.resize_pending {
            self.rebuild();
        }
    }

    fn rebuild(&mut self) {
        self.resize_pending = false;
        self.state = match build(&self.config, &mut self.host) {
            Ok(state) => Some(state),
            Err(e) => {
                tracing::warn!(error = %e, "scratch overlay unavailable until next resize");
                None
            }
        };
        self.present_all();
    }

    fn erase(&mut self, center: Point, segment: Option<StrokeSegment>) {
        let diameter = self.config.brush_diameter;
        let Some(state) = self.state.as_mut() else {
            return;
        };
        if let Some(damage) = state.erase(center, diameter, segment.as_ref()) {
            self.host.present(&state.surface, damage);
        }
    }

    fn present_all(&mut self) {
        if let Some(state) = &self.state {
            let bounds = state.surface.bounds();
            tracing::trace!(
                width = state.surface.width(),
                height = state.surface.height(),
                "scratch present"
            );
            self.host.present(&state.surface, bounds);
        }
    }

    fn push_cursor(&mut self) {
        if self.state.as_ref().is_some_and(|s| s.cursor_enabled) {
            self.host.update_cursor(&self.cursor);
        }
    }
}

fn build<H: ScratchHost>(config: &ScratchConfig, host: &mut H) -> VeilResult<ScratchState> {
    let cursor_enabled = bind(config, host)?;
    build_state(config, host, cursor_enabled)
}

/// Check the config and anchors. Returns whether the cursor indicator exists.
fn bind<H: ScratchHost>(config: &ScratchConfig, host: &H) -> VeilResult<bool> {
    config.validate()?;
    let anchors = &config.anchors;
    for anchor in [
        Anchor::Selector(&anchors.container_selector),
        Anchor::Selector(&anchors.canvas_selector),
    ] {
        if !host.element_exists(anchor) {
            return Err(VeilError::missing_element(anchor.to_selector()));
        }
    }
    Ok(anchors
        .cursor_indicator_id
        .as_deref()
        .is_some_and(|id| host.element_exists(Anchor::Id(id))))
}

/// Size, fill and seed a fresh surface.
fn build_state<H: ScratchHost>(
    config: &ScratchConfig,
    host: &mut H,
    cursor_enabled: bool,
) -> VeilResult<ScratchState> {
    let anchors = &config.anchors;
    let size = match config.sizing {
        Sizing::Container => host
            .container_size()
            .ok_or_else(|| VeilError::missing_element(anchors.container_selector.clone()))?,
        Sizing::Viewport => host.viewport_size(),
    };
    let mut surface = ScratchSurface::filled(
        css_to_pixels(size.width),
        css_to_pixels(size.height),
        config.overlay()?,
    )?;

    if let Some(seed) = &config.seed {
        match apply_seed(&mut surface, seed, host) {
            Ok(damage) => tracing::debug!(path = %seed.path, ?damage, "seed mask erased"),
            Err(e) => tracing::warn!(path = %seed.path, error = %e, "seed mask skipped"),
        }
    }

    Ok(ScratchState {
        surface,
        brush: BrushRasterizer::new(),
        stroke: None,
        click: None,
        cursor_enabled,
    })
}

fn apply_seed<H: ScratchHost>(
    surface: &mut ScratchSurface,
    seed: &SeedConfig,
    host: &mut H,
) -> VeilResult<Option<Rect>> {
    let bytes = host.read_seed(&seed.path)?;
    let image = decode_seed(&bytes)?;
    let mask = seed_coverage(&image, seed, surface.width(), surface.height())?;
    Ok(mask.and_then(|m| surface.destination_out(&m)))
}

/// Canvas backing size for a CSS length; truncates like an integer canvas dimension.
fn css_to_pixels(v: f64) -> u32 {
    if v.is_finite() && v > 0.0 {
        v.floor() as u32
    } else {
        0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scratch/canvas.rs"]
mod tests;
