use std::collections::{HashMap, HashSet};

use crate::{
    foundation::{
        core::{Point, Rect, Viewport},
        error::{VeilError, VeilResult},
    },
    host::{Anchor, ElementHandle},
    scratch::surface::ScratchSurface,
};

/// Pointer-following indicator over the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CursorIndicator {
    pub visible: bool,
    /// Screen position.
    pub position: Point,
    /// A stroke is in progress.
    pub scratching: bool,
}

/// The page-side collaborator of a [`crate::ScratchRevealCanvas`].
pub trait ScratchHost {
    /// Whether the element named by `anchor` exists in the document.
    fn element_exists(&self, anchor: Anchor<'_>) -> bool;

    /// Bounding box size of the container, if it is laid out.
    fn container_size(&self) -> Option<Viewport>;

    fn viewport_size(&self) -> Viewport;

    /// Encoded bytes of the seed image at `path`.
    fn read_seed(&mut self, path: &str) -> VeilResult<Vec<u8>>;

    /// Lock or unlock page scrolling.
    fn set_scroll_locked(&mut self, locked: bool);

    /// Whether the canvas receives pointer events.
    fn set_pointer_interception(&mut self, enabled: bool);

    /// Topmost element under a screen point.
    fn hit_test(&self, screen: Point) -> Option<ElementHandle>;

    /// The canvas element itself; never receives passed-through clicks.
    fn canvas_element(&self) -> Option<ElementHandle>;

    fn dispatch_click(&mut self, target: ElementHandle);

    /// Upload `surface`; only `damage` (surface pixels) changed since the last call.
    fn present(&mut self, surface: &ScratchSurface, damage: Rect);

    fn update_cursor(&mut self, cursor: &CursorIndicator);
}

/// In-memory host for tests and offline rendering.
///
/// Hit-testing returns the canvas while interception is on, otherwise the last
/// registered element whose rectangle contains the point.
#[derive(Clone, Debug)]
pub struct HeadlessScratchHost {
    pub container: Option<Viewport>,
    pub viewport: Viewport,
    missing: HashSet<String>,
    seeds: HashMap<String, Vec<u8>>,
    elements: Vec<(Rect, ElementHandle)>,
    pub canvas: ElementHandle,
    pub scroll_locked: bool,
    pub intercepting: bool,
    pub clicks: Vec<ElementHandle>,
    /// Damage rectangle of every present, in order.
    pub damage: Vec<Rect>,
    pub cursor: CursorIndicator,
}

impl HeadlessScratchHost {
    /// Container and viewport both `size`.
    pub fn new(size: Viewport) -> Self {
        Self {
            container: Some(size),
            viewport: size,
            missing: HashSet::new(),
            seeds: HashMap::new(),
            elements: Vec::new(),
            canvas: ElementHandle(0),
            scroll_locked: false,
            intercepting: true,
            clicks: Vec::new(),
            damage: Vec::new(),
            cursor: CursorIndicator::default(),
        }
    }

    /// Report the element with this selector as absent.
    pub fn without(mut self, selector: &str) -> Self {
        self.missing.insert(selector.to_string());
        self
    }

    pub fn with_container(mut self, container: Option<Viewport>) -> Self {
        self.container = container;
        self
    }

    pub fn with_seed(mut self, path: &str, bytes: Vec<u8>) -> Self {
        self.seeds.insert(path.to_string(), bytes);
        self
    }

    /// Register a page element under the canvas, in screen coordinates.
    pub fn with_element(mut self, rect: Rect, handle: ElementHandle) -> Self {
        self.elements.push((rect, handle));
        self
    }
}

impl ScratchHost for HeadlessScratchHost {
    fn element_exists(&self, anchor: Anchor<'_>) -> bool {
        !self.missing.contains(&anchor.to_selector())
    }

    fn container_size(&self) -> Option<Viewport> {
        self.container
    }

    fn viewport_size(&self) -> Viewport {
        self.viewport
    }

    fn read_seed(&mut self, path: &str) -> VeilResult<Vec<u8>> {
        self.seeds
            .get(path)
            .cloned()
            .ok_or_else(|| VeilError::seed(format!("seed '{path}' not found")))
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        self.scroll_locked = locked;
    }

    fn set_pointer_interception(&mut self, enabled: bool) {
        self.intercepting = enabled;
    }

    fn hit_test(&self, screen: Point) -> Option<ElementHandle> {
        if self.intercepting {
            return Some(self.canvas);
        }
        self.elements
            .iter()
            .rev()
            .find(|(rect, _)| rect.contains(screen))
            .map(|&(_, handle)| handle)
    }

    fn canvas_element(&self) -> Option<ElementHandle> {
        Some(self.canvas)
    }

    fn dispatch_click(&mut self, target: ElementHandle) {
        self.clicks.push(target);
    }

    fn present(&mut self, _surface: &ScratchSurface, damage: Rect) {
        self.damage.push(damage);
    }

    fn update_cursor(&mut self, cursor: &CursorIndicator) {
        self.cursor = *cursor;
    }
}
