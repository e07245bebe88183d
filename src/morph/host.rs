use std::collections::HashSet;

use crate::{
    foundation::core::{Affine, PointerId, Viewport},
    host::Anchor,
    morph::frame::MorphFrame,
};

/// The page-side collaborator of a [`crate::PolygonMaskMorpher`].
///
/// Implementations own the SVG elements; the morpher only ever hands them finished
/// [`MorphFrame`]s and pointer-capture requests.
pub trait MorphHost {
    /// Whether the element named by `anchor` exists in the document.
    fn element_exists(&self, anchor: Anchor<'_>) -> bool;

    /// Current logical-to-screen matrix of the SVG root, if it is attached and laid out.
    fn screen_ctm(&self) -> Option<Affine>;

    /// Current viewport size.
    fn viewport(&self) -> Viewport;

    /// Ask for `on_animation_frame` to be called before the next paint.
    fn request_animation_frame(&mut self);

    /// Write polygon points and handle attributes.
    fn commit(&mut self, frame: &MorphFrame);

    fn set_pointer_capture(&mut self, pointer: PointerId, handle: usize);

    fn release_pointer_capture(&mut self, pointer: PointerId, handle: usize);
}

/// In-memory host for tests, demos and server-side rendering.
#[derive(Clone, Debug)]
pub struct HeadlessMorphHost {
    pub viewport: Viewport,
    pub ctm: Option<Affine>,
    missing: HashSet<String>,
    pub frame_requests: usize,
    pub commits: Vec<MorphFrame>,
    pub captured: Option<(PointerId, usize)>,
}

impl HeadlessMorphHost {
    /// A host whose screen space equals logical space.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ctm: Some(Affine::IDENTITY),
            missing: HashSet::new(),
            frame_requests: 0,
            commits: Vec::new(),
            captured: None,
        }
    }

    /// Report the element with this selector (`#id` for ids) as absent.
    pub fn without(mut self, selector: &str) -> Self {
        self.missing.insert(selector.to_string());
        self
    }

    pub fn with_ctm(mut self, ctm: Option<Affine>) -> Self {
        self.ctm = ctm;
        self
    }

    pub fn last_commit(&self) -> Option<&MorphFrame> {
        self.commits.last()
    }
}

impl MorphHost for HeadlessMorphHost {
    fn element_exists(&self, anchor: Anchor<'_>) -> bool {
        !self.missing.contains(&anchor.to_selector())
    }

    fn screen_ctm(&self) -> Option<Affine> {
        self.ctm
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn request_animation_frame(&mut self) {
        self.frame_requests += 1;
    }

    fn commit(&mut self, frame: &MorphFrame) {
        self.commits.push(frame.clone());
    }

    fn set_pointer_capture(&mut self, pointer: PointerId, handle: usize) {
        self.captured = Some((pointer, handle));
    }

    fn release_pointer_capture(&mut self, pointer: PointerId, handle: usize) {
        if self.captured == Some((pointer, handle)) {
            self.captured = None;
        }
    }
}
