//! Draggable polygon mask that morphs between an artistic start shape and a
//! screen-filling end shape.
//!
//! [`MorphCore`] is the source of truth and a pure state machine; [`MorphFrame`] is
//! its projection onto SVG attributes; [`PolygonMaskMorpher`] binds the two to a
//! [`MorphHost`].

/// Morpher configuration and presets.
pub mod config;
/// Pure morph state machine.
pub mod core;
/// Projection of morph state onto polygon points and handle views.
pub mod frame;
/// Host seam and a headless host.
pub mod host;
/// Host-bound morpher.
pub mod morpher;
/// Drag session state.
pub mod session;
/// Responsive start/end shape computation.
pub mod shapes;

pub use config::{HandleStyle, MorphAnchors, MorphConfig, ResponsiveScale};
pub use core::{MorphCore, MorphEffect, MorphEvent};
pub use frame::{HandleState, HandleView, MorphFrame};
pub use host::{HeadlessMorphHost, MorphHost};
pub use morpher::PolygonMaskMorpher;
pub use session::MorphSession;
