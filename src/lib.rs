//! Veil renders two kinds of interactive page decoration without owning a DOM.
//!
//! - [`PolygonMaskMorpher`]: a polygon mask whose control points are dragged along
//!   fixed axes, morphing each point group from an artistic start shape to a
//!   rectangle that fills the visible viewport.
//! - [`ScratchRevealCanvas`]: an opaque premultiplied RGBA8 overlay erased with
//!   destination-out along pointer strokes, optionally pre-seeded from an image.
//!
//! Both components keep their model in plain Rust state and talk to the page through a
//! host trait ([`MorphHost`], [`ScratchHost`]). What the host receives is a pure
//! projection of that state, so everything runs headless with [`HeadlessMorphHost`]
//! and [`HeadlessScratchHost`].
//!
//! Entry points never return errors to page code: a component that cannot bind logs a
//! `tracing` warning and goes inert. The `try_initialize` constructors surface the
//! [`VeilError`] instead.
#![forbid(unsafe_code)]

mod animation;
mod foundation;
mod host;
mod morph;
mod scratch;

/// Polygon helpers: shapes, point groups, cover scaling and perimeter distribution.
pub mod geometry;
/// Shared transform helpers (linear, affine, non-linear utilities).
pub mod transform;

pub use animation::ease::Ease;
pub use foundation::core::{
    Affine, BezPath, Point, PointerId, Rect, Rgba8Premul, Size, Vec2, Viewport,
};
pub use foundation::error::{VeilError, VeilResult};
pub use host::{Anchor, ElementHandle};
pub use morph::shapes::{aspect_blend, end_shape_for, responsive_scale, start_shape_for};
pub use morph::{
    HandleState, HandleStyle, HandleView, HeadlessMorphHost, MorphAnchors, MorphConfig, MorphCore,
    MorphEffect, MorphEvent, MorphFrame, MorphHost, MorphSession, PolygonMaskMorpher,
    ResponsiveScale,
};
pub use scratch::seed::{decode_seed, seed_coverage};
pub use scratch::{
    BrushRasterizer, CoverageMask, CursorIndicator, HeadlessScratchHost, ScratchAnchors,
    ScratchConfig, ScratchEvent, ScratchHost, ScratchRevealCanvas, ScratchSurface, SeedConfig,
    SeedMaskMode, SeedOffset, Sizing, StrokeSegment,
};
