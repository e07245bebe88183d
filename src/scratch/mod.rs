//! Scratch-to-reveal overlay: an opaque premultiplied surface erased with
//! destination-out along pointer strokes, optionally pre-seeded from an image.

/// Brush shapes and their rasterization into coverage tiles.
pub mod brush;
/// Host-bound scratch canvas.
pub mod canvas;
/// Scratch configuration.
pub mod config;
/// Host seam and a headless host.
pub mod host;
/// Seed image decoding and thresholding.
pub mod seed;
/// Premultiplied overlay surface.
pub mod surface;

pub use brush::{BrushRasterizer, StrokeSegment};
pub use canvas::{ScratchEvent, ScratchRevealCanvas};
pub use config::{ScratchAnchors, ScratchConfig, SeedConfig, SeedMaskMode, SeedOffset, Sizing};
pub use host::{CursorIndicator, HeadlessScratchHost, ScratchHost};
pub use surface::{CoverageMask, ScratchSurface};
