//! Polygon geometry shared by the morpher: shapes, point groups, cover scaling and
//! perimeter distribution.

/// "Cover" (aspect-fill) visible-rect math.
pub mod cover;
/// Partition of control point indices into independently driven groups.
pub mod groups;
/// Even distribution of points along a rectangle's perimeter.
pub mod perimeter;
/// Point-list helpers: blending, scaling, winding and `points` attribute text.
pub mod shape;
