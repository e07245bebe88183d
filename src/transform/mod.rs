//! Shared transform helpers (linear interpolation, clamping, screen/logical conversion).

/// Screen to logical coordinate conversion through the host's screen CTM.
pub mod affine;
/// Linear interpolation helpers.
pub mod linear;
/// Clamping helpers.
pub mod non_linear;
