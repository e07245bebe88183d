//! Shared primitives: core value types, the error taxonomy and fixed-point helpers.

/// Core value types re-exported from `kurbo` plus viewport and color types.
pub mod core;
/// Crate-wide error type.
pub mod error;
pub(crate) mod math;
