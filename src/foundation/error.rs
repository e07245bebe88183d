/// Convenience result type used across veil.
pub type VeilResult<T> = Result<T, VeilError>;

/// Top-level error taxonomy.
///
/// Component entry points never surface these to page code; they log and go
/// inert instead. The fallible `try_*` constructors and config loaders return
/// them directly.
#[derive(thiserror::Error, Debug)]
pub enum VeilError {
    /// Malformed configuration or geometry input.
    #[error("validation error: {0}")]
    Validation(String),

    /// A required host element was not present at initialization.
    #[error("missing element: {0}")]
    MissingElement(String),

    /// Raster surface or coverage mismatch.
    #[error("raster error: {0}")]
    Raster(String),

    /// Seed mask could not be loaded or decoded.
    #[error("seed mask error: {0}")]
    Seed(String),

    /// Errors when serializing or deserializing configs.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VeilError {
    /// Build a [`VeilError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`VeilError::MissingElement`] value.
    pub fn missing_element(msg: impl Into<String>) -> Self {
        Self::MissingElement(msg.into())
    }

    /// Build a [`VeilError::Raster`] value.
    pub fn raster(msg: impl Into<String>) -> Self {
        Self::Raster(msg.into())
    }

    /// Build a [`VeilError::Seed`] value.
    pub fn seed(msg: impl Into<String>) -> Self {
        Self::Seed(msg.into())
    }

    /// Build a [`VeilError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
