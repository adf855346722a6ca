/// Convenience result type used across glyphswarm.
pub type SwarmResult<T> = Result<T, SwarmError>;

/// Top-level error taxonomy used by engine APIs.
///
/// The taxonomy is deliberately narrow: the engine is purely presentational, and the
/// recoverable conditions (missing surface, empty sampled point set) are modeled as
/// ordinary values, not errors.
#[derive(thiserror::Error, Debug)]
pub enum SwarmError {
    /// Invalid user-provided configuration or input data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while shaping or rasterizing target glyphs.
    #[error("raster error: {0}")]
    Raster(String),

    /// Errors while drawing or compositing the particle trail.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SwarmError {
    /// Build a [`SwarmError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SwarmError::Raster`] value.
    pub fn raster(msg: impl Into<String>) -> Self {
        Self::Raster(msg.into())
    }

    /// Build a [`SwarmError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
