/// Convenience result type used across the poster pipeline.
pub type PosterResult<T> = Result<T, PosterError>;

/// Top-level error taxonomy used by pipeline APIs.
///
/// Recoverable conditions (missing theme, missing fonts, an absent feature
/// layer) are handled at their seams and never reach this type; see the
/// per-module recovery policies.
#[derive(thiserror::Error, Debug)]
pub enum PosterError {
    /// Invalid caller-provided input: bounds, layer data, effect parameters.
    #[error("validation error: {0}")]
    Validation(String),

    /// Fatal failure from the geodata provider (road network fetch included).
    #[error("geodata error: {0}")]
    Geodata(String),

    /// Failure while compositing or rasterizing the canvas.
    #[error("render error: {0}")]
    Render(String),

    /// The requested location could not be resolved to coordinates.
    #[error("location not found: {0}")]
    LocationNotFound(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PosterError {
    /// Build a [`PosterError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PosterError::Geodata`] value.
    pub fn geodata(msg: impl Into<String>) -> Self {
        Self::Geodata(msg.into())
    }

    /// Build a [`PosterError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`PosterError::LocationNotFound`] value.
    pub fn location_not_found(msg: impl Into<String>) -> Self {
        Self::LocationNotFound(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
