/// Convenience result type used across the crate.
pub type TextcardResult<T> = Result<T, TextcardError>;

/// Top-level error taxonomy used by renderer APIs.
///
/// Background-image decode failures during a render are deliberately *not*
/// surfaced here: the compositor degrades to the flat or cleared background
/// and the render still completes. Only surface acquisition and export
/// failures propagate to callers.
#[derive(thiserror::Error, Debug)]
pub enum TextcardError {
    /// Invalid user-provided configuration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// The render target could not be created at the requested size.
    #[error("surface error: {0}")]
    MissingSurface(String),

    /// Export was requested on a zero-area surface; re-render before exporting.
    #[error("degenerate surface: {0}")]
    DegenerateSurface(String),

    /// An image could not be decoded.
    #[error("image decode error: {0}")]
    Decode(String),

    /// Bitmap encoding produced no usable data.
    #[error("png encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TextcardError {
    /// Build a [`TextcardError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TextcardError::MissingSurface`] value.
    pub fn missing_surface(msg: impl Into<String>) -> Self {
        Self::MissingSurface(msg.into())
    }

    /// Build a [`TextcardError::DegenerateSurface`] value.
    pub fn degenerate_surface(msg: impl Into<String>) -> Self {
        Self::DegenerateSurface(msg.into())
    }

    /// Build a [`TextcardError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`TextcardError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}
