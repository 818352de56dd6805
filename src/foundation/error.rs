/// Convenience result type used across lockshot.
pub type LockshotResult<T> = Result<T, LockshotError>;

/// Top-level error taxonomy used by the export pipeline.
#[derive(thiserror::Error, Debug)]
pub enum LockshotError {
    /// An external resource could not be retrieved.
    ///
    /// The serializer recovers from this locally by keeping the original reference.
    #[error("resource fetch error: {0}")]
    ResourceFetch(String),

    /// Export was requested while no composition root is bound.
    #[error("preview unavailable: {0}")]
    PreviewUnavailable(String),

    /// Raster-to-PNG encoding produced no output.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// A serialized document or an intermediate raster could not be decoded.
    #[error("image decode error: {0}")]
    ImageDecode(String),

    /// Invalid configuration or input data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LockshotError {
    /// Build a [`LockshotError::ResourceFetch`] value.
    pub fn resource_fetch(msg: impl Into<String>) -> Self {
        Self::ResourceFetch(msg.into())
    }

    /// Build a [`LockshotError::PreviewUnavailable`] value.
    pub fn preview_unavailable(msg: impl Into<String>) -> Self {
        Self::PreviewUnavailable(msg.into())
    }

    /// Build a [`LockshotError::Encoding`] value.
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    /// Build a [`LockshotError::ImageDecode`] value.
    pub fn image_decode(msg: impl Into<String>) -> Self {
        Self::ImageDecode(msg.into())
    }

    /// Build a [`LockshotError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LockshotError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// `true` for failures that abort an export attempt.
    ///
    /// Only [`LockshotError::ResourceFetch`] is recoverable (the serializer keeps the original
    /// reference in place).
    pub fn is_hard_failure(&self) -> bool {
        !matches!(self, Self::ResourceFetch(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
