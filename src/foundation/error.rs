/// Convenience result type used across stickframe.
pub type StickframeResult<T> = Result<T, StickframeError>;

/// Top-level error taxonomy used by editor, export and storage APIs.
///
/// Out-of-range frame/stroke indices are not errors: store operations treat them as no-ops.
#[derive(thiserror::Error, Debug)]
pub enum StickframeError {
    /// Invalid user-provided or document data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while rasterizing drawing commands.
    #[error("render error: {0}")]
    Render(String),

    /// Errors while encoding rendered frames.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors reading or writing the local key-value store.
    #[error("storage error: {0}")]
    Storage(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// A host capability (encoder binary, recording API) is missing.
    #[error("unavailable: {0}")]
    Unavailable(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StickframeError {
    /// Build a [`StickframeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StickframeError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`StickframeError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`StickframeError::Storage`] value.
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Build a [`StickframeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`StickframeError::Unavailable`] value.
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}

impl From<serde_json::Error> for StickframeError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
