/// Crate-wide result alias.
pub type ScrubResult<T> = Result<T, ScrubError>;

/// Error type returned by fallible `scrubframe` APIs.
#[derive(thiserror::Error, Debug)]
pub enum ScrubError {
    /// Invalid configuration or input.
    #[error("validation error: {0}")]
    Validation(String),

    /// A frame resource could not be fetched.
    #[error("load error: {0}")]
    Load(String),

    /// A fetched frame could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Drawing onto a surface failed.
    #[error("render error: {0}")]
    Render(String),

    /// JSON (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrubError {
    /// Build a [`ScrubError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ScrubError::Load`].
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    /// Build a [`ScrubError::Decode`].
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`ScrubError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`ScrubError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
