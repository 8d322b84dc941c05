/// Convenience result type used across the crate.
pub type BcsResult<T> = Result<T, BcsError>;

/// Error taxonomy for config handling, pipeline generation and execution.
///
/// Every generator failure maps to exactly one variant; a caller that gets an `Err` must not
/// execute anything, there is no partially built pipeline to fall back to.
#[derive(thiserror::Error, Debug)]
pub enum BcsError {
    /// A value is out of range or otherwise malformed.
    #[error("validation error: {0}")]
    Validation(String),

    /// Sender/receiver counts or other arity rules of a topology are violated.
    #[error("topology error: {0}")]
    Topology(String),

    /// Two payloads cannot be combined (video vs audio, non-video where video is required).
    #[error("incompatible payloads: {0}")]
    Incompatible(String),

    /// A function, transport, media kind or acceleration mode that is not supported.
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// A parameter required by the selected mode is absent.
    #[error("missing parameter: {0}")]
    MissingParameter(String),

    /// Errors when serializing or deserializing configuration documents.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Spawning or waiting for the external process failed.
    #[error("execution error: {0}")]
    Execution(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BcsError {
    /// Build a [`BcsError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BcsError::Topology`] value.
    pub fn topology(msg: impl Into<String>) -> Self {
        Self::Topology(msg.into())
    }

    /// Build a [`BcsError::Incompatible`] value.
    pub fn incompatible(msg: impl Into<String>) -> Self {
        Self::Incompatible(msg.into())
    }

    /// Build a [`BcsError::Unsupported`] value.
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }

    /// Build a [`BcsError::MissingParameter`] value.
    pub fn missing(msg: impl Into<String>) -> Self {
        Self::MissingParameter(msg.into())
    }

    /// Build a [`BcsError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`BcsError::Execution`] value.
    pub fn execution(msg: impl Into<String>) -> Self {
        Self::Execution(msg.into())
    }
}

impl From<serde_json::Error> for BcsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
