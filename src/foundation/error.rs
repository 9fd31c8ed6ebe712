/// Convenience result type used across slotframe.
pub type SlotframeResult<T> = Result<T, SlotframeError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum SlotframeError {
    /// Invalid constructor arguments (ranges, limits, frame lists, shapes).
    #[error("validation error: {0}")]
    Validation(String),

    /// Operation not allowed in the runner's current state.
    #[error("state error: {0}")]
    State(String),

    /// Host scheduler does not provide the requested primitive.
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// Errors when serializing or deserializing definitions.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SlotframeError {
    /// Build a [`SlotframeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SlotframeError::State`] value.
    pub fn state(msg: impl Into<String>) -> Self {
        Self::State(msg.into())
    }

    /// Build a [`SlotframeError::Unsupported`] value.
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }

    /// Build a [`SlotframeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for SlotframeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
