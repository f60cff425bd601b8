pub type TextfxResult<T> = Result<T, TextfxError>;

/// Errors raised by the motion/animation engine.
///
/// Validation failures surface at construction or activation time, never during a tick.
#[derive(thiserror::Error, Debug)]
pub enum TextfxError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("path not found: {0}")]
    PathNotFound(String),

    #[error("scene not found: {0}")]
    SceneNotFound(String),

    #[error("duplicate event registration: {0}")]
    DuplicateEventRegistration(String),

    #[error("event error: {0}")]
    Event(String),

    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TextfxError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn path_not_found(id: impl Into<String>) -> Self {
        Self::PathNotFound(id.into())
    }

    pub fn scene_not_found(id: impl Into<String>) -> Self {
        Self::SceneNotFound(id.into())
    }

    pub fn duplicate_event(msg: impl Into<String>) -> Self {
        Self::DuplicateEventRegistration(msg.into())
    }

    pub fn event(msg: impl Into<String>) -> Self {
        Self::Event(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// `true` for lookup misses that a caller may choose to ignore.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PathNotFound(_) | Self::SceneNotFound(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
