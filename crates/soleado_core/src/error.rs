//! Error types shared by the motion engine crates

use thiserror::Error;

/// Errors raised by the motion engine
///
/// None of these are fatal to the host. Stale callbacks are never reported
/// here: they are detected by liveness checks and dropped silently.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MotionError {
    /// A selector string could not be parsed
    #[error("invalid selector `{0}`")]
    InvalidSelector(String),

    /// An ease curve name is not recognised
    #[error("unknown ease `{0}`")]
    UnknownEase(String),

    /// A trigger position such as `"top 88%"` could not be parsed
    #[error("invalid trigger `{0}`")]
    InvalidTrigger(String),

    /// A disclosure panel id is not part of the group
    #[error("unknown disclosure panel {0}")]
    UnknownPanel(usize),

    /// The owning scope was already released
    #[error("scope has been released")]
    ScopeReleased,

    /// A section's setup callback failed
    #[error("scope setup failed: {0}")]
    Setup(String),

    /// A single cancellable failed to revert
    #[error("cancel failed: {0}")]
    Cancel(String),
}

/// Result type for motion engine operations
pub type Result<T> = std::result::Result<T, MotionError>;
