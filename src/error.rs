use thiserror::Error;

use crate::participant::ParticipantId;

/// Result type for draw session operations
pub type DrawResult<T> = Result<T, DrawError>;

/// Errors that can occur while operating a draw session.
///
/// None of these are fatal: the operation that produced one was not applied
/// and the session is left exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawError {
    /// Requested participant count is outside the configured bounds
    #[error("Participant count must be between {min} and {max}, got {count}")]
    InvalidCount { count: u32, min: u32, max: u32 },

    /// No participants are left to draw from
    #[error("All participants have been drawn. Reset to start a new round")]
    PoolExhausted,

    /// The operation is not allowed while a draw is being revealed
    #[error("A draw is already in progress")]
    DrawInProgress,

    /// The animation was asked to start while it was not idle
    #[error("The reveal animation is already running")]
    AlreadyRunning,

    /// The undo stack is empty
    #[error("Nothing to undo")]
    NothingToUndo,

    /// The participant is already in the remaining pool
    #[error("Participant {0} is already available for drawing")]
    AlreadyAvailable(ParticipantId),

    /// The participant is neither remaining nor drawn
    #[error("Participant {0} does not exist")]
    NotFound(ParticipantId),
}

/// Discriminant of a [`DrawError`], carried by failure notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    InvalidCount,
    PoolExhausted,
    DrawInProgress,
    AlreadyRunning,
    NothingToUndo,
    AlreadyAvailable,
    NotFound,
}

impl DrawError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidCount { .. } => ErrorKind::InvalidCount,
            Self::PoolExhausted => ErrorKind::PoolExhausted,
            Self::DrawInProgress => ErrorKind::DrawInProgress,
            Self::AlreadyRunning => ErrorKind::AlreadyRunning,
            Self::NothingToUndo => ErrorKind::NothingToUndo,
            Self::AlreadyAvailable(_) => ErrorKind::AlreadyAvailable,
            Self::NotFound(_) => ErrorKind::NotFound,
        }
    }
}

/// Errors that can occur while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
