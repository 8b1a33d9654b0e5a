//! Rejections surfaced by [`super::GameSession`].

use thiserror::Error;

use hanoi_core::{ConfigError, ErrorSeverity, ExecuteError, GameError, IntegrityError};

use crate::repository::RepositoryError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Execute(#[from] ExecuteError),

    /// Human intents other than a hard reset are refused during auto-solve.
    #[error("auto-solve is running")]
    ReplayActive,

    #[error("auto-solve is not running")]
    ReplayInactive,

    #[error("select a disk before moving")]
    NoSelection,

    #[error("the puzzle is already solved")]
    GameCompleted,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("a save needs a name")]
    MissingSaveName,

    #[error("a theme needs a name")]
    MissingThemeName,

    #[error("no save slot at index {index}")]
    SlotNotFound { index: usize },

    #[error("save slot rejected: {0}")]
    Integrity(#[from] IntegrityError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl SessionError {
    /// True when a move was refused by the legal-move rule.
    pub fn is_illegal_move(&self) -> bool {
        match self {
            SessionError::Execute(error) => error
                .as_move_error()
                .is_some_and(|error| error.is_illegal_move()),
            _ => false,
        }
    }
}

impl GameError for SessionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            SessionError::Execute(error) => error.severity(),
            SessionError::Config(error) => error.severity(),
            SessionError::Integrity(error) => error.severity(),
            SessionError::ReplayActive
            | SessionError::ReplayInactive
            | SessionError::NoSelection
            | SessionError::GameCompleted
            | SessionError::SlotNotFound { .. } => ErrorSeverity::Recoverable,
            SessionError::MissingSaveName | SessionError::MissingThemeName => {
                ErrorSeverity::Validation
            }
            SessionError::Repository(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            SessionError::Execute(error) => error.error_code(),
            SessionError::Config(error) => error.error_code(),
            SessionError::Integrity(error) => error.error_code(),
            SessionError::ReplayActive => "SESSION_REPLAY_ACTIVE",
            SessionError::ReplayInactive => "SESSION_REPLAY_INACTIVE",
            SessionError::NoSelection => "SESSION_NO_SELECTION",
            SessionError::GameCompleted => "SESSION_GAME_COMPLETED",
            SessionError::MissingSaveName => "SESSION_MISSING_SAVE_NAME",
            SessionError::MissingThemeName => "SESSION_MISSING_THEME_NAME",
            SessionError::SlotNotFound { .. } => "SESSION_SLOT_NOT_FOUND",
            SessionError::Repository(_) => "SESSION_REPOSITORY",
        }
    }
}
