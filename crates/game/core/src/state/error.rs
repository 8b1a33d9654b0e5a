//! State integrity errors.
//!
//! Raised when externally supplied data (a save slot or raw tower contents)
//! would produce a board that breaks the ordering or conservation invariants.

use crate::config::ConfigError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::TowerId;

/// Errors that occur while building or restoring game state from raw data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IntegrityError {
    #[error(transparent)]
    DiskCount(#[from] ConfigError),

    #[error("disk {disk} does not exist on a {disk_count}-disk board")]
    DiskOutOfRange { disk: u8, disk_count: u8 },

    #[error("disk {disk} appears more than once")]
    DuplicateDisk { disk: u8 },

    #[error("disk {disk} is missing from every tower")]
    MissingDisk { disk: u8 },

    /// A larger disk rests on a smaller one.
    #[error("tower {tower} is not ordered largest to smallest")]
    TowerOutOfOrder { tower: TowerId },

    /// Replaying the history from the starting board failed at `index`.
    #[error("history entry {index} is not a legal move from the replayed position")]
    HistoryMismatch { index: usize },

    #[error("replayed history does not reproduce the saved towers")]
    HistoryDiverges,

    /// Per-player move counters disagree with the history length.
    #[error("player move counters total {recorded} but history holds {history} moves")]
    MoveCountMismatch { recorded: u32, history: usize },

    #[error("current player does not match the recorded turn order")]
    CurrentPlayerMismatch,

    /// Moves were recorded but the session has no start time.
    #[error("slot records {moves} moves but no start time")]
    MissingStartTime { moves: usize },
}

impl GameError for IntegrityError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use IntegrityError::*;
        match self {
            DiskCount(_) => "INTEGRITY_DISK_COUNT",
            DiskOutOfRange { .. } => "INTEGRITY_DISK_OUT_OF_RANGE",
            DuplicateDisk { .. } => "INTEGRITY_DUPLICATE_DISK",
            MissingDisk { .. } => "INTEGRITY_MISSING_DISK",
            TowerOutOfOrder { .. } => "INTEGRITY_TOWER_OUT_OF_ORDER",
            HistoryMismatch { .. } => "INTEGRITY_HISTORY_MISMATCH",
            HistoryDiverges => "INTEGRITY_HISTORY_DIVERGES",
            MoveCountMismatch { .. } => "INTEGRITY_MOVE_COUNT_MISMATCH",
            CurrentPlayerMismatch => "INTEGRITY_CURRENT_PLAYER_MISMATCH",
            MissingStartTime { .. } => "INTEGRITY_MISSING_START_TIME",
        }
    }
}
