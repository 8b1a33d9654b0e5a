//! Rejection types for the puzzle transitions.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{Disk, TowerId};

/// Errors raised while selecting a disk.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectError {
    #[error("tower {tower} is empty")]
    EmptyTower { tower: TowerId },

    /// Only the top disk of a tower can be picked up.
    #[error("disk {disk} is not on top of tower {tower} (top is {top})")]
    NotTopDisk {
        tower: TowerId,
        disk: Disk,
        top: Disk,
    },

    #[error("the puzzle is already solved")]
    GameCompleted,
}

impl GameError for SelectError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyTower { .. } => "SELECT_EMPTY_TOWER",
            Self::NotTopDisk { .. } => "SELECT_NOT_TOP_DISK",
            Self::GameCompleted => "SELECT_GAME_COMPLETED",
        }
    }
}

/// Errors raised while moving a disk.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveError {
    #[error("cannot move tower {tower} onto itself")]
    SameTower { tower: TowerId },

    #[error("tower {tower} has no disk to move")]
    EmptyTower { tower: TowerId },

    #[error("disk {disk} cannot rest on smaller disk {onto} at tower {to}")]
    DiskTooLarge { disk: Disk, onto: Disk, to: TowerId },

    #[error("the puzzle is already solved")]
    GameCompleted,

    /// The disk the caller believes is moving is no longer on top of `from`.
    #[error("selected disk {expected} is not the top of tower {from}")]
    StaleSelection { from: TowerId, expected: Disk },

    #[error("tower {tower} is out of order after the move")]
    OrderingViolated { tower: TowerId },
}

impl MoveError {
    /// True for the ordinary "that move is not allowed" outcomes.
    pub fn is_illegal_move(&self) -> bool {
        matches!(
            self,
            Self::SameTower { .. } | Self::EmptyTower { .. } | Self::DiskTooLarge { .. }
        )
    }
}

impl GameError for MoveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::SameTower { .. }
            | Self::EmptyTower { .. }
            | Self::DiskTooLarge { .. }
            | Self::GameCompleted => ErrorSeverity::Recoverable,
            Self::StaleSelection { .. } | Self::OrderingViolated { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::SameTower { .. } => "MOVE_SAME_TOWER",
            Self::EmptyTower { .. } => "MOVE_EMPTY_TOWER",
            Self::DiskTooLarge { .. } => "MOVE_DISK_TOO_LARGE",
            Self::GameCompleted => "MOVE_GAME_COMPLETED",
            Self::StaleSelection { .. } => "MOVE_STALE_SELECTION",
            Self::OrderingViolated { .. } => "MOVE_ORDERING_VIOLATED",
        }
    }
}

/// Errors raised while undoing the latest move.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UndoError {
    #[error("there is no move to undo")]
    EmptyHistory,

    #[error("moves cannot be undone after the puzzle is solved")]
    GameCompleted,

    /// The last history record does not describe the current board.
    #[error("history expects disk {expected} on top of tower {tower}")]
    HistoryDesync { tower: TowerId, expected: Disk },
}

impl GameError for UndoError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::EmptyHistory | Self::GameCompleted => ErrorSeverity::Recoverable,
            Self::HistoryDesync { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyHistory => "UNDO_EMPTY_HISTORY",
            Self::GameCompleted => "UNDO_GAME_COMPLETED",
            Self::HistoryDesync { .. } => "UNDO_HISTORY_DESYNC",
        }
    }
}
