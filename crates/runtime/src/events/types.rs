//! Event types for different topics.

use hanoi_core::{
    AchievementId, GameMode, MoveRecord, MoveSource, Selection, TowerId, WinSummary,
};
use serde::{Deserialize, Serialize};

/// Events describing board changes and session lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The selection changed; `None` means it was cleared.
    DiskSelected { selection: Option<Selection> },

    /// A move was refused. Nothing changed.
    InvalidMove {
        from: TowerId,
        to: TowerId,
        reason: String,
    },

    MoveApplied {
        record: MoveRecord,
        source: MoveSource,
        move_count: u32,
    },

    MoveUndone { record: MoveRecord, move_count: u32 },

    /// A fresh board replaced the session (new game, reset, or mode change).
    GameReset { disk_count: u8, mode: GameMode },

    SessionSaved { name: String, index: usize },

    SessionLoaded { name: String, move_count: u32 },

    AutoSolveStarted { total: usize },

    /// The replay ended by win, exhaustion, error, or cancellation.
    AutoSolveFinished { won: bool },
}

/// Events reported by the progress evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProgressEvent {
    AchievementUnlocked(AchievementId),
    GameWon(WinSummary),
}
