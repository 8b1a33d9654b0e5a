//! Serializable intents and their outcomes.
//!
//! UI layers translate input (clicks, keys, gestures, typed commands) into an
//! [`Intent`] and hand it to [`super::GameSession::dispatch`].

use serde::{Deserialize, Serialize};

use hanoi_core::{
    Disk, GameMode, MoveRecord, MoveSource, SaveSlot, SelectOutcome, TowerId, WinSummary,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    SelectDisk { tower: TowerId, disk: Disk },
    AttemptMove { target: TowerId, source: MoveSource },
    Undo,
    NewGame { disk_count: u8 },
    ResetGame,
    SetMode(GameMode),
    StartAutoSolve,
    StepAutoSolve,
    CancelAutoSolve,
    SaveSession { name: String },
    LoadSession(Box<SaveSlot>),
    LoadSaved { index: usize },
    ListSaves,
    DeleteSave { index: usize },
    ApplyTheme { name: String },
}

/// A successfully executed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub record: MoveRecord,
    pub source: MoveSource,
    /// Present when this move solved the puzzle.
    pub summary: Option<WinSummary>,
}

impl MoveOutcome {
    pub fn won(&self) -> bool {
        self.summary.is_some()
    }
}

/// Result of one auto-solve step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplayStep {
    /// A planned move executed; `remaining` moves are still queued. The
    /// replay ends on its own once the puzzle is solved.
    Applied {
        outcome: MoveOutcome,
        remaining: usize,
    },
    /// The plan was already exhausted; the replay is over.
    Finished { won: bool },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IntentOutcome {
    Selected(SelectOutcome),
    Moved(MoveOutcome),
    Undone(MoveRecord),
    /// A fresh board is in place (new game, reset, mode change).
    Reset,
    AutoSolveStarted { total: usize },
    AutoSolveStepped(ReplayStep),
    /// `true` when a running replay was stopped.
    AutoSolveCancelled(bool),
    Saved { index: usize, slot: Box<SaveSlot> },
    Loaded { name: String },
    Saves(Vec<(usize, SaveSlot)>),
    SaveDeleted(Box<SaveSlot>),
    ThemeApplied { name: String },
}
