use serde::{Deserialize, Serialize};

use hanoi_core::{GameMode, PlayerId, Players, Selection, SessionStatus};

/// Read-only view of a session for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub disk_count: u8,
    /// Tower contents bottom to top.
    pub towers: [Vec<u8>; 3],
    pub selection: Option<Selection>,
    pub move_count: u32,
    pub min_moves: u64,
    pub elapsed_ms: u64,
    /// Percentage, 100 before the first move.
    pub efficiency: f64,
    pub players: Players,
    pub history_len: usize,
    /// False with an empty history, after completion, or during auto-solve.
    pub can_undo: bool,
    pub status: SessionStatus,
    pub mode: GameMode,
    pub current_player: PlayerId,
    pub auto_solving: bool,
    pub auto_solve_remaining: usize,
}

impl SessionSnapshot {
    pub fn is_completed(&self) -> bool {
        self.status == SessionStatus::Completed
    }
}
