//! Authoritative puzzle state representation.
//!
//! This module owns the board, move history, selection, turn bookkeeping and
//! the timer anchor. Hosts clone or query this state but mutate it exclusively
//! through the engine.
mod board;
mod error;
mod save;

pub use board::{Board, Disk, InvalidTower, Tower, TowerId};
pub use error::IntegrityError;
pub use save::SaveSlot;

use core::ops::{Index, IndexMut};

use crate::config::{ConfigError, GameConfig};

/// Milliseconds since an arbitrary host-chosen epoch.
///
/// The engine never reads a clock; hosts stamp every action through
/// [`crate::Env`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Milliseconds from `earlier` to `self`, zero if the clock went backwards.
    pub const fn saturating_elapsed_since(self, earlier: Timestamp) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerId {
    #[default]
    One,
    Two,
}

impl PlayerId {
    pub const fn other(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }

    /// Player number as shown to people (1 or 2).
    pub const fn number(self) -> u8 {
        self.index() as u8 + 1
    }
}

impl core::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// Per-player counters. In single-player mode player one's entry doubles as
/// the global statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerStats {
    pub moves: u32,
    pub score: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Players([PlayerStats; 2]);

impl Players {
    pub fn total_moves(&self) -> u32 {
        self.0.iter().map(|stats| stats.moves).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &PlayerStats)> {
        [PlayerId::One, PlayerId::Two]
            .into_iter()
            .zip(self.0.iter())
    }
}

impl Index<PlayerId> for Players {
    type Output = PlayerStats;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.0[player.index()]
    }
}

impl IndexMut<PlayerId> for Players {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.0[player.index()]
    }
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum GameMode {
    #[default]
    Single,
    Multiplayer,
}

/// Session lifecycle: `NotStarted -> InProgress -> Completed`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

/// One executed move, pushed on every accepted transfer and popped by undo.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveRecord {
    pub from: TowerId,
    pub to: TowerId,
    pub disk: Disk,
    pub player: PlayerId,
}

/// The disk a human has picked up. Always the current top of `tower`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Selection {
    pub tower: TowerId,
    pub disk: Disk,
}

/// Canonical snapshot of a single puzzle session.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) history: Vec<MoveRecord>,
    pub(crate) selection: Option<Selection>,
    pub(crate) mode: GameMode,
    pub(crate) current_player: PlayerId,
    pub(crate) players: Players,
    pub(crate) status: SessionStatus,
    /// Stamped by the first accepted move.
    pub(crate) started_at: Option<Timestamp>,
    /// Stamped by the winning move.
    pub(crate) finished_at: Option<Timestamp>,
}

impl GameState {
    /// Builds the starting position: every disk on tower A, empty history,
    /// zeroed counters, player one to move.
    pub fn new(disk_count: u8, mode: GameMode) -> Result<Self, ConfigError> {
        Ok(Self {
            board: Board::new(disk_count)?,
            history: Vec::new(),
            selection: None,
            mode,
            current_player: PlayerId::One,
            players: Players::default(),
            status: SessionStatus::NotStarted,
            started_at: None,
            finished_at: None,
        })
    }

    pub fn with_config(config: &GameConfig, mode: GameMode) -> Result<Self, ConfigError> {
        Self::new(config.disk_count, mode)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn disk_count(&self) -> u8 {
        self.board.disk_count()
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.history.last()
    }

    /// Number of executed moves still on the history stack.
    pub fn move_count(&self) -> u32 {
        self.history.len() as u32
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    pub fn players(&self) -> &Players {
        &self.players
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_completed(&self) -> bool {
        self.status == SessionStatus::Completed
    }

    pub fn started_at(&self) -> Option<Timestamp> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<Timestamp> {
        self.finished_at
    }

    /// Elapsed play time. Zero before the first move; frozen once completed.
    pub fn elapsed_ms(&self, now: Timestamp) -> u64 {
        match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => end.saturating_elapsed_since(start),
            (Some(start), None) => now.saturating_elapsed_since(start),
            (None, _) => 0,
        }
    }

    /// Undo is offered only while there is history to pop and the game is
    /// still open.
    pub fn can_undo(&self) -> bool {
        !self.history.is_empty() && !self.is_completed()
    }

    /// Drops the current selection, e.g. when an automated replay takes over.
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Records a freshly computed score on `player`.
    pub fn set_score(&mut self, player: PlayerId, score: u32) {
        self.players[player].score = score;
    }

    pub(crate) fn player_after_move(&self, mover: PlayerId) -> PlayerId {
        match self.mode {
            GameMode::Single => PlayerId::One,
            GameMode::Multiplayer => mover.other(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_is_not_started() {
        let state = GameState::new(3, GameMode::Single).unwrap();
        assert_eq!(state.status(), SessionStatus::NotStarted);
        assert_eq!(state.move_count(), 0);
        assert_eq!(state.current_player(), PlayerId::One);
        assert!(!state.can_undo());
        assert_eq!(state.elapsed_ms(Timestamp(5_000)), 0);
    }

    #[test]
    fn elapsed_freezes_after_completion() {
        let mut state = GameState::new(1, GameMode::Single).unwrap();
        state.started_at = Some(Timestamp(1_000));
        assert_eq!(state.elapsed_ms(Timestamp(4_000)), 3_000);

        state.finished_at = Some(Timestamp(2_500));
        assert_eq!(state.elapsed_ms(Timestamp(9_000)), 1_500);
    }

    #[test]
    fn game_mode_parses_case_insensitively() {
        assert_eq!("Multiplayer".parse::<GameMode>(), Ok(GameMode::Multiplayer));
        assert_eq!(GameMode::Single.to_string(), "single");
        assert!("coop".parse::<GameMode>().is_err());
    }
}
