//! Efficiency and score formulas.

use crate::solver::min_moves;
use crate::state::{GameMode, GameState, PlayerId, Timestamp};

/// Seconds of play after which the time bonus is exhausted.
pub const TIME_BONUS_CEILING_SECS: f64 = 1000.0;

/// `min_moves / moves` as a percentage, capped at 100.
///
/// A board with no moves yet reports 100.
pub fn efficiency_percent(disk_count: u8, moves: u32) -> f64 {
    if moves == 0 {
        return 100.0;
    }
    let optimal = min_moves(disk_count) as f64;
    (optimal / moves as f64 * 100.0).min(100.0)
}

/// `max(0, 1000 - elapsed_seconds)`, or zero before the clock started.
pub fn time_bonus(elapsed_ms: Option<u64>) -> f64 {
    match elapsed_ms {
        Some(ms) => (TIME_BONUS_CEILING_SECS - ms as f64 / 1000.0).max(0.0),
        None => 0.0,
    }
}

/// `round(efficiency * 10 + time_bonus)`.
pub fn score(disk_count: u8, moves: u32, elapsed_ms: Option<u64>) -> u32 {
    (efficiency_percent(disk_count, moves) * 10.0 + time_bonus(elapsed_ms)).round() as u32
}

/// Score of `state` evaluated at `now`.
pub fn score_state(state: &GameState, now: Timestamp) -> u32 {
    let elapsed = state.started_at().map(|_| state.elapsed_ms(now));
    score(state.disk_count(), state.move_count(), elapsed)
}

/// Final figures reported when a puzzle is solved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WinSummary {
    pub winner: PlayerId,
    pub mode: GameMode,
    pub disk_count: u8,
    pub moves: u32,
    pub min_moves: u64,
    pub elapsed_ms: u64,
    /// Rounded efficiency percentage.
    pub efficiency: u32,
    pub score: u32,
}

impl WinSummary {
    /// Builds the summary of a completed game. Scores must already be
    /// recorded on the players.
    ///
    /// In multiplayer, player one wins only with a strictly higher score.
    pub fn from_state(state: &GameState, now: Timestamp) -> Self {
        let players = state.players();
        let winner = match state.mode() {
            GameMode::Single => PlayerId::One,
            GameMode::Multiplayer => {
                if players[PlayerId::One].score > players[PlayerId::Two].score {
                    PlayerId::One
                } else {
                    PlayerId::Two
                }
            }
        };

        let moves = state.move_count();
        Self {
            winner,
            mode: state.mode(),
            disk_count: state.disk_count(),
            moves,
            min_moves: min_moves(state.disk_count()),
            elapsed_ms: state.elapsed_ms(now),
            efficiency: efficiency_percent(state.disk_count(), moves).round() as u32,
            score: players[winner].score,
        }
    }
}
