//! Win detection follow-up: scoring, cumulative statistics and achievements.
//!
//! [`ProgressEvaluator`] is driven by the host after each executed action. It
//! owns the lifetime counters and evaluates the achievement table against an
//! injected [`AchievementStore`], reporting each unlock exactly once.
mod achievements;
mod score;
mod stats;

pub use achievements::{AchievementId, AchievementStore, Trigger};
pub use score::{WinSummary, efficiency_percent, score, score_state, time_bonus};
pub use stats::CumulativeStats;

use strum::IntoEnumIterator;

use crate::config::GameConfig;
use crate::solver::min_moves;
use crate::state::{GameMode, GameState, Timestamp};

/// Facts about a finished game used by the win predicates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct WinFacts {
    disk_count: u8,
    moves: u32,
    elapsed_ms: u64,
    mode: GameMode,
}

impl WinFacts {
    fn from_state(state: &GameState, now: Timestamp) -> Self {
        Self {
            disk_count: state.disk_count(),
            moves: state.move_count(),
            elapsed_ms: state.elapsed_ms(now),
            mode: state.mode(),
        }
    }
}

pub struct ProgressEvaluator<S> {
    store: S,
    stats: CumulativeStats,
}

impl<S: AchievementStore> ProgressEvaluator<S> {
    pub fn new(store: S, stats: CumulativeStats) -> Self {
        Self { store, stats }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn stats(&self) -> &CumulativeStats {
        &self.stats
    }

    pub fn unlocked(&self) -> Vec<AchievementId> {
        self.store.unlocked()
    }

    /// Counts the completed game, then evaluates every win achievement.
    pub fn on_win(&mut self, state: &GameState, now: Timestamp) -> Vec<AchievementId> {
        self.stats.record_win();
        let facts = WinFacts::from_state(state, now);
        self.evaluate(Trigger::Win, Some(facts))
    }

    pub fn on_undo(&mut self) -> Vec<AchievementId> {
        self.stats.record_undo();
        self.evaluate(Trigger::Undo, None)
    }

    /// Records a theme by its trimmed name. Blank names are ignored.
    pub fn on_theme(&mut self, theme: &str) -> Vec<AchievementId> {
        let theme = theme.trim();
        if theme.is_empty() {
            return Vec::new();
        }
        self.stats.record_theme(theme);
        self.evaluate(Trigger::ThemeApplied, None)
    }

    /// A save or a load completed.
    pub fn on_save_cycle(&mut self) -> Vec<AchievementId> {
        self.evaluate(Trigger::SaveCycle, None)
    }

    /// A move requested through a gesture was executed.
    pub fn on_gesture_move(&mut self) -> Vec<AchievementId> {
        self.evaluate(Trigger::GestureMove, None)
    }

    fn evaluate(&mut self, trigger: Trigger, win: Option<WinFacts>) -> Vec<AchievementId> {
        let mut unlocked = Vec::new();
        for id in AchievementId::iter().filter(|id| id.trigger() == trigger) {
            if self.store.has(id) || !self.predicate(id, win) {
                continue;
            }
            if self.store.unlock(id) {
                unlocked.push(id);
            }
        }
        unlocked
    }

    fn predicate(&self, id: AchievementId, win: Option<WinFacts>) -> bool {
        let stats = &self.stats;
        match (id, win) {
            (AchievementId::FirstWin, Some(_)) => stats.games_played >= 1,
            (AchievementId::SpeedDemon, Some(win)) => {
                win.disk_count == GameConfig::SPEED_DEMON_DISKS
                    && win.elapsed_ms < GameConfig::SPEED_DEMON_LIMIT_MS
            }
            (AchievementId::EfficiencyMaster, Some(win)) => {
                u64::from(win.moves) == min_moves(win.disk_count)
            }
            (AchievementId::Persistent, Some(_)) => {
                stats.games_played >= GameConfig::PERSISTENT_GAMES
            }
            (AchievementId::TowerMaster, Some(win)) => {
                win.disk_count == GameConfig::TOWER_MASTER_DISKS
            }
            (AchievementId::MultiplayerChamp, Some(win)) => win.mode == GameMode::Multiplayer,
            (AchievementId::UndoMaster, _) => stats.undo_count >= GameConfig::UNDO_MASTER_UNDOS,
            (AchievementId::ThemeExplorer, _) => {
                stats.themes_used.len() >= GameConfig::THEME_EXPLORER_THEMES
            }
            (AchievementId::SaveMaster, _) | (AchievementId::GestureGuru, _) => true,
            (_, None) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::action::{Env, MoveAction};
    use crate::engine::GameEngine;
    use crate::solver::generate_solution;
    use crate::state::TowerId;

    fn evaluator() -> ProgressEvaluator<BTreeSet<AchievementId>> {
        ProgressEvaluator::new(BTreeSet::new(), CumulativeStats::default())
    }

    fn solved(disk_count: u8, mode: GameMode, extra_moves: bool, at: u64) -> GameState {
        let mut state = GameState::new(disk_count, mode).unwrap();
        let mut engine = GameEngine::new(&mut state);
        if extra_moves {
            // A -> B -> A wastes two moves.
            for (from, to) in [(TowerId::A, TowerId::B), (TowerId::B, TowerId::A)] {
                engine
                    .execute(Env::at(Timestamp(0)), &MoveAction::new(from, to).into())
                    .unwrap();
            }
        }
        for step in generate_solution(disk_count, TowerId::A, TowerId::C, TowerId::B) {
            engine
                .execute(
                    Env::at(Timestamp(at)),
                    &MoveAction::new(step.from, step.to).into(),
                )
                .unwrap();
        }
        state
    }

    #[test]
    fn efficiency_master_unlocks_only_on_optimal_win_and_only_once() {
        let mut progress = evaluator();

        let sloppy = solved(4, GameMode::Single, true, 60_000);
        let unlocked = progress.on_win(&sloppy, Timestamp(60_000));
        assert!(!unlocked.contains(&AchievementId::EfficiencyMaster));
        assert!(unlocked.contains(&AchievementId::FirstWin));

        let optimal = solved(4, GameMode::Single, false, 60_000);
        let unlocked = progress.on_win(&optimal, Timestamp(60_000));
        assert_eq!(unlocked, vec![AchievementId::EfficiencyMaster]);

        let again = progress.on_win(&optimal, Timestamp(60_000));
        assert!(again.is_empty());
        assert_eq!(progress.stats().games_played, 3);
    }

    #[test]
    fn fast_three_disk_win_is_a_speed_demon() {
        let mut progress = evaluator();
        // First move at t=0 starts the clock; the rest land at 20s.
        let state = solved(3, GameMode::Single, true, 20_000);
        let unlocked = progress.on_win(&state, Timestamp(25_000));
        assert!(unlocked.contains(&AchievementId::SpeedDemon));
    }

    #[test]
    fn multiplayer_and_tower_master_wins() {
        let mut progress = evaluator();
        let state = solved(8, GameMode::Multiplayer, false, 100_000);
        let unlocked = progress.on_win(&state, Timestamp(100_000));
        assert!(unlocked.contains(&AchievementId::TowerMaster));
        assert!(unlocked.contains(&AchievementId::MultiplayerChamp));
        assert!(!unlocked.contains(&AchievementId::SpeedDemon));
    }

    #[test]
    fn persistent_after_five_wins() {
        let mut progress = evaluator();
        let state = solved(1, GameMode::Single, false, 0);
        for _ in 0..4 {
            assert!(!progress
                .on_win(&state, Timestamp(0))
                .contains(&AchievementId::Persistent));
        }
        assert!(progress
            .on_win(&state, Timestamp(0))
            .contains(&AchievementId::Persistent));
    }

    #[test]
    fn undo_master_after_ten_undos() {
        let mut progress = evaluator();
        for _ in 0..9 {
            assert!(progress.on_undo().is_empty());
        }
        assert_eq!(progress.on_undo(), vec![AchievementId::UndoMaster]);
        assert!(progress.on_undo().is_empty());
        assert_eq!(progress.stats().undo_count, 11);
    }

    #[test]
    fn theme_explorer_counts_distinct_trimmed_names() {
        let mut progress = evaluator();
        for theme in ["dark", " dark ", "ocean", "forest", "   ", "sunset"] {
            assert!(progress.on_theme(theme).is_empty());
        }
        assert_eq!(progress.stats().themes_used.len(), 4);
        assert_eq!(progress.on_theme("neon"), vec![AchievementId::ThemeExplorer]);
    }

    #[test]
    fn one_shot_achievements() {
        let mut progress = evaluator();
        assert_eq!(progress.on_save_cycle(), vec![AchievementId::SaveMaster]);
        assert!(progress.on_save_cycle().is_empty());
        assert_eq!(progress.on_gesture_move(), vec![AchievementId::GestureGuru]);
        assert!(progress.on_gesture_move().is_empty());
    }
}
