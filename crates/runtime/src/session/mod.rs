//! Synchronous puzzle session: the Intent and Observation API.
//!
//! [`GameSession`] owns one [`GameState`] and routes every intent through
//! [`GameEngine`], then feeds the result to the [`ProgressEvaluator`].
//! Auto-solve is a queued [`SolutionPlan`] advanced one move per
//! [`GameSession::step_auto_solve`] call; pacing belongs to whoever calls it.
//!
//! Events are collected in an outbox and drained with
//! [`GameSession::take_events`], so the session itself never blocks or
//! touches a channel.

mod error;
mod intent;
mod snapshot;

pub use error::SessionError;
pub use intent::{Intent, IntentOutcome, MoveOutcome, ReplayStep};
pub use snapshot::SessionSnapshot;

use std::sync::Arc;

use tracing::{debug, info, warn};

use hanoi_core::{
    AchievementId, CumulativeStats, Disk, Env, ExecuteError, GameConfig, GameEngine, GameMode,
    GameState, MoveAction, MoveRecord, MoveResult, MoveSource, PlayerId, ProgressEvaluator,
    SaveSlot, SelectAction, SelectOutcome, SolutionPlan, Timestamp, TowerId, UndoAction,
    WinSummary, efficiency_percent, min_moves, score_state,
};

use crate::clock::Clock;
use crate::events::{Event, GameEvent, ProgressEvent};
use crate::repository::{AchievementLedger, SaveSlotRepository, SessionStores, StatsRepository};

pub type Result<T> = std::result::Result<T, SessionError>;

pub struct GameSession {
    state: GameState,
    /// Present while auto-solve is running.
    plan: Option<SolutionPlan>,
    progress: ProgressEvaluator<AchievementLedger>,
    saves: Arc<dyn SaveSlotRepository>,
    stats_repo: Arc<dyn StatsRepository>,
    clock: Arc<dyn Clock>,
    outbox: Vec<Event>,
}

impl GameSession {
    /// Opens a session on a fresh board, loading achievements and lifetime
    /// counters from `stores`.
    pub fn new(
        config: &GameConfig,
        mode: GameMode,
        stores: SessionStores,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let state = GameState::with_config(config, mode)?;
        let ledger = AchievementLedger::open(stores.achievements)?;
        let stats = stores.stats.load()?;

        info!(
            disk_count = config.disk_count,
            %mode,
            games_played = stats.games_played,
            "Session opened"
        );

        Ok(Self {
            state,
            plan: None,
            progress: ProgressEvaluator::new(ledger, stats),
            saves: stores.saves,
            stats_repo: stores.stats,
            clock,
            outbox: Vec::new(),
        })
    }

    // ===== observation =====

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn is_auto_solving(&self) -> bool {
        self.plan.is_some()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let now = self.clock.now();
        let state = &self.state;
        let auto_solving = self.is_auto_solving();

        SessionSnapshot {
            disk_count: state.disk_count(),
            towers: state.board().to_raw(),
            selection: state.selection(),
            move_count: state.move_count(),
            min_moves: min_moves(state.disk_count()),
            elapsed_ms: state.elapsed_ms(now),
            efficiency: efficiency_percent(state.disk_count(), state.move_count()),
            players: *state.players(),
            history_len: state.history().len(),
            can_undo: state.can_undo() && !auto_solving,
            status: state.status(),
            mode: state.mode(),
            current_player: state.current_player(),
            auto_solving,
            auto_solve_remaining: self.plan.as_ref().map_or(0, SolutionPlan::remaining),
        }
    }

    pub fn achievements(&self) -> Vec<AchievementId> {
        self.progress.unlocked()
    }

    pub fn stats(&self) -> &CumulativeStats {
        self.progress.stats()
    }

    /// Drains the events produced since the last call, oldest first.
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.outbox)
    }

    // ===== intents =====

    /// Routes a serialized intent to the matching operation.
    pub fn dispatch(&mut self, intent: Intent) -> Result<IntentOutcome> {
        match intent {
            Intent::SelectDisk { tower, disk } => {
                self.select_disk(tower, disk).map(IntentOutcome::Selected)
            }
            Intent::AttemptMove { target, source } => self
                .attempt_move_via(target, source)
                .map(IntentOutcome::Moved),
            Intent::Undo => self.undo().map(IntentOutcome::Undone),
            Intent::NewGame { disk_count } => {
                self.new_game(disk_count).map(|_| IntentOutcome::Reset)
            }
            Intent::ResetGame => {
                self.reset_game();
                Ok(IntentOutcome::Reset)
            }
            Intent::SetMode(mode) => self.set_mode(mode).map(|_| IntentOutcome::Reset),
            Intent::StartAutoSolve => self
                .start_auto_solve()
                .map(|total| IntentOutcome::AutoSolveStarted { total }),
            Intent::StepAutoSolve => self.step_auto_solve().map(IntentOutcome::AutoSolveStepped),
            Intent::CancelAutoSolve => Ok(IntentOutcome::AutoSolveCancelled(
                self.cancel_auto_solve(),
            )),
            Intent::SaveSession { name } => {
                let (index, slot) = self.store_slot(&name)?;
                Ok(IntentOutcome::Saved {
                    index,
                    slot: Box::new(slot),
                })
            }
            Intent::LoadSession(slot) => {
                self.load_session(&slot)?;
                Ok(IntentOutcome::Loaded { name: slot.name })
            }
            Intent::LoadSaved { index } => {
                let name = self.load_saved(index)?;
                Ok(IntentOutcome::Loaded { name })
            }
            Intent::ListSaves => self.list_saves().map(IntentOutcome::Saves),
            Intent::DeleteSave { index } => self
                .delete_save(index)
                .map(|slot| IntentOutcome::SaveDeleted(Box::new(slot))),
            Intent::ApplyTheme { name } => {
                self.apply_theme(&name)?;
                Ok(IntentOutcome::ThemeApplied {
                    name: name.trim().to_owned(),
                })
            }
        }
    }

    /// Picks up the top disk of `tower`, or puts it back if already selected.
    pub fn select_disk(&mut self, tower: TowerId, disk: Disk) -> Result<SelectOutcome> {
        self.ensure_idle()?;

        let env = self.env();
        let outcome = GameEngine::new(&mut self.state)
            .run(env, &SelectAction::new(tower, disk))
            .map_err(ExecuteError::Select)?;

        self.emit(GameEvent::DiskSelected {
            selection: self.state.selection(),
        });
        Ok(outcome)
    }

    /// Moves the selected disk onto `target`.
    pub fn attempt_move(&mut self, target: TowerId) -> Result<MoveOutcome> {
        self.attempt_move_via(target, MoveSource::Manual)
    }

    /// Moves the selected disk onto `target`, recording where the request
    /// came from. An illegal target publishes `InvalidMove` and keeps the
    /// selection.
    pub fn attempt_move_via(&mut self, target: TowerId, source: MoveSource) -> Result<MoveOutcome> {
        self.ensure_idle()?;
        let selection = self.state.selection().ok_or(SessionError::NoSelection)?;

        let action = MoveAction::new(selection.tower, target)
            .with_source(source)
            .expecting(selection.disk);

        match self.execute_move(action) {
            Ok(outcome) => Ok(outcome),
            Err(error) => {
                if error.is_illegal_move() {
                    debug!(from = %selection.tower, to = %target, %error, "Move rejected");
                } else {
                    warn!(from = %selection.tower, to = %target, %error, "Move refused");
                }
                self.emit(GameEvent::InvalidMove {
                    from: selection.tower,
                    to: target,
                    reason: error.to_string(),
                });
                Err(error)
            }
        }
    }

    /// Reverses the latest move.
    pub fn undo(&mut self) -> Result<MoveRecord> {
        self.ensure_idle()?;

        let env = self.env();
        let record = GameEngine::new(&mut self.state)
            .run(env, &UndoAction)
            .map_err(ExecuteError::Undo)?;

        self.refresh_score(record.player);
        let unlocked = self.progress.on_undo();
        self.persist_stats();
        self.emit(GameEvent::MoveUndone {
            record,
            move_count: self.state.move_count(),
        });
        self.emit_unlocks(unlocked);

        debug!(from = %record.from, to = %record.to, disk = %record.disk, "Move undone");
        Ok(record)
    }

    /// Replaces the board with `disk_count` disks on tower A, keeping the mode.
    pub fn new_game(&mut self, disk_count: u8) -> Result<()> {
        self.ensure_idle()?;
        self.replace_board(disk_count, self.state.mode())
    }

    /// Hard reset: stops any auto-solve and restarts with the current disk
    /// count and mode. Always allowed.
    pub fn reset_game(&mut self) {
        self.cancel_auto_solve();
        let (disk_count, mode) = (self.state.disk_count(), self.state.mode());
        // The current disk count already passed validation.
        if let Err(error) = self.replace_board(disk_count, mode) {
            warn!(%error, "Reset failed");
        }
    }

    /// Switches single/multiplayer and starts a new game.
    pub fn set_mode(&mut self, mode: GameMode) -> Result<()> {
        self.ensure_idle()?;
        self.replace_board(self.state.disk_count(), mode)
    }

    /// Plans an optimal solution from the current position and arms the
    /// replay. Returns the number of queued moves.
    pub fn start_auto_solve(&mut self) -> Result<usize> {
        self.ensure_idle()?;
        if self.state.is_completed() {
            return Err(SessionError::GameCompleted);
        }

        self.state.clear_selection();
        let plan = SolutionPlan::for_board(self.state.board());
        let total = plan.total();
        self.plan = Some(plan);

        info!(total, disk_count = self.state.disk_count(), "Auto-solve started");
        self.emit(GameEvent::AutoSolveStarted { total });
        Ok(total)
    }

    /// Applies the next queued solver move through the regular move path.
    ///
    /// The replay ends on a win, on plan exhaustion, or on an executor error;
    /// in every case the replay flag is cleared.
    pub fn step_auto_solve(&mut self) -> Result<ReplayStep> {
        let Some(plan) = self.plan.as_mut() else {
            return Err(SessionError::ReplayInactive);
        };

        let Some(step) = plan.next() else {
            let won = self.state.is_completed();
            self.finish_auto_solve(won);
            return Ok(ReplayStep::Finished { won });
        };
        let remaining = plan.remaining();

        let action = MoveAction::new(step.from, step.to).with_source(MoveSource::Solver);
        match self.execute_move(action) {
            Ok(outcome) => {
                if outcome.won() || remaining == 0 {
                    self.finish_auto_solve(outcome.won());
                }
                Ok(ReplayStep::Applied { outcome, remaining })
            }
            Err(error) => {
                warn!(%error, from = %step.from, to = %step.to, "Auto-solve step failed");
                self.finish_auto_solve(false);
                Err(error)
            }
        }
    }

    /// Stops a running replay. Returns `false` if none was running.
    pub fn cancel_auto_solve(&mut self) -> bool {
        if self.plan.is_none() {
            return false;
        }
        info!("Auto-solve cancelled");
        self.finish_auto_solve(false);
        true
    }

    /// Stores a named snapshot of the live session. Allowed during auto-solve.
    pub fn save_session(&mut self, name: &str) -> Result<SaveSlot> {
        self.store_slot(name).map(|(_, slot)| slot)
    }

    fn store_slot(&mut self, name: &str) -> Result<(usize, SaveSlot)> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::MissingSaveName);
        }

        let slot = SaveSlot::capture(name, &self.state, self.clock.now());
        let index = self.saves.push(&slot)?;

        info!(name, index, moves = slot.move_count(), "Session saved");
        self.emit(GameEvent::SessionSaved {
            name: name.to_owned(),
            index,
        });
        let unlocked = self.progress.on_save_cycle();
        self.emit_unlocks(unlocked);
        Ok((index, slot))
    }

    /// Replaces the live session with a validated copy of `slot`.
    ///
    /// A slot that fails validation leaves the current session untouched.
    pub fn load_session(&mut self, slot: &SaveSlot) -> Result<()> {
        self.ensure_idle()?;

        let restored = slot.restore().inspect_err(|error| {
            warn!(name = %slot.name, %error, "Rejected save slot");
        })?;
        self.state = restored;

        info!(name = %slot.name, moves = self.state.move_count(), "Session loaded");
        self.emit(GameEvent::SessionLoaded {
            name: slot.name.clone(),
            move_count: self.state.move_count(),
        });
        let unlocked = self.progress.on_save_cycle();
        self.emit_unlocks(unlocked);
        Ok(())
    }

    /// Loads the stored slot at `index` and returns its name.
    pub fn load_saved(&mut self, index: usize) -> Result<String> {
        self.ensure_idle()?;
        let slot = self
            .saves
            .get(index)?
            .ok_or(SessionError::SlotNotFound { index })?;
        self.load_session(&slot)?;
        Ok(slot.name)
    }

    /// Readable slots paired with the index `load_saved` and `delete_save`
    /// expect.
    pub fn list_saves(&self) -> Result<Vec<(usize, SaveSlot)>> {
        Ok(self.saves.list()?)
    }

    pub fn delete_save(&mut self, index: usize) -> Result<SaveSlot> {
        let slot = self
            .saves
            .remove(index)?
            .ok_or(SessionError::SlotNotFound { index })?;
        info!(name = %slot.name, index, "Save slot deleted");
        Ok(slot)
    }

    /// Records that the UI applied a theme. Allowed during auto-solve.
    pub fn apply_theme(&mut self, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(SessionError::MissingThemeName);
        }
        let unlocked = self.progress.on_theme(name);
        self.persist_stats();
        self.emit_unlocks(unlocked);
        Ok(())
    }

    // ===== internals =====

    fn ensure_idle(&self) -> Result<()> {
        if self.plan.is_some() {
            return Err(SessionError::ReplayActive);
        }
        Ok(())
    }

    fn env(&self) -> Env {
        Env::at(self.clock.now())
    }

    /// Shared path for human, gesture and solver moves.
    fn execute_move(&mut self, action: MoveAction) -> Result<MoveOutcome> {
        let env = self.env();
        let MoveResult { record, won } = GameEngine::new(&mut self.state)
            .run(env, &action)
            .map_err(ExecuteError::Move)?;

        self.refresh_score(record.player);
        debug!(
            from = %record.from,
            to = %record.to,
            disk = %record.disk,
            player = %record.player,
            source = ?action.source,
            "Move applied"
        );
        self.emit(GameEvent::MoveApplied {
            record,
            source: action.source,
            move_count: self.state.move_count(),
        });

        if action.source == MoveSource::Gesture {
            let unlocked = self.progress.on_gesture_move();
            self.emit_unlocks(unlocked);
        }

        let summary = won.then(|| self.finish_game(env.now));
        Ok(MoveOutcome {
            record,
            source: action.source,
            summary,
        })
    }

    fn finish_game(&mut self, now: Timestamp) -> WinSummary {
        let summary = WinSummary::from_state(&self.state, now);
        let unlocked = self.progress.on_win(&self.state, now);
        self.persist_stats();

        info!(
            winner = %summary.winner,
            moves = summary.moves,
            elapsed_ms = summary.elapsed_ms,
            score = summary.score,
            "Puzzle solved"
        );
        self.outbox
            .push(Event::Progress(ProgressEvent::GameWon(summary)));
        self.emit_unlocks(unlocked);
        summary
    }

    fn finish_auto_solve(&mut self, won: bool) {
        self.plan = None;
        self.emit(GameEvent::AutoSolveFinished { won });
    }

    fn replace_board(&mut self, disk_count: u8, mode: GameMode) -> Result<()> {
        self.state = GameState::new(disk_count, mode)?;
        info!(disk_count, %mode, "New game");
        self.emit(GameEvent::GameReset { disk_count, mode });
        Ok(())
    }

    fn refresh_score(&mut self, player: PlayerId) {
        let score = score_state(&self.state, self.clock.now());
        self.state.set_score(player, score);
    }

    fn persist_stats(&self) {
        if let Err(error) = self.stats_repo.save(self.progress.stats()) {
            warn!(%error, "Failed to persist statistics");
        }
    }

    fn emit(&mut self, event: GameEvent) {
        self.outbox.push(Event::Game(event));
    }

    fn emit_unlocks(&mut self, unlocked: Vec<AchievementId>) {
        for id in unlocked {
            info!(achievement = %id, "Achievement unlocked");
            self.outbox
                .push(Event::Progress(ProgressEvent::AchievementUnlocked(id)));
        }
    }
}

#[cfg(test)]
mod tests;
