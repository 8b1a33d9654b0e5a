//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! every session intent, the observation queries, and topic subscriptions.
use std::collections::HashMap;

use tokio::sync::{broadcast, mpsc, oneshot};

use hanoi_core::{
    AchievementId, CumulativeStats, Disk, GameMode, MoveRecord, MoveSource, SaveSlot,
    SelectOutcome, TowerId,
};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::session::{Intent, IntentOutcome, MoveOutcome, ReplayStep, SessionSnapshot};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    pub async fn select_disk(&self, tower: TowerId, disk: Disk) -> Result<SelectOutcome> {
        Ok(self
            .request(|reply| Command::SelectDisk { tower, disk, reply })
            .await??)
    }

    pub async fn attempt_move(&self, target: TowerId) -> Result<MoveOutcome> {
        self.attempt_move_via(target, MoveSource::Manual).await
    }

    /// Move the selected disk, tagging the request with its input source.
    pub async fn attempt_move_via(&self, target: TowerId, source: MoveSource) -> Result<MoveOutcome> {
        Ok(self
            .request(|reply| Command::AttemptMove {
                target,
                source,
                reply,
            })
            .await??)
    }

    pub async fn undo(&self) -> Result<MoveRecord> {
        Ok(self.request(|reply| Command::Undo { reply }).await??)
    }

    pub async fn new_game(&self, disk_count: u8) -> Result<()> {
        Ok(self
            .request(|reply| Command::NewGame { disk_count, reply })
            .await??)
    }

    /// Hard reset. Also stops a running auto-solve.
    pub async fn reset_game(&self) -> Result<()> {
        self.request(|reply| Command::ResetGame { reply }).await
    }

    pub async fn set_mode(&self, mode: GameMode) -> Result<()> {
        Ok(self.request(|reply| Command::SetMode { mode, reply }).await??)
    }

    /// Start a paced auto-solve. The worker applies the first move right
    /// away and one more every `auto_solve_delay`.
    pub async fn start_auto_solve(&self) -> Result<usize> {
        Ok(self
            .request(|reply| Command::StartAutoSolve { reply })
            .await??)
    }

    /// Apply the next solver move now instead of waiting for the pacer.
    pub async fn step_auto_solve(&self) -> Result<ReplayStep> {
        Ok(self
            .request(|reply| Command::StepAutoSolve { reply })
            .await??)
    }

    pub async fn cancel_auto_solve(&self) -> Result<bool> {
        self.request(|reply| Command::CancelAutoSolve { reply })
            .await
    }

    pub async fn save_session(&self, name: impl Into<String>) -> Result<SaveSlot> {
        let name = name.into();
        Ok(self
            .request(|reply| Command::SaveSession { name, reply })
            .await??)
    }

    pub async fn load_session(&self, slot: SaveSlot) -> Result<()> {
        Ok(self
            .request(|reply| Command::LoadSession {
                slot: Box::new(slot),
                reply,
            })
            .await??)
    }

    /// Load the stored slot at `index`, returning its name.
    pub async fn load_saved(&self, index: usize) -> Result<String> {
        Ok(self
            .request(|reply| Command::LoadSaved { index, reply })
            .await??)
    }

    pub async fn list_saves(&self) -> Result<Vec<(usize, SaveSlot)>> {
        Ok(self.request(|reply| Command::ListSaves { reply }).await??)
    }

    pub async fn delete_save(&self, index: usize) -> Result<SaveSlot> {
        Ok(self
            .request(|reply| Command::DeleteSave { index, reply })
            .await??)
    }

    pub async fn apply_theme(&self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        Ok(self
            .request(|reply| Command::ApplyTheme { name, reply })
            .await??)
    }

    /// Route a serialized intent to the session.
    pub async fn dispatch(&self, intent: Intent) -> Result<IntentOutcome> {
        Ok(self
            .request(|reply| Command::Dispatch { intent, reply })
            .await??)
    }

    /// Query the current session (read-only snapshot)
    pub async fn snapshot(&self) -> Result<SessionSnapshot> {
        self.request(|reply| Command::QuerySnapshot { reply }).await
    }

    pub async fn achievements(&self) -> Result<Vec<AchievementId>> {
        self.request(|reply| Command::QueryAchievements { reply })
            .await
    }

    pub async fn stats(&self) -> Result<CumulativeStats> {
        self.request(|reply| Command::QueryStats { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Game` - Selection, moves, undo, resets, saves and replay
    /// - `Topic::Progress` - Achievement unlocks and win summaries
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use hanoi_runtime::Topic;
    ///
    /// let mut progress_rx = handle.subscribe(Topic::Progress);
    /// while let Ok(event) = progress_rx.recv().await {
    ///     // Show unlocks
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    ///
    /// Returns a map of topic to receiver for each requested topic.
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }
}
