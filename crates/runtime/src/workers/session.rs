//! Session worker that owns the authoritative [`GameSession`].
//!
//! Receives commands from [`crate::RuntimeHandle`], runs them against the
//! session, and publishes the drained events to the [`EventBus`]. While an
//! auto-solve is active the worker also applies one solver move per
//! `auto_solve_delay`, interleaved with incoming commands.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info};

use hanoi_core::{
    AchievementId, CumulativeStats, Disk, GameMode, MoveRecord, MoveSource, SaveSlot,
    SelectOutcome, TowerId,
};

use crate::events::EventBus;
use crate::session::{
    GameSession, Intent, IntentOutcome, MoveOutcome, ReplayStep, Result, SessionSnapshot,
};

type Reply<T> = oneshot::Sender<Result<T>>;

/// Commands that can be sent to the session worker
pub enum Command {
    SelectDisk {
        tower: TowerId,
        disk: Disk,
        reply: Reply<SelectOutcome>,
    },
    AttemptMove {
        target: TowerId,
        source: MoveSource,
        reply: Reply<MoveOutcome>,
    },
    Undo {
        reply: Reply<MoveRecord>,
    },
    NewGame {
        disk_count: u8,
        reply: Reply<()>,
    },
    ResetGame {
        reply: oneshot::Sender<()>,
    },
    SetMode {
        mode: GameMode,
        reply: Reply<()>,
    },
    StartAutoSolve {
        reply: Reply<usize>,
    },
    /// Applies one solver move immediately, ahead of the paced schedule.
    StepAutoSolve {
        reply: Reply<ReplayStep>,
    },
    CancelAutoSolve {
        reply: oneshot::Sender<bool>,
    },
    SaveSession {
        name: String,
        reply: Reply<SaveSlot>,
    },
    LoadSession {
        slot: Box<SaveSlot>,
        reply: Reply<()>,
    },
    LoadSaved {
        index: usize,
        reply: Reply<String>,
    },
    ListSaves {
        reply: Reply<Vec<(usize, SaveSlot)>>,
    },
    DeleteSave {
        index: usize,
        reply: Reply<SaveSlot>,
    },
    ApplyTheme {
        name: String,
        reply: Reply<()>,
    },
    /// Serialized intent routed through [`GameSession::dispatch`].
    Dispatch {
        intent: Intent,
        reply: Reply<IntentOutcome>,
    },
    QuerySnapshot {
        reply: oneshot::Sender<SessionSnapshot>,
    },
    QueryAchievements {
        reply: oneshot::Sender<Vec<AchievementId>>,
    },
    QueryStats {
        reply: oneshot::Sender<CumulativeStats>,
    },
}

/// Background task that processes session commands and paces replay.
pub struct SessionWorker {
    session: GameSession,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    auto_solve_delay: Duration,
    /// Deadline of the next paced solver move while a replay is active.
    next_step: Option<Instant>,
}

impl SessionWorker {
    pub fn new(
        session: GameSession,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
        auto_solve_delay: Duration,
    ) -> Self {
        info!(
            disk_count = session.state().disk_count(),
            mode = %session.state().mode(),
            delay_ms = auto_solve_delay.as_millis() as u64,
            "SessionWorker initialized"
        );

        Self {
            session,
            command_rx,
            event_bus,
            auto_solve_delay,
            next_step: None,
        }
    }

    /// Main worker loop. Ends once every handle has been dropped.
    pub async fn run(mut self) {
        loop {
            let deadline = self.next_step;
            let stepped = tokio::select! {
                command = self.command_rx.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.paced_step();
                    true
                }
            };

            self.publish_events();
            self.reschedule(stepped);
        }
        info!("SessionWorker stopped");
    }

    /// Runs one command and reports whether it advanced the replay.
    fn handle_command(&mut self, command: Command) -> bool {
        let session = &mut self.session;
        match command {
            Command::SelectDisk { tower, disk, reply } => {
                send(reply, session.select_disk(tower, disk), "SelectDisk");
            }
            Command::AttemptMove {
                target,
                source,
                reply,
            } => {
                send(reply, session.attempt_move_via(target, source), "AttemptMove");
            }
            Command::Undo { reply } => send(reply, session.undo(), "Undo"),
            Command::NewGame { disk_count, reply } => {
                send(reply, session.new_game(disk_count), "NewGame");
            }
            Command::ResetGame { reply } => {
                session.reset_game();
                send(reply, (), "ResetGame");
            }
            Command::SetMode { mode, reply } => send(reply, session.set_mode(mode), "SetMode"),
            Command::StartAutoSolve { reply } => {
                send(reply, session.start_auto_solve(), "StartAutoSolve");
            }
            Command::StepAutoSolve { reply } => {
                send(reply, session.step_auto_solve(), "StepAutoSolve");
                return true;
            }
            Command::CancelAutoSolve { reply } => {
                send(reply, session.cancel_auto_solve(), "CancelAutoSolve");
            }
            Command::SaveSession { name, reply } => {
                send(reply, session.save_session(&name), "SaveSession");
            }
            Command::LoadSession { slot, reply } => {
                send(reply, session.load_session(&slot), "LoadSession");
            }
            Command::LoadSaved { index, reply } => {
                send(reply, session.load_saved(index), "LoadSaved");
            }
            Command::ListSaves { reply } => send(reply, session.list_saves(), "ListSaves"),
            Command::DeleteSave { index, reply } => {
                send(reply, session.delete_save(index), "DeleteSave");
            }
            Command::ApplyTheme { name, reply } => {
                send(reply, session.apply_theme(&name), "ApplyTheme");
            }
            Command::Dispatch { intent, reply } => {
                let stepped = matches!(intent, Intent::StepAutoSolve);
                send(reply, session.dispatch(intent), "Dispatch");
                return stepped;
            }
            Command::QuerySnapshot { reply } => send(reply, session.snapshot(), "QuerySnapshot"),
            Command::QueryAchievements { reply } => {
                send(reply, session.achievements(), "QueryAchievements");
            }
            Command::QueryStats { reply } => {
                send(reply, session.stats().clone(), "QueryStats");
            }
        }
        false
    }

    fn paced_step(&mut self) {
        // Failures already end the replay inside the session.
        if let Ok(ReplayStep::Applied { outcome, remaining }) = self.session.step_auto_solve() {
            debug!(
                from = %outcome.record.from,
                to = %outcome.record.to,
                remaining,
                "Auto-solve step"
            );
        }
    }

    /// Keeps the replay deadline in sync with the session: the first step
    /// fires immediately, later ones every `auto_solve_delay`.
    fn reschedule(&mut self, stepped: bool) {
        self.next_step = match (self.session.is_auto_solving(), self.next_step) {
            (false, _) => None,
            (true, None) => Some(Instant::now()),
            (true, Some(_)) if stepped => Some(Instant::now() + self.auto_solve_delay),
            (true, pending) => pending,
        };
    }

    fn publish_events(&mut self) {
        for event in self.session.take_events() {
            self.event_bus.publish(event);
        }
    }
}

fn send<T>(reply: oneshot::Sender<T>, value: T, command: &'static str) {
    if reply.send(value).is_err() {
        debug!(command, "Reply channel closed (caller dropped)");
    }
}
