//! Runtime orchestration for the Towers of Hanoi engine.
//!
//! This crate wraps the pure `hanoi-core` engine in a [`GameSession`] that
//! speaks intents and observations, persists progress through repositories,
//! and runs inside a tokio worker. Consumers embed [`Runtime`] and interact
//! with the puzzle through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`session`] is the synchronous Intent/Observation API
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`repository`] and [`clock`] provide adapters for storage and time
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod clock;
pub mod events;
pub mod repository;
pub mod runtime;
pub mod session;

mod utils;
mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle};
pub use clock::{Clock, ManualClock, SystemClock, format_timestamp};
pub use events::{Event, EventBus, GameEvent, ProgressEvent, Topic};
pub use repository::{
    AchievementLedger, AchievementRepository, FileAchievementRepository, FileSaveRepository,
    FileStatsRepository, InMemoryAchievementRepo, InMemorySaveRepo, InMemoryStatsRepo,
    RepositoryError, SaveSlotRepository, SessionStores, StatsRepository,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use session::{
    GameSession, Intent, IntentOutcome, MoveOutcome, ReplayStep, SessionError, SessionSnapshot,
};
