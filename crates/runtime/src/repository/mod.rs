//! Repository layer for data that outlives a session.
//!
//! Repositories hold the unlocked achievements, the named save slots and the
//! lifetime counters. The session reads and writes through these traits and
//! never keeps references into stored data.

mod error;
mod file;
mod ledger;
mod memory;
mod traits;

use std::path::Path;
use std::sync::Arc;

pub use error::{RepositoryError, Result};
pub use file::{FileAchievementRepository, FileSaveRepository, FileStatsRepository};
pub use ledger::AchievementLedger;
pub use memory::{InMemoryAchievementRepo, InMemorySaveRepo, InMemoryStatsRepo};
pub use traits::{AchievementRepository, SaveSlotRepository, StatsRepository};

/// The three stores a session needs, shareable across tasks.
#[derive(Clone)]
pub struct SessionStores {
    pub achievements: Arc<dyn AchievementRepository>,
    pub saves: Arc<dyn SaveSlotRepository>,
    pub stats: Arc<dyn StatsRepository>,
}

impl SessionStores {
    pub fn in_memory() -> Self {
        Self {
            achievements: Arc::new(InMemoryAchievementRepo::new()),
            saves: Arc::new(InMemorySaveRepo::new()),
            stats: Arc::new(InMemoryStatsRepo::new()),
        }
    }

    /// JSON files under `base_dir`, created on first write.
    pub fn file(base_dir: impl AsRef<Path>) -> Self {
        let base_dir = base_dir.as_ref();
        Self {
            achievements: Arc::new(FileAchievementRepository::new(base_dir)),
            saves: Arc::new(FileSaveRepository::new(base_dir)),
            stats: Arc::new(FileStatsRepository::new(base_dir)),
        }
    }
}

impl Default for SessionStores {
    fn default() -> Self {
        Self::in_memory()
    }
}
