//! Repository contracts for the data that outlives a single session.

use std::collections::BTreeSet;

use hanoi_core::{AchievementId, CumulativeStats, SaveSlot};

use super::error::Result;

/// Persisted set of unlocked achievements.
///
/// The set only ever grows; callers save the complete set after each unlock.
pub trait AchievementRepository: Send + Sync {
    /// Loads the unlocked set. A store that was never written is empty.
    fn load(&self) -> Result<BTreeSet<AchievementId>>;

    fn save(&self, unlocked: &BTreeSet<AchievementId>) -> Result<()>;
}

/// Ordered list of named save slots.
///
/// The repository exclusively owns its slots; every read hands out a copy.
pub trait SaveSlotRepository: Send + Sync {
    /// Readable slots with their indices, oldest first.
    ///
    /// A slot that cannot be handed out is skipped, so indices may have gaps.
    fn list(&self) -> Result<Vec<(usize, SaveSlot)>>;

    /// Appends `slot` and returns its index.
    fn push(&self, slot: &SaveSlot) -> Result<usize>;

    /// Removes and returns the slot at `index`, or `None` if it does not exist.
    fn remove(&self, index: usize) -> Result<Option<SaveSlot>>;

    fn get(&self, index: usize) -> Result<Option<SaveSlot>>;

    /// Number of stored entries, readable or not.
    fn len(&self) -> Result<usize>;
}

/// Lifetime counters feeding achievement predicates.
pub trait StatsRepository: Send + Sync {
    /// Loads the counters. A store that was never written yields defaults.
    fn load(&self) -> Result<CumulativeStats>;

    fn save(&self, stats: &CumulativeStats) -> Result<()>;
}
