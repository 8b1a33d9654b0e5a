//! In-memory repository implementations for tests and throwaway sessions.

use std::collections::BTreeSet;
use std::sync::RwLock;

use hanoi_core::{AchievementId, CumulativeStats, SaveSlot};

use crate::repository::{
    AchievementRepository, RepositoryError, Result, SaveSlotRepository, StatsRepository,
};

#[derive(Default)]
pub struct InMemoryAchievementRepo {
    unlocked: RwLock<BTreeSet<AchievementId>>,
}

impl InMemoryAchievementRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AchievementRepository for InMemoryAchievementRepo {
    fn load(&self) -> Result<BTreeSet<AchievementId>> {
        let unlocked = self
            .unlocked
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(unlocked.clone())
    }

    fn save(&self, unlocked: &BTreeSet<AchievementId>) -> Result<()> {
        let mut stored = self
            .unlocked
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        *stored = unlocked.clone();
        Ok(())
    }
}

/// In-memory implementation of [`SaveSlotRepository`].
#[derive(Default)]
pub struct InMemorySaveRepo {
    slots: RwLock<Vec<SaveSlot>>,
}

impl InMemorySaveRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SaveSlotRepository for InMemorySaveRepo {
    fn list(&self) -> Result<Vec<(usize, SaveSlot)>> {
        let slots = self.slots.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(slots.iter().cloned().enumerate().collect())
    }

    fn push(&self, slot: &SaveSlot) -> Result<usize> {
        let mut slots = self
            .slots
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        slots.push(slot.clone());
        Ok(slots.len() - 1)
    }

    fn remove(&self, index: usize) -> Result<Option<SaveSlot>> {
        let mut slots = self
            .slots
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        if index < slots.len() {
            Ok(Some(slots.remove(index)))
        } else {
            Ok(None)
        }
    }

    fn get(&self, index: usize) -> Result<Option<SaveSlot>> {
        let slots = self.slots.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(slots.get(index).cloned())
    }

    fn len(&self) -> Result<usize> {
        let slots = self.slots.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(slots.len())
    }
}

#[derive(Default)]
pub struct InMemoryStatsRepo {
    stats: RwLock<CumulativeStats>,
}

impl InMemoryStatsRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatsRepository for InMemoryStatsRepo {
    fn load(&self) -> Result<CumulativeStats> {
        let stats = self.stats.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(stats.clone())
    }

    fn save(&self, stats: &CumulativeStats) -> Result<()> {
        let mut stored = self
            .stats
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        *stored = stats.clone();
        Ok(())
    }
}
