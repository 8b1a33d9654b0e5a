//! Achievement store backed by a repository.

use std::collections::BTreeSet;
use std::sync::Arc;

use hanoi_core::{AchievementId, AchievementStore};

use crate::repository::{AchievementRepository, Result};

/// Caches the unlocked set and writes it through on every new unlock.
///
/// Persistence is best-effort: a failed write is logged and the unlock still
/// counts for the running process.
pub struct AchievementLedger {
    unlocked: BTreeSet<AchievementId>,
    repo: Arc<dyn AchievementRepository>,
}

impl AchievementLedger {
    pub fn open(repo: Arc<dyn AchievementRepository>) -> Result<Self> {
        let unlocked = repo.load()?;
        Ok(Self { unlocked, repo })
    }
}

impl AchievementStore for AchievementLedger {
    fn has(&self, id: AchievementId) -> bool {
        self.unlocked.contains(&id)
    }

    fn unlock(&mut self, id: AchievementId) -> bool {
        if !self.unlocked.insert(id) {
            return false;
        }
        if let Err(error) = self.repo.save(&self.unlocked) {
            tracing::warn!(achievement = %id, %error, "Failed to persist achievement");
        }
        true
    }

    fn unlocked(&self) -> Vec<AchievementId> {
        self.unlocked.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryAchievementRepo;

    #[test]
    fn unlocks_are_written_through() {
        let repo = Arc::new(InMemoryAchievementRepo::new());
        let mut ledger = AchievementLedger::open(repo.clone()).unwrap();

        assert!(ledger.unlock(AchievementId::FirstWin));
        assert!(!ledger.unlock(AchievementId::FirstWin));
        assert!(repo.load().unwrap().contains(&AchievementId::FirstWin));

        let reopened = AchievementLedger::open(repo).unwrap();
        assert!(reopened.has(AchievementId::FirstWin));
    }
}
