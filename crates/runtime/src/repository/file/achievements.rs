use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use hanoi_core::AchievementId;

use super::{read_json, write_json_atomic};
use crate::repository::{AchievementRepository, Result};

/// Stores unlocked achievement ids as a JSON array in `achievements.json`.
pub struct FileAchievementRepository {
    path: PathBuf,
}

impl FileAchievementRepository {
    pub const FILE_NAME: &'static str = "achievements.json";

    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            path: base_dir.as_ref().join(Self::FILE_NAME),
        }
    }
}

impl AchievementRepository for FileAchievementRepository {
    fn load(&self) -> Result<BTreeSet<AchievementId>> {
        Ok(read_json(&self.path)?.unwrap_or_default())
    }

    fn save(&self, unlocked: &BTreeSet<AchievementId>) -> Result<()> {
        write_json_atomic(&self.path, unlocked)
    }
}
