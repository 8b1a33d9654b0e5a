use std::path::{Path, PathBuf};

use hanoi_core::CumulativeStats;

use super::{read_json, write_json_atomic};
use crate::repository::{Result, StatsRepository};

/// Stores `{gamesPlayed, undoCount, themesUsed}` in `stats.json`.
pub struct FileStatsRepository {
    path: PathBuf,
}

impl FileStatsRepository {
    pub const FILE_NAME: &'static str = "stats.json";

    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            path: base_dir.as_ref().join(Self::FILE_NAME),
        }
    }
}

impl StatsRepository for FileStatsRepository {
    fn load(&self) -> Result<CumulativeStats> {
        Ok(read_json(&self.path)?.unwrap_or_default())
    }

    fn save(&self, stats: &CumulativeStats) -> Result<()> {
        write_json_atomic(&self.path, stats)
    }
}
