//! File-backed repositories.
//!
//! Each store is a single pretty-printed JSON document under a shared data
//! directory. Writes go to a temp file first and are moved into place with an
//! atomic rename, so a crash never leaves a half-written document behind.

mod achievements;
mod saves;
mod stats;

pub use achievements::FileAchievementRepository;
pub use saves::FileSaveRepository;
pub use stats::FileStatsRepository;

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::repository::{RepositoryError, Result};

fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(RepositoryError::Io)?;
    }
    let temp_path = path.with_extension("json.tmp");

    let json =
        serde_json::to_string_pretty(value).map_err(|e| RepositoryError::Json(e.to_string()))?;
    fs::write(&temp_path, json).map_err(RepositoryError::Io)?;

    // Atomic rename
    fs::rename(&temp_path, path).map_err(RepositoryError::Io)?;

    tracing::debug!("Wrote {}", path.display());
    Ok(())
}

/// Reads a JSON document, returning `None` when the file does not exist yet.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }

    let json = fs::read_to_string(path).map_err(RepositoryError::Io)?;
    let value = serde_json::from_str(&json).map_err(|e| RepositoryError::Json(e.to_string()))?;
    Ok(Some(value))
}
