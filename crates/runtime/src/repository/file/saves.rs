use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use hanoi_core::SaveSlot;

use super::{read_json, write_json_atomic};
use crate::repository::{RepositoryError, Result, SaveSlotRepository};
use crate::utils::hash::slot_digest;

/// One entry of `saves.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredSlot {
    digest: String,
    slot: SaveSlot,
}

/// Stores save slots as an ordered JSON list in `saves.json`.
///
/// Each slot carries a SHA-256 digest; a slot whose digest no longer matches
/// is reported as [`RepositoryError::CorruptedData`] instead of being handed
/// out, and is left out of [`SaveSlotRepository::list`].
pub struct FileSaveRepository {
    path: PathBuf,
    // Serializes read-modify-write cycles on the document.
    write_lock: Mutex<()>,
}

impl FileSaveRepository {
    pub const FILE_NAME: &'static str = "saves.json";

    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            path: base_dir.as_ref().join(Self::FILE_NAME),
            write_lock: Mutex::new(()),
        }
    }

    fn read_entries(&self) -> Result<Vec<StoredSlot>> {
        Ok(read_json(&self.path)?.unwrap_or_default())
    }

    fn verify(entry: StoredSlot, index: usize) -> Result<SaveSlot> {
        let actual = slot_digest(&entry.slot)?;
        if actual != entry.digest {
            tracing::warn!(
                index,
                name = %entry.slot.name,
                "Save slot digest mismatch"
            );
            return Err(RepositoryError::CorruptedData(format!(
                "save slot {index} ('{}') failed its integrity check",
                entry.slot.name
            )));
        }
        Ok(entry.slot)
    }
}

impl SaveSlotRepository for FileSaveRepository {
    fn list(&self) -> Result<Vec<(usize, SaveSlot)>> {
        let mut slots = Vec::new();
        for (index, entry) in self.read_entries()?.into_iter().enumerate() {
            match Self::verify(entry, index) {
                Ok(slot) => slots.push((index, slot)),
                Err(RepositoryError::CorruptedData(reason)) => {
                    tracing::warn!(index, %reason, "Skipping corrupted save slot");
                }
                Err(error) => return Err(error),
            }
        }
        Ok(slots)
    }

    fn push(&self, slot: &SaveSlot) -> Result<usize> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        let mut entries = self.read_entries()?;
        entries.push(StoredSlot {
            digest: slot_digest(slot)?,
            slot: slot.clone(),
        });
        write_json_atomic(&self.path, &entries)?;

        tracing::debug!("Saved slot '{}' to {}", slot.name, self.path.display());
        Ok(entries.len() - 1)
    }

    fn remove(&self, index: usize) -> Result<Option<SaveSlot>> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        let mut entries = self.read_entries()?;
        if index >= entries.len() {
            return Ok(None);
        }
        let removed = entries.remove(index);
        write_json_atomic(&self.path, &entries)?;

        tracing::debug!("Deleted slot '{}'", removed.slot.name);
        Ok(Some(removed.slot))
    }

    fn get(&self, index: usize) -> Result<Option<SaveSlot>> {
        match self.read_entries()?.into_iter().nth(index) {
            Some(entry) => Self::verify(entry, index).map(Some),
            None => Ok(None),
        }
    }

    fn len(&self) -> Result<usize> {
        Ok(self.read_entries()?.len())
    }
}
