//! Content digests for persisted save slots.

use sha2::{Digest, Sha256};

use hanoi_core::SaveSlot;

use crate::repository::{RepositoryError, Result};

/// Hex SHA-256 over the bincode encoding of `slot`.
///
/// Stored next to each slot on disk so edits or truncation are caught
/// before a slot is restored.
pub fn slot_digest(slot: &SaveSlot) -> Result<String> {
    let bytes =
        bincode::serialize(slot).map_err(|e| RepositoryError::Serialization(e.to_string()))?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hanoi_core::{GameMode, GameState, Timestamp};

    fn slot(name: &str) -> SaveSlot {
        let state = GameState::new(3, GameMode::Single).unwrap();
        SaveSlot::capture(name, &state, Timestamp(42))
    }

    #[test]
    fn digest_is_stable_for_identical_slots() {
        assert_eq!(slot_digest(&slot("a")).unwrap(), slot_digest(&slot("a")).unwrap());
    }

    #[test]
    fn digest_format() {
        let digest = slot_digest(&slot("a")).unwrap();
        assert_eq!(digest.len(), 64, "SHA-256 should be 64 hex chars");
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(digest, slot_digest(&slot("b")).unwrap());
    }
}
