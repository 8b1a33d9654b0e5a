//! Puzzle configuration constants and tunable parameters.

use crate::error::{ErrorSeverity, GameError};

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Number of disks placed on tower A when a new game starts.
    pub disk_count: u8,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Number of towers on every board.
    pub const TOWER_COUNT: usize = 3;
    /// Capacity of a single tower; also the largest playable disk count.
    pub const MAX_DISKS: usize = 16;

    // ===== runtime-tunable defaults =====
    pub const MIN_DISKS: u8 = 1;
    pub const DEFAULT_DISKS: u8 = 3;

    // ===== achievement thresholds =====
    pub const SPEED_DEMON_DISKS: u8 = 3;
    pub const SPEED_DEMON_LIMIT_MS: u64 = 30_000;
    pub const TOWER_MASTER_DISKS: u8 = 8;
    pub const PERSISTENT_GAMES: u32 = 5;
    pub const UNDO_MASTER_UNDOS: u32 = 10;
    pub const THEME_EXPLORER_THEMES: usize = 5;

    /// Creates a configuration for `disk_count` disks, rejecting counts the
    /// board cannot hold.
    pub fn with_disk_count(disk_count: u8) -> Result<Self, ConfigError> {
        Self::validate_disk_count(disk_count)?;
        Ok(Self { disk_count })
    }

    pub fn validate_disk_count(disk_count: u8) -> Result<(), ConfigError> {
        if disk_count < Self::MIN_DISKS || disk_count as usize > Self::MAX_DISKS {
            return Err(ConfigError::DiskCountOutOfRange {
                requested: disk_count,
                min: Self::MIN_DISKS,
                max: Self::MAX_DISKS as u8,
            });
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            disk_count: Self::DEFAULT_DISKS,
        }
    }
}

/// Errors raised when a configuration value is outside the supported range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConfigError {
    #[error("disk count {requested} is outside the supported range {min}..={max}")]
    DiskCountOutOfRange { requested: u8, min: u8, max: u8 },
}

impl GameError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            ConfigError::DiskCountOutOfRange { .. } => "CONFIG_DISK_COUNT_OUT_OF_RANGE",
        }
    }
}
