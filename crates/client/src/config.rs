//! Client configuration structures and loaders.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use hanoi_core::{ConfigError, GameConfig, GameMode};
use hanoi_runtime::{RuntimeConfig, SessionStores};

/// Configuration required to bootstrap the runtime and the REPL.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub disk_count: u8,
    pub mode: GameMode,
    pub auto_solve_delay: Duration,
    /// Keep achievements, saves and statistics in JSON files.
    pub enable_persistence: bool,
    pub data_dir: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub session_id: Option<String>,
    pub event_buffer: usize,
    pub command_buffer: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let runtime = RuntimeConfig::default();
        Self {
            disk_count: runtime.game_config.disk_count,
            mode: runtime.mode,
            auto_solve_delay: runtime.auto_solve_delay,
            enable_persistence: true,
            data_dir: None,
            log_dir: None,
            session_id: None,
            event_buffer: runtime.event_buffer_size,
            command_buffer: runtime.command_buffer_size,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `HANOI_DISKS` - Disks on a new board (default: 3)
    /// - `HANOI_MODE` - `single` or `multiplayer` (default: single)
    /// - `HANOI_AUTO_SOLVE_DELAY_MS` - Pause between solver moves (default: 800)
    /// - `HANOI_PERSISTENCE` - Persist progress to disk (default: true)
    /// - `HANOI_DATA_DIR` - Directory for persisted data (default: platform-specific)
    /// - `HANOI_LOG_DIR` - Directory for session logs (default: platform-specific)
    /// - `HANOI_SESSION_ID` - Log folder name (default: auto-generated)
    /// - `HANOI_EVENT_BUFFER` - Event bus capacity per topic (default: 100)
    /// - `HANOI_COMMAND_BUFFER` - Worker command queue size (default: 32)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).map(|value| value.trim().to_owned());
        let parse = |key: &str| read(key).and_then(|value| value.parse::<u64>().ok());

        let mut config = Self::default();

        if let Some(disks) = read("HANOI_DISKS").and_then(|value| value.parse().ok()) {
            config.disk_count = disks;
        }
        if let Some(mode) = read("HANOI_MODE").and_then(|value| value.parse().ok()) {
            config.mode = mode;
        }
        if let Some(millis) = parse("HANOI_AUTO_SOLVE_DELAY_MS") {
            config.auto_solve_delay = Duration::from_millis(millis);
        }
        if let Some(enable) = read("HANOI_PERSISTENCE").and_then(|value| parse_flag(&value)) {
            config.enable_persistence = enable;
        }

        config.data_dir = read("HANOI_DATA_DIR").map(PathBuf::from);
        config.log_dir = read("HANOI_LOG_DIR").map(PathBuf::from);
        config.session_id = read("HANOI_SESSION_ID").filter(|id| !id.is_empty());

        if let Some(capacity) = parse("HANOI_EVENT_BUFFER") {
            config.event_buffer = (capacity as usize).max(1);
        }
        if let Some(capacity) = parse("HANOI_COMMAND_BUFFER") {
            config.command_buffer = (capacity as usize).max(1);
        }

        config
    }

    pub fn runtime_config(&self) -> Result<RuntimeConfig, ConfigError> {
        Ok(RuntimeConfig {
            game_config: GameConfig::with_disk_count(self.disk_count)?,
            mode: self.mode,
            auto_solve_delay: self.auto_solve_delay,
            event_buffer_size: self.event_buffer,
            command_buffer_size: self.command_buffer,
        })
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(crate::dirs::data_dir)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(crate::dirs::log_dir)
    }

    pub fn stores(&self) -> SessionStores {
        if self.enable_persistence {
            SessionStores::file(self.data_dir())
        } else {
            SessionStores::in_memory()
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
