//! Platform-specific directory utilities

use std::path::PathBuf;

/// Platform log directory for the client
///
/// - macOS: `~/Library/Caches/hanoi/logs`
/// - Linux: `~/.cache/hanoi/logs` (or `$XDG_CACHE_HOME/hanoi/logs`)
/// - Windows: `%LOCALAPPDATA%\hanoi\cache\logs`
/// - Fallback: `/tmp/hanoi/logs`
pub fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "hanoi")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/hanoi"))
        .join("logs")
}

/// Platform data directory holding achievements, saves and statistics
///
/// - macOS: `~/Library/Application Support/hanoi`
/// - Linux: `~/.local/share/hanoi` (or `$XDG_DATA_HOME/hanoi`)
/// - Windows: `%APPDATA%\hanoi\data`
/// - Fallback: `./save_data`
pub fn data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "hanoi")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./save_data"))
}
