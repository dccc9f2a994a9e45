//! Data-directory layout.

use std::path::{Path, PathBuf};

use stayon_types::config::GlobalConfig;

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "STAYON_DATA_DIR";

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `STAYON_DATA_DIR` environment variable
/// 2. `~/.stayon`
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".stayon");
    }

    // Last resort: current directory
    PathBuf::from(".stayon")
}

/// Root of the per-agent transcript folders: `history_dir` from config, or
/// `{data_dir}/history`.
pub fn resolve_history_dir(config: &GlobalConfig, data_dir: &Path) -> PathBuf {
    config
        .history_dir
        .clone()
        .unwrap_or_else(|| data_dir.join("history"))
}
