//! Where configuration and status snapshots live on disk
//!
//! The config file is looked up as: `--config` flag, then `$HOTCOOL_CONFIG`,
//! then `~/.config/hotcool/config.toml`. Snapshots are one JSON file per
//! device serial under the data directory.

use std::path::{Path, PathBuf};

/// Environment variable overriding the config file location
pub const CONFIG_ENV_VAR: &str = "HOTCOOL_CONFIG";

/// Default config file, `~/.config/hotcool/config.toml` on Linux.
///
/// Falls back to `/etc/hotcool/config.toml` when no user config dir exists.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("/etc"))
        .join("hotcool")
        .join("config.toml")
}

/// Pick the config file from an explicit path, the env value, or the default
pub fn resolve_config_path(explicit: Option<&Path>, env_value: Option<&str>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| {
            env_value
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
        })
        .unwrap_or_else(default_config_path)
}

/// Default directory holding `<serial>.json` status snapshots.
///
/// `~/.local/share/hotcool` on Linux. Without a home directory the snapshots
/// go under the system temp dir, since they are refreshed from the device.
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("hotcool")
}

/// Snapshot file for one device
pub fn snapshot_path(data_dir: &Path, serial: &str) -> PathBuf {
    data_dir.join(format!("{}.json", serial))
}
