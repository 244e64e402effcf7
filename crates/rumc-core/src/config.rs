use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Global configuration loaded from `~/.config/rumc/config.toml`.
///
/// Read once at process start; nothing here is reloaded per request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RumConfig {
    /// Optional bot signature table (TOML) replacing the built-in one.
    #[serde(default)]
    pub signatures_path: Option<PathBuf>,
    /// Checkpoint names accepted in addition to the built-in vocabulary.
    #[serde(default)]
    pub extra_checkpoints: Vec<String>,
    /// Default log filter when `RUST_LOG` is unset (e.g. "info,rumc_core=debug").
    #[serde(default)]
    pub log_filter: Option<String>,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("rumc")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<RumConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = RumConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}

/// Load configuration from an explicit path.
pub fn load_from(path: &Path) -> Result<RumConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: RumConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
