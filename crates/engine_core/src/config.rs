// crates/engine_core/src/config.rs
//! Host settings, read from `engine.toml` when present.

use std::env::consts::{DLL_PREFIX, DLL_SUFFIX};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use crate::error::HostError;

pub const DEFAULT_CONFIG_FILE: &str = "engine.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Built plugin library. The host loads a copy so the original can be rebuilt.
    pub plugin_path: PathBuf,
    /// Image paths from the plugin are resolved relative to this directory.
    pub asset_root: PathBuf,
    /// Default `tracing` filter, overridden by `RUST_LOG`.
    pub log_level: String,
    pub window: WindowConfig,
    pub hot_reload: HotReloadConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: f64,
    pub height: f64,
    pub show_inspector: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HotReloadConfig {
    /// Watch `plugin_path` and reload when it is rebuilt.
    pub watch: bool,
    pub debounce_ms: u64,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            plugin_path: default_plugin_path(),
            asset_root: PathBuf::from("assets"),
            log_level: "info".to_string(),
            window: WindowConfig::default(),
            hot_reload: HotReloadConfig::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Dinosaur Collector".to_string(),
            width: 1280.0,
            height: 720.0,
            show_inspector: false,
        }
    }
}

impl Default for HotReloadConfig {
    fn default() -> Self {
        Self {
            watch: true,
            debounce_ms: 500,
        }
    }
}

impl HotReloadConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// `target/debug/libdino_plugin.so` (or `.dylib` / `dino_plugin.dll`).
fn default_plugin_path() -> PathBuf {
    PathBuf::from("target/debug").join(format!("{DLL_PREFIX}dino_plugin{DLL_SUFFIX}"))
}

impl HostConfig {
    /// Reads `path`. `None` if the file does not exist.
    pub fn read(path: &Path) -> Result<Option<Self>, HostError> {
        if !path.exists() {
            return Ok(None);
        }

        let text = fs::read_to_string(path).map_err(|source| HostError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&text).map_err(|source| HostError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Some(config))
    }
}
