//! Configuration loading for the demo runners.
//!
//! Reads `unitiles.toml` (or an explicit path) into [`ConfigFile`]. Every
//! field has a default, unknown fields are ignored, and a missing or broken
//! file yields the defaults, so a bad config never stops the game from
//! starting. Values that cannot work (zero-sized viewport, zero tick) are
//! replaced by their defaults in [`Config::validate`].

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

pub const FILE_NAME: &str = "unitiles.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceChoice {
    Retained,
    Immediate,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: u16,
    pub height: u16,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 41,
            height: 25,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct RenderConfig {
    pub surface: SurfaceChoice,
    pub tick_ms: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            surface: SurfaceChoice::Retained,
            tick_ms: 150,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct EngineConfig {
    pub cache: bool,
    pub fov: bool,
    pub lighting: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache: true,
            fov: true,
            lighting: true,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LogConfig {
    pub file: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: "unitiles.log".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ConfigFile {
    pub viewport: ViewportConfig,
    pub render: RenderConfig,
    pub engine: EngineConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub path: Option<PathBuf>, // file the values came from, if any
    pub file: ConfigFile,
}

/// Best-effort config path: working directory first, then the platform config dir.
pub fn discover() -> PathBuf {
    let local = PathBuf::from(FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("unitiles").join(FILE_NAME);
    }
    local
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config::default());
    };

    let mut cfg = match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => Config {
            path: Some(path),
            file,
        },
        Err(e) => {
            warn!(
                target: "config",
                path = %path.display(),
                error = %e,
                "config_parse_failed_using_defaults"
            );
            Config::default()
        }
    };
    cfg.validate();
    info!(target: "config", path = ?cfg.path, "config_loaded");
    Ok(cfg)
}

impl Config {
    /// Replace unusable values with defaults. Returns true if anything changed.
    pub fn validate(&mut self) -> bool {
        let defaults = ConfigFile::default();
        let mut changed = false;

        if self.file.viewport.width == 0 || self.file.viewport.height == 0 {
            warn!(
                target: "config",
                width = self.file.viewport.width,
                height = self.file.viewport.height,
                "viewport_size_invalid_using_default"
            );
            self.file.viewport = defaults.viewport;
            changed = true;
        }
        if self.file.render.tick_ms == 0 {
            warn!(target: "config", "tick_ms_zero_using_default");
            self.file.render.tick_ms = defaults.render.tick_ms;
            changed = true;
        }
        changed
    }
}
