//! Configuration loading and parsing.
//!
//! Parses `gim.toml` (working directory first, then the platform config dir). Every
//! field has a default, so a missing file, a missing table or an unparsable file all
//! yield a usable `Config`; unknown fields are ignored.
//!
//! ```toml
//! [input]
//! timeout_ms = 100
//! [cursor]
//! clamp = false
//! [log]
//! file = "gim.log"
//! ```

use anyhow::Result;
use serde::Deserialize;
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::warn;

pub const CONFIG_FILE_NAME: &str = "gim.toml";

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct InputConfig {
    /// Upper bound for a single byte read, including escape follow-up bytes.
    #[serde(default = "InputConfig::default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            timeout_ms: Self::default_timeout_ms(),
        }
    }
}

impl InputConfig {
    const fn default_timeout_ms() -> u64 {
        100
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct CursorConfig {
    /// Keep the cursor inside the viewport. Off by default: arrows move freely.
    #[serde(default)]
    pub clamp: bool,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LogConfig {
    #[serde(default = "LogConfig::default_file")]
    pub file: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: Self::default_file(),
        }
    }
}

impl LogConfig {
    fn default_file() -> PathBuf {
        PathBuf::from("gim.log")
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub cursor: CursorConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub path: Option<PathBuf>,
    pub file: ConfigFile,
}

impl Config {
    /// Per-read timeout; zero is coerced to one millisecond so reads never busy-spin.
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.file.input.timeout_ms.max(1))
    }

    pub fn clamp_cursor(&self) -> bool {
        self.file.cursor.clamp
    }

    pub fn log_file(&self) -> &std::path::Path {
        &self.file.log.file
    }
}

/// Best-effort config path: local `gim.toml`, then the platform config dir.
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("gim").join(CONFIG_FILE_NAME);
    }
    local
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => Ok(Config {
            path: Some(path),
            file,
        }),
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed");
            Ok(Config::default())
        }
    }
}
