//! Configuration loading for docsweep.
//!
//! A small TOML file fixes the scan roots, the output base path, and the
//! incremental-save interval. Every section and field is optional; missing
//! values fall back to the defaults below, and a missing file means an
//! all-default configuration.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    pub scan: Option<ScanConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScanConfig {
    /// Directory trees to sweep.
    pub roots: Option<Vec<PathBuf>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct OutputConfig {
    /// Base path of the report workbook; collision probing appends `_1`,
    /// `_2`, … before the extension.
    pub path: Option<PathBuf>,
    /// Seconds between incremental saves of the workbook.
    pub flush_interval_secs: Option<u64>,
}

/// Default report base name, written to the working directory.
pub const DEFAULT_OUTPUT_PATH: &str = "file_contents.xlsx";

/// Default incremental-save interval (5 minutes).
pub const DEFAULT_FLUSH_INTERVAL_SECS: u64 = 300;

impl Config {
    /// Directory trees to sweep. Defaults to the working directory.
    pub fn roots(&self) -> Vec<PathBuf> {
        self.scan
            .as_ref()
            .and_then(|scan| scan.roots.clone())
            .filter(|roots| !roots.is_empty())
            .unwrap_or_else(|| vec![PathBuf::from(".")])
    }

    /// Base path the output target is resolved from.
    pub fn output_base(&self) -> PathBuf {
        self.output
            .as_ref()
            .and_then(|output| output.path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH))
    }

    /// How long to let appends accumulate before an incremental save.
    pub fn flush_interval(&self) -> Duration {
        let secs = self
            .output
            .as_ref()
            .and_then(|output| output.flush_interval_secs)
            .unwrap_or(DEFAULT_FLUSH_INTERVAL_SECS);
        Duration::from_secs(secs)
    }
}

pub fn default_config_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "docsweep").context("Could not determine config directory")?;
    Ok(dirs.config_dir().join("config.toml"))
}

pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: Config =
        toml::from_str(&contents).context("Failed to parse config file as TOML")?;
    Ok(config)
}
