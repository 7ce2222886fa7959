use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::cli::Cli;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub parallel_detectors: bool,
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_true")]
    pub pretty: bool,
    #[serde(default = "default_true")]
    pub diagnostics: bool,
    #[serde(default = "default_true")]
    pub progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            diagnostics: true,
            progress: true,
        }
    }
}

fn default_true() -> bool { true }

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Failed to parse config: {}", path.display()))
}

/// Explicit path, then ./beatlane.toml, then the per-user config locations.
pub fn find_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let local = PathBuf::from("beatlane.toml");
    if local.exists() {
        return Some(local);
    }
    if let Some(home) = dirs::home_dir() {
        let xdg = home.join(".config").join("beatlane").join("config.toml");
        if xdg.exists() {
            return Some(xdg);
        }
    }
    if let Some(config_dir) = dirs::config_dir() {
        let platform = config_dir.join("beatlane").join("config.toml");
        if platform.exists() {
            return Some(platform);
        }
    }
    None
}

/// Effective run settings after merging CLI flags over the config file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settings {
    pub parallel_detectors: bool,
    pub pretty: bool,
    pub diagnostics: bool,
    pub progress: bool,
}

impl Settings {
    /// Config values apply only where the CLI flag was left at its default.
    pub fn resolve(cli: &Cli, cfg: &Config) -> Self {
        Self {
            parallel_detectors: cli.parallel || cfg.analysis.parallel_detectors,
            pretty: !cli.compact && cfg.output.pretty,
            diagnostics: !cli.no_diagnostics && cfg.output.diagnostics,
            progress: !cli.no_progress && cfg.output.progress,
        }
    }
}
