//! Viewer configuration: TOML file, environment and CLI layers.
//!
//! Each layer only overrides the values it sets. Resolution runs once at
//! startup in `main`.

use crate::virtual_list::IndexStrategy;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "WINLIST_CONFIG";

/// Environment variable overriding the overscan count.
pub const OVERSCAN_ENV_VAR: &str = "WINLIST_OVERSCAN";

/// Environment variable overriding the estimated item height.
pub const ESTIMATE_ENV_VAR: &str = "WINLIST_ESTIMATE";

/// A config file that exists but cannot be used.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read config {path}: {reason}")]
    ReadError {
        /// Config file path.
        path: PathBuf,
        /// I/O error text.
        reason: String,
    },

    /// Invalid TOML, a wrong value type, or an unknown key.
    #[error("bad config {path}: {reason}")]
    ParseError {
        /// Config file path.
        path: PathBuf,
        /// Deserializer message.
        reason: String,
    },
}

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Estimated item height in rows before measurement.
    #[serde(default)]
    pub estimate_size: Option<u32>,

    /// Items rendered beyond each viewport edge.
    #[serde(default)]
    pub overscan: Option<usize>,

    /// Height differences up to this many rows are ignored.
    #[serde(default)]
    pub remeasure_threshold: Option<u32>,

    /// Offset index strategy: "dense" or "fenwick".
    #[serde(default)]
    pub index_strategy: Option<IndexStrategy>,

    /// Show the scrollbar column.
    #[serde(default)]
    pub show_scrollbar: Option<bool>,

    /// Rows scrolled per mouse wheel tick.
    #[serde(default)]
    pub wheel_step: Option<u16>,

    /// Tracing output file.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Final settings once every layer has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Estimated item height in rows.
    pub estimate_size: u32,
    /// Overscan count.
    pub overscan: usize,
    /// Remeasure threshold in rows.
    pub remeasure_threshold: u32,
    /// Offset index strategy.
    pub index_strategy: IndexStrategy,
    /// Scrollbar visibility.
    pub show_scrollbar: bool,
    /// Rows per wheel tick.
    pub wheel_step: u16,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        // A one-row difference is already a correction.
        Self {
            estimate_size: 3,
            overscan: 6,
            remeasure_threshold: 0,
            index_strategy: IndexStrategy::Dense,
            show_scrollbar: true,
            wheel_step: 3,
            log_file_path: default_log_path(),
        }
    }
}

/// CLI flags that override every other configuration source.
///
/// `None` means the flag was not given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--estimate`
    pub estimate_size: Option<u32>,
    /// `--overscan`
    pub overscan: Option<usize>,
    /// `--threshold`
    pub remeasure_threshold: Option<u32>,
    /// `--strategy`
    pub index_strategy: Option<IndexStrategy>,
    /// `--no-scrollbar` (only ever `Some(false)`)
    pub show_scrollbar: Option<bool>,
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/winlist/winlist.log` on Unix-like systems, or the
/// platform equivalent. Falls back to the current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("winlist").join("winlist.log")
    } else {
        PathBuf::from("winlist.log")
    }
}

/// Read and parse the config file at `path`.
///
/// A missing file yields `Ok(None)`.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// `<config dir>/winlist/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("winlist").join("config.toml"))
}

/// Pick the config file and load it.
///
/// The first of `--config`, `WINLIST_CONFIG` and the default path wins; a
/// later candidate is never consulted even if the chosen file is missing.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Fill unset file values from the defaults.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        estimate_size: config.estimate_size.unwrap_or(defaults.estimate_size),
        overscan: config.overscan.unwrap_or(defaults.overscan),
        remeasure_threshold: config
            .remeasure_threshold
            .unwrap_or(defaults.remeasure_threshold),
        index_strategy: config.index_strategy.unwrap_or(defaults.index_strategy),
        show_scrollbar: config.show_scrollbar.unwrap_or(defaults.show_scrollbar),
        wheel_step: config.wheel_step.unwrap_or(defaults.wheel_step),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Environment layer.
///
/// Checks `WINLIST_OVERSCAN` and `WINLIST_ESTIMATE`. Values that do not
/// parse as unsigned integers are ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Some(overscan) = env_number(OVERSCAN_ENV_VAR) {
        config.overscan = overscan;
    }

    if let Some(estimate) = env_number(ESTIMATE_ENV_VAR) {
        config.estimate_size = estimate;
    }

    config
}

fn env_number<N: std::str::FromStr>(name: &str) -> Option<N> {
    std::env::var(name).ok()?.trim().parse().ok()
}

/// Command-line layer, applied last.
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: CliOverrides) -> ResolvedConfig {
    if let Some(estimate) = cli.estimate_size {
        config.estimate_size = estimate;
    }

    if let Some(overscan) = cli.overscan {
        config.overscan = overscan;
    }

    if let Some(threshold) = cli.remeasure_threshold {
        config.remeasure_threshold = threshold;
    }

    if let Some(strategy) = cli.index_strategy {
        config.index_strategy = strategy;
    }

    if let Some(show) = cli.show_scrollbar {
        config.show_scrollbar = show;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
