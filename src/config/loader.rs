//! Config file discovery, parsing and the override chain.
//!
//! A value is taken from the first of these that sets it: CLI flag, environment, config
//! file, built-in default.

use crate::view_state::RowBackground;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "GRIDWIN_CONFIG";

/// Environment variable overriding the scroll rest delay, in milliseconds.
pub const REST_DELAY_ENV: &str = "GRIDWIN_REST_DELAY_MS";

/// A config file exists but cannot be used.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("cannot read {}: {reason}", path.display())]
    Unreadable {
        /// File that failed.
        path: PathBuf,
        /// The I/O error, as text.
        reason: String,
    },

    /// Bad TOML syntax, a wrong value type, or a key that is not a setting.
    #[error("bad config in {}: {reason}", path.display())]
    Malformed {
        /// File that failed.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },
}

/// Settings as written in `config.toml`. Absent keys fall through to [`ResolvedConfig`]
/// defaults.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Height assumed for unmeasured rows, in lines.
    #[serde(default)]
    pub row_estimate: Option<usize>,

    /// Extra rows rendered above and below the viewport.
    #[serde(default)]
    pub overscan: Option<usize>,

    /// Quiet period before scrolling is considered finished.
    #[serde(default)]
    pub rest_delay_ms: Option<u64>,

    /// Render only visible rows.
    #[serde(default)]
    pub virtualize_rows: Option<bool>,

    /// Rows read from the input per page.
    #[serde(default)]
    pub page_size: Option<usize>,

    /// Rows before the end at which the next page is requested.
    #[serde(default)]
    pub fetch_threshold: Option<usize>,

    /// Scroll distance, in lines, after which "back to top" is offered.
    #[serde(default)]
    pub scroll_top_margin: Option<usize>,

    /// `stripes`, `raised` or `flat`.
    #[serde(default)]
    pub row_background: Option<RowBackground>,

    /// Elevation level the table is placed at (0-3).
    #[serde(default)]
    pub fill_level: Option<f64>,

    /// Where `tracing` output goes.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Every setting with a concrete value, after the override chain has run.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Height assumed for unmeasured rows, in lines.
    pub row_estimate: usize,
    /// Rows drawn beyond each edge of the viewport.
    pub overscan: usize,
    /// Quiet period that ends a scroll, in milliseconds.
    pub rest_delay_ms: u64,
    /// Draw only the visible window.
    pub virtualize_rows: bool,
    /// Lines read from the input per page.
    pub page_size: usize,
    /// Rows before the end at which the next page is requested.
    pub fetch_threshold: usize,
    /// Scroll distance, in lines, past which the back-to-top hint shows.
    pub scroll_top_margin: usize,
    /// Row striping pattern.
    pub row_background: RowBackground,
    /// Elevation the table is drawn at, clamped to `0..=3`.
    pub fill_level: f64,
    /// Log file for `tracing` output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            row_estimate: 1,
            overscan: 3,
            rest_delay_ms: 350,
            virtualize_rows: true,
            page_size: 200,
            fetch_threshold: 0,
            scroll_top_margin: 50,
            row_background: RowBackground::Stripes,
            fill_level: 0.0,
            log_file_path: default_log_path(),
        }
    }
}

/// `<state dir>/gridwin/gridwin.log`, or `gridwin.log` in the working directory on platforms
/// without a state dir.
pub fn default_log_path() -> PathBuf {
    dirs::state_dir()
        .map(|dir| dir.join("gridwin").join("gridwin.log"))
        .unwrap_or_else(|| PathBuf::from("gridwin.log"))
}

/// Parse the config file at `path`. A missing file yields `Ok(None)`.
///
/// # Errors
/// [`ConfigError`] when the file exists but cannot be read or parsed.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();
    if !path.exists() {
        return Ok(None);
    }

    let text = std::fs::read_to_string(&path).map_err(|err| ConfigError::Unreadable {
        path: path.clone(),
        reason: err.to_string(),
    })?;
    toml::from_str(&text)
        .map(Some)
        .map_err(|err| ConfigError::Malformed {
            path,
            reason: err.to_string(),
        })
}

/// `<config dir>/gridwin/config.toml` for the current platform.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("gridwin").join("config.toml"))
}

/// Find and parse the one config file in effect.
///
/// Only the first candidate is consulted: `--config`, then [`CONFIG_ENV`], then
/// [`default_config_path`]. A missing candidate means defaults, not a fallback to the next.
///
/// # Errors
/// See [`load_config_file`].
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    let candidate = config_path
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
        .or_else(default_config_path);
    match candidate {
        Some(path) => load_config_file(path),
        None => Ok(None),
    }
}

/// Apply [`REST_DELAY_ENV`]. A value that is not a whole number of milliseconds is logged
/// and ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(raw) = std::env::var(REST_DELAY_ENV) {
        match raw.trim().parse::<u64>() {
            Ok(ms) => config.rest_delay_ms = ms,
            Err(e) => tracing::warn!(value = %raw, error = %e, "ignoring {}", REST_DELAY_ENV),
        }
    }

    config
}

/// Fill every key the file leaves out with its default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();
    let Some(config) = config_file else {
        return defaults;
    };
    ResolvedConfig {
        row_estimate: config.row_estimate.unwrap_or(defaults.row_estimate),
        overscan: config.overscan.unwrap_or(defaults.overscan),
        rest_delay_ms: config.rest_delay_ms.unwrap_or(defaults.rest_delay_ms),
        virtualize_rows: config.virtualize_rows.unwrap_or(defaults.virtualize_rows),
        page_size: config.page_size.unwrap_or(defaults.page_size),
        fetch_threshold: config.fetch_threshold.unwrap_or(defaults.fetch_threshold),
        scroll_top_margin: config
            .scroll_top_margin
            .unwrap_or(defaults.scroll_top_margin),
        row_background: config.row_background.unwrap_or(defaults.row_background),
        fill_level: config.fill_level.unwrap_or(defaults.fill_level),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Overrides from explicitly set CLI flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    /// `--no-virtualize`
    pub no_virtualize: bool,
    /// `--overscan`
    pub overscan: Option<usize>,
    /// `--page-size`
    pub page_size: Option<usize>,
    /// `--fill-level`
    pub fill_level: Option<f64>,
}

/// Last step of the chain: flags given on the command line win over everything.
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: CliOverrides) -> ResolvedConfig {
    if cli.no_virtualize {
        config.virtualize_rows = false;
    }
    config.overscan = cli.overscan.unwrap_or(config.overscan);
    config.page_size = cli.page_size.unwrap_or(config.page_size);
    config.fill_level = cli.fill_level.unwrap_or(config.fill_level);
    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
