//! Configuration module.
//!
//! Resolution order: defaults, then the TOML file, then environment variables, then CLI
//! flags. The resolved values are turned into [`TableOptions`] and a rest delay for the
//! scroll activity detector.

pub mod keybindings;
pub mod loader;

pub use keybindings::KeyBindings;
pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_log_path,
    load_config_file, load_config_with_precedence, merge_config, CliOverrides, ConfigError,
    ConfigFile, ResolvedConfig,
};

use crate::elevation::ElevationScope;
use crate::view_state::{TableOptions, WindowOptions};
use std::time::Duration;

impl ResolvedConfig {
    /// Table options for a table placed at the configured fill level.
    pub fn table_options(&self) -> TableOptions {
        TableOptions {
            virtualize_rows: self.virtualize_rows,
            window: WindowOptions {
                estimate_size: self.row_estimate,
                overscan: self.overscan,
            },
            fetch_threshold: self.fetch_threshold,
            scroll_top_margin: self.scroll_top_margin,
            row_background: self.row_background,
            elevation: ElevationScope::root().provide_level(self.fill_level),
            ..TableOptions::default()
        }
    }

    /// Rest delay as a [`Duration`].
    pub fn rest_delay(&self) -> Duration {
        Duration::from_millis(self.rest_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elevation::ElevationLevel;
    use crate::view_state::RowBackground;

    #[test]
    fn table_options_carry_resolved_values() {
        let config = ResolvedConfig {
            row_estimate: 3,
            overscan: 7,
            virtualize_rows: false,
            fetch_threshold: 2,
            scroll_top_margin: 11,
            row_background: RowBackground::Raised,
            fill_level: 1.0,
            ..ResolvedConfig::default()
        };

        let options = config.table_options();
        assert!(!options.virtualize_rows);
        assert_eq!(options.window.estimate_size, 3);
        assert_eq!(options.window.overscan, 7);
        assert_eq!(options.fetch_threshold, 2);
        assert_eq!(options.scroll_top_margin, 11);
        assert_eq!(options.row_background, RowBackground::Raised);
        assert_eq!(options.elevation.read_level(), ElevationLevel::new(1).unwrap());
    }

    #[test]
    fn out_of_range_fill_level_is_clamped() {
        let config = ResolvedConfig {
            fill_level: 9.0,
            ..ResolvedConfig::default()
        };
        assert_eq!(config.table_options().elevation.read_level(), ElevationLevel::MAX);
    }

    #[test]
    fn rest_delay_in_millis() {
        let config = ResolvedConfig {
            rest_delay_ms: 120,
            ..ResolvedConfig::default()
        };
        assert_eq!(config.rest_delay(), Duration::from_millis(120));
    }
}
