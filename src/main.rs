//! gridwin - Entry Point

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// gridwin - windowed table viewer for JSONL files
#[derive(Parser, Debug)]
#[command(name = "gridwin")]
#[command(version)]
#[command(about = "Scroll through large JSONL files as a windowed table")]
pub struct Args {
    /// Path to JSONL file, one object per row
    pub file: Option<PathBuf>,

    /// Render every loaded row instead of only the visible window
    #[arg(long)]
    pub no_virtualize: bool,

    /// Rows rendered beyond each edge of the viewport
    #[arg(long)]
    pub overscan: Option<usize>,

    /// Rows read per page
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub page_size: Option<u64>,

    /// Surface level the table is drawn on (0-3)
    #[arg(long)]
    pub fill_level: Option<f64>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    fn cli_overrides(&self) -> gridwin::config::CliOverrides {
        gridwin::config::CliOverrides {
            no_virtualize: self.no_virtualize,
            overscan: self.overscan,
            page_size: self.page_size.map(|n| n as usize),
            fill_level: self.fill_level,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = gridwin::config::load_config_with_precedence(args.config.clone())?;
        let merged = gridwin::config::merge_config(config_file);
        let with_env = gridwin::config::apply_env_overrides(merged);
        gridwin::config::apply_cli_overrides(with_env, args.cli_overrides())
    };

    gridwin::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let source = gridwin::source::open_source(args.file.clone(), config.page_size)?;
    let colors = gridwin::view::ColorConfig::from_env_and_args(args.no_color);

    gridwin::view::run_with_source(source, &config, colors)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_help_does_not_error() {
        let result = Args::try_parse_from(["gridwin", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let result = Args::try_parse_from(["gridwin", "--version"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_args_defaults() {
        let args = Args::parse_from(["gridwin"]);
        assert_eq!(args.file, None);
        assert!(!args.no_virtualize);
        assert_eq!(args.overscan, None);
        assert_eq!(args.page_size, None);
        assert_eq!(args.fill_level, None);
        assert!(!args.no_color);
        assert_eq!(args.config, None);
    }

    #[test]
    fn test_file_path_populates_file_field() {
        let args = Args::parse_from(["gridwin", "rows.jsonl"]);
        assert_eq!(args.file, Some(PathBuf::from("rows.jsonl")));
    }

    #[test]
    fn test_page_size_rejects_zero() {
        let result = Args::try_parse_from(["gridwin", "--page-size", "0"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_fill_level_parses_float() {
        let args = Args::parse_from(["gridwin", "--fill-level", "1.5"]);
        assert_eq!(args.fill_level, Some(1.5));
    }

    #[test]
    fn test_config_path() {
        let args = Args::parse_from(["gridwin", "--config", "/custom/config.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_combined_flags() {
        let args = Args::parse_from([
            "gridwin",
            "rows.jsonl",
            "--no-virtualize",
            "--overscan",
            "8",
            "--page-size",
            "50",
            "--no-color",
        ]);
        assert_eq!(args.file, Some(PathBuf::from("rows.jsonl")));
        assert!(args.no_virtualize);
        assert_eq!(args.overscan, Some(8));
        assert_eq!(args.page_size, Some(50));
        assert!(args.no_color);
    }

    #[test]
    fn test_cli_flags_flow_through_config_precedence_chain() {
        use gridwin::config::{apply_cli_overrides, apply_env_overrides, merge_config, ConfigFile};

        let config_file = ConfigFile {
            overscan: Some(5),
            page_size: Some(10),
            ..ConfigFile::default()
        };

        let merged = merge_config(Some(config_file));
        assert_eq!(merged.overscan, 5, "Config file should override default overscan");

        let with_env = apply_env_overrides(merged);
        assert_eq!(with_env.page_size, 10);

        let args = Args::parse_from(["gridwin", "--overscan", "9", "--no-virtualize"]);
        let with_cli = apply_cli_overrides(with_env, args.cli_overrides());
        assert_eq!(with_cli.overscan, 9, "CLI overscan should override all other sources");
        assert_eq!(with_cli.page_size, 10, "unset CLI flags keep lower layers");
        assert!(!with_cli.virtualize_rows);
    }
}
