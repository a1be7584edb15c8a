//! Tracing subscriber initialization.
//!
//! The terminal belongs to the table, so logs go to a file. Follow them with `tail -f` in a
//! separate terminal.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_DIRECTIVE: &str = "info";

/// Why the log file subscriber could not be installed.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The directory holding the log file could not be created.
    #[error("cannot create log directory {dir:?}: {source}")]
    CreateDir {
        /// Directory that could not be created.
        dir: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The path does not end in a UTF-8 file name.
    #[error("log path {0:?} does not name a file")]
    NotAFile(PathBuf),

    /// Another global subscriber got there first.
    #[error("a global tracing subscriber is already installed")]
    AlreadyInstalled,
}

/// Split a log path into the directory and file name the appender wants.
///
/// A bare file name (`gridwin.log`) resolves to the current directory.
pub fn split_log_path(log_path: &Path) -> Result<(PathBuf, String), LoggingError> {
    let Some(file_name) = log_path.file_name().and_then(|name| name.to_str()) else {
        return Err(LoggingError::NotAFile(log_path.to_path_buf()));
    };
    let directory = match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((directory, file_name.to_owned()))
}

/// `RUST_LOG` if it parses, otherwise [`DEFAULT_DIRECTIVE`].
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Install a global subscriber that appends to `log_path`, creating its directory.
///
/// # Errors
/// Fails if the path has no file name, the directory cannot be created, or a global
/// subscriber is already installed.
pub fn init(log_path: &Path) -> Result<(), LoggingError> {
    let (directory, file_name) = split_log_path(log_path)?;

    std::fs::create_dir_all(&directory).map_err(|source| LoggingError::CreateDir {
        dir: directory.clone(),
        source,
    })?;

    let writer = tracing_appender::rolling::never(&directory, &file_name);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|_| LoggingError::AlreadyInstalled)
}
