//! Error types for the gridwin host.
//!
//! The windowing core itself is infallible: measuring an unmounted node yields `0.0`,
//! clamping a NaN level yields level 0, and caller fetch errors are handed back unchanged.
//! The types here cover the terminal host that drives the core: reading row data and
//! parsing it.
//!
//! # Error Hierarchy
//!
//! - [`InputError`] - Row file reading failures (file not found, IO)
//! - [`ParseError`] - JSONL row parsing failures (malformed JSON, non-object rows)
//!
//! Terminal failures are `std::io::Error` and are wrapped by `view::TuiError` together with
//! [`InputError`].
//!
//! # Error Recovery Strategy
//!
//! Parse errors are **non-fatal**: malformed lines are logged and skipped, so a page with a
//! bad line still loads its other rows. Input and terminal errors are fatal and propagate to
//! the top-level handler.

use std::path::PathBuf;
use thiserror::Error;

/// Errors encountered when reading row data.
#[derive(Debug, Error)]
pub enum InputError {
    /// The specified row file does not exist at the given path.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use gridwin::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.jsonl")
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.jsonl"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The filesystem path that was not found.
        path: PathBuf,
    },

    /// No input was provided and there is nothing to display.
    #[error("No input source: provide a JSONL file path")]
    NoInput,

    /// Generic I/O error reading from the input file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors encountered when parsing one JSONL row.
///
/// Every variant carries the 1-based line number so the warning written to the log file
/// points at the offending line.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A line contains syntactically invalid JSON.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridwin::model::error::ParseError;
    ///
    /// let err = ParseError::InvalidJson {
    ///     line: 42,
    ///     message: "expected value".to_string()
    /// };
    /// assert!(err.to_string().contains("line 42"));
    /// ```
    #[error("Invalid JSON at line {line}: {message}")]
    InvalidJson {
        /// 1-based line number in the JSONL file.
        line: usize,
        /// Parser message from `serde_json`.
        message: String,
    },

    /// A line parsed as JSON but is not an object, so it has no columns.
    #[error("Row at line {line} is not a JSON object")]
    NotAnObject {
        /// 1-based line number in the JSONL file.
        line: usize,
    },
}
