//! Row input sources.
//!
//! Rows come from a JSONL file, read one page at a time as the table asks for more.

use crate::model::error::InputError;
use std::path::PathBuf;

pub mod file;

pub use file::{Page, PagedRowSource};

/// Open the row source named on the command line.
///
/// # Errors
///
/// Returns `InputError::NoInput` if no file is provided.
/// Returns `InputError::FileNotFound` if the file does not exist.
pub fn open_source(
    file: Option<PathBuf>,
    page_size: usize,
) -> Result<PagedRowSource<std::io::BufReader<std::fs::File>>, InputError> {
    match file {
        Some(path) => PagedRowSource::open(path, page_size),
        None => Err(InputError::NoInput),
    }
}
