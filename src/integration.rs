//! Pure core integration functions.
//!
//! Turns raw JSONL lines into rows for the table. No I/O, so the source and the tests can
//! share it.

use crate::model::{ParseError, Record, RowDescriptor};
use crate::parser;

/// Process JSONL lines into rows.
///
/// Blank lines are skipped without an error and do not consume a row position.
///
/// # Arguments
///
/// * `lines` - Raw JSONL lines to process
/// * `starting_line_number` - Line number of the first line (for error reporting)
/// * `starting_index` - Table position the first parsed row will take
///
/// # Returns
///
/// Tuple of (successfully parsed rows, parse errors)
pub fn process_lines(
    lines: Vec<String>,
    starting_line_number: usize,
    starting_index: usize,
) -> (Vec<RowDescriptor<Record>>, Vec<ParseError>) {
    let mut rows = Vec::new();
    let mut errors = Vec::new();

    for (offset, line) in lines.into_iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let line_number = starting_line_number + offset;
        match parser::parse_row(&line, line_number, starting_index + rows.len()) {
            Ok(row) => rows.push(row),
            Err(err) => errors.push(err),
        }
    }

    (rows, errors)
}
