//! JSONL row parser.
//!
//! One line is one row: a JSON object whose keys are column names. The row id comes from
//! the object's `id` field when it is a non-empty string or a number; otherwise the row's
//! position is used.

use crate::model::{ParseError, Record, RowDescriptor, RowId};
use serde_json::Value;

/// Field holding the caller's row id.
pub const ID_FIELD: &str = "id";

/// Parse one JSONL line into a row.
///
/// # Arguments
/// - `line`: raw line, without the trailing newline
/// - `line_number`: 1-based line number, for error messages
/// - `index`: position the row will take in the table, for the fallback id
///
/// # Errors
/// [`ParseError::InvalidJson`] for malformed JSON, [`ParseError::NotAnObject`] for valid
/// JSON that is not an object.
pub fn parse_row(
    line: &str,
    line_number: usize,
    index: usize,
) -> Result<RowDescriptor<Record>, ParseError> {
    let value: Value = serde_json::from_str(line).map_err(|e| ParseError::InvalidJson {
        line: line_number,
        message: e.to_string(),
    })?;

    let Value::Object(record) = value else {
        return Err(ParseError::NotAnObject { line: line_number });
    };

    let id = row_id(&record).unwrap_or_else(|| RowId::positional(index, None));
    Ok(RowDescriptor::new(id, record))
}

fn row_id(record: &Record) -> Option<RowId> {
    match record.get(ID_FIELD)? {
        Value::String(s) => RowId::new(s.as_str()).ok(),
        Value::Number(n) => RowId::new(n.to_string()).ok(),
        _ => None,
    }
}
