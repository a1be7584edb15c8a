//! Row payload read from JSONL input.

use serde_json::Value;

/// One input row: column name to value.
pub type Record = serde_json::Map<String, Value>;

/// Text shown in a cell for `value`.
///
/// Strings are shown without quotes and `null` as an empty cell; everything else uses its
/// compact JSON form.
pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Column names in first-seen order across `records`.
pub fn column_names<'a>(records: impl IntoIterator<Item = &'a Record>) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for record in records {
        for key in record.keys() {
            if !names.iter().any(|n| n == key) {
                names.push(key.clone());
            }
        }
    }
    names
}
