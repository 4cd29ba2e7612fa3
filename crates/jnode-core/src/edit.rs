use serde_json::{Map, Value};
use thiserror::Error;

use crate::path::Segment;

#[derive(Debug, Error)]
pub enum EditError {
    /// The supplied text is not syntactically valid JSON.
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    /// Anything else that goes wrong while applying an update.
    #[error("update failed: {0}")]
    Update(String),
}

/// Canonical textual form: 2-space indented JSON.
pub fn to_canonical(value: &Value) -> Result<String, EditError> {
    serde_json::to_string_pretty(value).map_err(|e| EditError::Update(e.to_string()))
}

/// Apply `new_value` into `document_text` at `path` and return the updated
/// document text. Parsing happens before any navigation or mutation, so
/// invalid input never yields partial output. An empty path means the new
/// value is the new document root.
pub fn apply_update(
    document_text: &str,
    path: &[Segment],
    new_value: Value,
) -> Result<String, EditError> {
    let mut root: Value = serde_json::from_str(document_text)?;
    if path.is_empty() {
        return to_canonical(&new_value);
    }
    set_at_path(&mut root, path, new_value);
    to_canonical(&root)
}

/// Assign `new_value` at `path`, creating missing intermediates on the way:
/// an array when the step is an index, an object when it is a key. A scalar
/// (or wrong-shaped container) in the way of a required descent is replaced
/// by the freshly created container: last write wins, structure over legacy
/// value. The final segment assigns outright, never merges.
pub fn set_at_path(slot: &mut Value, path: &[Segment], new_value: Value) {
    let Some((seg, rest)) = path.split_first() else {
        *slot = new_value;
        return;
    };
    match seg {
        Segment::Key(key) => {
            if !matches!(slot, Value::Object(_)) {
                *slot = Value::Object(Map::new());
            }
            if let Value::Object(map) = slot {
                let child = map.entry(key.clone()).or_insert(Value::Null);
                set_at_path(child, rest, new_value);
            }
        }
        Segment::Index(index) => {
            if !matches!(slot, Value::Array(_)) {
                *slot = Value::Array(Vec::new());
            }
            if let Value::Array(arr) = slot {
                if arr.len() <= *index {
                    arr.resize(*index + 1, Value::Null);
                }
                set_at_path(&mut arr[*index], rest, new_value);
            }
        }
    }
}
