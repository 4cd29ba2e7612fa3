use serde_json::{Map, Value};

use crate::path::Segment;

/// Kind tag for a displayed field row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Null,
    Bool,
    Number,
    String,
    Object,
    Array,
}

/// One displayed field of a node: an optional key (absent for a single
/// unkeyed scalar row), a value, and a kind tag. Container rows
/// (`Object`/`Array`) are structural placeholders: their `value` carries no
/// literal and is never inlined into canonical output.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRow {
    pub key: Option<String>,
    pub value: Value,
    pub kind: RowKind,
}

pub fn kind_of(v: &Value) -> RowKind {
    match v {
        Value::Null => RowKind::Null,
        Value::Bool(_) => RowKind::Bool,
        Value::Number(_) => RowKind::Number,
        Value::String(_) => RowKind::String,
        Value::Object(_) => RowKind::Object,
        Value::Array(_) => RowKind::Array,
    }
}

// Serializing an owned Value has no failure mode; keep normalization total.
fn pretty(v: &Value) -> String {
    serde_json::to_string_pretty(v).unwrap_or_else(|_| "null".to_string())
}

/// Collapse a node's displayed rows into the canonical edit-buffer text.
///
/// - absent or empty rows yield `{}`
/// - a single unkeyed row yields the scalar's JSON literal, unwrapped
/// - otherwise an object of the keyed scalar rows in row order, 2-space
///   indented; container rows belong to descendant nodes and are skipped
pub fn normalize_rows(rows: Option<&[FieldRow]>) -> String {
    let rows = match rows {
        Some(r) if !r.is_empty() => r,
        _ => return "{}".to_string(),
    };
    if rows.len() == 1 && rows[0].key.is_none() {
        return pretty(&rows[0].value);
    }
    let mut obj = Map::new();
    for row in rows {
        if matches!(row.kind, RowKind::Object | RowKind::Array) {
            continue;
        }
        if let Some(key) = &row.key {
            obj.insert(key.clone(), row.value.clone());
        }
    }
    pretty(&Value::Object(obj))
}

/// Read-only navigation: the value at `path`, if the document has one.
pub fn value_at<'a>(root: &'a Value, path: &[Segment]) -> Option<&'a Value> {
    let mut cur = root;
    for seg in path {
        cur = match (seg, cur) {
            (Segment::Key(key), Value::Object(map)) => map.get(key)?,
            (Segment::Index(index), Value::Array(arr)) => arr.get(*index)?,
            _ => return None,
        };
    }
    Some(cur)
}

/// Derive the row projection for the node at `path`: one keyed row per object
/// member or array element, a single unkeyed row for a scalar. The projection
/// is disposable; rebuild it whenever the node is (re)opened.
pub fn rows_at(root: &Value, path: &[Segment]) -> Option<Vec<FieldRow>> {
    let node = value_at(root, path)?;
    let rows = match node {
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| row_for(Some(k.clone()), v))
            .collect(),
        Value::Array(arr) => arr
            .iter()
            .enumerate()
            .map(|(i, v)| row_for(Some(i.to_string()), v))
            .collect(),
        scalar => vec![FieldRow {
            key: None,
            value: scalar.clone(),
            kind: kind_of(scalar),
        }],
    };
    Some(rows)
}

fn row_for(key: Option<String>, v: &Value) -> FieldRow {
    let kind = kind_of(v);
    let value = match kind {
        RowKind::Object | RowKind::Array => Value::Null,
        _ => v.clone(),
    };
    FieldRow { key, value, kind }
}
