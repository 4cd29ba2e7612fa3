use serde_json::json;

use jnode_core::{
    DocumentStore, EditError, FieldRow, FileStore, MemoryStore, NodeView, RowKind, Segment,
    StatusLine, apply_update, format_path, kind_of, normalize_rows, parse_path, rows_at,
    save_node, value_at,
};

fn keyed(key: &str, value: serde_json::Value) -> FieldRow {
    FieldRow {
        key: Some(key.to_string()),
        kind: kind_of(&value),
        value,
    }
}

#[test]
fn normalize_absent_or_empty_rows() {
    assert_eq!(normalize_rows(None), "{}");
    assert_eq!(normalize_rows(Some(&[])), "{}");
}

#[test]
fn normalize_single_unkeyed_scalar_is_bare_literal() {
    let rows = [FieldRow {
        key: None,
        value: json!("Ann"),
        kind: RowKind::String,
    }];
    assert_eq!(normalize_rows(Some(&rows)), "\"Ann\"");

    let rows = [FieldRow {
        key: None,
        value: json!(42),
        kind: RowKind::Number,
    }];
    assert_eq!(normalize_rows(Some(&rows)), "42");
}

#[test]
fn normalize_keeps_keyed_scalars_and_skips_containers() {
    let rows = [
        keyed("name", json!("Ann")),
        FieldRow {
            key: Some("tags".into()),
            value: json!(null),
            kind: RowKind::Array,
        },
        keyed("age", json!(30)),
        FieldRow {
            key: None,
            value: json!(true),
            kind: RowKind::Bool,
        },
    ];
    let out = normalize_rows(Some(&rows));
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed, json!({"name": "Ann", "age": 30}));
}

#[test]
fn normalize_indents_with_two_spaces() {
    let rows = [
        keyed("name", json!("Ann")),
        FieldRow {
            key: Some("tags".into()),
            value: json!(null),
            kind: RowKind::Array,
        },
    ];
    assert_eq!(normalize_rows(Some(&rows)), "{\n  \"name\": \"Ann\"\n}");
}

#[test]
fn format_path_root_and_segments() {
    assert_eq!(format_path(&[]), "$");
    let path = [
        Segment::from("users"),
        Segment::from(2usize),
        Segment::from("name"),
    ];
    assert_eq!(format_path(&path), "$[\"users\"][2][\"name\"]");
}

#[test]
fn parse_path_recovers_formatted_segments() {
    let path = vec![
        Segment::from("users"),
        Segment::from(2usize),
        Segment::from("name"),
    ];
    assert_eq!(parse_path(&format_path(&path)).unwrap(), path);
    assert_eq!(parse_path("$").unwrap(), Vec::<Segment>::new());
    assert_eq!(parse_path("").unwrap(), Vec::<Segment>::new());
    assert!(parse_path("$[abc]").is_err());
    assert!(parse_path("$[\"open\"").is_err());
    assert!(parse_path("no brackets").is_err());
}

#[test]
fn update_replaces_root_when_path_is_empty() {
    let doc = r#"{"a": {"b": [1, 2, 3]}, "c": null}"#;
    let parsed: serde_json::Value = serde_json::from_str(doc).unwrap();
    let out = apply_update(doc, &[], parsed.clone()).unwrap();
    let reparsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(reparsed, parsed);
}

#[test]
fn update_at_existing_value_is_idempotent() {
    let doc = r#"{"a": {"b": 5}, "c": [true]}"#;
    let path = [Segment::from("a"), Segment::from("b")];
    let out = apply_update(doc, &path, json!(5)).unwrap();
    let reparsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(
        reparsed,
        serde_json::from_str::<serde_json::Value>(doc).unwrap()
    );
}

#[test]
fn update_autovivifies_missing_containers() {
    let path = [Segment::from("a"), Segment::from(0usize)];
    let out = apply_update("{}", &path, json!("x")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed, json!({"a": ["x"]}));
}

#[test]
fn update_pads_sparse_array_indices_with_null() {
    let path = [Segment::from("a"), Segment::from(2usize)];
    let out = apply_update("{}", &path, json!("x")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed, json!({"a": [null, null, "x"]}));
}

#[test]
fn update_overwrites_scalar_blocking_descent() {
    let path = [Segment::from("a"), Segment::from("b")];
    let out = apply_update(r#"{"a": 1}"#, &path, json!(2)).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed, json!({"a": {"b": 2}}));
}

#[test]
fn update_replaces_containers_wholesale() {
    let doc = r#"{"a": {"keep": 1, "drop": 2}}"#;
    let out = apply_update(doc, &[Segment::from("a")], json!({"only": 3})).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed, json!({"a": {"only": 3}}));
}

#[test]
fn update_rejects_invalid_document_text() {
    let err = apply_update("not json", &[], json!(1)).unwrap_err();
    assert!(matches!(err, EditError::Parse(_)));
}

#[test]
fn value_at_navigates_and_misses() {
    let doc = json!({"a": {"b": [1, 2, 3]}});
    let path = [
        Segment::from("a"),
        Segment::from("b"),
        Segment::from(1usize),
    ];
    assert_eq!(value_at(&doc, &path), Some(&json!(2)));
    assert_eq!(value_at(&doc, &[Segment::from("a"), Segment::from(0usize)]), None);
    assert_eq!(value_at(&doc, &[]), Some(&doc));
}

#[test]
fn rows_at_projects_object_members() {
    let doc = json!({"user": {"name": "Ann", "tags": ["a"], "meta": {"x": 1}, "age": 30}});
    let rows = rows_at(&doc, &[Segment::from("user")]).unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0], keyed("name", json!("Ann")));
    // container members are placeholders with no literal value
    assert_eq!(rows[1].kind, RowKind::Array);
    assert_eq!(rows[1].value, json!(null));
    assert_eq!(rows[2].kind, RowKind::Object);

    let buffer = normalize_rows(Some(&rows));
    let parsed: serde_json::Value = serde_json::from_str(&buffer).unwrap();
    assert_eq!(parsed, json!({"name": "Ann", "age": 30}));
}

#[test]
fn rows_at_scalar_node_is_single_unkeyed_row() {
    let doc = json!({"a": [10, 20]});
    let rows = rows_at(&doc, &[Segment::from("a"), Segment::from(1usize)]).unwrap();
    assert_eq!(
        rows,
        vec![FieldRow {
            key: None,
            value: json!(20),
            kind: RowKind::Number,
        }]
    );
    assert!(rows_at(&doc, &[Segment::from("missing")]).is_none());
}

#[test]
fn node_view_seeds_label_and_buffer() {
    let doc = json!({"users": [{"name": "Ann", "tags": []}]});
    let view = NodeView::open(&doc, &[Segment::from("users"), Segment::from(0usize)]);
    assert_eq!(view.label, "$[\"users\"][0]");
    let parsed: serde_json::Value = serde_json::from_str(&view.buffer).unwrap();
    assert_eq!(parsed, json!({"name": "Ann"}));

    // a missing node still opens, with an editable empty buffer
    let view = NodeView::open(&doc, &[Segment::from("nope")]);
    assert!(view.rows.is_empty());
    assert_eq!(view.buffer, "{}");
}

#[test]
fn save_node_persists_and_reports() {
    let mut store = MemoryStore::new(r#"{"users": [{"name": "Ann"}]}"#);
    let mut status = StatusLine::default();
    let path = [
        Segment::from("users"),
        Segment::from(0usize),
        Segment::from("name"),
    ];
    assert!(save_node(&mut store, &path, "\"Beth\"", &mut status));
    assert_eq!(status.last, "Updated $[\"users\"][0][\"name\"]");
    let stored: serde_json::Value =
        serde_json::from_str(&store.contents().unwrap()).unwrap();
    assert_eq!(stored, json!({"users": [{"name": "Beth"}]}));
}

#[test]
fn save_node_with_invalid_buffer_leaves_store_untouched() {
    let original = r#"{"a": 1}"#;
    let mut store = MemoryStore::new(original);
    let mut status = StatusLine::default();
    assert!(!save_node(&mut store, &[Segment::from("a")], "{ not json", &mut status));
    assert!(status.last.starts_with("Invalid JSON:"));
    assert_eq!(store.contents().unwrap(), original);
}

#[test]
fn file_store_backup_on_save() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("doc.json");
    std::fs::write(&p, r#"{"a": 1}"#).unwrap();

    let mut store = FileStore::new(&p).with_backup(true);
    let mut status = StatusLine::default();
    assert!(save_node(&mut store, &[Segment::from("a")], "2", &mut status));

    let text = std::fs::read_to_string(&p).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, json!({"a": 2}));

    let baks: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .flatten()
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("bak"))
        .collect();
    assert_eq!(baks.len(), 1);
    assert_eq!(
        std::fs::read_to_string(baks[0].path()).unwrap(),
        r#"{"a": 1}"#
    );
}
