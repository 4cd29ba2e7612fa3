//! jnode-core: data model and editing logic for focused JSON node editing
//!
//! This crate focuses on a small, well-factored surface:
//! - Path segments and the `$["key"][0]` locator notation (format + parse)
//! - Row projection of a node and edit-buffer normalization
//! - Path-based document updates with auto-vivification
//! - Document store trait with in-memory and file-backed owners
//! - Host-side helpers (node view, save flow, notification sink)
//!
pub mod edit;
pub mod editor;
pub mod path;
pub mod rows;
pub mod store;

pub use edit::{EditError, apply_update, set_at_path, to_canonical};
pub use editor::{NodeView, Notifier, SaveError, StatusLine, apply_edit, save_node};
pub use path::{PathError, Segment, format_path, parse_path};
pub use rows::{FieldRow, RowKind, kind_of, normalize_rows, rows_at, value_at};
pub use store::{DocumentStore, FileStore, MemoryStore, StoreError};
