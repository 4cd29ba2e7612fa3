use serde_json::Value;
use thiserror::Error;

use crate::edit::{EditError, apply_update};
use crate::path::{Segment, format_path};
use crate::rows::{FieldRow, normalize_rows, rows_at};
use crate::store::{DocumentStore, StoreError};

/// Everything a host needs to present one node for editing: the locator
/// label, the derived rows, and the seeded edit buffer. A view is a
/// disposable projection of the document; reopen to refresh it.
#[derive(Debug, Clone)]
pub struct NodeView {
    pub path: Vec<Segment>,
    pub label: String,
    pub rows: Vec<FieldRow>,
    pub buffer: String,
}

impl NodeView {
    /// Open the node at `path`. A missing node opens with no rows and an
    /// empty-object buffer, so saving an edit there creates it.
    pub fn open(root: &Value, path: &[Segment]) -> Self {
        let rows = rows_at(root, path).unwrap_or_default();
        let buffer = normalize_rows(Some(&rows));
        Self {
            path: path.to_vec(),
            label: format_path(path),
            rows,
            buffer,
        }
    }
}

/// Where save outcomes land. Hosts decide presentation (status line, toast,
/// stderr).
pub trait Notifier {
    fn info(&mut self, message: &str);
    fn error(&mut self, message: &str);
}

/// Keeps only the most recent message, like a status bar.
#[derive(Debug, Default, Clone)]
pub struct StatusLine {
    pub last: String,
}

impl Notifier for StatusLine {
    fn info(&mut self, message: &str) {
        self.last = message.to_string();
    }

    fn error(&mut self, message: &str) {
        self.last = message.to_string();
    }
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error(transparent)]
    Edit(#[from] EditError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The full save flow: parse the edited buffer, apply it into the stored
/// document at `path`, persist the replacement text. Nothing is written on
/// failure; the store keeps its prior contents.
pub fn apply_edit(
    store: &mut dyn DocumentStore,
    path: &[Segment],
    edited: &str,
) -> Result<(), SaveError> {
    let new_value: Value = serde_json::from_str(edited).map_err(EditError::Parse)?;
    let document = store.contents()?;
    let updated = apply_update(&document, path, new_value)?;
    store.set_contents(&updated)?;
    Ok(())
}

/// [`apply_edit`] with outcomes routed to the notification sink; returns
/// whether the save went through. Invalid syntax is reported distinctly from
/// other failures so the user knows to correct the buffer.
pub fn save_node(
    store: &mut dyn DocumentStore,
    path: &[Segment],
    edited: &str,
    notify: &mut dyn Notifier,
) -> bool {
    match apply_edit(store, path, edited) {
        Ok(()) => {
            notify.info(&format!("Updated {}", format_path(path)));
            true
        }
        Err(SaveError::Edit(EditError::Parse(e))) => {
            notify.error(&format!("Invalid JSON: {}", e));
            false
        }
        Err(e) => {
            notify.error(&format!("Failed to update: {}", e));
            false
        }
    }
}
