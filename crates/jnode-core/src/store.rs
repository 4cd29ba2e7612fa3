use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O: {0}")]
    Io(#[from] io::Error),
}

/// Owner of the authoritative document text. Single logical writer: a host
/// reads the contents, runs an update, and writes the full replacement back.
pub trait DocumentStore {
    fn contents(&self) -> Result<String, StoreError>;
    fn set_contents(&mut self, text: &str) -> Result<(), StoreError>;
}

/// In-memory store for hosts and tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    text: String,
}

impl MemoryStore {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl DocumentStore for MemoryStore {
    fn contents(&self) -> Result<String, StoreError> {
        Ok(self.text.clone())
    }

    fn set_contents(&mut self, text: &str) -> Result<(), StoreError> {
        self.text = text.to_string();
        Ok(())
    }
}

/// File-backed store. With backup enabled, a timestamped `.bak` copy of the
/// current file is written next to it before each save (non-destructive).
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    backup_on_save: bool,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            backup_on_save: false,
        }
    }

    pub fn with_backup(mut self, backup_on_save: bool) -> Self {
        self.backup_on_save = backup_on_save;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn backup(&self) -> Result<PathBuf, StoreError> {
        let parent = self.path.parent().unwrap_or(Path::new("."));
        let name = self
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("document");
        let ts = chrono::Local::now().format("%Y%m%d-%H%M%S");
        let dest = parent.join(format!("{}_{}.bak", name, ts));
        fs::copy(&self.path, &dest)?;
        Ok(dest)
    }
}

impl DocumentStore for FileStore {
    fn contents(&self) -> Result<String, StoreError> {
        Ok(fs::read_to_string(&self.path)?)
    }

    fn set_contents(&mut self, text: &str) -> Result<(), StoreError> {
        if self.backup_on_save && self.path.exists() {
            self.backup()?;
        }
        fs::write(&self.path, text)?;
        Ok(())
    }
}
