//! JSON file persistence for the configuration document.
//!
//! A [`JsonStore`] is bound to one path and moves whole documents in and out
//! of it. Saves are plain overwrites: no tmp-file + rename, no locking. The
//! file is pretty-printed so it stays pleasant to hand-edit.
//!
//! # Why is a missing file not fatal? (for beginners)
//!
//! The first time a program using this library runs, no configuration file
//! exists yet. [`JsonStore::load`] reports that as [`StoreError::NotFound`]
//! so the caller can start from an empty document and create the file on the
//! first save. A file that exists but cannot be parsed is a different
//! situation: silently replacing it would destroy whatever the user had, so
//! that case is always surfaced as [`StoreError::Corrupt`].

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::store::document::Document;

/// Error type for document file operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No file exists at the store path. Recoverable: treat it as an empty
    /// document and create the file on the first save.
    #[error("no configuration file at {path}")]
    NotFound { path: PathBuf },

    /// The file exists but does not hold a module → field → value document.
    #[error("configuration file {path} is not a valid document: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A file system I/O error occurred.
    #[error("I/O error accessing configuration at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document could not be rendered as JSON.
    #[error("failed to serialize configuration document: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// File-backed store for a [`Document`], bound to one path.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    /// Creates a store bound to `path`. No I/O happens until load or save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the backing file.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the file does not exist (the
    /// caller's designed recovery path), [`StoreError::Corrupt`] when it
    /// exists but is not a well-formed document, and [`StoreError::Io`] for
    /// other file-system failures.
    pub fn load(&self) -> Result<Document, StoreError> {
        // Raw bytes, not a string read: malformed UTF-8 is a corrupt
        // document, not an I/O failure.
        let content = match fs::read(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound {
                    path: self.path.clone(),
                });
            }
            Err(e) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };

        let document: Document =
            serde_json::from_slice(&content).map_err(|source| StoreError::Corrupt {
                path: self.path.clone(),
                source,
            })?;
        debug!(
            "loaded {} module entries from {}",
            document.len(),
            self.path.display()
        );
        Ok(document)
    }

    /// Writes `document` to the backing file, replacing its whole content.
    ///
    /// Creates missing parent directories first. The write itself is a plain
    /// overwrite; a crash mid-write can leave a truncated file.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] for file-system failures and
    /// [`StoreError::Serialize`] if the document cannot be rendered.
    pub fn save(&self, document: &Document) -> Result<(), StoreError> {
        // A bare filename has an empty parent; nothing to create then.
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir).map_err(|source| StoreError::Io {
                    path: dir.to_path_buf(),
                    source,
                })?;
            }
        }

        let content = serde_json::to_string_pretty(document)?;
        fs::write(&self.path, content).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!(
            "wrote {} module entries to {}",
            document.len(),
            self.path.display()
        );
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
