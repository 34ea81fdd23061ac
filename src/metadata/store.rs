//! Metadata Store
//!
//! Persists the metadata collection as a single JSON document.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{FileShareError, Result};

use super::RawEntry;

/// Reads and replaces the metadata document
///
/// Entries are untyped here; this layer never looks inside them.
#[derive(Debug, Clone)]
pub struct MetadataStore {
    /// Location of the JSON document
    path: PathBuf,
}

impl MetadataStore {
    /// Create a store for the document at `path` (nothing is touched yet)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create the document with an empty collection if it does not exist
    ///
    /// Idempotent: an existing document, valid or not, is left alone.
    pub fn initialize(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        if !self.path.exists() {
            tracing::debug!("Creating metadata document at {}", self.path.display());
            self.write_all(&[])?;
        }

        Ok(())
    }

    /// Read every entry in the document
    ///
    /// A missing document, or one that is not a JSON array, reads as empty so
    /// that metadata corruption never blocks uploads or listing. Other I/O
    /// failures are returned.
    pub fn read_all(&self) -> Result<Vec<RawEntry>> {
        let contents = match fs::read(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice::<Value>(&contents) {
            Ok(Value::Array(entries)) => Ok(entries),
            Ok(_) => {
                tracing::warn!(
                    "Metadata document {} is not a JSON array; treating as empty",
                    self.path.display()
                );
                Ok(Vec::new())
            }
            Err(e) => {
                tracing::warn!(
                    "Metadata document {} is not valid JSON ({}); treating as empty",
                    self.path.display(),
                    e
                );
                Ok(Vec::new())
            }
        }
    }

    /// Replace the whole document with `entries`
    ///
    /// Written to a sibling temp file and renamed over the target, so readers
    /// see either the old document or the new one.
    pub fn write_all(&self, entries: &[RawEntry]) -> Result<()> {
        let json = serde_json::to_vec_pretty(entries)
            .map_err(|e| FileShareError::Serialization(e.to_string()))?;

        let tmp_path = self.temp_path();
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }

    /// Get the document path
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
