//! Storage Manager
//!
//! Coordinates content blobs and the metadata collection.
//!
//! ## Responsibilities
//! - Validate upload size before anything is written
//! - Persist content first, then append metadata
//! - Resolve downloads only when both halves are present and valid
//! - Filter corrupt metadata entries out of every read path

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use parking_lot::Mutex;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{FileShareError, Result};
use crate::metadata::{FileRecord, MetadataStore};

use super::BlobStore;

/// A resolved download: the record plus the full content
#[derive(Debug, Clone)]
pub struct Download {
    pub record: FileRecord,
    pub content: Bytes,
}

/// Read-only consistency report over blobs and metadata
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrityReport {
    /// Entries that validate into a FileRecord
    pub valid_records: usize,

    /// Entries dropped by validation
    pub malformed_entries: usize,

    /// Valid records whose blob is gone
    pub missing_blobs: Vec<String>,

    /// Blobs with no metadata entry (e.g. crash between write and append)
    pub orphaned_blobs: Vec<String>,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.malformed_entries == 0 && self.missing_blobs.is_empty() && self.orphaned_blobs.is_empty()
    }
}

/// Manages uploads and lookups over a blob directory and a metadata document
///
/// ## Concurrency:
/// - Blob writes go to fresh, unique paths and need no coordination
/// - `append_lock` serializes the metadata read-modify-write inside this
///   process, so concurrent uploads never drop each other's entries
/// - Nothing guards against a second process writing the same document
pub struct StorageManager {
    /// Content area (one blob per id)
    blobs: BlobStore,

    /// Metadata document
    metadata: MetadataStore,

    /// Upload ceiling in bytes
    max_upload_size: usize,

    /// Serializes read_all + push + write_all
    append_lock: Mutex<()>,
}

impl StorageManager {
    /// Open or create storage described by `config`
    ///
    /// On startup:
    /// 1. Create the content directory if it doesn't exist
    /// 2. Create the metadata document (empty collection) if it doesn't exist
    pub fn open(config: &Config) -> Result<Self> {
        let blobs = BlobStore::open(&config.storage_dir)?;

        let metadata = MetadataStore::new(&config.metadata_path);
        metadata.initialize()?;

        Ok(Self {
            blobs,
            metadata,
            max_upload_size: config.max_upload_size,
            append_lock: Mutex::new(()),
        })
    }

    /// Store `content` under a fresh identifier and record it
    ///
    /// Steps:
    /// 1. Reject oversized content (nothing written)
    /// 2. Write the blob
    /// 3. Stamp the record
    /// 4. Append to the metadata collection
    ///
    /// A failure after step 2 leaves an orphaned blob, never a record that
    /// points at nothing.
    pub fn upload(&self, content: &[u8], file_name: &str) -> Result<FileRecord> {
        // Step 1: Size check precedes any persistence
        if content.len() > self.max_upload_size {
            tracing::debug!(
                "Rejecting upload of {} bytes (limit {})",
                content.len(),
                self.max_upload_size
            );
            return Err(FileShareError::PayloadTooLarge {
                limit: self.max_upload_size,
            });
        }

        // Step 2: Content first
        let id = Uuid::new_v4().to_string();
        self.blobs.write(&id, content)?;

        // Step 3: Timestamp once the content is on disk
        let record = FileRecord::new(id, file_name, content.len() as u64);

        // Step 4: Append metadata
        self.append(&record)?;

        tracing::info!(
            "Stored {} ({} bytes) as {}",
            record.file_name,
            record.size,
            record.id
        );

        Ok(record)
    }

    /// Path of the content blob for `id`, if it exists
    ///
    /// Says nothing about metadata; see `download` for the combined check.
    pub fn locate_content(&self, id: &str) -> Option<PathBuf> {
        self.blobs.locate(id)
    }

    /// Every valid record, in upload order
    ///
    /// Entries that fail validation are skipped.
    pub fn list_all(&self) -> Result<Vec<FileRecord>> {
        let entries = self.metadata.read_all()?;

        Ok(entries
            .iter()
            .filter_map(|entry| FileRecord::validate(entry).into_record())
            .collect())
    }

    /// Record for `id`
    ///
    /// Returns:
    /// - `Ok(Some(record))` — first entry with this id, and it is valid
    /// - `Ok(None)` — no entry with this id
    /// - `Ok(None)` — the first entry with this id is malformed
    ///
    /// The last case is intentional: a corrupt record is indistinguishable
    /// from one that was never uploaded. Scanning stops at the first id match
    /// even if it is malformed.
    pub fn get_metadata(&self, id: &str) -> Result<Option<FileRecord>> {
        let entries = self.metadata.read_all()?;

        let first_match = entries
            .iter()
            .find(|entry| entry.get("id").and_then(|v| v.as_str()) == Some(id));

        Ok(first_match.and_then(|entry| FileRecord::validate(entry).into_record()))
    }

    /// Resolve a download
    ///
    /// Both the blob and a valid record must exist; otherwise `NotFound`,
    /// without saying which half was missing.
    pub fn download(&self, id: &str) -> Result<Download> {
        if self.locate_content(id).is_none() {
            return Err(FileShareError::file_not_found());
        }

        let record = self
            .get_metadata(id)?
            .ok_or_else(FileShareError::file_not_found)?;

        let content = self
            .blobs
            .read(id)?
            .ok_or_else(FileShareError::file_not_found)?;

        Ok(Download {
            record,
            content: Bytes::from(content),
        })
    }

    /// Compare blobs against metadata without changing either
    pub fn verify(&self) -> Result<IntegrityReport> {
        let entries = self.metadata.read_all()?;
        let blob_ids = self.blobs.ids()?;

        let mut report = IntegrityReport::default();
        let mut known_ids = HashSet::with_capacity(entries.len());

        for entry in &entries {
            if let Some(id) = entry.get("id").and_then(|v| v.as_str()) {
                known_ids.insert(id);
            }

            match FileRecord::validate(entry).into_record() {
                Some(record) => {
                    report.valid_records += 1;
                    if self.blobs.locate(&record.id).is_none() {
                        report.missing_blobs.push(record.id);
                    }
                }
                None => report.malformed_entries += 1,
            }
        }

        report.orphaned_blobs = blob_ids
            .into_iter()
            .filter(|id| !known_ids.contains(id.as_str()))
            .collect();

        Ok(report)
    }

    /// Get the upload ceiling (in bytes)
    pub fn max_upload_size(&self) -> usize {
        self.max_upload_size
    }

    /// Get the content directory
    pub fn storage_dir(&self) -> &Path {
        self.blobs.dir()
    }

    /// Get the metadata document path
    pub fn metadata_path(&self) -> &Path {
        self.metadata.path()
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Append one record to the metadata document
    fn append(&self, record: &FileRecord) -> Result<()> {
        let _guard = self.append_lock.lock();

        let mut entries = self.metadata.read_all()?;
        entries.push(record.to_entry()?);
        self.metadata.write_all(&entries)
    }
}
