//! Storage Module
//!
//! Uploaded content and its metadata, kept side by side.
//!
//! ## Responsibilities
//! - Persist uploaded bytes verbatim, one blob per identifier
//! - Keep the metadata collection in step with the blobs
//! - Tolerate either half going missing or corrupt without failing
//!
//! ## On-Disk Layout
//! ```text
//! {storage_dir}/
//! ├── {id}              (raw content, no extension)
//! └── ...
//! {metadata_path}       (JSON array, one object per upload)
//! ```
//!
//! Write ordering: blob first, metadata second. The worst a crash can leave
//! behind is an orphaned blob.

mod blob;
mod manager;

pub use blob::BlobStore;
pub use manager::{Download, IntegrityReport, StorageManager};
