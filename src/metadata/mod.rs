//! Metadata Module
//!
//! The metadata collection: one JSON document describing every upload.
//!
//! ## Responsibilities
//! - Create the document on first start (empty collection)
//! - Read it back tolerantly (absent or corrupt document reads as empty)
//! - Replace it as a whole on every append
//! - Validate individual entries into `FileRecord`s (one layer up from the store)
//!
//! ## Document Format
//! ```text
//! [
//!   {
//!     "id": "0b6f4c1e-8a4e-4c4f-9f39-3d0c2b1a7e55",
//!     "file_name": "report.pdf",
//!     "size": 48213,
//!     "timestamp": "2024-05-01T10:20:30.123456Z"
//!   },
//!   ... (upload order)
//! ]
//! ```

mod record;
mod store;

pub use record::{FileRecord, Validation};
pub use store::MetadataStore;

/// One untyped entry of the metadata document
pub type RawEntry = serde_json::Value;
