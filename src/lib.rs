//! # fileshare
//!
//! A minimal file-sharing service:
//! - Uploads stored verbatim as blobs keyed by a generated identifier
//! - A JSON metadata document kept alongside, tolerant of corrupt entries
//! - Downloads and listing by identifier
//! - A thin HTTP gateway over the storage layer
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      HTTP Gateway                           │
//! │             POST /files · GET /files[/:id]                  │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   Storage Manager                           │
//! │     size check → blob write → metadata append               │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │ Blob Store  │          │  Metadata   │
//!   │ (one file   │          │   Store     │
//!   │  per id)    │          │ (JSON doc)  │
//!   └─────────────┘          └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod metadata;
pub mod storage;
pub mod web;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{FileShareError, Result};
pub use config::Config;
pub use metadata::FileRecord;
pub use storage::StorageManager;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of fileshare
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
