//! Web Module
//!
//! Thin HTTP gateway over the storage manager.
//!
//! ## Routes
//! - `POST /files`      multipart upload → 201 + record
//! - `GET  /files`      every valid record, upload order
//! - `GET  /files/:id`  raw content as an attachment
//! - `GET  /`           service name and version

mod error;
mod handlers;
mod router;
mod server;

pub use error::ApiError;
pub use handlers::{AppState, SERVICE_NAME};
pub use router::{create_router, MULTIPART_OVERHEAD};
pub use server::Server;
