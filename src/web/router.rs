//! Router configuration for the HTTP gateway.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::handlers::{download_file, list_files, root, upload_file, AppState};

/// Allowance for multipart boundaries and part headers on top of the content
/// limit. Bodies past this are cut off by the extractor; anything between the
/// content limit and this reaches the storage manager, which rejects it.
pub const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Create the main router.
pub fn create_router(state: Arc<AppState>) -> Router {
    let body_limit = state
        .storage
        .max_upload_size()
        .saturating_add(MULTIPART_OVERHEAD);

    Router::new()
        .route("/", get(root))
        .route("/files", post(upload_file).get(list_files))
        .route("/files/:id", get(download_file))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
