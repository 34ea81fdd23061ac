//! Request handlers for the HTTP gateway.
//!
//! Handlers only translate: storage calls run on the blocking pool and their
//! outcomes are mapped to status codes.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, Path, State,
    },
    http::{header, StatusCode},
    response::Response,
    Json,
};
use serde_json::{json, Value};

use crate::error::FileShareError;
use crate::metadata::FileRecord;
use crate::storage::StorageManager;
use crate::web::error::ApiError;

/// Service name reported by `GET /`
pub const SERVICE_NAME: &str = "File Sharing API";

/// Multipart field carrying the upload
const FILE_FIELD: &str = "file";

/// Shared application state.
pub struct AppState {
    /// Storage manager (constructed by the caller and injected here)
    pub storage: Arc<StorageManager>,
}

impl AppState {
    pub fn new(storage: Arc<StorageManager>) -> Self {
        Self { storage }
    }
}

/// Run a storage call on the blocking pool.
async fn run_blocking<T, F>(f: F) -> Result<T, FileShareError>
where
    F: FnOnce() -> crate::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| FileShareError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?
}

/// Generate a safe Content-Disposition header value for file downloads.
///
/// The stored name is client-supplied and never sanitized on the way in, so
/// control characters, quotes and backslashes are stripped here. Non-ASCII
/// names get an RFC 5987 `filename*` parameter.
fn content_disposition_header(filename: &str) -> String {
    let sanitized: String = filename
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| match c {
            '"' | '\\' => '_',
            _ => c,
        })
        .collect();

    if filename.is_ascii() && sanitized == filename {
        return format!("attachment; filename=\"{}\"", filename);
    }

    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        sanitized,
        urlencoding::encode(filename)
    )
}

/// Map a multipart read failure. Body-limit overruns are size rejections.
fn multipart_error(status: StatusCode, limit: usize) -> ApiError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        FileShareError::PayloadTooLarge { limit }.into()
    } else {
        ApiError::bad_request("Invalid multipart data")
    }
}

/// GET / - Service name and version.
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": SERVICE_NAME,
        "version": crate::VERSION,
    }))
}

/// POST /files - Upload a file.
///
/// Request body: multipart/form-data with a "file" field.
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<FileRecord>), ApiError> {
    let limit = state.storage.max_upload_size();

    let mut multipart = multipart.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            multipart_error(rejection.status(), limit)
        } else {
            ApiError::unprocessable("No file provided")
        }
    })?;

    let on_read_error = |e: MultipartError| {
        tracing::warn!("Failed to read multipart body: {}", e);
        multipart_error(e.status(), limit)
    };

    let mut upload = None;
    while let Some(field) = multipart.next_field().await.map_err(on_read_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        // A part without a filename is a form value, not a file
        let Some(file_name) = field.file_name().map(str::to_string) else {
            break;
        };
        let content = field.bytes().await.map_err(on_read_error)?;
        upload = Some((file_name, content));
        break;
    }

    let (file_name, content) = upload.ok_or_else(|| ApiError::unprocessable("No file provided"))?;

    let storage = Arc::clone(&state.storage);
    let record = run_blocking(move || storage.upload(&content, &file_name))
        .await
        .map_err(ApiError::upload_failed)?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /files - Metadata for every valid upload, in upload order.
pub async fn list_files(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<FileRecord>>, ApiError> {
    let storage = Arc::clone(&state.storage);
    let records = run_blocking(move || storage.list_all()).await?;
    Ok(Json(records))
}

/// GET /files/:id - Download a file.
///
/// 404 unless both the blob and a valid metadata record exist.
pub async fn download_file(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response<Body>, ApiError> {
    let storage = Arc::clone(&state.storage);
    let download = run_blocking(move || storage.download(&id)).await?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition_header(&download.record.file_name),
        )
        .header(header::CONTENT_LENGTH, download.content.len())
        .body(Body::from(download.content))
        .map_err(|e| {
            tracing::error!("Failed to build download response: {}", e);
            ApiError::internal("Failed to build response")
        })
}
