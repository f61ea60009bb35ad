//! PDF upload: extract, chunk, persist.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::{info, warn};

use tokchunk_ingest::{ChunkError, PipelineError};
use tokchunk_storage::{sanitize_filename, StorageError};

use crate::state::AppState;

// ── Request/Response types ────────────────────────

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub filename: String,
    pub page_count: usize,
    pub total_chars: usize,
    pub chunk_count: usize,
    pub chunk_files: Vec<String>,
    pub max_tokens: usize,
    pub model: String,
}

/// A file pulled out of a multipart body.
pub(crate) struct UploadedFile {
    pub filename: String,
    pub bytes: Bytes,
}

// ── Error mapping ─────────────────────────────────

fn pipeline_error(filename: &str, e: PipelineError) -> (StatusCode, String) {
    warn!(filename, error = %e, "upload processing failed");
    match &e {
        PipelineError::Extraction(_) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("Text extraction failed for '{filename}': {e}"),
        ),
        PipelineError::Chunking(ChunkError::Tokenization { .. }) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("Tokenization failed for '{filename}': {e}"),
        ),
        PipelineError::Chunking(ChunkError::Configuration(_)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Chunking is misconfigured: {e}"),
        ),
    }
}

fn storage_error(filename: &str, e: StorageError) -> (StatusCode, String) {
    match &e {
        StorageError::InvalidFilename(_) => (StatusCode::BAD_REQUEST, e.to_string()),
        StorageError::Io(_) => {
            warn!(filename, error = %e, "failed to persist upload");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to store chunks for '{filename}': {e}"),
            )
        }
    }
}

// ── Shared upload flow ────────────────────────────

/// Take the `file` field from a multipart body. Other fields are ignored.
pub(crate) async fn read_upload(multipart: &mut Multipart) -> Result<UploadedFile, (StatusCode, String)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Multipart error: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or("unnamed.pdf").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| (StatusCode::BAD_REQUEST, format!("Failed to read file: {e}")))?;
        return Ok(UploadedFile { filename, bytes });
    }
    Err((StatusCode::BAD_REQUEST, "No file provided".to_string()))
}

/// Run extraction and chunking, then persist the upload and chunk files.
///
/// Nothing is written unless extraction and chunking both succeed. The work
/// is CPU-bound and runs on the blocking pool.
pub(crate) async fn process_upload(
    state: Arc<AppState>,
    upload: UploadedFile,
) -> Result<UploadResponse, (StatusCode, String)> {
    tokio::task::spawn_blocking(move || handle_document(&state, &upload.filename, &upload.bytes))
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Upload task failed: {e}"),
            )
        })?
}

fn handle_document(
    state: &AppState,
    filename: &str,
    bytes: &[u8],
) -> Result<UploadResponse, (StatusCode, String)> {
    let name = sanitize_filename(filename).map_err(|e| storage_error(filename, e))?;
    info!(filename = %name, bytes = bytes.len(), "processing upload");

    let doc = state
        .pipeline
        .process(bytes, &name)
        .map_err(|e| pipeline_error(&name, e))?;

    state
        .store
        .save_upload(&name, bytes)
        .map_err(|e| storage_error(&name, e))?;
    let summary = state
        .store
        .write_chunks(&name, &doc.chunks)
        .map_err(|e| storage_error(&name, e))?;

    if summary.chunk_files.is_empty() {
        warn!(filename = %name, pages = doc.page_count, "document produced no chunks (no extractable text)");
    }

    Ok(UploadResponse {
        filename: summary.filename,
        page_count: doc.page_count,
        total_chars: doc.total_chars,
        chunk_count: summary.chunk_files.len(),
        chunk_files: summary.chunk_files,
        max_tokens: state.pipeline.config().max_tokens,
        model: state.pipeline.counter_name().to_string(),
    })
}

// ── POST /api/upload ──────────────────────────────

/// Upload a PDF and return the generated chunk files as JSON.
pub async fn upload_json(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, (StatusCode, String)> {
    let upload = read_upload(&mut multipart).await?;
    let response = process_upload(state, upload).await?;
    Ok(Json(response))
}
