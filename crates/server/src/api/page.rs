//! Server-rendered upload page.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use tracing::error;

use crate::state::AppState;
use crate::templating::IndexPage;

use super::upload::{process_upload, read_upload};

fn render(state: &AppState, status: StatusCode, page: IndexPage<'_>) -> Response {
    match state.pages.render_index(&page) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            error!(error = %e, "failed to render upload page");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response()
        }
    }
}

fn blank_page(state: &AppState) -> IndexPage<'_> {
    IndexPage {
        max_tokens: state.pipeline.config().max_tokens,
        model: state.pipeline.counter_name(),
        filename: None,
        chunks: &[],
        error: None,
    }
}

// ── GET / ─────────────────────────────────────────

pub async fn index(State(state): State<Arc<AppState>>) -> Response {
    render(&state, StatusCode::OK, blank_page(&state))
}

// ── POST /upload ──────────────────────────────────

/// Form upload: same processing as the JSON endpoint, answered with the page
/// listing the generated chunk files (or the error).
pub async fn upload_form(State(state): State<Arc<AppState>>, mut multipart: Multipart) -> Response {
    let outcome = match read_upload(&mut multipart).await {
        Ok(upload) => process_upload(Arc::clone(&state), upload).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(resp) => render(
            &state,
            StatusCode::OK,
            IndexPage {
                filename: Some(resp.filename.as_str()),
                chunks: &resp.chunk_files,
                ..blank_page(&state)
            },
        ),
        Err((status, message)) => render(
            &state,
            status,
            IndexPage {
                error: Some(message.as_str()),
                ..blank_page(&state)
            },
        ),
    }
}
