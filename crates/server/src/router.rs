//! HTTP router construction.
//!
//! Assembles the upload page, JSON API, and static file serving into a single `Router`.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::warn;

use crate::api;
use crate::state::AppState;

fn cors_layer(origin: &str) -> CorsLayer {
    if origin == "*" {
        return CorsLayer::permissive();
    }
    match HeaderValue::from_str(origin) {
        Ok(value) => CorsLayer::new()
            .allow_origin(value)
            .allow_methods(Any)
            .allow_headers(Any),
        Err(e) => {
            warn!(origin, error = %e, "invalid CORS origin, cross-origin requests disabled");
            CorsLayer::new()
        }
    }
}

/// Build the complete application router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    let body_limit = state.config.server.max_upload_bytes();
    let cors = cors_layer(&state.config.server.cors_origin);
    let uploads = ServeDir::new(state.store.upload_dir());

    Router::new()
        .route("/", get(api::index))
        .route("/health", get(api::health))
        .route("/upload", post(api::upload_form))
        .route("/api/upload", post(api::upload_json))
        .nest_service("/static", uploads)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;
    use std::path::Path;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use tokchunk_core::config::StorageConfig;
    use tokchunk_core::Config;
    use tokchunk_ingest::document::testing::sample_pdf;
    use tokchunk_ingest::{ChunkConfig, ChunkPipeline, TokenCounterRef, TokenizerError};

    const BOUNDARY: &str = "tokchunk-test-boundary";

    fn one_per_word() -> TokenCounterRef {
        Arc::new(|w: &str| -> Result<usize, TokenizerError> {
            if w == "poison" {
                Err(TokenizerError::Failed("unencodable".into()))
            } else {
                Ok(1)
            }
        })
    }

    fn test_app(dir: &Path, max_tokens: usize) -> Router {
        let config = Config {
            storage: StorageConfig {
                upload_dir: dir.join("static"),
                chunk_dir: dir.join("chunks"),
            },
            ..Config::default()
        };
        let pipeline = ChunkPipeline::new(ChunkConfig::new(max_tokens), one_per_word()).unwrap();
        let state = AppState::with_pipeline(config, pipeline).unwrap();
        build_router(Arc::new(state))
    }

    fn multipart_body(field: &str, filename: &str, bytes: &[u8]) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/pdf\r\n\r\n");
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn upload_request(uri: &str, field: &str, filename: &str, bytes: &[u8]) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(field, filename, bytes)))
            .unwrap()
    }

    async fn body_string(resp: axum::response::Response) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn body_json(resp: axum::response::Response) -> serde_json::Value {
        serde_json::from_str(&body_string(resp).await).unwrap()
    }

    fn chunk_dir_entries(dir: &Path) -> usize {
        fs::read_dir(dir.join("chunks")).unwrap().count()
    }

    #[tokio::test]
    async fn health_reports_chunking_settings() {
        let tmp = tempfile::tempdir().unwrap();
        let app = test_app(tmp.path(), 7);
        let resp = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["max_tokens"], 7);
        assert_eq!(json["model"], "custom");
        assert_eq!(json["config"]["chunking"]["model_name"], "gpt-4");
    }

    #[tokio::test]
    async fn index_serves_upload_form() {
        let tmp = tempfile::tempdir().unwrap();
        let app = test_app(tmp.path(), 3500);
        let resp = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let html = body_string(resp).await;
        assert!(html.contains("action=\"/upload\""));
        assert!(html.contains("3500 tokens"));
    }

    #[tokio::test]
    async fn json_upload_writes_chunks_and_keeps_original() {
        let tmp = tempfile::tempdir().unwrap();
        let app = test_app(tmp.path(), 3);
        let pdf = sample_pdf(&["one two three four five"]);

        let resp = app
            .oneshot(upload_request("/api/upload", "file", "report.pdf", &pdf))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["filename"], "report.pdf");
        assert_eq!(json["page_count"], 1);
        assert_eq!(json["chunk_count"], 2);
        assert_eq!(
            json["chunk_files"],
            serde_json::json!(["report_chunk_1.txt", "report_chunk_2.txt"])
        );

        let first = fs::read_to_string(tmp.path().join("chunks/report_chunk_1.txt")).unwrap();
        let second = fs::read_to_string(tmp.path().join("chunks/report_chunk_2.txt")).unwrap();
        assert_eq!(first, "one two three");
        assert_eq!(second, "four five");
        assert_eq!(fs::read(tmp.path().join("static/report.pdf")).unwrap(), pdf);
    }

    #[tokio::test]
    async fn form_upload_lists_chunk_files() {
        let tmp = tempfile::tempdir().unwrap();
        let app = test_app(tmp.path(), 2);
        let pdf = sample_pdf(&["alpha bravo charlie"]);

        let resp = app
            .oneshot(upload_request("/upload", "file", "notes.pdf", &pdf))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let html = body_string(resp).await;
        assert!(html.contains("<code>notes_chunk_1.txt</code>"));
        assert!(html.contains("<code>notes_chunk_2.txt</code>"));
        assert!(html.contains("/static/notes.pdf"));
    }

    #[tokio::test]
    async fn non_pdf_is_rejected_without_writing_files() {
        let tmp = tempfile::tempdir().unwrap();
        let app = test_app(tmp.path(), 10);

        let resp = app
            .oneshot(upload_request("/api/upload", "file", "fake.pdf", b"just some text"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body_string(resp).await.contains("Text extraction failed"));
        assert_eq!(chunk_dir_entries(tmp.path()), 0);
        assert!(!tmp.path().join("static/fake.pdf").exists());
    }

    #[tokio::test]
    async fn tokenization_failure_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        let app = test_app(tmp.path(), 10);
        let pdf = sample_pdf(&["fine poison fine"]);

        let resp = app
            .oneshot(upload_request("/api/upload", "file", "bad.pdf", &pdf))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body_string(resp).await.contains("Tokenization failed"));
        assert_eq!(chunk_dir_entries(tmp.path()), 0);
    }

    #[tokio::test]
    async fn blank_pdf_succeeds_with_zero_chunks() {
        let tmp = tempfile::tempdir().unwrap();
        let app = test_app(tmp.path(), 10);
        let pdf = sample_pdf(&["", ""]);

        let resp = app
            .oneshot(upload_request("/upload", "file", "scan.pdf", &pdf))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let html = body_string(resp).await;
        assert!(html.contains("no chunks were produced"));
        assert_eq!(chunk_dir_entries(tmp.path()), 0);
    }

    #[tokio::test]
    async fn missing_file_field_is_bad_request() {
        let tmp = tempfile::tempdir().unwrap();
        let app = test_app(tmp.path(), 10);
        let pdf = sample_pdf(&["text"]);

        let resp = app
            .oneshot(upload_request("/api/upload", "attachment", "x.pdf", &pdf))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn uploaded_files_are_served_back() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("static")).unwrap();
        fs::write(tmp.path().join("static/kept.pdf"), b"%PDF-1.4 kept").unwrap();
        let app = test_app(tmp.path(), 10);

        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/static/kept.pdf")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_string(resp).await, "%PDF-1.4 kept");
    }

    #[test]
    fn cors_layer_builds_for_every_origin_setting() {
        let _ = cors_layer("*");
        let _ = cors_layer("http://localhost:3000");
        let _ = cors_layer("bad\norigin");
    }
}
