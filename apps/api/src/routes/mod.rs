pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::generation::handlers;
use crate::state::AppState;

/// Uploads for `/extract` are whole resumes; the axum default of 2 MB is too
/// tight for scanned PDFs.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/vxh", get(health::health_handler))
        .route("/generate", post(handlers::handle_generate))
        .route("/extract", post(handlers::handle_extract))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::generation::retry::RetryPolicy;
    use crate::llm_client::scripted::ScriptedModel;
    use crate::render::flow::{layout, Block};
    use crate::render::pdf::to_pdf_bytes;
    use crate::render::theme::{PageGeometry, BODY};
    use crate::storage::memory::MemoryStore;
    use crate::storage::Publisher;

    fn app(model: ScriptedModel, store: Arc<MemoryStore>, dir: &std::path::Path) -> Router {
        build_router(AppState {
            model: Arc::new(model),
            publisher: Publisher::new(store),
            retry: RetryPolicy::default(),
            config: Config::for_tests(dir.to_path_buf()),
        })
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn generate_request(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/generate")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn multipart_request(field: &str, file_name: &str, content: &[u8]) -> Request<Body> {
        let boundary = "X-RESUME-FLOW-BOUNDARY";
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"; \
                 filename=\"{file_name}\"\r\nContent-Type: application/pdf\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/extract")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_liveness_routes() {
        let dir = tempfile::tempdir().unwrap();
        let router = app(
            ScriptedModel::new(vec![Ok("{}")]),
            Arc::new(MemoryStore::new("https://cdn.test")),
            dir.path(),
        );

        for uri in ["/vxh", "/health"] {
            let response = router
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(json_body(response).await, json!({"status": "ok"}));
        }
    }

    #[tokio::test]
    async fn test_generate_rejects_blank_job_desc() {
        let dir = tempfile::tempdir().unwrap();
        let model = ScriptedModel::new(vec![Ok("{}")]);
        let router = app(model, Arc::new(MemoryStore::new("https://cdn.test")), dir.path());

        let response = router
            .oneshot(generate_request(json!({
                "full_name": "Ada Lovelace",
                "resume_text": "Engineer",
                "job_desc": "   "
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_generate_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(MemoryStore::new("https://cdn.test/resumes"));
        let model = ScriptedModel::new(vec![Ok(
            "```json\n{\"resume\":{\"skills\":[\"Go\",\"Rust\",\"Python\",\"SQL\"]},\
             \"cover_letter\":\"Hello there.\"}\n```",
        )]);
        let router = app(model, store.clone(), dir.path());

        let response = router
            .oneshot(generate_request(json!({
                "full_name": "Ada Lovelace",
                "email": "ada@example.com",
                "resume_text": "Engineer",
                "job_desc": "Backend Engineer",
                "company_name": "Company Name"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert!(body["resume_pdf"]
            .as_str()
            .unwrap()
            .starts_with("https://cdn.test/resumes/resume/ada_lovelace_resume_"));
        assert!(body["cover_pdf"]
            .as_str()
            .unwrap()
            .starts_with("https://cdn.test/resumes/cover_letter/ada_lovelace_cover_letter_"));
        assert_eq!(body["text_cover"], "Hello there.");
        assert_eq!(store.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_generate_model_failure_is_bad_gateway() {
        let dir = tempfile::tempdir().unwrap();
        let model = ScriptedModel::new(vec![Err("unavailable")]);
        let router = app(model, Arc::new(MemoryStore::new("https://cdn.test")), dir.path());

        let response = router
            .oneshot(generate_request(json!({
                "full_name": "Ada Lovelace",
                "resume_text": "Engineer",
                "job_desc": "Backend Engineer"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(json_body(response).await["error"]["code"], "LLM_ERROR");
    }

    #[tokio::test]
    async fn test_generate_storage_failure_is_internal_error() {
        let dir = tempfile::tempdir().unwrap();
        let model = ScriptedModel::new(vec![Ok("{\"resume\":{},\"cover_letter\":\"Hi\"}")]);
        let store = Arc::new(MemoryStore::new("https://cdn.test").failing_uploads());
        let router = app(model, store, dir.path());

        let response = router
            .oneshot(generate_request(json!({
                "full_name": "Ada Lovelace",
                "resume_text": "Engineer",
                "job_desc": "Backend Engineer"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await["error"]["code"], "STORAGE_ERROR");
    }

    #[tokio::test]
    async fn test_extract_returns_text() {
        let dir = tempfile::tempdir().unwrap();
        let router = app(
            ScriptedModel::new(vec![Ok("{}")]),
            Arc::new(MemoryStore::new("https://cdn.test")),
            dir.path(),
        );
        let pdf = to_pdf_bytes(
            &layout(
                PageGeometry::A4,
                &[Block::paragraph("Distributed systems engineer", BODY)],
            ),
            "cv",
        )
        .unwrap();

        let response = router
            .oneshot(multipart_request("file", "cv.pdf", &pdf))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["file_name"], "cv.pdf");
        assert!(body["text"]
            .as_str()
            .unwrap()
            .contains("Distributed systems engineer"));
    }

    #[tokio::test]
    async fn test_extract_missing_file_part() {
        let dir = tempfile::tempdir().unwrap();
        let router = app(
            ScriptedModel::new(vec![Ok("{}")]),
            Arc::new(MemoryStore::new("https://cdn.test")),
            dir.path(),
        );

        let response = router
            .oneshot(multipart_request("attachment", "cv.pdf", b"%PDF-1.7"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_extract_non_pdf_is_unprocessable() {
        let dir = tempfile::tempdir().unwrap();
        let router = app(
            ScriptedModel::new(vec![Ok("{}")]),
            Arc::new(MemoryStore::new("https://cdn.test")),
            dir.path(),
        );

        let response = router
            .oneshot(multipart_request("file", "cv.pdf", b"plain text, not a pdf"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
