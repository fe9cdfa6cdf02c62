pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/analyze", post(handlers::handle_analyze))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::resume::test_pdf::build_pdf;

    const BOUNDARY: &str = "----resume-match-test-boundary";

    enum Part<'a> {
        Text(&'a str, &'a str),
        File(&'a str, &'a str, &'a [u8]),
    }

    fn multipart_body(parts: &[Part]) -> Vec<u8> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part {
                Part::Text(name, value) => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                            .as_bytes(),
                    );
                }
                Part::File(name, file_name, bytes) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                             Content-Type: application/pdf\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(bytes);
                    body.extend_from_slice(b"\r\n");
                }
            }
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    async fn post_analyze(parts: &[Part<'_>]) -> (StatusCode, Value) {
        let app = build_router(AppState::new(Config::default()));
        let request = Request::builder()
            .method("POST")
            .uri("/analyze")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn resume_pdf() -> Vec<u8> {
        build_pdf(&[
            "Jane Doe",
            "jane.doe@example.com | 555-123-4567",
            "",
            "Skills: Python, SQL, Docker",
            "",
            "EXPERIENCE",
            "Built ETL jobs on Kubernetes.",
        ])
    }

    #[tokio::test]
    async fn test_health_ok() {
        let app = build_router(AppState::new(Config::default()));
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_analyze_full_pipeline() {
        let pdf = resume_pdf();
        let (status, json) = post_analyze(&[
            Part::File("resume_file", "jane.pdf", &pdf),
            Part::Text("job_text", "We need Python and AWS experience"),
            Part::Text("max_k", "10"),
        ])
        .await;

        assert_eq!(status, StatusCode::OK, "{json}");
        assert_eq!(json["contact"]["email"], "jane.doe@example.com");
        assert_eq!(json["contact"]["name"], "Jane Doe");
        let in_skills: Vec<&str> = json["in_skills"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert!(in_skills.contains(&"python"), "{json}");
        let missing: Vec<&str> = json["missing"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert!(missing.contains(&"aws"), "{json}");
        assert!(json["scores"]["overall"].as_u64().unwrap() > 0);
        assert_eq!(json["meta"]["num_keywords"], 2);
    }

    #[tokio::test]
    async fn test_non_pdf_upload_is_unsupported_format() {
        let (status, json) = post_analyze(&[
            Part::File("resume_file", "resume.pdf", b"just some plain text"),
            Part::Text("job_text", "Rust engineer"),
        ])
        .await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(json["error"]["code"], "UNSUPPORTED_FORMAT");
        assert!(json.get("scores").is_none());
    }

    #[tokio::test]
    async fn test_docx_extension_is_unsupported_format() {
        let pdf = resume_pdf();
        let (status, json) = post_analyze(&[
            Part::File("resume_file", "resume.docx", &pdf),
            Part::Text("job_text", "Rust engineer"),
        ])
        .await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(json["error"]["code"], "UNSUPPORTED_FORMAT");
    }

    #[tokio::test]
    async fn test_blank_job_text_is_empty_input() {
        let pdf = resume_pdf();
        let (status, json) = post_analyze(&[
            Part::File("resume_file", "jane.pdf", &pdf),
            Part::Text("job_text", "   "),
        ])
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "EMPTY_INPUT");
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_input() {
        let (status, json) = post_analyze(&[Part::Text("job_text", "Rust engineer")]).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "EMPTY_INPUT");
    }

    #[tokio::test]
    async fn test_malformed_max_k_is_validation_error() {
        let pdf = resume_pdf();
        for raw in ["ten", "0", "1000"] {
            let (status, json) = post_analyze(&[
                Part::File("resume_file", "jane.pdf", &pdf),
                Part::Text("job_text", "Rust engineer"),
                Part::Text("max_k", raw),
            ])
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "max_k={raw}");
            assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
        }
    }

    #[tokio::test]
    async fn test_max_k_caps_keywords() {
        let pdf = resume_pdf();
        let (status, json) = post_analyze(&[
            Part::File("file", "jane.pdf", &pdf),
            Part::Text("job_text", "Rust Go Java Kotlin Swift Scala Python"),
            Part::Text("max_k", "3"),
        ])
        .await;
        assert_eq!(status, StatusCode::OK, "{json}");
        assert_eq!(json["keywords"].as_array().unwrap().len(), 3);
    }
}
