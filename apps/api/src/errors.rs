use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Multipart error: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Stable machine-readable code for the error body.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
            AppError::Extraction(_) => "EXTRACTION_ERROR",
            AppError::EmptyInput(_) => "EMPTY_INPUT",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Multipart(_) => "MULTIPART_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::UnsupportedFormat(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::Extraction(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::EmptyInput(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Multipart(e) => e.status(),
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::UnsupportedFormat(msg)
            | AppError::Extraction(msg)
            | AppError::EmptyInput(msg)
            | AppError::Validation(msg) => {
                tracing::warn!("Rejected request ({}): {msg}", self.code());
                msg.clone()
            }
            AppError::Multipart(e) => {
                tracing::warn!("Malformed multipart body: {e}");
                e.body_text()
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                "An internal server error occurred".to_string()
            }
        };

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
