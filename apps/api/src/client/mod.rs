/// HTTP client for a running analysis service.
///
/// Used by the `analyze` subcommand; speaks the same multipart contract the
/// `/analyze` route accepts and returns the typed response.
use reqwest::{
    multipart::{Form, Part},
    Client,
};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::models::analysis::AnalyzeResponse;

const REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}, {code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: String,
    message: String,
}

#[derive(Clone)]
pub struct AnalyzerClient {
    client: Client,
    base_url: String,
}

impl AnalyzerClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub async fn health(&self) -> Result<Value, ClientError> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        let body = read_success(response).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Uploads the resume as `resume_file` together with the job text.
    pub async fn analyze(
        &self,
        resume_bytes: Vec<u8>,
        file_name: &str,
        job_text: &str,
        max_k: Option<usize>,
        custom_keywords: &[String],
    ) -> Result<AnalyzeResponse, ClientError> {
        let resume_part = Part::bytes(resume_bytes)
            .file_name(file_name.to_string())
            .mime_str("application/pdf")?;

        let mut form = Form::new()
            .part("resume_file", resume_part)
            .text("job_text", job_text.to_string());
        if let Some(max_k) = max_k {
            form = form.text("max_k", max_k.to_string());
        }
        if !custom_keywords.is_empty() {
            form = form.text("custom_keywords", custom_keywords.join(","));
        }

        let response = self
            .client
            .post(format!("{}/analyze", self.base_url))
            .multipart(form)
            .send()
            .await?;

        let body = read_success(response).await?;
        let analysis: AnalyzeResponse = serde_json::from_str(&body)?;

        debug!(
            keywords = analysis.meta.num_keywords,
            overall = analysis.scores.overall,
            "Analysis received"
        );
        Ok(analysis)
    }
}

/// Returns the body of a 2xx response, or the service's error envelope as `ClientError::Api`.
async fn read_success(response: reqwest::Response) -> Result<String, ClientError> {
    let status = response.status();
    let body = response.text().await?;

    if status.is_success() {
        return Ok(body);
    }

    let (code, message) = match serde_json::from_str::<ApiErrorEnvelope>(&body) {
        Ok(envelope) => (envelope.error.code, envelope.error.message),
        Err(_) => ("UNKNOWN".to_string(), body),
    };
    Err(ClientError::Api {
        status: status.as_u16(),
        code,
        message,
    })
}
