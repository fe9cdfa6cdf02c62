//! Axum route handler for the analysis API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use tracing::{debug, info};

use crate::config::Config;
use crate::errors::AppError;
use crate::matching::keywords::KeywordOptions;
use crate::matching::match_resume;
use crate::models::analysis::AnalyzeResponse;
use crate::resume::parse_pdf_resume;
use crate::state::AppState;

/// Multipart field names accepted for the resume upload.
const RESUME_FIELDS: &[&str] = &["resume_file", "file", "resume"];

#[derive(Debug)]
struct ResumeUpload {
    bytes: Bytes,
    file_name: Option<String>,
}

#[derive(Debug, Default)]
struct AnalyzeForm {
    resume: Option<ResumeUpload>,
    job_text: Option<String>,
    max_k: Option<String>,
    custom_keywords: Option<String>,
}

/// POST /analyze
///
/// Multipart fields: `resume_file` (PDF), `job_text`, optional `max_k` and
/// optional `custom_keywords` (comma or newline separated).
/// Inputs are validated before the PDF is parsed, so a blank job text never
/// reaches extraction or scoring.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let form = read_form(multipart).await?;

    let upload = form
        .resume
        .filter(|upload| !upload.bytes.is_empty())
        .ok_or_else(|| AppError::EmptyInput("A resume PDF file is required".to_string()))?;
    let job_text = form
        .job_text
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| {
            AppError::EmptyInput("Job description text must not be blank".to_string())
        })?;
    let max_k = parse_max_k(form.max_k.as_deref(), &state.config)?;

    let resume = parse_pdf_resume(upload.bytes, upload.file_name.as_deref(), &state.lexicon).await?;

    let options = KeywordOptions {
        max_k,
        title_weight: state.config.title_weight,
        custom_keywords: split_custom_keywords(form.custom_keywords.as_deref()),
    };
    let result = match_resume(
        &resume,
        &job_text,
        options,
        &state.lexicon,
        state.scorer.as_ref(),
    )?;

    info!(
        keywords = result.meta.num_keywords,
        in_skills = result.in_skills.len(),
        in_text = result.in_text_not_skills.len(),
        missing = result.missing.len(),
        overall = result.scores.overall,
        "Resume analyzed"
    );

    Ok(Json(AnalyzeResponse::new(resume, result)))
}

async fn read_form(mut multipart: Multipart) -> Result<AnalyzeForm, AppError> {
    let mut form = AnalyzeForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            n if RESUME_FIELDS.contains(&n) => {
                let file_name = field.file_name().map(str::to_string);
                let bytes = field.bytes().await?;
                debug!(size = bytes.len(), ?file_name, "Resume upload received");
                form.resume = Some(ResumeUpload { bytes, file_name });
            }
            "job_text" => form.job_text = Some(field.text().await?),
            "max_k" => form.max_k = Some(field.text().await?),
            "custom_keywords" => form.custom_keywords = Some(field.text().await?),
            other => debug!("Ignoring unknown multipart field '{other}'"),
        }
    }

    Ok(form)
}

/// Absent or blank → configured default; otherwise an integer in `1..=max_k_limit`.
fn parse_max_k(raw: Option<&str>, config: &Config) -> Result<usize, AppError> {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Ok(config.default_max_k);
    };

    let max_k: usize = raw
        .parse()
        .map_err(|_| AppError::Validation(format!("max_k must be a positive integer, got '{raw}'")))?;

    if max_k == 0 || max_k > config.max_k_limit {
        return Err(AppError::Validation(format!(
            "max_k must be between 1 and {}, got {max_k}",
            config.max_k_limit
        )));
    }
    Ok(max_k)
}

fn split_custom_keywords(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(|c: char| c == ',' || c == '\n')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}
