//! PDF → plain text.
//!
//! `pdf-extract` is CPU-bound and known to panic on some malformed files, so the
//! async entry point runs it on the blocking pool and turns a panic into
//! `UnsupportedFormat` instead of taking the worker down.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::errors::AppError;

const PDF_MAGIC: &[u8] = b"%PDF-";
/// Readers accept the header anywhere in the first KiB.
const MAGIC_SEARCH_WINDOW: usize = 1024;

static CONTROL_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x1F\x7F]").expect("valid control regex"));
static HORIZONTAL_WS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t\f\v\u{00A0}]+").expect("valid whitespace regex"));

const LIGATURES: &[(&str, &str)] = &[("ﬁ", "fi"), ("ﬂ", "fl"), ("ﬀ", "ff"), ("ﬃ", "ffi"), ("ﬄ", "ffl")];

/// True when `bytes` carry a PDF header signature.
pub fn looks_like_pdf(bytes: &[u8]) -> bool {
    let window = &bytes[..bytes.len().min(MAGIC_SEARCH_WINDOW)];
    window
        .windows(PDF_MAGIC.len())
        .any(|candidate| candidate == PDF_MAGIC)
}

/// Rejects uploads that declare a non-PDF extension or lack the PDF signature.
pub fn ensure_pdf(bytes: &[u8], file_name: Option<&str>) -> Result<(), AppError> {
    if let Some(ext) = file_name.and_then(|n| n.rsplit_once('.')).map(|(_, ext)| ext) {
        if !ext.eq_ignore_ascii_case("pdf") {
            return Err(AppError::UnsupportedFormat(format!(
                "Expected a PDF file, got '.{ext}'"
            )));
        }
    }
    if !looks_like_pdf(bytes) {
        return Err(AppError::UnsupportedFormat(
            "Uploaded file is not a PDF document".to_string(),
        ));
    }
    Ok(())
}

/// Synchronous extraction. Callers on the async runtime should use [`extract_pdf_text`].
pub fn extract_pdf_text_sync(bytes: &[u8]) -> Result<String, AppError> {
    let raw = pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
        AppError::UnsupportedFormat(format!("PDF could not be parsed: {e}"))
    })?;

    let text = normalize_text(&raw);
    if text.is_empty() {
        return Err(AppError::Extraction(
            "No extractable text found (the PDF is likely a scanned image)".to_string(),
        ));
    }

    debug!(raw_chars = raw.len(), chars = text.len(), "PDF text extracted");
    Ok(text)
}

/// Validates the upload and extracts its text layer on the blocking pool.
pub async fn extract_pdf_text(bytes: bytes::Bytes, file_name: Option<&str>) -> Result<String, AppError> {
    ensure_pdf(&bytes, file_name)?;

    tokio::task::spawn_blocking(move || extract_pdf_text_sync(&bytes))
        .await
        .map_err(|e| {
            if e.is_panic() {
                AppError::UnsupportedFormat("PDF could not be parsed".to_string())
            } else {
                AppError::Internal(anyhow::anyhow!("spawn_blocking failed in PDF extraction: {e}"))
            }
        })?
}

/// Cleans extractor output while keeping line structure.
pub fn normalize_text(raw: &str) -> String {
    let mut text = raw.to_string();
    for (ligature, replacement) in LIGATURES {
        text = text.replace(ligature, replacement);
    }
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    let text = CONTROL_CHARS.replace_all(&text, "");

    text.split('\n')
        .map(|line| HORIZONTAL_WS.replace_all(line, " ").trim().to_string())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
