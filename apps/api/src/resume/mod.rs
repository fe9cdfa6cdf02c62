// Resume parsing: PDF text layer → contact fields + skills section.
// Nothing here touches the filesystem; uploads live only in memory.

pub mod contact;
pub mod extractor;
pub mod skills;

#[cfg(test)]
pub mod test_pdf;

use bytes::Bytes;
use tracing::debug;

use crate::errors::AppError;
use crate::lexicon::Lexicon;
use crate::models::analysis::ResumeDocument;

/// Builds a `ResumeDocument` from already-extracted resume text.
pub fn parse_resume_text(text: String, lexicon: &Lexicon) -> ResumeDocument {
    let contact = contact::extract_contact(&text, lexicon);
    let skills = skills::extract_skills(&text, lexicon);
    debug!(
        chars = text.len(),
        skills = skills.len(),
        has_email = contact.email.is_some(),
        "Resume parsed"
    );
    ResumeDocument {
        text,
        contact,
        skills,
    }
}

/// PDF bytes → `ResumeDocument`.
pub async fn parse_pdf_resume(
    bytes: Bytes,
    file_name: Option<&str>,
    lexicon: &Lexicon,
) -> Result<ResumeDocument, AppError> {
    let text = extractor::extract_pdf_text(bytes, file_name).await?;
    Ok(parse_resume_text(text, lexicon))
}
