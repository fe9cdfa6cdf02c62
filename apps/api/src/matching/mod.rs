// Job-description keyword extraction and resume matching.
// The whole analysis is one synchronous, stateless pass per request.

pub mod handlers;
pub mod keywords;
pub mod scorer;

use crate::errors::AppError;
use crate::lexicon::Lexicon;
use crate::matching::keywords::{extract_keywords, KeywordOptions};
use crate::matching::scorer::MatchScorer;
use crate::models::analysis::{MatchResult, ResumeDocument};

/// Job text → keywords → classification against an already-parsed resume.
pub fn match_resume(
    resume: &ResumeDocument,
    job_text: &str,
    options: KeywordOptions,
    lexicon: &Lexicon,
    scorer: &dyn MatchScorer,
) -> Result<MatchResult, AppError> {
    let keywords = extract_keywords(job_text, options, lexicon)?;
    Ok(scorer.score(&resume.skills, &resume.text, &keywords, lexicon))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::scorer::KeywordMatchScorer;
    use crate::resume::parse_resume_text;

    const RESUME: &str = "\
Jane Doe
jane@example.com | 555-123-4567

Skills: Python, SQL, Docker

EXPERIENCE
Shipped Terraform modules for the data platform.";

    fn run(job_text: &str) -> Result<MatchResult, AppError> {
        let lexicon = Lexicon::default();
        let resume = parse_resume_text(RESUME.to_string(), &lexicon);
        match_resume(
            &resume,
            job_text,
            KeywordOptions::default(),
            &lexicon,
            &KeywordMatchScorer::default(),
        )
    }

    #[test]
    fn test_python_in_skills_aws_missing() {
        let result = run("We need Python and AWS experience").unwrap();
        assert!(result.keywords.contains(&"python".to_string()));
        assert!(result.keywords.contains(&"aws".to_string()));
        assert!(result.in_skills.contains(&"python".to_string()));
        assert!(result.missing.contains(&"aws".to_string()));
        assert!(result.scores.overall > 0);
    }

    #[test]
    fn test_body_mention_is_in_text_not_skills() {
        let result = run("Platform Engineer\nTerraform and Docker").unwrap();
        assert!(result.in_text_not_skills.contains(&"terraform".to_string()));
        assert!(result.in_skills.contains(&"docker".to_string()));
    }

    #[test]
    fn test_blank_job_text_fails_before_scoring() {
        assert!(matches!(run("   "), Err(AppError::EmptyInput(_))));
    }

    #[test]
    fn test_pipeline_is_idempotent() {
        let job = "Data Engineer\nPython, Spark, Airflow, SQL and AWS.";
        assert_eq!(run(job).unwrap(), run(job).unwrap());
    }
}
