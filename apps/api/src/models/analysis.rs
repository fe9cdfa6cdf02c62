use serde::{Deserialize, Serialize};

/// Contact fields pulled from the resume header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
}

/// A parsed resume. Lives for one request only.
#[derive(Debug, Clone)]
pub struct ResumeDocument {
    pub text: String,
    pub contact: ContactInfo,
    pub skills: Vec<String>,
}

impl ResumeDocument {
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    /// Weighted share of keywords evidenced in the resume, 0 – 100.
    pub overall: u32,
    /// Unweighted share of keywords found anywhere in the resume, 0 – 100.
    pub coverage: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchMeta {
    pub num_keywords: usize,
}

/// Classification of every job keyword against one resume.
///
/// `in_skills`, `in_text_not_skills` and `missing` partition `keywords`;
/// each list keeps keyword order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub keywords: Vec<String>,
    pub in_skills: Vec<String>,
    pub in_text_not_skills: Vec<String>,
    pub missing: Vec<String>,
    pub scores: Scores,
    pub meta: MatchMeta,
}

impl MatchResult {
    pub fn empty() -> Self {
        MatchResult {
            keywords: vec![],
            in_skills: vec![],
            in_text_not_skills: vec![],
            missing: vec![],
            scores: Scores {
                overall: 0,
                coverage: 0,
            },
            meta: MatchMeta { num_keywords: 0 },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseMeta {
    pub num_keywords: usize,
    pub resume_chars: usize,
    pub resume_words: usize,
}

/// Body of a successful `POST /analyze`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub contact: ContactInfo,
    pub skills: Vec<String>,
    pub keywords: Vec<String>,
    pub in_skills: Vec<String>,
    pub in_text_not_skills: Vec<String>,
    pub missing: Vec<String>,
    /// Keywords present in the resume body but absent from its skills section.
    pub suggest_add_to_skills: Vec<String>,
    pub scores: Scores,
    pub meta: ResponseMeta,
}

impl AnalyzeResponse {
    pub fn new(resume: ResumeDocument, result: MatchResult) -> Self {
        let meta = ResponseMeta {
            num_keywords: result.meta.num_keywords,
            resume_chars: resume.text.chars().count(),
            resume_words: resume.word_count(),
        };
        AnalyzeResponse {
            contact: resume.contact,
            skills: resume.skills,
            keywords: result.keywords,
            suggest_add_to_skills: result.in_text_not_skills.clone(),
            in_skills: result.in_skills,
            in_text_not_skills: result.in_text_not_skills,
            missing: result.missing,
            scores: result.scores,
            meta,
        }
    }
}
