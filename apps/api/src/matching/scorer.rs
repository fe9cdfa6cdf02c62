//! Match scoring: classifies job keywords against a resume and scores the fit.
//!
//! Default: `KeywordMatchScorer` (pure, deterministic, weighted set overlap).
//! `AppState` holds an `Arc<dyn MatchScorer>` so another backend can be swapped
//! in at startup without touching the handler.

use std::collections::HashSet;

use crate::lexicon::{contains_term, normalize, Lexicon};
use crate::models::analysis::{MatchMeta, MatchResult, Scores};

/// Relative credit for each kind of match. Skills-section evidence should
/// outweigh an incidental mention in the resume body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub skills: f32,
    pub text: f32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skills: 1.0,
            text: 0.5,
        }
    }
}

/// Where a keyword was found in the resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordClass {
    InSkills,
    InTextNotSkills,
    Missing,
}

pub trait MatchScorer: Send + Sync {
    fn score(
        &self,
        skills: &[String],
        resume_text: &str,
        keywords: &[String],
        lexicon: &Lexicon,
    ) -> MatchResult;
}

/// Weighted keyword overlap:
///
/// 1. keyword equals a skill, or is a whole term inside one → in_skills
/// 2. keyword (or an alias spelling) is a whole term in the resume text → in_text_not_skills
/// 3. otherwise → missing
///
/// overall = round(100 × (w_skills·|in_skills| + w_text·|in_text|) / |keywords|), clamped to 0..=100
pub struct KeywordMatchScorer {
    pub weights: ScoringWeights,
}

impl KeywordMatchScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }
}

impl Default for KeywordMatchScorer {
    fn default() -> Self {
        Self::new(ScoringWeights::default())
    }
}

impl MatchScorer for KeywordMatchScorer {
    fn score(
        &self,
        skills: &[String],
        resume_text: &str,
        keywords: &[String],
        lexicon: &Lexicon,
    ) -> MatchResult {
        compute_match(skills, resume_text, keywords, lexicon, self.weights)
    }
}

fn compute_match(
    skills: &[String],
    resume_text: &str,
    keywords: &[String],
    lexicon: &Lexicon,
    weights: ScoringWeights,
) -> MatchResult {
    let keywords = dedup_normalized(keywords);
    if keywords.is_empty() {
        return MatchResult::empty();
    }

    let skills: Vec<String> = skills
        .iter()
        .map(|s| lexicon.canonical(&normalize(s)).to_string())
        .collect();
    let text = normalize(resume_text);

    let mut in_skills = Vec::new();
    let mut in_text_not_skills = Vec::new();
    let mut missing = Vec::new();

    for keyword in &keywords {
        match classify(keyword, &skills, &text, lexicon) {
            KeywordClass::InSkills => in_skills.push(keyword.clone()),
            KeywordClass::InTextNotSkills => in_text_not_skills.push(keyword.clone()),
            KeywordClass::Missing => missing.push(keyword.clone()),
        }
    }

    let total = keywords.len() as f32;
    let weighted =
        weights.skills * in_skills.len() as f32 + weights.text * in_text_not_skills.len() as f32;
    let found = (in_skills.len() + in_text_not_skills.len()) as f32;

    MatchResult {
        scores: Scores {
            overall: to_percent(weighted / total),
            coverage: to_percent(found / total),
        },
        meta: MatchMeta {
            num_keywords: keywords.len(),
        },
        keywords,
        in_skills,
        in_text_not_skills,
        missing,
    }
}

/// Classifies one normalized keyword against normalized skills and resume text.
pub fn classify(keyword: &str, skills: &[String], text: &str, lexicon: &Lexicon) -> KeywordClass {
    if skills
        .iter()
        .any(|skill| skill == keyword || contains_term(skill, keyword))
    {
        return KeywordClass::InSkills;
    }
    if lexicon
        .spellings(keyword)
        .iter()
        .any(|spelling| contains_term(text, spelling))
    {
        return KeywordClass::InTextNotSkills;
    }
    KeywordClass::Missing
}

fn dedup_normalized(keywords: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    keywords
        .iter()
        .map(|k| normalize(k))
        .filter(|k| !k.is_empty() && seen.insert(k.clone()))
        .collect()
}

fn to_percent(ratio: f32) -> u32 {
    (ratio * 100.0).round().clamp(0.0, 100.0) as u32
}
