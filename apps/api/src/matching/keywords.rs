//! Keyword extraction: ranks the salient terms of a job posting.
//!
//! Algorithm:
//! 1. Lower-case and collapse whitespace line by line.
//! 2. Configured phrases ("machine learning") are matched first and kept whole.
//! 3. Remaining tokens keep technical punctuation (`c++`, `node.js`, `ci/cd`),
//!    lose surrounding punctuation, are aliased and stopword-filtered.
//! 4. Each occurrence scores 1.0, or `title_weight` on the first non-empty line.
//! 5. Technical terms (phrases, the lexicon's tech vocabulary, tech-shaped
//!    tokens, caller-supplied keywords) rank ahead of general words. Within a
//!    tier: score desc, ties by first appearance. Truncate to `max_k`.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::AppError;
use crate::lexicon::{find_terms, normalize, Lexicon};

static TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.?\p{L}[\p{L}\p{N}+#./\-]*").expect("valid token regex"));

const MIN_KEYWORD_CHARS: usize = 2;

/// Salience knobs for keyword ranking.
#[derive(Debug, Clone)]
pub struct KeywordOptions {
    pub max_k: usize,
    pub title_weight: f32,
    /// Always ranked with the technical terms, even when the posting never
    /// mentions them.
    pub custom_keywords: Vec<String>,
}

impl Default for KeywordOptions {
    fn default() -> Self {
        Self {
            max_k: 10,
            title_weight: 2.0,
            custom_keywords: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
struct Candidate {
    keyword: String,
    score: f32,
    technical: bool,
    /// (line, byte offset) of the first occurrence.
    first_seen: (usize, usize),
}

#[derive(Default)]
struct Tally {
    candidates: Vec<Candidate>,
    index: HashMap<String, usize>,
}

impl Tally {
    fn record(&mut self, keyword: &str, weight: f32, technical: bool, first_seen: (usize, usize)) {
        match self.index.get(keyword) {
            Some(&i) => {
                let candidate = &mut self.candidates[i];
                candidate.score += weight;
                candidate.technical |= technical;
            }
            None => {
                self.index.insert(keyword.to_string(), self.candidates.len());
                self.candidates.push(Candidate {
                    keyword: keyword.to_string(),
                    score: weight,
                    technical,
                    first_seen,
                });
            }
        }
    }

    /// Marks a keyword technical and gives it at least one occurrence.
    fn force(&mut self, keyword: &str, first_seen: (usize, usize)) {
        match self.index.get(keyword) {
            Some(&i) => self.candidates[i].technical = true,
            None => self.record(keyword, 1.0, true, first_seen),
        }
    }
}

/// Ranked, deduplicated keywords of `job_text`, at most `options.max_k` long.
pub fn extract_keywords(
    job_text: &str,
    options: KeywordOptions,
    lexicon: &Lexicon,
) -> Result<Vec<String>, AppError> {
    if job_text.trim().is_empty() {
        return Err(AppError::EmptyInput(
            "Job description text must not be blank".to_string(),
        ));
    }
    if options.max_k == 0 {
        return Err(AppError::Validation("max_k must be at least 1".to_string()));
    }

    let mut tally = Tally::default();
    let mut title_seen = false;
    let mut last_line = 0;

    for (line_no, raw_line) in job_text.lines().enumerate() {
        last_line = line_no;
        let line = normalize(raw_line);
        if line.is_empty() {
            continue;
        }
        let weight = if title_seen { 1.0 } else { options.title_weight };
        title_seen = true;

        let mut phrase_spans: Vec<(usize, usize)> = Vec::new();
        for phrase in &lexicon.phrases {
            let phrase = normalize(phrase);
            for start in find_terms(&line, &phrase) {
                phrase_spans.push((start, start + phrase.len()));
                tally.record(lexicon.canonical(&phrase), weight, true, (line_no, start));
            }
        }

        for token in TOKEN.find_iter(&line) {
            let start = token.start();
            if phrase_spans.iter().any(|(s, e)| start >= *s && start < *e) {
                continue;
            }
            for (offset, keyword) in split_token(token.as_str(), lexicon) {
                if is_keyword(&keyword, lexicon) {
                    let technical = lexicon.is_tech_term(&keyword);
                    tally.record(&keyword, weight, technical, (line_no, start + offset));
                }
            }
        }
    }

    for (i, raw) in options.custom_keywords.iter().enumerate() {
        let normalized = normalize(raw);
        let cleaned = clean_token(&normalized, lexicon);
        if cleaned.chars().count() >= MIN_KEYWORD_CHARS {
            tally.force(lexicon.canonical(cleaned), (last_line + 1, i));
        }
    }

    let mut candidates = tally.candidates;
    candidates.sort_by(|a, b| {
        b.technical
            .cmp(&a.technical)
            .then(
                b.score
                    .partial_cmp(&a.score)
                    .unwrap_or(std::cmp::Ordering::Equal),
            )
            .then(a.first_seen.cmp(&b.first_seen))
    });
    candidates.truncate(options.max_k);

    Ok(candidates.into_iter().map(|c| c.keyword).collect())
}

/// Cleans a raw token and splits slash compounds (`python/django`) that are not
/// known aliases. Yields (offset within token, canonical keyword).
fn split_token(raw: &str, lexicon: &Lexicon) -> Vec<(usize, String)> {
    let cleaned = clean_token(raw, lexicon);
    if cleaned.is_empty() {
        return Vec::new();
    }
    let lead = raw.find(cleaned).unwrap_or(0);

    if cleaned.contains('/') && !lexicon.aliases.contains_key(cleaned) {
        let mut parts = Vec::new();
        let mut offset = lead;
        for part in cleaned.split('/') {
            let part_clean = clean_token(part, lexicon);
            if !part_clean.is_empty() {
                parts.push((offset, lexicon.canonical(part_clean).to_string()));
            }
            offset += part.len() + 1;
        }
        return parts;
    }

    vec![(lead, lexicon.canonical(cleaned).to_string())]
}

/// Strips trailing sentence punctuation; keeps inner `.`, `+`, `#`, `/`, `-`.
/// A leading dot survives only as part of a known alias (`.net`).
fn clean_token<'a>(raw: &'a str, lexicon: &Lexicon) -> &'a str {
    let trimmed = raw.trim_end_matches(|c: char| ".,;:!?/-".contains(c));
    match trimmed.strip_prefix('.') {
        Some(rest) if !lexicon.aliases.contains_key(trimmed) => rest,
        _ => trimmed,
    }
}

fn is_keyword(keyword: &str, lexicon: &Lexicon) -> bool {
    keyword.chars().count() >= MIN_KEYWORD_CHARS
        && !lexicon.is_stopword(keyword)
        && keyword.chars().any(char::is_alphabetic)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str, max_k: usize) -> Vec<String> {
        let options = KeywordOptions {
            max_k,
            ..KeywordOptions::default()
        };
        extract_keywords(text, options, &Lexicon::default()).unwrap()
    }

    #[test]
    fn test_python_and_aws_extracted() {
        let keywords = extract("We need Python and AWS experience", 10);
        assert!(keywords.contains(&"python".to_string()));
        assert!(keywords.contains(&"aws".to_string()));
        assert!(!keywords.contains(&"we".to_string()));
        assert!(!keywords.contains(&"and".to_string()));
    }

    #[test]
    fn test_blank_text_is_empty_input() {
        let err = extract_keywords("  \n\t ", KeywordOptions::default(), &Lexicon::default())
            .unwrap_err();
        assert!(matches!(err, AppError::EmptyInput(_)));
    }

    #[test]
    fn test_zero_max_k_is_validation_error() {
        let options = KeywordOptions {
            max_k: 0,
            ..KeywordOptions::default()
        };
        let err = extract_keywords("Rust", options, &Lexicon::default()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_frequency_ranks_first_then_first_appearance() {
        // title words score 2.0 each, same as kafka's two body mentions
        let text = "Backend Engineer\nkafka rust docker rust kafka rust";
        let keywords = extract(text, 10);
        assert_eq!(keywords, vec!["rust", "backend", "kafka", "docker", "engineer"]);
    }

    #[test]
    fn test_technologies_outrank_posting_prose() {
        let text = "Senior Software Engineer\n\
            You will design services and build features for our platform.\n\
            Design, build and maintain services that deliver features daily.\n\
            Lead design reviews and code reviews across services.\n\
            Build features with product and deliver them on time.\n\
            Our stack is Python on AWS.";
        let keywords = extract(text, 10);
        assert_eq!(&keywords[..2], &["python", "aws"]);
        assert_eq!(keywords.len(), 10);
    }

    #[test]
    fn test_general_words_fill_when_no_technologies() {
        let keywords = extract("Store Manager\nManage inventory and scheduling.", 10);
        assert!(keywords.contains(&"inventory".to_string()));
        assert!(keywords.contains(&"manager".to_string()));
    }

    #[test]
    fn test_accented_words_stay_whole() {
        let keywords = extract("Développeur Rust\nExpérience avec Kubernetes et données", 10);
        assert_eq!(&keywords[..2], &["rust", "kubernetes"]);
        assert!(keywords.contains(&"développeur".to_string()), "{keywords:?}");
        assert!(keywords.contains(&"données".to_string()), "{keywords:?}");
        for fragment in ["veloppeur", "exp", "rience", "donn", "es"] {
            assert!(!keywords.contains(&fragment.to_string()), "{keywords:?}");
        }
    }

    #[test]
    fn test_custom_keywords_forced_in() {
        let options = KeywordOptions {
            max_k: 3,
            custom_keywords: vec!["Kafka".to_string(), " Node.js ".to_string()],
            ..KeywordOptions::default()
        };
        let text = "Engineer\nPython and writing and planning and testing";
        let keywords = extract_keywords(text, options, &Lexicon::default()).unwrap();
        assert_eq!(keywords, vec!["python", "kafka", "node"]);
    }

    #[test]
    fn test_custom_keyword_in_text_keeps_its_score() {
        let options = KeywordOptions {
            custom_keywords: vec!["planning".to_string()],
            ..KeywordOptions::default()
        };
        let text = "Role\nplanning planning rust";
        let keywords = extract_keywords(text, options, &Lexicon::default()).unwrap();
        assert_eq!(keywords, vec!["planning", "rust"]);
    }

    #[test]
    fn test_never_exceeds_max_k_and_no_duplicates() {
        let text = "rust go java kotlin swift scala haskell ocaml elixir rust go";
        let keywords = extract(text, 3);
        assert_eq!(keywords.len(), 3);
        let mut deduped = keywords.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), keywords.len());
    }

    #[test]
    fn test_technical_tokens_survive() {
        let keywords = extract("Engineer\nC++, C#, Node.js and CI/CD on .NET.", 10);
        for expected in ["c++", "c#", "node", "ci-cd", "dotnet"] {
            assert!(
                keywords.contains(&expected.to_string()),
                "missing {expected} in {keywords:?}"
            );
        }
    }

    #[test]
    fn test_phrases_kept_whole() {
        let keywords = extract("Role\nMachine learning and data science with Python.", 10);
        assert!(keywords.contains(&"machine learning".to_string()));
        assert!(keywords.contains(&"data science".to_string()));
        assert!(!keywords.contains(&"learning".to_string()));
        assert!(!keywords.contains(&"science".to_string()));
    }

    #[test]
    fn test_slash_compounds_split() {
        let keywords = extract("Role\nPython/Django, React/Redux", 10);
        for expected in ["python", "django", "react", "redux"] {
            assert!(keywords.contains(&expected.to_string()), "{keywords:?}");
        }
    }

    #[test]
    fn test_custom_stopwords_respected() {
        let mut lexicon = Lexicon::default();
        lexicon.stopwords.insert("python".to_string());
        let keywords =
            extract_keywords("Python and Rust", KeywordOptions::default(), &lexicon).unwrap();
        assert_eq!(keywords, vec!["rust"]);
    }

    #[test]
    fn test_deterministic() {
        let text = "Senior Data Engineer\nSpark, Airflow, dbt, SQL, Spark, Kafka.";
        assert_eq!(extract(text, 5), extract(text, 5));
    }
}
