//! Lexicon: the word lists that drive normalization and the text heuristics.
//!
//! Built once at startup and shared read-only through `AppState`. Every
//! algorithm takes a `&Lexicon` instead of reading globals, so tests can swap
//! in their own lists.

use std::collections::{HashMap, HashSet};

const STOPWORDS: &[&str] = &[
    // function words
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "either",
    "e.g", "etc", "every", "few", "for", "from", "further", "had", "has", "have", "having", "he", "her",
    "here", "hers", "him", "his", "how", "i", "i.e", "if", "in", "into", "is", "it", "its", "itself",
    "just", "may", "me", "might", "more", "most", "must", "my", "no", "nor", "not", "of", "off",
    "on", "once", "only", "or", "other", "our", "ours", "out", "over", "own", "per", "same",
    "shall", "she", "should", "so", "some", "such", "than", "that", "the", "their", "theirs",
    "them", "then", "there", "these", "they", "this", "those", "through", "to", "too", "under",
    "until", "up", "upon", "us", "very", "via", "was", "we", "were", "what", "when", "where",
    "which", "while", "who", "whom", "why", "will", "with", "within", "without", "would", "you",
    "your", "yours",
    // job-posting filler
    "ability", "able", "applicant", "applicants", "apply", "candidate", "candidates", "company",
    "environment", "equal", "excellent", "experience", "experienced", "familiarity", "good",
    "great", "help", "ideal", "including", "join", "knowledge", "like", "looking", "new", "need",
    "needs", "nice", "opportunity", "plus", "preferred", "proficiency", "proficient", "required",
    "requirements", "responsibilities", "role", "seeking", "skills", "strong", "team", "understanding",
    "using", "want", "well", "work", "working", "year", "years",
];

/// Variant spelling → canonical keyword.
const ALIASES: &[(&str, &str)] = &[
    ("node.js", "node"),
    ("nodejs", "node"),
    ("react.js", "react"),
    ("reactjs", "react"),
    ("vue.js", "vue"),
    ("vuejs", "vue"),
    ("postgresql", "postgres"),
    ("postgre", "postgres"),
    ("k8s", "kubernetes"),
    ("golang", "go"),
    ("ci/cd", "ci-cd"),
    ("c plus plus", "c++"),
    ("c sharp", "c#"),
    (".net", "dotnet"),
    ("rest api", "rest"),
    ("restful", "rest"),
    ("js", "javascript"),
    ("ts", "typescript"),
    ("sklearn", "scikit-learn"),
    ("full stack", "full-stack"),
    ("fullstack", "full-stack"),
];

/// Multi-word terms kept intact as a single keyword.
const PHRASES: &[&str] = &[
    "machine learning",
    "deep learning",
    "data science",
    "data engineering",
    "computer vision",
    "natural language processing",
    "rest api",
    "continuous integration",
    "continuous delivery",
    "continuous deployment",
    "full stack",
    "distributed systems",
    "project management",
];

/// Technology terms that outrank general vocabulary when keywords are ranked.
const TECH_TERMS: &[&str] = &[
    // languages
    "python", "javascript", "typescript", "java", "kotlin", "scala", "go", "rust", "php", "ruby",
    "swift", "c", "c++", "c#", "dotnet", "r", "bash", "haskell", "elixir", "clojure",
    // web and backend
    "react", "angular", "vue", "svelte", "node", "express", "fastapi", "django", "flask", "spring",
    "rails", "graphql", "rest", "grpc", "html", "css", "backend", "frontend", "full-stack",
    // data stores and messaging
    "sql", "postgres", "mysql", "sqlite", "mongodb", "redis", "elasticsearch", "cassandra",
    "dynamodb", "snowflake", "bigquery", "kafka", "rabbitmq",
    // cloud and delivery
    "aws", "gcp", "azure", "docker", "kubernetes", "terraform", "ansible", "helm", "jenkins",
    "ci-cd", "linux", "git", "microservices", "serverless",
    // data and ml
    "pandas", "numpy", "pytorch", "tensorflow", "scikit-learn", "spark", "airflow", "dbt",
    "hadoop", "excel", "tableau", "llm", "nlp",
];

/// Suffixes that mark a token as technical (`mysql`, `webapi`, `mongodb`).
const TECH_SUFFIXES: &[&str] = &["sql", "api", "db"];

const SKILLS_HEADERS: &[&str] = &[
    "skills",
    "technical skills",
    "core competencies",
    "key skills",
    "skills & tools",
    "skills and tools",
    "technologies",
];

/// Headings that end a section and can never be a person's name.
const SECTION_HEADINGS: &[&str] = &[
    "summary",
    "professional summary",
    "profile",
    "objective",
    "about me",
    "experience",
    "work experience",
    "professional experience",
    "employment",
    "employment history",
    "education",
    "projects",
    "personal projects",
    "certifications",
    "certificates",
    "awards",
    "honors",
    "publications",
    "languages",
    "interests",
    "volunteering",
    "volunteer experience",
    "references",
    "contact",
    "resume",
    "curriculum vitae",
    "cv",
];

#[derive(Debug, Clone)]
pub struct Lexicon {
    pub stopwords: HashSet<String>,
    pub aliases: HashMap<String, String>,
    pub phrases: Vec<String>,
    pub tech_terms: HashSet<String>,
    pub skills_headers: Vec<String>,
    pub section_headings: HashSet<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Lexicon {
            stopwords: owned_set(STOPWORDS),
            aliases: ALIASES
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
            phrases: PHRASES.iter().map(|p| p.to_string()).collect(),
            tech_terms: owned_set(TECH_TERMS),
            skills_headers: SKILLS_HEADERS.iter().map(|h| h.to_string()).collect(),
            section_headings: owned_set(SECTION_HEADINGS),
        }
    }
}

impl Lexicon {
    /// Maps a normalized token to its canonical spelling.
    pub fn canonical<'a>(&'a self, token: &'a str) -> &'a str {
        self.aliases.get(token).map(String::as_str).unwrap_or(token)
    }

    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }

    /// Known technology, or a token shaped like one: inner `.`, `+` or `#`
    /// (`c++`, `asp.net`), or a `sql`/`api`/`db` suffix.
    pub fn is_tech_term(&self, keyword: &str) -> bool {
        if self.tech_terms.contains(keyword) {
            return true;
        }
        if keyword.chars().count() > 1 && keyword.contains(|c: char| matches!(c, '.' | '+' | '#')) {
            return true;
        }
        TECH_SUFFIXES
            .iter()
            .any(|suffix| keyword.len() > suffix.len() && keyword.ends_with(suffix))
    }

    /// The canonical keyword followed by every alias that maps to it.
    pub fn spellings<'a>(&'a self, keyword: &'a str) -> Vec<&'a str> {
        let mut out = vec![keyword];
        let mut variants: Vec<&str> = self
            .aliases
            .iter()
            .filter(|(_, canonical)| canonical.as_str() == keyword)
            .map(|(variant, _)| variant.as_str())
            .collect();
        variants.sort_unstable();
        out.extend(variants);
        out
    }

    pub fn is_section_heading(&self, normalized_line: &str) -> bool {
        self.section_headings.contains(normalized_line)
            || self.skills_headers.iter().any(|h| h == normalized_line)
    }
}

/// Lower-cases and collapses runs of whitespace into single spaces.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Letters, digits, `+` and `#` bind a term together (`c++`, `c#`).
fn is_term_char(c: char) -> bool {
    c.is_alphanumeric() || c == '+' || c == '#'
}

/// Byte offsets where `needle` occurs in `haystack` as a whole term.
pub fn find_terms(haystack: &str, needle: &str) -> Vec<usize> {
    if needle.is_empty() {
        return Vec::new();
    }
    haystack
        .match_indices(needle)
        .filter(|(start, _)| {
            let before = haystack[..*start].chars().next_back();
            let after = haystack[start + needle.len()..].chars().next();
            !before.is_some_and(is_term_char) && !after.is_some_and(is_term_char)
        })
        .map(|(start, _)| start)
        .collect()
}

pub fn contains_term(haystack: &str, needle: &str) -> bool {
    !find_terms(haystack, needle).is_empty()
}

fn owned_set(words: &[&str]) -> HashSet<String> {
    words.iter().map(|w| w.to_string()).collect()
}
