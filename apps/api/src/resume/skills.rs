//! Skill extraction: locates the resume's skills section and splits it into
//! normalized skill tokens.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::lexicon::{normalize, Lexicon};

/// Upper bound on lines read after the heading, for resumes with odd layouts.
const SECTION_LINE_CAP: usize = 40;
const BULLETS: &[char] = &['•', '·', '∙', '▪', '◦', '●', '■', '*', '-', '–', '—', '>'];

const CATEGORY_MAX_CHARS: usize = 40;
/// Text after a colon that rates the skill before it (`SQL: advanced`).
const PROFICIENCY_LEVELS: &[&str] = &[
    "basic", "beginner", "intermediate", "advanced", "expert", "proficient", "fluent", "native",
];

static SKILL_DELIMITERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[,\n|;\t()\[\]•·∙▪◦●■]").expect("valid delimiter regex"));

/// Where a skills heading was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillsHeading {
    pub line_index: usize,
    /// Content sharing the heading line, e.g. `Python, SQL` in `Skills: Python, SQL`.
    pub inline: Option<String>,
}

/// Extracts the ordered, deduplicated skill list. Empty when there is no skills section.
pub fn extract_skills(text: &str, lexicon: &Lexicon) -> Vec<String> {
    let Some(block) = find_skills_block(text, lexicon) else {
        return Vec::new();
    };

    let mut skills: Vec<String> = Vec::new();
    for line in block.lines() {
        for piece in SKILL_DELIMITERS.split(strip_bullet(line)) {
            for skill in clean_skills(strip_category(piece), lexicon) {
                if !skills.contains(&skill) {
                    skills.push(skill);
                }
            }
        }
    }
    skills
}

/// Raw text of the skills section, heading excluded.
pub fn find_skills_block(text: &str, lexicon: &Lexicon) -> Option<String> {
    let lines: Vec<&str> = text.lines().collect();
    let heading = find_skills_heading(&lines, lexicon)?;

    let mut block: Vec<String> = heading.inline.into_iter().collect();
    let mut blanks_in_a_row = 0;

    for line in lines
        .iter()
        .skip(heading.line_index + 1)
        .take(SECTION_LINE_CAP)
    {
        let line = line.trim();
        if line.is_empty() {
            blanks_in_a_row += 1;
            if blanks_in_a_row >= 2 {
                break;
            }
            continue;
        }
        blanks_in_a_row = 0;

        if looks_like_heading(line, lexicon) {
            break;
        }
        block.push(line.to_string());
    }

    let block = block.join("\n");
    (!block.trim().is_empty()).then_some(block)
}

/// First line that is a skills heading, with any inline content after its colon.
pub fn find_skills_heading(lines: &[&str], lexicon: &Lexicon) -> Option<SkillsHeading> {
    lines.iter().enumerate().find_map(|(line_index, line)| {
        let line = strip_bullet(line.trim());
        if line.is_empty() {
            return None;
        }

        let (label, rest) = match line.split_once(':') {
            Some((label, rest)) => (label, Some(rest.trim())),
            None => (line, None),
        };
        let label = normalize(label);
        if !lexicon.skills_headers.iter().any(|h| *h == label) {
            return None;
        }

        Some(SkillsHeading {
            line_index,
            inline: rest.filter(|r| !r.is_empty()).map(str::to_string),
        })
    })
}

/// A line that starts a new section: a known heading, or an ALL-CAPS title of
/// two or more words none of which is a known technology (`SQL AWS` is a
/// skill list, `WORK HISTORY` a heading).
pub fn looks_like_heading(line: &str, lexicon: &Lexicon) -> bool {
    let trimmed = line.trim().trim_end_matches(':');
    let normalized = normalize(trimmed);
    if lexicon.is_section_heading(&normalized) {
        return true;
    }

    let has_letters = trimmed.chars().any(char::is_alphabetic);
    has_letters
        && trimmed.split_whitespace().count() >= 2
        && !trimmed.contains(',')
        && !trimmed.chars().any(|c| c.is_ascii_digit())
        && trimmed
            .chars()
            .filter(|c| c.is_alphabetic())
            .all(char::is_uppercase)
        && !normalized
            .split_whitespace()
            .any(|word| is_known_skill(word, lexicon))
}

fn is_known_skill(word: &str, lexicon: &Lexicon) -> bool {
    lexicon.aliases.contains_key(word) || lexicon.is_tech_term(lexicon.canonical(word))
}

/// Drops a `Category:` label from a piece, unless the text after the colon
/// only rates the skill, in which case the label is the skill.
fn strip_category(piece: &str) -> &str {
    let Some((label, rest)) = piece.split_once(':') else {
        return piece;
    };
    let rating = normalize(rest.trim_end_matches(|c: char| ".!?".contains(c)));
    if PROFICIENCY_LEVELS.contains(&rating.as_str()) {
        label
    } else if label.trim().chars().count() <= CATEGORY_MAX_CHARS {
        rest
    } else {
        piece
    }
}

fn strip_bullet(line: &str) -> &str {
    line.trim_start_matches(|c: char| BULLETS.contains(&c) || c.is_whitespace())
}

/// Normalizes one piece into skills. A space-separated run of known
/// technologies (`SQL AWS`) yields one skill per word; anything else stays whole.
fn clean_skills(piece: &str, lexicon: &Lexicon) -> Vec<String> {
    let piece = strip_bullet(piece).trim_end_matches(|c: char| ".:!?".contains(c));
    let normalized = normalize(piece);
    if normalized.chars().count() < 2 || normalized.chars().all(|c| c.is_ascii_digit()) {
        return Vec::new();
    }
    if lexicon.aliases.contains_key(&normalized) {
        return vec![lexicon.canonical(&normalized).to_string()];
    }

    let words: Vec<&str> = normalized.split_whitespace().collect();
    if words.len() > 1 && words.iter().all(|word| is_known_skill(word, lexicon)) {
        return words
            .into_iter()
            .filter(|word| word.chars().count() >= 2)
            .map(|word| lexicon.canonical(word).to_string())
            .collect();
    }

    vec![lexicon.canonical(&normalized).to_string()]
}
