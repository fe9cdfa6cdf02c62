//! Contact extraction: name, email, phone and profile links from resume text.
//!
//! Each field is a pure function over the text returning `Option`; a field
//! that cannot be found with confidence is simply absent.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::lexicon::{normalize, Lexicon};
use crate::models::analysis::ContactInfo;

/// Only the resume header is searched for a name.
const NAME_SEARCH_LINES: usize = 20;
const NAME_MAX_WORDS: usize = 6;
const NAME_MAX_CHARS: usize = 60;
const NAME_MIN_LETTER_RATIO: f32 = 0.8;
const PHONE_MIN_DIGITS: usize = 7;
const PHONE_MAX_DIGITS: usize = 15;

const CONTACT_LABELS: &[&str] = &[
    "email", "e-mail", "phone", "tel", "mobile", "cell", "address", "portfolio", "website",
];

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}").expect("valid email regex")
});
/// An unbroken 7–15 digit run, or an optional `+CC` prefix followed by
/// 2–4 digit groups joined by at most one space, dot or hyphen. Groups never
/// span five digits, so a ZIP code is not glued onto the number after it.
static PHONE_CANDIDATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\+?\b\d{7,15}\b|(?:\+\d{1,3}[ .\-]?)?(?:\(\d{2,4}\)|\b\d{2,4}\b)(?:[ .\-]?\d{2,4}\b){1,4}",
    )
    .expect("valid phone regex")
});
/// `2019-2021`, `01.2019-03.2021`, `(2019 – 2021)`.
static YEAR_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\(?(?:(?:0?[1-9]|1[0-2])[./])?(?:19|20)\d{2}\s*[-–]\s*(?:(?:0?[1-9]|1[0-2])[./])?(?:19|20)\d{2}\)?$",
    )
    .expect("valid year regex")
});
static LINKEDIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)linkedin\.com/[^\s|,;]+").expect("valid linkedin regex"));
static GITHUB: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)github\.com/[^\s|,;]+").expect("valid github regex"));

pub fn extract_contact(text: &str, lexicon: &Lexicon) -> ContactInfo {
    ContactInfo {
        name: guess_name(text, lexicon),
        email: find_email(text),
        phone: find_phone(text),
        linkedin: find_profile_url(&LINKEDIN, text),
        github: find_profile_url(&GITHUB, text),
    }
}

/// First header line that reads like a personal name.
pub fn guess_name(text: &str, lexicon: &Lexicon) -> Option<String> {
    text.lines()
        .take(NAME_SEARCH_LINES)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .find(|line| looks_like_name(line, lexicon))
        .map(str::to_string)
}

fn looks_like_name(line: &str, lexicon: &Lexicon) -> bool {
    let lower = line.to_lowercase();
    if line.chars().count() > NAME_MAX_CHARS || line.contains('@') {
        return false;
    }
    if ["linkedin", "github", "http", "www."]
        .iter()
        .any(|marker| lower.contains(marker))
    {
        return false;
    }
    if CONTACT_LABELS.iter().any(|label| lower.starts_with(label)) {
        return false;
    }

    let words = line.split_whitespace().count();
    if !(1..=NAME_MAX_WORDS).contains(&words) {
        return false;
    }
    if line.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }

    let visible: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
    let letters = visible.iter().filter(|c| c.is_alphabetic()).count();
    if (letters as f32) < NAME_MIN_LETTER_RATIO * visible.len() as f32 {
        return false;
    }

    let heading = normalize(line.trim_end_matches(':'));
    !lexicon.is_section_heading(&heading)
}

pub fn find_email(text: &str) -> Option<String> {
    EMAIL.find(text).map(|m| m.as_str().to_string())
}

/// First phone-shaped candidate with 7–15 digits that is not a date range.
pub fn find_phone(text: &str) -> Option<String> {
    PHONE_CANDIDATE
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .find(|candidate| {
            let digits = candidate.chars().filter(char::is_ascii_digit).count();
            (PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits)
                && !YEAR_RANGE.is_match(candidate)
        })
        .map(str::to_string)
}

fn find_profile_url(pattern: &Regex, text: &str) -> Option<String> {
    pattern.find(text).map(|m| clean_url(m.as_str()))
}

fn clean_url(raw: &str) -> String {
    let url = raw
        .trim()
        .trim_end_matches(|c: char| ").,;:!?\"'".contains(c));
    if url.starts_with("http") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}
