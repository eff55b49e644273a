//! Recipient-name inference.
//!
//! A named contact in the posting beats everything. Failing that, the letter
//! is addressed to "<Company> Hiring Team", and as a last resort to the
//! generic "Hiring Manager". Total function: never fails, never empty.

use lazy_static::lazy_static;
use regex::Regex;

use crate::inference::company::domain_to_company;

lazy_static! {
    /// Contact cues, tried in order. Each captures 1–3 capitalized tokens.
    static ref CONTACT_PATTERNS: Vec<Regex> = vec![
        Regex::new(
            r"(?i)contact\s*(?:name\s*)?[:\-]\s*(?P<name>[A-Z][A-Za-z'\-]+(?:\s+[A-Z][A-Za-z'\-]+){0,2})"
        )
        .unwrap(),
        Regex::new(
            r"(?i)hiring manager\s*[:\-]\s*(?P<name>[A-Z][A-Za-z'\-]+(?:\s+[A-Z][A-Za-z'\-]+){0,2})"
        )
        .unwrap(),
        Regex::new(
            r"(?i)recruiter\s*[:\-]\s*(?P<name>[A-Z][A-Za-z'\-]+(?:\s+[A-Z][A-Za-z'\-]+){0,2})"
        )
        .unwrap(),
    ];

    /// Characters allowed inside a person-name token.
    static ref NON_PERSON_CHARS_RE: Regex = Regex::new(r"[^A-Za-z'\-]").unwrap();
}

/// Infers who the letter should address.
pub fn infer_recipient_name(
    job_description: &str,
    company_hint: Option<&str>,
    job_source: &str,
) -> String {
    if let Some(contact) = extract_contact_name(job_description) {
        return contact;
    }

    let company = company_hint
        .map(str::trim)
        .filter(|hint| !hint.is_empty())
        .map(str::to_owned)
        .or_else(|| domain_to_company(job_source));
    if let Some(company) = company {
        return format!("{company} Hiring Team");
    }

    "Hiring Manager".to_string()
}

fn extract_contact_name(job_description: &str) -> Option<String> {
    for pattern in CONTACT_PATTERNS.iter() {
        let Some(captures) = pattern.captures(job_description) else {
            continue;
        };
        let Some(raw) = captures.name("name") else {
            continue;
        };
        if let Some(normalized) = normalize_person_name(raw.as_str().trim()) {
            return Some(normalized);
        }
    }
    None
}

/// Cleans each token to letters/apostrophe/hyphen and capitalizes it.
fn normalize_person_name(value: &str) -> Option<String> {
    let tokens: Vec<String> = value
        .split_whitespace()
        .map(|token| NON_PERSON_CHARS_RE.replace_all(token, "").into_owned())
        .filter(|token| !token.is_empty())
        .map(|token| capitalize(&token))
        .collect();
    if tokens.is_empty() {
        None
    } else {
        Some(tokens.join(" "))
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_name_cue() {
        let name = infer_recipient_name("Contact: Jane Doe", None, "");
        assert_eq!(name, "Jane Doe");
    }

    #[test]
    fn test_contact_name_with_name_label() {
        let name = infer_recipient_name("Contact name: maria o'brien-smith", None, "");
        assert_eq!(name, "Maria O'brien-smith");
    }

    #[test]
    fn test_hiring_manager_cue() {
        let name = infer_recipient_name("Hiring Manager: John Smith", None, "");
        assert_eq!(name, "John Smith");
    }

    #[test]
    fn test_recruiter_cue() {
        let name = infer_recipient_name("Recruiter - Priya Patel", None, "");
        assert_eq!(name, "Priya Patel");
    }

    #[test]
    fn test_company_hint_fallback() {
        let name = infer_recipient_name("no contact listed", Some("Acme"), "");
        assert_eq!(name, "Acme Hiring Team");
    }

    #[test]
    fn test_domain_fallback_when_no_hint() {
        let name = infer_recipient_name("no contact listed", None, "https://careers.globex.com/1");
        assert_eq!(name, "Globex Hiring Team");
    }

    #[test]
    fn test_generic_fallback() {
        let name = infer_recipient_name("nothing useful", None, "local-posting.txt");
        assert_eq!(name, "Hiring Manager");
    }

    #[test]
    fn test_blank_company_hint_is_ignored() {
        let name = infer_recipient_name("nothing useful", Some("   "), "file.txt");
        assert_eq!(name, "Hiring Manager");
    }

    #[test]
    fn test_always_nonempty() {
        for text in ["", "###", "contact:", "recruiter: 12345"] {
            assert!(!infer_recipient_name(text, None, "").is_empty());
        }
    }
}
