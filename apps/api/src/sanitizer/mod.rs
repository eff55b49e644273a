//! Letter Body Sanitizer — strips structural duplication from generated text
//! and reflows it into 1–3 clean paragraphs.
//!
//! The completion model is told to return body paragraphs only, but it still
//! regularly emits `\opening{…}`, greeting lines, closings, and signatures
//! that the surrounding template already provides. Everything here is
//! deterministic and idempotent once the structural markers are gone.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Structural commands the template owns; payload is a single brace group.
    static ref STRUCTURAL_COMMAND_RE: Regex =
        Regex::new(r"(?i)\\(opening|closing|signature|address|date)\s*\{[^{}]*\}").unwrap();

    /// Letter environment markers.
    static ref LETTER_ENV_RE: Regex = Regex::new(r"(?i)\\(begin|end)\{letter\}").unwrap();
}

/// Configured phrases compared against generated text to detect duplication.
/// Comparison is lowercase with trailing commas/whitespace stripped.
#[derive(Debug, Clone, Copy)]
pub struct SanitizerConfig<'a> {
    pub opening: &'a str,
    pub closing: &'a str,
    pub sender_name: &'a str,
}

/// Sanitized letter content: 1–3 non-empty paragraphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterBody {
    paragraphs: Vec<String>,
}

impl LetterBody {
    pub fn paragraphs(&self) -> &[String] {
        &self.paragraphs
    }

    /// Serializes paragraphs blank-line-separated.
    pub fn to_text(&self) -> String {
        self.paragraphs.join("\n\n")
    }
}

/// Removes duplicated structural elements from generated letter text and
/// reflows the remainder. Empty input yields empty output, not an error.
pub fn sanitize_letter_body(raw: &str, config: &SanitizerConfig) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let body = reflow(raw, config);
    escape_hashes(body.to_text().trim())
}

/// The reflow pipeline, minus the final escaping: strip commands, drop
/// duplicated opening/closing/signature lines, collapse blanks, split into
/// paragraphs, bisect a lone multi-sentence paragraph, truncate to three.
fn reflow(raw: &str, config: &SanitizerConfig) -> LetterBody {
    let without_commands = STRUCTURAL_COMMAND_RE.replace_all(raw, "");
    let cleaned = LETTER_ENV_RE.replace_all(&without_commands, "");

    let mut lines: Vec<&str> = cleaned.trim().lines().map(str::trim_end).collect();

    if let Some(first) = lines.first().copied() {
        if matches_phrase(first, config.opening) {
            lines.remove(0);
        }
    }

    // Handles both orderings of closing/signature, and duplicates of either.
    while let Some(last) = lines.last().copied() {
        if matches_phrase(last, config.sender_name) || matches_phrase(last, config.closing) {
            lines.pop();
        } else {
            break;
        }
    }

    let mut normalized: Vec<&str> = Vec::new();
    let mut blank_pending = false;
    for line in lines {
        if line.trim().is_empty() {
            blank_pending = true;
            continue;
        }
        if blank_pending && !normalized.is_empty() {
            normalized.push("");
        }
        blank_pending = false;
        normalized.push(line);
    }

    let collapsed = normalized.join("\n");
    let mut paragraphs: Vec<String> = collapsed
        .split("\n\n")
        .map(|paragraph| paragraph.trim().to_string())
        .filter(|paragraph| !paragraph.is_empty())
        .collect();

    if paragraphs.len() == 1 {
        let sentences = split_sentences(&paragraphs[0]);
        if sentences.len() >= 2 {
            let midpoint = (sentences.len() / 2).max(1);
            let first = sentences[..midpoint].join(" ").trim().to_string();
            let second = sentences[midpoint..].join(" ").trim().to_string();
            paragraphs = [first, second]
                .into_iter()
                .filter(|part| !part.is_empty())
                .collect();
        }
    }

    paragraphs.truncate(3);
    LetterBody { paragraphs }
}

/// Lowercase equality with trailing commas/whitespace stripped on both sides.
fn matches_phrase(text: &str, phrase: &str) -> bool {
    let text = normalize_phrase(text);
    !text.is_empty() && text == normalize_phrase(phrase)
}

fn normalize_phrase(value: &str) -> String {
    let lowered = value.trim().to_lowercase();
    lowered
        .trim_end_matches(|c: char| c == ',' || c.is_whitespace())
        .to_string()
}

/// Splits on `.`/`!`/`?` followed by whitespace; the whitespace is consumed.
fn split_sentences(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        if matches!(bytes[i], b'.' | b'!' | b'?') {
            let mut j = i + 1;
            if j < bytes.len() && bytes[j].is_ascii_whitespace() {
                sentences.push(&text[start..j]);
                while j < bytes.len() && bytes[j].is_ascii_whitespace() {
                    j += 1;
                }
                start = j;
                i = j;
                continue;
            }
        }
        i += 1;
    }
    if start < text.len() {
        sentences.push(&text[start..]);
    }
    sentences
}

/// Prefixes a backslash to every `#` that is not already escaped.
fn escape_hashes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_backslash = false;
    for c in text.chars() {
        if c == '#' && !prev_backslash {
            out.push('\\');
        }
        prev_backslash = c == '\\';
        out.push(c);
    }
    out
}
