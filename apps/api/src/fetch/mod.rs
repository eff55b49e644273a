//! Job text provider — loads a job posting from a URL or local file and
//! reduces it to plain text.
//!
//! Retrieval failures (network errors, 4xx/5xx, missing files) surface as
//! `AppError::JobFetch` and propagate; there is no retry at this layer.

use std::path::Path;
use std::time::Duration;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::errors::AppError;

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0 Safari/537.36";
const FETCH_TIMEOUT: Duration = Duration::from_secs(20);

lazy_static! {
    /// Subtrees whose text content must not leak into the posting text.
    static ref NON_CONTENT_RE: Regex =
        Regex::new(r"(?is)<(script|style|noscript)\b[^>]*>.*?</(script|style|noscript)\s*>")
            .unwrap();
    static ref COMMENT_RE: Regex = Regex::new(r"(?s)<!--.*?-->").unwrap();
    static ref TAG_RE: Regex = Regex::new(r"(?s)<[^>]+>").unwrap();
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
}

/// Builds the outbound HTTP client used for posting retrieval.
/// Job boards commonly reject non-browser user agents.
pub fn build_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(FETCH_TIMEOUT)
        .build()
        .expect("Failed to build fetch HTTP client")
}

/// Loads a job posting from an HTTP(S) URL or a filesystem path and returns
/// its cleaned plain-text content.
pub async fn fetch_job_description(
    http: &reqwest::Client,
    source: &str,
) -> Result<String, AppError> {
    if source.starts_with("http://") || source.starts_with("https://") {
        let response = http
            .get(source)
            .send()
            .await
            .map_err(|e| AppError::JobFetch(format!("Request to {source} failed: {e}")))?;

        let status = response.status();
        if status.as_u16() >= 400 {
            return Err(AppError::JobFetch(format!(
                "Request to {source} failed with status {status}"
            )));
        }

        let html = response
            .text()
            .await
            .map_err(|e| AppError::JobFetch(format!("Failed to read body from {source}: {e}")))?;
        debug!("Fetched {} bytes from {source}", html.len());
        return Ok(html_to_text(&html));
    }

    let path = Path::new(source);
    if !path.exists() {
        return Err(AppError::JobFetch(format!(
            "Job description source not found: {source}"
        )));
    }

    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| AppError::JobFetch(format!("Failed to read {source}: {e}")))?;

    if text.to_lowercase().contains("<html") {
        Ok(html_to_text(&text))
    } else {
        // Keep line structure; label cues like "Company:" are line-anchored.
        Ok(text.trim().to_string())
    }
}

/// Very small HTML-to-text conversion: drops script/style/noscript subtrees
/// and comments, strips remaining tags, decodes the common entities, and
/// collapses whitespace.
fn html_to_text(html: &str) -> String {
    let without_scripts = NON_CONTENT_RE.replace_all(html, " ");
    let without_comments = COMMENT_RE.replace_all(&without_scripts, " ");
    let without_tags = TAG_RE.replace_all(&without_comments, " ");
    normalize_whitespace(&decode_entities(&without_tags))
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").trim().to_string()
}
