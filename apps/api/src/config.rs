use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,

    /// Filesystem path to the candidate's raw CV text.
    pub cv_path: PathBuf,
    /// Directory where generated .tex/.pdf artifacts are written.
    pub output_dir: PathBuf,
    /// LaTeX engine used to compile generated letters.
    pub latex_engine: String,

    pub sender_name: String,
    /// Sender address lines; pipe-separated in the environment.
    pub sender_address: Vec<String>,
    pub default_opening: String,
    pub default_closing: String,
    pub default_tone: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            cv_path: env_or("CV_PATH", "data/cv.txt").into(),
            output_dir: env_or("OUTPUT_DIR", "output").into(),
            latex_engine: env_or("LATEX_ENGINE", "xelatex"),
            sender_name: require_env("SENDER_NAME")?,
            sender_address: parse_address_list(&env_or("SENDER_ADDRESS", "")),
            default_opening: env_or("DEFAULT_OPENING", "Dear Hiring Manager"),
            default_closing: env_or("DEFAULT_CLOSING", "Sincerely,"),
            default_tone: env_or("DEFAULT_TONE", "professional"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Splits a pipe-separated address value into trimmed, non-empty lines.
fn parse_address_list(value: &str) -> Vec<String> {
    value
        .split('|')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_address_list_splits_on_pipes() {
        let lines = parse_address_list("12 Main St | Springfield | USA");
        assert_eq!(lines, vec!["12 Main St", "Springfield", "USA"]);
    }

    #[test]
    fn test_parse_address_list_drops_empty_segments() {
        let lines = parse_address_list("12 Main St||   |Springfield");
        assert_eq!(lines, vec!["12 Main St", "Springfield"]);
    }

    #[test]
    fn test_parse_address_list_empty_value() {
        assert!(parse_address_list("").is_empty());
    }
}
