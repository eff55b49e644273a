//! Letter Generation — orchestrates the full pipeline.
//!
//! Flow: fetch posting → load CV → infer recipient company → build prompt →
//!       LLM completion → sanitize body → infer recipient name → render LaTeX →
//!       write artifacts → optional PDF compile.
//!
//! Inference and sanitization are deterministic; the LLM call is the only
//! non-deterministic step and sits behind `CompletionProvider`.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::Config;
use crate::cv::CvLoader;
use crate::errors::AppError;
use crate::fetch::fetch_job_description;
use crate::generation::prompts::{build_letter_prompt, PromptContext, LETTER_SYSTEM};
use crate::inference::{infer_company, infer_recipient_name, InferenceHints};
use crate::layout::{compile_pdf, render_letter, write_latex, LetterLayout, Recipient, Sender};
use crate::llm_client::CompletionProvider;
use crate::sanitizer::{sanitize_letter_body, SanitizerConfig};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Request body for letter generation. Only `job_source` is required;
/// everything else falls back to configured defaults or inference.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateLetterRequest {
    /// URL or filesystem path of the job posting.
    pub job_source: String,
    #[serde(default)]
    pub role: Option<String>,
    /// Explicit company override. Also becomes the prompt's company context.
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub tone: Option<String>,
    #[serde(default)]
    pub recipient_name: Option<String>,
    #[serde(default)]
    pub recipient_company: Option<String>,
    #[serde(default)]
    pub recipient_address: Vec<String>,
    #[serde(default)]
    pub opening: Option<String>,
    #[serde(default)]
    pub closing: Option<String>,
    #[serde(default)]
    pub additional_instructions: Option<String>,
    #[serde(default)]
    pub output_stem: Option<String>,
    #[serde(default = "default_compile_pdf")]
    pub compile_pdf: bool,
}

fn default_compile_pdf() -> bool {
    true
}

/// Result of the generation pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateLetterResponse {
    pub recipient_company: String,
    pub recipient_name: String,
    pub letter_body: String,
    pub tex_path: String,
    pub pdf_path: Option<String>,
    /// Snapshot of the fetched posting, kept next to the .tex for traceability.
    pub job_description_path: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Runs the full job posting → letter pipeline.
pub async fn generate_letter(
    http: &reqwest::Client,
    llm: &dyn CompletionProvider,
    config: &Config,
    request: GenerateLetterRequest,
) -> Result<GenerateLetterResponse, AppError> {
    let job_description = fetch_job_description(http, &request.job_source).await?;
    info!(
        "Fetched job description ({} chars) from {}",
        job_description.len(),
        request.job_source
    );

    let cv_text = CvLoader::new(&config.cv_path).load().await?;

    let hints = InferenceHints {
        explicit_company: request.company.as_deref(),
        recipient_company: request.recipient_company.as_deref(),
        role: request.role.as_deref(),
        job_source: &request.job_source,
        job_description: &job_description,
    };
    let recipient_company = infer_company(&hints);
    info!("Inferred recipient company: {recipient_company}");

    let context_company = request
        .company
        .clone()
        .unwrap_or_else(|| recipient_company.clone());

    let opening = request
        .opening
        .clone()
        .unwrap_or_else(|| config.default_opening.clone());
    let closing = request
        .closing
        .clone()
        .unwrap_or_else(|| config.default_closing.clone());
    let tone = request
        .tone
        .clone()
        .unwrap_or_else(|| config.default_tone.clone());

    let prompt = build_letter_prompt(
        &cv_text,
        &job_description,
        &PromptContext {
            role: request.role.as_deref(),
            company: Some(&context_company),
            tone: &tone,
            additional_instructions: request.additional_instructions.as_deref(),
        },
    );

    let raw_letter_body = llm
        .complete(&prompt, LETTER_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Letter generation failed: {e}")))?;

    let letter_body = sanitize_letter_body(
        &raw_letter_body,
        &SanitizerConfig {
            opening: &opening,
            closing: &closing,
            sender_name: &config.sender_name,
        },
    );
    if letter_body.is_empty() {
        return Err(AppError::Llm(
            "Sanitized letter body is empty; the model returned no usable content".to_string(),
        ));
    }

    let recipient_name = request
        .recipient_name
        .clone()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| {
            infer_recipient_name(&job_description, Some(&context_company), &request.job_source)
        });
    info!("Addressing letter to: {recipient_name}");

    let layout = LetterLayout {
        sender: Sender {
            name: config.sender_name.clone(),
            address: config.sender_address.clone(),
        },
        recipient: Recipient {
            name: recipient_name.clone(),
            company: recipient_company.clone(),
            address: request.recipient_address.clone(),
        },
        opening,
        closing,
        letter_body: letter_body.clone(),
    };
    let latex_source = render_letter(&layout);

    let stem = request
        .output_stem
        .clone()
        .filter(|stem| !stem.trim().is_empty())
        .unwrap_or_else(|| default_stem(request.role.as_deref(), &recipient_company));

    let tex_path = write_latex(&config.output_dir, &stem, &latex_source)?;

    // Persist the posting snapshot for traceability
    let job_desc_path = tex_path.with_extension("job.txt");
    std::fs::write(&job_desc_path, &job_description).map_err(|e| {
        AppError::Render(format!(
            "Failed to write {}: {e}",
            job_desc_path.display()
        ))
    })?;

    let pdf_path = if request.compile_pdf {
        Some(compile_pdf(&tex_path, &config.latex_engine).await?)
    } else {
        None
    };

    info!("Generated letter for {recipient_company} at {}", tex_path.display());

    Ok(GenerateLetterResponse {
        recipient_company,
        recipient_name,
        letter_body,
        tex_path: tex_path.display().to_string(),
        pdf_path: pdf_path.map(|p| p.display().to_string()),
        job_description_path: job_desc_path.display().to_string(),
    })
}

/// Default output stem: `[role-]company-YYYY-MM-DD` as slugs.
fn default_stem(role: Option<&str>, recipient_company: &str) -> String {
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    let mut parts = vec![slugify_segment(recipient_company, "company"), today];
    if let Some(role) = role {
        parts.insert(0, slugify_segment(role, "role"));
    }
    parts.join("-")
}

/// Lowercases, maps whitespace to hyphens, and drops everything else outside
/// `[a-z0-9-]`. Empty result falls back to the given label.
fn slugify_segment(value: &str, fallback: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    for c in value.trim().to_lowercase().chars() {
        if c.is_ascii_alphanumeric() || c == '-' {
            slug.push(c);
        } else if c.is_whitespace() {
            slug.push('-');
        }
    }
    if slug.is_empty() {
        fallback.to_string()
    } else {
        slug
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::build_http_client;
    use crate::llm_client::LlmError;
    use async_trait::async_trait;
    use std::io::Write;
    use std::path::Path;

    struct StubCompletions(&'static str);

    #[async_trait]
    impl CompletionProvider for StubCompletions {
        async fn complete(&self, _prompt: &str, _system: &str) -> Result<String, LlmError> {
            Ok(self.0.to_string())
        }
    }

    fn test_config(dir: &Path) -> Config {
        Config {
            anthropic_api_key: "test-key".to_string(),
            port: 0,
            rust_log: "info".to_string(),
            cv_path: dir.join("cv.txt"),
            output_dir: dir.join("output"),
            latex_engine: "xelatex".to_string(),
            sender_name: "John Doe".to_string(),
            sender_address: vec!["1 Letter Lane".to_string()],
            default_opening: "Dear Hiring Manager".to_string(),
            default_closing: "Sincerely,".to_string(),
            default_tone: "professional".to_string(),
        }
    }

    fn request_for(posting: &Path) -> GenerateLetterRequest {
        GenerateLetterRequest {
            job_source: posting.display().to_string(),
            role: None,
            company: None,
            tone: None,
            recipient_name: None,
            recipient_company: None,
            recipient_address: vec![],
            opening: None,
            closing: None,
            additional_instructions: None,
            output_stem: Some("test-letter".to_string()),
            compile_pdf: false,
        }
    }

    #[tokio::test]
    async fn test_pipeline_end_to_end_with_stub_llm() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("cv.txt"), "Jane Doe, Rust Engineer").unwrap();
        let posting = dir.path().join("posting.txt");
        let mut f = std::fs::File::create(&posting).unwrap();
        write!(f, "Company: Acme Robotics").unwrap();

        let llm = StubCompletions(
            "Dear Hiring Manager,\nI build robots. I would love to build yours.\n\nSincerely,\nJohn Doe",
        );
        let config = test_config(dir.path());
        let http = build_http_client();

        let response = generate_letter(&http, &llm, &config, request_for(&posting))
            .await
            .unwrap();

        assert_eq!(response.recipient_company, "Acme Robotics");
        assert_eq!(response.recipient_name, "Acme Robotics Hiring Team");
        // Duplicated greeting and signature removed, lone paragraph bisected.
        assert_eq!(
            response.letter_body,
            "I build robots.\n\nI would love to build yours."
        );
        assert!(response.pdf_path.is_none());

        let tex = std::fs::read_to_string(&response.tex_path).unwrap();
        assert!(tex.contains("\\opening{Dear Hiring Manager,}"));
        assert!(tex.contains("I build robots."));

        let snapshot = std::fs::read_to_string(&response.job_description_path).unwrap();
        assert!(snapshot.contains("Acme Robotics"));
    }

    #[tokio::test]
    async fn test_pipeline_rejects_empty_generation() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("cv.txt"), "cv").unwrap();
        let posting = dir.path().join("posting.txt");
        std::fs::write(&posting, "Company: Acme").unwrap();

        let llm = StubCompletions("\\opening{Dear Team,}");
        let config = test_config(dir.path());
        let http = build_http_client();

        let err = generate_letter(&http, &llm, &config, request_for(&posting))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
    }

    #[tokio::test]
    async fn test_pipeline_honors_recipient_overrides() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("cv.txt"), "cv").unwrap();
        let posting = dir.path().join("posting.txt");
        std::fs::write(&posting, "Company: Acme").unwrap();

        let llm = StubCompletions("Paragraph one. Paragraph two.");
        let config = test_config(dir.path());
        let http = build_http_client();

        let mut request = request_for(&posting);
        request.recipient_name = Some("Dr. Ada Lovelace".to_string());
        request.company = Some("Initech".to_string());

        let response = generate_letter(&http, &llm, &config, request).await.unwrap();
        assert_eq!(response.recipient_name, "Dr. Ada Lovelace");
        assert_eq!(response.recipient_company, "Initech");
    }

    #[test]
    fn test_default_stem_with_role() {
        let stem = default_stem(Some("Rust Engineer"), "Acme Robotics");
        assert!(stem.starts_with("rust-engineer-acme-robotics-"));
    }

    #[test]
    fn test_default_stem_without_role() {
        let stem = default_stem(None, "Acme");
        assert!(stem.starts_with("acme-"));
        assert!(!stem.contains("--"));
    }

    #[test]
    fn test_slugify_drops_symbols() {
        assert_eq!(slugify_segment("Acme & Co", "company"), "acme--co");
        assert_eq!(slugify_segment("***", "company"), "company");
    }
}
