//! Letter layout and LaTeX rendering.
//!
//! `LetterLayout` is the finished arrangement of a letter: sender, recipient,
//! opening, closing, and the sanitized body. Rendering fills a built-in
//! `letter`-class template; compilation shells out to the configured engine.

use std::path::{Path, PathBuf};

use tokio::process::Command;
use tracing::info;

use crate::errors::AppError;

/// The person sending the letter.
#[derive(Debug, Clone)]
pub struct Sender {
    pub name: String,
    pub address: Vec<String>,
}

/// The inferred or configured recipient of the letter.
#[derive(Debug, Clone)]
pub struct Recipient {
    pub name: String,
    pub company: String,
    pub address: Vec<String>,
}

/// A complete letter ready for rendering.
#[derive(Debug, Clone)]
pub struct LetterLayout {
    pub sender: Sender,
    pub recipient: Recipient,
    pub opening: String,
    pub closing: String,
    /// Sanitized body; already LaTeX-safe.
    pub letter_body: String,
}

const LETTER_TEMPLATE: &str = r"\documentclass[11pt]{letter}
\usepackage[utf8]{inputenc}
\usepackage[margin=1in]{geometry}
\signature{{sender_name}}
\address{{sender_address}}
\begin{document}
\begin{letter}{{recipient_block}}
\opening{{opening},}

{letter_body}

\closing{{closing}}
\end{letter}
\end{document}
";

/// Renders the layout into a complete LaTeX document.
pub fn render_letter(layout: &LetterLayout) -> String {
    let sender_address = join_address_lines(&layout.sender.address);

    let mut recipient_lines = vec![escape_latex(&layout.recipient.name)];
    if !layout.recipient.company.is_empty() {
        recipient_lines.push(escape_latex(&layout.recipient.company));
    }
    recipient_lines.extend(layout.recipient.address.iter().map(|l| escape_latex(l)));

    LETTER_TEMPLATE
        .replace("{sender_name}", &escape_latex(&layout.sender.name))
        .replace("{sender_address}", &sender_address)
        .replace("{recipient_block}", &recipient_lines.join(" \\\\ "))
        .replace("{opening}", &escape_latex(layout.opening.trim_end_matches(',')))
        .replace("{closing}", &escape_latex(&layout.closing))
        .replace("{letter_body}", &layout.letter_body)
}

fn join_address_lines(lines: &[String]) -> String {
    lines
        .iter()
        .map(|line| escape_latex(line))
        .collect::<Vec<_>>()
        .join(" \\\\ ")
}

/// Escapes LaTeX-sensitive characters in header fields (not the body, which
/// the sanitizer already handled).
fn escape_latex(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' | '%' | '$' | '#' | '_' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Writes the rendered source as `<stem>.tex` under the output directory.
pub fn write_latex(output_dir: &Path, stem: &str, latex_source: &str) -> Result<PathBuf, AppError> {
    std::fs::create_dir_all(output_dir).map_err(|e| {
        AppError::Render(format!(
            "Failed to create output dir {}: {e}",
            output_dir.display()
        ))
    })?;
    let tex_path = output_dir.join(format!("{stem}.tex"));
    std::fs::write(&tex_path, latex_source)
        .map_err(|e| AppError::Render(format!("Failed to write {}: {e}", tex_path.display())))?;
    Ok(tex_path)
}

/// Compiles the .tex file to PDF with the configured engine.
/// Failure carries the tail of the engine output for diagnosis.
pub async fn compile_pdf(tex_path: &Path, engine: &str) -> Result<PathBuf, AppError> {
    let workdir = tex_path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = tex_path
        .file_name()
        .ok_or_else(|| AppError::Render(format!("Invalid tex path: {}", tex_path.display())))?;

    let output = Command::new(engine)
        .arg("-interaction=nonstopmode")
        .arg(file_name)
        .current_dir(workdir)
        .output()
        .await
        .map_err(|e| {
            AppError::Render(format!(
                "LaTeX engine '{engine}' could not be started: {e}. Install it or update LATEX_ENGINE."
            ))
        })?;

    if !output.status.success() {
        let log = String::from_utf8_lossy(&output.stdout);
        let snippet: String = log
            .chars()
            .rev()
            .take(2000)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        return Err(AppError::Render(format!(
            "LaTeX compilation failed.\nOutput snippet:\n{snippet}"
        )));
    }

    let pdf_path = tex_path.with_extension("pdf");
    if !pdf_path.exists() {
        return Err(AppError::Render(
            "Expected PDF not created by LaTeX engine".to_string(),
        ));
    }
    info!("Compiled {}", pdf_path.display());
    Ok(pdf_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_layout() -> LetterLayout {
        LetterLayout {
            sender: Sender {
                name: "Jane Doe".to_string(),
                address: vec!["12 Main St".to_string(), "Springfield".to_string()],
            },
            recipient: Recipient {
                name: "Acme Hiring Team".to_string(),
                company: "Acme Robotics".to_string(),
                address: vec![],
            },
            opening: "Dear Hiring Manager".to_string(),
            closing: "Sincerely,".to_string(),
            letter_body: "Paragraph one.\n\nParagraph two.".to_string(),
        }
    }

    #[test]
    fn test_render_fills_all_placeholders() {
        let rendered = render_letter(&sample_layout());
        assert!(rendered.contains("\\signature{Jane Doe}"));
        assert!(rendered.contains("12 Main St \\\\ Springfield"));
        assert!(rendered.contains("Acme Hiring Team \\\\ Acme Robotics"));
        assert!(rendered.contains("\\opening{Dear Hiring Manager,}"));
        assert!(rendered.contains("\\closing{Sincerely,}"));
        assert!(rendered.contains("Paragraph one.\n\nParagraph two."));
        assert!(!rendered.contains("{sender_name}"));
        assert!(!rendered.contains("{recipient_block}"));
    }

    #[test]
    fn test_render_does_not_double_comma_the_opening() {
        let mut layout = sample_layout();
        layout.opening = "Dear Hiring Manager,".to_string();
        let rendered = render_letter(&layout);
        assert!(rendered.contains("\\opening{Dear Hiring Manager,}"));
        assert!(!rendered.contains("Dear Hiring Manager,,"));
    }

    #[test]
    fn test_escape_latex_specials_in_header_fields() {
        let mut layout = sample_layout();
        layout.recipient.company = "Procter & Gamble".to_string();
        let rendered = render_letter(&layout);
        assert!(rendered.contains("Procter \\& Gamble"));
    }

    #[test]
    fn test_write_latex_creates_file_under_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_latex(dir.path(), "rust-engineer-acme", "\\documentclass{letter}")
            .unwrap();
        assert!(path.ends_with("rust-engineer-acme.tex"));
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_compile_pdf_missing_engine_is_render_error() {
        let dir = tempfile::tempdir().unwrap();
        let tex = dir.path().join("x.tex");
        std::fs::write(&tex, "\\documentclass{letter}").unwrap();
        let err = compile_pdf(&tex, "definitely-not-a-latex-engine")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Render(_)));
    }
}
