//! Prompt construction for letter generation.

/// System prompt for letter generation. Demands body-only LaTeX output; the
/// sanitizer still defends against models that ignore this.
pub const LETTER_SYSTEM: &str = "You craft tailored cover letter bodies in LaTeX. \
    Return only the main paragraph content. \
    Do NOT include opening commands, closing blocks, signatures, \
    addresses, dates, or document preamble. \
    The text must be valid LaTeX.";

/// Structured information about the job and caller preferences.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptContext<'a> {
    pub role: Option<&'a str>,
    pub company: Option<&'a str>,
    pub tone: &'a str,
    pub additional_instructions: Option<&'a str>,
}

/// Assembles the user prompt from the CV, the posting, and the context.
pub fn build_letter_prompt(
    cv_text: &str,
    job_description: &str,
    context: &PromptContext,
) -> String {
    let mut parts = vec![
        "Produce a LaTeX cover letter body tailored to the job.".to_string(),
        "Use the candidate CV:".to_string(),
        cv_text.to_string(),
        String::new(),
        "Job description:".to_string(),
        job_description.to_string(),
    ];

    if let Some(role) = context.role {
        parts.push(format!("\nTarget role: {role}"));
    }
    if let Some(company) = context.company {
        parts.push(format!("\nCompany: {company}"));
    }
    if !context.tone.is_empty() {
        parts.push(format!("\nDesired tone: {}", context.tone));
    }
    if let Some(instructions) = context.additional_instructions {
        parts.push(format!("\nAdditional guidance: {instructions}"));
    }

    parts.push(
        "\nStructure guidance: write two to three focused paragraphs that naturally \
         follow a formal greeting and precede a closing, but do not output the \
         \\opening, \\closing, signature lines, or contact details. Those are \
         handled elsewhere."
            .to_string(),
    );

    parts.join("\n")
}
