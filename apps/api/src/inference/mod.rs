//! Entity Inference — derives recipient identity from noisy job-posting text.
//!
//! Purely deterministic: ordered regex heuristics with a frequency-based
//! fallback, re-run from scratch on every call. No model, no state, no I/O.
//! Both entry points are total — they always return a usable non-empty string,
//! degrading silently to generic fallbacks when nothing matches.

pub mod company;
pub mod recipient;
pub mod stopwords;

pub use company::infer_company;
pub use recipient::infer_recipient_name;

/// Inputs available when inferring the recipient company.
/// Immutable per invocation; all fields are borrowed from the request.
#[derive(Debug, Clone, Copy, Default)]
pub struct InferenceHints<'a> {
    /// Explicit company override from the caller. Highest priority.
    pub explicit_company: Option<&'a str>,
    /// Recipient-company hint (e.g. a configured default).
    pub recipient_company: Option<&'a str>,
    /// Role title; its tokens are excluded from company candidates.
    pub role: Option<&'a str>,
    /// URL or filesystem path the posting was loaded from.
    pub job_source: &'a str,
    /// Raw posting text.
    pub job_description: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hints_default_is_empty() {
        let hints = InferenceHints::default();
        assert!(hints.explicit_company.is_none());
        assert!(hints.job_description.is_empty());
        // Even fully-empty hints resolve to the terminal fallback.
        assert_eq!(infer_company(&hints), "Company");
    }

    #[test]
    fn test_company_feeds_recipient_name() {
        let hints = InferenceHints {
            job_source: "https://jobs.acme.io/posting/42",
            job_description: "We are hiring.",
            ..Default::default()
        };
        let company = infer_company(&hints);
        assert_eq!(company, "Acme");
        let name = infer_recipient_name(hints.job_description, Some(&company), hints.job_source);
        assert_eq!(name, "Acme Hiring Team");
    }
}
