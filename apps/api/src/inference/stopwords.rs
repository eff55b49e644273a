//! Static vocabularies used by recipient inference.
//!
//! All sets are lowercase, initialized once, and never mutated. They encode
//! which tokens can never be part of an organization name (role words,
//! locations, job-board boilerplate) and which short tokens or legal suffixes
//! are explicitly allowed.

use std::collections::HashSet;

use lazy_static::lazy_static;

lazy_static! {
    /// Tokens trimmed from the tail of a pattern-matched company candidate.
    /// Mostly role/location/boilerplate words that regex capture tends to
    /// swallow when the company name is followed by a job title or city.
    pub static ref COMPANY_TRAILING_STOPWORDS: HashSet<&'static str> = [
        "apply",
        "application",
        "associate",
        "careers",
        "career",
        "contract",
        "department",
        "developer",
        "development",
        "engineer",
        "engineering",
        "group",
        "hiring",
        "hybrid",
        "intern",
        "internship",
        "job",
        "jobs",
        "lead",
        "manager",
        "managers",
        "opening",
        "opportunity",
        "position",
        "product",
        "remote",
        "role",
        "software",
        "team",
        "teams",
        "time",
        "united",
        "states",
        "usa",
        "washington",
        "seattle",
        "san",
        "francisco",
        "new",
        "york",
        "california",
        "austin",
        "texas",
        "boston",
        "canada",
        "toronto",
        "london",
        "europe",
        "global",
        "worldwide",
        "north",
        "america",
        "contractor",
        "staff",
        "senior",
        "principal",
        "director",
        "specialist",
        "scientist",
        "analyst",
        "consultant",
        "coach",
        "fellow",
        "assistant",
        "support",
        "customer",
        "success",
        "solutions",
        "operations",
        "sales",
        "marketing",
        "service",
    ]
    .into_iter()
    .collect();

    /// Legal-entity suffixes that terminate trailing-token trimming.
    /// "Acme Inc" must keep its "Inc" even though it is a short token.
    pub static ref COMPANY_ALLOWED_SUFFIXES: HashSet<&'static str> = [
        "inc", "inc.", "llc", "l.l.c.", "ltd", "ltd.", "plc", "ag", "gmbh",
        "bv", "lp", "llp", "co", "co.", "corp", "corporation", "company",
    ]
    .into_iter()
    .collect();

    /// Tokens excluded from the frequency-based company guess even when
    /// capitalized. These dominate job postings without naming anyone.
    pub static ref FREQUENCY_EXCLUSIONS: HashSet<&'static str> = [
        "apply",
        "job",
        "application",
        "role",
        "position",
        "opening",
        "team",
        "teams",
        "department",
        "company",
        "employer",
        "opportunity",
        "career",
        "careers",
        "remote",
        "hybrid",
        "full",
        "time",
        "part",
        "contract",
        "united",
        "states",
        "state",
        "city",
        "jobs",
        "global",
        "worldwide",
        "country",
    ]
    .into_iter()
    .collect();

    /// Host segments that never identify the employer (jobs.acme.io → acme).
    pub static ref GENERIC_SUBDOMAINS: HashSet<&'static str> = [
        "www", "jobs", "careers", "apply", "work", "job", "careersite",
    ]
    .into_iter()
    .collect();

    /// Short tokens that are real company-name material despite length ≤ 2.
    pub static ref SHORT_TOKEN_EXCEPTIONS: HashSet<&'static str> =
        ["ai", "ml", "xr"].into_iter().collect();

    /// Connector words allowed inside a multi-token company span
    /// ("Bank of America", "Procter & Gamble").
    pub static ref COMPANY_CONNECTORS: HashSet<&'static str> =
        ["of", "and", "the", "&"].into_iter().collect();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_sets_are_lowercase() {
        for set in [
            &*COMPANY_TRAILING_STOPWORDS,
            &*COMPANY_ALLOWED_SUFFIXES,
            &*FREQUENCY_EXCLUSIONS,
            &*GENERIC_SUBDOMAINS,
            &*SHORT_TOKEN_EXCEPTIONS,
            &*COMPANY_CONNECTORS,
        ] {
            for word in set.iter() {
                assert_eq!(
                    *word,
                    word.to_lowercase(),
                    "stopword sets must be lowercase: {word}"
                );
            }
        }
    }

    #[test]
    fn test_legal_suffixes_include_dotted_variants() {
        assert!(COMPANY_ALLOWED_SUFFIXES.contains("inc"));
        assert!(COMPANY_ALLOWED_SUFFIXES.contains("inc."));
        assert!(COMPANY_ALLOWED_SUFFIXES.contains("co."));
    }

    #[test]
    fn test_generic_subdomains_cover_common_job_hosts() {
        for segment in ["www", "jobs", "careers", "apply"] {
            assert!(GENERIC_SUBDOMAINS.contains(segment));
        }
    }

    #[test]
    fn test_short_exceptions_do_not_leak_into_stopwords() {
        for short in SHORT_TOKEN_EXCEPTIONS.iter() {
            assert!(!COMPANY_TRAILING_STOPWORDS.contains(short));
            assert!(!FREQUENCY_EXCLUSIONS.contains(short));
        }
    }
}
