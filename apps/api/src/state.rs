use crate::config::Config;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    /// Outbound client for job-posting retrieval (browser user agent, 20s timeout).
    pub http: reqwest::Client,
    pub config: Config,
}
