//! Axum route handlers for the Letters API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::fetch::fetch_job_description;
use crate::generation::pipeline::{
    generate_letter, GenerateLetterRequest, GenerateLetterResponse,
};
use crate::inference::{infer_company, infer_recipient_name, InferenceHints};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct InferRecipientRequest {
    pub job_source: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InferRecipientResponse {
    pub recipient_company: String,
    pub recipient_name: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/letters/infer-recipient
///
/// Fetches the posting and runs recipient inference only. Useful for
/// previewing who the letter will address before spending an LLM call.
pub async fn handle_infer_recipient(
    State(state): State<AppState>,
    Json(request): Json<InferRecipientRequest>,
) -> Result<Json<InferRecipientResponse>, AppError> {
    if request.job_source.trim().is_empty() {
        return Err(AppError::Validation(
            "job_source cannot be empty".to_string(),
        ));
    }

    let job_description = fetch_job_description(&state.http, &request.job_source).await?;

    let hints = InferenceHints {
        explicit_company: request.company.as_deref(),
        recipient_company: None,
        role: request.role.as_deref(),
        job_source: &request.job_source,
        job_description: &job_description,
    };
    let recipient_company = infer_company(&hints);
    let recipient_name =
        infer_recipient_name(&job_description, Some(&recipient_company), &request.job_source);

    Ok(Json(InferRecipientResponse {
        recipient_company,
        recipient_name,
    }))
}

/// POST /api/v1/letters/generate
///
/// Full pipeline: fetch → infer → prompt → LLM → sanitize → render → compile.
pub async fn handle_generate_letter(
    State(state): State<AppState>,
    Json(request): Json<GenerateLetterRequest>,
) -> Result<Json<GenerateLetterResponse>, AppError> {
    if request.job_source.trim().is_empty() {
        return Err(AppError::Validation(
            "job_source cannot be empty".to_string(),
        ));
    }

    let response = generate_letter(&state.http, &state.llm, &state.config, request).await?;

    Ok(Json(response))
}
