//! Axum route handlers for the AI filtering API.

use axum::{extract::State, http::HeaderMap, Json};

use crate::errors::AppError;
use crate::filtering::models::{AiFilterRequest, AiFilterResponse};
use crate::state::AppState;

/// Per-request credential override.
pub const API_KEY_HEADER: &str = "x-openai-api-key";

/// POST /ai-filter-jobs
///
/// Analyzes every posting against `analysis_prompt` and, when
/// `filter_criteria` is given, narrows the list to the postings that meet it.
pub async fn handle_ai_filter_jobs(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<AiFilterRequest>,
) -> Result<Json<AiFilterResponse>, AppError> {
    if request.analysis_prompt.trim().is_empty() {
        return Err(AppError::Validation(
            "analysis_prompt cannot be empty".to_string(),
        ));
    }

    let api_key = headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());

    let response = state.pipeline.run(&request, api_key).await?;
    Ok(Json(response))
}
