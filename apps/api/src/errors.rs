use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::search::scraper::ScraperError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// No inference credential in the request header nor in the environment.
    #[error("OpenAI API key is required. Please provide it in the X-OpenAI-API-Key header or configure OPENAI_API_KEY in your environment.")]
    MissingApiKey,

    #[error("Job search is unavailable: no scraping service is configured")]
    ScraperUnavailable,

    #[error("Error scraping jobs: {0}")]
    Scraper(#[from] ScraperError),

    #[error("Error in AI filtering: {0}")]
    Pipeline(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::MissingApiKey => (StatusCode::BAD_REQUEST, "MISSING_API_KEY"),
            AppError::ScraperUnavailable => {
                (StatusCode::SERVICE_UNAVAILABLE, "SCRAPER_UNAVAILABLE")
            }
            AppError::Scraper(e) => {
                tracing::error!("Scraper error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "SCRAPER_ERROR")
            }
            AppError::Pipeline(msg) => {
                tracing::error!("AI filtering pipeline error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "PIPELINE_ERROR")
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let message = match &self {
            AppError::Internal(_) => "An internal server error occurred".to_string(),
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
