use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339()
    }))
}

/// GET /
/// Service banner: available endpoints and whether AI filtering works without
/// a per-request key.
pub async fn root_handler(State(state): State<AppState>) -> Json<Value> {
    let ai_available = state.pipeline.has_default_key();
    let model = if ai_available {
        state.pipeline.model()
    } else {
        "Not configured"
    };
    Json(json!({
        "message": "Job Search API with AI Filtering is running!",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "/search-jobs - Search for jobs",
            "/ai-filter-jobs - AI-powered job analysis and filtering",
            "/supported-sites - Get supported job sites",
            "/supported-countries - Get supported countries",
            "/health - Health check"
        ],
        "ai_features": {
            "available": ai_available,
            "model": model
        },
        "search_available": state.scraper.is_some()
    }))
}
