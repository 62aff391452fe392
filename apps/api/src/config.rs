use std::time::Duration;

use anyhow::{Context, Result};

use crate::filtering::batch::BatchPolicy;

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4.1-nano";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Application configuration loaded from environment variables.
/// Only malformed numeric values fail startup; every credential is optional.
#[derive(Debug, Clone)]
pub struct Config {
    /// Process-wide inference credential. Requests may override it per call.
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,
    /// Base URL of the external scraping service. Search is disabled when unset.
    pub scraper_url: Option<String>,
    pub batch_policy: BatchPolicy,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let batch_size = std::env::var("AI_BATCH_SIZE")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<usize>()
            .context("AI_BATCH_SIZE must be a positive integer")?;
        let pause_ms = std::env::var("AI_BATCH_PAUSE_MS")
            .unwrap_or_else(|_| "1000".to_string())
            .parse::<u64>()
            .context("AI_BATCH_PAUSE_MS must be a whole number of milliseconds")?;

        Ok(Config {
            openai_api_key: optional_env("OPENAI_API_KEY"),
            openai_model: optional_env("OPENAI_MODEL")
                .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            openai_base_url: optional_env("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            scraper_url: optional_env("SCRAPER_URL"),
            batch_policy: BatchPolicy::new(batch_size, Duration::from_millis(pause_ms)),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Reads an env var, treating empty or whitespace-only values as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
