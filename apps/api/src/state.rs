use std::sync::Arc;

use crate::filtering::pipeline::FilterPipeline;
use crate::search::scraper::JobScraper;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// AI annotation/filter pipeline. Holds the process-wide credential.
    pub pipeline: FilterPipeline,
    /// `None` when no scraping service is configured; search then answers 503.
    pub scraper: Option<Arc<dyn JobScraper>>,
}
