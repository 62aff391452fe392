//! Scraper seam — job retrieval is delegated to an external scraping service.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::models::job::JobRecord;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("scraper returned status {status}: {message}")]
    Upstream { status: u16, message: String },
}

/// Outbound search parameters. `None` fields are omitted on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScrapeParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_name: Option<Vec<String>>,
    pub search_term: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_remote: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results_wanted: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours_old: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_indeed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub easy_apply: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbose: Option<u8>,
}

#[async_trait]
pub trait JobScraper: Send + Sync {
    /// Runs one search. An empty result is not an error.
    async fn scrape(&self, params: &ScrapeParams) -> Result<Vec<JobRecord>, ScraperError>;
}

/// Accepts either a bare array or `{ "jobs": [...] }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ScrapeReply {
    Wrapped { jobs: Vec<JobRecord> },
    Bare(Vec<JobRecord>),
}

/// Forwards searches to a scraping sidecar over HTTP (`POST {base}/scrape`).
#[derive(Clone)]
pub struct HttpJobScraper {
    client: Client,
    endpoint: String,
}

impl HttpJobScraper {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!("{}/scrape", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl JobScraper for HttpJobScraper {
    async fn scrape(&self, params: &ScrapeParams) -> Result<Vec<JobRecord>, ScraperError> {
        debug!(endpoint = %self.endpoint, ?params, "Forwarding search to scraper");

        let response = self.client.post(&self.endpoint).json(params).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ScraperError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let jobs = match response.json::<ScrapeReply>().await? {
            ScrapeReply::Wrapped { jobs } | ScrapeReply::Bare(jobs) => jobs,
        };

        info!(count = jobs.len(), "Scraper returned jobs");
        Ok(jobs)
    }
}
