//! Axum route handlers for job search and the site/country catalog.

use axum::{extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::models::job::JobRecord;
use crate::search::catalog::{supported_countries, supported_sites, SupportedCountries, SupportedSites};
use crate::search::company::{combined_search_term, filter_by_company};
use crate::search::scraper::ScrapeParams;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Search request. Omitted fields take the defaults below; an explicit
/// `null` disables the parameter entirely.
#[derive(Debug, Clone, Deserialize)]
pub struct JobSearchRequest {
    #[serde(default = "default_sites")]
    pub site_name: Option<Vec<String>>,
    #[serde(default = "default_search_term")]
    pub search_term: String,
    #[serde(default)]
    pub company_filter: Option<String>,
    #[serde(default = "default_country")]
    pub location: Option<String>,
    #[serde(default = "default_distance")]
    pub distance: Option<u32>,
    #[serde(default)]
    pub job_type: Option<String>,
    #[serde(default)]
    pub is_remote: Option<bool>,
    #[serde(default = "default_results_wanted")]
    pub results_wanted: Option<u32>,
    #[serde(default = "default_hours_old")]
    pub hours_old: Option<u32>,
    #[serde(default = "default_country")]
    pub country_indeed: Option<String>,
    #[serde(default)]
    pub easy_apply: Option<bool>,
    #[serde(default = "default_description_format")]
    pub description_format: Option<String>,
    #[serde(default = "default_offset")]
    pub offset: Option<u32>,
    #[serde(default = "default_verbose")]
    pub verbose: Option<u8>,
}

fn default_sites() -> Option<Vec<String>> {
    Some(vec!["indeed".to_string()])
}

fn default_search_term() -> String {
    "Product Manager".to_string()
}

fn default_country() -> Option<String> {
    Some("USA".to_string())
}

fn default_distance() -> Option<u32> {
    Some(50)
}

fn default_results_wanted() -> Option<u32> {
    Some(1000)
}

fn default_hours_old() -> Option<u32> {
    Some(10000)
}

fn default_description_format() -> Option<String> {
    Some("markdown".to_string())
}

fn default_offset() -> Option<u32> {
    Some(0)
}

fn default_verbose() -> Option<u8> {
    Some(2)
}

impl JobSearchRequest {
    /// Company filter, if non-blank.
    pub fn company(&self) -> Option<&str> {
        self.company_filter
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    pub fn to_scrape_params(&self) -> ScrapeParams {
        ScrapeParams {
            site_name: self.site_name.clone(),
            search_term: combined_search_term(&self.search_term, self.company()),
            location: self.location.clone(),
            distance: self.distance,
            job_type: self.job_type.clone(),
            is_remote: self.is_remote,
            results_wanted: self.results_wanted,
            hours_old: self.hours_old,
            country_indeed: self.country_indeed.clone(),
            easy_apply: self.easy_apply,
            description_format: self.description_format.clone(),
            offset: self.offset,
            verbose: self.verbose,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct JobSearchResponse {
    pub success: bool,
    pub message: String,
    pub job_count: usize,
    pub jobs: Vec<JobRecord>,
    pub search_params: Value,
    pub timestamp: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /search-jobs
///
/// Forwards the search to the scraper, then narrows by company if asked.
pub async fn handle_search_jobs(
    State(state): State<AppState>,
    Json(request): Json<JobSearchRequest>,
) -> Result<Json<JobSearchResponse>, AppError> {
    let scraper = state.scraper.as_ref().ok_or(AppError::ScraperUnavailable)?;

    let params = request.to_scrape_params();
    let company = request.company();
    info!(
        search_term = %params.search_term,
        company_filter = company.unwrap_or("<none>"),
        "Searching jobs"
    );

    let mut jobs = scraper.scrape(&params).await?;
    if let Some(company) = company {
        jobs = filter_by_company(jobs, company);
    }

    let mut search_params =
        serde_json::to_value(&params).map_err(|e| AppError::Internal(e.into()))?;
    if let Value::Object(map) = &mut search_params {
        map.insert(
            "company_filter".to_string(),
            request.company_filter.clone().into(),
        );
    }

    let message = match (jobs.is_empty(), company) {
        (false, Some(c)) => format!(
            "Successfully found {} jobs (filtered for company: {c})",
            jobs.len()
        ),
        (false, None) => format!("Successfully found {} jobs", jobs.len()),
        (true, Some(c)) => format!("No jobs found matching your criteria for company '{c}'"),
        (true, None) => "No jobs found matching your criteria".to_string(),
    };

    Ok(Json(JobSearchResponse {
        success: true,
        message,
        job_count: jobs.len(),
        jobs,
        search_params,
        timestamp: Utc::now().to_rfc3339(),
    }))
}

/// GET /supported-sites
pub async fn handle_supported_sites() -> Json<SupportedSites> {
    Json(supported_sites())
}

/// GET /supported-countries
pub async fn handle_supported_countries() -> Json<SupportedCountries> {
    Json(supported_countries())
}
