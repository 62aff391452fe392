use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::job::JobRecord;

/// Per-job analysis result plus the optional filter verdict.
///
/// Wire names follow the public API contract (`job_id`, `job_title`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Position of the job in the request's `jobs` list.
    #[serde(rename = "job_id")]
    pub job_index: usize,
    #[serde(rename = "job_title")]
    pub title: String,
    #[serde(rename = "job_company")]
    pub company: String,
    #[serde(rename = "analysis_result")]
    pub analysis_text: String,
    /// Unset until the criteria phase runs.
    pub meets_criteria: Option<bool>,
}

/// Job index → meets criteria, as parsed from the filter reply.
pub type FilterDecision = HashMap<usize, bool>;

/// Request body for `POST /ai-filter-jobs`.
#[derive(Debug, Clone, Deserialize)]
pub struct AiFilterRequest {
    pub jobs: Vec<JobRecord>,
    /// What to extract from every posting, e.g. "years of experience required".
    pub analysis_prompt: String,
    /// How to filter, e.g. "requires 5+ years". Blank means no filtering.
    #[serde(default)]
    pub filter_criteria: Option<String>,
}

impl AiFilterRequest {
    /// The filter instruction, if one was actually given.
    pub fn filter_instruction(&self) -> Option<&str> {
        self.filter_criteria
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AiFilterResponse {
    pub success: bool,
    pub message: String,
    pub original_count: usize,
    pub analyzed_jobs: Vec<Annotation>,
    pub filtered_count: Option<usize>,
    pub filtered_jobs: Option<Vec<JobRecord>>,
    pub timestamp: String,
}
