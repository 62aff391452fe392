//! AI filter pipeline — orchestrates analysis and filtering for one request.
//!
//! Flow: resolve credential → batch analysis (every job) → criteria filter →
//!       rebuild filtered records by index → assemble response.
//!
//! Per-job and filter-phase failures are absorbed into the annotations.
//! Only a missing credential or a broken internal invariant is an error.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::info;

use crate::errors::AppError;
use crate::filtering::batch::{analyze_in_batches, BatchPolicy};
use crate::filtering::criteria::apply_criteria;
use crate::filtering::models::{AiFilterRequest, AiFilterResponse, Annotation};
use crate::llm_client::ClientProvider;
use crate::models::job::JobRecord;

#[derive(Clone)]
pub struct FilterPipeline {
    provider: Arc<dyn ClientProvider>,
    /// Process-wide credential; a per-request key takes precedence.
    default_api_key: Option<String>,
    policy: BatchPolicy,
}

impl FilterPipeline {
    pub fn new(
        provider: Arc<dyn ClientProvider>,
        default_api_key: Option<String>,
        policy: BatchPolicy,
    ) -> Self {
        Self {
            provider,
            default_api_key,
            policy,
        }
    }

    /// Whether a process-wide credential is configured.
    pub fn has_default_key(&self) -> bool {
        self.default_api_key.is_some()
    }

    pub fn model(&self) -> &str {
        self.provider.model()
    }

    /// Picks the per-request key if non-blank, else the configured one.
    pub fn resolve_api_key<'a>(
        &'a self,
        override_key: Option<&'a str>,
    ) -> Result<&'a str, AppError> {
        override_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .or(self.default_api_key.as_deref())
            .ok_or(AppError::MissingApiKey)
    }

    pub async fn run(
        &self,
        request: &AiFilterRequest,
        api_key_override: Option<&str>,
    ) -> Result<AiFilterResponse, AppError> {
        let api_key = self.resolve_api_key(api_key_override)?;

        let started = Instant::now();
        let original_count = request.jobs.len();

        if original_count == 0 {
            return Ok(AiFilterResponse {
                success: true,
                message: "No jobs provided for analysis".to_string(),
                original_count: 0,
                analyzed_jobs: vec![],
                filtered_count: None,
                filtered_jobs: None,
                timestamp: Utc::now().to_rfc3339(),
            });
        }

        let filter_criteria = request.filter_instruction();
        info!(
            jobs = original_count,
            analysis_prompt = %request.analysis_prompt,
            filter_criteria = filter_criteria.unwrap_or("<none>"),
            "Starting AI analysis"
        );

        let llm = self.provider.client_for(api_key);

        let mut annotations = analyze_in_batches(
            llm.as_ref(),
            &request.jobs,
            &request.analysis_prompt,
            &self.policy,
        )
        .await;

        apply_criteria(llm.as_ref(), &mut annotations, filter_criteria).await;

        let filtered_jobs = match filter_criteria {
            Some(_) => Some(select_matching(&request.jobs, &annotations)?),
            None => None,
        };
        let filtered_count = filtered_jobs.as_ref().map(Vec::len);

        let elapsed = started.elapsed().as_secs_f64();
        let mut message = format!(
            "Successfully analyzed {original_count} jobs in {elapsed:.1} seconds"
        );
        if let Some(count) = filtered_count {
            message.push_str(&format!(" and filtered to {count} jobs"));
            info!(filtered = count, "Filtered jobs meeting criteria");
        }

        Ok(AiFilterResponse {
            success: true,
            message,
            original_count,
            analyzed_jobs: annotations,
            filtered_count,
            filtered_jobs,
            timestamp: Utc::now().to_rfc3339(),
        })
    }
}

/// Original records whose annotation met the criteria, in input order.
fn select_matching(
    jobs: &[JobRecord],
    annotations: &[Annotation],
) -> Result<Vec<JobRecord>, AppError> {
    if jobs.len() != annotations.len() {
        return Err(AppError::Pipeline(format!(
            "analyzed {} jobs but received {}",
            annotations.len(),
            jobs.len()
        )));
    }

    annotations
        .iter()
        .filter(|a| a.meets_criteria == Some(true))
        .map(|a| {
            jobs.get(a.job_index).cloned().ok_or_else(|| {
                AppError::Pipeline(format!("annotation index {} has no job", a.job_index))
            })
        })
        .collect()
}
