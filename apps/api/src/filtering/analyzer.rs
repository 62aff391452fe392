//! Per-job analyzer — one bounded completion call per posting.

use tracing::warn;

use crate::filtering::models::Annotation;
use crate::filtering::prompts::{render, ANALYSIS_PROMPT_TEMPLATE};
use crate::llm_client::{CompletionClient, SamplingParams};
use crate::models::job::JobRecord;

/// Descriptions are cut to this many characters before prompting.
pub const MAX_DESCRIPTION_CHARS: usize = 2000;

/// Short, near-deterministic answers.
pub const ANALYSIS_PARAMS: SamplingParams = SamplingParams {
    max_tokens: 150,
    temperature: 0.1,
};

/// Builds the analysis prompt for a single job.
pub fn build_analysis_prompt(job: &JobRecord, analysis_prompt: &str) -> String {
    let title = job.title_or_na();
    let company = job.company_or_na();
    let location = job.location_or_na();
    let job_type = job.job_type_or_na();
    let salary_min = job.min_amount_or_na();
    let salary_max = job.max_amount_or_na();
    let date_posted = job.date_posted_or_na();
    let description = job.description_truncated(MAX_DESCRIPTION_CHARS);

    render(
        ANALYSIS_PROMPT_TEMPLATE,
        &[
            ("analysis_prompt", analysis_prompt),
            ("title", &title),
            ("company", &company),
            ("location", &location),
            ("job_type", &job_type),
            ("salary_min", &salary_min),
            ("salary_max", &salary_max),
            ("date_posted", &date_posted),
            ("description", &description),
        ],
    )
}

/// Analyzes one job. Never fails: endpoint errors become placeholder text.
pub async fn analyze_job(
    llm: &dyn CompletionClient,
    job: &JobRecord,
    analysis_prompt: &str,
    job_index: usize,
) -> Annotation {
    let prompt = build_analysis_prompt(job, analysis_prompt);

    let analysis_text = match llm.complete(&prompt, ANALYSIS_PARAMS).await {
        Ok(reply) => reply.trim().to_string(),
        Err(e) => {
            warn!(job_index, "Job analysis failed: {e}");
            format!("Analysis failed: {e}")
        }
    };

    Annotation {
        job_index,
        title: job.title_or_na(),
        company: job.company_or_na(),
        analysis_text,
        meets_criteria: None,
    }
}
