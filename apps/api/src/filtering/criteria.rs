//! Criteria filter — one batched completion call deciding YES/NO per job.
//!
//! The reply format `Job <index>: YES|NO` is a fixed contract with the model.
//! Malformed lines are skipped; any job the reply does not mention is rejected.

use tracing::{info, warn};

use crate::filtering::models::{Annotation, FilterDecision};
use crate::filtering::prompts::{render, FILTER_PROMPT_TEMPLATE};
use crate::llm_client::{CompletionClient, SamplingParams};

pub const FILTER_PARAMS: SamplingParams = SamplingParams {
    max_tokens: 200,
    temperature: 0.1,
};

/// Builds the single filter prompt listing every job with its analysis.
pub fn build_filter_prompt(annotations: &[Annotation], filter_criteria: &str) -> String {
    let analyses = annotations
        .iter()
        .map(|a| {
            format!(
                "Job {}: {} at {} - Analysis: {}",
                a.job_index, a.title, a.company, a.analysis_text
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    render(
        FILTER_PROMPT_TEMPLATE,
        &[("filter_criteria", filter_criteria), ("analyses", &analyses)],
    )
}

/// Parses `Job <n>: YES|NO` lines. Later lines for the same index win.
pub fn parse_filter_reply(reply: &str) -> FilterDecision {
    let mut decisions = FilterDecision::new();

    for line in reply.lines() {
        let upper = line.to_uppercase();
        if !line.contains(':') || !(upper.contains("YES") || upper.contains("NO")) {
            continue;
        }

        let Some((job_part, decision)) = line.split_once(':') else {
            continue;
        };

        let job_part = job_part.trim();
        let index_text = job_part.strip_prefix("Job").unwrap_or(job_part).trim();
        let Ok(index) = index_text.parse::<usize>() else {
            continue;
        };

        decisions.insert(index, decision.to_uppercase().contains("YES"));
    }

    decisions
}

/// Sets `meets_criteria` on every annotation.
///
/// - No instruction: everything passes, no endpoint call.
/// - Endpoint failure: everything is rejected.
pub async fn apply_criteria(
    llm: &dyn CompletionClient,
    annotations: &mut [Annotation],
    filter_criteria: Option<&str>,
) {
    let Some(criteria) = filter_criteria else {
        for annotation in annotations.iter_mut() {
            annotation.meets_criteria = Some(true);
        }
        return;
    };

    let prompt = build_filter_prompt(annotations, criteria);

    let decisions = match llm.complete(&prompt, FILTER_PARAMS).await {
        Ok(reply) => parse_filter_reply(reply.trim()),
        Err(e) => {
            warn!("Filter call failed, rejecting all jobs: {e}");
            FilterDecision::new()
        }
    };

    for annotation in annotations.iter_mut() {
        annotation.meets_criteria =
            Some(decisions.get(&annotation.job_index).copied().unwrap_or(false));
    }

    info!(
        accepted = annotations
            .iter()
            .filter(|a| a.meets_criteria == Some(true))
            .count(),
        total = annotations.len(),
        "Criteria filter applied"
    );
}
