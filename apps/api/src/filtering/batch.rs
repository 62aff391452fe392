//! Batch driver — runs the per-job analyzer in fixed-size concurrent chunks
//! with a static pause between chunks to stay under the endpoint's rate limit.

use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, info};

use crate::filtering::analyzer::analyze_job;
use crate::filtering::models::Annotation;
use crate::llm_client::CompletionClient;
use crate::models::job::JobRecord;

pub const DEFAULT_BATCH_SIZE: usize = 5;
pub const DEFAULT_BATCH_PAUSE: Duration = Duration::from_secs(1);

/// How many analyses run at once, and how long to wait between batches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchPolicy {
    size: usize,
    pause: Duration,
}

impl BatchPolicy {
    /// A zero batch size is coerced to 1.
    pub fn new(size: usize, pause: Duration) -> Self {
        Self {
            size: size.max(1),
            pause,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn pause(&self) -> Duration {
        self.pause
    }

    /// Number of batches needed for `jobs` jobs.
    pub fn batch_count(&self, jobs: usize) -> usize {
        jobs.div_ceil(self.size)
    }
}

impl Default for BatchPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_BATCH_SIZE, DEFAULT_BATCH_PAUSE)
    }
}

/// Analyzes every job, returning annotations in input order.
///
/// Each batch is awaited in full before the next starts. No pause follows the
/// final batch.
pub async fn analyze_in_batches(
    llm: &dyn CompletionClient,
    jobs: &[JobRecord],
    analysis_prompt: &str,
    policy: &BatchPolicy,
) -> Vec<Annotation> {
    let mut annotations = Vec::with_capacity(jobs.len());
    let total_batches = policy.batch_count(jobs.len());

    for (batch_number, chunk) in jobs.chunks(policy.size()).enumerate() {
        let offset = batch_number * policy.size();
        let futures: Vec<_> = chunk
            .iter()
            .enumerate()
            .map(|(i, job)| analyze_job(llm, job, analysis_prompt, offset + i))
            .collect();

        // join_all yields results in the order the futures were supplied.
        let batch_results = join_all(futures).await;
        annotations.extend(batch_results);

        debug!(
            batch = batch_number + 1,
            total_batches,
            analyzed = annotations.len(),
            "Analysis batch complete"
        );

        if batch_number + 1 < total_batches {
            tokio::time::sleep(policy.pause()).await;
        }
    }

    info!(
        total = annotations.len(),
        batches = total_batches,
        "Job analysis complete"
    );

    annotations
}
