// AI annotation and filtering of scraped job postings.
// Implements: per-job analysis, batched execution, criteria filtering, orchestration.
// All inference calls go through llm_client traits, never directly over HTTP here.

pub mod analyzer;
pub mod batch;
pub mod criteria;
pub mod handlers;
pub mod models;
pub mod pipeline;
pub mod prompts;

#[cfg(test)]
pub(crate) mod testing;
