//! Company narrowing applied after the scraper returns.

use tracing::info;

use crate::models::job::JobRecord;

/// Keeps records whose company starts with `company_filter`, ignoring case
/// and surrounding whitespace. Records with no company are dropped.
pub fn filter_by_company(jobs: Vec<JobRecord>, company_filter: &str) -> Vec<JobRecord> {
    let needle = company_filter.trim().to_lowercase();
    if needle.is_empty() {
        return jobs;
    }

    let before = jobs.len();
    let kept: Vec<JobRecord> = jobs
        .into_iter()
        .filter(|job| {
            job.company_text()
                .map(|c| c.trim().to_lowercase().starts_with(&needle))
                .unwrap_or(false)
        })
        .collect();

    info!(
        company = %needle,
        before,
        after = kept.len(),
        "Applied company filter"
    );
    kept
}

/// Appends the company to the search term so the scraper ranks it higher.
pub fn combined_search_term(search_term: &str, company_filter: Option<&str>) -> String {
    match company_filter.map(str::trim).filter(|c| !c.is_empty()) {
        Some(company) => format!("{search_term} {company}").trim().to_string(),
        None => search_term.to_string(),
    }
}
