// Prompt templates for the AI filtering pipeline.
// Placeholders in `{braces}` are substituted with `render` before sending.

/// Per-job analysis prompt.
/// Replace: {analysis_prompt}, {title}, {company}, {location}, {job_type},
///          {salary_min}, {salary_max}, {date_posted}, {description}
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze this job posting based on the following request: "{analysis_prompt}"

Job Information:
- Title: {title}
- Company: {company}
- Location: {location}
- Type: {job_type}
- Salary: ${salary_min} - ${salary_max}
- Posted: {date_posted}
- Description: {description}

Please provide a concise analysis (max 100 words) that directly answers the request.
If asking about years of experience, extract the specific number or range.
If asking about skills, list the key technical skills mentioned.
If asking about salary, provide the compensation details.

Response format: Provide only the direct answer to the analysis request."#;

/// Batched filter prompt. The reply format below is a fixed contract with the
/// line parser in `criteria.rs`.
/// Replace: {filter_criteria}, {analyses}
pub const FILTER_PROMPT_TEMPLATE: &str = r#"Based on the following job analyses, determine which jobs meet this criteria: "{filter_criteria}"

Job Analyses:
{analyses}

For each job, respond with ONLY the job ID followed by either "YES" or "NO".
Format: "Job 1: YES" or "Job 1: NO"

Example response:
Job 1: YES
Job 2: NO
Job 3: YES"#;

/// Substitutes `{key}` placeholders in a single left-to-right pass.
///
/// Values are never rescanned, so a job description that happens to contain
/// `{company}` stays literal. Unknown placeholders are left in place.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let value = after.find('}').and_then(|close| {
            let key = &after[..close];
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v, close))
        });
        match value {
            Some((v, close)) => {
                out.push_str(v);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
