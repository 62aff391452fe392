use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Placeholder rendered into prompts for any field a posting does not carry.
pub const NOT_AVAILABLE: &str = "N/A";

/// A single job posting as returned by the scraper.
///
/// Scrapers emit many source-specific columns, and the same column may arrive
/// as a string on one site and a number on another. The fields the AI pipeline
/// reads are named but hold any JSON value; everything else rides along in
/// `extra` and is serialized back out untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_type: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_amount: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_amount: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_posted: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl JobRecord {
    pub fn title_or_na(&self) -> String {
        scalar_or_na(&self.title)
    }

    pub fn company_or_na(&self) -> String {
        scalar_or_na(&self.company)
    }

    pub fn location_or_na(&self) -> String {
        scalar_or_na(&self.location)
    }

    pub fn job_type_or_na(&self) -> String {
        scalar_or_na(&self.job_type)
    }

    pub fn date_posted_or_na(&self) -> String {
        scalar_or_na(&self.date_posted)
    }

    pub fn min_amount_or_na(&self) -> String {
        scalar_or_na(&self.min_amount)
    }

    pub fn max_amount_or_na(&self) -> String {
        scalar_or_na(&self.max_amount)
    }

    /// Company as text, if the record carries a non-null one.
    pub fn company_text(&self) -> Option<String> {
        self.company.as_ref().and_then(scalar_text)
    }

    /// Description cut to at most `max_chars` characters, or `N/A`.
    pub fn description_truncated(&self, max_chars: usize) -> String {
        match self.description.as_ref().and_then(scalar_text) {
            Some(text) => text.chars().take(max_chars).collect(),
            None => NOT_AVAILABLE.to_string(),
        }
    }
}

/// Text form of a JSON value. Strings are unquoted; `null` has none.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn scalar_or_na(field: &Option<Value>) -> String {
    field
        .as_ref()
        .and_then(scalar_text)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
