//! Static catalog of the sites and countries the scraper understands.

use serde::Serialize;

pub const SUPPORTED_SITES: &[(&str, &str)] = &[
    ("linkedin", "Global search, may require rate limiting"),
    (
        "indeed",
        "Best scraper with no rate limiting, supports many countries",
    ),
    (
        "glassdoor",
        "Supports many countries, requires country_indeed parameter",
    ),
    ("zip_recruiter", "US/Canada only"),
    (
        "google",
        "Requires very specific search syntax in google_search_term",
    ),
    ("bayt", "International search, uses search_term only"),
    ("naukri", "India-focused job board"),
];

pub const SUPPORTED_COUNTRIES: &[&str] = &[
    "Argentina", "Australia", "Austria", "Bahrain", "Belgium", "Brazil",
    "Canada", "Chile", "China", "Colombia", "Costa Rica", "Czech Republic",
    "Denmark", "Ecuador", "Egypt", "Finland", "France", "Germany", "Greece",
    "Hong Kong", "Hungary", "India", "Indonesia", "Ireland", "Israel", "Italy",
    "Japan", "Kuwait", "Luxembourg", "Malaysia", "Mexico", "Morocco",
    "Netherlands", "New Zealand", "Nigeria", "Norway", "Oman", "Pakistan",
    "Panama", "Peru", "Philippines", "Poland", "Portugal", "Qatar", "Romania",
    "Saudi Arabia", "Singapore", "South Africa", "South Korea", "Spain",
    "Sweden", "Switzerland", "Taiwan", "Thailand", "Turkey", "Ukraine",
    "United Arab Emirates", "UK", "USA", "Uruguay", "Venezuela", "Vietnam",
];

const COUNTRIES_NOTE: &str = "These countries are supported for Indeed and Glassdoor. \
    LinkedIn searches globally, ZipRecruiter supports US/Canada only.";

#[derive(Debug, Serialize)]
pub struct SupportedSites {
    pub supported_sites: Vec<&'static str>,
    pub notes: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct SupportedCountries {
    pub supported_countries: &'static [&'static str],
    pub note: &'static str,
}

pub fn supported_sites() -> SupportedSites {
    SupportedSites {
        supported_sites: SUPPORTED_SITES.iter().map(|(site, _)| *site).collect(),
        notes: SUPPORTED_SITES
            .iter()
            .map(|(site, note)| (site.to_string(), serde_json::Value::from(*note)))
            .collect(),
    }
}

pub fn supported_countries() -> SupportedCountries {
    SupportedCountries {
        supported_countries: SUPPORTED_COUNTRIES,
        note: COUNTRIES_NOTE,
    }
}
