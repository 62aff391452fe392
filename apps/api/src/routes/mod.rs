pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::filtering::handlers::handle_ai_filter_jobs;
use crate::search::handlers::{
    handle_search_jobs, handle_supported_countries, handle_supported_sites,
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        // Catalog
        .route("/supported-sites", get(handle_supported_sites))
        .route("/supported-countries", get(handle_supported_countries))
        // Search forwarding
        .route("/search-jobs", post(handle_search_jobs))
        // AI analysis / filtering
        .route("/ai-filter-jobs", post(handle_ai_filter_jobs))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::filtering::batch::BatchPolicy;
    use crate::filtering::pipeline::FilterPipeline;
    use crate::filtering::testing::{ScriptedClient, ScriptedProvider};
    use crate::models::job::JobRecord;
    use crate::search::scraper::{JobScraper, ScrapeParams, ScraperError};

    struct StaticScraper {
        jobs: Vec<JobRecord>,
        seen: Mutex<Vec<ScrapeParams>>,
    }

    #[async_trait]
    impl JobScraper for StaticScraper {
        async fn scrape(&self, params: &ScrapeParams) -> Result<Vec<JobRecord>, ScraperError> {
            self.seen.lock().unwrap().push(params.clone());
            Ok(self.jobs.clone())
        }
    }

    struct FailingScraper;

    #[async_trait]
    impl JobScraper for FailingScraper {
        async fn scrape(&self, _params: &ScrapeParams) -> Result<Vec<JobRecord>, ScraperError> {
            Err(ScraperError::Upstream {
                status: 429,
                message: "rate limited".to_string(),
            })
        }
    }

    fn experience_client() -> ScriptedClient {
        ScriptedClient::new(|prompt| {
            if prompt.contains("Job Analyses:") {
                Ok("Job 0: NO\nJob 1: YES".to_string())
            } else if prompt.contains("- Company: Acme") {
                Ok("3 years".to_string())
            } else {
                Ok("5 years".to_string())
            }
        })
    }

    fn app(
        provider: Arc<ScriptedProvider>,
        default_key: Option<&str>,
        scraper: Option<Arc<dyn JobScraper>>,
    ) -> Router {
        let pipeline = FilterPipeline::new(
            provider,
            default_key.map(str::to_string),
            BatchPolicy::default(),
        );
        build_router(AppState { pipeline, scraper })
    }

    fn post_json(uri: &str, body: Value, api_key: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(key) = api_key {
            builder = builder.header("X-OpenAI-API-Key", key);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn two_jobs() -> Value {
        json!([
            {"title": "Engineer", "company": "Acme", "job_url": "https://acme.example/1"},
            {"title": "Manager", "company": "Globex", "job_url": "https://globex.example/2"}
        ])
    }

    #[tokio::test]
    async fn test_health_reports_healthy() {
        let provider = Arc::new(ScriptedProvider::new(experience_client()));
        let response = app(provider, None, None).oneshot(get("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "healthy");
    }

    #[tokio::test]
    async fn test_root_reports_ai_availability() {
        let provider = Arc::new(ScriptedProvider::new(experience_client()));
        let body = body_json(
            app(provider.clone(), None, None)
                .oneshot(get("/"))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(body["ai_features"]["available"], false);
        assert_eq!(body["ai_features"]["model"], "Not configured");

        let body = body_json(
            app(provider, Some("sk-env"), None)
                .oneshot(get("/"))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(body["ai_features"]["available"], true);
        assert_eq!(body["ai_features"]["model"], "scripted-model");
    }

    #[tokio::test]
    async fn test_ai_filter_end_to_end_with_header_key() {
        let provider = Arc::new(ScriptedProvider::new(experience_client()));
        let request = post_json(
            "/ai-filter-jobs",
            json!({
                "jobs": two_jobs(),
                "analysis_prompt": "years of experience",
                "filter_criteria": "requires 5+ years"
            }),
            Some("sk-header"),
        );

        let response = app(provider.clone(), None, None)
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["original_count"], 2);
        assert_eq!(body["filtered_count"], 1);
        assert_eq!(
            body["analyzed_jobs"][0],
            json!({
                "job_id": 0,
                "job_title": "Engineer",
                "job_company": "Acme",
                "analysis_result": "3 years",
                "meets_criteria": false
            })
        );
        assert_eq!(
            body["filtered_jobs"],
            json!([{"title": "Manager", "company": "Globex", "job_url": "https://globex.example/2"}])
        );
        assert_eq!(provider.keys(), vec!["sk-header".to_string()]);
    }

    #[tokio::test]
    async fn test_ai_filter_accepts_non_string_job_fields() {
        let provider = Arc::new(ScriptedProvider::new(experience_client()));
        let jobs = json!([
            {"title": 12345, "company": "Acme", "min_amount": "80000"},
            {"title": "Manager", "company": 42, "max_amount": 95000, "is_remote": true}
        ]);
        let request = post_json(
            "/ai-filter-jobs",
            json!({
                "jobs": jobs,
                "analysis_prompt": "years of experience",
                "filter_criteria": "requires 5+ years"
            }),
            Some("sk-header"),
        );

        let response = app(provider.clone(), None, None)
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["analyzed_jobs"][0]["job_title"], "12345");
        assert_eq!(body["analyzed_jobs"][1]["job_company"], "42");
        assert_eq!(
            body["filtered_jobs"],
            json!([{"title": "Manager", "company": 42, "max_amount": 95000, "is_remote": true}])
        );

        let calls = provider.client.calls();
        assert!(calls.iter().any(|c| c.prompt.contains("- Salary: $80000 - $N/A")));
    }

    #[tokio::test]
    async fn test_search_passes_through_non_string_job_fields() {
        let scraper = Arc::new(StaticScraper {
            jobs: vec![serde_json::from_value(
                json!({"title": 12345, "company": "Uber", "min_amount": "80000"}),
            )
            .unwrap()],
            seen: Mutex::new(Vec::new()),
        });
        let provider = Arc::new(ScriptedProvider::new(experience_client()));

        let response = app(provider, None, Some(scraper))
            .oneshot(post_json("/search-jobs", json!({"company_filter": "uber"}), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["job_count"], 1);
        assert_eq!(body["jobs"][0]["title"], 12345);
        assert_eq!(body["jobs"][0]["min_amount"], "80000");
    }

    #[tokio::test]
    async fn test_ai_filter_without_any_key_is_bad_request() {
        let provider = Arc::new(ScriptedProvider::new(experience_client()));
        let request = post_json(
            "/ai-filter-jobs",
            json!({"jobs": two_jobs(), "analysis_prompt": "skills"}),
            None,
        );

        let response = app(provider.clone(), None, None)
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "MISSING_API_KEY");
        assert_eq!(provider.client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_ai_filter_rejects_blank_analysis_prompt() {
        let provider = Arc::new(ScriptedProvider::new(experience_client()));
        let request = post_json(
            "/ai-filter-jobs",
            json!({"jobs": two_jobs(), "analysis_prompt": "  "}),
            Some("sk-header"),
        );

        let response = app(provider, None, None).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_ai_filter_without_criteria_omits_filtered_fields() {
        let provider = Arc::new(ScriptedProvider::new(experience_client()));
        let request = post_json(
            "/ai-filter-jobs",
            json!({"jobs": two_jobs(), "analysis_prompt": "years of experience"}),
            None,
        );

        let response = app(provider, Some("sk-env"), None)
            .oneshot(request)
            .await
            .unwrap();
        let body = body_json(response).await;

        assert_eq!(body["filtered_count"], Value::Null);
        assert_eq!(body["filtered_jobs"], Value::Null);
        assert_eq!(body["analyzed_jobs"][1]["meets_criteria"], true);
    }

    #[tokio::test]
    async fn test_search_applies_company_filter() {
        let scraper = Arc::new(StaticScraper {
            jobs: vec![
                serde_json::from_value(json!({"title": "PM", "company": "Uber"})).unwrap(),
                serde_json::from_value(json!({"title": "PM", "company": "Lyft"})).unwrap(),
            ],
            seen: Mutex::new(Vec::new()),
        });
        let provider = Arc::new(ScriptedProvider::new(experience_client()));
        let request = post_json(
            "/search-jobs",
            json!({"search_term": "PM", "company_filter": "uber"}),
            None,
        );

        let response = app(provider, None, Some(scraper.clone()))
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["job_count"], 1);
        assert_eq!(body["jobs"][0]["company"], "Uber");
        assert_eq!(body["message"], "Successfully found 1 jobs (filtered for company: uber)");
        assert_eq!(body["search_params"]["search_term"], "PM uber");
        assert_eq!(body["search_params"]["company_filter"], "uber");

        let seen = scraper.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].country_indeed.as_deref(), Some("USA"));
    }

    #[tokio::test]
    async fn test_search_with_no_results_reports_it() {
        let scraper = Arc::new(StaticScraper {
            jobs: vec![],
            seen: Mutex::new(Vec::new()),
        });
        let provider = Arc::new(ScriptedProvider::new(experience_client()));

        let response = app(provider, None, Some(scraper))
            .oneshot(post_json("/search-jobs", json!({}), None))
            .await
            .unwrap();
        let body = body_json(response).await;

        assert_eq!(body["success"], true);
        assert_eq!(body["job_count"], 0);
        assert_eq!(body["message"], "No jobs found matching your criteria");
    }

    #[tokio::test]
    async fn test_search_without_scraper_is_unavailable() {
        let provider = Arc::new(ScriptedProvider::new(experience_client()));
        let response = app(provider, None, None)
            .oneshot(post_json("/search-jobs", json!({}), None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_search_scraper_failure_is_server_error() {
        let provider = Arc::new(ScriptedProvider::new(experience_client()));
        let response = app(provider, None, Some(Arc::new(FailingScraper)))
            .oneshot(post_json("/search-jobs", json!({}), None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(
            body["error"]["message"],
            "Error scraping jobs: scraper returned status 429: rate limited"
        );
    }

    #[tokio::test]
    async fn test_catalog_endpoints_respond() {
        let provider = Arc::new(ScriptedProvider::new(experience_client()));
        let router = app(provider, None, None);

        let sites = body_json(router.clone().oneshot(get("/supported-sites")).await.unwrap()).await;
        assert_eq!(sites["supported_sites"][0], "linkedin");

        let countries =
            body_json(router.oneshot(get("/supported-countries")).await.unwrap()).await;
        assert!(countries["supported_countries"]
            .as_array()
            .unwrap()
            .contains(&json!("Germany")));
    }
}
