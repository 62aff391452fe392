mod config;
mod errors;
mod filtering;
mod llm_client;
mod models;
mod routes;
mod search;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::filtering::pipeline::FilterPipeline;
use crate::llm_client::OpenAiProvider;
use crate::routes::build_router;
use crate::search::scraper::{HttpJobScraper, JobScraper};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting job search API v{}", env!("CARGO_PKG_VERSION"));

    let provider = Arc::new(OpenAiProvider::new(
        config.openai_base_url.clone(),
        config.openai_model.clone(),
    ));
    if config.openai_api_key.is_some() {
        info!("AI filtering enabled (model: {})", config.openai_model);
    } else {
        warn!("OPENAI_API_KEY not set; AI filtering requires the X-OpenAI-API-Key header");
    }

    let pipeline = FilterPipeline::new(
        provider,
        config.openai_api_key.clone(),
        config.batch_policy,
    );
    info!(
        "Batch policy: {} concurrent analyses, {}ms pause",
        config.batch_policy.size(),
        config.batch_policy.pause().as_millis()
    );

    let scraper = match &config.scraper_url {
        Some(url) => {
            info!("Forwarding searches to scraper at {url}");
            let scraper: Arc<dyn JobScraper> = Arc::new(HttpJobScraper::new(url));
            Some(scraper)
        }
        None => {
            warn!("SCRAPER_URL not set; /search-jobs will answer 503");
            None
        }
    };

    let state = AppState { pipeline, scraper };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
