mod catalog;
mod cities;
mod config;
mod content;
mod errors;
mod leads;
mod llm_client;
mod models;
mod pages;
mod routes;
mod sitemap;
mod slug;
mod sources;
mod state;

use anyhow::{bail, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::content::ContentGenerator;
use crate::llm_client::{LlmClient, TextGenerator};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; malformed values fail startup
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log,
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cabling API v{}", env!("CARGO_PKG_VERSION"));

    // One HTTP client shared by the CMS source, CRM webhook and planner relay
    let http = reqwest::Client::builder()
        .timeout(config.http_timeout)
        .build()?;

    // Optional LLM enrichment of page content
    let enricher: Option<Arc<dyn TextGenerator>> = match &config.openai_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone(), config.http_timeout)?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(Arc::new(llm))
        }
        None => {
            info!("OPENAI_API_KEY not set; page content is template-only");
            None
        }
    };

    let state = AppState::new(config.clone(), http, ContentGenerator::new(enricher));

    // Warm the write-once caches before accepting traffic
    let cities = state.cities.load().await;
    if cities.is_empty() {
        bail!("No cities available from any source; refusing to start");
    }
    let services = state.catalog.load().await;
    info!("Loaded {} cities and {} services", cities.len(), services.len());

    if config.crm_webhook_url.is_none() {
        warn!("CRM_WEBHOOK_URL not set; leads will be classified but not forwarded");
    }
    if config.planner_recipients.is_empty() {
        warn!("PLANNER_RECIPIENTS not set; planner submissions will not be relayed");
    }

    // Build router
    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
