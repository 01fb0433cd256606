use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status, version and the size of the loaded dataset.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let cities = state.cities.load().await;
    let services = state.catalog.load().await;
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "cabling-api",
        "cities": cities.len(),
        "services": services.len(),
        "contentEnrichment": state.content.is_enriched(),
    }))
}
