//! Sitemap endpoints. Documents are rebuilt from the cached data on every
//! request; `lastmod` is the request time.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::Utc;

use crate::sitemap::{self, xml, SitemapOptions, SitemapSet};
use crate::state::AppState;

fn xml_response(body: String) -> Response {
    ([(header::CONTENT_TYPE, "application/xml")], body).into_response()
}

async fn build_set(state: &AppState) -> SitemapSet {
    let states = state.cities.all_states().await;
    let services = state.catalog.load().await;
    sitemap::generate(
        &states,
        &services,
        &state.config.base_url,
        Utc::now(),
        SitemapOptions {
            include_service_pages: state.config.sitemap_include_services,
        },
    )
}

/// GET /sitemap.xml
pub async fn handle_flat_sitemap(State(state): State<AppState>) -> Response {
    let states = state.cities.all_states().await;
    let entries = sitemap::flat(&states, &state.config.base_url, Utc::now());
    xml_response(xml::urlset(&entries))
}

/// GET /sitemap-index.xml
pub async fn handle_sitemap_index(State(state): State<AppState>) -> Response {
    let set = build_set(&state).await;
    xml_response(xml::sitemap_index(&set.index))
}

/// GET /sitemaps/:file where `file` is `{state_slug}.xml`.
pub async fn handle_state_sitemap(
    State(state): State<AppState>,
    Path(file): Path<String>,
) -> Response {
    let Some(state_slug) = file.strip_suffix(".xml") else {
        return (StatusCode::NOT_FOUND, "Sitemap not found").into_response();
    };

    let mut set = build_set(&state).await;
    match set.states.remove(state_slug) {
        Some(entries) => xml_response(xml::urlset(&entries)),
        None => (StatusCode::NOT_FOUND, "Sitemap not found").into_response(),
    }
}
