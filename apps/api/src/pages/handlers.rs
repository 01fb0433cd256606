//! Axum route handlers for page data.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::errors::AppError;
use crate::models::{City, Service};
use crate::pages::{
    maps, schema, static_params, CityPage, PageMetadata, ServicePage, StateHub, StateSummary,
    StaticParams, CITY_PAGE_NEARBY, SERVICE_PAGE_NEARBY,
};
use crate::state::AppState;

/// GET /api/v1/states
pub async fn handle_list_states(State(state): State<AppState>) -> Json<Vec<StateSummary>> {
    let states = state.cities.all_states().await;
    Json(states.iter().map(StateSummary::from).collect())
}

/// GET /api/v1/states/:state
///
/// Accepts `georgia`, `ga` and `georgia-network-cabling`.
pub async fn handle_state_hub(
    State(state): State<AppState>,
    Path(state_slug): Path<String>,
) -> Result<Json<StateHub>, AppError> {
    let state_data = state
        .cities
        .state_by_slug(&state_slug)
        .await
        .ok_or_else(|| AppError::NotFound(format!("State '{state_slug}' not found")))?;
    let services = state.catalog.load().await.to_vec();

    Ok(Json(StateHub {
        state: state_data,
        services,
    }))
}

/// GET /api/v1/states/:state/cities
///
/// Most populous first. An unknown state is a 404 rather than an empty list.
pub async fn handle_state_cities(
    State(state): State<AppState>,
    Path(state_slug): Path<String>,
) -> Result<Json<Vec<City>>, AppError> {
    let cities = state.cities.cities_by_state(&state_slug).await;
    if cities.is_empty() {
        return Err(AppError::NotFound(format!("State '{state_slug}' not found")));
    }
    Ok(Json(cities))
}

/// GET /api/v1/cities/:state/:city
pub async fn handle_city_page(
    State(state): State<AppState>,
    Path((state_slug, city_slug)): Path<(String, String)>,
) -> Result<Json<CityPage>, AppError> {
    let city = state
        .cities
        .city_by_slug(&state_slug, &city_slug)
        .await
        .ok_or_else(|| AppError::NotFound(format!("City '{city_slug}' not found in '{state_slug}'")))?;

    let content = state.content.city_content(&city).await;
    let nearby_cities = state.cities.nearby_cities(&city, CITY_PAGE_NEARBY).await;

    Ok(Json(CityPage {
        metadata: PageMetadata::for_city(&city),
        schema: schema::professional_service(&city, &state.config.base_url),
        map_url: maps::static_map_url(&city, state.config.google_maps_api_key.as_deref()),
        content,
        nearby_cities,
        city,
    }))
}

/// GET /api/v1/cities/:state/:city/:service
pub async fn handle_service_page(
    State(state): State<AppState>,
    Path((state_slug, city_slug, service_slug)): Path<(String, String, String)>,
) -> Result<Json<ServicePage>, AppError> {
    let city = state
        .cities
        .city_by_slug(&state_slug, &city_slug)
        .await
        .ok_or_else(|| AppError::NotFound(format!("City '{city_slug}' not found in '{state_slug}'")))?;
    let service = state
        .catalog
        .by_slug(&service_slug)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Service '{service_slug}' not found")))?;

    let content = state.content.service_content(&city, &service);
    let nearby_cities = state.cities.nearby_cities(&city, SERVICE_PAGE_NEARBY).await;

    Ok(Json(ServicePage {
        metadata: PageMetadata::for_service(&city, &service, &content.meta_description),
        schema: schema::service(&city, &service, &state.config.base_url),
        content,
        nearby_cities,
        city,
        service,
    }))
}

/// GET /api/v1/services
pub async fn handle_list_services(State(state): State<AppState>) -> Json<Vec<Service>> {
    Json(state.catalog.load().await.to_vec())
}

/// GET /api/v1/static-params
pub async fn handle_static_params(State(state): State<AppState>) -> Json<StaticParams> {
    let cities = state.cities.load().await;
    let services = state.catalog.load().await;
    let states = state.cities.all_states().await;
    Json(static_params(&cities, &services, &states))
}
