//! Page data for the front end: everything a state, city or service page
//! renders, resolved from slugs.

pub mod handlers;
pub mod maps;
pub mod schema;

use serde::Serialize;
use serde_json::Value;

use crate::content::{CityContent, ServiceCityContent};
use crate::models::{City, Service, StateData};
use crate::slug::LEGACY_SUFFIX;

/// Nearby cities on a city landing page.
pub const CITY_PAGE_NEARBY: usize = 10;
/// Nearby cities on a city x service page.
pub const SERVICE_PAGE_NEARBY: usize = 5;

const SITE_NAME: &str = "JB Technologies";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSummary {
    pub name: String,
    pub abbreviation: String,
    pub slug: String,
    pub city_count: usize,
}

impl From<&StateData> for StateSummary {
    fn from(state: &StateData) -> Self {
        Self {
            name: state.name.clone(),
            abbreviation: state.abbreviation.clone(),
            slug: state.slug.clone(),
            city_count: state.cities.len(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StateHub {
    #[serde(flatten)]
    pub state: StateData,
    pub services: Vec<Service>,
}

#[derive(Debug, Serialize)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
}

impl PageMetadata {
    pub fn for_city(city: &City) -> Self {
        Self {
            title: format!(
                "Network Cabling Services in {}, {} | {SITE_NAME}",
                city.name, city.state_abbr
            ),
            description: format!(
                "Professional network cabling installation in {}, {}. Cat6, fiber optic, and structured cabling services.",
                city.name, city.state_abbr
            ),
        }
    }

    pub fn for_service(city: &City, service: &Service, meta_description: &str) -> Self {
        Self {
            title: format!(
                "{} in {}, {} | {SITE_NAME}",
                service.service_name, city.name, city.state_abbr
            ),
            description: meta_description.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityPage {
    pub city: City,
    pub content: CityContent,
    pub nearby_cities: Vec<City>,
    pub metadata: PageMetadata,
    pub schema: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePage {
    pub city: City,
    pub service: Service,
    pub content: ServiceCityContent,
    pub nearby_cities: Vec<City>,
    pub metadata: PageMetadata,
    pub schema: Value,
}

#[derive(Debug, Serialize)]
pub struct CityParams {
    pub state: String,
    pub city: String,
}

#[derive(Debug, Serialize)]
pub struct ServiceParams {
    pub state: String,
    pub city: String,
    pub service: String,
}

/// Every path a static build has to render.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticParams {
    pub states: Vec<String>,
    pub cities: Vec<CityParams>,
    pub services: Vec<ServiceParams>,
}

/// City page params carry the legacy suffix; service page params do not.
pub fn static_params(cities: &[City], services: &[Service], states: &[StateData]) -> StaticParams {
    let city_params = cities
        .iter()
        .map(|city| CityParams {
            state: city.state_slug(),
            city: format!("{}{LEGACY_SUFFIX}", city.slug()),
        })
        .collect();

    let service_params = cities
        .iter()
        .flat_map(|city| {
            services.iter().map(move |service| ServiceParams {
                state: city.state_slug(),
                city: city.slug(),
                service: service.slug.clone(),
            })
        })
        .collect();

    StaticParams {
        states: states.iter().map(|s| s.slug.clone()).collect(),
        cities: city_params,
        services: service_params,
    }
}
