use std::sync::Arc;

use reqwest::Client;

use crate::catalog::ServiceCatalog;
use crate::cities::CityRepository;
use crate::config::Config;
use crate::content::ContentGenerator;
use crate::leads::crm::CrmClient;
use crate::leads::planner::PlannerRelay;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Write-once city cache; populated at startup and never invalidated.
    pub cities: Arc<CityRepository>,
    pub catalog: Arc<ServiceCatalog>,
    /// Template content, optionally enriched by the LLM client.
    pub content: ContentGenerator,
    pub crm: CrmClient,
    pub planner: PlannerRelay,
}

impl AppState {
    /// Wires the standard data sources and outbound clients from `config`.
    /// `http` is shared by every outbound caller.
    pub fn new(config: Config, http: Client, content: ContentGenerator) -> Self {
        let cities = Arc::new(CityRepository::from_config(&config, http.clone()));
        let catalog = Arc::new(ServiceCatalog::from_config(&config));
        let crm = CrmClient::new(http.clone(), config.crm_webhook_url.clone());
        let planner = PlannerRelay::new(
            http,
            config.planner_form_endpoint.clone(),
            config.planner_recipients.clone(),
        );

        Self {
            config,
            cities,
            catalog,
            content,
            crm,
            planner,
        }
    }

    /// State over fixed data with no outbound integrations configured.
    #[cfg(test)]
    pub fn for_tests(cities: Vec<crate::models::City>, services: Vec<crate::models::Service>) -> Self {
        let config = Config::default();
        let http = Client::new();
        Self {
            crm: CrmClient::new(http.clone(), None),
            planner: PlannerRelay::new(http, config.planner_form_endpoint.clone(), Vec::new()),
            cities: Arc::new(CityRepository::with_cities(cities)),
            catalog: Arc::new(ServiceCatalog::with_services(services)),
            content: ContentGenerator::default(),
            config,
        }
    }
}
