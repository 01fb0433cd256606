//! City / state resolver.
//!
//! Cities come from the first non-empty source in CMS -> JSON file -> built-in
//! list order, are loaded once per process and never invalidated. All
//! lookups are best-effort string matches and return `Option` on a miss.

pub mod fallback;
pub mod geo;
pub mod query;
pub mod sanity;

use std::sync::Arc;

use reqwest::Client;
use tokio::sync::OnceCell;
use tracing::info;

use crate::config::Config;
use crate::models::{City, StateData};
use crate::sources::{load_first_non_empty, DataSource, JsonFileSource, StaticSource};

use self::fallback::fallback_cities;
use self::sanity::SanityCitySource;

pub struct CityRepository {
    sources: Vec<Box<dyn DataSource<City>>>,
    cache: OnceCell<Arc<Vec<City>>>,
}

impl CityRepository {
    pub fn new(sources: Vec<Box<dyn DataSource<City>>>) -> Self {
        Self {
            sources,
            cache: OnceCell::new(),
        }
    }

    /// Standard chain: Sanity (when configured) -> `{data_dir}/cities.json` -> built-in list.
    pub fn from_config(config: &Config, http: Client) -> Self {
        let mut sources: Vec<Box<dyn DataSource<City>>> = Vec::new();
        if let Some(sanity) = &config.sanity {
            sources.push(Box::new(SanityCitySource::new(http, sanity.clone())));
        }
        sources.push(Box::new(JsonFileSource::<City>::new(config.cities_json_path())));
        sources.push(Box::new(StaticSource::new(fallback_cities())));
        Self::new(sources)
    }

    /// A repository over a fixed list.
    pub fn with_cities(cities: Vec<City>) -> Self {
        Self::new(vec![Box::new(StaticSource::new(cities))])
    }

    /// Loads on first call; later calls return the memoised list.
    pub async fn load(&self) -> Arc<Vec<City>> {
        self.cache
            .get_or_init(|| async {
                let cities = load_first_non_empty(&self.sources).await;
                info!("City cache populated with {} cities", cities.len());
                Arc::new(cities)
            })
            .await
            .clone()
    }

    pub async fn city_by_slug(&self, state_slug: &str, city_slug: &str) -> Option<City> {
        query::find_by_slug(&self.load().await, state_slug, city_slug)
    }

    pub async fn cities_by_state(&self, state_slug: &str) -> Vec<City> {
        query::in_state_by_population(&self.load().await, state_slug)
    }

    pub async fn all_states(&self) -> Vec<StateData> {
        query::group_states(&self.load().await)
    }

    pub async fn state_by_slug(&self, state_slug: &str) -> Option<StateData> {
        query::find_state(&self.load().await, state_slug)
    }

    pub async fn nearby_cities(&self, city: &City, limit: usize) -> Vec<City> {
        query::nearest(&self.load().await, city, limit)
    }
}
