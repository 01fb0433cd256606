//! Sanity CMS city source. Built only when a project id is configured.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::config::SanityConfig;
use crate::models::{decode_records, City};
use crate::sources::{DataSource, SourceError};

const CITY_QUERY: &str = r#"*[_type == "city"] {
  name,
  state,
  stateAbbr,
  latitude,
  longitude,
  population,
  county,
  areaCode,
  majorLandmark,
  neighboringTowns,
  zipCodes
} | order(population desc)"#;

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    result: Option<Vec<Value>>,
}

pub struct SanityCitySource {
    client: Client,
    config: SanityConfig,
}

impl SanityCitySource {
    pub fn new(client: Client, config: SanityConfig) -> Self {
        Self { client, config }
    }

    /// CDN-backed query endpoint for the configured project and dataset.
    pub fn query_url(&self) -> String {
        format!(
            "https://{}.apicdn.sanity.io/v{}/data/query/{}",
            self.config.project_id,
            self.config.api_version.trim_start_matches('v'),
            self.config.dataset
        )
    }
}

#[async_trait]
impl DataSource<City> for SanityCitySource {
    fn name(&self) -> &'static str {
        "sanity"
    }

    async fn fetch_all(&self) -> Result<Option<Vec<City>>, SourceError> {
        let url = self.query_url();
        debug!("Querying Sanity at {url}");

        let mut request = self.client.get(&url).query(&[("query", CITY_QUERY)]);
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SourceError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let body: QueryResponse = response.json().await?;
        Ok(body.result.map(decode_records))
    }
}
