use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::leads::routing::RoutingOwners;

const DEFAULT_BASE_URL: &str = "https://jbtech.com";
const DEFAULT_PLANNER_ENDPOINT: &str = "https://formsubmit.co/ajax/";

/// Application configuration loaded from environment variables.
/// Every value is optional; unparsable values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub base_url: String,
    pub data_dir: PathBuf,
    pub sanity: Option<SanityConfig>,
    pub openai_api_key: Option<String>,
    pub google_maps_api_key: Option<String>,
    pub crm_webhook_url: Option<String>,
    pub owners: RoutingOwners,
    pub http_timeout: Duration,
    pub sitemap_include_services: bool,
    pub planner_form_endpoint: String,
    pub planner_recipients: Vec<String>,
}

/// Present only when `SANITY_PROJECT_ID` is set.
#[derive(Debug, Clone)]
pub struct SanityConfig {
    pub project_id: String,
    pub dataset: String,
    pub api_version: String,
    pub token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            data_dir: PathBuf::from("data"),
            sanity: None,
            openai_api_key: None,
            google_maps_api_key: None,
            crm_webhook_url: None,
            owners: RoutingOwners::default(),
            http_timeout: Duration::from_secs(10),
            sitemap_include_services: false,
            planner_form_endpoint: DEFAULT_PLANNER_ENDPOINT.to_string(),
            planner_recipients: Vec::new(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();

        let sanity = optional_env("SANITY_PROJECT_ID").map(|project_id| SanityConfig {
            project_id,
            dataset: optional_env("SANITY_DATASET").unwrap_or_else(|| "production".to_string()),
            api_version: optional_env("SANITY_API_VERSION")
                .unwrap_or_else(|| "2024-01-01".to_string()),
            token: optional_env("SANITY_API_TOKEN"),
        });

        let owners = RoutingOwners {
            enterprise: optional_env("CRM_ENTERPRISE_OWNER_ID")
                .unwrap_or(defaults.owners.enterprise),
            small_business: optional_env("CRM_SMALL_BUSINESS_OWNER_ID")
                .unwrap_or(defaults.owners.small_business),
            default: optional_env("CRM_DEFAULT_OWNER_ID").unwrap_or(defaults.owners.default),
        };

        Ok(Config {
            port: optional_env("PORT")
                .map(|v| v.parse::<u16>())
                .transpose()
                .context("PORT must be a valid port number")?
                .unwrap_or(defaults.port),
            rust_log: optional_env("RUST_LOG").unwrap_or(defaults.rust_log),
            base_url: optional_env("BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            data_dir: optional_env("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            sanity,
            openai_api_key: optional_env("OPENAI_API_KEY"),
            google_maps_api_key: optional_env("GOOGLE_MAPS_API_KEY"),
            crm_webhook_url: optional_env("CRM_WEBHOOK_URL"),
            owners,
            http_timeout: optional_env("HTTP_TIMEOUT_SECS")
                .map(|v| v.parse::<u64>())
                .transpose()
                .context("HTTP_TIMEOUT_SECS must be a whole number of seconds")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.http_timeout),
            sitemap_include_services: optional_env("SITEMAP_INCLUDE_SERVICES")
                .map(|v| parse_bool(&v))
                .transpose()
                .context("SITEMAP_INCLUDE_SERVICES must be true or false")?
                .unwrap_or(defaults.sitemap_include_services),
            planner_form_endpoint: optional_env("PLANNER_FORM_ENDPOINT")
                .unwrap_or(defaults.planner_form_endpoint),
            planner_recipients: optional_env("PLANNER_RECIPIENTS")
                .map(|v| split_list(&v))
                .unwrap_or_default(),
        })
    }

    pub fn cities_json_path(&self) -> PathBuf {
        self.data_dir.join("cities.json")
    }

    pub fn services_json_path(&self) -> PathBuf {
        self.data_dir.join("services.json")
    }
}

/// Unset and blank are treated the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("'{other}' is not a boolean"),
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_accepts_common_spellings() {
        assert!(parse_bool("TRUE").unwrap());
        assert!(parse_bool("1").unwrap());
        assert!(!parse_bool("off").unwrap());
        assert!(parse_bool("maybe").is_err());
    }

    #[test]
    fn test_split_list_skips_blanks() {
        assert_eq!(
            split_list("sales@example.com, ,crm@example.com"),
            vec!["sales@example.com", "crm@example.com"]
        );
    }

    #[test]
    fn test_default_paths_live_under_data_dir() {
        let config = Config::default();
        assert_eq!(config.cities_json_path(), PathBuf::from("data/cities.json"));
        assert_eq!(config.services_json_path(), PathBuf::from("data/services.json"));
    }
}
