//! Service catalog: `{data_dir}/services.json`, falling back to a small built-in list.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::info;

use crate::config::Config;
use crate::models::Service;
use crate::sources::{load_first_non_empty, DataSource, JsonFileSource, StaticSource};

pub struct ServiceCatalog {
    sources: Vec<Box<dyn DataSource<Service>>>,
    cache: OnceCell<Arc<Vec<Service>>>,
}

impl ServiceCatalog {
    pub fn new(sources: Vec<Box<dyn DataSource<Service>>>) -> Self {
        Self {
            sources,
            cache: OnceCell::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(vec![
            Box::new(JsonFileSource::<Service>::new(config.services_json_path())),
            Box::new(StaticSource::new(fallback_services())),
        ])
    }

    pub fn with_services(services: Vec<Service>) -> Self {
        Self::new(vec![Box::new(StaticSource::new(services))])
    }

    pub async fn load(&self) -> Arc<Vec<Service>> {
        self.cache
            .get_or_init(|| async {
                let services = load_first_non_empty(&self.sources).await;
                info!("Service catalog populated with {} services", services.len());
                Arc::new(services)
            })
            .await
            .clone()
    }

    /// Linear scan; the catalog is a handful of entries.
    pub async fn by_slug(&self, slug: &str) -> Option<Service> {
        self.load().await.iter().find(|s| s.slug == slug).cloned()
    }
}

pub fn fallback_services() -> Vec<Service> {
    vec![
        Service {
            category: "Structured Cabling".to_string(),
            service_name: "Voice & Data Cabling (Cat6/Cat6A)".to_string(),
            slug: "voice-data-cabling-installers".to_string(),
            meta_desc_template: "Certified Cat5e, Cat6, and Cat6A structured cabling installers in {City}. We provide low-voltage wiring for offices, warehouses, and new construction.".to_string(),
            hero_overlay_text: "Data Cabling: {City}".to_string(),
            keywords: ["Cat6", "Cat6a", "structured cabling", "data cabling", "network cabling"]
                .iter()
                .map(|k| k.to_string())
                .collect(),
        },
        Service {
            category: "Structured Cabling".to_string(),
            service_name: "Fiber Optic Cabling (Single/Multi-Mode)".to_string(),
            slug: "fiber-optic-cabling-installation".to_string(),
            meta_desc_template: "Fiber optic backbone cabling in {City}. We install OS2 Single-mode and OM3/OM4 Multi-mode fiber for campus networks and server rooms.".to_string(),
            hero_overlay_text: "Fiber Optics: {City}".to_string(),
            keywords: ["fiber optic", "fiber splicing", "fiber installation", "fiber repair"]
                .iter()
                .map(|k| k.to_string())
                .collect(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Record;
    use std::io::Write;

    fn config_with_services_json(body: &str) -> (Config, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join("services.json")).unwrap();
        write!(file, "{body}").unwrap();
        let config = Config {
            data_dir: dir.path().to_path_buf(),
            ..Config::default()
        };
        (config, dir)
    }

    #[test]
    fn test_fallback_services_are_valid() {
        assert!(fallback_services().iter().all(Record::is_valid));
    }

    #[tokio::test]
    async fn test_all_invalid_json_falls_back() {
        let (config, _dir) =
            config_with_services_json(r#"[{"service_name": "No slug", "category": "X"}]"#);
        let catalog = ServiceCatalog::from_config(&config);
        assert_eq!(catalog.load().await.len(), 2);
        assert!(catalog
            .by_slug("fiber-optic-cabling-installation")
            .await
            .is_some());
    }

    #[tokio::test]
    async fn test_valid_json_replaces_fallback() {
        let (config, _dir) = config_with_services_json(
            r#"[{
                "category": "Wireless",
                "service_name": "Point-to-Point Wireless Bridge",
                "slug": "point-to-point-wireless-bridge",
                "meta_desc_template": "Wireless bridges in {City}.",
                "hero_overlay_text": "Wireless: {City}",
                "keywords": ["ptp"]
            }]"#,
        );
        let catalog = ServiceCatalog::from_config(&config);
        let services = catalog.load().await;
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].keywords, vec!["ptp"]);
        assert!(catalog.by_slug("voice-data-cabling-installers").await.is_none());
    }

    #[tokio::test]
    async fn test_by_slug_miss() {
        let catalog = ServiceCatalog::with_services(fallback_services());
        assert!(catalog.by_slug("plumbing").await.is_none());
    }
}
