//! Page content generation.
//!
//! Template output first; an optional text generator may then rewrite the
//! service-area paragraph. The introduction is always the template text, so
//! page content stays reproducible whether or not the LLM is reachable.

pub mod templates;

use std::sync::Arc;

use tracing::warn;

use crate::llm_client::prompts::{SERVICE_AREA_MAX_TOKENS, SERVICE_AREA_PROMPT};
use crate::llm_client::TextGenerator;
use crate::models::{City, Service};

pub use templates::{fill_template, CityContent, ServiceCityContent, TemplateVars};

#[derive(Clone, Default)]
pub struct ContentGenerator {
    enricher: Option<Arc<dyn TextGenerator>>,
}

impl ContentGenerator {
    pub fn new(enricher: Option<Arc<dyn TextGenerator>>) -> Self {
        Self { enricher }
    }

    pub fn is_enriched(&self) -> bool {
        self.enricher.is_some()
    }

    pub async fn city_content(&self, city: &City) -> CityContent {
        let mut content = templates::city_content(city);
        if let Some(service_area) = self.enriched_service_area(city).await {
            content.service_area = service_area;
        }
        content
    }

    /// Service pages stay fully deterministic.
    pub fn service_content(&self, city: &City, service: &Service) -> ServiceCityContent {
        templates::service_city_content(city, service)
    }

    async fn enriched_service_area(&self, city: &City) -> Option<String> {
        let enricher = self.enricher.as_ref()?;
        let prompt = fill_template(SERVICE_AREA_PROMPT, &TemplateVars::for_city(city));

        match enricher.complete(&prompt, SERVICE_AREA_MAX_TOKENS).await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!("Content enrichment failed for {}, using template: {e}", city.name);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cities::fallback::fallback_cities;
    use crate::llm_client::LlmError;
    use async_trait::async_trait;

    struct FixedText(&'static str);

    #[async_trait]
    impl TextGenerator for FixedText {
        async fn complete(&self, _prompt: &str, _max_tokens: u32) -> Result<String, LlmError> {
            Ok(self.0.to_string())
        }
    }

    struct Unavailable;

    #[async_trait]
    impl TextGenerator for Unavailable {
        async fn complete(&self, _prompt: &str, _max_tokens: u32) -> Result<String, LlmError> {
            Err(LlmError::Api {
                status: 503,
                message: "overloaded".to_string(),
            })
        }
    }

    fn savannah() -> City {
        fallback_cities()
            .into_iter()
            .find(|c| c.name == "Savannah")
            .unwrap()
    }

    #[tokio::test]
    async fn test_introduction_without_generator() {
        let generator = ContentGenerator::default();
        assert!(!generator.is_enriched());
        let content = generator.city_content(&savannah()).await;
        assert!(!content.introduction.is_empty());
        assert!(content.introduction.contains("Savannah"));
        assert_eq!(content, templates::city_content(&savannah()));
    }

    #[tokio::test]
    async fn test_failing_generator_falls_back_to_template() {
        let generator = ContentGenerator::new(Some(Arc::new(Unavailable)));
        let content = generator.city_content(&savannah()).await;
        assert_eq!(content, templates::city_content(&savannah()));
    }

    #[tokio::test]
    async fn test_generator_only_replaces_service_area() {
        let generator =
            ContentGenerator::new(Some(Arc::new(FixedText("We cover Ardsley Park and Midtown."))));
        let content = generator.city_content(&savannah()).await;
        let template = templates::city_content(&savannah());

        assert_eq!(content.service_area, "We cover Ardsley Park and Midtown.");
        assert_eq!(content.introduction, template.introduction);
        assert_eq!(content.services, template.services);
    }
}
