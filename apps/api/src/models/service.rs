use serde::{Deserialize, Serialize};

use super::Record;

/// A service offering. Templates carry a `{City}` placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub service_name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub meta_desc_template: String,
    #[serde(default)]
    pub hero_overlay_text: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl Record for Service {
    fn is_valid(&self) -> bool {
        [
            &self.category,
            &self.service_name,
            &self.slug,
            &self.meta_desc_template,
            &self.hero_overlay_text,
        ]
        .iter()
        .all(|field| !field.trim().is_empty())
    }
}
