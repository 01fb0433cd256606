//! Sitemap generation, split per state to keep individual documents small.
//!
//! Layout:
//! - index: `/sitemap.xml` plus one `/sitemaps/{state}.xml` per state
//! - per state: the state hub, every city page, and optionally every
//!   city x service page

pub mod handlers;
pub mod xml;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{Service, StateData};
use crate::slug::{slugify, LEGACY_SUFFIX};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
#[allow(dead_code)]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFrequency::Always => "always",
            ChangeFrequency::Hourly => "hourly",
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
            ChangeFrequency::Yearly => "yearly",
            ChangeFrequency::Never => "never",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: DateTime<Utc>,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SitemapOptions {
    pub include_service_pages: bool,
}

#[derive(Debug, Clone)]
pub struct SitemapSet {
    pub index: Vec<SitemapEntry>,
    /// Keyed by state slug.
    pub states: BTreeMap<String, Vec<SitemapEntry>>,
}

struct UrlBuilder<'a> {
    base_url: &'a str,
    now: DateTime<Utc>,
}

impl UrlBuilder<'_> {
    fn entry(&self, path: &str, change_frequency: ChangeFrequency, priority: f32) -> SitemapEntry {
        SitemapEntry {
            url: format!("{}{}", self.base_url, path),
            last_modified: self.now,
            change_frequency,
            priority,
        }
    }
}

fn trim_base(base_url: &str) -> &str {
    base_url.trim_end_matches('/')
}

pub fn state_hub_path(state_slug: &str) -> String {
    format!("/{state_slug}{LEGACY_SUFFIX}")
}

pub fn city_path(state_slug: &str, city_slug: &str) -> String {
    format!("/{state_slug}/{city_slug}{LEGACY_SUFFIX}")
}

pub fn service_path(state_slug: &str, city_slug: &str, service_slug: &str) -> String {
    format!("/{state_slug}/{city_slug}/{service_slug}")
}

pub fn state_sitemap_path(state_slug: &str) -> String {
    format!("/sitemaps/{state_slug}.xml")
}

/// Builds the index and every per-state document in one pass.
pub fn generate(
    states: &[StateData],
    services: &[Service],
    base_url: &str,
    now: DateTime<Utc>,
    options: SitemapOptions,
) -> SitemapSet {
    let urls = UrlBuilder {
        base_url: trim_base(base_url),
        now,
    };

    let mut index = vec![urls.entry("/sitemap.xml", ChangeFrequency::Weekly, 1.0)];
    let mut documents: BTreeMap<String, Vec<SitemapEntry>> = BTreeMap::new();

    for state in states {
        let state_slug = state.slug.as_str();
        // Two groups sharing a slug land in one document with one hub entry.
        let entries: &mut Vec<SitemapEntry> =
            documents.entry(state.slug.clone()).or_insert_with(|| {
                index.push(urls.entry(&state_sitemap_path(state_slug), ChangeFrequency::Weekly, 0.8));
                vec![urls.entry(&state_hub_path(state_slug), ChangeFrequency::Weekly, 0.8)]
            });

        for city in &state.cities {
            let city_slug = slugify(&city.name);
            entries.push(urls.entry(
                &city_path(state_slug, &city_slug),
                ChangeFrequency::Monthly,
                0.6,
            ));
            if options.include_service_pages {
                entries.extend(services.iter().map(|service| {
                    urls.entry(
                        &service_path(state_slug, &city_slug, &service.slug),
                        ChangeFrequency::Monthly,
                        0.5,
                    )
                }));
            }
        }
    }

    SitemapSet {
        index,
        states: documents,
    }
}

/// Single-document sitemap: home page, state hubs, then city pages.
pub fn flat(states: &[StateData], base_url: &str, now: DateTime<Utc>) -> Vec<SitemapEntry> {
    let urls = UrlBuilder {
        base_url: trim_base(base_url),
        now,
    };

    let mut entries = vec![urls.entry("", ChangeFrequency::Weekly, 1.0)];
    entries.extend(states.iter().map(|state| {
        urls.entry(&state_hub_path(&state.slug), ChangeFrequency::Weekly, 0.8)
    }));
    for state in states {
        let state_slug = state.slug.as_str();
        entries.extend(state.cities.iter().map(|city| {
            urls.entry(
                &city_path(state_slug, &slugify(&city.name)),
                ChangeFrequency::Monthly,
                0.6,
            )
        }));
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fallback_services;
    use crate::cities::fallback::fallback_cities;
    use crate::cities::query::group_states;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_index_has_one_entry_per_state_plus_root() {
        let states = group_states(&fallback_cities());
        let set = generate(&states, &[], "https://example.com", now(), SitemapOptions::default());

        assert_eq!(set.index.len(), states.len() + 1);
        assert_eq!(set.index[0].url, "https://example.com/sitemap.xml");
        assert!(set
            .index
            .iter()
            .any(|e| e.url == "https://example.com/sitemaps/georgia.xml"));
    }

    #[test]
    fn test_state_documents_cover_every_city_once() {
        let cities = fallback_cities();
        let states = group_states(&cities);
        let set = generate(&states, &fallback_services(), "https://example.com/", now(), SitemapOptions::default());

        let total: usize = set.states.values().map(Vec::len).sum();
        assert_eq!(total, cities.len() + states.len());

        let georgia = &set.states["georgia"];
        assert_eq!(georgia.len(), 6);
        assert_eq!(georgia[0].url, "https://example.com/georgia-network-cabling");
        assert_eq!(georgia[0].priority, 0.8);
        assert_eq!(georgia[1].url, "https://example.com/georgia/atlanta-network-cabling");
        assert_eq!(georgia[1].change_frequency, ChangeFrequency::Monthly);
    }

    #[test]
    fn test_service_pages_are_opt_in() {
        let cities = fallback_cities();
        let states = group_states(&cities);
        let services = fallback_services();
        let set = generate(
            &states,
            &services,
            "https://example.com",
            now(),
            SitemapOptions {
                include_service_pages: true,
            },
        );

        let total: usize = set.states.values().map(Vec::len).sum();
        assert_eq!(total, states.len() + cities.len() * (1 + services.len()));
        assert!(set.states["new-york"].iter().any(|e| {
            e.url == "https://example.com/new-york/new-york/fiber-optic-cabling-installation"
        }));
    }

    #[test]
    fn test_mixed_case_abbreviations_share_one_document() {
        let mut cities: Vec<_> = fallback_cities()
            .into_iter()
            .filter(|c| c.state_abbr == "GA")
            .collect();
        let mut macon = cities[0].clone();
        macon.name = "Macon".to_string();
        macon.state_abbr = "ga".to_string();
        cities.push(macon);

        let states = group_states(&cities);
        let set = generate(&states, &[], "https://example.com", now(), SitemapOptions::default());

        assert_eq!(set.index.len(), 2);
        let total: usize = set.states.values().map(Vec::len).sum();
        assert_eq!(total, cities.len() + 1);
        assert!(set.states["georgia"]
            .iter()
            .any(|e| e.url == "https://example.com/georgia/macon-network-cabling"));
    }

    #[test]
    fn test_groups_with_the_same_slug_are_merged() {
        let cities = fallback_cities();
        let mut states = group_states(&cities);
        let mut split = states[0].clone();
        split.abbreviation = "GEORGIA".to_string();
        split.cities.truncate(2);
        states.push(split);

        let set = generate(&states, &[], "https://example.com", now(), SitemapOptions::default());
        let hubs = set.states["georgia"]
            .iter()
            .filter(|e| e.url.ends_with("/georgia-network-cabling"))
            .count();
        assert_eq!(hubs, 1);
        assert_eq!(set.states["georgia"].len(), 1 + 5 + 2);
        assert_eq!(set.index.len(), 7);
    }

    #[test]
    fn test_empty_dataset_yields_root_only() {
        let set = generate(&[], &[], "https://example.com", now(), SitemapOptions::default());
        assert_eq!(set.index.len(), 1);
        assert!(set.states.is_empty());
    }

    #[test]
    fn test_flat_sitemap_order() {
        let cities = fallback_cities();
        let states = group_states(&cities);
        let entries = flat(&states, "https://example.com", now());

        assert_eq!(entries.len(), 1 + states.len() + cities.len());
        assert_eq!(entries[0].url, "https://example.com");
        assert_eq!(entries[0].priority, 1.0);
        assert!(entries[1].url.ends_with("-network-cabling"));
    }
}
