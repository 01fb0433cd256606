//! schema.org JSON-LD for city and service pages.

use reqwest::Url;
use serde_json::{json, Value};

use crate::models::{City, Service};
use crate::sitemap::{city_path, service_path};

const COMPANY: &str = "JB Technologies";
const TELEPHONE: &str = "+1-800-555-0199";

fn og_image_url(base_url: &str, city: &City) -> String {
    let base = base_url.trim_end_matches('/');
    match Url::parse_with_params(
        &format!("{base}/api/og"),
        [("city", city.name.as_str()), ("state", city.state_abbr.as_str())],
    ) {
        Ok(url) => url.to_string(),
        Err(_) => format!("{base}/api/og"),
    }
}

fn geo(city: &City) -> Value {
    json!({
        "@type": "GeoCoordinates",
        "latitude": city.latitude,
        "longitude": city.longitude,
    })
}

fn address(city: &City) -> Value {
    json!({
        "@type": "PostalAddress",
        "addressLocality": city.name,
        "addressRegion": city.state_abbr,
        "addressCountry": "US",
    })
}

fn offer(name: String) -> Value {
    json!({
        "@type": "Offer",
        "itemOffered": { "@type": "Service", "name": name },
    })
}

/// `ProfessionalService` markup for a city landing page.
pub fn professional_service(city: &City, base_url: &str) -> Value {
    let url = format!(
        "{}{}",
        base_url.trim_end_matches('/'),
        city_path(&city.state_slug(), &city.slug())
    );

    json!({
        "@context": "https://schema.org",
        "@type": "ProfessionalService",
        "name": format!("{COMPANY} - {} Cabling Services", city.name),
        "image": og_image_url(base_url, city),
        "@id": url,
        "url": url,
        "telephone": TELEPHONE,
        "priceRange": "$$",
        "address": address(city),
        "geo": geo(city),
        "areaServed": { "@type": "City", "name": city.name },
        "hasOfferCatalog": {
            "@type": "OfferCatalog",
            "name": "Low Voltage Services",
            "itemListElement": [
                offer(format!("Cat6 Data Cabling Installation in {}", city.name)),
                offer(format!("Fiber Optic Splicing & Repair in {}", city.name)),
            ],
        },
    })
}

/// `Service` markup for a city x service page, provided by the local business.
pub fn service(city: &City, service: &Service, base_url: &str) -> Value {
    let url = format!(
        "{}{}",
        base_url.trim_end_matches('/'),
        service_path(&city.state_slug(), &city.slug(), &service.slug)
    );

    json!({
        "@context": "https://schema.org",
        "@type": "Service",
        "@id": url,
        "url": url,
        "name": format!("{} in {}, {}", service.service_name, city.name, city.state_abbr),
        "serviceType": service.category,
        "description": service.meta_desc_template.replace("{City}", &city.name),
        "provider": {
            "@type": "ProfessionalService",
            "name": COMPANY,
            "telephone": TELEPHONE,
            "address": address(city),
        },
        "areaServed": {
            "@type": "City",
            "name": city.name,
            "geo": geo(city),
        },
    })
}
