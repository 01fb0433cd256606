//! Deterministic page text. These strings are the authoritative output; the
//! optional LLM pass may only replace the fields the generator allows.

use serde::Serialize;

use crate::models::{City, Service};

const COMPANY: &str = "JB Technologies";

/// Values substituted into `{City}`, `{County}`, `{Zip_Code}`, `{State}`, `{Area_Code}`.
#[derive(Debug, Clone)]
pub struct TemplateVars<'a> {
    pub city: &'a str,
    pub county: &'a str,
    pub zip_code: &'a str,
    pub state: &'a str,
    pub area_code: &'a str,
}

impl<'a> TemplateVars<'a> {
    pub fn for_city(city: &'a City) -> Self {
        Self {
            city: &city.name,
            county: &city.county,
            zip_code: city.zip_codes.first().map(String::as_str).unwrap_or(""),
            state: &city.state,
            area_code: city.area_code.as_deref().unwrap_or("local"),
        }
    }
}

/// Replaces every known placeholder. Unknown `{...}` tokens are left untouched.
pub fn fill_template(template: &str, vars: &TemplateVars<'_>) -> String {
    template
        .replace("{City}", vars.city)
        .replace("{County}", vars.county)
        .replace("{Zip_Code}", vars.zip_code)
        .replace("{State}", vars.state)
        .replace("{Area_Code}", vars.area_code)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityContent {
    pub introduction: String,
    pub services: String,
    pub service_area: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCityContent {
    pub headline: String,
    pub meta_description: String,
    pub introduction: String,
    pub overview: String,
    pub service_area: String,
}

const CITY_INTRODUCTION: &str = "{Company} provides professional network cabling services in \
    {City}, {State_Abbr}. Our certified technicians specialize in structured cabling \
    installations for businesses throughout the {City} metropolitan area and {County} County.";

const CITY_SERVICES: &str = "We offer comprehensive low-voltage solutions including Cat6 data \
    cabling, fiber optic installation, and network infrastructure design. Our team serves {City} \
    businesses with reliable, code-compliant installations.";

const CITY_SERVICE_AREA: &str = "We proudly serve {City} and surrounding areas including \
    {Neighbors}. Our service area covers zip codes starting with {Area_Code} throughout {State}.";

const SERVICE_INTRODUCTION: &str = "Looking for {Service} in {City}, {State_Abbr}? {Company} \
    delivers certified installations for offices, warehouses, and campuses across {County} \
    County, starting from the {Zip_Code} zip code and everywhere in between.";

const SERVICE_OVERVIEW: &str = "Our {Category} team plans, installs, tests, and documents every \
    {Service} project in {City} to industry standards, so your network is ready on day one.";

fn neighbors(city: &City) -> String {
    if city.neighboring_towns.is_empty() {
        "nearby communities".to_string()
    } else {
        city.neighboring_towns
            .iter()
            .take(3)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn fill_city(template: &str, city: &City) -> String {
    fill_template(template, &TemplateVars::for_city(city))
        .replace("{Company}", COMPANY)
        .replace("{State_Abbr}", &city.state_abbr)
        .replace("{Neighbors}", &neighbors(city))
}

pub fn city_content(city: &City) -> CityContent {
    CityContent {
        introduction: fill_city(CITY_INTRODUCTION, city),
        services: fill_city(CITY_SERVICES, city),
        service_area: fill_city(CITY_SERVICE_AREA, city),
    }
}

pub fn service_city_content(city: &City, service: &Service) -> ServiceCityContent {
    let fill = |template: &str| {
        fill_city(template, city)
            .replace("{Service}", &service.service_name)
            .replace("{Category}", &service.category)
    };

    ServiceCityContent {
        headline: fill(&service.hero_overlay_text),
        meta_description: fill(&service.meta_desc_template),
        introduction: fill(SERVICE_INTRODUCTION),
        overview: fill(SERVICE_OVERVIEW),
        service_area: fill(CITY_SERVICE_AREA),
    }
}
