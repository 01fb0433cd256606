use serde::{Deserialize, Serialize};

use super::Record;
use crate::slug::slugify;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub name: String,
    pub state: String,
    pub state_abbr: String,
    pub latitude: f64,
    pub longitude: f64,
    pub population: u64,
    pub county: String,
    pub zip_codes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major_landmark: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub neighboring_towns: Vec<String>,
}

impl City {
    pub fn slug(&self) -> String {
        slugify(&self.name)
    }

    pub fn state_slug(&self) -> String {
        slugify(&self.state)
    }

    /// `(name, stateAbbr)` is the intended identity; it is not enforced across sources.
    pub fn is_same_place(&self, other: &City) -> bool {
        self.name == other.name && self.state_abbr.eq_ignore_ascii_case(&other.state_abbr)
    }
}

impl Record for City {
    fn is_valid(&self) -> bool {
        let required = [&self.name, &self.state, &self.state_abbr, &self.county];
        required.iter().all(|field| !field.trim().is_empty())
            && self.latitude.is_finite()
            && self.longitude.is_finite()
            && !self.zip_codes.is_empty()
    }
}

/// A state and its cities, derived by grouping the loaded city list.
#[derive(Debug, Clone, Serialize)]
pub struct StateData {
    pub name: String,
    pub abbreviation: String,
    pub slug: String,
    pub cities: Vec<City>,
}
