//! Lookups over a loaded city list. Pure functions; the repository feeds them its cache.

use std::collections::HashMap;

use crate::cities::geo::haversine_miles;
use crate::models::{City, StateData};
use crate::slug::{matches_state, slugify, strip_legacy_suffix, unslugify};

fn in_state(city: &City, state_slug: &str) -> bool {
    matches_state(state_slug, &city.state, &city.state_abbr)
}

fn by_population_desc(cities: &mut [City]) {
    cities.sort_by(|a, b| b.population.cmp(&a.population));
}

/// Finds the city whose name matches the unslugified `city_slug` (case-insensitive)
/// in the state named by `state_slug`. A miss is a normal outcome.
pub fn find_by_slug(cities: &[City], state_slug: &str, city_slug: &str) -> Option<City> {
    let candidate = unslugify(city_slug).to_lowercase();
    cities
        .iter()
        .find(|city| in_state(city, state_slug) && city.name.to_lowercase() == candidate)
        .cloned()
}

/// Cities in the state, most populous first.
pub fn in_state_by_population(cities: &[City], state_slug: &str) -> Vec<City> {
    let mut matched: Vec<City> = cities
        .iter()
        .filter(|city| in_state(city, state_slug))
        .cloned()
        .collect();
    by_population_desc(&mut matched);
    matched
}

/// Groups cities by upper-cased `state_abbr`, preserving first-seen order of states.
pub fn group_states(cities: &[City]) -> Vec<StateData> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<City>> = HashMap::new();

    for city in cities {
        let key = city.state_abbr.to_ascii_uppercase();
        groups
            .entry(key.clone())
            .or_insert_with(|| {
                order.push(key);
                Vec::new()
            })
            .push(city.clone());
    }

    order
        .into_iter()
        .filter_map(|abbr| {
            let mut members = groups.remove(&abbr)?;
            by_population_desc(&mut members);
            let name = members.first()?.state.clone();
            Some(StateData {
                slug: slugify(&name),
                name,
                abbreviation: abbr,
                cities: members,
            })
        })
        .collect()
}

pub fn find_state(cities: &[City], state_slug: &str) -> Option<StateData> {
    let slug = strip_legacy_suffix(state_slug);
    group_states(cities).into_iter().find(|state| {
        state.abbreviation.eq_ignore_ascii_case(slug) || state.slug.eq_ignore_ascii_case(slug)
    })
}

/// Up to `limit` other cities in the same state, nearest first.
pub fn nearest(cities: &[City], origin: &City, limit: usize) -> Vec<City> {
    let mut ranked: Vec<(f64, &City)> = cities
        .iter()
        .filter(|c| {
            c.state_abbr.eq_ignore_ascii_case(&origin.state_abbr) && !c.is_same_place(origin)
        })
        .map(|c| {
            let distance =
                haversine_miles(origin.latitude, origin.longitude, c.latitude, c.longitude);
            (distance, c)
        })
        .collect();

    ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
    ranked
        .into_iter()
        .take(limit)
        .map(|(_, city)| city.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cities::fallback::fallback_cities;

    fn georgia_with_thirty_cities() -> Vec<City> {
        let mut cities: Vec<City> = fallback_cities()
            .into_iter()
            .filter(|c| c.state_abbr == "GA")
            .collect();
        let template = cities[0].clone();
        for i in 0..25 {
            let mut extra = template.clone();
            extra.name = format!("Town {i}");
            extra.population = 1_000 + i as u64 * 500;
            extra.latitude = 31.0 + i as f64 * 0.1;
            extra.longitude = -83.0 - i as f64 * 0.05;
            cities.push(extra);
        }
        cities
    }

    #[test]
    fn test_slug_round_trip_for_every_fallback_city() {
        let cities = fallback_cities();
        for city in &cities {
            let found = find_by_slug(&cities, &slugify(&city.state), &slugify(&city.name))
                .unwrap_or_else(|| panic!("{} should resolve", city.name));
            assert_eq!(found.name, city.name);
            assert_eq!(found.state_abbr, city.state_abbr);
        }
    }

    #[test]
    fn test_find_by_slug_accepts_legacy_suffix_and_abbreviation() {
        let cities = fallback_cities();
        let found = find_by_slug(&cities, "ny", "new-york-network-cabling").unwrap();
        assert_eq!(found.name, "New York");
    }

    #[test]
    fn test_find_by_slug_miss_is_none() {
        let cities = fallback_cities();
        assert!(find_by_slug(&cities, "georgia", "macon").is_none());
        // Right city, wrong state.
        assert!(find_by_slug(&cities, "texas", "atlanta").is_none());
    }

    #[test]
    fn test_find_by_slug_on_empty_list() {
        assert!(find_by_slug(&[], "georgia", "atlanta").is_none());
    }

    #[test]
    fn test_atlanta_first_among_thirty_georgia_cities() {
        let cities = georgia_with_thirty_cities();
        assert_eq!(cities.len(), 30);

        let georgia = in_state_by_population(&cities, "georgia");
        assert_eq!(georgia.len(), 30);
        assert_eq!(georgia[0].name, "Atlanta");
        assert!(georgia
            .windows(2)
            .all(|pair| pair[0].population >= pair[1].population));
    }

    #[test]
    fn test_group_states_one_entry_per_abbreviation() {
        let states = group_states(&fallback_cities());
        assert_eq!(states.len(), 6);

        let georgia = states.iter().find(|s| s.abbreviation == "GA").unwrap();
        assert_eq!(georgia.name, "Georgia");
        assert_eq!(georgia.slug, "georgia");
        assert_eq!(georgia.cities.len(), 5);
        assert_eq!(georgia.cities[0].name, "Atlanta");
    }

    fn georgia_with_lowercase_macon() -> Vec<City> {
        let mut cities: Vec<City> = fallback_cities()
            .into_iter()
            .filter(|c| c.state_abbr == "GA")
            .collect();
        let mut macon = cities[0].clone();
        macon.name = "Macon".to_string();
        macon.state_abbr = "ga".to_string();
        macon.population = 157_000;
        macon.latitude = 32.8407;
        macon.longitude = -83.6324;
        cities.push(macon);
        cities
    }

    #[test]
    fn test_group_states_ignores_abbreviation_case() {
        let states = group_states(&georgia_with_lowercase_macon());
        assert_eq!(states.len(), 1);
        assert_eq!(states[0].abbreviation, "GA");
        assert_eq!(states[0].cities.len(), 6);
    }

    #[test]
    fn test_nearest_includes_mixed_case_abbreviation() {
        let cities = georgia_with_lowercase_macon();
        let atlanta = find_by_slug(&cities, "georgia", "atlanta").unwrap();
        let nearby = nearest(&cities, &atlanta, 10);
        assert_eq!(nearby.len(), 5);
        assert!(nearby.iter().any(|c| c.name == "Macon"));
    }

    #[test]
    fn test_group_states_empty_input() {
        assert!(group_states(&[]).is_empty());
    }

    #[test]
    fn test_find_state_by_slug_variants() {
        let cities = fallback_cities();
        assert_eq!(find_state(&cities, "new-york").unwrap().abbreviation, "NY");
        assert_eq!(find_state(&cities, "GA").unwrap().name, "Georgia");
        assert_eq!(
            find_state(&cities, "georgia-network-cabling").unwrap().abbreviation,
            "GA"
        );
        assert!(find_state(&cities, "oregon").is_none());
    }

    #[test]
    fn test_nearest_orders_by_distance_and_excludes_origin() {
        let cities = fallback_cities();
        let atlanta = find_by_slug(&cities, "georgia", "atlanta").unwrap();

        let nearby = nearest(&cities, &atlanta, 10);
        let names: Vec<&str> = nearby.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Athens", "Columbus", "Augusta", "Savannah"]);
    }

    #[test]
    fn test_nearest_respects_limit_and_state() {
        let cities = georgia_with_thirty_cities();
        let atlanta = cities[0].clone();

        let nearby = nearest(&cities, &atlanta, 7);
        assert_eq!(nearby.len(), 7);
        assert!(nearby.iter().all(|c| c.state_abbr == "GA"));
        assert!(nearby.iter().all(|c| !c.is_same_place(&atlanta)));

        let distances: Vec<f64> = nearby
            .iter()
            .map(|c| haversine_miles(atlanta.latitude, atlanta.longitude, c.latitude, c.longitude))
            .collect();
        assert!(distances.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn test_nearest_for_single_city_state_is_empty() {
        let cities = fallback_cities();
        let houston = find_by_slug(&cities, "texas", "houston").unwrap();
        assert!(nearest(&cities, &houston, 5).is_empty());
    }
}
