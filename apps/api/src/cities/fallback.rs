use crate::models::City;

/// Built-in sample cities, the last link of the load chain.
pub fn fallback_cities() -> Vec<City> {
    vec![
        city("Atlanta", "Georgia", "GA", 33.749, -84.388, 498_715, "Fulton", "404", "Ponce City Market", ["Sandy Springs", "Roswell", "Alpharetta"], ["30301", "30302", "30303"]),
        city("Savannah", "Georgia", "GA", 32.0809, -81.0912, 147_780, "Chatham", "912", "Port of Savannah", ["Pooler", "Garden City", "Port Wentworth"], ["31401", "31402", "31403"]),
        city("Augusta", "Georgia", "GA", 33.4735, -82.0105, 202_081, "Richmond", "706", "Augusta National Golf Club", ["Martinez", "Evans", "Grovetown"], ["30901", "30902", "30903"]),
        city("Columbus", "Georgia", "GA", 32.4609, -84.9877, 206_922, "Muscogee", "706", "National Infantry Museum", ["Phenix City", "Fort Benning", "Smiths Station"], ["31901", "31902", "31903"]),
        city("Athens", "Georgia", "GA", 33.9519, -83.3576, 127_315, "Clarke", "706", "University of Georgia", ["Watkinsville", "Bogart", "Winterville"], ["30601", "30602", "30603"]),
        city("New York", "New York", "NY", 40.7128, -74.0060, 8_336_817, "New York", "212", "Times Square", ["Jersey City", "Newark", "Yonkers"], ["10001", "10002", "10003"]),
        city("Los Angeles", "California", "CA", 34.0522, -118.2437, 3_967_000, "Los Angeles", "213", "Hollywood Sign", ["Beverly Hills", "Santa Monica", "Pasadena"], ["90001", "90002", "90003"]),
        city("Chicago", "Illinois", "IL", 41.8781, -87.6298, 2_697_000, "Cook", "312", "Willis Tower", ["Evanston", "Oak Park", "Skokie"], ["60601", "60602", "60603"]),
        city("Houston", "Texas", "TX", 29.7604, -95.3698, 2_328_000, "Harris", "713", "Space Center Houston", ["Sugar Land", "Pearland", "The Woodlands"], ["77001", "77002", "77003"]),
        city("Phoenix", "Arizona", "AZ", 33.4484, -112.0740, 1_681_000, "Maricopa", "602", "Camelback Mountain", ["Scottsdale", "Tempe", "Mesa"], ["85001", "85002", "85003"]),
    ]
}

#[allow(clippy::too_many_arguments)]
fn city(
    name: &str,
    state: &str,
    state_abbr: &str,
    latitude: f64,
    longitude: f64,
    population: u64,
    county: &str,
    area_code: &str,
    major_landmark: &str,
    neighboring_towns: [&str; 3],
    zip_codes: [&str; 3],
) -> City {
    City {
        name: name.to_string(),
        state: state.to_string(),
        state_abbr: state_abbr.to_string(),
        latitude,
        longitude,
        population,
        county: county.to_string(),
        zip_codes: zip_codes.iter().map(|z| z.to_string()).collect(),
        area_code: Some(area_code.to_string()),
        major_landmark: Some(major_landmark.to_string()),
        neighboring_towns: neighboring_towns.iter().map(|t| t.to_string()).collect(),
    }
}
