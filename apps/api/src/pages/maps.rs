use reqwest::Url;

use crate::models::City;

const STATIC_MAP_URL: &str = "https://maps.googleapis.com/maps/api/staticmap";
const ZOOM: &str = "12";
const SIZE: &str = "600x400";

/// Google Static Maps image centred on the city. `None` without an API key.
pub fn static_map_url(city: &City, api_key: Option<&str>) -> Option<String> {
    let key = api_key.filter(|k| !k.is_empty())?;
    let center = format!("{},{}", city.latitude, city.longitude);
    let marker = format!("color:0x4285F4|label:JB|{center}");

    Url::parse_with_params(
        STATIC_MAP_URL,
        [
            ("center", center.as_str()),
            ("zoom", ZOOM),
            ("size", SIZE),
            ("markers", marker.as_str()),
            ("key", key),
        ],
    )
    .ok()
    .map(String::from)
}
