use once_cell::sync::Lazy;
use regex::Regex;

/// Host serving the provider's map pages
pub const MAP_HOST: &str = "ditu.amap.com";
/// Path fragment identifying the POI detail endpoint
pub const DETAIL_PATH: &str = "detail/get/detail";

static QUERY_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[?&]id=([^&#\s]+)").expect("valid query id pattern")
});

static PLACE_PATH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/place/([A-Za-z0-9]+)").expect("valid place path pattern")
});

fn path_of(url: &str) -> &str {
    let without_scheme = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
    let end = without_scheme.find(['?', '#']).unwrap_or(without_scheme.len());
    &without_scheme[..end]
}

/// Extract the POI id from a request to the detail endpoint.
///
/// Returns `None` for any other URL or when the `id` parameter is empty.
pub fn poi_id_from_detail_url(url: &str) -> Option<String> {
    if !path_of(url).contains(DETAIL_PATH) {
        return None;
    }
    QUERY_ID
        .captures(url)
        .map(|caps| caps[1].to_string())
        .filter(|id| !id.is_empty())
}

/// Extract the POI id from a `/place/<id>` page URL
pub fn poi_id_from_place_url(url: &str) -> Option<String> {
    PLACE_PATH.captures(path_of(url)).map(|caps| caps[1].to_string())
}

/// Page URL that shows the given POI on the map
pub fn place_url(poi_id: &str) -> String {
    format!("https://{MAP_HOST}/place/{poi_id}")
}
