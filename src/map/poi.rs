//! map::poi
//!
//! Coordinate-shape normalization for regional point-of-interest payloads.
//!
//! # Design
//!
//! The regional SDK returns POI coordinates in several inconsistent native
//! shapes: a `"lng,lat"` string pair, or nested objects under `lonlat`,
//! `latLng`, or `location` with varying field names (`lat`/`latitude`,
//! `lng`/`lon`/`longitude`), where each field may be a JSON number or a
//! numeric string.
//!
//! Normalization is an explicit ordered list of extraction rules, tried in
//! sequence; the first rule producing a numeric pair wins. Exhaustion yields
//! the `{lat: 0, lng: 0}` sentinel — the result is kept, never dropped.
//!
//! # Example
//!
//! ```
//! use mapbridge::map::poi::extract_location;
//! use mapbridge::map::LatLng;
//! use serde_json::json;
//!
//! let poi = json!({ "lonlat": "116.395032,39.906343" });
//! assert_eq!(
//!     extract_location(&poi),
//!     Some(LatLng::new(39.906343, 116.395032))
//! );
//! ```

use serde_json::Value;
use tracing::warn;

use super::traits::{LatLng, SearchResult};

/// Address used when a POI carries neither `addressDetail` nor `name`.
pub const FALLBACK_ADDRESS: &str = "未知地址";

/// Extraction rules, tried in order; first success wins.
const RULES: &[fn(&Value) -> Option<LatLng>] = &[
    lonlat_string,
    lonlat_object,
    lat_lng_object,
    location_object,
];

/// Normalize one raw POI payload into a search result.
///
/// Unparseable coordinates default to the `{0, 0}` sentinel rather than
/// dropping the result.
pub fn normalize_poi(poi: &Value) -> SearchResult {
    let location = extract_location(poi).unwrap_or_else(|| {
        warn!(poi = %poi, "no parseable coordinates in POI, defaulting to {{0,0}}");
        LatLng::new(0.0, 0.0)
    });
    SearchResult {
        address: poi_address(poi),
        location,
    }
}

/// Try every extraction rule in order.
///
/// Returns `None` only when no rule matched; callers decide on the sentinel.
pub fn extract_location(poi: &Value) -> Option<LatLng> {
    RULES.iter().find_map(|rule| rule(poi))
}

/// Rule 1: `lonlat` as a `"lng,lat"` string pair.
fn lonlat_string(poi: &Value) -> Option<LatLng> {
    let raw = poi.get("lonlat")?.as_str()?;
    let (lng, lat) = raw.split_once(',')?;
    Some(LatLng::new(parse_coord(lat)?, parse_coord(lng)?))
}

/// Rule 2: `lonlat` as an object with varying field names.
fn lonlat_object(poi: &Value) -> Option<LatLng> {
    field_pair(
        poi.get("lonlat")?,
        &["lat", "latitude"],
        &["lon", "lng", "longitude"],
    )
}

/// Rule 3: `latLng` object.
fn lat_lng_object(poi: &Value) -> Option<LatLng> {
    field_pair(
        poi.get("latLng")?,
        &["lat", "latitude"],
        &["lng", "lon", "longitude"],
    )
}

/// Rule 4: `location` object.
fn location_object(poi: &Value) -> Option<LatLng> {
    field_pair(
        poi.get("location")?,
        &["lat", "latitude"],
        &["lng", "lon", "longitude"],
    )
}

/// First present-and-numeric field from each key list.
fn field_pair(obj: &Value, lat_keys: &[&str], lng_keys: &[&str]) -> Option<LatLng> {
    let lat = lat_keys.iter().find_map(|key| numeric(obj.get(*key)?))?;
    let lng = lng_keys.iter().find_map(|key| numeric(obj.get(*key)?))?;
    Some(LatLng::new(lat, lng))
}

/// Coordinate fields arrive as JSON numbers or numeric strings.
fn numeric(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(parse_coord))
        .filter(|v| v.is_finite())
}

fn parse_coord(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// POI display address: `addressDetail`, then `name`, then the fallback.
fn poi_address(poi: &Value) -> String {
    poi.get("addressDetail")
        .and_then(Value::as_str)
        .or_else(|| poi.get("name").and_then(Value::as_str))
        .unwrap_or(FALLBACK_ADDRESS)
        .to_string()
}
