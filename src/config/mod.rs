//! config
//!
//! Process-wide map API key configuration.
//!
//! # Design
//!
//! API keys are process-wide mutable configuration read by the host's script
//! loader when constructing load URLs. To avoid ambient globals scattered
//! across modules, all access goes through explicit `set`/`get` functions
//! over one private static.
//!
//! Merging is last-write-wins per key: a key left unset in an update keeps
//! its prior value. Providers that were never configured report a documented
//! placeholder default.
//!
//! # Example
//!
//! ```
//! use mapbridge::config::{script_url, set_api_keys, ApiKeyUpdate};
//! use mapbridge::map::MapProvider;
//!
//! set_api_keys(ApiKeyUpdate {
//!     regional: Some("tk-123".to_string()),
//!     ..Default::default()
//! });
//! assert!(script_url(MapProvider::Regional).ends_with("tk=tk-123"));
//! ```

use std::sync::RwLock;

use crate::map::MapProvider;

/// Placeholder returned for the global provider before a key is set.
pub const DEFAULT_GLOBAL_KEY: &str = "your-global-maps-key";

/// Placeholder returned for the regional provider before a key is set.
pub const DEFAULT_REGIONAL_KEY: &str = "your-regional-maps-key";

const GLOBAL_SCRIPT_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/js";
const REGIONAL_SCRIPT_ENDPOINT: &str = "https://api.tianditu.gov.cn/api";

/// Partial key update; `None` fields keep their prior value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiKeyUpdate {
    /// Key for the global provider
    pub global: Option<String>,
    /// Key for the regional provider
    pub regional: Option<String>,
}

#[derive(Debug)]
struct Keys {
    global: Option<String>,
    regional: Option<String>,
}

static KEYS: RwLock<Keys> = RwLock::new(Keys {
    global: None,
    regional: None,
});

/// Merge keys into the current configuration, last-write-wins per key.
pub fn set_api_keys(update: ApiKeyUpdate) {
    let mut keys = KEYS.write().unwrap_or_else(|e| e.into_inner());
    if let Some(key) = update.global {
        keys.global = Some(key);
    }
    if let Some(key) = update.regional {
        keys.regional = Some(key);
    }
}

/// Current API key for a provider, or its placeholder default when never set.
pub fn api_key(provider: MapProvider) -> String {
    let keys = KEYS.read().unwrap_or_else(|e| e.into_inner());
    match provider {
        MapProvider::Global => keys
            .global
            .clone()
            .unwrap_or_else(|| DEFAULT_GLOBAL_KEY.to_string()),
        MapProvider::Regional => keys
            .regional
            .clone()
            .unwrap_or_else(|| DEFAULT_REGIONAL_KEY.to_string()),
    }
}

/// Script URL for a provider, rendered from its endpoint template and the
/// current API key. Host script loaders consume this when injecting the
/// provider's script asset.
pub fn script_url(provider: MapProvider) -> String {
    match provider {
        MapProvider::Global => {
            format!("{}?key={}", GLOBAL_SCRIPT_ENDPOINT, api_key(provider))
        }
        MapProvider::Regional => {
            format!("{}?v=4.0&tk={}", REGIONAL_SCRIPT_ENDPOINT, api_key(provider))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Key state is process-wide, so defaults, merging and URL rendering are
    // exercised in one test to keep the sequencing deterministic.
    #[test]
    fn key_store_lifecycle() {
        // Defaults before anything is set.
        assert_eq!(api_key(MapProvider::Global), DEFAULT_GLOBAL_KEY);
        assert_eq!(api_key(MapProvider::Regional), DEFAULT_REGIONAL_KEY);
        assert_eq!(
            script_url(MapProvider::Global),
            format!("https://maps.googleapis.com/maps/api/js?key={DEFAULT_GLOBAL_KEY}")
        );

        // Partial update touches only the named key.
        set_api_keys(ApiKeyUpdate {
            global: Some("g-1".into()),
            ..Default::default()
        });
        assert_eq!(api_key(MapProvider::Global), "g-1");
        assert_eq!(api_key(MapProvider::Regional), DEFAULT_REGIONAL_KEY);

        // Last write wins per key; the other key is retained.
        set_api_keys(ApiKeyUpdate {
            regional: Some("r-1".into()),
            ..Default::default()
        });
        set_api_keys(ApiKeyUpdate {
            global: Some("g-2".into()),
            ..Default::default()
        });
        assert_eq!(api_key(MapProvider::Global), "g-2");
        assert_eq!(api_key(MapProvider::Regional), "r-1");

        assert_eq!(
            script_url(MapProvider::Global),
            "https://maps.googleapis.com/maps/api/js?key=g-2"
        );
        assert_eq!(
            script_url(MapProvider::Regional),
            "https://api.tianditu.gov.cn/api?v=4.0&tk=r-1"
        );
    }
}
