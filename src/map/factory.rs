//! map::factory
//!
//! Provider selection and adapter creation.
//!
//! # Design
//!
//! This module is the single place that knows about concrete adapter types.
//! Callers use [`create_map`] (or [`create_map_from_tag`] when the provider
//! arrives as a configuration string) and only ever see `Box<dyn MapAdapter>`,
//! keeping provider-specific types out of call sites.
//!
//! Construction is pure: no scripts are loaded and no native objects are
//! built until `init` is called on the returned adapter.
//!
//! # Example
//!
//! ```
//! use mapbridge::map::MapProvider;
//!
//! assert_eq!(MapProvider::parse("regional"), Some(MapProvider::Regional));
//! assert_eq!(MapProvider::parse("osm"), None);
//! assert_eq!(MapProvider::default(), MapProvider::Regional);
//! ```

use std::sync::Arc;

use super::global::GlobalMapAdapter;
use super::regional::RegionalMapAdapter;
use super::traits::{MapAdapter, MapError};
use crate::sdk::SdkEnvironment;

/// Supported map providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapProvider {
    /// The global provider
    Global,
    /// The regional Chinese provider (the default)
    Regional,
}

impl MapProvider {
    /// Get all supported providers.
    pub fn all() -> &'static [MapProvider] {
        &[MapProvider::Global, MapProvider::Regional]
    }

    /// Get the provider tag as a string.
    ///
    /// This matches the tag used by [`create_map_from_tag`].
    pub fn name(&self) -> &'static str {
        match self {
            MapProvider::Global => "global",
            MapProvider::Regional => "regional",
        }
    }

    /// Parse a provider from a tag string.
    ///
    /// # Returns
    ///
    /// `Some(MapProvider)` if the tag matches a known provider, `None`
    /// otherwise.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "global" => Some(MapProvider::Global),
            "regional" => Some(MapProvider::Regional),
            _ => None,
        }
    }
}

impl Default for MapProvider {
    fn default() -> Self {
        MapProvider::Regional
    }
}

impl std::fmt::Display for MapProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Create an adapter for the given provider.
///
/// Pure construction: the only side effect is allocating the adapter.
/// Script loading and native map construction are deferred to `init`.
///
/// # Example
///
/// ```
/// use mapbridge::map::{create_map, MapProvider};
/// use mapbridge::sdk::fake::FakeEnvironment;
///
/// let env = FakeEnvironment::new();
/// let map = create_map(MapProvider::Global, env);
/// assert_eq!(map.provider(), MapProvider::Global);
/// ```
pub fn create_map(provider: MapProvider, env: Arc<dyn SdkEnvironment>) -> Box<dyn MapAdapter> {
    match provider {
        MapProvider::Global => Box::new(GlobalMapAdapter::new(env)),
        MapProvider::Regional => Box::new(RegionalMapAdapter::new(env)),
    }
}

/// Create an adapter from a provider tag string.
///
/// # Errors
///
/// [`MapError::UnsupportedProvider`] for any tag outside the known set,
/// raised immediately at construction time.
pub fn create_map_from_tag(
    tag: &str,
    env: Arc<dyn SdkEnvironment>,
) -> Result<Box<dyn MapAdapter>, MapError> {
    let provider = MapProvider::parse(tag)
        .ok_or_else(|| MapError::UnsupportedProvider(tag.to_string()))?;
    Ok(create_map(provider, env))
}
