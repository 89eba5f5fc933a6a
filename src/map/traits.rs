//! map::traits
//!
//! Unified map contract implemented by every provider adapter.
//!
//! # Design
//!
//! The `MapAdapter` trait is async because `init` and `search_address`
//! suspend on external work (script loading, native geocoding). Everything
//! else is synchronous bookkeeping against the native map object.
//!
//! Adapters degrade rather than panic when used before `init`:
//! - mutators (`set_center`, `set_zoom`, `lock_map`, ...) are silent no-ops
//! - marker creation returns the empty string
//! - `search_address` is the one pre-init call that errors, with
//!   [`MapError::NotInitialized`]
//!
//! Callers must treat an empty marker id as the uninitialized signal.
//!
//! # Example
//!
//! ```ignore
//! use mapbridge::map::{MapAdapter, MapOptions, LatLng};
//!
//! async fn show_office(map: &mut dyn MapAdapter) -> Result<(), MapError> {
//!     map.init(MapOptions {
//!         container: "map".to_string(),
//!         center: LatLng::new(39.9, 116.4),
//!         zoom: 10,
//!     })
//!     .await?;
//!     map.add_marker(39.91, 116.41, Some("Office"), None);
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::factory::MapProvider;
use crate::loader::LoadError;
use crate::sdk::SdkError;

/// Errors from map operations.
///
/// Initialization failures are fatal to the adapter instance: the caller
/// must discard it and retry with a fresh one.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MapError {
    /// The provider's script asset could not be loaded.
    #[error("failed to load {provider} map script: {reason}")]
    ScriptLoad {
        /// Provider whose script failed to load
        provider: MapProvider,
        /// Human-readable failure reason
        reason: String,
    },

    /// The target display surface does not exist.
    #[error("map container not found: {0}")]
    ContainerNotFound(String),

    /// The map has not been initialized (only `search_address` raises this;
    /// other methods degrade silently).
    #[error("map not initialized")]
    NotInitialized,

    /// The factory was given an unrecognized provider tag.
    #[error("unsupported map type: {0}")]
    UnsupportedProvider(String),
}

impl From<LoadError> for MapError {
    fn from(err: LoadError) -> Self {
        MapError::ScriptLoad {
            provider: err.provider,
            reason: err.reason,
        }
    }
}

impl From<SdkError> for MapError {
    fn from(err: SdkError) -> Self {
        match err {
            SdkError::NamespaceUnavailable(provider) => MapError::ScriptLoad {
                provider,
                reason: "SDK namespace not present after script load".to_string(),
            },
            SdkError::ContainerNotFound(container) => MapError::ContainerNotFound(container),
        }
    }
}

/// A geographic coordinate in caller order: latitude first.
///
/// The contract always speaks (lat, lng). Adapters perform any reordering
/// their native SDK requires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
}

impl LatLng {
    /// Create a coordinate from latitude and longitude.
    pub fn new(lat: f64, lng: f64) -> Self {
        LatLng { lat, lng }
    }
}

/// Immutable input to [`MapAdapter::init`].
#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    /// Identifier of the display surface the native map binds to
    pub container: String,
    /// Initial map center
    pub center: LatLng,
    /// Initial zoom level
    pub zoom: u8,
}

/// Callback invoked when a marker is clicked.
///
/// Receives the generated marker id. The native marker handle is not exposed:
/// the contract never leaks provider-specific types to callers.
pub type MarkerClickHandler = Arc<dyn Fn(&str) + Send + Sync>;

/// Options for [`MapAdapter::add_custom_marker`].
///
/// A superset of the plain `add_marker` arguments: custom icon image, rich
/// info-window content, and click handling.
#[derive(Clone, Default)]
pub struct MarkerOptions {
    /// Marker position
    pub position: LatLng,
    /// Visible label text (native-dependent rendering)
    pub title: Option<String>,
    /// Custom icon image URL
    pub icon: Option<String>,
    /// Info-window content; when present, clicking the marker opens the
    /// window (and still invokes `on_click` if set)
    pub content: Option<String>,
    /// Click callback
    pub on_click: Option<MarkerClickHandler>,
}

// Custom Debug: the click handler is an opaque closure.
impl std::fmt::Debug for MarkerOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarkerOptions")
            .field("position", &self.position)
            .field("title", &self.title)
            .field("icon", &self.icon)
            .field("content", &self.content)
            .field("has_on_click", &self.on_click.is_some())
            .finish()
    }
}

/// One geocoding/search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Formatted address or place name
    pub address: String,
    /// Result coordinate, always numeric (lat, lng)
    pub location: LatLng,
}

/// The unified map contract implemented by every provider adapter.
///
/// # Ordering
///
/// Calls must be issued in causal order (`init` before anything else).
/// Adapters do not queue or reorder; mutators called before `init` completes
/// fall into their documented no-op/sentinel guards.
///
/// # Lifecycle
///
/// Construct via [`create_map`](super::create_map), `init` once, drive
/// through the contract, end with `destroy`. After `destroy`, every method
/// behaves as if the adapter were never initialized.
#[async_trait]
pub trait MapAdapter: Send {
    /// The provider this adapter targets.
    fn provider(&self) -> MapProvider;

    /// Load the provider script and construct the native map bound to
    /// `options.container`, centered at `options.center`, at `options.zoom`.
    ///
    /// # Errors
    ///
    /// - [`MapError::ScriptLoad`] if the script asset fails to load
    /// - [`MapError::ContainerNotFound`] if the display surface is missing
    ///
    /// Failure is fatal to this instance; no retry is attempted.
    async fn init(&mut self, options: MapOptions) -> Result<(), MapError>;

    /// Re-center the map. No-op before `init`.
    fn set_center(&mut self, lat: f64, lng: f64);

    /// Change the zoom level. No-op before `init`.
    fn set_zoom(&mut self, zoom: u8);

    /// Create a marker at the point, with an optional visible label and
    /// click callback.
    ///
    /// Returns the generated marker id, or the empty string if the map is
    /// not initialized (never an error on this path).
    fn add_marker(
        &mut self,
        lat: f64,
        lng: f64,
        title: Option<&str>,
        on_click: Option<MarkerClickHandler>,
    ) -> String;

    /// Create a marker with the full option set: icon, info-window content,
    /// click handling.
    ///
    /// When `content` is present, clicking the marker opens an info window
    /// with that content and then invokes `on_click` if also given. When
    /// only `on_click` is given, clicking just invokes the callback.
    ///
    /// Returns `""` under the same uninitialized condition as `add_marker`.
    fn add_custom_marker(&mut self, options: MarkerOptions) -> String;

    /// Remove the marker, its label (if any), and its info window (if any),
    /// purging all three registries of the id. A missing id in any registry
    /// is tolerated silently.
    fn remove_marker(&mut self, marker_id: &str);

    /// Delegate a geocoding/search to the native SDK.
    ///
    /// Result ordering follows native provider ranking; the adapter imposes
    /// no dedup or sort.
    ///
    /// # Errors
    ///
    /// [`MapError::NotInitialized`] before `init`. Once initialized this
    /// never errors: a non-success native status resolves to an empty list.
    async fn search_address(&self, keyword: &str) -> Result<Vec<SearchResult>, MapError>;

    /// Disable drag/zoom/scroll/double-click/keyboard interaction.
    /// Idempotent: native toggles fire only on the unlocked -> locked
    /// transition.
    fn lock_map(&mut self);

    /// Symmetric idempotent inverse of [`lock_map`](MapAdapter::lock_map).
    fn unlock_map(&mut self);

    /// Whether the map is currently locked.
    fn is_locked(&self) -> bool;

    /// Tear down: release every registered marker/label/info-window, clear
    /// all registries, detach adapter-attached listeners, and drop the
    /// native map reference. Safe to call more than once; subsequent
    /// contract calls fall into their uninitialized guards.
    fn destroy(&mut self);
}
