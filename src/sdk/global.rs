//! sdk::global
//!
//! Capability traits for the global provider's native object model.
//!
//! # Design
//!
//! The global SDK takes coordinates in (lat, lng) order, renders marker
//! titles as a native marker property, toggles interaction through one
//! options-object assignment, and geocodes through a structured
//! request/response pair with an explicit status.

use std::sync::Arc;

use async_trait::async_trait;

use super::{ClickListener, SdkError};
use crate::map::LatLng;

/// Interaction capabilities applied as one options-object assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiOptions {
    /// Whether the map can be dragged
    pub draggable: bool,
    /// Whether the zoom control is shown
    pub zoom_control: bool,
    /// Whether the scroll wheel zooms
    pub scroll_wheel: bool,
    /// Whether double-click zoom is disabled (native flag is inverted)
    pub disable_double_click_zoom: bool,
}

impl UiOptions {
    /// The option set applied when locking the map.
    pub fn locked() -> Self {
        UiOptions {
            draggable: false,
            zoom_control: false,
            scroll_wheel: false,
            disable_double_click_zoom: true,
        }
    }

    /// The option set applied when unlocking the map.
    pub fn unlocked() -> Self {
        UiOptions {
            draggable: true,
            zoom_control: true,
            scroll_wheel: true,
            disable_double_click_zoom: false,
        }
    }
}

/// Native marker construction options.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalMarkerInit {
    /// Marker position, (lat, lng) order
    pub position: LatLng,
    /// Native marker title (rendered by the SDK)
    pub title: Option<String>,
    /// Custom icon image URL
    pub icon: Option<String>,
}

/// Status of a native geocoding call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeocodeStatus {
    /// The search succeeded
    Ok,
    /// The search matched nothing
    ZeroResults,
    /// Any other native failure
    Error,
}

/// One structured geocoding result.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeResult {
    /// Formatted address string
    pub formatted_address: String,
    /// Result coordinate
    pub location: LatLng,
}

/// Native geocoding response.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeResponse {
    /// Native status
    pub status: GeocodeStatus,
    /// Results in native ranking order
    pub results: Vec<GeocodeResult>,
}

impl GeocodeResponse {
    /// An empty successful response.
    pub fn empty() -> Self {
        GeocodeResponse {
            status: GeocodeStatus::Ok,
            results: Vec::new(),
        }
    }
}

/// The global provider's namespace: constructors and services.
#[async_trait]
pub trait GlobalNamespace: Send + Sync {
    /// Construct a native map bound to the given display surface.
    ///
    /// # Errors
    ///
    /// [`SdkError::ContainerNotFound`] if the surface does not exist.
    fn create_map(
        &self,
        container: &str,
        center: LatLng,
        zoom: u8,
    ) -> Result<Arc<dyn GlobalMapHandle>, SdkError>;

    /// Construct an info window holding the given content.
    fn create_info_window(&self, content: &str) -> Arc<dyn GlobalInfoWindowHandle>;

    /// Geocode an address through the native geocoder.
    async fn geocode(&self, address: &str) -> GeocodeResponse;
}

/// A native map object.
pub trait GlobalMapHandle: Send + Sync {
    /// Re-center the map.
    fn set_center(&self, center: LatLng);

    /// Change the zoom level.
    fn set_zoom(&self, zoom: u8);

    /// Apply interaction options as one assignment.
    fn set_ui_options(&self, options: UiOptions);

    /// Construct a marker attached to this map.
    fn add_marker(&self, init: GlobalMarkerInit) -> Arc<dyn GlobalMarkerHandle>;
}

/// A native marker object.
pub trait GlobalMarkerHandle: Send + Sync {
    /// Register a click listener on the marker.
    fn add_click_listener(&self, listener: ClickListener);

    /// Detach the marker from its map (the native removal idiom).
    fn detach(&self);
}

/// A native info window object.
pub trait GlobalInfoWindowHandle: Send + Sync {
    /// The window's content.
    fn content(&self) -> String;

    /// Open the window at its anchor marker.
    fn open(&self);

    /// Close the window.
    fn close(&self);
}
