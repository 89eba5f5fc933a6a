//! sdk::regional
//!
//! Capability traits for the regional provider's native object model.
//!
//! # Design
//!
//! The regional SDK diverges from the global one everywhere the adapter has
//! to care:
//!
//! - coordinates are (lng, lat): [`LngLat`] makes the reorder explicit,
//! - marker titles are separate label overlays, not a marker property,
//! - markers/labels attach through overlay add/remove calls on the map,
//! - interaction locking is discrete enable/disable calls per capability,
//! - search returns point-of-interest payloads as raw JSON whose coordinate
//!   fields arrive in inconsistent shapes (see [`crate::map::poi`]).

use std::sync::Arc;

use async_trait::async_trait;

use super::{ClickListener, SdkError};

/// A coordinate in the regional SDK's native order: longitude first.
///
/// Constructed `LngLat::new(lng, lat)`, mirroring the native constructor.
/// The regional adapter is the only place that builds these from the
/// contract's (lat, lng) values.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LngLat {
    /// Longitude in degrees
    pub lng: f64,
    /// Latitude in degrees
    pub lat: f64,
}

impl LngLat {
    /// Create a coordinate in native argument order.
    pub fn new(lng: f64, lat: f64) -> Self {
        LngLat { lng, lat }
    }
}

/// Custom icon options for a regional marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconOptions {
    /// Icon image URL
    pub icon_url: String,
    /// Icon size in pixels
    pub icon_size: (u32, u32),
    /// Icon anchor point in pixels
    pub icon_anchor: (u32, u32),
}

impl IconOptions {
    /// Icon options for a URL with the default 32x32 size anchored at the
    /// bottom center.
    pub fn for_url(icon_url: impl Into<String>) -> Self {
        IconOptions {
            icon_url: icon_url.into(),
            icon_size: (32, 32),
            icon_anchor: (16, 32),
        }
    }
}

/// Native local-search response.
///
/// `pois` is `None` when the native result object exposes no
/// point-of-interest accessor at all (the absorbed failure path).
#[derive(Debug, Clone, Default)]
pub struct LocalSearchResponse {
    /// Raw point-of-interest payloads, in native ranking order
    pub pois: Option<Vec<serde_json::Value>>,
}

/// The regional provider's namespace: constructors and services.
#[async_trait]
pub trait RegionalNamespace: Send + Sync {
    /// Construct a native map bound to the given display surface.
    ///
    /// # Errors
    ///
    /// [`SdkError::ContainerNotFound`] if the surface does not exist.
    fn create_map(
        &self,
        container: &str,
        center: LngLat,
        zoom: u8,
    ) -> Result<Arc<dyn RegionalMapHandle>, SdkError>;

    /// Construct a marker at a position, with an optional custom icon.
    fn create_marker(
        &self,
        position: LngLat,
        icon: Option<IconOptions>,
    ) -> Arc<dyn RegionalMarkerHandle>;

    /// Construct a text label overlay at a position.
    fn create_label(&self, text: &str, position: LngLat) -> Arc<dyn RegionalLabelHandle>;

    /// Construct an info window with a pixel offset from its anchor.
    fn create_info_window(
        &self,
        content: &str,
        offset: (i32, i32),
    ) -> Arc<dyn RegionalInfoWindowHandle>;

    /// Run a local search with the given page capacity.
    async fn local_search(&self, keyword: &str, page_capacity: u32) -> LocalSearchResponse;
}

/// A native map object.
pub trait RegionalMapHandle: Send + Sync {
    /// Pan the map to a new center.
    fn pan_to(&self, center: LngLat);

    /// Change the zoom level.
    fn set_zoom(&self, zoom: u8);

    /// Attach a marker overlay.
    fn add_marker_overlay(&self, marker: &Arc<dyn RegionalMarkerHandle>);

    /// Remove a marker overlay.
    fn remove_marker_overlay(&self, marker: &Arc<dyn RegionalMarkerHandle>);

    /// Attach a label overlay.
    fn add_label_overlay(&self, label: &Arc<dyn RegionalLabelHandle>);

    /// Remove a label overlay.
    fn remove_label_overlay(&self, label: &Arc<dyn RegionalLabelHandle>);

    /// Open an info window at a position.
    fn open_info_window(&self, window: &Arc<dyn RegionalInfoWindowHandle>, position: LngLat);

    /// Close an info window.
    fn close_info_window(&self, window: &Arc<dyn RegionalInfoWindowHandle>);

    /// Enable dragging.
    fn enable_drag(&self);
    /// Disable dragging.
    fn disable_drag(&self);
    /// Enable scroll-wheel zoom.
    fn enable_scroll_wheel_zoom(&self);
    /// Disable scroll-wheel zoom.
    fn disable_scroll_wheel_zoom(&self);
    /// Enable double-click zoom.
    fn enable_double_click_zoom(&self);
    /// Disable double-click zoom.
    fn disable_double_click_zoom(&self);
    /// Enable keyboard navigation.
    fn enable_keyboard(&self);
    /// Disable keyboard navigation.
    fn disable_keyboard(&self);

    /// Remove map-level event listeners.
    fn clear_listeners(&self);

    /// Clear the container's rendered content.
    fn clear_container(&self);
}

/// A native marker object.
pub trait RegionalMarkerHandle: Send + Sync {
    /// Register a click listener on the marker.
    fn add_click_listener(&self, listener: ClickListener);

    /// Remove the marker's click listeners.
    fn clear_click_listeners(&self);
}

/// A native label overlay.
pub trait RegionalLabelHandle: Send + Sync {
    /// The label's text.
    fn text(&self) -> String;
}

/// A native info window object.
pub trait RegionalInfoWindowHandle: Send + Sync {
    /// The window's content.
    fn content(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lng_lat_argument_order() {
        let p = LngLat::new(116.4, 39.9);
        assert_eq!(p.lng, 116.4);
        assert_eq!(p.lat, 39.9);
    }

    #[test]
    fn icon_defaults() {
        let icon = IconOptions::for_url("https://example.com/pin.png");
        assert_eq!(icon.icon_size, (32, 32));
        assert_eq!(icon.icon_anchor, (16, 32));
    }

    #[test]
    fn search_response_defaults_to_no_pois() {
        assert!(LocalSearchResponse::default().pois.is_none());
    }
}
