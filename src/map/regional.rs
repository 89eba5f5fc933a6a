//! map::regional
//!
//! Adapter for the regional Chinese provider.
//!
//! # Design
//!
//! This adapter carries the heavier normalization load of the two variants:
//!
//! - the native SDK wants (lng, lat), so every contract coordinate is
//!   reordered exactly once, here,
//! - marker titles are separate label overlays tracked in their own
//!   registry,
//! - info windows open through the map object at a position, with a fixed
//!   pixel offset above the marker,
//! - search results are raw POI JSON run through [`super::poi`],
//! - interaction locking is four discrete capability toggles,
//! - `destroy` additionally clears marker click listeners, map-level
//!   listeners, and the container's rendered content.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::factory::MapProvider;
use super::poi;
use super::traits::{
    MapAdapter, MapError, MapOptions, MarkerClickHandler, MarkerOptions, SearchResult,
};
use crate::sdk::regional::{
    IconOptions, LngLat, RegionalInfoWindowHandle, RegionalLabelHandle, RegionalMapHandle,
    RegionalMarkerHandle, RegionalNamespace,
};
use crate::sdk::SdkEnvironment;

/// Results requested per native search page.
const SEARCH_PAGE_CAPACITY: u32 = 10;

/// Pixel offset lifting an info window above its marker.
const INFO_WINDOW_OFFSET: (i32, i32) = (0, -30);

/// [`MapAdapter`] implementation for the regional provider.
pub struct RegionalMapAdapter {
    env: Arc<dyn SdkEnvironment>,
    sdk: Option<Arc<dyn RegionalNamespace>>,
    map: Option<Arc<dyn RegionalMapHandle>>,
    markers: HashMap<String, Arc<dyn RegionalMarkerHandle>>,
    labels: HashMap<String, Arc<dyn RegionalLabelHandle>>,
    info_windows: HashMap<String, Arc<dyn RegionalInfoWindowHandle>>,
    locked: bool,
    marker_seq: u64,
}

impl RegionalMapAdapter {
    /// Create an uninitialized adapter against the given environment.
    pub fn new(env: Arc<dyn SdkEnvironment>) -> Self {
        RegionalMapAdapter {
            env,
            sdk: None,
            map: None,
            markers: HashMap::new(),
            labels: HashMap::new(),
            info_windows: HashMap::new(),
            locked: false,
            marker_seq: 0,
        }
    }

    fn next_marker_id(&mut self) -> String {
        super::next_marker_id(&mut self.marker_seq)
    }
}

#[async_trait]
impl MapAdapter for RegionalMapAdapter {
    fn provider(&self) -> MapProvider {
        MapProvider::Regional
    }

    async fn init(&mut self, options: MapOptions) -> Result<(), MapError> {
        self.env.loader().load(MapProvider::Regional).await?;
        let sdk = self.env.regional()?;
        // Native constructor wants (lng, lat).
        let center = LngLat::new(options.center.lng, options.center.lat);
        let map = sdk.create_map(&options.container, center, options.zoom)?;
        self.sdk = Some(sdk);
        self.map = Some(map);
        Ok(())
    }

    fn set_center(&mut self, lat: f64, lng: f64) {
        if let Some(map) = &self.map {
            map.pan_to(LngLat::new(lng, lat));
        }
    }

    fn set_zoom(&mut self, zoom: u8) {
        if let Some(map) = &self.map {
            map.set_zoom(zoom);
        }
    }

    fn add_marker(
        &mut self,
        lat: f64,
        lng: f64,
        title: Option<&str>,
        on_click: Option<MarkerClickHandler>,
    ) -> String {
        self.add_custom_marker(MarkerOptions {
            position: super::LatLng::new(lat, lng),
            title: title.map(str::to_string),
            icon: None,
            content: None,
            on_click,
        })
    }

    fn add_custom_marker(&mut self, options: MarkerOptions) -> String {
        let (Some(map), Some(sdk)) = (self.map.clone(), self.sdk.clone()) else {
            return String::new();
        };
        let position = LngLat::new(options.position.lng, options.position.lat);
        let icon = options.icon.as_deref().map(IconOptions::for_url);
        let marker = sdk.create_marker(position, icon);
        let id = self.next_marker_id();

        let label = options
            .title
            .as_deref()
            .map(|title| sdk.create_label(title, position));
        let window = options
            .content
            .as_deref()
            .map(|content| sdk.create_info_window(content, INFO_WINDOW_OFFSET));

        map.add_marker_overlay(&marker);
        if let Some(label) = &label {
            map.add_label_overlay(label);
        }

        if let Some(window) = &window {
            let map = map.clone();
            let window = window.clone();
            let handler = options.on_click.clone();
            let marker_id = id.clone();
            marker.add_click_listener(Box::new(move || {
                map.open_info_window(&window, position);
                if let Some(handler) = &handler {
                    handler(&marker_id);
                }
            }));
        } else if let Some(handler) = options.on_click.clone() {
            let marker_id = id.clone();
            marker.add_click_listener(Box::new(move || handler(&marker_id)));
        }

        // Registries are written only once every native object exists.
        self.markers.insert(id.clone(), marker);
        if let Some(label) = label {
            self.labels.insert(id.clone(), label);
        }
        if let Some(window) = window {
            self.info_windows.insert(id.clone(), window);
        }
        id
    }

    fn remove_marker(&mut self, marker_id: &str) {
        let Some(map) = &self.map else {
            return;
        };
        if let Some(marker) = self.markers.remove(marker_id) {
            map.remove_marker_overlay(&marker);
        }
        if let Some(label) = self.labels.remove(marker_id) {
            map.remove_label_overlay(&label);
        }
        if let Some(window) = self.info_windows.remove(marker_id) {
            map.close_info_window(&window);
        }
    }

    async fn search_address(&self, keyword: &str) -> Result<Vec<SearchResult>, MapError> {
        if self.map.is_none() {
            return Err(MapError::NotInitialized);
        }
        let Some(sdk) = &self.sdk else {
            return Err(MapError::NotInitialized);
        };
        let response = sdk.local_search(keyword, SEARCH_PAGE_CAPACITY).await;
        let Some(pois) = response.pois else {
            debug!("regional search exposed no POI accessor");
            return Ok(Vec::new());
        };
        debug!(count = pois.len(), "regional search POIs");
        Ok(pois.iter().map(poi::normalize_poi).collect())
    }

    fn lock_map(&mut self) {
        if let Some(map) = &self.map {
            if !self.locked {
                self.locked = true;
                map.disable_drag();
                map.disable_scroll_wheel_zoom();
                map.disable_double_click_zoom();
                map.disable_keyboard();
            }
        }
    }

    fn unlock_map(&mut self) {
        if let Some(map) = &self.map {
            if self.locked {
                self.locked = false;
                map.enable_drag();
                map.enable_scroll_wheel_zoom();
                map.enable_double_click_zoom();
                map.enable_keyboard();
            }
        }
    }

    fn is_locked(&self) -> bool {
        self.locked
    }

    fn destroy(&mut self) {
        let Some(map) = self.map.take() else {
            return;
        };
        for marker in self.markers.values() {
            marker.clear_click_listeners();
            map.remove_marker_overlay(marker);
        }
        for label in self.labels.values() {
            map.remove_label_overlay(label);
        }
        for window in self.info_windows.values() {
            map.close_info_window(window);
        }
        self.markers.clear();
        self.labels.clear();
        self.info_windows.clear();
        map.clear_listeners();
        map.clear_container();
        self.sdk = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::LatLng;
    use crate::sdk::fake::FakeEnvironment;
    use crate::sdk::regional::LocalSearchResponse;
    use serde_json::json;

    fn options() -> MapOptions {
        MapOptions {
            container: "map".to_string(),
            center: LatLng::new(39.9, 116.4),
            zoom: 10,
        }
    }

    async fn initialized() -> (Arc<FakeEnvironment>, RegionalMapAdapter) {
        let env = FakeEnvironment::new();
        env.regional_sdk().register_container("map");
        let mut adapter = RegionalMapAdapter::new(env.clone());
        adapter.init(options()).await.unwrap();
        (env, adapter)
    }

    #[tokio::test]
    async fn init_reorders_center_to_native_order() {
        let (env, _adapter) = initialized().await;
        let maps = env.regional_sdk().maps();
        assert_eq!(maps.len(), 1);
        // Contract said (lat 39.9, lng 116.4); native must see (lng, lat).
        assert_eq!(maps[0].center(), LngLat::new(116.4, 39.9));
    }

    #[tokio::test]
    async fn title_becomes_a_label_overlay() {
        let (env, mut adapter) = initialized().await;
        adapter.add_marker(39.91, 116.41, Some("Office"), None);

        let map = &env.regional_sdk().maps()[0];
        assert_eq!(map.marker_overlay_count(), 1);
        assert_eq!(map.label_overlay_count(), 1);

        let labels = env.regional_sdk().labels();
        assert_eq!(labels[0].text(), "Office");
        assert_eq!(labels[0].position(), LngLat::new(116.41, 39.91));
    }

    #[tokio::test]
    async fn untitled_marker_creates_no_label() {
        let (env, mut adapter) = initialized().await;
        adapter.add_marker(39.91, 116.41, None, None);

        let map = &env.regional_sdk().maps()[0];
        assert_eq!(map.marker_overlay_count(), 1);
        assert_eq!(map.label_overlay_count(), 0);
    }

    #[tokio::test]
    async fn custom_icon_carries_default_geometry() {
        let (env, mut adapter) = initialized().await;
        adapter.add_custom_marker(MarkerOptions {
            position: LatLng::new(39.91, 116.41),
            icon: Some("https://example.com/pin.png".to_string()),
            ..Default::default()
        });

        let icon = env.regional_sdk().markers()[0].icon().unwrap();
        assert_eq!(icon.icon_url, "https://example.com/pin.png");
        assert_eq!(icon.icon_size, (32, 32));
        assert_eq!(icon.icon_anchor, (16, 32));
    }

    #[tokio::test]
    async fn info_window_uses_fixed_offset() {
        let (env, mut adapter) = initialized().await;
        adapter.add_custom_marker(MarkerOptions {
            position: LatLng::new(39.91, 116.41),
            content: Some("hello".to_string()),
            ..Default::default()
        });

        let windows = env.regional_sdk().info_windows();
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].offset(), (0, -30));
    }

    #[tokio::test]
    async fn search_normalizes_poi_payloads() {
        let (env, adapter) = initialized().await;
        env.regional_sdk().set_search_response(LocalSearchResponse {
            pois: Some(vec![
                json!({ "name": "Palace", "lonlat": "116.395032,39.906343" }),
                json!({ "addressDetail": "somewhere" }),
            ]),
        });

        let results = adapter.search_address("palace").await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].location, LatLng::new(39.906343, 116.395032));
        assert_eq!(results[0].address, "Palace");
        // Unparseable coordinates keep the result with the zero sentinel.
        assert_eq!(results[1].location, LatLng::new(0.0, 0.0));

        assert_eq!(
            env.regional_sdk().search_calls(),
            vec![("palace".to_string(), 10)]
        );
    }

    #[tokio::test]
    async fn destroy_clears_native_map_state() {
        let (env, mut adapter) = initialized().await;
        adapter.add_custom_marker(MarkerOptions {
            position: LatLng::new(39.91, 116.41),
            title: Some("A".to_string()),
            content: Some("hello".to_string()),
            ..Default::default()
        });
        adapter.destroy();

        let map = &env.regional_sdk().maps()[0];
        assert_eq!(map.marker_overlay_count(), 0);
        assert_eq!(map.label_overlay_count(), 0);
        assert!(map.listeners_cleared());
        assert!(map.container_cleared());
        assert_eq!(env.regional_sdk().markers()[0].listener_count(), 0);
    }
}
