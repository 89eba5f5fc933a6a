//! map::global
//!
//! Adapter for the global provider.
//!
//! # Design
//!
//! The global SDK already speaks (lat, lng) and renders marker titles as a
//! native marker property, so this adapter is mostly bookkeeping: registries
//! keyed by generated id, click wiring, and the one-assignment interaction
//! lock. The label registry is never populated here — titles are native —
//! but it is kept and purged like the others so the three-registry teardown
//! contract is uniform across variants.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::factory::MapProvider;
use super::traits::{
    MapAdapter, MapError, MapOptions, MarkerClickHandler, MarkerOptions, SearchResult,
};
use crate::sdk::global::{
    GeocodeStatus, GlobalInfoWindowHandle, GlobalMapHandle, GlobalMarkerHandle,
    GlobalMarkerInit, GlobalNamespace, UiOptions,
};
use crate::sdk::SdkEnvironment;

/// [`MapAdapter`] implementation for the global provider.
pub struct GlobalMapAdapter {
    env: Arc<dyn SdkEnvironment>,
    sdk: Option<Arc<dyn GlobalNamespace>>,
    map: Option<Arc<dyn GlobalMapHandle>>,
    markers: HashMap<String, Arc<dyn GlobalMarkerHandle>>,
    labels: HashMap<String, Arc<dyn GlobalMarkerHandle>>,
    info_windows: HashMap<String, Arc<dyn GlobalInfoWindowHandle>>,
    locked: bool,
    marker_seq: u64,
}

impl GlobalMapAdapter {
    /// Create an uninitialized adapter against the given environment.
    pub fn new(env: Arc<dyn SdkEnvironment>) -> Self {
        GlobalMapAdapter {
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
impl MapAdapter for GlobalMapAdapter {
    fn provider(&self) -> MapProvider {
        MapProvider::Global
    }

    async fn init(&mut self, options: MapOptions) -> Result<(), MapError> {
        self.env.loader().load(MapProvider::Global).await?;
        let sdk = self.env.global()?;
        let map = sdk.create_map(&options.container, options.center, options.zoom)?;
        self.sdk = Some(sdk);
        self.map = Some(map);
        Ok(())
    }

    fn set_center(&mut self, lat: f64, lng: f64) {
        if let Some(map) = &self.map {
            map.set_center(super::LatLng::new(lat, lng));
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
        let Some(map) = &self.map else {
            return String::new();
        };
        let marker = map.add_marker(GlobalMarkerInit {
            position: super::LatLng::new(lat, lng),
            title: title.map(str::to_string),
            icon: None,
        });
        let id = self.next_marker_id();

        if let Some(handler) = on_click {
            let marker_id = id.clone();
            marker.add_click_listener(Box::new(move || handler(&marker_id)));
        }

        self.markers.insert(id.clone(), marker);
        id
    }

    fn add_custom_marker(&mut self, options: MarkerOptions) -> String {
        let (Some(map), Some(sdk)) = (self.map.clone(), self.sdk.clone()) else {
            return String::new();
        };
        let marker = map.add_marker(GlobalMarkerInit {
            position: options.position,
            title: options.title.clone(),
            icon: options.icon.clone(),
        });
        let id = self.next_marker_id();

        let mut window = None;
        if let Some(content) = &options.content {
            let info = sdk.create_info_window(content);
            let opened = info.clone();
            let handler = options.on_click.clone();
            let marker_id = id.clone();
            marker.add_click_listener(Box::new(move || {
                opened.open();
                if let Some(handler) = &handler {
                    handler(&marker_id);
                }
            }));
            window = Some(info);
        } else if let Some(handler) = options.on_click.clone() {
            let marker_id = id.clone();
            marker.add_click_listener(Box::new(move || handler(&marker_id)));
        }

        // Registries are written only once every native object exists.
        self.markers.insert(id.clone(), marker);
        if let Some(window) = window {
            self.info_windows.insert(id.clone(), window);
        }
        id
    }

    fn remove_marker(&mut self, marker_id: &str) {
        if self.map.is_none() {
            return;
        }
        if let Some(marker) = self.markers.remove(marker_id) {
            marker.detach();
        }
        if let Some(label) = self.labels.remove(marker_id) {
            label.detach();
        }
        if let Some(window) = self.info_windows.remove(marker_id) {
            window.close();
        }
    }

    async fn search_address(&self, keyword: &str) -> Result<Vec<SearchResult>, MapError> {
        if self.map.is_none() {
            return Err(MapError::NotInitialized);
        }
        let Some(sdk) = &self.sdk else {
            return Err(MapError::NotInitialized);
        };
        let response = sdk.geocode(keyword).await;
        if response.status != GeocodeStatus::Ok {
            debug!(status = ?response.status, "global geocode returned non-success status");
            return Ok(Vec::new());
        }
        debug!(count = response.results.len(), "global geocode results");
        Ok(response
            .results
            .into_iter()
            .map(|result| SearchResult {
                address: result.formatted_address,
                location: result.location,
            })
            .collect())
    }

    fn lock_map(&mut self) {
        if let Some(map) = &self.map {
            if !self.locked {
                self.locked = true;
                map.set_ui_options(UiOptions::locked());
            }
        }
    }

    fn unlock_map(&mut self) {
        if let Some(map) = &self.map {
            if self.locked {
                self.locked = false;
                map.set_ui_options(UiOptions::unlocked());
            }
        }
    }

    fn is_locked(&self) -> bool {
        self.locked
    }

    fn destroy(&mut self) {
        for marker in self.markers.values() {
            marker.detach();
        }
        for label in self.labels.values() {
            label.detach();
        }
        for window in self.info_windows.values() {
            window.close();
        }
        self.markers.clear();
        self.labels.clear();
        self.info_windows.clear();
        self.map = None;
        self.sdk = None;
    }
}
