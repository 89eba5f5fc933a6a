//! sdk::fake
//!
//! In-memory SDK implementations for deterministic testing.
//!
//! # Design
//!
//! Each fake mirrors one native capability trait, stores its state behind
//! `Arc<Mutex<...>>`, records the operations driven through it, and exposes
//! accessors and counters so tests can assert on what the adapters actually
//! did to the native layer (toggle counts, detach counts, overlay
//! attachment, info-window open state, simulated clicks).
//!
//! [`FakeEnvironment`] wires a [`FakeScriptLoader`] (behind the caching
//! state machine) to fake namespaces, gating namespace access on the
//! loader's state the way a real runtime gates on the provider's global
//! object existing.
//!
//! # Example
//!
//! ```
//! use mapbridge::map::{create_map, LatLng, MapOptions, MapProvider};
//! use mapbridge::sdk::fake::FakeEnvironment;
//!
//! # tokio_test::block_on(async {
//! let env = FakeEnvironment::new();
//! env.global_sdk().register_container("map");
//!
//! let mut map = create_map(MapProvider::Global, env.clone());
//! map.init(MapOptions {
//!     container: "map".to_string(),
//!     center: LatLng::new(39.9, 116.4),
//!     zoom: 10,
//! })
//! .await
//! .unwrap();
//!
//! let native = &env.global_sdk().maps()[0];
//! assert_eq!(native.center(), LatLng::new(39.9, 116.4));
//! # });
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Semaphore;

use super::global::{
    GeocodeResponse, GlobalInfoWindowHandle, GlobalMapHandle, GlobalMarkerHandle,
    GlobalMarkerInit, GlobalNamespace, UiOptions,
};
use super::regional::{
    IconOptions, LngLat, LocalSearchResponse, RegionalInfoWindowHandle, RegionalLabelHandle,
    RegionalMapHandle, RegionalMarkerHandle, RegionalNamespace,
};
use super::{ClickListener, SdkEnvironment, SdkError};
use crate::loader::{CachedLoader, LoadError, LoadState, ScriptLoader};
use crate::map::{LatLng, MapProvider};

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

// ---------------------------------------------------------------------------
// Script loading
// ---------------------------------------------------------------------------

/// Fake inner script loader with configurable failures.
///
/// Not idempotent on its own (every `load` call is recorded), which is
/// exactly what the caching wrapper's tests need.
#[derive(Default)]
pub struct FakeScriptLoader {
    inner: Mutex<ScriptLoaderInner>,
}

#[derive(Default)]
struct ScriptLoaderInner {
    failures: HashMap<MapProvider, String>,
    loads: Vec<MapProvider>,
    gate: Option<Arc<Semaphore>>,
}

impl FakeScriptLoader {
    /// Create a loader that succeeds for every provider.
    pub fn new() -> Arc<Self> {
        Arc::new(FakeScriptLoader::default())
    }

    /// Make loads for a provider fail with the given reason.
    pub fn fail_with(&self, provider: MapProvider, reason: &str) {
        lock(&self.inner).failures.insert(provider, reason.to_string());
    }

    /// Remove a configured failure.
    pub fn clear_failure(&self, provider: MapProvider) {
        lock(&self.inner).failures.remove(&provider);
    }

    /// How many times this inner loader was invoked for a provider.
    pub fn load_count(&self, provider: MapProvider) -> usize {
        lock(&self.inner).loads.iter().filter(|p| **p == provider).count()
    }

    /// Install a gate: subsequent loads block until permits are added.
    pub fn gate(&self) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        lock(&self.inner).gate = Some(gate.clone());
        gate
    }
}

#[async_trait]
impl ScriptLoader for FakeScriptLoader {
    async fn load(&self, provider: MapProvider) -> Result<(), LoadError> {
        let (gate, failure) = {
            let mut inner = lock(&self.inner);
            inner.loads.push(provider);
            (inner.gate.clone(), inner.failures.get(&provider).cloned())
        };
        if let Some(gate) = gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }
        match failure {
            Some(reason) => Err(LoadError { provider, reason }),
            None => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Global provider fakes
// ---------------------------------------------------------------------------

/// Fake global SDK namespace.
#[derive(Default)]
pub struct FakeGlobalSdk {
    inner: Mutex<GlobalSdkInner>,
}

struct GlobalSdkInner {
    containers: HashSet<String>,
    maps: Vec<Arc<FakeGlobalMap>>,
    info_windows: Vec<Arc<FakeGlobalInfoWindow>>,
    geocode_response: GeocodeResponse,
    geocode_calls: Vec<String>,
}

impl Default for GlobalSdkInner {
    fn default() -> Self {
        GlobalSdkInner {
            containers: HashSet::new(),
            maps: Vec::new(),
            info_windows: Vec::new(),
            geocode_response: GeocodeResponse::empty(),
            geocode_calls: Vec::new(),
        }
    }
}

impl FakeGlobalSdk {
    /// Register a display surface so `create_map` can bind to it.
    pub fn register_container(&self, id: &str) {
        lock(&self.inner).containers.insert(id.to_string());
    }

    /// Configure the response returned by `geocode`.
    pub fn set_geocode_response(&self, response: GeocodeResponse) {
        lock(&self.inner).geocode_response = response;
    }

    /// Maps constructed through this namespace.
    pub fn maps(&self) -> Vec<Arc<FakeGlobalMap>> {
        lock(&self.inner).maps.clone()
    }

    /// Info windows constructed through this namespace.
    pub fn info_windows(&self) -> Vec<Arc<FakeGlobalInfoWindow>> {
        lock(&self.inner).info_windows.clone()
    }

    /// Addresses passed to `geocode`.
    pub fn geocode_calls(&self) -> Vec<String> {
        lock(&self.inner).geocode_calls.clone()
    }
}

#[async_trait]
impl GlobalNamespace for FakeGlobalSdk {
    fn create_map(
        &self,
        container: &str,
        center: LatLng,
        zoom: u8,
    ) -> Result<Arc<dyn GlobalMapHandle>, SdkError> {
        let mut inner = lock(&self.inner);
        if !inner.containers.contains(container) {
            return Err(SdkError::ContainerNotFound(container.to_string()));
        }
        let map = Arc::new(FakeGlobalMap {
            container: container.to_string(),
            inner: Mutex::new(GlobalMapInner {
                center,
                zoom,
                ui: UiOptions::unlocked(),
                ui_set_count: 0,
                markers: Vec::new(),
            }),
        });
        inner.maps.push(map.clone());
        Ok(map)
    }

    fn create_info_window(&self, content: &str) -> Arc<dyn GlobalInfoWindowHandle> {
        let window = Arc::new(FakeGlobalInfoWindow {
            content: content.to_string(),
            open: AtomicBool::new(false),
            open_count: AtomicUsize::new(0),
            close_count: AtomicUsize::new(0),
        });
        lock(&self.inner).info_windows.push(window.clone());
        window
    }

    async fn geocode(&self, address: &str) -> GeocodeResponse {
        let mut inner = lock(&self.inner);
        inner.geocode_calls.push(address.to_string());
        inner.geocode_response.clone()
    }
}

/// Fake global native map.
pub struct FakeGlobalMap {
    container: String,
    inner: Mutex<GlobalMapInner>,
}

struct GlobalMapInner {
    center: LatLng,
    zoom: u8,
    ui: UiOptions,
    ui_set_count: usize,
    markers: Vec<Arc<FakeGlobalMarker>>,
}

impl FakeGlobalMap {
    /// The container this map is bound to.
    pub fn container(&self) -> String {
        self.container.clone()
    }

    /// Current map center.
    pub fn center(&self) -> LatLng {
        lock(&self.inner).center
    }

    /// Current zoom level.
    pub fn zoom(&self) -> u8 {
        lock(&self.inner).zoom
    }

    /// Currently applied interaction options.
    pub fn ui_options(&self) -> UiOptions {
        lock(&self.inner).ui
    }

    /// How many times interaction options were assigned.
    pub fn ui_set_count(&self) -> usize {
        lock(&self.inner).ui_set_count
    }

    /// Markers constructed on this map.
    pub fn markers(&self) -> Vec<Arc<FakeGlobalMarker>> {
        lock(&self.inner).markers.clone()
    }
}

impl GlobalMapHandle for FakeGlobalMap {
    fn set_center(&self, center: LatLng) {
        lock(&self.inner).center = center;
    }

    fn set_zoom(&self, zoom: u8) {
        lock(&self.inner).zoom = zoom;
    }

    fn set_ui_options(&self, options: UiOptions) {
        let mut inner = lock(&self.inner);
        inner.ui = options;
        inner.ui_set_count += 1;
    }

    fn add_marker(&self, init: GlobalMarkerInit) -> Arc<dyn GlobalMarkerHandle> {
        let marker = Arc::new(FakeGlobalMarker {
            init,
            attached: AtomicBool::new(true),
            detach_count: AtomicUsize::new(0),
            listeners: Mutex::new(Vec::new()),
        });
        lock(&self.inner).markers.push(marker.clone());
        marker
    }
}

/// Fake global native marker.
pub struct FakeGlobalMarker {
    init: GlobalMarkerInit,
    attached: AtomicBool,
    detach_count: AtomicUsize,
    listeners: Mutex<Vec<ClickListener>>,
}

impl FakeGlobalMarker {
    /// Marker position.
    pub fn position(&self) -> LatLng {
        self.init.position
    }

    /// Native marker title.
    pub fn title(&self) -> Option<String> {
        self.init.title.clone()
    }

    /// Custom icon URL.
    pub fn icon(&self) -> Option<String> {
        self.init.icon.clone()
    }

    /// Whether the marker is still attached to its map.
    pub fn is_attached(&self) -> bool {
        self.attached.load(Ordering::SeqCst)
    }

    /// How many times the marker was detached.
    pub fn detach_count(&self) -> usize {
        self.detach_count.load(Ordering::SeqCst)
    }

    /// Number of registered click listeners.
    pub fn listener_count(&self) -> usize {
        lock(&self.listeners).len()
    }

    /// Simulate a user click, firing every registered listener.
    pub fn click(&self) {
        for listener in lock(&self.listeners).iter() {
            listener();
        }
    }
}

impl GlobalMarkerHandle for FakeGlobalMarker {
    fn add_click_listener(&self, listener: ClickListener) {
        lock(&self.listeners).push(listener);
    }

    fn detach(&self) {
        self.attached.store(false, Ordering::SeqCst);
        self.detach_count.fetch_add(1, Ordering::SeqCst);
    }
}

/// Fake global info window.
pub struct FakeGlobalInfoWindow {
    content: String,
    open: AtomicBool,
    open_count: AtomicUsize,
    close_count: AtomicUsize,
}

impl FakeGlobalInfoWindow {
    /// Whether the window is currently open.
    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    /// How many times the window was opened.
    pub fn open_count(&self) -> usize {
        self.open_count.load(Ordering::SeqCst)
    }

    /// How many times the window was closed.
    pub fn close_count(&self) -> usize {
        self.close_count.load(Ordering::SeqCst)
    }
}

impl GlobalInfoWindowHandle for FakeGlobalInfoWindow {
    fn content(&self) -> String {
        self.content.clone()
    }

    fn open(&self) {
        self.open.store(true, Ordering::SeqCst);
        self.open_count.fetch_add(1, Ordering::SeqCst);
    }

    fn close(&self) {
        self.open.store(false, Ordering::SeqCst);
        self.close_count.fetch_add(1, Ordering::SeqCst);
    }
}

// ---------------------------------------------------------------------------
// Regional provider fakes
// ---------------------------------------------------------------------------

/// Interaction capability flags on the fake regional map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionalCapabilities {
    /// Dragging enabled
    pub drag: bool,
    /// Scroll-wheel zoom enabled
    pub scroll_wheel_zoom: bool,
    /// Double-click zoom enabled
    pub double_click_zoom: bool,
    /// Keyboard navigation enabled
    pub keyboard: bool,
}

impl Default for RegionalCapabilities {
    fn default() -> Self {
        RegionalCapabilities {
            drag: true,
            scroll_wheel_zoom: true,
            double_click_zoom: true,
            keyboard: true,
        }
    }
}

impl RegionalCapabilities {
    /// Whether every capability is enabled.
    pub fn all_enabled(&self) -> bool {
        self.drag && self.scroll_wheel_zoom && self.double_click_zoom && self.keyboard
    }

    /// Whether every capability is disabled.
    pub fn all_disabled(&self) -> bool {
        !self.drag && !self.scroll_wheel_zoom && !self.double_click_zoom && !self.keyboard
    }
}

/// Fake regional SDK namespace.
#[derive(Default)]
pub struct FakeRegionalSdk {
    inner: Mutex<RegionalSdkInner>,
}

#[derive(Default)]
struct RegionalSdkInner {
    containers: HashSet<String>,
    maps: Vec<Arc<FakeRegionalMap>>,
    markers: Vec<Arc<FakeRegionalMarker>>,
    labels: Vec<Arc<FakeRegionalLabel>>,
    info_windows: Vec<Arc<FakeRegionalInfoWindow>>,
    search_response: LocalSearchResponse,
    search_calls: Vec<(String, u32)>,
}

impl FakeRegionalSdk {
    /// Register a display surface so `create_map` can bind to it.
    pub fn register_container(&self, id: &str) {
        lock(&self.inner).containers.insert(id.to_string());
    }

    /// Configure the response returned by `local_search`.
    pub fn set_search_response(&self, response: LocalSearchResponse) {
        lock(&self.inner).search_response = response;
    }

    /// Maps constructed through this namespace.
    pub fn maps(&self) -> Vec<Arc<FakeRegionalMap>> {
        lock(&self.inner).maps.clone()
    }

    /// Markers constructed through this namespace.
    pub fn markers(&self) -> Vec<Arc<FakeRegionalMarker>> {
        lock(&self.inner).markers.clone()
    }

    /// Labels constructed through this namespace.
    pub fn labels(&self) -> Vec<Arc<FakeRegionalLabel>> {
        lock(&self.inner).labels.clone()
    }

    /// Info windows constructed through this namespace.
    pub fn info_windows(&self) -> Vec<Arc<FakeRegionalInfoWindow>> {
        lock(&self.inner).info_windows.clone()
    }

    /// Keyword/page-capacity pairs passed to `local_search`.
    pub fn search_calls(&self) -> Vec<(String, u32)> {
        lock(&self.inner).search_calls.clone()
    }
}

#[async_trait]
impl RegionalNamespace for FakeRegionalSdk {
    fn create_map(
        &self,
        container: &str,
        center: LngLat,
        zoom: u8,
    ) -> Result<Arc<dyn RegionalMapHandle>, SdkError> {
        let mut inner = lock(&self.inner);
        if !inner.containers.contains(container) {
            return Err(SdkError::ContainerNotFound(container.to_string()));
        }
        let map = Arc::new(FakeRegionalMap {
            container: container.to_string(),
            inner: Mutex::new(RegionalMapInner::new(center, zoom)),
        });
        inner.maps.push(map.clone());
        Ok(map)
    }

    fn create_marker(
        &self,
        position: LngLat,
        icon: Option<IconOptions>,
    ) -> Arc<dyn RegionalMarkerHandle> {
        let marker = Arc::new(FakeRegionalMarker {
            position,
            icon,
            listeners: Mutex::new(Vec::new()),
        });
        lock(&self.inner).markers.push(marker.clone());
        marker
    }

    fn create_label(&self, text: &str, position: LngLat) -> Arc<dyn RegionalLabelHandle> {
        let label = Arc::new(FakeRegionalLabel {
            text: text.to_string(),
            position,
        });
        lock(&self.inner).labels.push(label.clone());
        label
    }

    fn create_info_window(
        &self,
        content: &str,
        offset: (i32, i32),
    ) -> Arc<dyn RegionalInfoWindowHandle> {
        let window = Arc::new(FakeRegionalInfoWindow {
            content: content.to_string(),
            offset,
        });
        lock(&self.inner).info_windows.push(window.clone());
        window
    }

    async fn local_search(&self, keyword: &str, page_capacity: u32) -> LocalSearchResponse {
        let mut inner = lock(&self.inner);
        inner.search_calls.push((keyword.to_string(), page_capacity));
        inner.search_response.clone()
    }
}

/// Fake regional native map.
pub struct FakeRegionalMap {
    container: String,
    inner: Mutex<RegionalMapInner>,
}

struct RegionalMapInner {
    center: LngLat,
    zoom: u8,
    marker_overlays: Vec<Arc<dyn RegionalMarkerHandle>>,
    label_overlays: Vec<Arc<dyn RegionalLabelHandle>>,
    open_windows: Vec<(Arc<dyn RegionalInfoWindowHandle>, LngLat)>,
    marker_removal_calls: usize,
    label_removal_calls: usize,
    window_close_calls: usize,
    capabilities: RegionalCapabilities,
    disable_drag_calls: usize,
    enable_drag_calls: usize,
    listeners_cleared: bool,
    container_cleared: bool,
}

impl RegionalMapInner {
    fn new(center: LngLat, zoom: u8) -> Self {
        RegionalMapInner {
            center,
            zoom,
            marker_overlays: Vec::new(),
            label_overlays: Vec::new(),
            open_windows: Vec::new(),
            marker_removal_calls: 0,
            label_removal_calls: 0,
            window_close_calls: 0,
            capabilities: RegionalCapabilities::default(),
            disable_drag_calls: 0,
            enable_drag_calls: 0,
            listeners_cleared: false,
            container_cleared: false,
        }
    }
}

impl FakeRegionalMap {
    /// The container this map is bound to.
    pub fn container(&self) -> String {
        self.container.clone()
    }

    /// Current map center, in native (lng, lat) order.
    pub fn center(&self) -> LngLat {
        lock(&self.inner).center
    }

    /// Current zoom level.
    pub fn zoom(&self) -> u8 {
        lock(&self.inner).zoom
    }

    /// Number of attached marker overlays.
    pub fn marker_overlay_count(&self) -> usize {
        lock(&self.inner).marker_overlays.len()
    }

    /// Number of attached label overlays.
    pub fn label_overlay_count(&self) -> usize {
        lock(&self.inner).label_overlays.len()
    }

    /// Contents of currently open info windows.
    pub fn open_window_contents(&self) -> Vec<String> {
        lock(&self.inner)
            .open_windows
            .iter()
            .map(|(window, _)| window.content())
            .collect()
    }

    /// How many times a marker overlay removal was requested.
    pub fn marker_removal_calls(&self) -> usize {
        lock(&self.inner).marker_removal_calls
    }

    /// How many times a label overlay removal was requested.
    pub fn label_removal_calls(&self) -> usize {
        lock(&self.inner).label_removal_calls
    }

    /// How many times an info-window close was requested.
    pub fn window_close_calls(&self) -> usize {
        lock(&self.inner).window_close_calls
    }

    /// Current interaction capability flags.
    pub fn capabilities(&self) -> RegionalCapabilities {
        lock(&self.inner).capabilities
    }

    /// How many times dragging was disabled.
    pub fn disable_drag_calls(&self) -> usize {
        lock(&self.inner).disable_drag_calls
    }

    /// How many times dragging was enabled.
    pub fn enable_drag_calls(&self) -> usize {
        lock(&self.inner).enable_drag_calls
    }

    /// Whether map-level listeners were cleared.
    pub fn listeners_cleared(&self) -> bool {
        lock(&self.inner).listeners_cleared
    }

    /// Whether the container's rendered content was cleared.
    pub fn container_cleared(&self) -> bool {
        lock(&self.inner).container_cleared
    }
}

impl RegionalMapHandle for FakeRegionalMap {
    fn pan_to(&self, center: LngLat) {
        lock(&self.inner).center = center;
    }

    fn set_zoom(&self, zoom: u8) {
        lock(&self.inner).zoom = zoom;
    }

    fn add_marker_overlay(&self, marker: &Arc<dyn RegionalMarkerHandle>) {
        lock(&self.inner).marker_overlays.push(marker.clone());
    }

    fn remove_marker_overlay(&self, marker: &Arc<dyn RegionalMarkerHandle>) {
        let mut inner = lock(&self.inner);
        inner.marker_removal_calls += 1;
        inner.marker_overlays.retain(|m| !Arc::ptr_eq(m, marker));
    }

    fn add_label_overlay(&self, label: &Arc<dyn RegionalLabelHandle>) {
        lock(&self.inner).label_overlays.push(label.clone());
    }

    fn remove_label_overlay(&self, label: &Arc<dyn RegionalLabelHandle>) {
        let mut inner = lock(&self.inner);
        inner.label_removal_calls += 1;
        inner.label_overlays.retain(|l| !Arc::ptr_eq(l, label));
    }

    fn open_info_window(&self, window: &Arc<dyn RegionalInfoWindowHandle>, position: LngLat) {
        lock(&self.inner).open_windows.push((window.clone(), position));
    }

    fn close_info_window(&self, window: &Arc<dyn RegionalInfoWindowHandle>) {
        let mut inner = lock(&self.inner);
        inner.window_close_calls += 1;
        inner.open_windows.retain(|(w, _)| !Arc::ptr_eq(w, window));
    }

    fn enable_drag(&self) {
        let mut inner = lock(&self.inner);
        inner.capabilities.drag = true;
        inner.enable_drag_calls += 1;
    }

    fn disable_drag(&self) {
        let mut inner = lock(&self.inner);
        inner.capabilities.drag = false;
        inner.disable_drag_calls += 1;
    }

    fn enable_scroll_wheel_zoom(&self) {
        lock(&self.inner).capabilities.scroll_wheel_zoom = true;
    }

    fn disable_scroll_wheel_zoom(&self) {
        lock(&self.inner).capabilities.scroll_wheel_zoom = false;
    }

    fn enable_double_click_zoom(&self) {
        lock(&self.inner).capabilities.double_click_zoom = true;
    }

    fn disable_double_click_zoom(&self) {
        lock(&self.inner).capabilities.double_click_zoom = false;
    }

    fn enable_keyboard(&self) {
        lock(&self.inner).capabilities.keyboard = true;
    }

    fn disable_keyboard(&self) {
        lock(&self.inner).capabilities.keyboard = false;
    }

    fn clear_listeners(&self) {
        lock(&self.inner).listeners_cleared = true;
    }

    fn clear_container(&self) {
        lock(&self.inner).container_cleared = true;
    }
}

/// Fake regional native marker.
pub struct FakeRegionalMarker {
    position: LngLat,
    icon: Option<IconOptions>,
    listeners: Mutex<Vec<ClickListener>>,
}

impl FakeRegionalMarker {
    /// Marker position, in native (lng, lat) order.
    pub fn position(&self) -> LngLat {
        self.position
    }

    /// Custom icon options, if any.
    pub fn icon(&self) -> Option<IconOptions> {
        self.icon.clone()
    }

    /// Number of registered click listeners.
    pub fn listener_count(&self) -> usize {
        lock(&self.listeners).len()
    }

    /// Simulate a user click, firing every registered listener.
    pub fn click(&self) {
        for listener in lock(&self.listeners).iter() {
            listener();
        }
    }
}

impl RegionalMarkerHandle for FakeRegionalMarker {
    fn add_click_listener(&self, listener: ClickListener) {
        lock(&self.listeners).push(listener);
    }

    fn clear_click_listeners(&self) {
        lock(&self.listeners).clear();
    }
}

/// Fake regional label overlay.
pub struct FakeRegionalLabel {
    text: String,
    position: LngLat,
}

impl FakeRegionalLabel {
    /// Label position, in native (lng, lat) order.
    pub fn position(&self) -> LngLat {
        self.position
    }
}

impl RegionalLabelHandle for FakeRegionalLabel {
    fn text(&self) -> String {
        self.text.clone()
    }
}

/// Fake regional info window.
pub struct FakeRegionalInfoWindow {
    content: String,
    offset: (i32, i32),
}

impl FakeRegionalInfoWindow {
    /// Pixel offset from the anchor.
    pub fn offset(&self) -> (i32, i32) {
        self.offset
    }
}

impl RegionalInfoWindowHandle for FakeRegionalInfoWindow {
    fn content(&self) -> String {
        self.content.clone()
    }
}

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

/// Fake runtime wiring a gated script loader to fake namespaces.
///
/// Namespace access mirrors the real probe: it fails with
/// [`SdkError::NamespaceUnavailable`] until the provider's script has gone
/// through the loader.
pub struct FakeEnvironment {
    script: Arc<FakeScriptLoader>,
    loader: Arc<CachedLoader>,
    global: Arc<FakeGlobalSdk>,
    regional: Arc<FakeRegionalSdk>,
}

impl FakeEnvironment {
    /// Create an environment with empty fakes.
    pub fn new() -> Arc<Self> {
        let script = FakeScriptLoader::new();
        let loader = Arc::new(CachedLoader::new(script.clone() as Arc<dyn ScriptLoader>));
        Arc::new(FakeEnvironment {
            script,
            loader,
            global: Arc::new(FakeGlobalSdk::default()),
            regional: Arc::new(FakeRegionalSdk::default()),
        })
    }

    /// The inner fake script loader (configure failures, inspect calls).
    pub fn script(&self) -> &Arc<FakeScriptLoader> {
        &self.script
    }

    /// The fake global namespace.
    pub fn global_sdk(&self) -> &Arc<FakeGlobalSdk> {
        &self.global
    }

    /// The fake regional namespace.
    pub fn regional_sdk(&self) -> &Arc<FakeRegionalSdk> {
        &self.regional
    }
}

impl SdkEnvironment for FakeEnvironment {
    fn loader(&self) -> Arc<dyn ScriptLoader> {
        self.loader.clone()
    }

    fn global(&self) -> Result<Arc<dyn GlobalNamespace>, SdkError> {
        match self.loader.state(MapProvider::Global) {
            LoadState::Loaded => Ok(self.global.clone()),
            _ => Err(SdkError::NamespaceUnavailable(MapProvider::Global)),
        }
    }

    fn regional(&self) -> Result<Arc<dyn RegionalNamespace>, SdkError> {
        match self.loader.state(MapProvider::Regional) {
            LoadState::Loaded => Ok(self.regional.clone()),
            _ => Err(SdkError::NamespaceUnavailable(MapProvider::Regional)),
        }
    }
}
