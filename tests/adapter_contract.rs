//! Integration tests for the unified map contract.
//!
//! These tests verify the observable contract holds identically across both
//! provider variants:
//! - pre-init guards (sentinel returns, the search rejection)
//! - marker/label/info-window registry purging
//! - lock idempotence down to native toggle counts
//! - search failure absorption
//! - the custom-marker click round trip
//! - destroy teardown and idempotence

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use mapbridge::map::{
    create_map, LatLng, MapAdapter, MapError, MapOptions, MapProvider, MarkerOptions,
};
use mapbridge::sdk::fake::FakeEnvironment;
use mapbridge::sdk::global::{GeocodeResponse, GeocodeStatus};
use mapbridge::sdk::regional::LocalSearchResponse;

fn options() -> MapOptions {
    MapOptions {
        container: "map".to_string(),
        center: LatLng::new(39.9, 116.4),
        zoom: 10,
    }
}

async fn initialized(provider: MapProvider) -> (Arc<FakeEnvironment>, Box<dyn MapAdapter>) {
    let env = FakeEnvironment::new();
    env.global_sdk().register_container("map");
    env.regional_sdk().register_container("map");
    let mut map = create_map(provider, env.clone());
    map.init(options()).await.unwrap();
    (env, map)
}

mod uninitialized_guards {
    use super::*;

    #[tokio::test]
    async fn mutators_are_silent_noops() {
        for provider in MapProvider::all() {
            let env = FakeEnvironment::new();
            let mut map = create_map(*provider, env.clone());

            map.set_center(1.0, 2.0);
            map.set_zoom(5);
            map.lock_map();
            map.remove_marker("marker-1-1");
            map.destroy();
            assert!(!map.is_locked());
        }
    }

    #[tokio::test]
    async fn add_marker_returns_empty_id_and_creates_nothing() {
        let env = FakeEnvironment::new();

        let mut map = create_map(MapProvider::Global, env.clone());
        assert_eq!(map.add_marker(39.9, 116.4, Some("A"), None), "");
        assert!(env.global_sdk().maps().is_empty());

        let mut map = create_map(MapProvider::Regional, env.clone());
        assert_eq!(
            map.add_custom_marker(MarkerOptions {
                position: LatLng::new(39.9, 116.4),
                title: Some("A".to_string()),
                content: Some("hello".to_string()),
                ..Default::default()
            }),
            ""
        );
        assert!(env.regional_sdk().markers().is_empty());
        assert!(env.regional_sdk().labels().is_empty());
        assert!(env.regional_sdk().info_windows().is_empty());
    }

    #[tokio::test]
    async fn search_rejects_before_init() {
        for provider in MapProvider::all() {
            let env = FakeEnvironment::new();
            let map = create_map(*provider, env);
            let err = map.search_address("anywhere").await.unwrap_err();
            assert_eq!(err, MapError::NotInitialized);
        }
    }
}

mod center_and_zoom {
    use super::*;

    #[tokio::test]
    async fn global_set_center_lands_in_caller_order() {
        let (env, mut map) = initialized(MapProvider::Global).await;
        map.set_center(31.23, 121.47);
        map.set_zoom(14);

        let native = &env.global_sdk().maps()[0];
        assert_eq!(native.center(), LatLng::new(31.23, 121.47));
        assert_eq!(native.zoom(), 14);
    }

    #[tokio::test]
    async fn regional_set_center_is_reordered_for_native() {
        let (env, mut map) = initialized(MapProvider::Regional).await;
        map.set_center(31.23, 121.47);

        let native = &env.regional_sdk().maps()[0];
        assert_eq!(native.center().lng, 121.47);
        assert_eq!(native.center().lat, 31.23);
    }
}

mod marker_registries {
    use super::*;

    #[tokio::test]
    async fn global_add_then_remove_releases_everything() {
        let (env, mut map) = initialized(MapProvider::Global).await;
        let id = map.add_custom_marker(MarkerOptions {
            position: LatLng::new(39.91, 116.41),
            title: Some("A".to_string()),
            content: Some("hello".to_string()),
            ..Default::default()
        });
        assert!(!id.is_empty());

        map.remove_marker(&id);

        let marker = &env.global_sdk().maps()[0].markers()[0];
        assert!(!marker.is_attached());
        assert_eq!(marker.detach_count(), 1);
        let window = &env.global_sdk().info_windows()[0];
        assert_eq!(window.close_count(), 1);

        // Registries were purged: destroy finds nothing left to release.
        map.destroy();
        assert_eq!(marker.detach_count(), 1);
        assert_eq!(window.close_count(), 1);
    }

    #[tokio::test]
    async fn regional_add_then_remove_releases_everything() {
        let (env, mut map) = initialized(MapProvider::Regional).await;
        let id = map.add_custom_marker(MarkerOptions {
            position: LatLng::new(39.91, 116.41),
            title: Some("A".to_string()),
            content: Some("hello".to_string()),
            ..Default::default()
        });

        let native = &env.regional_sdk().maps()[0];
        assert_eq!(native.marker_overlay_count(), 1);
        assert_eq!(native.label_overlay_count(), 1);

        map.remove_marker(&id);
        assert_eq!(native.marker_overlay_count(), 0);
        assert_eq!(native.label_overlay_count(), 0);
        assert_eq!(native.marker_removal_calls(), 1);
        assert_eq!(native.label_removal_calls(), 1);
        assert_eq!(native.window_close_calls(), 1);

        // Registries were purged: destroy issues no further removals.
        map.destroy();
        assert_eq!(native.marker_removal_calls(), 1);
        assert_eq!(native.label_removal_calls(), 1);
        assert_eq!(native.window_close_calls(), 1);
    }

    #[tokio::test]
    async fn removing_unknown_id_is_tolerated() {
        for provider in MapProvider::all() {
            let (_env, mut map) = initialized(*provider).await;
            map.add_marker(39.9, 116.4, None, None);
            map.remove_marker("marker-0-999");
        }
    }

    #[tokio::test]
    async fn marker_ids_are_unique_per_instance() {
        let (_env, mut map) = initialized(MapProvider::Regional).await;
        let a = map.add_marker(1.0, 2.0, None, None);
        let b = map.add_marker(1.0, 2.0, None, None);
        let c = map.add_marker(1.0, 2.0, None, None);
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
    }
}

mod locking {
    use super::*;

    #[tokio::test]
    async fn global_lock_is_idempotent_down_to_native_toggles() {
        let (env, mut map) = initialized(MapProvider::Global).await;
        let native = &env.global_sdk().maps()[0];
        assert!(native.ui_options().draggable);

        map.lock_map();
        map.lock_map();
        assert!(map.is_locked());
        assert!(!native.ui_options().draggable);
        assert!(native.ui_options().disable_double_click_zoom);
        // One transition, one native assignment.
        assert_eq!(native.ui_set_count(), 1);

        map.unlock_map();
        map.unlock_map();
        assert!(!map.is_locked());
        assert!(native.ui_options().draggable);
        assert_eq!(native.ui_set_count(), 2);
    }

    #[tokio::test]
    async fn regional_lock_toggles_each_capability_once() {
        let (env, mut map) = initialized(MapProvider::Regional).await;
        let native = &env.regional_sdk().maps()[0];
        assert!(native.capabilities().all_enabled());

        map.lock_map();
        map.lock_map();
        assert!(map.is_locked());
        assert!(native.capabilities().all_disabled());
        assert_eq!(native.disable_drag_calls(), 1);

        map.unlock_map();
        map.unlock_map();
        assert!(!map.is_locked());
        assert!(native.capabilities().all_enabled());
        assert_eq!(native.enable_drag_calls(), 1);
    }
}

mod search {
    use super::*;

    #[tokio::test]
    async fn global_failure_status_resolves_empty() {
        let (env, map) = initialized(MapProvider::Global).await;
        env.global_sdk().set_geocode_response(GeocodeResponse {
            status: GeocodeStatus::Error,
            results: Vec::new(),
        });
        assert_eq!(map.search_address("anywhere").await.unwrap(), Vec::new());
    }

    #[tokio::test]
    async fn regional_missing_poi_accessor_resolves_empty() {
        let (env, map) = initialized(MapProvider::Regional).await;
        env.regional_sdk()
            .set_search_response(LocalSearchResponse { pois: None });
        assert_eq!(map.search_address("anywhere").await.unwrap(), Vec::new());
    }
}

mod click_round_trip {
    use super::*;
    use mapbridge::sdk::global::GlobalInfoWindowHandle;

    #[tokio::test]
    async fn regional_custom_marker_click_opens_window_and_fires_callback() {
        let (env, mut map) = initialized(MapProvider::Regional).await;

        let clicked_ids = Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = clicked_ids.clone();
        let id = map.add_custom_marker(MarkerOptions {
            position: LatLng::new(39.91, 116.41),
            title: Some("A".to_string()),
            content: Some("hello".to_string()),
            on_click: Some(Arc::new(move |marker_id| {
                sink.lock().unwrap().push(marker_id.to_string());
            })),
            ..Default::default()
        });
        assert!(!id.is_empty());

        env.regional_sdk().markers()[0].click();

        let native = &env.regional_sdk().maps()[0];
        assert_eq!(native.open_window_contents(), vec!["hello".to_string()]);
        assert_eq!(*clicked_ids.lock().unwrap(), vec![id]);
    }

    #[tokio::test]
    async fn global_custom_marker_click_opens_window_and_fires_callback() {
        let (env, mut map) = initialized(MapProvider::Global).await;

        let clicks = Arc::new(AtomicUsize::new(0));
        let counter = clicks.clone();
        map.add_custom_marker(MarkerOptions {
            position: LatLng::new(39.91, 116.41),
            content: Some("hello".to_string()),
            on_click: Some(Arc::new(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            })),
            ..Default::default()
        });

        env.global_sdk().maps()[0].markers()[0].click();

        let window = &env.global_sdk().info_windows()[0];
        assert!(window.is_open());
        assert_eq!(window.content(), "hello");
        assert_eq!(clicks.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn content_without_callback_still_opens_window() {
        let (env, mut map) = initialized(MapProvider::Global).await;
        map.add_custom_marker(MarkerOptions {
            position: LatLng::new(39.91, 116.41),
            content: Some("info only".to_string()),
            ..Default::default()
        });

        env.global_sdk().maps()[0].markers()[0].click();
        assert!(env.global_sdk().info_windows()[0].is_open());
    }
}

mod teardown {
    use super::*;

    #[tokio::test]
    async fn destroy_is_idempotent_and_resets_guards() {
        for provider in MapProvider::all() {
            let (_env, mut map) = initialized(*provider).await;
            map.add_marker(39.9, 116.4, Some("A"), None);

            map.destroy();
            map.destroy();

            // Post-destroy calls fall into the uninitialized guards.
            assert_eq!(map.add_marker(1.0, 2.0, None, None), "");
            assert_eq!(
                map.search_address("anywhere").await.unwrap_err(),
                MapError::NotInitialized
            );
        }
    }

    #[tokio::test]
    async fn reinit_after_failed_init_succeeds() {
        let env = FakeEnvironment::new();
        env.global_sdk().register_container("map");
        env.script().fail_with(MapProvider::Global, "offline");

        let mut map = create_map(MapProvider::Global, env.clone());
        assert!(map.init(options()).await.is_err());

        // The caller retries with the failure cleared; the loader state
        // machine starts a fresh attempt.
        env.script().clear_failure(MapProvider::Global);
        let mut map = create_map(MapProvider::Global, env.clone());
        map.init(options()).await.unwrap();
        assert_eq!(env.script().load_count(MapProvider::Global), 2);
    }
}
