//! Mapbridge - a unified facade over interactive map provider SDKs
//!
//! Mapbridge puts two third-party map SDKs — a global provider and a regional
//! Chinese provider — behind one polymorphic contract, so an application can
//! swap providers without touching its call sites. The crate owns the adapter
//! layer that normalizes the providers' divergent object models (markers,
//! labels, info windows, geocoding results, interaction locking) into a single
//! trait; the SDKs themselves are consumed as opaque capabilities.
//!
//! # Architecture
//!
//! The codebase follows a strict layered architecture:
//!
//! - [`map`] - Unified contract, the two provider adapters, and the factory
//! - [`sdk`] - Native SDK capability traits and the in-memory fakes
//! - [`loader`] - Idempotent script-loading state machine
//! - [`config`] - Process-wide API key configuration
//!
//! # Correctness Invariants
//!
//! Mapbridge maintains the following invariants:
//!
//! 1. Callers always speak (lat, lng); adapters own any native reordering
//! 2. Marker ids are unique for the lifetime of their adapter instance
//! 3. Lock transitions touch native capabilities exactly once per transition
//! 4. `destroy` releases every native object an adapter registered; nothing
//!    outlives it
//!
//! # Example
//!
//! ```
//! use mapbridge::map::{create_map, LatLng, MapOptions, MapProvider};
//! use mapbridge::sdk::fake::FakeEnvironment;
//!
//! # tokio_test::block_on(async {
//! let env = FakeEnvironment::new();
//! env.regional_sdk().register_container("map");
//!
//! let mut map = create_map(MapProvider::Regional, env.clone());
//! map.init(MapOptions {
//!     container: "map".to_string(),
//!     center: LatLng::new(39.9, 116.4),
//!     zoom: 10,
//! })
//! .await
//! .unwrap();
//!
//! let id = map.add_marker(39.91, 116.41, Some("A"), None);
//! assert!(id.starts_with("marker-"));
//! # });
//! ```

pub mod config;
pub mod loader;
pub mod map;
pub mod sdk;
