//! map
//!
//! Unified map contract, provider adapters, and the factory.
//!
//! # Architecture
//!
//! The [`MapAdapter`] trait defines the interface callers program against.
//! Callers use the [`create_map`] factory function rather than importing
//! specific adapter implementations directly; provider-specific types never
//! cross the contract boundary.
//!
//! # Modules
//!
//! - `traits`: Core `MapAdapter` trait, error taxonomy, and value types
//! - [`global`]: Adapter for the global provider
//! - [`regional`]: Adapter for the regional Chinese provider
//! - [`poi`]: Coordinate-shape normalization for regional search payloads
//! - `factory`: Provider selection and adapter creation

mod factory;
pub mod global;
pub mod poi;
pub mod regional;
mod traits;

pub use factory::{create_map, create_map_from_tag, MapProvider};
pub use traits::*;

/// Generate a marker id unique for the lifetime of one adapter instance.
///
/// Wall-clock millis plus a per-instance monotonic counter: the timestamp
/// alone can repeat within one tick, the counter cannot.
pub(crate) fn next_marker_id(seq: &mut u64) -> String {
    *seq += 1;
    format!("marker-{}-{}", chrono::Utc::now().timestamp_millis(), seq)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_ids_are_unique_within_one_tick() {
        let mut seq = 0;
        let a = next_marker_id(&mut seq);
        let b = next_marker_id(&mut seq);
        assert_ne!(a, b);
        assert!(a.starts_with("marker-"));
        assert!(b.ends_with("-2"));
    }
}
