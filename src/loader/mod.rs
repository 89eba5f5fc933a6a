//! loader
//!
//! Idempotent acquisition of provider script assets.
//!
//! # Design
//!
//! The actual script injection is an external collaborator behind the
//! [`ScriptLoader`] trait: a host environment implements it for its runtime
//! (injecting a script element, spawning a download, whatever fits).
//!
//! [`CachedLoader`] wraps any inner loader with an explicit per-provider
//! state machine — `NotLoaded -> Loading -> Loaded | Failed` — so that:
//!
//! - a loaded provider resolves immediately without touching the inner
//!   loader again (the "namespace already populated" probe),
//! - at most one load per provider is in flight; concurrent callers share
//!   the in-flight attempt's outcome through a cached completion signal,
//! - a failed attempt is retryable: `init` failures tell the caller to
//!   re-invoke, so the next `load` after `Failed` starts a fresh attempt.
//!
//! # Example
//!
//! ```ignore
//! use mapbridge::loader::{CachedLoader, ScriptLoader};
//! use mapbridge::map::MapProvider;
//!
//! let loader = CachedLoader::new(host_loader);
//! loader.load(MapProvider::Global).await?;
//! // Second call resolves immediately from the Loaded state.
//! loader.load(MapProvider::Global).await?;
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::watch;
use tracing::debug;

use crate::map::MapProvider;

/// A provider script failed to load.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("failed to load {provider} map script: {reason}")]
pub struct LoadError {
    /// Provider whose script failed
    pub provider: MapProvider,
    /// Human-readable failure reason
    pub reason: String,
}

/// External collaborator that loads a provider's script asset into the
/// global environment.
///
/// Implementations resolve once the script is available and reject with a
/// descriptive error on network or script failure. They need not be
/// idempotent themselves: wrap them in [`CachedLoader`].
#[async_trait]
pub trait ScriptLoader: Send + Sync {
    /// Load the given provider's script.
    async fn load(&self, provider: MapProvider) -> Result<(), LoadError>;
}

/// Observable per-provider load state.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    /// No load has been attempted
    NotLoaded,
    /// A load is in flight
    Loading,
    /// The script is available
    Loaded,
    /// The last attempt failed; the next `load` retries
    Failed(LoadError),
}

/// Completion signal shared by callers of one in-flight attempt.
type Completion = watch::Receiver<Option<Result<(), LoadError>>>;

enum Slot {
    Loading(Completion),
    Loaded,
    Failed(LoadError),
}

/// Decision taken under the state lock.
enum Action {
    AlreadyLoaded,
    Wait(Completion),
    Run(watch::Sender<Option<Result<(), LoadError>>>),
}

/// Caching wrapper enforcing the single-in-flight-load state machine.
///
/// Cheap to share: clone the `Arc` it is usually held in. All state lives
/// behind a mutex with short critical sections; the inner load itself runs
/// outside the lock.
pub struct CachedLoader {
    inner: Arc<dyn ScriptLoader>,
    slots: Mutex<HashMap<MapProvider, Slot>>,
}

impl CachedLoader {
    /// Wrap an inner loader.
    pub fn new(inner: Arc<dyn ScriptLoader>) -> Self {
        CachedLoader {
            inner,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Current state for a provider.
    pub fn state(&self, provider: MapProvider) -> LoadState {
        let slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        match slots.get(&provider) {
            None => LoadState::NotLoaded,
            Some(Slot::Loading(_)) => LoadState::Loading,
            Some(Slot::Loaded) => LoadState::Loaded,
            Some(Slot::Failed(err)) => LoadState::Failed(err.clone()),
        }
    }

    fn decide(&self, provider: MapProvider) -> Action {
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        match slots.get(&provider) {
            Some(Slot::Loaded) => Action::AlreadyLoaded,
            Some(Slot::Loading(rx)) => Action::Wait(rx.clone()),
            Some(Slot::Failed(_)) | None => {
                let (tx, rx) = watch::channel(None);
                slots.insert(provider, Slot::Loading(rx));
                Action::Run(tx)
            }
        }
    }

    fn record(&self, provider: MapProvider, result: &Result<(), LoadError>) {
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        let slot = match result {
            Ok(()) => Slot::Loaded,
            Err(err) => Slot::Failed(err.clone()),
        };
        slots.insert(provider, slot);
    }

    async fn wait(provider: MapProvider, mut rx: Completion) -> Result<(), LoadError> {
        loop {
            if let Some(result) = rx.borrow_and_update().clone() {
                return result;
            }
            if rx.changed().await.is_err() {
                return Err(LoadError {
                    provider,
                    reason: "script load was interrupted".to_string(),
                });
            }
        }
    }
}

#[async_trait]
impl ScriptLoader for CachedLoader {
    async fn load(&self, provider: MapProvider) -> Result<(), LoadError> {
        match self.decide(provider) {
            Action::AlreadyLoaded => Ok(()),
            Action::Wait(rx) => Self::wait(provider, rx).await,
            Action::Run(tx) => {
                debug!(provider = %provider, "loading map provider script");
                let result = self.inner.load(provider).await;
                self.record(provider, &result);
                match &result {
                    Ok(()) => debug!(provider = %provider, "map provider script loaded"),
                    Err(err) => debug!(provider = %provider, error = %err, "map provider script load failed"),
                }
                // Wake any callers that joined this attempt.
                let _ = tx.send(Some(result.clone()));
                result
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::fake::FakeScriptLoader;

    fn cached(script: &Arc<FakeScriptLoader>) -> CachedLoader {
        CachedLoader::new(script.clone())
    }

    #[tokio::test]
    async fn starts_not_loaded() {
        let loader = cached(&FakeScriptLoader::new());
        assert_eq!(loader.state(MapProvider::Global), LoadState::NotLoaded);
    }

    #[tokio::test]
    async fn load_reaches_loaded_state() {
        let script = FakeScriptLoader::new();
        let loader = cached(&script);

        loader.load(MapProvider::Global).await.unwrap();
        assert_eq!(loader.state(MapProvider::Global), LoadState::Loaded);
        assert_eq!(script.load_count(MapProvider::Global), 1);
    }

    #[tokio::test]
    async fn loaded_provider_skips_inner_loader() {
        let script = FakeScriptLoader::new();
        let loader = cached(&script);

        loader.load(MapProvider::Regional).await.unwrap();
        loader.load(MapProvider::Regional).await.unwrap();
        assert_eq!(script.load_count(MapProvider::Regional), 1);
    }

    #[tokio::test]
    async fn providers_are_tracked_independently() {
        let script = FakeScriptLoader::new();
        let loader = cached(&script);

        loader.load(MapProvider::Global).await.unwrap();
        assert_eq!(loader.state(MapProvider::Global), LoadState::Loaded);
        assert_eq!(loader.state(MapProvider::Regional), LoadState::NotLoaded);
    }

    #[tokio::test]
    async fn failure_is_recorded_and_retryable() {
        let script = FakeScriptLoader::new();
        script.fail_with(MapProvider::Global, "dns error");
        let loader = cached(&script);

        let err = loader.load(MapProvider::Global).await.unwrap_err();
        assert_eq!(err.reason, "dns error");
        assert_eq!(
            loader.state(MapProvider::Global),
            LoadState::Failed(LoadError {
                provider: MapProvider::Global,
                reason: "dns error".into()
            })
        );

        // A later attempt starts fresh and can succeed.
        script.clear_failure(MapProvider::Global);
        loader.load(MapProvider::Global).await.unwrap();
        assert_eq!(loader.state(MapProvider::Global), LoadState::Loaded);
        assert_eq!(script.load_count(MapProvider::Global), 2);
    }

    #[tokio::test]
    async fn concurrent_callers_share_one_inflight_load() {
        let script = FakeScriptLoader::new();
        let gate = script.gate();
        let loader = Arc::new(cached(&script));

        let a = tokio::spawn({
            let loader = loader.clone();
            async move { loader.load(MapProvider::Global).await }
        });
        let b = tokio::spawn({
            let loader = loader.clone();
            async move { loader.load(MapProvider::Global).await }
        });

        // Let both tasks reach the loader before releasing the gate.
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        gate.add_permits(1);

        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();
        assert_eq!(script.load_count(MapProvider::Global), 1);
        assert_eq!(loader.state(MapProvider::Global), LoadState::Loaded);
    }
}
