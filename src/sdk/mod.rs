//! sdk
//!
//! Native SDK surfaces, consumed as opaque capabilities.
//!
//! # Design
//!
//! Adapters never see SDK internals: each provider's namespace and object
//! model is a set of traits shaped after the capabilities the adapters
//! actually target (map construction, marker/label/info-window placement,
//! geocoding, interaction toggles). A host environment implements these for
//! its runtime; [`fake`] ships deterministic in-memory implementations for
//! tests.
//!
//! Handles are `Arc<dyn ...>` with `&self` methods: native map objects are
//! shared, interior-mutable things, and the same handle may be held by an
//! adapter registry and captured by a click listener at once.
//!
//! # Modules
//!
//! - [`global`]: global-provider capability traits
//! - [`regional`]: regional-provider capability traits
//! - [`fake`]: in-memory fakes for deterministic testing

pub mod fake;
pub mod global;
pub mod regional;

use std::sync::Arc;

use thiserror::Error;

use crate::loader::ScriptLoader;
use crate::map::MapProvider;
use global::GlobalNamespace;
use regional::RegionalNamespace;

/// Errors from native SDK capability access.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SdkError {
    /// The provider's namespace is not present in the environment (its
    /// script has not been loaded).
    #[error("{0} SDK namespace is not available")]
    NamespaceUnavailable(MapProvider),

    /// The display surface to bind a map to does not exist.
    #[error("container element not found: {0}")]
    ContainerNotFound(String),
}

/// Listener attached to a native marker's click event.
pub type ClickListener = Box<dyn Fn() + Send + Sync>;

/// Access to the runtime the SDKs live in.
///
/// Namespace accessors mirror the "is the provider's global object present"
/// probe: they error with [`SdkError::NamespaceUnavailable`] until the
/// corresponding script has been loaded through the environment's loader.
pub trait SdkEnvironment: Send + Sync {
    /// The environment's script loader.
    fn loader(&self) -> Arc<dyn ScriptLoader>;

    /// The global provider's namespace, once its script is loaded.
    fn global(&self) -> Result<Arc<dyn GlobalNamespace>, SdkError>;

    /// The regional provider's namespace, once its script is loaded.
    fn regional(&self) -> Result<Arc<dyn RegionalNamespace>, SdkError>;
}
