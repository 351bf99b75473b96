//! Shared registry snapshots.
//!
//! Configuration replaces the registry as a whole; scheduling passes take an
//! `Arc` snapshot at the start of the pass and keep it until the pass ends.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

use crate::registry::ExclusiveRegistry;

/// Holder for the current exclusive registry.
#[derive(Debug, Clone)]
pub struct SharedRegistry {
    tx: Arc<watch::Sender<Arc<ExclusiveRegistry>>>,
}

impl SharedRegistry {
    pub fn new(registry: ExclusiveRegistry) -> Self {
        let (tx, _rx) = watch::channel(Arc::new(registry));
        Self { tx: Arc::new(tx) }
    }

    /// The registry as of now. Later replacements do not affect it.
    pub fn snapshot(&self) -> Arc<ExclusiveRegistry> {
        self.tx.borrow().clone()
    }

    /// Replaces the whole registry, returning the previous one.
    pub fn replace(&self, registry: ExclusiveRegistry) -> Arc<ExclusiveRegistry> {
        info!(
            labels = registry.len(),
            config = registry.config_string().unwrap_or(""),
            "Replacing exclusive label registry"
        );
        self.tx.send_replace(Arc::new(registry))
    }

    /// Replaces the registry from a configuration string.
    pub fn replace_from_config(&self, source: Option<&str>) -> Arc<ExclusiveRegistry> {
        self.replace(ExclusiveRegistry::from_config(source))
    }

    /// Receiver notified on every replacement.
    pub fn subscribe(&self) -> watch::Receiver<Arc<ExclusiveRegistry>> {
        self.tx.subscribe()
    }
}

impl Default for SharedRegistry {
    fn default() -> Self {
        Self::new(ExclusiveRegistry::empty())
    }
}
