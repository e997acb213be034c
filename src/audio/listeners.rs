//! Scoped progress listeners.
//!
//! The UI subscribes to a source's progress notifications by holding a
//! `Subscription`. Dropping it removes the listener; the audio thread checks
//! the shared registry before emitting progress for a source.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::types::SourceId;

#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    active: Arc<Mutex<HashMap<SourceId, usize>>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for `source`. It stays registered until the
    /// returned guard is dropped.
    pub fn subscribe(&self, source: SourceId) -> Subscription {
        if let Ok(mut active) = self.active.lock() {
            *active.entry(source).or_insert(0) += 1;
        }
        tracing::trace!(source, "progress listener added");
        Subscription {
            source,
            registry: self.clone(),
        }
    }

    pub fn is_subscribed(&self, source: SourceId) -> bool {
        self.active
            .lock()
            .map(|active| active.contains_key(&source))
            .unwrap_or(false)
    }

    /// Number of sources that currently have at least one listener.
    pub fn active_sources(&self) -> usize {
        self.active.lock().map(|active| active.len()).unwrap_or(0)
    }

    fn unsubscribe(&self, source: SourceId) {
        if let Ok(mut active) = self.active.lock() {
            if let Some(count) = active.get_mut(&source) {
                *count -= 1;
                if *count == 0 {
                    active.remove(&source);
                }
            }
        }
        tracing::trace!(source, "progress listener removed");
    }
}

/// RAII registration for one source's progress notifications.
#[derive(Debug)]
pub struct Subscription {
    source: SourceId,
    registry: ListenerRegistry,
}

impl Subscription {
    pub fn source(&self) -> SourceId {
        self.source
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.registry.unsubscribe(self.source);
    }
}
