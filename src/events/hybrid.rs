//! Hybrid event emitter: local broadcast + optional revalidation notifier
//!
//! When no revalidation URL is configured the emitter works in local-only
//! mode: no HTTP client, no outbound requests.

use super::bus::EventBus;
use super::notifier::RevalidationNotifier;
use super::types::{ChangeEvent, EventEmitter};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Fans ChangeEvents out to the local broadcast bus and, if configured, to an
/// external revalidation endpoint.
///
/// Implements `EventEmitter` so it can be injected as `Arc<dyn EventEmitter>`
/// into the repositories.
#[derive(Clone)]
pub struct HybridEmitter {
    local_bus: Arc<EventBus>,
    notifier: Option<Arc<RevalidationNotifier>>,
}

impl HybridEmitter {
    /// Local-only emitter
    pub fn new(local_bus: Arc<EventBus>) -> Self {
        Self {
            local_bus,
            notifier: None,
        }
    }

    /// Emitter that also notifies an external revalidation endpoint
    pub fn with_notifier(local_bus: Arc<EventBus>, notifier: Arc<RevalidationNotifier>) -> Self {
        Self {
            local_bus,
            notifier: Some(notifier),
        }
    }

    /// Subscribe to the local broadcast channel (WebSocket handlers)
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.local_bus.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.local_bus.subscriber_count()
    }

    pub fn has_notifier(&self) -> bool {
        self.notifier.is_some()
    }

    /// Wait for pending revalidation requests; a no-op in local-only mode
    pub async fn flush(&self) {
        if let Some(notifier) = &self.notifier {
            notifier.flush().await;
        }
    }
}

impl EventEmitter for HybridEmitter {
    fn emit(&self, event: ChangeEvent) {
        if let Some(notifier) = &self.notifier {
            notifier.emit(event.clone());
        }
        self.local_bus.emit(event);
    }
}
