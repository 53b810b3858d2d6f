//! Change notification for stored documents
//!
//! This module provides:
//! - `ChangeEvent`: typed events emitted after every seed or mutation
//! - `EventBus`: broadcast channel for distributing events to WebSocket clients
//! - `RevalidationNotifier`: HTTP notifier telling a rendering layer to refresh its views
//! - `HybridEmitter`: combines local broadcast + optional notifier

mod bus;
mod hybrid;
mod notifier;
mod types;

pub use bus::EventBus;
pub use hybrid::HybridEmitter;
pub use notifier::RevalidationNotifier;
pub use types::{ChangeAction, ChangeEvent, DocumentKind, EventEmitter};
