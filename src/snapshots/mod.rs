//! Score and integration snapshots
//!
//! Both documents are seeded on first access and have no mutation path in
//! this service; external jobs may overwrite them in the store.

mod models;
mod repository;

pub use models::{IntegrationStatus, SeoScore};
pub use repository::SnapshotRepository;
