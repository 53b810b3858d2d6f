//! Key-value storage boundary and document helpers

pub mod document;
pub mod memory;
pub mod rest;
pub mod traits;

pub use document::{load_or_seed, DocumentKeys, Loaded};
pub use memory::MemoryKvStore;
pub use rest::RestKvClient;
pub use traits::{KvStore, StoreError};

#[cfg(test)]
pub(crate) mod mock;
