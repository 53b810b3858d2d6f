//! Error taxonomy of the dashboard core

use crate::kv::StoreError;
use thiserror::Error;

/// Failures surfaced by repositories.
///
/// Nothing retries: every failure is reported once and the caller decides how
/// to inform the user.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// The key-value backend could not be reached or rejected the request
    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[from] StoreError),

    /// No task with this id exists in the category; nothing was persisted
    #[error("task {task_id} not found in category '{category}'")]
    NotFound { category: String, task_id: u32 },

    /// The category string does not name a known category
    #[error("unknown category '{0}'")]
    UnknownCategory(String),

    /// A stored document does not have the expected shape
    #[error("malformed document at '{key}': {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl TrackerError {
    /// Whether the failure came from the storage backend
    pub fn is_storage(&self) -> bool {
        matches!(self, TrackerError::StorageUnavailable(_))
    }
}
