//! Capped, most-recent-first activity log
//!
//! The whole log is one JSON array under a single key. Appending reads the
//! array, prepends, truncates and writes it back in one `set`; concurrent
//! appends are last-writer-wins like every other document.

use super::models::ActivityEntry;
use crate::error::TrackerError;
use crate::kv::{document, load_or_seed, KvStore};
use std::sync::Arc;
use tracing::warn;

/// Maximum number of entries kept
pub const ACTIVITY_LOG_CAPACITY: usize = 20;

pub struct ActivityLog {
    kv: Arc<dyn KvStore>,
    key: String,
}

impl ActivityLog {
    pub fn new(kv: Arc<dyn KvStore>, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }

    /// Storage key of the log
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Strict read: seeds `[]` if absent, propagates every failure
    pub async fn load(&self) -> Result<Vec<ActivityEntry>, TrackerError> {
        Ok(load_or_seed(self.kv.as_ref(), &self.key, Vec::new).await?.document)
    }

    /// Write `[]` if the log is absent; returns whether this call wrote it
    pub async fn ensure_seeded(&self) -> Result<bool, TrackerError> {
        Ok(load_or_seed::<Vec<ActivityEntry>, _>(self.kv.as_ref(), &self.key, Vec::new)
            .await?
            .seeded)
    }

    /// Entries, most recent first.
    ///
    /// Storage failures fall back to an empty log.
    pub async fn read(&self) -> Result<Vec<ActivityEntry>, TrackerError> {
        match self.load().await {
            Err(e) if e.is_storage() => {
                warn!(key = %self.key, error = %e, "Activity log unavailable, returning empty log");
                Ok(Vec::new())
            }
            other => other,
        }
    }

    /// Prepend `entry` and keep the newest `ACTIVITY_LOG_CAPACITY` entries.
    ///
    /// Returns the log as written.
    pub async fn append(&self, entry: ActivityEntry) -> Result<Vec<ActivityEntry>, TrackerError> {
        let mut entries = self.load().await?;
        entries.insert(0, entry);
        entries.truncate(ACTIVITY_LOG_CAPACITY);
        document::store(self.kv.as_ref(), &self.key, &entries).await?;
        Ok(entries)
    }
}
