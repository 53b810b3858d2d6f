//! Dashboard service object
//!
//! Bundles the store handle with the repositories of one profile. Built once
//! at startup and shared behind an `Arc`; nothing in the crate reaches for a
//! global client.

use crate::activity::ActivityLog;
use crate::catalog::{CatalogProfile, TaskRepository};
use crate::error::TrackerError;
use crate::events::EventEmitter;
use crate::kv::{DocumentKeys, KvStore};
use crate::snapshots::SnapshotRepository;
use std::sync::Arc;
use tracing::{debug, info};

pub struct Dashboard {
    kv: Arc<dyn KvStore>,
    profile: CatalogProfile,
    keys: DocumentKeys,
    tasks: TaskRepository,
    activity: Arc<ActivityLog>,
    snapshots: SnapshotRepository,
}

impl Dashboard {
    pub fn new(kv: Arc<dyn KvStore>, profile: CatalogProfile, keys: DocumentKeys) -> Self {
        let activity = Arc::new(ActivityLog::new(kv.clone(), keys.activity.clone()));
        let tasks = TaskRepository::new(kv.clone(), profile, keys.tasks.clone(), activity.clone());
        let snapshots =
            SnapshotRepository::new(kv.clone(), keys.score.clone(), keys.integrations.clone());

        Self {
            kv,
            profile,
            keys,
            tasks,
            activity,
            snapshots,
        }
    }

    /// Dashboard using the profile's default key namespace
    pub fn for_profile(kv: Arc<dyn KvStore>, profile: CatalogProfile) -> Self {
        Self::new(kv, profile, DocumentKeys::for_profile(profile))
    }

    /// Attach an event emitter to every repository (builder pattern)
    pub fn with_event_emitter(mut self, emitter: Arc<dyn EventEmitter>) -> Self {
        self.tasks = self.tasks.with_event_emitter(emitter.clone());
        self.snapshots = self.snapshots.with_event_emitter(emitter);
        self
    }

    pub fn profile(&self) -> CatalogProfile {
        self.profile
    }

    pub fn keys(&self) -> &DocumentKeys {
        &self.keys
    }

    pub fn tasks(&self) -> &TaskRepository {
        &self.tasks
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    pub fn snapshots(&self) -> &SnapshotRepository {
        &self.snapshots
    }

    /// Write the default of every document that is not stored yet.
    ///
    /// Returns the keys this call wrote. Strict: the first storage failure
    /// aborts.
    pub async fn seed_all(&self) -> Result<Vec<String>, TrackerError> {
        let outcomes = [
            (&self.keys.tasks, self.tasks.ensure_seeded().await?),
            (&self.keys.activity, self.activity.ensure_seeded().await?),
            (&self.keys.score, self.snapshots.load_score().await?.seeded),
            (&self.keys.integrations, self.snapshots.load_integrations().await?.seeded),
        ];
        let written: Vec<String> = outcomes
            .into_iter()
            .filter(|(_, seeded)| *seeded)
            .map(|(key, _)| key.clone())
            .collect();

        info!(profile = %self.profile, written = written.len(), "Dashboard documents seeded");
        Ok(written)
    }

    /// Whether the backing store answers
    pub async fn health_check(&self) -> bool {
        match self.kv.health_check().await {
            Ok(ok) => ok,
            Err(e) => {
                debug!(error = %e, "Store health check failed");
                false
            }
        }
    }
}
