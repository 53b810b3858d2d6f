//! Task repository
//!
//! Read / seed / toggle over the catalog document. Every mutation is a
//! whole-document read-modify-write with no concurrency guard: two toggles
//! racing on different tasks can lose one of the changes (last full write
//! wins).

use super::defaults::default_catalog;
use super::models::{CatalogProfile, Category, Task, TaskCatalog};
use crate::activity::{ActivityEntry, ActivityLog};
use crate::error::TrackerError;
use crate::events::{DocumentKind, EventEmitter};
use crate::kv::{document, load_or_seed, KvStore, Loaded};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Repository of the task catalog for one profile
pub struct TaskRepository {
    kv: Arc<dyn KvStore>,
    profile: CatalogProfile,
    key: String,
    activity: Arc<ActivityLog>,
    event_emitter: Option<Arc<dyn EventEmitter>>,
}

impl TaskRepository {
    /// Create a repository storing the `profile` catalog under `key`
    pub fn new(
        kv: Arc<dyn KvStore>,
        profile: CatalogProfile,
        key: impl Into<String>,
        activity: Arc<ActivityLog>,
    ) -> Self {
        Self {
            kv,
            profile,
            key: key.into(),
            activity,
            event_emitter: None,
        }
    }

    /// Attach an event emitter (builder pattern)
    pub fn with_event_emitter(mut self, emitter: Arc<dyn EventEmitter>) -> Self {
        self.event_emitter = Some(emitter);
        self
    }

    pub fn profile(&self) -> CatalogProfile {
        self.profile
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// The catalog this repository seeds with
    pub fn default_catalog(&self) -> TaskCatalog {
        default_catalog(self.profile)
    }

    fn emit_seeded(&self, document: DocumentKind, key: &str) {
        if let Some(emitter) = &self.event_emitter {
            emitter.emit_seeded(document, key);
        }
    }

    /// Strict read: seeds if absent, propagates every failure
    async fn load_document(&self) -> Result<Loaded<TaskCatalog>, TrackerError> {
        let profile = self.profile;
        let loaded = load_or_seed(self.kv.as_ref(), &self.key, || default_catalog(profile)).await?;
        if loaded.seeded {
            info!(key = %self.key, profile = %profile, "Seeded default task catalog");
            self.emit_seeded(DocumentKind::Tasks, &self.key);
        }
        Ok(loaded)
    }

    async fn load(&self) -> Result<TaskCatalog, TrackerError> {
        Ok(self.load_document().await?.document)
    }

    /// Ensure the catalog key exists, writing the default if absent.
    ///
    /// Returns whether this call wrote it.
    pub async fn ensure_seeded(&self) -> Result<bool, TrackerError> {
        Ok(self.load_document().await?.seeded)
    }

    /// The stored catalog, seeding the default on first access.
    ///
    /// Storage failures fall back to the default catalog; malformed documents
    /// are reported.
    pub async fn get_tasks(&self) -> Result<TaskCatalog, TrackerError> {
        match self.load().await {
            Err(e) if e.is_storage() => {
                warn!(key = %self.key, error = %e, "Task storage unavailable, serving default catalog");
                Ok(self.default_catalog())
            }
            other => other,
        }
    }

    /// Tasks of one category; unknown categories yield an empty list
    pub async fn get_category_tasks(&self, category: &str) -> Result<Vec<Task>, TrackerError> {
        let catalog = self.get_tasks().await?;
        Ok(catalog.tasks_by_key(category).to_vec())
    }

    /// Flip the completion flag of `(category, task_id)`.
    ///
    /// Reads the full catalog, flips one flag, writes the full catalog back
    /// and appends one activity entry. Unknown tasks are rejected before
    /// anything is written. If the activity append fails the catalog write
    /// stands and the error is returned.
    pub async fn toggle_task_completion(
        &self,
        category: &str,
        task_id: u32,
    ) -> Result<TaskCatalog, TrackerError> {
        let not_found = || TrackerError::NotFound {
            category: category.to_string(),
            task_id,
        };
        let category: Category = category.parse().map_err(|_| not_found())?;

        let mut catalog = self.load().await?;
        let task = catalog.find_mut(category, task_id).ok_or_else(not_found)?;
        task.completed = !task.completed;
        let entry = ActivityEntry::task_toggled(task, category);
        let completed = task.completed;

        if let Err(e) = document::store(self.kv.as_ref(), &self.key, &catalog).await {
            error!(key = %self.key, category = %category, task_id, error = %e, "Failed to write task catalog");
            return Err(e);
        }

        info!(category = %category, task_id, completed, "Task toggled");

        self.activity.append(entry).await?;

        if let Some(emitter) = &self.event_emitter {
            emitter.emit_updated(
                DocumentKind::Tasks,
                &self.key,
                serde_json::json!({
                    "category": category,
                    "taskId": task_id,
                    "completed": completed,
                }),
            );
            emitter.emit_updated(
                DocumentKind::Activity,
                self.activity.key(),
                serde_json::Value::Null,
            );
        }

        Ok(catalog)
    }
}
