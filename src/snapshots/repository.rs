//! Read-only access to the score and integration documents

use super::models::{IntegrationStatus, SeoScore};
use crate::error::TrackerError;
use crate::events::{DocumentKind, EventEmitter};
use crate::kv::{load_or_seed, KvStore, Loaded};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

pub struct SnapshotRepository {
    kv: Arc<dyn KvStore>,
    score_key: String,
    integrations_key: String,
    event_emitter: Option<Arc<dyn EventEmitter>>,
}

impl SnapshotRepository {
    pub fn new(
        kv: Arc<dyn KvStore>,
        score_key: impl Into<String>,
        integrations_key: impl Into<String>,
    ) -> Self {
        Self {
            kv,
            score_key: score_key.into(),
            integrations_key: integrations_key.into(),
            event_emitter: None,
        }
    }

    /// Attach an event emitter (builder pattern)
    pub fn with_event_emitter(mut self, emitter: Arc<dyn EventEmitter>) -> Self {
        self.event_emitter = Some(emitter);
        self
    }

    pub fn score_key(&self) -> &str {
        &self.score_key
    }

    pub fn integrations_key(&self) -> &str {
        &self.integrations_key
    }

    async fn load<T, F>(&self, document: DocumentKind, key: &str, seed: F) -> Result<Loaded<T>, TrackerError>
    where
        T: Serialize + DeserializeOwned,
        F: Fn() -> T,
    {
        let loaded = load_or_seed(self.kv.as_ref(), key, seed).await?;
        if loaded.seeded {
            if let Some(emitter) = &self.event_emitter {
                emitter.emit_seeded(document, key);
            }
        }
        Ok(loaded)
    }

    async fn read<T, F>(&self, document: DocumentKind, key: &str, seed: F) -> Result<T, TrackerError>
    where
        T: Serialize + DeserializeOwned,
        F: Fn() -> T,
    {
        match self.load(document, key, &seed).await {
            Ok(loaded) => Ok(loaded.document),
            Err(e) if e.is_storage() => {
                warn!(key = %key, error = %e, "Snapshot storage unavailable, serving default");
                Ok(seed())
            }
            Err(e) => Err(e),
        }
    }

    /// Strict read of the score, seeding it if absent
    pub async fn load_score(&self) -> Result<Loaded<SeoScore>, TrackerError> {
        self.load(DocumentKind::Score, &self.score_key, SeoScore::seed).await
    }

    /// Strict read of the integration map, seeding it if absent
    pub async fn load_integrations(&self) -> Result<Loaded<IntegrationStatus>, TrackerError> {
        self.load(DocumentKind::Integrations, &self.integrations_key, IntegrationStatus::seed)
            .await
    }

    /// The score snapshot; storage failures fall back to the default
    pub async fn get_score(&self) -> Result<SeoScore, TrackerError> {
        self.read(DocumentKind::Score, &self.score_key, SeoScore::seed).await
    }

    /// The integration map; storage failures fall back to the default
    pub async fn get_integrations(&self) -> Result<IntegrationStatus, TrackerError> {
        self.read(DocumentKind::Integrations, &self.integrations_key, IntegrationStatus::seed)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{ChangeAction, EventBus};
    use crate::kv::mock::MockKvStore;
    use serde_json::json;

    fn repo(kv: Arc<MockKvStore>) -> SnapshotRepository {
        SnapshotRepository::new(kv, "seo:score", "seo:integrations")
    }

    #[tokio::test]
    async fn test_score_seeded_once() {
        let kv = Arc::new(MockKvStore::new());
        let snapshots = repo(kv.clone());

        let first = snapshots.get_score().await.unwrap();
        assert_eq!(first.overall, 72.0);
        assert_eq!(first.mobile, 88.0);
        assert_eq!(kv.writes(), 1);

        // The seed timestamp is stored, not recomputed
        let second = snapshots.get_score().await.unwrap();
        assert_eq!(second, first);
        assert_eq!(kv.writes(), 1);
    }

    #[tokio::test]
    async fn test_stored_score_returned_verbatim() {
        let kv = Arc::new(
            MockKvStore::new()
                .with_value(
                    "seo:score",
                    json!({
                        "overall": 90, "content": 91, "links": 92, "performance": 93,
                        "mobile": 94, "lastUpdated": "2024-01-01T00:00:00Z",
                    }),
                )
                .await,
        );
        let score = repo(kv.clone()).get_score().await.unwrap();
        assert_eq!(score.overall, 90.0);
        assert_eq!(score.mobile, 94.0);
        assert_eq!(kv.writes(), 0);
    }

    #[tokio::test]
    async fn test_integrations_seeded() {
        let kv = Arc::new(MockKvStore::new());
        let integrations = repo(kv.clone()).get_integrations().await.unwrap();

        assert_eq!(integrations, IntegrationStatus::seed());
        assert_eq!(kv.raw("seo:integrations").await.unwrap()["ahrefs"], false);
    }

    #[tokio::test]
    async fn test_reads_fail_open() {
        let kv = Arc::new(MockKvStore::new());
        kv.set_fail_reads(true);
        let snapshots = repo(kv.clone());

        assert_eq!(snapshots.get_score().await.unwrap().links, 54.0);
        assert_eq!(
            snapshots.get_integrations().await.unwrap(),
            IntegrationStatus::seed()
        );
        assert!(snapshots.load_score().await.unwrap_err().is_storage());
        assert_eq!(kv.writes(), 0);
    }

    #[tokio::test]
    async fn test_malformed_integrations_propagate() {
        let kv = Arc::new(
            MockKvStore::new()
                .with_value("seo:integrations", json!(["semrush"]))
                .await,
        );
        let err = repo(kv).get_integrations().await.unwrap_err();
        assert!(matches!(err, TrackerError::Malformed { ref key, .. } if key == "seo:integrations"));
    }

    #[tokio::test]
    async fn test_seeding_emits_event() {
        let kv = Arc::new(MockKvStore::new());
        let bus = Arc::new(EventBus::default());
        let mut rx = bus.subscribe();
        let snapshots = repo(kv).with_event_emitter(bus);

        snapshots.get_integrations().await.unwrap();
        snapshots.get_integrations().await.unwrap();

        let event = rx.try_recv().unwrap();
        assert_eq!(event.action, ChangeAction::Seeded);
        assert_eq!(event.document, Some(DocumentKind::Integrations));
        assert!(rx.try_recv().is_err());
    }
}
