//! Whole-document access and first-read seeding
//!
//! Every document follows the same lifecycle: absent until first read, then
//! seeded with its default and present forever after. There is no lock
//! around the existence check, so two concurrent first reads may both seed;
//! defaults are deterministic so the second write only repeats the first.

use super::traits::KvStore;
use crate::catalog::CatalogProfile;
use crate::error::TrackerError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

/// Storage keys of the four dashboard documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentKeys {
    pub tasks: String,
    pub activity: String,
    pub score: String,
    pub integrations: String,
}

impl DocumentKeys {
    /// Keys under `namespace`, e.g. `seo:tasks`
    pub fn namespaced(namespace: &str) -> Self {
        Self {
            tasks: format!("{}:tasks", namespace),
            activity: format!("{}:activity", namespace),
            score: format!("{}:score", namespace),
            integrations: format!("{}:integrations", namespace),
        }
    }

    /// Default keys for a catalog profile
    pub fn for_profile(profile: CatalogProfile) -> Self {
        Self::namespaced(profile.default_namespace())
    }
}

/// Decode a stored value, reporting shape mismatches as `Malformed`.
pub fn decode<T: DeserializeOwned>(key: &str, raw: serde_json::Value) -> Result<T, TrackerError> {
    serde_json::from_value(raw).map_err(|source| TrackerError::Malformed {
        key: key.to_string(),
        source,
    })
}

/// Write a full document under `key`.
pub async fn store<T: Serialize>(
    kv: &dyn KvStore,
    key: &str,
    document: &T,
) -> Result<(), TrackerError> {
    let value = serde_json::to_value(document).map_err(|source| TrackerError::Malformed {
        key: key.to_string(),
        source,
    })?;
    kv.set(key, &value).await?;
    Ok(())
}

/// Outcome of `load_or_seed`
#[derive(Debug)]
pub struct Loaded<T> {
    pub document: T,
    /// Whether this call wrote the default
    pub seeded: bool,
}

/// Ensure `key` exists (writing `seed()` if absent), then read it back.
///
/// A key that disappears between the existence check and the read decodes as
/// the seed value.
pub async fn load_or_seed<T, F>(kv: &dyn KvStore, key: &str, seed: F) -> Result<Loaded<T>, TrackerError>
where
    T: Serialize + DeserializeOwned,
    F: Fn() -> T,
{
    let mut seeded = false;
    if !kv.exists(key).await? {
        store(kv, key, &seed()).await?;
        debug!(key = %key, "Seeded default document");
        seeded = true;
    }

    let document = match kv.get(key).await? {
        Some(raw) => decode(key, raw)?,
        None => seed(),
    };

    Ok(Loaded { document, seeded })
}
