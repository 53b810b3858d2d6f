//! HTTP revalidation notifier
//!
//! Tells an external rendering layer that its cached views are stale by
//! POSTing `{"path": ...}` to its revalidation endpoint whenever a document is
//! seeded or updated. Requests run in the background and errors are only
//! logged; short-lived callers (the CLI) `flush` before their runtime ends.

use super::types::{ChangeAction, ChangeEvent, DocumentKind, EventEmitter};
use std::sync::Mutex;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Forwards document changes to an external revalidation endpoint
pub struct RevalidationNotifier {
    client: reqwest::Client,
    url: String,
    paths: Vec<String>,
    pending: Mutex<JoinSet<()>>,
}

impl RevalidationNotifier {
    /// Create a notifier posting each of `paths` to `url` on every change
    pub fn new(url: &str, paths: Vec<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()?;

        Ok(Self {
            client,
            url: url.trim_end_matches('/').to_string(),
            paths,
            pending: Mutex::new(JoinSet::new()),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Wait for every revalidation request sent so far
    pub async fn flush(&self) {
        let mut pending = std::mem::take(&mut *self.lock_pending());
        while let Some(result) = pending.join_next().await {
            if let Err(e) = result {
                warn!(url = %self.url, "Revalidation task failed: {}", e);
            }
        }
    }

    fn lock_pending(&self) -> std::sync::MutexGuard<'_, JoinSet<()>> {
        self.pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Whether `event` should refresh the rendered views.
///
/// Revalidation requests came from the rendering layer itself. Activity
/// updates are written by the task toggle that already produced a tasks
/// update.
fn triggers_revalidation(event: &ChangeEvent) -> bool {
    match (event.action, event.document) {
        (ChangeAction::Revalidated, _) => false,
        (ChangeAction::Updated, Some(DocumentKind::Activity)) => false,
        _ => true,
    }
}

impl EventEmitter for RevalidationNotifier {
    fn emit(&self, event: ChangeEvent) {
        if !triggers_revalidation(&event) || self.paths.is_empty() {
            return;
        }

        let client = self.client.clone();
        let url = self.url.clone();
        let paths = self.paths.clone();

        let mut pending = self.lock_pending();
        // Reap finished requests; the server never flushes
        while pending.try_join_next().is_some() {}
        pending.spawn(async move {
            for path in paths {
                let body = serde_json::json!({ "path": path });
                match client.post(&url).json(&body).send().await {
                    Ok(resp) if resp.status().is_success() => {
                        debug!(url = %url, path = %path, document = ?event.document, "View revalidated");
                    }
                    Ok(resp) => {
                        warn!(
                            url = %url,
                            path = %path,
                            status = resp.status().as_u16(),
                            "Revalidation endpoint rejected request"
                        );
                    }
                    Err(e) => {
                        warn!(url = %url, path = %path, "Failed to reach revalidation endpoint: {}", e);
                    }
                }
            }
        });
    }
}
