//! Change event types

use serde::{Deserialize, Serialize};

/// The stored document that changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Tasks,
    Activity,
    Score,
    Integrations,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Tasks => "tasks",
            DocumentKind::Activity => "activity",
            DocumentKind::Score => "score",
            DocumentKind::Integrations => "integrations",
        }
    }
}

/// What happened to the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeAction {
    /// Default written on first access
    Seeded,
    /// Full document overwritten by a mutation
    Updated,
    /// A caller asked for a view path to be refreshed
    Revalidated,
}

/// Notification that a document (or a rendered view of it) changed.
///
/// Must be Clone for `tokio::sync::broadcast`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<DocumentKind>,
    pub action: ChangeAction,
    /// Storage key of the document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// View path to refresh (revalidation requests)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub payload: serde_json::Value,
    /// ISO 8601 timestamp
    pub timestamp: String,
}

impl ChangeEvent {
    /// Event about a stored document
    pub fn document(document: DocumentKind, action: ChangeAction, key: impl Into<String>) -> Self {
        Self {
            document: Some(document),
            action,
            key: Some(key.into()),
            path: None,
            payload: serde_json::Value::Null,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Revalidation request for a view path
    pub fn revalidated(path: impl Into<String>) -> Self {
        Self {
            document: None,
            action: ChangeAction::Revalidated,
            key: None,
            path: Some(path.into()),
            payload: serde_json::Value::Null,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

/// Sink for change events.
///
/// Emitting is fire-and-forget: it never blocks the mutation and never fails it.
pub trait EventEmitter: Send + Sync {
    fn emit(&self, event: ChangeEvent);

    fn emit_updated(&self, document: DocumentKind, key: &str, payload: serde_json::Value) {
        self.emit(ChangeEvent::document(document, ChangeAction::Updated, key).with_payload(payload));
    }

    fn emit_seeded(&self, document: DocumentKind, key: &str) {
        self.emit(ChangeEvent::document(document, ChangeAction::Seeded, key));
    }

    fn emit_revalidated(&self, path: &str) {
        self.emit(ChangeEvent::revalidated(path));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_kind_wire_names() {
        for kind in [
            DocumentKind::Tasks,
            DocumentKind::Activity,
            DocumentKind::Score,
            DocumentKind::Integrations,
        ] {
            assert_eq!(
                serde_json::to_string(&kind).unwrap(),
                format!("\"{}\"", kind.as_str())
            );
        }
    }

    #[test]
    fn test_document_event_omits_empty_fields() {
        let event = ChangeEvent::document(DocumentKind::Tasks, ChangeAction::Seeded, "seo:tasks");
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"document\":\"tasks\""));
        assert!(json.contains("\"action\":\"seeded\""));
        assert!(!json.contains("\"path\""));
        assert!(!json.contains("\"payload\""));
    }

    #[test]
    fn test_revalidated_event() {
        let event = ChangeEvent::revalidated("/dashboard");
        assert_eq!(event.action, ChangeAction::Revalidated);
        assert_eq!(event.path.as_deref(), Some("/dashboard"));
        assert!(event.document.is_none());

        let back: ChangeEvent =
            serde_json::from_str(&serde_json::to_string(&event).unwrap()).unwrap();
        assert_eq!(back.path.as_deref(), Some("/dashboard"));
        assert!(back.key.is_none());
    }
}
