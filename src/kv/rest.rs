//! REST client for Upstash / Vercel KV
//!
//! Speaks the Redis-over-HTTP protocol: each command is a path segment
//! (`/get/{key}`, `/set/{key}`, `/exists/{key}`, `/ping`) and every reply is a
//! JSON envelope `{"result": ...}` or `{"error": "..."}`. Documents are stored
//! as JSON-encoded strings, the same encoding the JavaScript SDK uses.

use super::traits::{KvStore, StoreError};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Reply envelope of the REST API
#[derive(Debug, Deserialize)]
struct RestReply {
    #[serde(default)]
    result: Value,
    #[serde(default)]
    error: Option<String>,
}

/// Client for a Redis-compatible REST key-value endpoint
#[derive(Clone)]
pub struct RestKvClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl RestKvClient {
    /// Create a new client for `base_url`, authenticating with a bearer token.
    ///
    /// `timeout` bounds every request; the dashboard itself adds no timeouts.
    pub fn new(base_url: &str, token: &str, timeout: Duration) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    /// Base URL (without trailing slash)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn command_url(&self, command: &str, key: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url,
            command,
            urlencoding::encode(key)
        )
    }

    /// Decode a reply envelope, mapping HTTP and payload errors to `StoreError`.
    async fn read_reply(response: reqwest::Response) -> Result<Value, StoreError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<RestReply>(&body)
                .ok()
                .and_then(|r| r.error)
                .unwrap_or(body);
            return Err(StoreError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let reply: RestReply = serde_json::from_str(&body)?;
        if let Some(error) = reply.error {
            return Err(StoreError::Backend(error));
        }
        Ok(reply.result)
    }
}

#[async_trait]
impl KvStore for RestKvClient {
    async fn exists(&self, key: &str) -> Result<bool, StoreError> {
        let response = self
            .client
            .get(self.command_url("exists", key))
            .bearer_auth(&self.token)
            .send()
            .await?;

        let result = Self::read_reply(response).await?;
        match result.as_i64() {
            Some(count) => Ok(count > 0),
            None => Err(StoreError::Backend(format!(
                "unexpected EXISTS reply: {}",
                result
            ))),
        }
    }

    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let response = self
            .client
            .get(self.command_url("get", key))
            .bearer_auth(&self.token)
            .send()
            .await?;

        match Self::read_reply(response).await? {
            Value::Null => Ok(None),
            // Non-JSON strings come back raw; the caller's decode reports the shape
            Value::String(encoded) => match serde_json::from_str(&encoded) {
                Ok(value) => Ok(Some(value)),
                Err(_) => Ok(Some(Value::String(encoded))),
            },
            other => Ok(Some(other)),
        }
    }

    async fn set(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(value)?;
        debug!(key = %key, bytes = encoded.len(), "KV SET");

        let response = self
            .client
            .post(self.command_url("set", key))
            .bearer_auth(&self.token)
            .body(encoded)
            .send()
            .await?;

        Self::read_reply(response).await?;
        Ok(())
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        let response = self
            .client
            .get(format!("{}/ping", self.base_url))
            .bearer_auth(&self.token)
            .send()
            .await?;

        let result = Self::read_reply(response).await?;
        Ok(result.as_str() == Some("PONG"))
    }
}
