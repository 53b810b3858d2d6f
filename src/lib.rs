//! SEO Dashboard
//!
//! Backend of an SEO task-tracking dashboard:
//! - Task catalog per category, persisted as whole JSON documents in a KV store
//! - Completion percentages per category and overall
//! - Capped most-recent-first activity log
//! - Score and integration snapshots seeded on first access
//! - REST API, WebSocket change stream and view revalidation

pub mod activity;
pub mod api;
pub mod catalog;
pub mod dashboard;
pub mod error;
pub mod events;
pub mod kv;
pub mod snapshots;

#[cfg(test)]
pub(crate) mod test_helpers;

use anyhow::{Context, Result};
use api::handlers::ServerState;
use catalog::CatalogProfile;
use dashboard::Dashboard;
use events::{EventBus, EventEmitter, HybridEmitter, RevalidationNotifier};
use kv::{DocumentKeys, KvStore, MemoryKvStore, RestKvClient};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// YAML config structs (deserialization targets)
// ============================================================================

/// Top-level YAML configuration file structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub server: ServerYamlConfig,
    pub kv: KvYamlConfig,
    pub dashboard: DashboardYamlConfig,
    pub revalidation: RevalidationYamlConfig,
}

/// Server configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerYamlConfig {
    pub port: u16,
}

impl Default for ServerYamlConfig {
    fn default() -> Self {
        Self { port: 8080 }
    }
}

/// KV store section. Without a `url` the dashboard runs on an in-memory store.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KvYamlConfig {
    pub url: Option<String>,
    pub token: Option<String>,
    /// Key prefix; defaults to the profile's namespace
    pub namespace: Option<String>,
    pub timeout_secs: u64,
}

impl Default for KvYamlConfig {
    fn default() -> Self {
        Self {
            url: None,
            token: None,
            namespace: None,
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct DashboardYamlConfig {
    pub profile: CatalogProfile,
}

/// External revalidation endpoint notified on every document change
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RevalidationYamlConfig {
    pub url: Option<String>,
    pub paths: Vec<String>,
}

impl Default for RevalidationYamlConfig {
    fn default() -> Self {
        Self {
            url: None,
            paths: vec!["/".to_string()],
        }
    }
}

// ============================================================================
// Runtime config (what the application actually uses)
// ============================================================================

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub kv_url: Option<String>,
    pub kv_token: Option<String>,
    pub kv_namespace: Option<String>,
    pub kv_timeout_secs: u64,
    pub profile: CatalogProfile,
    pub revalidate_url: Option<String>,
    pub revalidate_paths: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_yaml(YamlConfig::default())
    }
}

/// Non-empty value of an environment variable
fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    /// Load configuration from environment variables and `config.yaml` in CWD.
    /// Equivalent to from_yaml_and_env(None).
    pub fn from_env() -> Result<Self> {
        Self::from_yaml_and_env(None)
    }

    /// Load configuration from an optional YAML file, then override with env vars.
    ///
    /// Priority: env var > YAML > default
    ///
    /// If `yaml_path` is None, tries "config.yaml" in CWD. If the file doesn't
    /// exist, falls back to pure env var / defaults.
    pub fn from_yaml_and_env(yaml_path: Option<&Path>) -> Result<Self> {
        let yaml = Self::load_yaml(yaml_path);
        let mut config = Self::from_yaml(yaml);

        if let Some(port) = env_var("SERVER_PORT") {
            config.server_port = port
                .parse()
                .with_context(|| format!("SERVER_PORT is not a valid port: {}", port))?;
        }
        if let Some(url) = env_var("KV_REST_API_URL") {
            config.kv_url = Some(url);
        }
        if let Some(token) = env_var("KV_REST_API_TOKEN") {
            config.kv_token = Some(token);
        }
        if let Some(namespace) = env_var("KV_NAMESPACE") {
            config.kv_namespace = Some(namespace);
        }
        if let Some(profile) = env_var("DASHBOARD_PROFILE") {
            config.profile = profile.parse().map_err(anyhow::Error::msg)?;
        }
        if let Some(url) = env_var("REVALIDATE_URL") {
            config.revalidate_url = Some(url);
        }

        Ok(config)
    }

    fn from_yaml(yaml: YamlConfig) -> Self {
        Self {
            server_port: yaml.server.port,
            kv_url: yaml.kv.url,
            kv_token: yaml.kv.token,
            kv_namespace: yaml.kv.namespace,
            kv_timeout_secs: yaml.kv.timeout_secs,
            profile: yaml.dashboard.profile,
            revalidate_url: yaml.revalidation.url,
            revalidate_paths: yaml.revalidation.paths,
        }
    }

    /// Try to load and parse a YAML config file. Returns defaults on any failure.
    fn load_yaml(yaml_path: Option<&Path>) -> YamlConfig {
        let default_path = Path::new("config.yaml");
        let path = yaml_path.unwrap_or(default_path);

        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_yaml::from_str(&contents) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}. Using defaults.", path.display(), e);
                    YamlConfig::default()
                }
            },
            Err(_) => {
                tracing::debug!(
                    "No config file at {}, using env vars / defaults",
                    path.display()
                );
                YamlConfig::default()
            }
        }
    }

    /// Storage keys: configured namespace, else the profile's
    pub fn document_keys(&self) -> DocumentKeys {
        match &self.kv_namespace {
            Some(namespace) => DocumentKeys::namespaced(namespace),
            None => DocumentKeys::for_profile(self.profile),
        }
    }

    /// Connect the configured store. Without a URL, an in-memory store is used.
    pub fn connect_store(&self) -> Result<Arc<dyn KvStore>> {
        match &self.kv_url {
            Some(url) => {
                let token = self
                    .kv_token
                    .as_deref()
                    .context("kv.token (KV_REST_API_TOKEN) is required when kv.url is set")?;
                let client =
                    RestKvClient::new(url, token, Duration::from_secs(self.kv_timeout_secs))?;
                tracing::info!(url = %client.base_url(), "Using REST KV store");
                Ok(Arc::new(client))
            }
            None => {
                tracing::warn!("No KV url configured, using in-memory store (data is not persisted)");
                Ok(Arc::new(MemoryKvStore::new()))
            }
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<Dashboard>,
    pub event_bus: Arc<HybridEmitter>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Create new application state with all services initialized
    pub fn new(config: Config) -> Result<Self> {
        let kv = config.connect_store()?;

        let local_bus = Arc::new(EventBus::default());
        let event_bus = match &config.revalidate_url {
            Some(url) => {
                let notifier = RevalidationNotifier::new(url, config.revalidate_paths.clone())
                    .context("Failed to build revalidation client")?;
                tracing::info!(
                    url = %notifier.url(),
                    paths = ?notifier.paths(),
                    "Revalidation notifier enabled"
                );
                Arc::new(HybridEmitter::with_notifier(local_bus, Arc::new(notifier)))
            }
            None => Arc::new(HybridEmitter::new(local_bus)),
        };

        let emitter: Arc<dyn EventEmitter> = event_bus.clone();
        let dashboard = Dashboard::new(kv, config.profile, config.document_keys())
            .with_event_emitter(emitter);

        Ok(Self {
            dashboard: Arc::new(dashboard),
            event_bus,
            config: Arc::new(config),
        })
    }
}

/// Build the state and serve the API until the process is stopped
pub async fn start_server(config: Config) -> Result<()> {
    let port = config.server_port;
    let state = AppState::new(config)?;

    let server_state = Arc::new(ServerState {
        dashboard: state.dashboard.clone(),
        event_bus: state.event_bus.clone(),
    });
    let app = api::create_router(server_state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(
        profile = %state.config.profile,
        "SEO dashboard listening on http://{}",
        addr
    );

    axum::serve(listener, app).await?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod config_tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_yaml_config_loading() {
        let yaml = r#"
server:
  port: 9090

kv:
  url: https://kv.example.com
  token: secret
  namespace: acme
  timeout_secs: 3

dashboard:
  profile: brand

revalidation:
  url: http://localhost:3000/api/revalidate
  paths: ["/", "/brand"]
"#;

        let config: YamlConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.kv.url.as_deref(), Some("https://kv.example.com"));
        assert_eq!(config.kv.timeout_secs, 3);
        assert_eq!(config.dashboard.profile, CatalogProfile::Brand);
        assert_eq!(config.revalidation.paths, vec!["/", "/brand"]);
    }

    #[test]
    fn test_yaml_defaults() {
        let config = YamlConfig::default();
        assert_eq!(config.server.port, 8080);
        assert!(config.kv.url.is_none());
        assert_eq!(config.kv.timeout_secs, 10);
        assert_eq!(config.dashboard.profile, CatalogProfile::Generic);
        assert!(config.revalidation.url.is_none());
        assert_eq!(config.revalidation.paths, vec!["/"]);
    }

    #[test]
    fn test_partial_yaml_keeps_section_defaults() {
        let yaml = r#"
kv:
  namespace: staging
"#;
        let config: YamlConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.kv.timeout_secs, 10);
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_document_keys_follow_namespace_or_profile() {
        let mut config = Config::default();
        assert_eq!(config.document_keys().tasks, "seo:tasks");

        config.profile = CatalogProfile::Brand;
        assert_eq!(config.document_keys().score, "brand-seo:score");

        config.kv_namespace = Some("acme".into());
        assert_eq!(config.document_keys().activity, "acme:activity");
    }

    #[test]
    fn test_connect_store_requires_token_with_url() {
        let mut config = Config::default();
        assert!(config.connect_store().is_ok());

        config.kv_url = Some("https://kv.example.com".into());
        assert!(config.connect_store().is_err());

        config.kv_token = Some("token".into());
        assert!(config.connect_store().is_ok());
    }

    /// Combined test for YAML file loading and env var overrides.
    /// Runs as a single test to avoid parallel env var race conditions.
    #[test]
    fn test_yaml_and_env_lifecycle() {
        fn clear_env() {
            for var in &[
                "SERVER_PORT",
                "KV_REST_API_URL",
                "KV_REST_API_TOKEN",
                "KV_NAMESPACE",
                "DASHBOARD_PROFILE",
                "REVALIDATE_URL",
            ] {
                std::env::remove_var(var);
            }
        }

        // --- Phase 1: YAML values loaded correctly ---
        let yaml = r#"
server:
  port: 9999
kv:
  url: https://yaml-kv.example.com
  token: yaml-token
dashboard:
  profile: generic
"#;
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("config.yaml");
        let mut file = std::fs::File::create(&file_path).unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        clear_env();

        let config = Config::from_yaml_and_env(Some(&file_path)).unwrap();
        assert_eq!(config.server_port, 9999);
        assert_eq!(config.kv_url.as_deref(), Some("https://yaml-kv.example.com"));
        assert_eq!(config.kv_token.as_deref(), Some("yaml-token"));
        assert_eq!(config.profile, CatalogProfile::Generic);
        assert!(config.revalidate_url.is_none());

        // --- Phase 2: Env vars override YAML ---
        std::env::set_var("KV_REST_API_URL", "https://env-kv.example.com");
        std::env::set_var("SERVER_PORT", "7777");
        std::env::set_var("DASHBOARD_PROFILE", "Brand");

        let config = Config::from_yaml_and_env(Some(&file_path)).unwrap();
        assert_eq!(config.kv_url.as_deref(), Some("https://env-kv.example.com"));
        assert_eq!(config.server_port, 7777);
        assert_eq!(config.profile, CatalogProfile::Brand);
        // YAML value still used where no env override
        assert_eq!(config.kv_token.as_deref(), Some("yaml-token"));

        // --- Phase 3: Invalid env values are reported ---
        std::env::set_var("DASHBOARD_PROFILE", "enterprise");
        assert!(Config::from_yaml_and_env(Some(&file_path)).is_err());
        std::env::remove_var("DASHBOARD_PROFILE");

        std::env::set_var("SERVER_PORT", "eighty");
        assert!(Config::from_yaml_and_env(Some(&file_path)).is_err());

        clear_env();

        // --- Phase 4: No YAML file → defaults ---
        let nonexistent = Path::new("/tmp/nonexistent-seo-config-12345.yaml");
        let config = Config::from_yaml_and_env(Some(nonexistent)).unwrap();
        assert_eq!(config.server_port, 8080);
        assert!(config.kv_url.is_none());
        assert_eq!(config.revalidate_paths, vec!["/"]);
    }

    #[tokio::test]
    async fn test_app_state_with_memory_store() {
        let config = Config {
            revalidate_url: Some("http://127.0.0.1:1/api/revalidate".into()),
            ..Config::default()
        };
        let state = AppState::new(config).unwrap();
        assert!(state.event_bus.has_notifier());
        assert_eq!(state.dashboard.keys().tasks, "seo:tasks");
        assert!(state.dashboard.health_check().await);
    }
}
