use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::cache::MetadataCache;
use crate::config::ClientConfig;
use crate::error::Error;
use crate::registry;
use crate::transport::{endpoint, HttpTransport};
use crate::types::VersionResponse;
use crate::Result;

/// Default deadline for the version/health probe; deliberately short so a
/// reachability check never hangs for the full request timeout.
const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for a locally-hosted Ollama-compatible inference server.
///
/// Cheap to clone; all clones share one connection pool, retry policy and
/// metadata cache.
#[derive(Clone)]
pub struct OllamaClient {
    pub(crate) transport: Arc<HttpTransport>,
    pub(crate) config: Arc<ClientConfig>,
    pub(crate) cache: Arc<MetadataCache>,
}

impl OllamaClient {
    /// Client with the documented default configuration (local server).
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let transport = Arc::new(HttpTransport::new(&config)?);
        let cache = Arc::new(MetadataCache::new(&config));
        Ok(Self {
            transport,
            config: Arc::new(config),
            cache,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Server version.
    ///
    /// Uses the short health deadline and, when the metadata cache is
    /// enabled, serves repeated probes from cache within the TTL.
    pub async fn version(&self) -> Result<VersionResponse> {
        if let Some(cached) = self.cache.get("version").await {
            if let Ok(version) = serde_json::from_value(cached) {
                return Ok(version);
            }
        }
        let value = self
            .transport
            .execute_json(&endpoint::VERSION, None, Some(HEALTH_TIMEOUT))
            .await?;
        self.cache.put("version", &value).await;
        serde_json::from_value(value)
            .map_err(|e| Error::unclassified(format!("unexpected version payload: {}", e)))
    }

    /// Whether the server currently answers the version probe.
    pub async fn is_reachable(&self) -> bool {
        self.version().await.is_ok()
    }

    /// Canonical model name for a request: explicit choice (alias-resolved)
    /// or the configured default for the operation family.
    pub(crate) fn resolve_model(&self, requested: Option<&str>, for_embeddings: bool) -> String {
        match requested {
            Some(name) => registry::resolve_alias(name),
            None if for_embeddings => self.config.default_embedding_model.clone(),
            None => self.config.default_chat_model.clone(),
        }
    }

    /// Run `operation` against `model`; on the opt-in missing-model policy,
    /// retry the same logical operation once against the configured fallback.
    pub(crate) async fn with_model_fallback<T, F, Fut>(&self, model: String, operation: F) -> Result<T>
    where
        F: Fn(String) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        match operation(model.clone()).await {
            Err(err @ Error::NotFound { .. }) if self.config.fallback_on_missing_model => {
                match registry::fallback_for(&model, &self.config) {
                    Some(fallback) => {
                        warn!(
                            model = model.as_str(),
                            fallback = fallback.as_str(),
                            "model not found, retrying against configured fallback"
                        );
                        operation(fallback).await
                    }
                    None => Err(err),
                }
            }
            other => other,
        }
    }
}
