//! Client configuration.
//!
//! All knobs are explicit values handed to [`crate::OllamaClient`] at
//! construction time. [`ClientConfig::default`] documents the process-wide
//! fallback; there is no hidden mutable global state.

use std::time::Duration;

use crate::registry;

/// Configuration for an [`crate::OllamaClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the inference server.
    pub base_url: String,
    /// Overall per-request deadline (connect + read).
    pub timeout: Duration,
    /// Maximum gap between successive bytes of a streaming response before
    /// the stream is aborted.
    pub inactivity_timeout: Duration,
    /// Total network attempts per request, including the first one.
    pub max_attempts: u32,
    /// Backoff delay before the first retry; doubles each attempt.
    pub base_delay: Duration,
    /// Cap on the backoff delay.
    pub max_delay: Duration,
    /// Randomize backoff delays to avoid synchronized retries.
    pub jitter: bool,
    /// Maximum simultaneously-open connections to the server.
    pub max_connections: usize,
    /// Idle connections older than this are discarded from the pool.
    pub pool_idle_timeout: Duration,
    /// Model used by chat/generate calls that do not name one.
    pub default_chat_model: String,
    /// Substitute chat model for the opt-in missing-model fallback.
    pub fallback_chat_model: String,
    /// Model used by embedding calls that do not name one.
    pub default_embedding_model: String,
    /// Substitute embedding model for the opt-in missing-model fallback.
    pub fallback_embedding_model: String,
    /// Retry a NotFound operation once against the configured fallback model.
    /// Off by default; enabling it is an explicit policy choice.
    pub fallback_on_missing_model: bool,
    /// Cache version and model-metadata lookups.
    pub cache_enabled: bool,
    /// Time-to-live for cached metadata lookups.
    pub cache_ttl: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            timeout: Duration::from_secs(60),
            inactivity_timeout: Duration::from_secs(30),
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            jitter: false,
            max_connections: 16,
            pool_idle_timeout: Duration::from_secs(90),
            default_chat_model: registry::DEFAULT_CHAT_MODEL.to_string(),
            fallback_chat_model: registry::FALLBACK_CHAT_MODEL.to_string(),
            default_embedding_model: registry::DEFAULT_EMBEDDING_MODEL.to_string(),
            fallback_embedding_model: registry::FALLBACK_EMBEDDING_MODEL.to_string(),
            fallback_on_missing_model: false,
            cache_enabled: false,
            cache_ttl: Duration::from_secs(300),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_inactivity_timeout(mut self, window: Duration) -> Self {
        self.inactivity_timeout = window;
        self
    }

    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn with_backoff(mut self, base: Duration, max: Duration) -> Self {
        self.base_delay = base;
        self.max_delay = max;
        self
    }

    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn with_max_connections(mut self, max: usize) -> Self {
        self.max_connections = max.max(1);
        self
    }

    pub fn with_default_chat_model(mut self, model: impl Into<String>) -> Self {
        self.default_chat_model = model.into();
        self
    }

    pub fn with_default_embedding_model(mut self, model: impl Into<String>) -> Self {
        self.default_embedding_model = model.into();
        self
    }

    pub fn with_fallback_on_missing_model(mut self, enabled: bool) -> Self {
        self.fallback_on_missing_model = enabled;
        self
    }

    pub fn with_cache(mut self, enabled: bool, ttl: Duration) -> Self {
        self.cache_enabled = enabled;
        self.cache_ttl = ttl;
        self
    }
}
