use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use bytes::Bytes;
use futures::{Stream, TryStreamExt};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::{debug, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::Error;
use crate::pipeline::idle;
use crate::transport::endpoint::{Endpoint, Method};
use crate::transport::policy::{Decision, RetryPolicy};
use crate::{BoxStream, Result};

/// Pooled HTTP transport to a single inference server.
///
/// Owns the connection pool and the retry policy. A request body handed to
/// `execute_*` is never mutated; retries re-serialize the same value.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    policy: RetryPolicy,
    inflight: Arc<Semaphore>,
    default_timeout: Duration,
    inactivity_timeout: Duration,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let parsed = Url::parse(&config.base_url).map_err(|e| {
            Error::invalid_request(format!("invalid base URL {:?}: {}", config.base_url, e))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::invalid_request(format!(
                "unsupported URL scheme {:?}",
                parsed.scheme()
            )));
        }

        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(config.max_connections)
            .pool_idle_timeout(Some(config.pool_idle_timeout))
            .build()
            .map_err(|e| Error::Unclassified {
                message: format!("failed to construct HTTP client: {}", e),
                cause: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            policy: RetryPolicy::from_config(config),
            inflight: Arc::new(Semaphore::new(config.max_connections)),
            default_timeout: config.timeout,
            inactivity_timeout: config.inactivity_timeout,
        })
    }

    /// Execute a non-streaming request and buffer the decoded body.
    pub async fn execute_json(
        &self,
        endpoint: &Endpoint,
        body: Option<&serde_json::Value>,
        timeout_override: Option<Duration>,
    ) -> Result<serde_json::Value> {
        let deadline = timeout_override.unwrap_or(self.default_timeout);
        let _permit = self.admit(deadline).await?;

        let response = self.send_with_retry(endpoint, body, deadline).await?;
        response.json().await.map_err(|e| Error::Unclassified {
            message: format!("malformed response body from {}: {}", endpoint.path, e),
            cause: Some(Box::new(e)),
        })
    }

    /// Execute a streaming request.
    ///
    /// Retries apply only to establishing the response; once bytes flow there
    /// is no replay. The returned stream owns its connection (and its slot in
    /// the admission budget) until drained or dropped, and is guarded by the
    /// configured inactivity timeout.
    pub async fn execute_stream(
        &self,
        endpoint: &Endpoint,
        body: Option<&serde_json::Value>,
        timeout_override: Option<Duration>,
    ) -> Result<BoxStream<'static, Bytes>> {
        if !endpoint.streamable {
            return Err(Error::invalid_request(format!(
                "endpoint {} does not support streaming",
                endpoint.path
            )));
        }
        let deadline = timeout_override.unwrap_or(self.default_timeout);
        let permit = self.admit(deadline).await?;

        let response = self.send_with_retry(endpoint, body, deadline).await?;
        let bytes = response.bytes_stream().map_err(Error::from_reqwest);
        let guarded = idle::with_inactivity_timeout(Box::pin(bytes), self.inactivity_timeout);
        Ok(Box::pin(PermitBound {
            inner: guarded,
            _permit: permit,
        }))
    }

    /// Wait for an in-flight slot, bounded by the request's own deadline.
    async fn admit(&self, deadline: Duration) -> Result<OwnedSemaphorePermit> {
        match tokio::time::timeout(deadline, self.inflight.clone().acquire_owned()).await {
            Ok(Ok(permit)) => Ok(permit),
            Ok(Err(_)) => Err(Error::unclassified("connection pool closed")),
            Err(_) => Err(Error::timeout(format!(
                "no connection available within {:?}",
                deadline
            ))),
        }
    }

    async fn send_with_retry(
        &self,
        endpoint: &Endpoint,
        body: Option<&serde_json::Value>,
        deadline: Duration,
    ) -> Result<reqwest::Response> {
        let mut attempt: u32 = 0;
        loop {
            match self.send_once(endpoint, body, deadline).await {
                Ok(response) => {
                    debug!(
                        path = endpoint.path,
                        status = response.status().as_u16(),
                        attempt,
                        "request completed"
                    );
                    return Ok(response);
                }
                Err(err) => match self.policy.decide(&err, attempt) {
                    Decision::Retry { delay } => {
                        warn!(
                            path = endpoint.path,
                            attempt,
                            delay_ms = delay.as_millis() as u64,
                            error = %err,
                            "transient failure, backing off before retry"
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                    }
                    Decision::Fail => return Err(err),
                },
            }
        }
    }

    /// One network attempt: send, then classify a non-success status into the
    /// typed taxonomy using the error body the server returned.
    async fn send_once(
        &self,
        endpoint: &Endpoint,
        body: Option<&serde_json::Value>,
        deadline: Duration,
    ) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url, endpoint.path);
        let mut request = match endpoint.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Delete => self.client.delete(&url),
            Method::Head => self.client.head(&url),
        };
        request = request.timeout(deadline);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(Error::from_reqwest)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        Err(Error::from_status(
            status.as_u16(),
            error_message_from_body(status.as_u16(), &text),
        ))
    }
}

/// Pull the server's `{"error": "..."}` message out of an error body, falling
/// back to the raw text or the bare status.
fn error_message_from_body(status: u16, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = json.get("error").and_then(|e| e.as_str()) {
            return message.to_string();
        }
    }
    if body.trim().is_empty() {
        format!("HTTP {}", status)
    } else {
        body.trim().to_string()
    }
}

/// Ties an admission permit to the byte stream so the in-flight budget is
/// released only when the stream is drained or dropped.
struct PermitBound {
    inner: BoxStream<'static, Bytes>,
    _permit: OwnedSemaphorePermit,
}

impl Stream for PermitBound {
    type Item = Result<Bytes>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().inner.as_mut().poll_next(cx)
    }
}
