//! Chat: one-shot and streamed.

use std::time::Duration;

use serde_json::json;

use crate::error::Error;
use crate::pipeline::{decode_ndjson, done_flag, into_typed};
use crate::transport::endpoint;
use crate::types::{ChatResponse, Message, ModelOptions};
use crate::{BoxStream, Result};

use super::core::OllamaClient;

/// Parameters for a chat call.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub model: Option<String>,
    pub messages: Vec<Message>,
    pub options: Option<ModelOptions>,
    pub keep_alive: Option<String>,
    pub timeout: Option<Duration>,
}

impl ChatRequest {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            model: None,
            messages,
            options: None,
            keep_alive: None,
            timeout: None,
        }
    }

    /// Model to use; aliases are resolved, and the configured default applies
    /// when unset.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn options(mut self, options: ModelOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// How long the server keeps the model loaded after the call.
    pub fn keep_alive(mut self, keep_alive: impl Into<String>) -> Self {
        self.keep_alive = Some(keep_alive.into());
        self
    }

    /// Per-request deadline override.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn validate(&self) -> Result<()> {
        if self.messages.is_empty() {
            return Err(Error::invalid_request(
                "chat requires at least one message",
            ));
        }
        Ok(())
    }

    fn body(&self, model: &str, stream: bool) -> serde_json::Value {
        let mut body = json!({
            "model": model,
            "messages": self.messages,
            "stream": stream,
        });
        if let Some(options) = &self.options {
            if !options.is_empty() {
                body["options"] = json!(options);
            }
        }
        if let Some(keep_alive) = &self.keep_alive {
            body["keep_alive"] = json!(keep_alive);
        }
        body
    }
}

impl OllamaClient {
    /// One-shot chat: the full assistant reply, buffered.
    pub async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        request.validate()?;
        let model = self.resolve_model(request.model.as_deref(), false);
        self.with_model_fallback(model, |model| {
            let request = &request;
            async move {
                let body = request.body(&model, false);
                let value = self
                    .transport
                    .execute_json(&endpoint::CHAT, Some(&body), request.timeout)
                    .await?;
                serde_json::from_value(value).map_err(|e| {
                    Error::unclassified(format!("unexpected chat response shape: {}", e))
                })
            }
        })
        .await
    }

    /// Streamed chat: a lazy, finite sequence of partial replies whose final
    /// event carries `done: true`. The stream owns its connection until
    /// drained or dropped.
    pub async fn chat_stream(
        &self,
        request: ChatRequest,
    ) -> Result<BoxStream<'static, ChatResponse>> {
        request.validate()?;
        let model = self.resolve_model(request.model.as_deref(), false);
        let bytes = self
            .with_model_fallback(model, |model| {
                let request = &request;
                async move {
                    let body = request.body(&model, true);
                    self.transport
                        .execute_stream(&endpoint::CHAT, Some(&body), request.timeout)
                        .await
                }
            })
            .await?;
        Ok(into_typed(decode_ndjson(bytes, done_flag)))
    }
}
