//! Text generation: one-shot and streamed.

use std::time::Duration;

use serde_json::json;

use crate::error::Error;
use crate::pipeline::{decode_ndjson, done_flag, into_typed};
use crate::transport::endpoint;
use crate::types::{GenerateResponse, ModelOptions};
use crate::{BoxStream, Result};

use super::core::OllamaClient;

/// Parameters for a generate call.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub model: Option<String>,
    pub prompt: String,
    pub options: Option<ModelOptions>,
    /// Bypass the model's prompt template and send the prompt untouched.
    pub raw: Option<bool>,
    /// Override the model's prompt template for this call.
    pub template: Option<String>,
    /// Conversation context returned by an earlier call.
    pub context: Option<Vec<i64>>,
    pub timeout: Option<Duration>,
}

impl GenerateRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            model: None,
            prompt: prompt.into(),
            options: None,
            raw: None,
            template: None,
            context: None,
            timeout: None,
        }
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn options(mut self, options: ModelOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn raw(mut self, raw: bool) -> Self {
        self.raw = Some(raw);
        self
    }

    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn context(mut self, context: Vec<i64>) -> Self {
        self.context = Some(context);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn body(&self, model: &str, stream: bool) -> serde_json::Value {
        let mut body = json!({
            "model": model,
            "prompt": self.prompt,
            "stream": stream,
        });
        if let Some(options) = &self.options {
            if !options.is_empty() {
                body["options"] = json!(options);
            }
        }
        if let Some(raw) = self.raw {
            body["raw"] = json!(raw);
        }
        if let Some(template) = &self.template {
            body["template"] = json!(template);
        }
        if let Some(context) = &self.context {
            body["context"] = json!(context);
        }
        body
    }
}

impl OllamaClient {
    /// One-shot generation: the full completion, buffered.
    pub async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        let model = self.resolve_model(request.model.as_deref(), false);
        self.with_model_fallback(model, |model| {
            let request = &request;
            async move {
                let body = request.body(&model, false);
                let value = self
                    .transport
                    .execute_json(&endpoint::GENERATE, Some(&body), request.timeout)
                    .await?;
                serde_json::from_value(value).map_err(|e| {
                    Error::unclassified(format!("unexpected generate response shape: {}", e))
                })
            }
        })
        .await
    }

    /// Streamed generation; final event carries `done: true` and the
    /// cumulative counters.
    pub async fn generate_stream(
        &self,
        request: GenerateRequest,
    ) -> Result<BoxStream<'static, GenerateResponse>> {
        let model = self.resolve_model(request.model.as_deref(), false);
        let bytes = self
            .with_model_fallback(model, |model| {
                let request = &request;
                async move {
                    let body = request.body(&model, true);
                    self.transport
                        .execute_stream(&endpoint::GENERATE, Some(&body), request.timeout)
                        .await
                }
            })
            .await?;
        Ok(into_typed(decode_ndjson(bytes, done_flag)))
    }
}
