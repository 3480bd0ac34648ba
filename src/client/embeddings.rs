//! Embeddings: single and batch, normalized to the batch wire form.

use std::time::Duration;

use serde_json::json;

use crate::error::Error;
use crate::transport::endpoint;
use crate::types::{EmbedResponse, ModelOptions};
use crate::Result;

use super::core::OllamaClient;

/// Parameters for an embeddings call.
///
/// A single input and a batch go over the wire identically (batch form);
/// response vectors come back in input order. Inputs longer than the model's
/// context are truncated or rejected server-side; the resulting error is
/// surfaced unchanged.
#[derive(Debug, Clone)]
pub struct EmbedRequest {
    pub model: Option<String>,
    pub input: Vec<String>,
    pub options: Option<ModelOptions>,
    pub timeout: Option<Duration>,
}

impl EmbedRequest {
    pub fn single(input: impl Into<String>) -> Self {
        Self {
            model: None,
            input: vec![input.into()],
            options: None,
            timeout: None,
        }
    }

    pub fn batch(input: Vec<String>) -> Self {
        Self {
            model: None,
            input,
            options: None,
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

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn validate(&self) -> Result<()> {
        if self.input.is_empty() {
            return Err(Error::invalid_request(
                "embeddings require at least one input",
            ));
        }
        Ok(())
    }

    fn body(&self, model: &str) -> serde_json::Value {
        let mut body = json!({
            "model": model,
            "input": self.input,
        });
        if let Some(options) = &self.options {
            if !options.is_empty() {
                body["options"] = json!(options);
            }
        }
        body
    }
}

impl OllamaClient {
    /// Full embeddings call.
    pub async fn embeddings(&self, request: EmbedRequest) -> Result<EmbedResponse> {
        request.validate()?;
        let model = self.resolve_model(request.model.as_deref(), true);
        self.with_model_fallback(model, |model| {
            let request = &request;
            async move {
                let body = request.body(&model);
                let value = self
                    .transport
                    .execute_json(&endpoint::EMBED, Some(&body), request.timeout)
                    .await?;
                serde_json::from_value(value).map_err(|e| {
                    Error::unclassified(format!("unexpected embeddings response shape: {}", e))
                })
            }
        })
        .await
    }

    /// Embed one text with the default embedding model.
    pub async fn embed(&self, text: impl Into<String>) -> Result<Vec<f32>> {
        let response = self.embeddings(EmbedRequest::single(text)).await?;
        response
            .embeddings
            .into_iter()
            .next()
            .ok_or_else(|| Error::unclassified("server returned no embedding vector"))
    }

    /// Embed a batch of texts; the result preserves input order.
    pub async fn embed_batch(&self, texts: &[impl AsRef<str>]) -> Result<Vec<Vec<f32>>> {
        let input: Vec<String> = texts.iter().map(|t| t.as_ref().to_string()).collect();
        let response = self.embeddings(EmbedRequest::batch(input)).await?;
        Ok(response.embeddings)
    }
}
