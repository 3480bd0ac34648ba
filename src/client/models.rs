//! Model management: list, show, copy, delete, pull, running models.

use serde_json::json;

use crate::error::Error;
use crate::pipeline::{decode_ndjson, into_typed, pull_complete};
use crate::registry;
use crate::transport::endpoint;
use crate::types::model::{ListModelsResponse, RunningModelsResponse};
use crate::types::{ModelSummary, PullProgress, RunningModel, ShowResponse};
use crate::{BoxStream, Result};

use super::core::OllamaClient;

const TAGS_CACHE_KEY: &str = "tags";

impl OllamaClient {
    /// Installed models, from `/api/tags`.
    pub async fn list_models(&self) -> Result<Vec<ModelSummary>> {
        let value = match self.cache.get(TAGS_CACHE_KEY).await {
            Some(cached) => cached,
            None => {
                let value = self
                    .transport
                    .execute_json(&endpoint::TAGS, None, None)
                    .await?;
                self.cache.put(TAGS_CACHE_KEY, &value).await;
                value
            }
        };
        let listing: ListModelsResponse = serde_json::from_value(value)
            .map_err(|e| Error::unclassified(format!("unexpected model listing shape: {}", e)))?;
        Ok(listing.models)
    }

    /// Detailed information about one model.
    pub async fn show_model(&self, model: &str) -> Result<ShowResponse> {
        let model = registry::resolve_alias(model);
        let cache_key = format!("show:{}", model);
        if let Some(cached) = self.cache.get(&cache_key).await {
            if let Ok(show) = serde_json::from_value(cached) {
                return Ok(show);
            }
        }
        let body = json!({ "model": model });
        let value = self
            .transport
            .execute_json(&endpoint::SHOW, Some(&body), None)
            .await?;
        self.cache.put(&cache_key, &value).await;
        serde_json::from_value(value)
            .map_err(|e| Error::unclassified(format!("unexpected model info shape: {}", e)))
    }

    /// Copy a model to a new name.
    pub async fn copy_model(&self, source: &str, destination: &str) -> Result<()> {
        let body = json!({ "source": source, "destination": destination });
        self.transport
            .execute_json(&endpoint::COPY, Some(&body), None)
            .await?;
        self.cache.invalidate(TAGS_CACHE_KEY).await;
        Ok(())
    }

    /// Delete a model.
    pub async fn delete_model(&self, model: &str) -> Result<()> {
        let model = registry::resolve_alias(model);
        let body = json!({ "model": model });
        self.transport
            .execute_json(&endpoint::DELETE, Some(&body), None)
            .await?;
        self.cache.invalidate(TAGS_CACHE_KEY).await;
        self.cache.invalidate(&format!("show:{}", model)).await;
        Ok(())
    }

    /// Pull a model from the registry, buffering until completion.
    pub async fn pull_model(&self, model: &str) -> Result<PullProgress> {
        let model = registry::resolve_alias(model);
        let body = json!({ "model": model, "stream": false });
        let value = self
            .transport
            .execute_json(&endpoint::PULL, Some(&body), None)
            .await?;
        self.cache.invalidate(TAGS_CACHE_KEY).await;
        serde_json::from_value(value)
            .map_err(|e| Error::unclassified(format!("unexpected pull status shape: {}", e)))
    }

    /// Pull a model with streamed progress reports; the final event has
    /// status `success`.
    pub async fn pull_model_stream(
        &self,
        model: &str,
    ) -> Result<BoxStream<'static, PullProgress>> {
        let model = registry::resolve_alias(model);
        let body = json!({ "model": model, "stream": true });
        let bytes = self
            .transport
            .execute_stream(&endpoint::PULL, Some(&body), None)
            .await?;
        self.cache.invalidate(TAGS_CACHE_KEY).await;
        Ok(into_typed(decode_ndjson(bytes, pull_complete)))
    }

    /// Models currently loaded by the server. Never cached; this is volatile
    /// state.
    pub async fn running_models(&self) -> Result<Vec<RunningModel>> {
        let value = self
            .transport
            .execute_json(&endpoint::PS, None, None)
            .await?;
        let listing: RunningModelsResponse = serde_json::from_value(value).map_err(|e| {
            Error::unclassified(format!("unexpected running-models shape: {}", e))
        })?;
        Ok(listing.models)
    }
}
