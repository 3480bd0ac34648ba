//! Blocking façade.
//!
//! Same semantics as the async client; each call occupies the calling thread
//! until completion. Concurrency, if wanted, comes from the caller using
//! multiple threads against the shared connection pool.

use std::sync::Arc;

use futures::StreamExt;

use crate::config::ClientConfig;
use crate::error::Error;
use crate::types::{
    ChatResponse, EmbedResponse, GenerateResponse, ModelSummary, PullProgress, RunningModel,
    ShowResponse, VersionResponse,
};
use crate::{BoxStream, Result};

use super::chat::ChatRequest;
use super::core::OllamaClient;
use super::embeddings::EmbedRequest;
use super::generate::GenerateRequest;

/// Blocking client: the async client plus a private single-threaded runtime.
pub struct BlockingClient {
    inner: OllamaClient,
    runtime: Arc<tokio::runtime::Runtime>,
}

impl BlockingClient {
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| Error::Unclassified {
                message: format!("failed to start blocking runtime: {}", e),
                cause: Some(Box::new(e)),
            })?;
        Ok(Self {
            inner: OllamaClient::with_config(config)?,
            runtime: Arc::new(runtime),
        })
    }

    /// The underlying async client, for callers mixing both modes.
    pub fn async_client(&self) -> &OllamaClient {
        &self.inner
    }

    pub fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        self.runtime.block_on(self.inner.chat(request))
    }

    pub fn chat_stream(&self, request: ChatRequest) -> Result<BlockingStream<ChatResponse>> {
        let stream = self.runtime.block_on(self.inner.chat_stream(request))?;
        Ok(BlockingStream::new(stream, self.runtime.clone()))
    }

    pub fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        self.runtime.block_on(self.inner.generate(request))
    }

    pub fn generate_stream(
        &self,
        request: GenerateRequest,
    ) -> Result<BlockingStream<GenerateResponse>> {
        let stream = self.runtime.block_on(self.inner.generate_stream(request))?;
        Ok(BlockingStream::new(stream, self.runtime.clone()))
    }

    pub fn embeddings(&self, request: EmbedRequest) -> Result<EmbedResponse> {
        self.runtime.block_on(self.inner.embeddings(request))
    }

    pub fn embed(&self, text: impl Into<String>) -> Result<Vec<f32>> {
        self.runtime.block_on(self.inner.embed(text))
    }

    pub fn embed_batch(&self, texts: &[impl AsRef<str>]) -> Result<Vec<Vec<f32>>> {
        self.runtime.block_on(self.inner.embed_batch(texts))
    }

    pub fn list_models(&self) -> Result<Vec<ModelSummary>> {
        self.runtime.block_on(self.inner.list_models())
    }

    pub fn show_model(&self, model: &str) -> Result<ShowResponse> {
        self.runtime.block_on(self.inner.show_model(model))
    }

    pub fn copy_model(&self, source: &str, destination: &str) -> Result<()> {
        self.runtime.block_on(self.inner.copy_model(source, destination))
    }

    pub fn delete_model(&self, model: &str) -> Result<()> {
        self.runtime.block_on(self.inner.delete_model(model))
    }

    pub fn pull_model(&self, model: &str) -> Result<PullProgress> {
        self.runtime.block_on(self.inner.pull_model(model))
    }

    pub fn pull_model_stream(&self, model: &str) -> Result<BlockingStream<PullProgress>> {
        let stream = self.runtime.block_on(self.inner.pull_model_stream(model))?;
        Ok(BlockingStream::new(stream, self.runtime.clone()))
    }

    pub fn running_models(&self) -> Result<Vec<RunningModel>> {
        self.runtime.block_on(self.inner.running_models())
    }

    pub fn version(&self) -> Result<VersionResponse> {
        self.runtime.block_on(self.inner.version())
    }

    pub fn is_reachable(&self) -> bool {
        self.runtime.block_on(self.inner.is_reachable())
    }
}

/// Iterator adapter over a streamed response.
///
/// Dropping it early closes the stream and discards the underlying
/// connection, same as dropping the async stream.
pub struct BlockingStream<T> {
    stream: BoxStream<'static, T>,
    runtime: Arc<tokio::runtime::Runtime>,
}

impl<T> BlockingStream<T> {
    fn new(stream: BoxStream<'static, T>, runtime: Arc<tokio::runtime::Runtime>) -> Self {
        Self { stream, runtime }
    }
}

impl<T> Iterator for BlockingStream<T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.runtime.block_on(self.stream.next())
    }
}
