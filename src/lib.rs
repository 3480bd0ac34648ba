//! # ollama-client
//!
//! Client library for locally-hosted Ollama-compatible inference servers,
//! exposing chat, text generation and embeddings — one-shot and streamed —
//! over a single pooled, retrying transport.
//!
//! ## Overview
//!
//! The hard part of talking to a local inference server is not the JSON, it
//! is behaving well when the server is slow, flaky, or mid-stream: this crate
//! centers on connection reuse, retry/backoff for transient failures,
//! incremental NDJSON decoding, inactivity-guarded streams, and a closed
//! typed error taxonomy that tells callers exactly what went wrong and
//! whether a retry is safe.
//!
//! ## Key features
//!
//! - **Dual execution modes**: async [`OllamaClient`] and a semantics-identical
//!   [`BlockingClient`] sharing one transport design
//! - **Streaming-first**: streamed responses are lazy, finite sequences that
//!   own their connection until drained or dropped
//! - **Typed errors**: every failure surfaces as exactly one [`Error`]
//!   variant, classified once at its origin
//! - **Explicit configuration**: all knobs live in [`ClientConfig`]; no
//!   hidden global state
//! - **Model helpers**: alias resolution, opt-in missing-model fallback, and
//!   vector utilities for embedding results
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use ollama_client::{ChatRequest, Message, OllamaClient};
//!
//! #[tokio::main]
//! async fn main() -> ollama_client::Result<()> {
//!     let client = OllamaClient::new()?;
//!
//!     let response = client
//!         .chat(ChatRequest::new(vec![Message::user("Why is the sky blue?")])
//!             .model("llama2"))
//!         .await?;
//!     println!("{}", response.content());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Module organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Endpoint façade: chat, generate, embeddings, model management, blocking mode |
//! | [`transport`] | Connection pooling, retry/backoff, request execution |
//! | [`pipeline`] | NDJSON stream decoding and inactivity guarding |
//! | [`types`] | Typed wire structures |
//! | [`registry`] | Model aliases, fallbacks, embedding-model heuristic |
//! | [`config`] | Client configuration |
//! | [`vectors`] | Vector math for embedding results |

pub(crate) mod cache;
pub mod client;
pub mod config;
pub mod pipeline;
pub mod registry;
pub mod transport;
pub mod types;
pub mod vectors;

// Re-export main types for convenience
pub use client::{
    BlockingClient, BlockingStream, ChatRequest, EmbedRequest, GenerateRequest, OllamaClient,
};
pub use config::ClientConfig;
pub use types::{
    ChatResponse, EmbedResponse, GenerateResponse, Message, MessageRole, ModelOptions,
    ModelSummary, PullProgress, ShowResponse, VersionResponse,
};

use futures::Stream;
use std::pin::Pin;

/// Result type alias for the library.
pub type Result<T> = std::result::Result<T, Error>;

/// A pinned, boxed stream of fallible items.
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = Result<T>> + Send + 'a>>;

/// Error type for the library.
pub mod error;
pub use error::Error;
