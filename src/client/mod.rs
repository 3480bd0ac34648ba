//! Client façade: one request builder + execution path per logical operation.

pub mod blocking;
pub mod chat;
pub mod core;
pub mod embeddings;
pub mod generate;
pub mod models;

pub use blocking::{BlockingClient, BlockingStream};
pub use chat::ChatRequest;
pub use core::OllamaClient;
pub use embeddings::EmbedRequest;
pub use generate::GenerateRequest;
