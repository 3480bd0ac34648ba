//! Model name resolution: aliases, fallbacks, and the advisory
//! embedding-model heuristic.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::config::ClientConfig;

/// Model used by chat/generate calls that do not name one.
pub const DEFAULT_CHAT_MODEL: &str = "llama2";
/// Substitute chat model when the default is unavailable.
pub const FALLBACK_CHAT_MODEL: &str = "mistral";
/// Model used by embedding calls that do not name one.
pub const DEFAULT_EMBEDDING_MODEL: &str = "nomic-embed-text";
/// Substitute embedding model when the default is unavailable.
pub const FALLBACK_EMBEDDING_MODEL: &str = "all-minilm";

static MODEL_ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("llama", "llama2"),
        ("gemma", "gemma:2b"),
        ("qwen", "qwen2.5:0.5b-instruct"),
        ("qwen2", "qwen2.5:0.5b-instruct"),
        ("deepseek", "deepseek-r1:1.5b"),
        ("embed", DEFAULT_EMBEDDING_MODEL),
        ("embedding", DEFAULT_EMBEDDING_MODEL),
        ("chat", DEFAULT_CHAT_MODEL),
    ])
});

/// Resolve a possibly-aliased model name to the canonical name placed in
/// request bodies. Unknown names pass through unchanged.
pub fn resolve_alias(name: &str) -> String {
    MODEL_ALIASES
        .get(name.to_lowercase().as_str())
        .map(|s| s.to_string())
        .unwrap_or_else(|| name.to_string())
}

/// The configured substitute for a model that turned out to be missing.
///
/// Embedding models fall back to the embedding substitute, everything else to
/// the chat substitute. Returns `None` when the requested model already *is*
/// the substitute, so a fallback retry cannot loop.
pub fn fallback_for(model: &str, config: &ClientConfig) -> Option<String> {
    let fallback = if looks_like_embedding_model(model) {
        config.fallback_embedding_model.as_str()
    } else {
        config.fallback_chat_model.as_str()
    };
    if model == fallback {
        None
    } else {
        Some(fallback.to_string())
    }
}

/// Advisory heuristic: does this model name look like an embedding model?
///
/// Used only to pick sensible defaults; an explicit user choice is never
/// blocked by it.
pub fn looks_like_embedding_model(name: &str) -> bool {
    let n = name.to_lowercase();
    ["embed", "minilm", "bge", "e5-"]
        .iter()
        .any(|marker| n.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_resolve_case_insensitively() {
        assert_eq!(resolve_alias("llama"), "llama2");
        assert_eq!(resolve_alias("Embed"), DEFAULT_EMBEDDING_MODEL);
        assert_eq!(resolve_alias("qwen2"), "qwen2.5:0.5b-instruct");
    }

    #[test]
    fn unknown_names_pass_through() {
        assert_eq!(resolve_alias("my-custom:7b"), "my-custom:7b");
    }

    #[test]
    fn fallback_never_loops() {
        let cfg = ClientConfig::default();
        assert_eq!(
            fallback_for("llama2", &cfg).as_deref(),
            Some(FALLBACK_CHAT_MODEL)
        );
        assert_eq!(fallback_for(FALLBACK_CHAT_MODEL, &cfg), None);
        assert_eq!(
            fallback_for("nomic-embed-text", &cfg).as_deref(),
            Some(FALLBACK_EMBEDDING_MODEL)
        );
    }

    #[test]
    fn embedding_heuristic() {
        assert!(looks_like_embedding_model("nomic-embed-text"));
        assert!(looks_like_embedding_model("all-minilm"));
        assert!(looks_like_embedding_model("bge-large"));
        assert!(!looks_like_embedding_model("llama2"));
        assert!(!looks_like_embedding_model("mistral"));
    }
}
