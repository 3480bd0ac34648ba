//! Text-generation responses.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One generate response; streamed chunks carry a partial `response` and
/// `done: false`, the terminal record the cumulative counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default)]
    pub response: String,
    pub done: bool,
    /// Conversation context handle for follow-up calls.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_duration: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eval_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eval_duration: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_eval_count: Option<u64>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn streamed_chunk_parses_without_counters() {
        let raw = r#"{"model":"m","response":"par","done":false}"#;
        let chunk: GenerateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(chunk.response, "par");
        assert!(!chunk.done);
        assert!(chunk.eval_count.is_none());
    }
}
