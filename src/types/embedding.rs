//! Embedding responses.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Batch embedding response. Vectors are returned in input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedResponse {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub embeddings: Vec<Vec<f32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_duration: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_eval_count: Option<u64>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_response_keeps_vector_order() {
        let raw = r#"{"model":"e","embeddings":[[1.0,0.0],[0.0,1.0]]}"#;
        let resp: EmbedResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.embeddings.len(), 2);
        assert_eq!(resp.embeddings[0], vec![1.0, 0.0]);
        assert_eq!(resp.embeddings[1], vec![0.0, 1.0]);
    }
}
