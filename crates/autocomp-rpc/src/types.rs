//! Common RPC types
//!
//! Search queries and responses travel as the search crate's own types; only
//! the calls without a natural search type get one here.

use serde::{Deserialize, Serialize};

/// Request for typeahead suggestions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestRequest {
    pub text: String,

    /// Maximum suggestions (server default when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

/// Response after a forced rebuild
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReindexResponse {
    /// Documents in the new index
    pub documents: usize,
    pub took_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggest_request_limit_is_optional() {
        let request: SuggestRequest = serde_json::from_str(r#"{"text": "electric suv"}"#).unwrap();
        assert_eq!(request.text, "electric suv");
        assert_eq!(request.limit, None);

        let json = serde_json::to_value(SuggestRequest {
            text: "camry".into(),
            limit: Some(3),
        })
        .unwrap();
        assert_eq!(json["limit"], 3);
    }
}
