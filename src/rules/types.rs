use serde::{Deserialize, Serialize};

/// Request payload for keyword rule search
#[derive(Debug, Deserialize)]
pub struct RuleSearchRequest {
    pub query: String,
}

/// Matching rule ids, most relevant first
#[derive(Debug, Serialize, Deserialize)]
pub struct RuleSearchResponse {
    pub rule_ids: Vec<String>,
}
