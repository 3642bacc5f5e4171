use thiserror::Error;

use super::models::KongType;

#[derive(Debug, Error)]
pub enum RulesetError {
    #[error("Failed to read ruleset {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse ruleset JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Ruleset declares no hand types")]
    NoHandTypes,

    #[error("Duplicate rule id: {0}")]
    DuplicateId(String),

    #[error("Rule id must not be empty")]
    EmptyId,

    #[error("Invalid base_multiplier {value} for hand {id}")]
    InvalidBaseMultiplier { id: String, value: i64 },

    #[error("Invalid factor {id}: {reason}")]
    InvalidFactor { id: String, reason: String },

    #[error("Negative kong points for {0}")]
    NegativeKongPoints(KongType),

    #[error("self_draw_factor {0} does not name a boolean factor")]
    UnknownSelfDrawFactor(String),
}
