pub mod errors;
pub mod indexed;
pub mod models;

pub use errors::RulesetError;
pub use indexed::{Factor, FactorEffect, HandType, Ruleset, BUNDLED_RULESET_JSON};
pub use models::{FactorKind, KongPoints, KongType, LocalizedText, RulesetDocument};
