// Public API - what other modules can use
pub use aggregator::apply;
pub use errors::SettlementError;
pub use handlers::score_round_rule_based;
pub use service::SettlementService;
pub use types::{Player, RuleBasedScoreRoundRequest, RuleBasedScoreRoundResponse};

// Internal modules
mod aggregator;
mod errors;
mod handlers;
mod service;
mod types;
