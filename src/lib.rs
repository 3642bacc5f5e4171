// Library crate for the Sichuan Mahjong hand checker and round settlement server
// This file exposes the public API for the binary and integration tests

pub mod config;
pub mod hand;
pub mod rules;
pub mod ruleset;
pub mod scoring;
pub mod settlement;
pub mod shared;
pub mod tiles;

use axum::{
    routing::{get, post},
    Router,
};

// Re-export commonly used types for easier access in tests
pub use hand::{HandError, HandValidator};
pub use ruleset::Ruleset;
pub use scoring::{settle, PlayerRoundInput, PlayerRoundScore, ScoreEngine, ScoringError};
pub use settlement::{apply, SettlementError};
pub use shared::{AppError, AppState};
pub use tiles::{Suit, Tile};

/// Every JSON route, without middleware.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "Sichuan Mahjong scoring service" }))
        .route("/api/tiles", get(tiles::list_tiles))
        .route("/api/rules", get(rules::list_rules))
        .route("/api/rules/basics", get(rules::list_basic_rules))
        .route("/api/rules/search", post(rules::search_rules))
        .route("/api/ruleset", get(rules::get_ruleset))
        .route("/api/check_hand", post(hand::check_hand))
        .route(
            "/api/score_round_rule_based",
            post(settlement::score_round_rule_based),
        )
        .with_state(state)
}
