use serde::{Deserialize, Serialize};

use crate::scoring::{PlayerRoundInput, PlayerRoundScore};

/// A scoreboard entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub score: i64,
}

/// Request payload for settling one round against the current scoreboard
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RuleBasedScoreRoundRequest {
    pub players: Vec<Player>,
    #[serde(default)]
    pub player_rounds: Vec<PlayerRoundInput>,
}

/// Updated scoreboard plus each player's breakdown for the round
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RuleBasedScoreRoundResponse {
    pub players: Vec<Player>,
    pub player_scores: Vec<PlayerRoundScore>,
}
