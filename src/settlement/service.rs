use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::aggregator::apply;
use super::errors::SettlementError;
use super::types::{Player, RuleBasedScoreRoundRequest, RuleBasedScoreRoundResponse};
use crate::ruleset::Ruleset;
use crate::scoring::{PlayerRoundInput, ScoreEngine};

/// Settles a round against the scoreboard it was played from.
pub struct SettlementService {
    ruleset: Arc<Ruleset>,
    engine: Arc<ScoreEngine>,
}

impl SettlementService {
    pub fn new(ruleset: Arc<Ruleset>, engine: Arc<ScoreEngine>) -> Self {
        Self { ruleset, engine }
    }

    #[instrument(skip_all, fields(players = request.players.len()))]
    pub fn score_round(
        &self,
        request: RuleBasedScoreRoundRequest,
    ) -> Result<RuleBasedScoreRoundResponse, SettlementError> {
        let RuleBasedScoreRoundRequest {
            players,
            player_rounds,
        } = request;

        let inputs = roster_inputs(&players, player_rounds)?;
        let player_scores = self.engine.settle(&self.ruleset, &inputs)?;

        let totals: HashMap<String, i64> = players
            .iter()
            .map(|p| (p.name.clone(), p.score))
            .collect();
        let updated = apply(&totals, &player_scores)?;

        let players: Vec<Player> = players
            .into_iter()
            .map(|player| {
                let score = updated.get(&player.name).copied().unwrap_or(player.score);
                Player {
                    name: player.name,
                    score,
                }
            })
            .collect();

        info!(
            deltas = ?player_scores.iter().map(|s| s.delta).collect::<Vec<_>>(),
            "Round scored"
        );

        Ok(RuleBasedScoreRoundResponse {
            players,
            player_scores,
        })
    }
}

/// One input per scoreboard player, in scoreboard order. Players without an
/// entry sit the round out with an empty input.
fn roster_inputs(
    players: &[Player],
    player_rounds: Vec<PlayerRoundInput>,
) -> Result<Vec<PlayerRoundInput>, SettlementError> {
    let mut names = HashSet::with_capacity(players.len());
    for player in players {
        if !names.insert(player.name.as_str()) {
            return Err(SettlementError::DuplicatePlayer(player.name.clone()));
        }
    }

    let mut by_name: HashMap<String, PlayerRoundInput> = HashMap::with_capacity(player_rounds.len());
    for input in player_rounds {
        if !names.contains(input.name.as_str()) {
            return Err(SettlementError::UnknownPlayer(input.name));
        }
        if by_name.contains_key(&input.name) {
            return Err(SettlementError::DuplicatePlayer(input.name));
        }
        by_name.insert(input.name.clone(), input);
    }

    Ok(players
        .iter()
        .map(|player| {
            by_name.remove(&player.name).unwrap_or_else(|| {
                debug!(player = %player.name, "No round input, using an empty one");
                PlayerRoundInput::new(player.name.clone())
            })
        })
        .collect())
}
