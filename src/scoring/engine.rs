use std::sync::Arc;

use tracing::{debug, error, instrument};

use super::components::{KongComponent, ManualComponent, ScoreComponent, WinComponent};
use super::errors::ScoringError;
use super::ledger::{Column, ScoreLedger};
use super::models::{PlayerRoundInput, PlayerRoundScore};
use super::validation::validate_round;
use crate::ruleset::Ruleset;

/// Turns a round's symbolic inputs into per-player score deltas.
///
/// The engine holds no state between calls; the ruleset is passed in on every
/// call so one engine can serve any number of concurrent rounds.
pub struct ScoreEngine {
    components: Vec<Arc<dyn ScoreComponent>>,
}

impl Default for ScoreEngine {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ScoreEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> ScoreEngineBuilder {
        ScoreEngineBuilder::new()
    }

    /// Scores one round. Every input is validated before any score is computed,
    /// so a failure never yields partial results.
    #[instrument(skip_all, fields(players = inputs.len()))]
    pub fn settle(
        &self,
        ruleset: &Ruleset,
        inputs: &[PlayerRoundInput],
    ) -> Result<Vec<PlayerRoundScore>, ScoringError> {
        let round = validate_round(ruleset, inputs)?;
        let mut ledger = ScoreLedger::new(round.players.clone());

        for component in &self.components {
            component.apply(ruleset, &round, &mut ledger)?;
        }

        for column in [Column::Win, Column::Kong] {
            let sum = ledger.column_sum(column)?;
            if sum != 0 {
                error!(component = column.name(), sum, "Round does not balance");
                return Err(ScoringError::UnbalancedRound {
                    component: column.name(),
                    sum,
                });
            }
        }

        let scores = ledger.into_scores()?;
        debug!(
            wins = round.wins.len(),
            kongs = round.kongs.len(),
            "Round settled"
        );
        Ok(scores)
    }
}

pub struct ScoreEngineBuilder {
    components: Vec<Arc<dyn ScoreComponent>>,
}

impl ScoreEngineBuilder {
    fn new() -> Self {
        Self {
            components: vec![
                Arc::new(WinComponent::new()),
                Arc::new(KongComponent::new()),
                Arc::new(ManualComponent::new()),
            ],
        }
    }

    pub fn with_component(mut self, component: Arc<dyn ScoreComponent>) -> Self {
        self.components.push(component);
        self
    }

    pub fn build(mut self) -> ScoreEngine {
        self.components.sort_by_key(|c| c.priority());
        ScoreEngine {
            components: self.components,
        }
    }
}

/// Scores one round with the default components.
pub fn settle(
    ruleset: &Ruleset,
    inputs: &[PlayerRoundInput],
) -> Result<Vec<PlayerRoundScore>, ScoringError> {
    ScoreEngine::default().settle(ruleset, inputs)
}
