use super::{component_priority, ScoreComponent};
use crate::ruleset::Ruleset;
use crate::scoring::errors::ScoringError;
use crate::scoring::ledger::{Column, ScoreLedger};
use crate::scoring::validation::Round;

/// Copies each player's manual correction into its own column, unbalanced.
#[derive(Debug, Default)]
pub struct ManualComponent;

impl ManualComponent {
    pub fn new() -> Self {
        Self
    }
}

impl ScoreComponent for ManualComponent {
    fn apply(
        &self,
        _ruleset: &Ruleset,
        round: &Round<'_>,
        ledger: &mut ScoreLedger,
    ) -> Result<(), ScoringError> {
        for (player, &delta) in round.manual_deltas.iter().enumerate() {
            ledger.credit(Column::Manual, player, delta)?;
        }
        Ok(())
    }

    fn priority(&self) -> u32 {
        component_priority::MANUAL
    }
}
