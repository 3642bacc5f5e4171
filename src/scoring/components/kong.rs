use tracing::debug;

use super::{component_priority, ScoreComponent};
use crate::ruleset::Ruleset;
use crate::scoring::errors::ScoringError;
use crate::scoring::ledger::{Column, ScoreLedger};
use crate::scoring::validation::Round;

/// Prices each kong from the ruleset's fixed-point table. Win factors never
/// touch these transfers.
#[derive(Debug, Default)]
pub struct KongComponent;

impl KongComponent {
    pub fn new() -> Self {
        Self
    }
}

impl ScoreComponent for KongComponent {
    fn apply(
        &self,
        ruleset: &Ruleset,
        round: &Round<'_>,
        ledger: &mut ScoreLedger,
    ) -> Result<(), ScoringError> {
        for claim in &round.kongs {
            let points = ruleset.kong_points(claim.kong_type);
            debug!(
                declarer = %round.players[claim.declarer],
                kong_type = %claim.kong_type,
                points,
                payers = claim.payers.len(),
                "Kong settled"
            );
            ledger.transfer(
                Column::Kong,
                claim.declarer,
                &claim.payers,
                points,
                &[claim.kong_type.rule_id()],
            )?;
        }
        Ok(())
    }

    fn priority(&self) -> u32 {
        component_priority::KONG
    }
}
