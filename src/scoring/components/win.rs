use tracing::debug;

use super::{component_priority, ScoreComponent};
use crate::ruleset::{Factor, FactorEffect, Ruleset};
use crate::scoring::errors::ScoringError;
use crate::scoring::ledger::{Column, ScoreLedger};
use crate::scoring::models::{AppliedFactor, FactorValue, WinBreakdown};
use crate::scoring::validation::{Round, WinClaim};

/// Settles every win in the round: the payer side of each transfer is charged
/// the hand's full per-payer score.
#[derive(Debug, Default)]
pub struct WinComponent;

impl WinComponent {
    pub fn new() -> Self {
        Self
    }
}

impl ScoreComponent for WinComponent {
    fn apply(
        &self,
        _ruleset: &Ruleset,
        round: &Round<'_>,
        ledger: &mut ScoreLedger,
    ) -> Result<(), ScoringError> {
        for claim in &round.wins {
            let breakdown = win_breakdown(claim)?;

            let mut rule_ids = vec![claim.hand.id.clone()];
            rule_ids.extend(
                breakdown
                    .factors
                    .iter()
                    .filter(|f| f.applied_multiplier != 1)
                    .map(|f| f.id.clone()),
            );

            debug!(
                winner = %round.players[claim.winner],
                hand_type_id = %claim.hand.id,
                score = breakdown.total_multiplier,
                payers = claim.payers.len(),
                "Win settled"
            );
            ledger.transfer(
                Column::Win,
                claim.winner,
                &claim.payers,
                breakdown.total_multiplier,
                &rule_ids,
            )?;
            ledger.set_breakdown(claim.winner, breakdown);
        }
        Ok(())
    }

    fn priority(&self) -> u32 {
        component_priority::WIN
    }
}

/// Per-payer score of a win: the base multiplier scaled by every active factor.
pub fn win_breakdown(claim: &WinClaim<'_>) -> Result<WinBreakdown, ScoringError> {
    let overflow = || ScoringError::ScoreOverflow(format!("multiplier of {}", claim.hand.id));

    let mut total = claim.hand.base_multiplier;
    let mut factors = Vec::with_capacity(claim.factors.len());
    for (factor, value) in &claim.factors {
        let applied = factor_multiplier(factor, *value).ok_or_else(overflow)?;
        total = total.checked_mul(applied).ok_or_else(overflow)?;
        factors.push(AppliedFactor {
            id: factor.id.clone(),
            value: *value,
            applied_multiplier: applied,
        });
    }

    Ok(WinBreakdown {
        hand_id: claim.hand.id.clone(),
        base_multiplier: claim.hand.base_multiplier,
        factors,
        total_multiplier: total,
    })
}

fn factor_multiplier(factor: &Factor, value: FactorValue) -> Option<i64> {
    match (factor.effect, value) {
        (_, value) if !value.is_set() => Some(1),
        (FactorEffect::Multiply { multiplier }, _) => Some(multiplier),
        (
            FactorEffect::Repeat {
                multiplier_each,
                max_count,
            },
            FactorValue::Count(count),
        ) => {
            if count > i64::from(max_count) {
                debug!(factor = %factor.id, count, max_count, "Factor count clamped");
            }
            let exponent = u32::try_from(count.clamp(0, i64::from(max_count))).ok()?;
            multiplier_each.checked_pow(exponent)
        }
        (FactorEffect::Repeat { multiplier_each, .. }, FactorValue::Flag(_)) => {
            Some(multiplier_each)
        }
    }
}
