use super::errors::ScoringError;
use super::models::{PlayerRoundScore, WinBreakdown};

/// Which column of a player's score a transfer lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Win,
    Kong,
    Manual,
}

impl Column {
    pub fn name(&self) -> &'static str {
        match self {
            Column::Win => "win_score",
            Column::Kong => "kong_score",
            Column::Manual => "manual_score",
        }
    }
}

#[derive(Debug, Clone, Default)]
struct Entry {
    win: i64,
    kong: i64,
    manual: i64,
    rule_ids: Vec<String>,
    breakdown: Option<WinBreakdown>,
}

impl Entry {
    fn column_mut(&mut self, column: Column) -> &mut i64 {
        match column {
            Column::Win => &mut self.win,
            Column::Kong => &mut self.kong,
            Column::Manual => &mut self.manual,
        }
    }

    fn note(&mut self, rule_ids: &[String]) {
        for id in rule_ids {
            if !self.rule_ids.contains(id) {
                self.rule_ids.push(id.clone());
            }
        }
    }
}

/// Running per-player totals for one round, indexed by player position.
///
/// All arithmetic is checked; an overflow surfaces as [`ScoringError::ScoreOverflow`].
#[derive(Debug, Clone)]
pub struct ScoreLedger {
    names: Vec<String>,
    entries: Vec<Entry>,
}

impl ScoreLedger {
    pub fn new(names: Vec<String>) -> Self {
        let entries = vec![Entry::default(); names.len()];
        Self { names, entries }
    }

    /// Moves `amount` from each payer to `payee`. Every payer is charged the
    /// full amount; the payee collects it once per payer.
    pub fn transfer(
        &mut self,
        column: Column,
        payee: usize,
        payers: &[usize],
        amount: i64,
        rule_ids: &[String],
    ) -> Result<(), ScoringError> {
        if amount == 0 || payers.is_empty() {
            return Ok(());
        }

        let overflow = || ScoringError::ScoreOverflow(column.name().to_string());
        let collected = i64::try_from(payers.len())
            .ok()
            .and_then(|n| amount.checked_mul(n))
            .ok_or_else(overflow)?;

        for &payer in payers {
            self.add(column, payer, -amount)?;
            self.entries[payer].note(rule_ids);
        }
        self.add(column, payee, collected)?;
        self.entries[payee].note(rule_ids);
        Ok(())
    }

    pub fn credit(&mut self, column: Column, player: usize, amount: i64) -> Result<(), ScoringError> {
        self.add(column, player, amount)
    }

    pub fn set_breakdown(&mut self, player: usize, breakdown: WinBreakdown) {
        self.entries[player].breakdown = Some(breakdown);
    }

    pub fn column_sum(&self, column: Column) -> Result<i64, ScoringError> {
        self.entries.iter().try_fold(0i64, |sum, entry| {
            let value = match column {
                Column::Win => entry.win,
                Column::Kong => entry.kong,
                Column::Manual => entry.manual,
            };
            sum.checked_add(value)
                .ok_or_else(|| ScoringError::ScoreOverflow(column.name().to_string()))
        })
    }

    pub fn into_scores(self) -> Result<Vec<PlayerRoundScore>, ScoringError> {
        self.names
            .into_iter()
            .zip(self.entries)
            .map(|(name, entry)| {
                let delta = entry
                    .win
                    .checked_add(entry.kong)
                    .and_then(|sum| sum.checked_add(entry.manual))
                    .ok_or_else(|| ScoringError::ScoreOverflow(format!("delta of {}", name)))?;
                Ok(PlayerRoundScore {
                    name,
                    win_score: entry.win,
                    kong_score: entry.kong,
                    manual_score: entry.manual,
                    delta,
                    applied_rule_ids: entry.rule_ids,
                    win_breakdown: entry.breakdown,
                })
            })
            .collect()
    }

    fn add(&mut self, column: Column, player: usize, amount: i64) -> Result<(), ScoringError> {
        let slot = self.entries[player].column_mut(column);
        *slot = slot
            .checked_add(amount)
            .ok_or_else(|| ScoringError::ScoreOverflow(column.name().to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger() -> ScoreLedger {
        ScoreLedger::new(vec!["a".into(), "b".into(), "c".into()])
    }

    #[test]
    fn transfer_charges_every_payer_in_full() {
        let mut ledger = ledger();
        ledger
            .transfer(Column::Win, 0, &[1, 2], 4, &["hand.pinghu".to_string()])
            .unwrap();

        let scores = ledger.into_scores().unwrap();
        assert_eq!(scores[0].win_score, 8);
        assert_eq!(scores[1].win_score, -4);
        assert_eq!(scores[2].win_score, -4);
        assert!(scores.iter().all(|s| s.applied_rule_ids == vec!["hand.pinghu"]));
    }

    #[test]
    fn zero_amount_leaves_no_trace() {
        let mut ledger = ledger();
        ledger
            .transfer(Column::Kong, 0, &[1], 0, &["event.bu_gang".to_string()])
            .unwrap();
        let scores = ledger.into_scores().unwrap();
        assert!(scores.iter().all(|s| s.applied_rule_ids.is_empty()));
    }

    #[test]
    fn rule_ids_are_not_repeated() {
        let mut ledger = ledger();
        let ids = vec!["event.an_gang".to_string()];
        ledger.transfer(Column::Kong, 0, &[1, 2], 2, &ids).unwrap();
        ledger.transfer(Column::Kong, 0, &[1, 2], 2, &ids).unwrap();

        let scores = ledger.into_scores().unwrap();
        assert_eq!(scores[0].kong_score, 8);
        assert_eq!(scores[0].applied_rule_ids, ids);
    }

    #[test]
    fn delta_sums_columns() {
        let mut ledger = ledger();
        ledger.transfer(Column::Win, 0, &[1], 3, &[]).unwrap();
        ledger.transfer(Column::Kong, 1, &[0], 1, &[]).unwrap();
        ledger.credit(Column::Manual, 0, -5).unwrap();

        let scores = ledger.into_scores().unwrap();
        assert_eq!(scores[0].delta, 3 - 1 - 5);
        assert_eq!(scores[1].delta, -3 + 1);
    }

    #[test]
    fn overflow_is_reported() {
        let mut ledger = ledger();
        let err = ledger
            .transfer(Column::Win, 0, &[1, 2], i64::MAX, &[])
            .unwrap_err();
        assert_eq!(err, ScoringError::ScoreOverflow("win_score".into()));
    }
}
