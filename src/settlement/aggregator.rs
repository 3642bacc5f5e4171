use std::collections::HashMap;

use super::errors::SettlementError;
use crate::scoring::PlayerRoundScore;

/// Adds each round delta to the matching running total.
///
/// Every delta is checked before anything is merged, so an error leaves the
/// caller's totals as they were. Zero-sum is not re-checked here.
pub fn apply(
    totals: &HashMap<String, i64>,
    deltas: &[PlayerRoundScore],
) -> Result<HashMap<String, i64>, SettlementError> {
    let mut updated = totals.clone();
    for score in deltas {
        let total = updated
            .get_mut(&score.name)
            .ok_or_else(|| SettlementError::UnknownPlayer(score.name.clone()))?;
        *total = total
            .checked_add(score.delta)
            .ok_or_else(|| SettlementError::ScoreOverflow(score.name.clone()))?;
    }
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delta(name: &str, delta: i64) -> PlayerRoundScore {
        PlayerRoundScore {
            name: name.to_string(),
            delta,
            ..Default::default()
        }
    }

    fn totals(entries: &[(&str, i64)]) -> HashMap<String, i64> {
        entries.iter().map(|(n, s)| (n.to_string(), *s)).collect()
    }

    #[test]
    fn adds_deltas_to_totals() {
        let before = totals(&[("a", 10), ("b", 0), ("c", -3)]);
        let after = apply(&before, &[delta("a", 4), delta("c", -4)]).unwrap();

        assert_eq!(after, totals(&[("a", 14), ("b", 0), ("c", -7)]));
        assert_eq!(before["a"], 10);
    }

    #[test]
    fn unknown_player_is_rejected() {
        let before = totals(&[("a", 0)]);
        assert_eq!(
            apply(&before, &[delta("a", 1), delta("z", 1)]),
            Err(SettlementError::UnknownPlayer("z".into()))
        );
    }

    #[test]
    fn applying_in_two_steps_matches_one_step() {
        let before = totals(&[("a", 5), ("b", 5), ("c", 5)]);
        let first = vec![delta("a", 2), delta("b", -2)];
        let second = vec![delta("b", 6), delta("c", -6), delta("a", 1)];

        let stepwise = apply(&apply(&before, &first).unwrap(), &second).unwrap();
        let combined: Vec<_> = first.into_iter().chain(second).collect();
        assert_eq!(stepwise, apply(&before, &combined).unwrap());
    }

    #[test]
    fn overflow_is_reported() {
        let before = totals(&[("a", i64::MAX)]);
        assert_eq!(
            apply(&before, &[delta("a", 1)]),
            Err(SettlementError::ScoreOverflow("a".into()))
        );
    }
}
