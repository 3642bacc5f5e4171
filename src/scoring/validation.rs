use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use super::errors::ScoringError;
use super::models::{FactorValue, KongEventInput, PlayerRoundInput};
use crate::ruleset::{Factor, FactorKind, HandType, KongType, Ruleset};

pub const MIN_PLAYERS: usize = 3;
pub const MAX_PLAYERS: usize = 4;
/// Bound on a single manual correction.
pub const MANUAL_DELTA_LIMIT: i64 = 1_000_000;

/// A round whose names, ids and payer lists have all been resolved.
///
/// Players are referred to by their position in the input list.
#[derive(Debug, Clone)]
pub struct Round<'r> {
    pub players: Vec<String>,
    pub wins: Vec<WinClaim<'r>>,
    pub kongs: Vec<KongClaim>,
    pub manual_deltas: Vec<i64>,
}

#[derive(Debug, Clone)]
pub struct WinClaim<'r> {
    pub winner: usize,
    pub hand: &'r HandType,
    pub factors: Vec<(&'r Factor, FactorValue)>,
    pub payers: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KongClaim {
    pub declarer: usize,
    pub kong_type: KongType,
    pub payers: Vec<usize>,
}

/// Payers as named by the caller, before resolution to indices.
enum PayerSpec<'a> {
    Single(&'a str),
    Many(&'a [String]),
}

impl<'a> PayerSpec<'a> {
    fn names(&self) -> Vec<&'a str> {
        match self {
            PayerSpec::Single(name) => vec![*name],
            PayerSpec::Many(names) => names.iter().map(String::as_str).collect(),
        }
    }
}

/// Checks every reference and policy in the round before anything is scored.
pub fn validate_round<'r>(
    ruleset: &'r Ruleset,
    inputs: &[PlayerRoundInput],
) -> Result<Round<'r>, ScoringError> {
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&inputs.len()) {
        return Err(ScoringError::InvalidPlayerCount(inputs.len()));
    }

    let mut index: HashMap<&str, usize> = HashMap::with_capacity(inputs.len());
    for (position, input) in inputs.iter().enumerate() {
        if index.insert(input.name.as_str(), position).is_some() {
            return Err(ScoringError::DuplicatePlayer(input.name.clone()));
        }
    }
    let resolver = Resolver { inputs, index };

    let mut wins = Vec::new();
    let mut kongs = Vec::new();
    let mut manual_deltas = Vec::with_capacity(inputs.len());

    for (position, input) in inputs.iter().enumerate() {
        if let Some(hand_id) = input.winning_hand() {
            wins.push(resolver.win_claim(ruleset, position, hand_id)?);
        }

        for event in &input.kong_events {
            kongs.push(resolver.kong_claim(position, event)?);
        }

        if !(-MANUAL_DELTA_LIMIT..=MANUAL_DELTA_LIMIT).contains(&input.manual_delta) {
            return Err(ScoringError::ManualDeltaOutOfRange {
                player: input.name.clone(),
                value: input.manual_delta,
                limit: MANUAL_DELTA_LIMIT,
            });
        }
        manual_deltas.push(input.manual_delta);
    }

    if wins.len() > 1 && wins.iter().any(|win| !win.hand.allow_concurrent_win) {
        return Err(ScoringError::MultipleWinnersUnsupported {
            players: wins.iter().map(|w| inputs[w.winner].name.clone()).collect(),
            hand_type_ids: wins.iter().map(|w| w.hand.id.clone()).collect(),
        });
    }

    Ok(Round {
        players: inputs.iter().map(|input| input.name.clone()).collect(),
        wins,
        kongs,
        manual_deltas,
    })
}

struct Resolver<'i> {
    inputs: &'i [PlayerRoundInput],
    index: HashMap<&'i str, usize>,
}

impl<'i> Resolver<'i> {
    fn name(&self, position: usize) -> &'i str {
        &self.inputs[position].name
    }

    fn win_claim<'r>(
        &self,
        ruleset: &'r Ruleset,
        winner: usize,
        hand_id: &str,
    ) -> Result<WinClaim<'r>, ScoringError> {
        let input = &self.inputs[winner];
        let hand = ruleset
            .hand(hand_id)
            .ok_or_else(|| ScoringError::UnknownHandType {
                player: input.name.clone(),
                hand_type_id: hand_id.to_string(),
            })?;

        let spec = payer_spec(&input.name, "win", &input.payer_name, &input.payer_names)?;
        let payers = if hand.all_pay {
            // Validate what the caller sent before replacing it.
            let requested = match &spec {
                Some(spec) => self.resolve_payers(winner, spec)?,
                None => Vec::new(),
            };
            let everyone_else: Vec<usize> = (0..self.inputs.len()).filter(|&p| p != winner).collect();
            if !requested.is_empty() && !same_members(&requested, &everyone_else) {
                warn!(
                    player = %input.name,
                    hand_type_id = %hand.id,
                    requested = ?requested.iter().map(|&p| self.name(p)).collect::<Vec<_>>(),
                    "All-pay hand overrides the requested payers"
                );
            }
            everyone_else
        } else {
            let spec = spec.ok_or_else(|| ScoringError::MissingPayer {
                player: input.name.clone(),
                context: "win".to_string(),
            })?;
            self.resolve_payers(winner, &spec)?
        };

        let factors = resolve_factors(ruleset, input, hand)?;

        Ok(WinClaim {
            winner,
            hand,
            factors,
            payers,
        })
    }

    fn kong_claim(&self, declarer: usize, event: &KongEventInput) -> Result<KongClaim, ScoringError> {
        let player = self.name(declarer);
        let context = event.kong_type.to_string();

        if event.kong_type.takes_single_payer() && !event.payer_names.is_empty() {
            return Err(ScoringError::KongPayerShape {
                player: player.to_string(),
                kong_type: event.kong_type,
            });
        }

        let spec = payer_spec(player, &context, &event.payer_name, &event.payer_names)?
            .ok_or_else(|| ScoringError::MissingPayer {
                player: player.to_string(),
                context: context.clone(),
            })?;

        Ok(KongClaim {
            declarer,
            kong_type: event.kong_type,
            payers: self.resolve_payers(declarer, &spec)?,
        })
    }

    fn resolve_payers(&self, payee: usize, spec: &PayerSpec<'_>) -> Result<Vec<usize>, ScoringError> {
        let player = self.name(payee);
        let mut seen = HashSet::new();
        let mut payers = Vec::new();

        for name in spec.names() {
            let position = *self.index.get(name).ok_or_else(|| {
                ScoringError::UnknownPlayerReference {
                    player: player.to_string(),
                    payer: name.to_string(),
                }
            })?;
            if position == payee {
                return Err(ScoringError::SelfPayment(player.to_string()));
            }
            if !seen.insert(position) {
                return Err(ScoringError::DuplicatePayer {
                    player: player.to_string(),
                    payer: name.to_string(),
                });
            }
            payers.push(position);
        }
        Ok(payers)
    }
}

fn payer_spec<'a>(
    player: &str,
    context: &str,
    payer_name: &'a Option<String>,
    payer_names: &'a [String],
) -> Result<Option<PayerSpec<'a>>, ScoringError> {
    match (payer_name.as_deref(), payer_names.is_empty()) {
        (Some(_), false) => Err(ScoringError::ConflictingPayers {
            player: player.to_string(),
            context: context.to_string(),
        }),
        (Some(name), true) => Ok(Some(PayerSpec::Single(name))),
        (None, false) => Ok(Some(PayerSpec::Many(payer_names))),
        (None, true) => Ok(None),
    }
}

fn same_members(a: &[usize], b: &[usize]) -> bool {
    a.iter().collect::<HashSet<_>>() == b.iter().collect::<HashSet<_>>()
}

fn resolve_factors<'r>(
    ruleset: &'r Ruleset,
    input: &PlayerRoundInput,
    hand: &HandType,
) -> Result<Vec<(&'r Factor, FactorValue)>, ScoringError> {
    let self_draw = ruleset.self_draw_factor();
    let mut factors = Vec::with_capacity(input.factor_values.len());

    for (id, value) in &input.factor_values {
        let factor = ruleset
            .factor(id)
            .ok_or_else(|| ScoringError::UnknownFactor {
                player: input.name.clone(),
                factor: id.clone(),
            })?;

        let value = normalize(&input.name, factor, *value)?;

        if hand.all_pay && Some(id.as_str()) == self_draw {
            if value.is_set() {
                warn!(
                    player = %input.name,
                    hand_type_id = %hand.id,
                    factor = %id,
                    "All-pay hand ignores the self-draw factor"
                );
            }
            continue;
        }
        if !value.is_set() {
            continue;
        }

        debug!(player = %input.name, factor = %id, ?value, "Factor applied");
        factors.push((factor, value));
    }
    Ok(factors)
}

/// Coerces a value to the factor's kind: counts for countable factors, flags for boolean ones.
fn normalize(player: &str, factor: &Factor, value: FactorValue) -> Result<FactorValue, ScoringError> {
    let invalid = |reason: &str| ScoringError::InvalidFactorValue {
        player: player.to_string(),
        factor: factor.id.clone(),
        reason: reason.to_string(),
    };

    match (factor.kind, value) {
        (FactorKind::Boolean, FactorValue::Flag(_)) => Ok(value),
        (FactorKind::Boolean, FactorValue::Count(0 | 1)) => Ok(FactorValue::Flag(value.is_set())),
        (FactorKind::Boolean, FactorValue::Count(_)) => Err(invalid("boolean factor takes true/false")),
        (FactorKind::Countable, FactorValue::Count(count)) if count < 0 => {
            Err(invalid("count must not be negative"))
        }
        (FactorKind::Countable, FactorValue::Count(_)) => Ok(value),
        (FactorKind::Countable, FactorValue::Flag(flag)) => Ok(FactorValue::Count(flag as i64)),
    }
}
