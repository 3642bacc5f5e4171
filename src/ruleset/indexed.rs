use std::collections::{HashMap, HashSet};
use std::path::Path;

use tracing::{info, instrument};

use super::errors::RulesetError;
use super::models::{
    FactorKind, FactorSpec, HandSpec, KongPoints, KongType, LocalizedText, RulesetDocument,
};

const DEFAULT_FACTOR_MULTIPLIER: i64 = 2;
const DEFAULT_MAX_COUNT: u32 = 4;
const REPEAT_MODE: &str = "repeat";

/// Ruleset shipped with the crate, used when no path is configured and in tests.
pub const BUNDLED_RULESET_JSON: &str = include_str!("../../data/rules_winning.json");

/// How a factor scales the hand's base multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactorEffect {
    /// Applied once when the flag is set.
    Multiply { multiplier: i64 },
    /// `multiplier_each` raised to the count, with the count clamped to `max_count`.
    Repeat { multiplier_each: i64, max_count: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandType {
    pub id: String,
    pub name: LocalizedText,
    pub description: Option<LocalizedText>,
    pub base_multiplier: i64,
    pub all_pay: bool,
    pub allow_concurrent_win: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Factor {
    pub id: String,
    pub name: LocalizedText,
    pub description: Option<LocalizedText>,
    pub kind: FactorKind,
    pub effect: FactorEffect,
}

impl Factor {
    /// The per-application multiplier, as shown in rule listings.
    pub fn unit_multiplier(&self) -> i64 {
        match self.effect {
            FactorEffect::Multiply { multiplier } => multiplier,
            FactorEffect::Repeat {
                multiplier_each, ..
            } => multiplier_each,
        }
    }
}

/// Immutable, indexed view of a validated ruleset document.
///
/// Built once at startup and shared by reference; nothing mutates it afterwards.
#[derive(Debug, Clone)]
pub struct Ruleset {
    document: serde_json::Value,
    hands: Vec<HandType>,
    hands_by_id: HashMap<String, usize>,
    factors: Vec<Factor>,
    factors_by_id: HashMap<String, usize>,
    kong_points: KongPoints,
    self_draw_factor: Option<String>,
    kong_post_win_exempt: bool,
}

impl Ruleset {
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RulesetError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| RulesetError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let ruleset = Self::from_json_str(&raw)?;

        info!(
            hands = ruleset.hands.len(),
            factors = ruleset.factors.len(),
            "Ruleset loaded"
        );
        Ok(ruleset)
    }

    pub fn bundled() -> Result<Self, RulesetError> {
        Self::from_json_str(BUNDLED_RULESET_JSON)
    }

    pub fn from_json_str(json: &str) -> Result<Self, RulesetError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    pub fn from_value(document: serde_json::Value) -> Result<Self, RulesetError> {
        let parsed: RulesetDocument = serde_json::from_value(document.clone())?;
        Self::build(document, parsed)
    }

    fn build(document: serde_json::Value, parsed: RulesetDocument) -> Result<Self, RulesetError> {
        if parsed.hands.is_empty() {
            return Err(RulesetError::NoHandTypes);
        }

        let mut seen = HashSet::new();
        let mut claim_id = |id: &str| -> Result<(), RulesetError> {
            if id.is_empty() {
                return Err(RulesetError::EmptyId);
            }
            if !seen.insert(id.to_string()) {
                return Err(RulesetError::DuplicateId(id.to_string()));
            }
            Ok(())
        };

        let mut hands = Vec::with_capacity(parsed.hands.len());
        for spec in parsed.hands {
            claim_id(&spec.id)?;
            hands.push(hand_type(spec)?);
        }

        let mut factors = Vec::with_capacity(parsed.multipliers.factors.len());
        for spec in parsed.multipliers.factors {
            claim_id(&spec.id)?;
            factors.push(factor(spec)?);
        }

        let kong_points = parsed.settlement.kong_points;
        for kong_type in [KongType::DianGang, KongType::BuGang, KongType::AnGang] {
            if kong_points.get(kong_type) < 0 {
                return Err(RulesetError::NegativeKongPoints(kong_type));
            }
        }

        let hands_by_id = index_by_id(hands.iter().map(|h| h.id.as_str()));
        let factors_by_id = index_by_id(factors.iter().map(|f| f.id.as_str()));

        if let Some(id) = &parsed.settlement.self_draw_factor {
            let is_boolean = factors_by_id
                .get(id)
                .map(|&i| factors[i].kind == FactorKind::Boolean)
                .unwrap_or(false);
            if !is_boolean {
                return Err(RulesetError::UnknownSelfDrawFactor(id.clone()));
            }
        }

        Ok(Self {
            document,
            hands,
            hands_by_id,
            factors,
            factors_by_id,
            kong_points,
            self_draw_factor: parsed.settlement.self_draw_factor,
            kong_post_win_exempt: parsed.settlement.kong_post_win_exempt,
        })
    }

    /// The document exactly as it was loaded.
    pub fn document(&self) -> &serde_json::Value {
        &self.document
    }

    pub fn hands(&self) -> &[HandType] {
        &self.hands
    }

    pub fn hand(&self, id: &str) -> Option<&HandType> {
        self.hands_by_id.get(id).map(|&i| &self.hands[i])
    }

    pub fn factors(&self) -> &[Factor] {
        &self.factors
    }

    pub fn factor(&self, id: &str) -> Option<&Factor> {
        self.factors_by_id.get(id).map(|&i| &self.factors[i])
    }

    pub fn kong_points(&self, kong_type: KongType) -> i64 {
        self.kong_points.get(kong_type)
    }

    pub fn self_draw_factor(&self) -> Option<&str> {
        self.self_draw_factor.as_deref()
    }

    pub fn kong_post_win_exempt(&self) -> bool {
        self.kong_post_win_exempt
    }
}

fn index_by_id<'a>(ids: impl Iterator<Item = &'a str>) -> HashMap<String, usize> {
    ids.enumerate().map(|(i, id)| (id.to_string(), i)).collect()
}

fn hand_type(spec: HandSpec) -> Result<HandType, RulesetError> {
    let base_multiplier = spec.scoring.base_multiplier;
    if base_multiplier < 1 {
        return Err(RulesetError::InvalidBaseMultiplier {
            id: spec.id,
            value: base_multiplier,
        });
    }

    Ok(HandType {
        id: spec.id,
        name: spec.name,
        description: spec.description_one_line,
        base_multiplier,
        all_pay: spec.settlement.all_pay,
        allow_concurrent_win: spec.settlement.allow_concurrent_win,
    })
}

fn factor(spec: FactorSpec) -> Result<Factor, RulesetError> {
    let invalid = |reason: &str| RulesetError::InvalidFactor {
        id: spec.id.clone(),
        reason: reason.to_string(),
    };

    let effect = match spec.kind {
        FactorKind::Boolean => {
            let multiplier = spec.apply.multiplier.unwrap_or(DEFAULT_FACTOR_MULTIPLIER);
            if multiplier < 1 {
                return Err(invalid("multiplier must be at least 1"));
            }
            FactorEffect::Multiply { multiplier }
        }
        FactorKind::Countable => {
            if let Some(mode) = spec.apply.mode.as_deref() {
                if mode != REPEAT_MODE {
                    return Err(invalid("countable factors must use apply.mode 'repeat'"));
                }
            }
            let multiplier_each = spec
                .apply
                .multiplier_each
                .unwrap_or(DEFAULT_FACTOR_MULTIPLIER);
            if multiplier_each < 1 {
                return Err(invalid("multiplier_each must be at least 1"));
            }
            let max_count = match spec.apply.max_count {
                None => DEFAULT_MAX_COUNT,
                Some(n) => u32::try_from(n).map_err(|_| invalid("max_count must not be negative"))?,
            };
            FactorEffect::Repeat {
                multiplier_each,
                max_count,
            }
        }
    };

    Ok(Factor {
        id: spec.id,
        name: spec.name,
        description: spec.description,
        kind: spec.kind,
        effect,
    })
}
