use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ruleset::KongType;

/// Caller-supplied value for a factor: a flag for boolean factors, a count for
/// countable ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FactorValue {
    Flag(bool),
    Count(i64),
}

impl FactorValue {
    pub fn is_set(&self) -> bool {
        match *self {
            FactorValue::Flag(flag) => flag,
            FactorValue::Count(count) => count != 0,
        }
    }
}

/// A kong declared by the player whose input carries it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KongEventInput {
    #[serde(rename = "type")]
    pub kong_type: KongType,
    #[serde(default)]
    pub payer_name: Option<String>,
    #[serde(default)]
    pub payer_names: Vec<String>,
}

impl KongEventInput {
    pub fn single(kong_type: KongType, payer: impl Into<String>) -> Self {
        Self {
            kong_type,
            payer_name: Some(payer.into()),
            payer_names: Vec::new(),
        }
    }

    pub fn many<S: Into<String>>(kong_type: KongType, payers: impl IntoIterator<Item = S>) -> Self {
        Self {
            kong_type,
            payer_name: None,
            payer_names: payers.into_iter().map(Into::into).collect(),
        }
    }
}

/// What happened to one player in a round.
///
/// `payer_name` names the discarder of a discard win; `payer_names` lists the
/// payers of a self-drawn win. At most one of the two may be given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRoundInput {
    pub name: String,
    #[serde(default)]
    pub hand_type_id: Option<String>,
    #[serde(default)]
    pub payer_name: Option<String>,
    #[serde(default)]
    pub payer_names: Vec<String>,
    #[serde(default)]
    pub factor_values: BTreeMap<String, FactorValue>,
    #[serde(default)]
    pub kong_events: Vec<KongEventInput>,
    #[serde(default)]
    pub manual_delta: i64,
}

impl PlayerRoundInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// The declared hand type, treating an empty id as no win.
    pub fn winning_hand(&self) -> Option<&str> {
        self.hand_type_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// One applied factor in a win's multiplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedFactor {
    pub id: String,
    pub value: FactorValue,
    pub applied_multiplier: i64,
}

/// How a winning hand's per-payer score was reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinBreakdown {
    pub hand_id: String,
    pub base_multiplier: i64,
    pub factors: Vec<AppliedFactor>,
    pub total_multiplier: i64,
}

/// One player's result for a round.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRoundScore {
    pub name: String,
    pub win_score: i64,
    pub kong_score: i64,
    pub manual_score: i64,
    pub delta: i64,
    pub applied_rule_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub win_breakdown: Option<WinBreakdown>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factor_values_accept_flags_and_counts() {
        let values: BTreeMap<String, FactorValue> =
            serde_json::from_str(r#"{"factor.zimo": true, "factor.gen": 2}"#).unwrap();
        assert_eq!(values["factor.zimo"], FactorValue::Flag(true));
        assert_eq!(values["factor.gen"], FactorValue::Count(2));
        assert!(values["factor.gen"].is_set());
        assert!(!FactorValue::Count(0).is_set());
    }

    #[test]
    fn round_input_defaults_missing_fields() {
        let input: PlayerRoundInput = serde_json::from_str(r#"{"name": "alice"}"#).unwrap();
        assert_eq!(input, PlayerRoundInput::new("alice"));
        assert_eq!(input.winning_hand(), None);
    }

    #[test]
    fn empty_hand_type_is_not_a_win() {
        let input = PlayerRoundInput {
            hand_type_id: Some(String::new()),
            ..PlayerRoundInput::new("bob")
        };
        assert_eq!(input.winning_hand(), None);
    }

    #[test]
    fn kong_event_uses_type_field() {
        let event: KongEventInput =
            serde_json::from_str(r#"{"type": "an_gang", "payer_names": ["b", "c"]}"#).unwrap();
        assert_eq!(event, KongEventInput::many(KongType::AnGang, ["b", "c"]));
    }
}
