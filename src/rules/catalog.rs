use serde::{Deserialize, Serialize};

use crate::ruleset::{Factor, FactorKind, HandType, Ruleset};

const REPEATABLE_NOTE: &str = "（可重复）";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    HandType,
    Extra,
}

/// A display-only view of a hand type or factor. `points` is the base
/// multiplier or the factor's per-application multiplier; settlement never
/// reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub id: String,
    pub name: String,
    pub description: String,
    pub points: i64,
    #[serde(default)]
    pub name_cn: Option<String>,
    #[serde(default)]
    pub category: Option<RuleCategory>,
}

impl From<&HandType> for Rule {
    fn from(hand: &HandType) -> Self {
        Self {
            id: hand.id.clone(),
            name: non_empty(hand.name.en()).unwrap_or(&hand.id).to_string(),
            name_cn: non_empty(hand.name.zh()).map(str::to_string),
            description: hand
                .description
                .as_ref()
                .and_then(|d| d.zh())
                .unwrap_or_default()
                .to_string(),
            points: hand.base_multiplier,
            category: Some(RuleCategory::HandType),
        }
    }
}

impl From<&Factor> for Rule {
    fn from(factor: &Factor) -> Self {
        let mut description = factor
            .description
            .as_ref()
            .and_then(|d| d.zh())
            .unwrap_or_default()
            .to_string();
        if factor.kind == FactorKind::Countable {
            description.push_str(REPEATABLE_NOTE);
        }

        Self {
            id: factor.id.clone(),
            name: non_empty(factor.name.en()).unwrap_or(&factor.id).to_string(),
            name_cn: non_empty(factor.name.zh()).map(str::to_string),
            description,
            points: factor.unit_multiplier(),
            category: Some(RuleCategory::Extra),
        }
    }
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.is_empty())
}

/// Hand types first, then factors, each in ruleset order.
pub fn rule_catalog(ruleset: &Ruleset) -> Vec<Rule> {
    ruleset
        .hands()
        .iter()
        .map(Rule::from)
        .chain(ruleset.factors().iter().map(Rule::from))
        .collect()
}
