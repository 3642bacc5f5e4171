use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Text that is either a plain string or a `{zh, en}` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocalizedText {
    Plain(String),
    Localized {
        #[serde(default)]
        zh: Option<String>,
        #[serde(default)]
        en: Option<String>,
    },
}

impl LocalizedText {
    /// English text, falling back to Chinese.
    pub fn en(&self) -> Option<&str> {
        match self {
            LocalizedText::Plain(text) => Some(text),
            LocalizedText::Localized { zh, en } => en.as_deref().or(zh.as_deref()),
        }
    }

    /// Chinese text, falling back to English.
    pub fn zh(&self) -> Option<&str> {
        match self {
            LocalizedText::Plain(text) => Some(text),
            LocalizedText::Localized { zh, en } => zh.as_deref().or(en.as_deref()),
        }
    }
}

impl Default for LocalizedText {
    fn default() -> Self {
        LocalizedText::Plain(String::new())
    }
}

/// Kong sub-types, each priced by a fixed point value.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum KongType {
    /// Exposed kong claimed from a discard; the discarder pays.
    DianGang,
    /// Kong added onto an exposed triplet.
    BuGang,
    /// Concealed kong.
    AnGang,
}

impl KongType {
    /// Rule id used in audit trails, e.g. `event.dian_gang`.
    pub fn rule_id(&self) -> String {
        format!("event.{}", self)
    }

    pub fn takes_single_payer(&self) -> bool {
        matches!(self, KongType::DianGang)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FactorKind {
    Boolean,
    Countable,
}

// ---------------------------------------------------------------------------
// Raw document, as authored
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesetDocument {
    #[serde(default)]
    pub meta: serde_json::Value,
    #[serde(default)]
    pub tile_encoding: serde_json::Value,
    pub hands: Vec<HandSpec>,
    pub multipliers: MultiplierSection,
    pub settlement: SettlementSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandSpec {
    pub id: String,
    #[serde(default)]
    pub name: LocalizedText,
    #[serde(default)]
    pub description_one_line: Option<LocalizedText>,
    pub scoring: HandScoring,
    #[serde(default)]
    pub settlement: HandSettlement,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandScoring {
    pub base_multiplier: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HandSettlement {
    /// Every other player pays, whatever payers the caller named.
    #[serde(default)]
    pub all_pay: bool,
    /// May be settled alongside other wins in the same round.
    #[serde(default)]
    pub allow_concurrent_win: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiplierSection {
    pub factors: Vec<FactorSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorSpec {
    pub id: String,
    #[serde(default)]
    pub name: LocalizedText,
    #[serde(default)]
    pub description: Option<LocalizedText>,
    #[serde(rename = "type")]
    pub kind: FactorKind,
    #[serde(default)]
    pub apply: FactorApply,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FactorApply {
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub multiplier: Option<i64>,
    #[serde(default)]
    pub multiplier_each: Option<i64>,
    #[serde(default)]
    pub max_count: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementSpec {
    pub kong_points: KongPoints,
    /// Boolean factor that doubles a self-drawn win.
    #[serde(default)]
    pub self_draw_factor: Option<String>,
    /// Players who already won are not charged for later kongs. The caller
    /// applies this when offering payers; the engine only reports it.
    #[serde(default)]
    pub kong_post_win_exempt: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KongPoints {
    pub dian_gang: i64,
    pub bu_gang: i64,
    pub an_gang: i64,
}

impl KongPoints {
    pub fn get(&self, kong_type: KongType) -> i64 {
        match kong_type {
            KongType::DianGang => self.dian_gang,
            KongType::BuGang => self.bu_gang,
            KongType::AnGang => self.an_gang,
        }
    }
}
