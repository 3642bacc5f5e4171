use std::path::Path;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use tracing::{debug, info, warn};

use super::catalog::Rule;
use crate::ruleset::LocalizedText;

/// Where a basic rule is taught.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BasicRuleSection {
    BeforeGame,
    DuringTurn,
    #[default]
    WinningScoring,
}

/// A non-scoring rule (game flow, etiquette, hard rules) for the learn screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicRule {
    pub id: String,
    pub name_en: String,
    #[serde(default)]
    pub name_cn: Option<String>,
    pub description_en: String,
    #[serde(default)]
    pub description_cn: Option<String>,
    pub section: BasicRuleSection,
}

#[derive(Debug, Deserialize)]
struct BasicRuleEntry {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: Option<LocalizedText>,
    #[serde(default)]
    description: Option<LocalizedText>,
    #[serde(default)]
    section: Option<String>,
}

impl BasicRule {
    fn from_entry(entry: BasicRuleEntry) -> Option<Self> {
        if entry.id.is_empty() {
            return None;
        }

        let text = |value: &Option<LocalizedText>, pick: fn(&LocalizedText) -> Option<&str>| {
            value
                .as_ref()
                .and_then(pick)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
        };

        let section = entry
            .section
            .as_deref()
            .map(|raw| raw.trim().to_lowercase())
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default();

        Some(Self {
            name_en: text(&entry.name, LocalizedText::en).unwrap_or_else(|| entry.id.clone()),
            name_cn: text(&entry.name, LocalizedText::zh),
            description_en: text(&entry.description, LocalizedText::en).unwrap_or_default(),
            description_cn: text(&entry.description, LocalizedText::zh),
            section,
            id: entry.id,
        })
    }
}

impl From<&BasicRule> for Rule {
    fn from(basic: &BasicRule) -> Self {
        Self {
            id: basic.id.clone(),
            name: basic.name_en.clone(),
            name_cn: basic.name_cn.clone(),
            description: basic
                .description_cn
                .clone()
                .unwrap_or_else(|| basic.description_en.clone()),
            points: 0,
            category: None,
        }
    }
}

/// Parses a basic-rules document: a JSON list of `{id, name, description, section?}`.
///
/// Entries that are not objects or carry no id are skipped.
pub fn parse_basic_rules(json: &str) -> Result<Vec<BasicRule>, serde_json::Error> {
    let items: Vec<serde_json::Value> = serde_json::from_str(json)?;
    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<BasicRuleEntry>(item) {
            Ok(entry) => BasicRule::from_entry(entry),
            Err(err) => {
                debug!(error = %err, "Skipping malformed basic rule");
                None
            }
        })
        .collect())
}

/// Loads basic rules from `path`. A missing or unreadable file yields no rules.
pub fn load_basic_rules(path: impl AsRef<Path>) -> Vec<BasicRule> {
    let path = path.as_ref();
    if !path.exists() {
        debug!(path = %path.display(), "No basic rules file");
        return Vec::new();
    }

    let parsed = std::fs::read_to_string(path)
        .map_err(|err| err.to_string())
        .and_then(|raw| parse_basic_rules(&raw).map_err(|err| err.to_string()));
    match parsed {
        Ok(rules) => {
            info!(count = rules.len(), "Basic rules loaded");
            rules
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "Ignoring unreadable basic rules");
            Vec::new()
        }
    }
}
