use std::env;
use std::path::PathBuf;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_RULESET_PATH: &str = "data/rules_winning.json";
pub const DEFAULT_BASIC_RULES_PATH: &str = "data/rules_basics.json";
pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

/// Process settings, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub bind_addr: String,
    pub ruleset_path: PathBuf,
    /// Optional; a missing file means no basic rules.
    pub basic_rules_path: PathBuf,
    pub cors_origins: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Settings {
    /// Reads `HU_BIND_ADDR`, `HU_RULESET_PATH`, `HU_BASIC_RULES_PATH` and `HU_CORS_ORIGINS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str, default: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            bind_addr: get("HU_BIND_ADDR", DEFAULT_BIND_ADDR),
            ruleset_path: PathBuf::from(get("HU_RULESET_PATH", DEFAULT_RULESET_PATH)),
            basic_rules_path: PathBuf::from(get("HU_BASIC_RULES_PATH", DEFAULT_BASIC_RULES_PATH)),
            cors_origins: get("HU_CORS_ORIGINS", DEFAULT_CORS_ORIGINS)
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}
