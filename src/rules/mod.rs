// Public API - what other modules can use
pub use basics::{load_basic_rules, parse_basic_rules, BasicRule, BasicRuleSection};
pub use catalog::{rule_catalog, Rule, RuleCategory};
pub use handlers::{get_ruleset, list_basic_rules, list_rules, search_rules};
pub use search::DEFAULT_SEARCH_LIMIT;

// Internal modules
pub mod basics;
pub mod catalog;
mod handlers;
pub mod search;
mod types;

pub use types::{RuleSearchRequest, RuleSearchResponse};
