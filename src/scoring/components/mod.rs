mod kong;
mod manual;
mod win;

pub use kong::KongComponent;
pub use manual::ManualComponent;
pub use win::{win_breakdown, WinComponent};

use crate::ruleset::Ruleset;

use super::errors::ScoringError;
use super::ledger::ScoreLedger;
use super::validation::Round;

/// Priority constants for score components.
/// Lower values run first. Components write to disjoint ledger columns, so the
/// order only affects the order of `applied_rule_ids`.
pub mod component_priority {
    /// Hand-type wins and their factors
    pub const WIN: u32 = 100;
    /// Fixed-point kong transfers
    pub const KONG: u32 = 200;
    /// Out-of-band corrections
    pub const MANUAL: u32 = 300;
}

pub trait ScoreComponent: Send + Sync {
    fn apply(
        &self,
        ruleset: &Ruleset,
        round: &Round<'_>,
        ledger: &mut ScoreLedger,
    ) -> Result<(), ScoringError>;

    fn priority(&self) -> u32;
}
