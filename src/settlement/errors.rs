use thiserror::Error;

use crate::scoring::ScoringError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettlementError {
    #[error("Player {0} is not on the scoreboard")]
    UnknownPlayer(String),

    #[error("Player {0} is listed more than once")]
    DuplicatePlayer(String),

    #[error("Running total of {0} overflowed")]
    ScoreOverflow(String),

    #[error(transparent)]
    Scoring(#[from] ScoringError),
}
