use thiserror::Error;

use crate::ruleset::KongType;

/// Coarse classification of a settlement failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed request: wrong counts, missing or duplicated fields.
    InputShape,
    /// A name or id that does not resolve.
    Reference,
    /// Inputs that contradict each other or the ruleset's policy.
    PolicyConflict,
    /// Arithmetic or invariant failures inside the engine.
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    #[error("A round needs 3 or 4 players, got {0}")]
    InvalidPlayerCount(usize),

    #[error("Player {0} appears more than once in the round")]
    DuplicatePlayer(String),

    #[error("{player}: {context} names no payer")]
    MissingPayer { player: String, context: String },

    #[error("{player}: payer {payer} is listed more than once")]
    DuplicatePayer { player: String, payer: String },

    #[error("{player}: invalid value for factor {factor}: {reason}")]
    InvalidFactorValue {
        player: String,
        factor: String,
        reason: String,
    },

    #[error("{player}: manual_delta {value} is outside +/-{limit}")]
    ManualDeltaOutOfRange {
        player: String,
        value: i64,
        limit: i64,
    },

    #[error("{player}: payer {payer} is not a player in this round")]
    UnknownPlayerReference { player: String, payer: String },

    #[error("{0} cannot pay themselves")]
    SelfPayment(String),

    #[error("{player}: unknown hand type {hand_type_id}")]
    UnknownHandType {
        player: String,
        hand_type_id: String,
    },

    #[error("{player}: unknown factor {factor}")]
    UnknownFactor { player: String, factor: String },

    #[error("Multiple winners ({}) but hand types {} do not allow concurrent wins", .players.join(", "), .hand_type_ids.join(", "))]
    MultipleWinnersUnsupported {
        players: Vec<String>,
        hand_type_ids: Vec<String>,
    },

    #[error("{player}: {context} sets both payer_name and payer_names")]
    ConflictingPayers { player: String, context: String },

    #[error("{player}: {kong_type} takes a single payer_name, not payer_names")]
    KongPayerShape { player: String, kong_type: KongType },

    #[error("Score overflow while settling {0}")]
    ScoreOverflow(String),

    #[error("Round does not balance: {component} scores sum to {sum}")]
    UnbalancedRound { component: &'static str, sum: i64 },
}

impl ScoringError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScoringError::InvalidPlayerCount(_)
            | ScoringError::DuplicatePlayer(_)
            | ScoringError::MissingPayer { .. }
            | ScoringError::DuplicatePayer { .. }
            | ScoringError::InvalidFactorValue { .. }
            | ScoringError::ManualDeltaOutOfRange { .. } => ErrorKind::InputShape,
            ScoringError::UnknownPlayerReference { .. }
            | ScoringError::SelfPayment(_)
            | ScoringError::UnknownHandType { .. }
            | ScoringError::UnknownFactor { .. } => ErrorKind::Reference,
            ScoringError::MultipleWinnersUnsupported { .. }
            | ScoringError::ConflictingPayers { .. }
            | ScoringError::KongPayerShape { .. } => ErrorKind::PolicyConflict,
            ScoringError::ScoreOverflow(_) | ScoringError::UnbalancedRound { .. } => {
                ErrorKind::Internal
            }
        }
    }
}
