pub mod components;
pub mod engine;
pub mod errors;
pub mod ledger;
pub mod models;
pub mod validation;

pub use components::{component_priority, ScoreComponent};
pub use engine::{settle, ScoreEngine, ScoreEngineBuilder};
pub use errors::{ErrorKind, ScoringError};
pub use models::*;
pub use validation::{validate_round, Round, MANUAL_DELTA_LIMIT};
