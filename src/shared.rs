use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::error;

use crate::hand::{HandError, HandValidator};
use crate::rules::BasicRule;
use crate::ruleset::Ruleset;
use crate::scoring::{ErrorKind, ScoreEngine, ScoringError};
use crate::settlement::SettlementError;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub ruleset: Arc<Ruleset>,
    pub validator: HandValidator,
    pub engine: Arc<ScoreEngine>,
    pub basic_rules: Arc<Vec<BasicRule>>,
}

impl AppState {
    pub fn new(ruleset: Arc<Ruleset>) -> Self {
        Self {
            ruleset,
            validator: HandValidator::new(),
            engine: Arc::new(ScoreEngine::new()),
            basic_rules: Arc::new(Vec::new()),
        }
    }

    pub fn with_basic_rules(mut self, basic_rules: Vec<BasicRule>) -> Self {
        self.basic_rules = Arc::new(basic_rules);
        self
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}

impl From<HandError> for AppError {
    fn from(err: HandError) -> Self {
        if err.is_input_error() {
            AppError::BadRequest(err.to_string())
        } else {
            error!(error = %err, "Hand validation failed");
            AppError::Internal
        }
    }
}

impl From<ScoringError> for AppError {
    fn from(err: ScoringError) -> Self {
        match err.kind() {
            ErrorKind::InputShape | ErrorKind::Reference | ErrorKind::PolicyConflict => {
                AppError::BadRequest(err.to_string())
            }
            ErrorKind::Internal => {
                error!(error = %err, "Round settlement failed");
                AppError::Internal
            }
        }
    }
}

impl From<SettlementError> for AppError {
    fn from(err: SettlementError) -> Self {
        match err {
            SettlementError::Scoring(inner) => inner.into(),
            SettlementError::ScoreOverflow(_) => {
                error!(error = %err, "Score aggregation failed");
                AppError::Internal
            }
            other => AppError::BadRequest(other.to_string()),
        }
    }
}

#[cfg(test)]
pub mod test_utils {
    use super::*;

    /// Builder for creating AppState with overrides for testing
    pub struct AppStateBuilder {
        ruleset: Option<Ruleset>,
        validator: Option<HandValidator>,
        basic_rules: Vec<BasicRule>,
    }

    impl AppStateBuilder {
        pub fn new() -> Self {
            Self {
                ruleset: None,
                validator: None,
                basic_rules: Vec::new(),
            }
        }

        pub fn with_ruleset(mut self, ruleset: Ruleset) -> Self {
            self.ruleset = Some(ruleset);
            self
        }

        pub fn with_validator(mut self, validator: HandValidator) -> Self {
            self.validator = Some(validator);
            self
        }

        pub fn with_basic_rules(mut self, basic_rules: Vec<BasicRule>) -> Self {
            self.basic_rules = basic_rules;
            self
        }

        pub fn build(self) -> AppState {
            let ruleset = self
                .ruleset
                .unwrap_or_else(|| Ruleset::bundled().expect("bundled ruleset is valid"));
            AppState {
                ruleset: Arc::new(ruleset),
                validator: self.validator.unwrap_or_default(),
                engine: Arc::new(ScoreEngine::new()),
                basic_rules: Arc::new(self.basic_rules),
            }
        }
    }

    impl Default for AppStateBuilder {
        fn default() -> Self {
            Self::new()
        }
    }
}
