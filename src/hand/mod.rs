// Public API - what other modules can use
pub use handlers::check_hand;
pub use melds::{Decomposition, Meld, Pair};
pub use types::{CheckHandRequest, CheckHandResponse, HandDetail};
pub use validator::{HandError, HandValidator, ValidationResult, DEFAULT_STEP_LIMIT, HAND_SIZE};

// Internal modules
mod handlers;
pub mod histogram;
pub mod melds;
pub mod service;
mod types;
pub mod validator;
