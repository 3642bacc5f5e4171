pub mod hands;
pub mod round_builder;
pub mod setup;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use hands::random_winning_hand;
#[allow(unused_imports)]
pub use round_builder::RoundBuilder;
#[allow(unused_imports)]
pub use setup::TestApp;
