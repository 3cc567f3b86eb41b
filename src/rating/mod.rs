pub mod chaos;
pub mod storyline;
pub mod strategy;
pub mod types;

pub use chaos::ChaosStrategy;
pub use storyline::StorylineStrategy;
pub use strategy::{build_strategy, expected_score, round_delta, RatingStrategy};
pub use types::{EloDelta, EloValue, Outcome, RatingInput, StrategyKind};
