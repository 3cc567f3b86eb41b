use rand::RngCore;

use super::chaos::ChaosStrategy;
use super::storyline::StorylineStrategy;
use super::types::{EloDelta, RatingInput, StrategyKind};
use crate::config::settings::RatingSettings;

/// A rating pipeline. One call per participant per match; the noise value is
/// drawn once per match so every participant sees the same term.
pub trait RatingStrategy {
    fn kind(&self) -> StrategyKind;

    /// Per-match perturbation shared by all participants
    fn event_noise(&self, _rng: &mut dyn RngCore) -> f64 {
        0.0
    }

    fn rating_delta(&self, input: &RatingInput, noise: f64) -> EloDelta;
}

pub fn build_strategy(kind: StrategyKind, settings: &RatingSettings) -> Box<dyn RatingStrategy> {
    match kind {
        StrategyKind::Storyline => Box::new(StorylineStrategy::new(settings.storyline_k)),
        StrategyKind::Chaos => Box::new(ChaosStrategy::new(settings.chaos_k, settings.chaos_amplitude)),
    }
}

/// Logistic expected score of `subject` against `opponent`
pub fn expected_score(subject: f64, opponent: f64) -> f64 {
    1.0 / (1.0 + 10.0_f64.powf((opponent - subject) / 400.0))
}

/// Round half away from zero: 31.5 -> 32, -31.5 -> -32
pub fn round_delta(raw: f64) -> EloDelta {
    raw.round() as EloDelta
}
