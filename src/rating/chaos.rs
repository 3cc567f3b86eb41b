use rand::{Rng, RngCore};

use super::strategy::{expected_score, round_delta, RatingStrategy};
use super::types::{EloDelta, Outcome, RatingInput, StrategyKind};
use crate::domain::MatchType;

const PPV_BOOST: f64 = 0.2;

/// Multi-man pipeline: separate winner/loser tables and a shared random
/// term added to the winner and taken from every loser.
pub struct ChaosStrategy {
    k: f64,
    amplitude: f64,
}

impl ChaosStrategy {
    pub fn new(k: f64, amplitude: f64) -> Self {
        Self { k, amplitude }
    }

    pub fn winner_multiplier(match_type: MatchType) -> f64 {
        match match_type {
            MatchType::Singles => 1.0,
            MatchType::TripleThreat => 1.2,
            MatchType::FourWay => 1.3,
            MatchType::FiveWay => 1.4,
            MatchType::SixWay => 1.5,
            MatchType::EightWay => 1.7,
            MatchType::BattleRoyal => 1.0,
        }
    }

    pub fn loser_multiplier(match_type: MatchType) -> f64 {
        match match_type {
            MatchType::Singles => 1.0,
            MatchType::TripleThreat => 0.6,
            MatchType::FourWay => 0.5,
            MatchType::FiveWay => 0.45,
            MatchType::SixWay => 0.4,
            MatchType::EightWay => 0.35,
            MatchType::BattleRoyal => 1.0,
        }
    }

    fn multiplier(input: &RatingInput) -> f64 {
        let base = match input.outcome {
            Outcome::Win => Self::winner_multiplier(input.match_type),
            Outcome::Loss | Outcome::Draw => Self::loser_multiplier(input.match_type),
        };
        if input.is_ppv { base + PPV_BOOST } else { base }
    }
}

impl RatingStrategy for ChaosStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Chaos
    }

    fn event_noise(&self, rng: &mut dyn RngCore) -> f64 {
        if self.amplitude <= 0.0 {
            return 0.0;
        }
        rng.gen_range(-self.amplitude..self.amplitude)
    }

    fn rating_delta(&self, input: &RatingInput, noise: f64) -> EloDelta {
        let expected = expected_score(input.subject_elo as f64, input.opponent_avg_elo);
        let base = self.k * (input.outcome.score() - expected) * Self::multiplier(input);
        let signed_noise = match input.outcome {
            Outcome::Win => noise,
            Outcome::Loss => -noise,
            Outcome::Draw => 0.0,
        };
        round_delta(base + signed_noise)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn input(outcome: Outcome, match_type: MatchType, is_ppv: bool) -> RatingInput {
        RatingInput {
            subject_elo: 1500,
            opponent_avg_elo: 1500.0,
            outcome,
            participant_count: 2,
            match_type,
            is_storyline: false,
            is_ppv,
        }
    }

    #[test]
    fn test_even_singles_without_noise() {
        let strategy = ChaosStrategy::new(32.0, 2.0);
        assert_eq!(strategy.rating_delta(&input(Outcome::Win, MatchType::Singles, false), 0.0), 16);
        assert_eq!(strategy.rating_delta(&input(Outcome::Loss, MatchType::Singles, false), 0.0), -16);
    }

    #[test]
    fn test_noise_is_symmetric() {
        let strategy = ChaosStrategy::new(32.0, 2.0);
        assert_eq!(strategy.rating_delta(&input(Outcome::Win, MatchType::Singles, false), 1.6), 18);
        assert_eq!(strategy.rating_delta(&input(Outcome::Loss, MatchType::Singles, false), 1.6), -18);
    }

    #[test]
    fn test_ppv_boosts_both_tables() {
        // 32 * 0.5 * (1.3 + 0.2) = 24 ; 32 * -0.5 * (0.5 + 0.2) = -11.2
        let strategy = ChaosStrategy::new(32.0, 2.0);
        assert_eq!(strategy.rating_delta(&input(Outcome::Win, MatchType::FourWay, true), 0.0), 24);
        assert_eq!(strategy.rating_delta(&input(Outcome::Loss, MatchType::FourWay, true), 0.0), -11);
    }

    #[test]
    fn test_noise_stays_in_range() {
        let strategy = ChaosStrategy::new(32.0, 2.0);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..1000 {
            let noise = strategy.event_noise(&mut rng);
            assert!((-2.0..2.0).contains(&noise));
        }
    }

    #[test]
    fn test_noise_is_reproducible_from_seed() {
        let strategy = ChaosStrategy::new(32.0, 2.0);
        let mut a = ChaCha8Rng::seed_from_u64(99);
        let mut b = ChaCha8Rng::seed_from_u64(99);
        assert_eq!(strategy.event_noise(&mut a), strategy.event_noise(&mut b));
    }

    #[test]
    fn test_zero_amplitude_disables_noise() {
        let strategy = ChaosStrategy::new(32.0, 0.0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(strategy.event_noise(&mut rng), 0.0);
    }
}
