use super::strategy::{expected_score, round_delta, RatingStrategy};
use super::types::{EloDelta, Outcome, RatingInput, StrategyKind};
use crate::domain::MatchType;

const STORYLINE_BOOST: f64 = 1.3;
const WIN_BONUS_PER_ENTRANT: f64 = 0.25;
const MULTI_LOSS_SCALE: f64 = 0.5;
const MULTI_DRAW_SCALE: f64 = 0.75;

/// Event-driven pipeline: K scaled by match type, field size and storyline flag
pub struct StorylineStrategy {
    k: f64,
}

impl StorylineStrategy {
    pub fn new(k: f64) -> Self {
        Self { k }
    }

    pub fn type_multiplier(match_type: MatchType) -> f64 {
        match match_type {
            MatchType::Singles => 1.0,
            MatchType::TripleThreat => 1.2,
            MatchType::FourWay => 1.4,
            MatchType::SixWay => 1.6,
            MatchType::BattleRoyal => 2.0,
            // No weighting defined for these fields
            MatchType::FiveWay | MatchType::EightWay => 1.0,
        }
    }

    pub fn field_multiplier(outcome: Outcome, participant_count: usize) -> f64 {
        if participant_count <= 2 {
            return 1.0;
        }
        match outcome {
            Outcome::Win => 1.0 + WIN_BONUS_PER_ENTRANT * (participant_count as f64 - 1.0),
            Outcome::Loss => MULTI_LOSS_SCALE,
            Outcome::Draw => MULTI_DRAW_SCALE,
        }
    }

    fn effective_k(&self, input: &RatingInput) -> f64 {
        let mut k = self.k * Self::type_multiplier(input.match_type);
        k *= Self::field_multiplier(input.outcome, input.participant_count);
        if input.is_storyline {
            k *= STORYLINE_BOOST;
        }
        k
    }
}

impl RatingStrategy for StorylineStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Storyline
    }

    fn rating_delta(&self, input: &RatingInput, _noise: f64) -> EloDelta {
        let expected = expected_score(input.subject_elo as f64, input.opponent_avg_elo);
        round_delta(self.effective_k(input) * (input.outcome.score() - expected))
    }
}
