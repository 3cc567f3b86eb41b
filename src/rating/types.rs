use clap::ValueEnum;
use std::fmt;

use crate::domain::MatchType;

pub type EloValue = i32;
pub type EloDelta = i32;

/// A participant's result in one match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

impl Outcome {
    /// Actual score used by the expected-score formula
    pub fn score(&self) -> f64 {
        match self {
            Outcome::Win => 1.0,
            Outcome::Loss => 0.0,
            Outcome::Draw => 0.5,
        }
    }
}

/// Everything a strategy needs to rate one participant of one match
#[derive(Debug, Clone)]
pub struct RatingInput {
    pub subject_elo: EloValue,
    /// Mean pre-match elo of every other participant
    pub opponent_avg_elo: f64,
    pub outcome: Outcome,
    pub participant_count: usize,
    pub match_type: MatchType,
    pub is_storyline: bool,
    pub is_ppv: bool,
}

/// Selectable rating pipelines
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyKind {
    /// K=64, match-type and field-size weighting, storyline boost
    Storyline,
    /// K=32, separate winner/loser tables, PPV boost, random chaos term
    Chaos,
}

impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Storyline => "storyline",
            StrategyKind::Chaos => "chaos",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
