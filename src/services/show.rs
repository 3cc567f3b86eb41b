use anyhow::Result;
use log::{debug, info, warn};
use rand::RngCore;
use std::collections::{BTreeMap, HashSet};

use super::outcome::{AppliedMatch, OutcomeApplier};
use super::ranking;
use crate::config::settings::{AppConfig, HistorySettings, RankingSettings};
use crate::domain::{DescriptorParser, Universe};
use crate::errors::MatchError;
use crate::rating::{build_strategy, EloValue, RatingStrategy, StrategyKind};

/// Net rating movement of one wrestler across a whole show
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EloMovement {
    pub name: String,
    pub before: EloValue,
    pub after: EloValue,
    pub rank: Option<u32>,
}

impl EloMovement {
    pub fn delta(&self) -> i32 {
        self.after - self.before
    }
}

/// Outcome of one show run
#[derive(Debug, Clone)]
pub struct ShowSummary {
    pub strategy: StrategyKind,
    pub applied: Vec<AppliedMatch>,
    pub skipped: Vec<MatchError>,
    /// Wrestlers who worked the show, in final standing order
    pub movements: Vec<EloMovement>,
}

impl ShowSummary {
    fn new(strategy: StrategyKind) -> Self {
        Self {
            strategy,
            applied: Vec::new(),
            skipped: Vec::new(),
            movements: Vec::new(),
        }
    }

    fn record_movements(&mut self, before: &BTreeMap<String, EloValue>, universe: &Universe) {
        let worked: HashSet<&str> = self
            .applied
            .iter()
            .flat_map(|m| m.changes.iter().map(|c| c.name.as_str()))
            .collect();

        self.movements = universe
            .players
            .iter()
            .filter(|p| worked.contains(p.name.as_str()))
            .map(|p| EloMovement {
                name: p.name.clone(),
                before: before.get(&p.name).copied().unwrap_or(p.elo),
                after: p.elo,
                rank: p.rank,
            })
            .collect();
    }
}

/// Replays a show's descriptors, in order, into the universe
pub struct ShowRunner {
    parser: DescriptorParser,
    strategy: Box<dyn RatingStrategy>,
    history: HistorySettings,
    ranking: RankingSettings,
}

impl ShowRunner {
    pub fn new(config: &AppConfig, kind: StrategyKind) -> Result<Self> {
        Ok(Self {
            parser: DescriptorParser::new()?,
            strategy: build_strategy(kind, &config.rating),
            history: config.history.clone(),
            ranking: config.ranking.clone(),
        })
    }

    /// Apply every descriptor and then run one ranking pass. A descriptor that
    /// fails to parse or names an unknown wrestler is logged and skipped.
    pub fn run(&self, descriptors: &[String], universe: &mut Universe, now_ms: i64, rng: &mut dyn RngCore) -> ShowSummary {
        info!(
            "=== Running show: {} matches, {} ratings ===",
            descriptors.len(),
            self.strategy.kind()
        );

        let before: BTreeMap<String, EloValue> = universe.players.iter().map(|p| (p.name.clone(), p.elo)).collect();
        let mut summary = ShowSummary::new(self.strategy.kind());
        universe.last_week_matches.clear();

        for descriptor in descriptors {
            match self.run_match(descriptor, universe, now_ms, rng) {
                Ok(applied) => summary.applied.push(applied),
                Err(e) => {
                    warn!("⚠ Skipping match: {}", e);
                    summary.skipped.push(e);
                }
            }
        }

        ranking::recompute(universe, &self.ranking);
        summary.record_movements(&before, universe);

        info!(
            "=== Show complete: {} applied, {} skipped ===",
            summary.applied.len(),
            summary.skipped.len()
        );
        summary
    }

    fn run_match(
        &self,
        descriptor: &str,
        universe: &mut Universe,
        now_ms: i64,
        rng: &mut dyn RngCore,
    ) -> Result<AppliedMatch, MatchError> {
        let event = self.parser.parse(descriptor)?;
        debug!("Parsed {:?} descriptor: {} with {} entrants", event.form, event.match_type, event.participants.len());
        let applier = OutcomeApplier::new(self.strategy.as_ref(), &self.history);
        applier.apply(&event, universe, event.timestamp(now_ms), rng)
    }
}
