use anyhow::Result;
use chrono::Utc;
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::card::{auto_show, weekly_card, AutoBooking};
use super::ranking;
use super::show::{ShowRunner, ShowSummary};
use crate::config::settings::AppConfig;
use crate::domain::Universe;
use crate::rating::StrategyKind;
use crate::store::UniverseStore;

/// Per-run switches shared by the show-running commands
#[derive(Debug, Clone)]
pub struct ShowOptions {
    pub strategy: StrategyKind,
    pub seed: Option<u64>,
    pub regenerate_card: bool,
    pub dry_run: bool,
}

/// Load → mutate → save cycle around the universe file
pub struct ProcessingService {
    config: AppConfig,
    store: UniverseStore,
}

impl ProcessingService {
    pub fn new(config: AppConfig) -> Self {
        let store = UniverseStore::new(&config.universe_path, config.ranking.division_threshold);
        Self { config, store }
    }

    /// Replay a booked show
    pub fn run_show(&self, descriptors: &[String], options: &ShowOptions) -> Result<ShowSummary> {
        info!("=== Starting Show Processing ===");
        let mut universe = self.store.load()?;
        let mut rng = create_rng(options.seed);

        self.process(&mut universe, descriptors, options, &mut rng)
    }

    /// Book a show from the current divisions, then replay it
    pub fn run_auto(&self, booking: &AutoBooking, options: &ShowOptions) -> Result<ShowSummary> {
        info!("=== Starting Auto-Booked Show ===");
        let mut universe = self.store.load()?;
        let mut rng = create_rng(options.seed);

        let descriptors = auto_show(&universe, booking, &mut rng);
        for descriptor in &descriptors {
            info!("  → Booked: {}", descriptor);
        }

        self.process(&mut universe, &descriptors, options, &mut rng)
    }

    /// Ranking pass with no matches
    pub fn rerank(&self, dry_run: bool) -> Result<()> {
        let mut universe = self.store.load()?;
        ranking::recompute(&mut universe, &self.config.ranking);
        self.persist(&universe, dry_run)
    }

    /// Replace the upcoming card only
    pub fn regenerate_card(&self, seed: Option<u64>, dry_run: bool) -> Result<Vec<String>> {
        let mut universe = self.store.load()?;
        let mut rng = create_rng(seed);

        universe.weekly_card = weekly_card(&universe.players, &self.config.card, &mut rng);
        self.persist(&universe, dry_run)?;
        Ok(universe.weekly_card)
    }

    fn process(
        &self,
        universe: &mut Universe,
        descriptors: &[String],
        options: &ShowOptions,
        rng: &mut ChaCha8Rng,
    ) -> Result<ShowSummary> {
        let runner = ShowRunner::new(&self.config, options.strategy)?;
        let summary = runner.run(descriptors, universe, now_millis(), rng);

        if options.regenerate_card {
            universe.weekly_card = weekly_card(&universe.players, &self.config.card, rng);
        }

        self.persist(universe, options.dry_run)?;
        info!("=== Processing Complete ===");
        Ok(summary)
    }

    fn persist(&self, universe: &Universe, dry_run: bool) -> Result<()> {
        if dry_run {
            info!("Dry run: leaving {} untouched", self.store.path().display());
            return Ok(());
        }
        self.store.save(universe)
    }
}

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
