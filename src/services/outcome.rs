use log::{debug, info};
use rand::RngCore;

use super::promo::{compose_promo, PromoTagline};
use crate::config::settings::HistorySettings;
use crate::domain::{rivalry_key, LoggedMatch, MatchEvent, MatchRecord, RecordResult, Universe};
use crate::errors::MatchError;
use crate::rating::{EloValue, Outcome, RatingInput, RatingStrategy};

/// Rating movement of one wrestler in one match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EloChange {
    pub name: String,
    pub before: EloValue,
    pub after: EloValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleChange {
    pub title: String,
    pub from: String,
    pub to: String,
}

/// What applying one match did to the universe
#[derive(Debug, Clone)]
pub struct AppliedMatch {
    pub descriptor: String,
    pub is_draw: bool,
    pub changes: Vec<EloChange>,
    pub title_changes: Vec<TitleChange>,
    pub promo: Option<String>,
}

/// Writes a parsed match into the universe: ratings, records, histories,
/// rivalries, promos, titles and faction wins.
pub struct OutcomeApplier<'a> {
    strategy: &'a dyn RatingStrategy,
    history: &'a HistorySettings,
}

impl<'a> OutcomeApplier<'a> {
    pub fn new(strategy: &'a dyn RatingStrategy, history: &'a HistorySettings) -> Self {
        Self { strategy, history }
    }

    /// Apply one match. Every participant is resolved against the roster
    /// before anything is mutated, so an unknown name leaves the universe
    /// untouched.
    pub fn apply(
        &self,
        event: &MatchEvent,
        universe: &mut Universe,
        timestamp: i64,
        rng: &mut dyn RngCore,
    ) -> Result<AppliedMatch, MatchError> {
        if event.participants.len() < 2 {
            return Err(MatchError::parse(&event.descriptor, "fewer than 2 participants"));
        }
        let indices = resolve_participants(event, universe)?;

        let applied = if event.is_draw {
            self.apply_draw(event, universe, &indices, timestamp)
        } else {
            self.apply_decisive(event, universe, &indices, timestamp, rng)
        };

        self.log_match(event, universe, timestamp);
        Ok(applied)
    }

    // --- Draws ---

    fn apply_draw(&self, event: &MatchEvent, universe: &mut Universe, indices: &[usize], timestamp: i64) -> AppliedMatch {
        for &idx in indices {
            let record = self.build_record(event, RecordResult::Draw, timestamp);
            universe.players[idx].record_match(record, self.history.player_history_cap);
        }
        debug!("Recorded draw: {}", event.descriptor);

        AppliedMatch {
            descriptor: event.descriptor.clone(),
            is_draw: true,
            changes: Vec::new(),
            title_changes: Vec::new(),
            promo: None,
        }
    }

    // --- Decisive matches ---

    fn apply_decisive(
        &self,
        event: &MatchEvent,
        universe: &mut Universe,
        indices: &[usize],
        timestamp: i64,
        rng: &mut dyn RngCore,
    ) -> AppliedMatch {
        let snapshot: Vec<EloValue> = indices.iter().map(|&idx| universe.players[idx].elo).collect();
        let deltas = self.compute_deltas(event, &snapshot, rng);

        let mut changes = Vec::with_capacity(indices.len());
        for (pos, &idx) in indices.iter().enumerate() {
            let result = if pos == 0 { RecordResult::Win } else { RecordResult::Loss };
            let record = self.build_record(event, result, timestamp);
            let player = &mut universe.players[idx];

            player.last_elo = Some(snapshot[pos]);
            player.elo = snapshot[pos] + deltas[pos];
            match result {
                RecordResult::Win => player.wins += 1,
                _ => player.losses += 1,
            }
            player.record_match(record, self.history.player_history_cap);

            changes.push(EloChange {
                name: player.name.clone(),
                before: snapshot[pos],
                after: player.elo,
            });
        }

        let winner = &event.participants[0];
        let losers = event.losers();

        update_rivalries(universe, winner, losers);
        let promo = self.cut_promo(event, universe, &snapshot);
        let title_changes = transfer_titles(event, universe, winner);
        credit_factions(universe, winner);

        AppliedMatch {
            descriptor: event.descriptor.clone(),
            is_draw: false,
            changes,
            title_changes,
            promo: Some(promo),
        }
    }

    /// Rate every participant against the same pre-match ratings
    fn compute_deltas(&self, event: &MatchEvent, snapshot: &[EloValue], rng: &mut dyn RngCore) -> Vec<i32> {
        let count = snapshot.len();
        let total: f64 = snapshot.iter().map(|&elo| elo as f64).sum();
        let noise = self.strategy.event_noise(rng);

        snapshot
            .iter()
            .enumerate()
            .map(|(pos, &elo)| {
                let input = RatingInput {
                    subject_elo: elo,
                    opponent_avg_elo: (total - elo as f64) / (count - 1) as f64,
                    outcome: if pos == 0 { Outcome::Win } else { Outcome::Loss },
                    participant_count: count,
                    match_type: event.match_type,
                    is_storyline: event.is_storyline,
                    is_ppv: event.is_ppv,
                };
                self.strategy.rating_delta(&input, noise)
            })
            .collect()
    }

    fn cut_promo(&self, event: &MatchEvent, universe: &mut Universe, snapshot: &[EloValue]) -> String {
        let winner = &event.participants[0];
        let rival = &event.participants[1];
        let heat = universe.rivalries.get(&rivalry_key(winner, rival)).copied().unwrap_or(1);
        let tagline = PromoTagline::for_match(event.is_storyline, snapshot[0], snapshot[1]);

        let promo = compose_promo(winner, rival, heat, event.match_type, tagline);
        info!("{}", promo);
        universe.promos.push(promo.clone());
        promo
    }

    // --- Bookkeeping ---

    fn build_record(&self, event: &MatchEvent, result: RecordResult, timestamp: i64) -> MatchRecord {
        MatchRecord {
            result,
            descriptor: event.descriptor.clone(),
            finish: event.finish.clone(),
            timestamp,
        }
    }

    fn log_match(&self, event: &MatchEvent, universe: &mut Universe, timestamp: i64) {
        universe.last_week_matches.push(event.descriptor.clone());
        universe.match_history.insert(
            0,
            LoggedMatch {
                descriptor: event.descriptor.clone(),
                timestamp,
            },
        );
        universe.match_history.truncate(self.history.global_history_cap);
    }
}

/// Roster index of every participant, in descriptor order
pub fn resolve_participants(event: &MatchEvent, universe: &Universe) -> Result<Vec<usize>, MatchError> {
    event
        .participants
        .iter()
        .map(|name| {
            universe
                .player_index(name)
                .ok_or_else(|| MatchError::unknown_player(&event.descriptor, name))
        })
        .collect()
}

fn update_rivalries(universe: &mut Universe, winner: &str, losers: &[String]) {
    for loser in losers {
        *universe.rivalries.entry(rivalry_key(winner, loser)).or_insert(0) += 1;
    }
}

/// A champion who takes the loss in their own division's match drops the title
/// to the winner.
fn transfer_titles(event: &MatchEvent, universe: &mut Universe, winner: &str) -> Vec<TitleChange> {
    let winner_division = match universe.player(winner) {
        Some(player) => player.division.clone(),
        None => return Vec::new(),
    };

    let mut changes = Vec::new();
    for title in &mut universe.championships {
        if title.holder == winner || !event.participants.contains(&title.holder) {
            continue;
        }
        let holder_division = universe
            .players
            .iter()
            .find(|p| p.name == title.holder)
            .map(|p| p.division.as_str());
        if holder_division != Some(winner_division.as_str()) {
            continue;
        }

        info!("🏆 Title Change: {} now held by {}", title.name, winner);
        changes.push(TitleChange {
            title: title.name.clone(),
            from: std::mem::replace(&mut title.holder, winner.to_string()),
            to: winner.to_string(),
        });
    }

    for change in &changes {
        universe
            .news
            .push(format!("🏆 Title Change: {} defeats {} for the {}", change.to, change.from, change.title));
    }
    changes
}

fn credit_factions(universe: &mut Universe, winner: &str) {
    for (faction, members) in &universe.factions {
        if members.iter().any(|m| m == winner) {
            *universe.faction_stats.entry(faction.clone()).or_insert(0) += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Championship, DescriptorParser, Player, DIVISION_ONE, DIVISION_TWO};
    use crate::rating::{ChaosStrategy, StorylineStrategy};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn universe(players: &[(&str, i32)]) -> Universe {
        let mut universe = Universe::default();
        for (name, elo) in players {
            universe.players.push(Player::new(name, *elo));
        }
        universe.normalize(1500);
        universe
    }

    fn apply(descriptor: &str, universe: &mut Universe) -> Result<AppliedMatch, MatchError> {
        let strategy = StorylineStrategy::new(64.0);
        let history = HistorySettings::default();
        let applier = OutcomeApplier::new(&strategy, &history);
        let event = DescriptorParser::new().unwrap().parse(descriptor)?;
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        applier.apply(&event, universe, 1_000, &mut rng)
    }

    #[test]
    fn test_singles_updates_both_wrestlers() {
        let mut u = universe(&[("A", 1500), ("B", 1500)]);
        apply("Singles: A vs B", &mut u).unwrap();

        let a = u.player("A").unwrap();
        let b = u.player("B").unwrap();
        assert_eq!((a.elo, a.last_elo, a.wins, a.losses), (1532, Some(1500), 1, 0));
        assert_eq!((b.elo, b.last_elo, b.wins, b.losses), (1468, Some(1500), 0, 1));
        assert_eq!(a.match_history[0].result, RecordResult::Win);
        assert_eq!(b.match_history[0].result, RecordResult::Loss);
        assert_eq!(b.match_history[0].timestamp, 1_000);
    }

    #[test]
    fn test_triple_threat_uses_pre_match_ratings() {
        let mut u = universe(&[("A", 1500), ("B", 1500), ("C", 1500)]);
        let applied = apply("TripleThreat: A vs B vs C", &mut u).unwrap();

        assert_eq!(u.player("A").unwrap().elo, 1558);
        // Both losers rated against the same 1500 average
        assert_eq!(u.player("B").unwrap().elo, 1481);
        assert_eq!(u.player("C").unwrap().elo, 1481);
        assert_eq!(applied.changes.len(), 3);
    }

    #[test]
    fn test_draw_records_history_only() {
        let mut u = universe(&[("A", 1510), ("B", 1490)]);
        let applied = apply("MatchType: Singles | Draw: A, B | Finish: Time limit", &mut u).unwrap();

        let a = u.player("A").unwrap();
        assert_eq!((a.elo, a.last_elo, a.wins, a.losses), (1510, None, 0, 0));
        assert_eq!(a.match_history[0].result, RecordResult::Draw);
        assert_eq!(a.match_history[0].finish.as_deref(), Some("Time limit"));
        assert!(u.rivalries.is_empty());
        assert!(u.promos.is_empty());
        assert!(applied.changes.is_empty());
        assert_eq!(u.last_week_matches.len(), 1);
    }

    #[test]
    fn test_unknown_player_leaves_universe_untouched() {
        let mut u = universe(&[("A", 1500), ("B", 1500)]);
        let err = apply("Singles: A vs Ghost", &mut u).unwrap_err();

        assert_eq!(err, MatchError::unknown_player("Singles: A vs Ghost", "Ghost"));
        assert_eq!(u.player("A").unwrap().elo, 1500);
        assert!(u.player("A").unwrap().match_history.is_empty());
        assert!(u.last_week_matches.is_empty());
    }

    #[test]
    fn test_rivalry_counts_either_winner() {
        let mut u = universe(&[("Narky", 1500), ("Ravroid", 1500)]);
        apply("Singles: Narky vs Ravroid", &mut u).unwrap();
        apply("Singles: Ravroid vs Narky", &mut u).unwrap();

        assert_eq!(u.rivalries["Narky vs Ravroid"], 2);
        assert!(u.promos[1].contains("beaten Narky 2 times"));
    }

    #[test]
    fn test_multi_man_rivalry_pairs_winner_with_each_loser() {
        let mut u = universe(&[("A", 1500), ("B", 1500), ("C", 1500)]);
        apply("TripleThreat: A vs B vs C", &mut u).unwrap();

        assert_eq!(u.rivalries["A vs B"], 1);
        assert_eq!(u.rivalries["A vs C"], 1);
        assert!(!u.rivalries.contains_key("B vs C"));
    }

    #[test]
    fn test_title_changes_hands_within_division() {
        let mut u = universe(&[("Challenger", 1550), ("Champ", 1600)]);
        u.championships.push(Championship::new("World Title", DIVISION_ONE, "Champ"));

        let applied = apply("Singles: Challenger vs Champ", &mut u).unwrap();

        assert_eq!(u.championships[0].holder, "Challenger");
        assert_eq!(applied.title_changes[0].from, "Champ");
        assert_eq!(u.news.len(), 1);
    }

    #[test]
    fn test_title_stays_across_divisions() {
        let mut u = universe(&[("Rookie", 1400), ("Champ", 1600)]);
        u.championships.push(Championship::new("World Title", DIVISION_ONE, "Champ"));
        assert_eq!(u.player("Rookie").unwrap().division, DIVISION_TWO);

        apply("Singles: Rookie vs Champ", &mut u).unwrap();

        assert_eq!(u.championships[0].holder, "Champ");
        assert!(u.news.is_empty());
    }

    #[test]
    fn test_faction_wins_credit_winner_only() {
        let mut u = universe(&[("A", 1500), ("B", 1500)]);
        u.factions.insert("The Flock".to_string(), vec!["A".to_string()]);
        u.factions.insert("Outsiders".to_string(), vec!["B".to_string()]);

        apply("Singles: A vs B", &mut u).unwrap();

        assert_eq!(u.faction_stats.get("The Flock"), Some(&1));
        assert_eq!(u.faction_stats.get("Outsiders"), None);
    }

    #[test]
    fn test_global_log_is_capped_most_recent_first() {
        let mut u = universe(&[("A", 1500), ("B", 1500)]);
        for i in 0..505 {
            u.match_history.push(LoggedMatch {
                descriptor: format!("old {}", i),
                timestamp: 0,
            });
        }

        apply("Singles: A vs B", &mut u).unwrap();

        assert_eq!(u.match_history.len(), 500);
        assert_eq!(u.match_history[0].descriptor, "Singles: A vs B");
    }

    #[test]
    fn test_chaos_noise_is_shared_by_winner_and_losers() {
        let mut u = universe(&[("A", 1500), ("B", 1500)]);
        let strategy = ChaosStrategy::new(32.0, 2.0);
        let history = HistorySettings::default();
        let applier = OutcomeApplier::new(&strategy, &history);
        let event = DescriptorParser::new().unwrap().parse("Singles: A vs B").unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        applier.apply(&event, &mut u, 0, &mut rng).unwrap();

        let gain = u.player("A").unwrap().elo - 1500;
        let loss = 1500 - u.player("B").unwrap().elo;
        assert_eq!(gain, loss);
        assert!((14..=18).contains(&gain));
    }

    #[test]
    fn test_chaos_triple_threat_uses_loser_table() {
        let mut u = universe(&[("A", 1500), ("B", 1500), ("C", 1500)]);
        let strategy = ChaosStrategy::new(32.0, 2.0);
        let history = HistorySettings::default();
        let applier = OutcomeApplier::new(&strategy, &history);
        let event = DescriptorParser::new().unwrap().parse("TripleThreat: A vs B vs C").unwrap();

        // Same seed, same single draw the applier makes
        let noise = strategy.event_noise(&mut ChaCha8Rng::seed_from_u64(11));
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let applied = applier.apply(&event, &mut u, 0, &mut rng).unwrap();

        // 32 * 0.5 * 1.2 = 19.2 for the winner, 32 * -0.5 * 0.6 = -9.6 per loser
        let a = u.player("A").unwrap();
        assert_eq!(a.elo, 1500 + (19.2 + noise).round() as i32);
        assert_eq!(a.last_elo, Some(1500));
        for name in ["B", "C"] {
            let loser = u.player(name).unwrap();
            assert_eq!(loser.elo, 1500 + (-9.6 - noise).round() as i32);
            assert_eq!(loser.last_elo, Some(1500));
            assert_eq!(loser.losses, 1);
        }
        assert!((17..=21).contains(&(a.elo - 1500)));
        assert_eq!(applied.changes.len(), 3);
    }
}
