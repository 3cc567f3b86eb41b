use log::info;
use std::collections::HashMap;

use crate::config::settings::RankingSettings;
use crate::domain::{division_for, Player, Universe};

/// Recompute every derived standing from current ratings:
/// divisions, global rank, division rank and title contenders.
///
/// Ties on elo are broken by name so the result does not depend on the
/// order the roster was stored in. The roster itself is left sorted by rank.
pub fn recompute(universe: &mut Universe, settings: &RankingSettings) {
    assign_divisions(&mut universe.players, settings.division_threshold);
    universe.players.sort_by(standing_order);
    assign_global_ranks(&mut universe.players);
    assign_division_ranks(&mut universe.players);
    refresh_contenders(universe, settings.contender_count);

    info!("Divisions and division rankings updated.");
}

fn standing_order(a: &Player, b: &Player) -> std::cmp::Ordering {
    b.elo.cmp(&a.elo).then_with(|| a.name.cmp(&b.name))
}

fn assign_divisions(players: &mut [Player], threshold: i32) {
    for player in players.iter_mut() {
        player.division = division_for(player.elo, threshold).to_string();
    }
}

fn assign_global_ranks(players: &mut [Player]) {
    for (idx, player) in players.iter_mut().enumerate() {
        player.rank = Some(idx as u32 + 1);
    }
}

/// Expects `players` already in standing order
fn assign_division_ranks(players: &mut [Player]) {
    let mut next_rank: HashMap<String, u32> = HashMap::new();
    for player in players.iter_mut() {
        let rank = next_rank.entry(player.division.clone()).or_insert(0);
        *rank += 1;
        player.division_rank = Some(*rank);
    }
}

fn refresh_contenders(universe: &mut Universe, count: usize) {
    for title in &mut universe.championships {
        title.contenders = universe
            .players
            .iter()
            .filter(|p| p.division == title.division && p.name != title.holder)
            .take(count)
            .map(|p| p.name.clone())
            .collect();
    }
}
