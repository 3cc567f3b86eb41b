use log::{info, warn};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use crate::config::settings::CardSettings;
use crate::domain::{MatchType, Player, Universe, DIVISION_ONE, DIVISION_TWO};

const MULTIMAN_SIZES: [usize; 5] = [3, 4, 5, 6, 8];

/// Shuffle the roster into the upcoming card. Every `triple_threat_every`-th
/// slot (starting with the first) is a triple threat, the rest are singles.
/// Nobody is booked twice; the card ends early when the roster runs out.
pub fn weekly_card(players: &[Player], settings: &CardSettings, rng: &mut dyn RngCore) -> Vec<String> {
    let mut pool: Vec<&str> = players.iter().map(|p| p.name.as_str()).collect();
    pool.shuffle(rng);

    let mut card = Vec::with_capacity(settings.weekly_slots);
    let mut cursor = 0;

    for slot in 0..settings.weekly_slots {
        let is_triple = settings.triple_threat_every > 0 && slot % settings.triple_threat_every == 0;
        let (match_type, size) = if is_triple {
            (MatchType::TripleThreat, 3)
        } else {
            (MatchType::Singles, 2)
        };

        if cursor + size > pool.len() {
            break;
        }
        let names = &pool[cursor..cursor + size];
        cursor += size;

        card.push(format!("MatchType: {} | {} | Finish: TBD", match_type, names.join(" vs ")));
    }

    info!("Generated weekly card with {} matches", card.len());
    card
}

/// How many auto-booked matches to draw from each division. A multi-man size
/// of zero books no multi-man match for that division.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoBooking {
    pub div1_singles: usize,
    pub div2_singles: usize,
    pub div1_multiman: usize,
    pub div2_multiman: usize,
}

impl Default for AutoBooking {
    fn default() -> Self {
        Self {
            div1_singles: 2,
            div2_singles: 2,
            div1_multiman: 3,
            div2_multiman: 4,
        }
    }
}

/// Book a whole show from the roster. The first name in each descriptor is
/// the winner, so the random draw order decides the results.
pub fn auto_show(universe: &Universe, booking: &AutoBooking, rng: &mut dyn RngCore) -> Vec<String> {
    let mut show = Vec::new();
    show.extend(division_singles(universe, DIVISION_ONE, booking.div1_singles, rng));
    show.extend(division_singles(universe, DIVISION_TWO, booking.div2_singles, rng));

    for (division, size) in [(DIVISION_ONE, booking.div1_multiman), (DIVISION_TWO, booking.div2_multiman)] {
        if size == 0 {
            continue;
        }
        if let Some(descriptor) = division_multiman(universe, division, size, rng) {
            show.push(descriptor);
        }
    }

    info!("Auto-booked {} matches", show.len());
    show
}

/// Up to `count` random singles matches inside one division, nobody twice
pub fn division_singles(universe: &Universe, division: &str, count: usize, rng: &mut dyn RngCore) -> Vec<String> {
    let mut pool = division_pool(universe, division);
    let mut matches = Vec::new();

    while pool.len() >= 2 && matches.len() < count {
        let a = take_random(&mut pool, rng);
        let b = take_random(&mut pool, rng);
        matches.push(format!("{}: {} vs {}", MatchType::Singles, a, b));
    }
    matches
}

/// One random multi-man match inside one division
pub fn division_multiman(universe: &Universe, division: &str, size: usize, rng: &mut dyn RngCore) -> Option<String> {
    if !MULTIMAN_SIZES.contains(&size) {
        warn!("Unsupported multi-man size: {}", size);
        return None;
    }
    let match_type = MatchType::for_field_size(size)?;

    let mut pool = division_pool(universe, division);
    if pool.len() < size {
        warn!("{} has only {} wrestlers, cannot book a {}", division, pool.len(), match_type);
        return None;
    }

    let chosen: Vec<String> = (0..size).map(|_| take_random(&mut pool, rng)).collect();
    Some(format!("{}: {}", match_type, chosen.join(" vs ")))
}

fn division_pool(universe: &Universe, division: &str) -> Vec<String> {
    universe.players_in_division(division).map(|p| p.name.clone()).collect()
}

fn take_random(pool: &mut Vec<String>, rng: &mut dyn RngCore) -> String {
    let idx = rng.gen_range(0..pool.len());
    pool.remove(idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DescriptorParser;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    fn roster(count: usize, elo: i32) -> Vec<Player> {
        (0..count).map(|i| Player::new(&format!("W{}", i), elo)).collect()
    }

    fn universe(div1: usize, div2: usize) -> Universe {
        let mut universe = Universe::default();
        universe.players.extend(roster(div1, 1600));
        universe
            .players
            .extend((0..div2).map(|i| Player::new(&format!("L{}", i), 1400)));
        universe.normalize(1500);
        universe
    }

    #[test]
    fn test_weekly_card_layout() {
        let players = roster(30, 1500);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let card = weekly_card(&players, &CardSettings::default(), &mut rng);

        assert_eq!(card.len(), 10);
        let parser = DescriptorParser::new().unwrap();
        let mut booked = HashSet::new();
        for (slot, descriptor) in card.iter().enumerate() {
            let event = parser.parse(descriptor).unwrap();
            let expected = if slot % 3 == 0 { MatchType::TripleThreat } else { MatchType::Singles };
            assert_eq!(event.match_type, expected);
            assert_eq!(event.finish.as_deref(), Some("TBD"));
            for name in event.participants {
                assert!(booked.insert(name), "wrestler booked twice");
            }
        }
    }

    #[test]
    fn test_weekly_card_stops_when_roster_runs_out() {
        let players = roster(6, 1500);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        // 3 + 2 = 5 wrestlers used, the next singles would need 2 more
        assert_eq!(weekly_card(&players, &CardSettings::default(), &mut rng).len(), 2);
    }

    #[test]
    fn test_weekly_card_is_reproducible() {
        let players = roster(30, 1500);
        let mut a = ChaCha8Rng::seed_from_u64(11);
        let mut b = ChaCha8Rng::seed_from_u64(11);
        assert_eq!(
            weekly_card(&players, &CardSettings::default(), &mut a),
            weekly_card(&players, &CardSettings::default(), &mut b)
        );
    }

    #[test]
    fn test_division_singles_stay_in_division() {
        let u = universe(5, 5);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let matches = division_singles(&u, DIVISION_TWO, 3, &mut rng);

        // Five wrestlers only make two pairs
        assert_eq!(matches.len(), 2);
        assert!(matches.iter().all(|m| m.starts_with("Singles: L") && !m.contains(" vs W")));
    }

    #[test]
    fn test_division_multiman() {
        let u = universe(4, 0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let four_way = division_multiman(&u, DIVISION_ONE, 4, &mut rng).unwrap();
        assert!(four_way.starts_with("FourWay: "));
        assert_eq!(four_way.matches(" vs ").count(), 3);

        assert_eq!(division_multiman(&u, DIVISION_ONE, 5, &mut rng), None);
        assert_eq!(division_multiman(&u, DIVISION_ONE, 7, &mut rng), None);
    }

    #[test]
    fn test_auto_show_books_every_section() {
        let u = universe(8, 8);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let show = auto_show(&u, &AutoBooking::default(), &mut rng);

        assert_eq!(show.len(), 6);
        assert!(show[4].starts_with("TripleThreat: W"));
        assert!(show[5].starts_with("FourWay: L"));
    }
}
