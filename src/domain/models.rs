use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub const DIVISION_ONE: &str = "Div 1";
pub const DIVISION_TWO: &str = "Div 2";
pub const DEFAULT_ELO: i32 = 1500;

/// The whole league document as stored in `universe.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Universe {
    #[serde(default, deserialize_with = "null_as_default")]
    pub players: Vec<Player>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub championships: Vec<Championship>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub factions: BTreeMap<String, Vec<String>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub faction_stats: BTreeMap<String, u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rivalries: BTreeMap<String, u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub promos: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub match_history: Vec<LoggedMatch>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_week_matches: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub weekly_card: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub news: Vec<String>,
    /// Fields owned by the site (and anything else) that this tool passes through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Universe {
    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    pub fn player_index(&self, name: &str) -> Option<usize> {
        self.players.iter().position(|p| p.name == name)
    }

    pub fn players_in_division<'a>(&'a self, division: &'a str) -> impl Iterator<Item = &'a Player> + 'a {
        self.players.iter().filter(move |p| p.division == division)
    }

    /// Fill derived fields the document may be missing so later stages never
    /// need to special-case absent data.
    pub fn normalize(&mut self, division_threshold: i32) {
        for player in &mut self.players {
            if player.division.is_empty() {
                player.division = division_for(player.elo, division_threshold).to_string();
            }
        }
    }
}

/// Division label for a rating: "Div 1" at or above the threshold, "Div 2" below.
pub fn division_for(elo: i32, threshold: i32) -> &'static str {
    if elo >= threshold { DIVISION_ONE } else { DIVISION_TWO }
}

/// Rivalry key: both names sorted and joined with " vs "
pub fn rivalry_key(a: &str, b: &str) -> String {
    if a <= b {
        format!("{} vs {}", a, b)
    } else {
        format!("{} vs {}", b, a)
    }
}

/// Wrestler on the roster
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub name: String,
    #[serde(default = "default_elo")]
    pub elo: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_elo: Option<i32>,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub division: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub division_rank: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub match_history: Vec<MatchRecord>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_elo() -> i32 {
    DEFAULT_ELO
}

/// An explicit `null` reads the same as a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Player {
    pub fn new(name: &str, elo: i32) -> Self {
        Self {
            name: name.to_string(),
            elo,
            last_elo: None,
            wins: 0,
            losses: 0,
            division: String::new(),
            rank: None,
            division_rank: None,
            match_history: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Prepend a record and keep at most `cap` entries, most recent first.
    pub fn record_match(&mut self, record: MatchRecord, cap: usize) {
        self.match_history.insert(0, record);
        self.match_history.truncate(cap);
    }
}

/// Result label stored on a match record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordResult {
    Win,
    Loss,
    Draw,
}

/// One entry of a wrestler's match history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub result: RecordResult,
    #[serde(rename = "match")]
    pub descriptor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish: Option<String>,
    #[serde(default)]
    pub timestamp: i64,
}

/// One entry of the league-wide match log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedMatch {
    #[serde(rename = "match")]
    pub descriptor: String,
    #[serde(default)]
    pub timestamp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Championship {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub division: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub holder: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub contenders: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Championship {
    pub fn new(name: &str, division: &str, holder: &str) -> Self {
        Self {
            name: name.to_string(),
            division: division.to_string(),
            holder: holder.to_string(),
            contenders: Vec::new(),
            extra: Map::new(),
        }
    }
}
