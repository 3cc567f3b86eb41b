use chrono::{FixedOffset, NaiveDate, TimeZone};
use std::fmt;

/// Dated matches are pinned to 11:00 US Central (standard time).
const MATCH_HOUR: u32 = 11;
const CENTRAL_OFFSET_SECS: i32 = 6 * 3600;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchType {
    Singles,
    TripleThreat,
    FourWay,
    FiveWay,
    SixWay,
    EightWay,
    BattleRoyal,
}

impl MatchType {
    /// Case-insensitive lookup, accepting the aliases used in older cards
    /// (`Fatal4Way`, `6ManTag`).
    pub fn from_name(name: &str) -> Option<Self> {
        let key: String = name
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();

        match key.as_str() {
            "singles" | "single" => Some(MatchType::Singles),
            "triplethreat" => Some(MatchType::TripleThreat),
            "fourway" | "fatal4way" | "fatalfourway" => Some(MatchType::FourWay),
            "fiveway" => Some(MatchType::FiveWay),
            "sixway" | "6mantag" | "sixmantag" => Some(MatchType::SixWay),
            "eightway" => Some(MatchType::EightWay),
            "battleroyal" | "battleroyale" => Some(MatchType::BattleRoyal),
            _ => None,
        }
    }

    /// Type implied by the number of wrestlers in the ring
    pub fn for_field_size(size: usize) -> Option<Self> {
        match size {
            2 => Some(MatchType::Singles),
            3 => Some(MatchType::TripleThreat),
            4 => Some(MatchType::FourWay),
            5 => Some(MatchType::FiveWay),
            6 => Some(MatchType::SixWay),
            8 => Some(MatchType::EightWay),
            n if n > 8 => Some(MatchType::BattleRoyal),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchType::Singles => "Singles",
            MatchType::TripleThreat => "TripleThreat",
            MatchType::FourWay => "FourWay",
            MatchType::FiveWay => "FiveWay",
            MatchType::SixWay => "SixWay",
            MatchType::EightWay => "EightWay",
            MatchType::BattleRoyal => "BattleRoyal",
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which of the two descriptor spellings a match was written in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorForm {
    /// `Singles(PPV): A vs B | 2025-01-04`
    Inline,
    /// `MatchType: Singles | A vs B | Finish: Pinfall`
    Piped,
}

/// A match descriptor parsed once into structured fields
#[derive(Debug, Clone, PartialEq)]
pub struct MatchEvent {
    pub descriptor: String,
    pub form: DescriptorForm,
    pub match_type: MatchType,
    /// Winner first unless the match is a draw
    pub participants: Vec<String>,
    pub is_draw: bool,
    pub is_storyline: bool,
    pub is_ppv: bool,
    pub finish: Option<String>,
    pub date_part: Option<NaiveDate>,
}

impl MatchEvent {
    pub fn winner(&self) -> Option<&str> {
        if self.is_draw {
            None
        } else {
            self.participants.first().map(String::as_str)
        }
    }

    pub fn losers(&self) -> &[String] {
        if self.is_draw {
            &[]
        } else {
            self.participants.get(1..).unwrap_or(&[])
        }
    }

    /// Epoch millis for this match: the explicit date when given, else `now_ms`.
    pub fn timestamp(&self, now_ms: i64) -> i64 {
        self.date_part
            .and_then(date_to_millis)
            .unwrap_or(now_ms)
    }
}

fn date_to_millis(date: NaiveDate) -> Option<i64> {
    let central = FixedOffset::west_opt(CENTRAL_OFFSET_SECS)?;
    let local = date.and_hms_opt(MATCH_HOUR, 0, 0)?;
    central
        .from_local_datetime(&local)
        .single()
        .map(|dt| dt.timestamp_millis())
}
