use crate::domain::MatchType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromoTagline {
    Storyline,
    Upset,
    Dominant,
}

impl PromoTagline {
    /// Storyline matches always read as storyline; otherwise an upset is a
    /// win over a higher-rated rival.
    pub fn for_match(is_storyline: bool, winner_elo: i32, rival_elo: i32) -> Self {
        if is_storyline {
            PromoTagline::Storyline
        } else if winner_elo < rival_elo {
            PromoTagline::Upset
        } else {
            PromoTagline::Dominant
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PromoTagline::Storyline => "🔥 Storyline continues!",
            PromoTagline::Upset => "💥 Surprise upset!",
            PromoTagline::Dominant => "💪 Dominant performance!",
        }
    }
}

pub fn compose_promo(winner: &str, rival: &str, heat: u32, match_type: MatchType, tagline: PromoTagline) -> String {
    format!(
        "{} cuts a promo: \"I’ve beaten {} {} {} now. That {} match was just the beginning!\" {}",
        winner,
        rival,
        heat,
        if heat == 1 { "time" } else { "times" },
        match_type,
        tagline.as_str()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_promo_text() {
        let promo = compose_promo("Narky", "Ravroid", 3, MatchType::TripleThreat, PromoTagline::Storyline);
        assert_eq!(
            promo,
            "Narky cuts a promo: \"I’ve beaten Ravroid 3 times now. That TripleThreat match was just the beginning!\" 🔥 Storyline continues!"
        );
    }

    #[test]
    fn test_first_meeting_is_singular() {
        let promo = compose_promo("A", "B", 1, MatchType::Singles, PromoTagline::Dominant);
        assert!(promo.contains("beaten B 1 time now"));
    }

    #[test]
    fn test_tagline_selection() {
        assert_eq!(PromoTagline::for_match(true, 1400, 1600), PromoTagline::Storyline);
        assert_eq!(PromoTagline::for_match(false, 1400, 1600), PromoTagline::Upset);
        assert_eq!(PromoTagline::for_match(false, 1600, 1600), PromoTagline::Dominant);
    }
}
