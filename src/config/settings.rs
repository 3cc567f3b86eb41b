use std::path::PathBuf;

pub const DEFAULT_UNIVERSE_PATH: &str = "universe.json";
pub const UNIVERSE_PATH_ENV: &str = "UNIVERSE_PATH";

#[derive(Debug, Clone)]
pub struct RatingSettings {
    pub storyline_k: f64,
    pub chaos_k: f64,
    /// Half-width of the chaos term; the term is drawn from [-amplitude, +amplitude)
    pub chaos_amplitude: f64,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            storyline_k: 64.0,
            chaos_k: 32.0,
            chaos_amplitude: 2.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HistorySettings {
    pub player_history_cap: usize,
    pub global_history_cap: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            player_history_cap: 20,
            global_history_cap: 500,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RankingSettings {
    pub division_threshold: i32,
    pub contender_count: usize,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            division_threshold: 1500,
            contender_count: 5,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CardSettings {
    pub weekly_slots: usize,
    pub triple_threat_every: usize,
}

impl Default for CardSettings {
    fn default() -> Self {
        Self {
            weekly_slots: 10,
            triple_threat_every: 3,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub universe_path: PathBuf,
    pub rating: RatingSettings,
    pub history: HistorySettings,
    pub ranking: RankingSettings,
    pub card: CardSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            universe_path: Self::universe_path_from_env(),
            rating: RatingSettings::default(),
            history: HistorySettings::default(),
            ranking: RankingSettings::default(),
            card: CardSettings::default(),
        }
    }

    /// Apply a `--universe` override on top of the environment/default path.
    pub fn with_universe_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.universe_path = path;
        }
        self
    }

    fn universe_path_from_env() -> PathBuf {
        std::env::var(UNIVERSE_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_UNIVERSE_PATH))
    }
}
