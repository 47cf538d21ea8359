//! Immutable configuration tables for the Slither core.
//!
//! Every tunable lives here as a plain struct with serde-compatible
//! defaults. Components receive the slices they need by reference at
//! construction; nothing in the crate reads process-wide mutable state.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::grid::Playfield;

/// Default grid: a 600x800 window at 20px cells, with the playable band
/// covering the middle 60% of the rows.
#[must_use]
pub const fn default_playfield() -> Playfield {
    Playfield {
        width: 30,
        height: 40,
        band_top: 8,
        band_bottom: 32,
    }
}

/// Selectable game difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Infinite,
}

impl Difficulty {
    pub const ALL: [Self; 4] = [Self::Easy, Self::Medium, Self::Hard, Self::Infinite];

    /// Stable key used in persisted ranking files.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Infinite => "infinite",
        }
    }
}

/// Per-difficulty rule set. Read-only once a run has started.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub name: String,
    /// Nominal moves per second, informational for hosts.
    pub speed: u32,
    /// Frames between simulation steps at the conventional 60 Hz tick.
    pub move_delay_frames: u32,
    pub wall_collision: bool,
    pub starting_lives: u32,
    /// Milliseconds before food despawns; enforced by hosts, not the core.
    pub food_timeout_ms: Option<u64>,
    pub time_limit_secs: Option<f64>,
}

/// The full difficulty table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultySettings {
    pub profiles: BTreeMap<Difficulty, DifficultyProfile>,
}

impl DifficultySettings {
    #[must_use]
    pub fn profile(&self, difficulty: Difficulty) -> &DifficultyProfile {
        self.profiles
            .get(&difficulty)
            .unwrap_or_else(|| fallback_profile())
    }
}

/// Used when a deserialized table is missing an entry; matches the Easy row.
fn fallback_profile() -> &'static DifficultyProfile {
    static PROFILE: OnceLock<DifficultyProfile> = OnceLock::new();
    PROFILE.get_or_init(|| DifficultyProfile {
        name: "Casual Mode".to_string(),
        speed: 4,
        move_delay_frames: 15,
        wall_collision: true,
        starting_lives: 3,
        food_timeout_ms: None,
        time_limit_secs: Some(35.0),
    })
}

impl Default for DifficultySettings {
    fn default() -> Self {
        let profiles = BTreeMap::from([
            (
                Difficulty::Easy,
                DifficultyProfile {
                    name: "Casual Mode".to_string(),
                    speed: 4,
                    move_delay_frames: 15,
                    wall_collision: true,
                    starting_lives: 3,
                    food_timeout_ms: None,
                    time_limit_secs: Some(35.0),
                },
            ),
            (
                Difficulty::Medium,
                DifficultyProfile {
                    name: "Hard Mode".to_string(),
                    speed: 6,
                    move_delay_frames: 10,
                    wall_collision: true,
                    starting_lives: 1,
                    food_timeout_ms: None,
                    time_limit_secs: Some(60.0),
                },
            ),
            (
                Difficulty::Hard,
                DifficultyProfile {
                    name: "Hell Mode".to_string(),
                    speed: 8,
                    move_delay_frames: 8,
                    wall_collision: true,
                    starting_lives: 1,
                    food_timeout_ms: Some(5_000),
                    time_limit_secs: Some(90.0),
                },
            ),
            (
                Difficulty::Infinite,
                DifficultyProfile {
                    name: "Infinite Mode".to_string(),
                    speed: 8,
                    move_delay_frames: 8,
                    wall_collision: true,
                    starting_lives: 1,
                    food_timeout_ms: Some(5_000),
                    time_limit_secs: None,
                },
            ),
        ]);
        Self { profiles }
    }
}

/// Scoring tables: base value, combo step thresholds, difficulty bonus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreConfig {
    #[serde(default = "ScoreConfig::default_base_score")]
    pub base_score: u32,
    /// Combo threshold -> multiplier. The highest threshold at or below the
    /// current combo count wins (inclusive comparison).
    #[serde(default = "ScoreConfig::default_combo_multiplier")]
    pub combo_multiplier: BTreeMap<u32, f64>,
    #[serde(default = "ScoreConfig::default_difficulty_bonus")]
    pub difficulty_bonus: HashMap<Difficulty, f64>,
}

impl ScoreConfig {
    const fn default_base_score() -> u32 {
        10
    }

    fn default_combo_multiplier() -> BTreeMap<u32, f64> {
        BTreeMap::from([(3, 1.5), (5, 2.0), (7, 2.5), (10, 3.0)])
    }

    fn default_difficulty_bonus() -> HashMap<Difficulty, f64> {
        HashMap::from([
            (Difficulty::Easy, 1.0),
            (Difficulty::Medium, 1.5),
            (Difficulty::Hard, 2.0),
            (Difficulty::Infinite, 2.5),
        ])
    }
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            base_score: Self::default_base_score(),
            combo_multiplier: Self::default_combo_multiplier(),
            difficulty_bonus: Self::default_difficulty_bonus(),
        }
    }
}

/// Respawn and invincibility tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RespawnConfig {
    #[serde(default = "RespawnConfig::default_invincible_secs")]
    pub invincible_secs: f64,
    #[serde(default = "RespawnConfig::default_flash_interval")]
    pub flash_interval_secs: f64,
    /// Minimum Chebyshev clearance (in cells) from existing obstacles, and
    /// the inset from the band edges, for a safe spawn.
    #[serde(default = "RespawnConfig::default_safe_distance")]
    pub safe_distance: i32,
    #[serde(default = "RespawnConfig::default_position_tries")]
    pub position_tries: u32,
}

impl RespawnConfig {
    const fn default_invincible_secs() -> f64 {
        3.0
    }

    const fn default_flash_interval() -> f64 {
        0.2
    }

    const fn default_safe_distance() -> i32 {
        5
    }

    const fn default_position_tries() -> u32 {
        10
    }
}

impl Default for RespawnConfig {
    fn default() -> Self {
        Self {
            invincible_secs: Self::default_invincible_secs(),
            flash_interval_secs: Self::default_flash_interval(),
            safe_distance: Self::default_safe_distance(),
            position_tries: Self::default_position_tries(),
        }
    }
}

/// A named leaderboard partition with its own expiration policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingCategory {
    pub name: String,
    /// Records older than this many hours are dropped on load.
    /// `None` means the category is permanent.
    #[serde(default)]
    pub expire_hours: Option<f64>,
}

/// Ranking store configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingConfig {
    #[serde(default = "RankingConfig::default_path")]
    pub path: PathBuf,
    #[serde(default = "RankingConfig::default_max_records")]
    pub max_records: usize,
    #[serde(default = "RankingConfig::default_min_score_for_record")]
    pub min_score_for_record: u32,
    #[serde(default = "RankingConfig::default_name_max_len")]
    pub name_max_len: usize,
    #[serde(default = "RankingConfig::default_categories")]
    pub categories: BTreeMap<String, RankingCategory>,
}

impl RankingConfig {
    fn default_path() -> PathBuf {
        PathBuf::from("save/rankings.json")
    }

    const fn default_max_records() -> usize {
        10
    }

    const fn default_min_score_for_record() -> u32 {
        50
    }

    const fn default_name_max_len() -> usize {
        10
    }

    fn default_categories() -> BTreeMap<String, RankingCategory> {
        BTreeMap::from([(
            "all_time".to_string(),
            RankingCategory {
                name: "All Time Best".to_string(),
                expire_hours: None,
            },
        )])
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            path: Self::default_path(),
            max_records: Self::default_max_records(),
            min_score_for_record: Self::default_min_score_for_record(),
            name_max_len: Self::default_name_max_len(),
            categories: Self::default_categories(),
        }
    }
}

/// Save store configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveConfig {
    #[serde(default = "SaveConfig::default_path")]
    pub path: PathBuf,
    #[serde(default = "SaveConfig::default_auto_save")]
    pub auto_save: bool,
    #[serde(default = "SaveConfig::default_save_interval")]
    pub save_interval_secs: f64,
}

impl SaveConfig {
    fn default_path() -> PathBuf {
        PathBuf::from("save/game_save.json")
    }

    const fn default_auto_save() -> bool {
        true
    }

    const fn default_save_interval() -> f64 {
        5.0
    }
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            path: Self::default_path(),
            auto_save: Self::default_auto_save(),
            save_interval_secs: Self::default_save_interval(),
        }
    }
}

/// Aggregate configuration handed to a session at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub playfield: Playfield,
    #[serde(default)]
    pub difficulties: DifficultySettings,
    #[serde(default)]
    pub score: ScoreConfig,
    #[serde(default)]
    pub respawn: RespawnConfig,
    #[serde(default = "GameConfig::default_countdown_secs")]
    pub countdown_secs: f64,
    #[serde(default)]
    pub ranking: RankingConfig,
    #[serde(default)]
    pub save: SaveConfig,
}

impl GameConfig {
    const fn default_countdown_secs() -> f64 {
        3.0
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            playfield: Playfield::default(),
            difficulties: DifficultySettings::default(),
            score: ScoreConfig::default(),
            respawn: RespawnConfig::default(),
            countdown_secs: Self::default_countdown_secs(),
            ranking: RankingConfig::default(),
            save: SaveConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_table_matches_rule_sheet() {
        let table = DifficultySettings::default();
        let easy = table.profile(Difficulty::Easy);
        assert_eq!(easy.starting_lives, 3);
        assert_eq!(easy.move_delay_frames, 15);
        assert_eq!(easy.time_limit_secs, Some(35.0));

        let infinite = table.profile(Difficulty::Infinite);
        assert_eq!(infinite.starting_lives, 1);
        assert!(infinite.time_limit_secs.is_none());
        assert_eq!(infinite.food_timeout_ms, Some(5_000));
    }

    #[test]
    fn config_roundtrips_through_json() {
        let cfg = GameConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn empty_json_yields_full_defaults() {
        let cfg: GameConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, GameConfig::default());
    }

    #[test]
    fn playable_band_fits_inside_grid() {
        let field = default_playfield();
        assert!(field.band_top > 0);
        assert!(field.band_bottom < field.height);
        assert!(field.band_top < field.band_bottom);
    }
}
