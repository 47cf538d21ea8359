//! Slither Game Engine
//!
//! Platform-agnostic core logic for the Slither arcade snake game: the
//! grid simulation, scoring and combo progression, achievement unlocks,
//! and the persisted leaderboard and save-profile stores. Rendering,
//! window plumbing, and input decoding live in host crates; they drive
//! [`GameSession`] with discrete events and read back immutable snapshots.

pub mod achievements;
pub mod config;
pub mod food;
pub mod grid;
pub mod persist;
pub mod ranking;
pub mod save;
pub mod score;
pub mod session;
pub mod snake;

// Re-export commonly used types
pub use achievements::{AchievementId, AchievementMeta, SessionSnapshot, UnlockRecord};
pub use config::{
    Difficulty, DifficultyProfile, DifficultySettings, GameConfig, RankingCategory, RankingConfig,
    RespawnConfig, SaveConfig, ScoreConfig,
};
pub use food::Food;
pub use grid::{Direction, Playfield, Position};
pub use persist::StoreError;
pub use ranking::{RankRecord, RankingStore};
pub use save::{SaveProfile, SaveStore, Theme};
pub use score::{combo_multiplier, difficulty_bonus, round_score};
pub use session::{GamePhase, GameSession, InputEvent};
pub use snake::{MoveOutcome, Snake, spawn_safe};
