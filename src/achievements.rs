//! Achievement catalog and unlock evaluation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::Difficulty;

/// Fixed achievement set. Ids are stable keys in the save profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementId {
    Beginner,
    Score100,
    Score500,
    ComboMaster,
    Survivor,
}

impl AchievementId {
    pub const ALL: [Self; 5] = [
        Self::Beginner,
        Self::Score100,
        Self::Score500,
        Self::ComboMaster,
        Self::Survivor,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Score100 => "score_100",
            Self::Score500 => "score_500",
            Self::ComboMaster => "combo_master",
            Self::Survivor => "survivor",
        }
    }

    /// Display metadata shown by hosts when an unlock toast fires.
    #[must_use]
    pub const fn meta(self) -> AchievementMeta {
        match self {
            Self::Beginner => AchievementMeta {
                name: "First Steps",
                description: "Finish your first game",
                icon: "🎮",
            },
            Self::Score100 => AchievementMeta {
                name: "Rising Star",
                description: "Score 100 points in a single run",
                icon: "🌟",
            },
            Self::Score500 => AchievementMeta {
                name: "Serpent King",
                description: "Score 500 points in a single run",
                icon: "👑",
            },
            Self::ComboMaster => AchievementMeta {
                name: "Combo Master",
                description: "Chain a 10x combo",
                icon: "⚡",
            },
            Self::Survivor => AchievementMeta {
                name: "Survivor",
                description: "Last five minutes in Hell Mode",
                icon: "🛡️",
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AchievementMeta {
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

/// Persisted unlock entry, keyed by achievement id in the save profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnlockRecord {
    pub unlock_time: f64,
    pub name: String,
    pub description: String,
    pub icon: String,
}

impl UnlockRecord {
    #[must_use]
    pub fn stamped(id: AchievementId, now: f64) -> Self {
        let meta = id.meta();
        Self {
            unlock_time: now,
            name: meta.name.to_string(),
            description: meta.description.to_string(),
            icon: meta.icon.to_string(),
        }
    }
}

/// Read-only view of one finished (or in-progress) run, everything the
/// unlock predicates need.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSnapshot {
    pub total_games: u32,
    pub current_score: u32,
    pub combo_count: u32,
    pub difficulty: Difficulty,
    pub survival_time_secs: f64,
}

const SCORE_RISING_STAR: u32 = 100;
const SCORE_SERPENT_KING: u32 = 500;
const COMBO_MASTER_CHAIN: u32 = 10;
const SURVIVOR_SECS: f64 = 300.0;

fn condition_met(id: AchievementId, snapshot: &SessionSnapshot) -> bool {
    match id {
        AchievementId::Beginner => snapshot.total_games == 1,
        AchievementId::Score100 => snapshot.current_score >= SCORE_RISING_STAR,
        AchievementId::Score500 => snapshot.current_score >= SCORE_SERPENT_KING,
        AchievementId::ComboMaster => snapshot.combo_count >= COMBO_MASTER_CHAIN,
        AchievementId::Survivor => {
            snapshot.difficulty == Difficulty::Hard
                && snapshot.survival_time_secs >= SURVIVOR_SECS
        }
    }
}

/// Pure unlock pass: returns ids whose predicate holds and which are not
/// already in the unlocked set. Re-evaluating the same snapshot after the
/// unlocks were recorded yields nothing, so the pass is idempotent.
#[must_use]
pub fn evaluate(
    snapshot: &SessionSnapshot,
    unlocked: &BTreeMap<String, UnlockRecord>,
) -> Vec<AchievementId> {
    AchievementId::ALL
        .into_iter()
        .filter(|id| !unlocked.contains_key(id.as_str()))
        .filter(|id| condition_met(*id, snapshot))
        .collect()
}
