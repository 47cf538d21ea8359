//! Persisted per-difficulty leaderboards with expiration and validation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::{Difficulty, RankingConfig};
use crate::persist;

/// One leaderboard entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankRecord {
    pub name: String,
    pub score: u32,
    pub timestamp: f64,
}

/// category -> difficulty key -> records, sorted descending by score.
type Boards = BTreeMap<String, BTreeMap<String, Vec<RankRecord>>>;

/// Persisted, bounded leaderboards keyed by (category, difficulty).
///
/// Loading never fails: absent, unreadable, or structurally invalid files
/// are replaced by the empty default structure. Every submission rewrites
/// the whole file; flush failures are logged and swallowed so gameplay
/// never stalls on a slow or broken filesystem.
#[derive(Debug, Clone)]
pub struct RankingStore {
    cfg: RankingConfig,
    boards: Boards,
}

impl RankingStore {
    /// Load the persisted boards, falling back to defaults, then drop
    /// expired records for TTL-bearing categories.
    #[must_use]
    pub fn load(cfg: RankingConfig, now: f64) -> Self {
        let boards = persist::read_json::<Boards>(&cfg.path)
            .filter(|boards| {
                let ok = validate(&cfg, boards);
                if !ok {
                    log::warn!(
                        "ranking file {} failed validation, starting fresh",
                        cfg.path.display()
                    );
                }
                ok
            })
            .unwrap_or_else(|| default_boards(&cfg));
        let mut store = Self { cfg, boards };
        store.expire(now);
        store
    }

    /// In-memory store for hosts without persistence (and for tests).
    #[must_use]
    pub fn empty(cfg: RankingConfig) -> Self {
        let boards = default_boards(&cfg);
        Self { cfg, boards }
    }

    fn expire(&mut self, now: f64) {
        for (id, category) in &self.cfg.categories {
            let Some(ttl_hours) = category.expire_hours else {
                continue;
            };
            let cutoff = now - ttl_hours * 3_600.0;
            if let Some(difficulties) = self.boards.get_mut(id) {
                for records in difficulties.values_mut() {
                    records.retain(|record| record.timestamp > cutoff);
                }
            }
        }
    }

    /// Record a finished run in every category.
    ///
    /// Returns the 1-based rank the run landed at per category, or `None`
    /// when it was truncated off the board. The timestamp doubles as the
    /// identity of the just-inserted record when locating its rank.
    #[allow(clippy::float_cmp)]
    pub fn submit(
        &mut self,
        difficulty: Difficulty,
        score: u32,
        player_name: &str,
        now: f64,
    ) -> BTreeMap<String, Option<usize>> {
        let mut ranks = BTreeMap::new();
        let category_ids: Vec<String> = self.cfg.categories.keys().cloned().collect();
        for category_id in category_ids {
            let records = self
                .boards
                .entry(category_id.clone())
                .or_default()
                .entry(difficulty.key().to_string())
                .or_default();

            records.push(RankRecord {
                name: player_name.to_string(),
                score,
                timestamp: now,
            });
            // Stable sort keeps arrival order between equal scores.
            records.sort_by(|a, b| b.score.cmp(&a.score));
            records.truncate(self.cfg.max_records);

            let rank = records
                .iter()
                .position(|record| record.timestamp == now)
                .map(|index| index + 1);
            ranks.insert(category_id, rank);
        }

        if let Err(err) = persist::write_json_atomic(&self.cfg.path, &self.boards) {
            log::warn!("leaderboard flush failed: {err}");
        }
        ranks
    }

    /// Read-only view of one board; unknown keys yield an empty slice.
    #[must_use]
    pub fn query(&self, category: &str, difficulty: Difficulty) -> &[RankRecord] {
        self.boards
            .get(category)
            .and_then(|difficulties| difficulties.get(difficulty.key()))
            .map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub const fn config(&self) -> &RankingConfig {
        &self.cfg
    }
}

fn default_boards(cfg: &RankingConfig) -> Boards {
    cfg.categories
        .keys()
        .map(|category| {
            let difficulties = Difficulty::ALL
                .iter()
                .map(|d| (d.key().to_string(), Vec::new()))
                .collect();
            (category.clone(), difficulties)
        })
        .collect()
}

/// Structural check on a parsed file: every declared category must exist
/// and carry a board for every difficulty. The typed parse already
/// guarantees each board is a homogeneous record list.
fn validate(cfg: &RankingConfig, boards: &Boards) -> bool {
    cfg.categories.keys().all(|category| {
        boards.get(category).is_some_and(|difficulties| {
            Difficulty::ALL
                .iter()
                .all(|d| difficulties.contains_key(d.key()))
        })
    })
}
