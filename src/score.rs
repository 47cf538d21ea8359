//! Combo-scaled scoring math.

use crate::config::{Difficulty, ScoreConfig};

/// Multiplier for the current combo count.
///
/// Thresholds are scanned from highest to lowest and the first threshold at
/// or below `combo_count` wins; the comparison is inclusive, so a combo of
/// exactly 3 already earns the `3:` multiplier. Below every threshold the
/// multiplier is 1.0.
#[must_use]
pub fn combo_multiplier(cfg: &ScoreConfig, combo_count: u32) -> f64 {
    cfg.combo_multiplier
        .iter()
        .rev()
        .find(|(threshold, _)| combo_count >= **threshold)
        .map_or(1.0, |(_, multiplier)| *multiplier)
}

/// Bonus factor for the difficulty; unknown difficulties score neutrally.
#[must_use]
pub fn difficulty_bonus(cfg: &ScoreConfig, difficulty: Difficulty) -> f64 {
    cfg.difficulty_bonus.get(&difficulty).copied().unwrap_or(1.0)
}

/// Points awarded for one food capture, truncated to an integer.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn round_score(cfg: &ScoreConfig, combo_count: u32, difficulty: Difficulty) -> u32 {
    let raw = f64::from(cfg.base_score)
        * combo_multiplier(cfg, combo_count)
        * difficulty_bonus(cfg, difficulty);
    raw.max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combo_thresholds_are_inclusive_high_to_low() {
        let cfg = ScoreConfig::default();
        assert!((combo_multiplier(&cfg, 0) - 1.0).abs() < f64::EPSILON);
        assert!((combo_multiplier(&cfg, 2) - 1.0).abs() < f64::EPSILON);
        assert!((combo_multiplier(&cfg, 3) - 1.5).abs() < f64::EPSILON);
        assert!((combo_multiplier(&cfg, 4) - 1.5).abs() < f64::EPSILON);
        assert!((combo_multiplier(&cfg, 5) - 2.0).abs() < f64::EPSILON);
        assert!((combo_multiplier(&cfg, 7) - 2.5).abs() < f64::EPSILON);
        assert!((combo_multiplier(&cfg, 10) - 3.0).abs() < f64::EPSILON);
        assert!((combo_multiplier(&cfg, 64) - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn round_score_truncates_after_both_factors() {
        let cfg = ScoreConfig::default();
        // 10 * 1.0 * 1.5 = 15
        assert_eq!(round_score(&cfg, 1, Difficulty::Medium), 15);
        // 10 * 1.5 * 1.5 = 22.5 -> 22
        assert_eq!(round_score(&cfg, 3, Difficulty::Medium), 22);
        // 10 * 2.5 * 2.5 = 62.5 -> 62
        assert_eq!(round_score(&cfg, 7, Difficulty::Infinite), 62);
        // 10 * 3.0 * 2.0 = 60
        assert_eq!(round_score(&cfg, 12, Difficulty::Hard), 60);
    }
}
