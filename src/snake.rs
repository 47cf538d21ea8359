//! Snake entity: movement, collision, growth, respawn, cadence.

use std::collections::VecDeque;

use rand::Rng;

use crate::config::{Difficulty, DifficultyProfile, RespawnConfig, ScoreConfig};
use crate::grid::{Direction, Playfield, Position};
use crate::score;

/// Result of one simulation step. Collisions are expected signals for the
/// session machine, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    Collided,
}

/// Search the playable band for a cell with at least `safe_distance` cells
/// of Chebyshev clearance from every obstacle.
///
/// The search is inset from the band edges by `safe_distance` and bounded
/// by `position_tries` attempts; on exhaustion it degrades to the band
/// center. The returned position is always inside the playfield.
pub fn spawn_safe<R: Rng + ?Sized>(
    rng: &mut R,
    field: &Playfield,
    obstacles: &[Position],
    cfg: &RespawnConfig,
) -> Position {
    let x_lo = cfg.safe_distance;
    let x_hi = field.width - cfg.safe_distance - 1;
    let y_lo = field.band_top + cfg.safe_distance;
    let y_hi = field.band_bottom - cfg.safe_distance - 1;
    if x_lo >= x_hi || y_lo >= y_hi {
        return field.band_center();
    }

    for _ in 0..cfg.position_tries {
        let candidate = Position::new(rng.gen_range(x_lo..x_hi), rng.gen_range(y_lo..y_hi));
        let clear = obstacles
            .iter()
            .all(|cell| candidate.chebyshev_distance(*cell) >= cfg.safe_distance);
        if clear {
            return candidate;
        }
    }
    field.band_center()
}

/// The live snake for one run.
///
/// `length` is the logical target length; the body trails behind it by one
/// step while growth is pending, so `body.len() <= length` always holds
/// after a successful step.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
    length: usize,
    lives: u32,
    combo_count: u32,
    score: u32,
    invincible: bool,
    invincible_since: f64,
    flash_at: f64,
    visible: bool,
    move_counter: u32,
    move_delay_frames: u32,
    difficulty: Difficulty,
}

impl Snake {
    /// Spawn a fresh snake for the given difficulty profile.
    pub fn new<R: Rng + ?Sized>(
        rng: &mut R,
        field: &Playfield,
        profile: &DifficultyProfile,
        respawn_cfg: &RespawnConfig,
        difficulty: Difficulty,
    ) -> Self {
        let spawn = spawn_safe(rng, field, &[], respawn_cfg);
        Self {
            body: VecDeque::from([spawn]),
            direction: Direction::Right,
            length: 1,
            lives: profile.starting_lives,
            combo_count: 0,
            score: 0,
            invincible: false,
            invincible_since: 0.0,
            flash_at: 0.0,
            visible: true,
            move_counter: 0,
            move_delay_frames: profile.move_delay_frames,
            difficulty,
        }
    }

    /// Reset run state for a restart on the same difficulty.
    pub fn reset<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        field: &Playfield,
        profile: &DifficultyProfile,
        respawn_cfg: &RespawnConfig,
    ) {
        let obstacles: Vec<Position> = self.body.iter().copied().collect();
        let spawn = spawn_safe(rng, field, &obstacles, respawn_cfg);
        self.body = VecDeque::from([spawn]);
        self.direction = Direction::Right;
        self.length = 1;
        self.lives = profile.starting_lives;
        self.combo_count = 0;
        self.score = 0;
        self.invincible = false;
        self.invincible_since = 0.0;
        self.flash_at = 0.0;
        self.visible = true;
        self.move_counter = 0;
        self.move_delay_frames = profile.move_delay_frames;
    }

    /// Advance one step in the current direction.
    ///
    /// With `wall_pass` the next head wraps modulo the grid; without it,
    /// leaving the grid collides. Self-collision excludes the current tail
    /// cell, which vacates during the same step.
    pub fn advance(&mut self, field: &Playfield, wall_pass: bool) -> MoveOutcome {
        let Some(head) = self.body.front().copied() else {
            return MoveOutcome::Collided;
        };
        let (dx, dy) = self.direction.delta();
        let mut next = Position::new(head.x + dx, head.y + dy);
        if wall_pass {
            next = field.wrap(next);
        } else if !field.contains(next) {
            return MoveOutcome::Collided;
        }

        let tail_index = self.body.len().saturating_sub(1);
        if self.body.iter().take(tail_index).any(|cell| *cell == next) {
            return MoveOutcome::Collided;
        }

        self.body.push_front(next);
        if self.body.len() > self.length {
            self.body.pop_back();
        }
        MoveOutcome::Moved
    }

    /// Grow after a food capture and bank the combo-scaled round score.
    pub fn grow(&mut self, score_cfg: &ScoreConfig) {
        self.length += 1;
        self.combo_count += 1;
        self.score = self
            .score
            .saturating_add(score::round_score(score_cfg, self.combo_count, self.difficulty));
    }

    /// Spend a life and relocate to a safe cell, arming the invincibility
    /// window. Returns false when no lives remain; the caller treats that
    /// as the terminal collision.
    pub fn respawn<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        field: &Playfield,
        respawn_cfg: &RespawnConfig,
        now: f64,
    ) -> bool {
        if self.lives == 0 {
            return false;
        }
        self.lives -= 1;
        self.combo_count = 0;
        let obstacles: Vec<Position> = self.body.iter().copied().collect();
        let spawn = spawn_safe(rng, field, &obstacles, respawn_cfg);
        self.body = VecDeque::from([spawn]);
        self.invincible = true;
        self.invincible_since = now;
        self.flash_at = now;
        self.visible = true;
        true
    }

    /// Drive the post-respawn flash window. Clears invincibility once the
    /// configured duration has elapsed, forcing visibility back on.
    pub fn tick_invincibility(&mut self, now: f64, respawn_cfg: &RespawnConfig) {
        if !self.invincible {
            return;
        }
        if now - self.invincible_since >= respawn_cfg.invincible_secs {
            self.invincible = false;
            self.visible = true;
        } else if now - self.flash_at >= respawn_cfg.flash_interval_secs {
            self.visible = !self.visible;
            self.flash_at = now;
        }
    }

    /// Apply a direction intent. Exact reversals are silently ignored.
    pub fn steer(&mut self, direction: Direction) {
        if !direction.is_reversal_of(self.direction) {
            self.direction = direction;
        }
    }

    /// Free-running cadence gate: true once per `move_delay_frames` calls.
    pub fn should_step(&mut self) -> bool {
        self.move_counter += 1;
        if self.move_counter >= self.move_delay_frames {
            self.move_counter = 0;
            return true;
        }
        false
    }

    #[must_use]
    pub fn head(&self) -> Option<Position> {
        self.body.front().copied()
    }

    #[must_use]
    pub fn body(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    #[must_use]
    pub fn body_cells(&self) -> Vec<Position> {
        self.body.iter().copied().collect()
    }

    #[must_use]
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub const fn length(&self) -> usize {
        self.length
    }

    #[must_use]
    pub const fn lives(&self) -> u32 {
        self.lives
    }

    #[must_use]
    pub const fn combo_count(&self) -> u32 {
        self.combo_count
    }

    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub const fn is_invincible(&self) -> bool {
        self.invincible
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[cfg(test)]
    pub(crate) fn set_body_for_test(&mut self, cells: &[Position], direction: Direction) {
        self.body = cells.iter().copied().collect();
        self.length = cells.len();
        self.direction = direction;
    }
}
