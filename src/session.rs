//! Game session state machine.
//!
//! One `GameSession` owns the live snake and food plus the persisted
//! stores, and advances once per host frame via [`GameSession::tick`].
//! Input arrives as discrete [`InputEvent`] values; every (phase, event)
//! pair not listed in the transition match is a deliberate no-op, so the
//! machine is total and never errors on input.

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::achievements::{self, AchievementId, SessionSnapshot, UnlockRecord};
use crate::config::{Difficulty, GameConfig};
use crate::food::Food;
use crate::grid::{Direction, Position};
use crate::ranking::{RankRecord, RankingStore};
use crate::save::{SaveStore, Theme};
use crate::snake::{MoveOutcome, Snake};

/// Name recorded when the player cancels out of name entry.
const DEFAULT_PLAYER_NAME: &str = "Player";

/// Top-level session phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    DifficultySelect,
    Ready,
    Countdown,
    Playing,
    Paused,
    GameOver,
    NameInput,
    Leaderboard,
}

/// Discrete input intents forwarded by the presentation layer. How they
/// were produced (keys, buttons, swipes) is the host's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    SelectDifficulty(Difficulty),
    Steer(Direction),
    /// Confirm / start: begins the countdown, restarts after game over,
    /// submits the entered name.
    Start,
    Pause,
    /// Back / cancel.
    Back,
    Char(char),
    Backspace,
    CycleCategory,
    ShowLeaderboard,
    ToggleTheme,
}

/// The running game session.
pub struct GameSession {
    cfg: GameConfig,
    rng: ChaCha20Rng,
    ranking: RankingStore,
    save: SaveStore,
    phase: GamePhase,
    difficulty: Difficulty,
    snake: Snake,
    food: Food,
    countdown_start: f64,
    play_start: f64,
    input_text: String,
    leaderboard_page: String,
    last_unlocks: Vec<AchievementId>,
    last_ranks: BTreeMap<String, Option<usize>>,
    /// Score awaiting a player name before it reaches the leaderboard.
    pending_submission: Option<u32>,
}

impl GameSession {
    /// Build a session: loads both stores (never fails; corrupt files
    /// degrade to defaults) and seeds the simulation RNG.
    #[must_use]
    pub fn new(cfg: GameConfig, seed: u64, now: f64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let ranking = RankingStore::load(cfg.ranking.clone(), now);
        let save = SaveStore::load(cfg.save.clone(), now);
        let difficulty = Difficulty::Hard;
        let snake = Snake::new(
            &mut rng,
            &cfg.playfield,
            cfg.difficulties.profile(difficulty),
            &cfg.respawn,
            difficulty,
        );
        let body = snake.body_cells();
        let food = Food::new(&mut rng, &cfg.playfield, &body, now);
        let leaderboard_page = ranking
            .config()
            .categories
            .keys()
            .next()
            .cloned()
            .unwrap_or_else(|| "all_time".to_string());
        Self {
            cfg,
            rng,
            ranking,
            save,
            phase: GamePhase::DifficultySelect,
            difficulty,
            snake,
            food,
            countdown_start: 0.0,
            play_start: 0.0,
            input_text: String::new(),
            leaderboard_page,
            last_unlocks: Vec::new(),
            last_ranks: BTreeMap::new(),
            pending_submission: None,
        }
    }

    /// Advance the session by one frame.
    pub fn tick(&mut self, now: f64) {
        match self.phase {
            GamePhase::Countdown => {
                // Recomputed from wall time every tick; a stalled host
                // frame cannot stretch the countdown.
                if now - self.countdown_start >= self.cfg.countdown_secs {
                    self.phase = GamePhase::Playing;
                    self.play_start = now;
                }
            }
            GamePhase::Playing => self.tick_playing(now),
            _ => {}
        }
    }

    fn tick_playing(&mut self, now: f64) {
        self.snake.tick_invincibility(now, &self.cfg.respawn);

        let profile = self.cfg.difficulties.profile(self.difficulty);
        let wall_pass = !profile.wall_collision;
        let time_limit = profile.time_limit_secs;
        if let Some(limit) = time_limit {
            if now - self.play_start >= limit {
                log::debug!("time limit reached, ending run");
                self.end_run(now);
                return;
            }
        }

        if self.snake.should_step() {
            match self.snake.advance(&self.cfg.playfield, wall_pass) {
                MoveOutcome::Collided => {
                    let survived =
                        self.snake
                            .respawn(&mut self.rng, &self.cfg.playfield, &self.cfg.respawn, now);
                    if !survived {
                        self.end_run(now);
                        return;
                    }
                }
                MoveOutcome::Moved => {
                    if self.snake.head() == Some(self.food.position()) {
                        self.snake.grow(&self.cfg.score);
                        self.unlock_achievements(now);
                        let body = self.snake.body_cells();
                        self.food.respawn(&mut self.rng, &self.cfg.playfield, &body, now);
                    }
                }
            }
        }

        // Autosave timer; interval-gated inside the store.
        self.save.flush(now, false);
    }

    /// Route a discrete input event through the transition table.
    pub fn handle_event(&mut self, event: InputEvent, now: f64) {
        if self.phase == GamePhase::NameInput {
            self.handle_name_input(event, now);
            return;
        }

        match (self.phase, event) {
            (_, InputEvent::Back) if self.phase != GamePhase::DifficultySelect => {
                self.phase = GamePhase::DifficultySelect;
            }
            (GamePhase::DifficultySelect, InputEvent::SelectDifficulty(difficulty)) => {
                self.select_difficulty(difficulty, now);
            }
            (
                GamePhase::DifficultySelect | GamePhase::GameOver,
                InputEvent::ShowLeaderboard,
            ) => {
                self.phase = GamePhase::Leaderboard;
            }
            (GamePhase::DifficultySelect, InputEvent::ToggleTheme) => {
                self.save.toggle_theme(now);
            }
            (GamePhase::Ready, InputEvent::Start) => self.start_countdown(now),
            (GamePhase::Playing, InputEvent::Steer(direction)) => self.snake.steer(direction),
            (GamePhase::Playing, InputEvent::Pause) => self.phase = GamePhase::Paused,
            (GamePhase::Paused, InputEvent::Pause | InputEvent::Start) => {
                self.phase = GamePhase::Playing;
            }
            (GamePhase::GameOver, InputEvent::Start) => self.reset_run(now),
            (GamePhase::Leaderboard, InputEvent::CycleCategory) => self.cycle_category(),
            _ => {}
        }
    }

    fn handle_name_input(&mut self, event: InputEvent, now: f64) {
        match event {
            InputEvent::Char(c) => {
                // Over-length and non-printable input is dropped silently.
                if !c.is_control() && self.input_text.chars().count() < self.cfg.ranking.name_max_len
                {
                    self.input_text.push(c);
                }
            }
            InputEvent::Backspace => {
                self.input_text.pop();
            }
            InputEvent::Start => {
                if !self.input_text.is_empty() {
                    let name = std::mem::take(&mut self.input_text);
                    self.finalize_submission(&name, now);
                }
            }
            InputEvent::Back => {
                self.input_text.clear();
                self.finalize_submission(DEFAULT_PLAYER_NAME, now);
            }
            _ => {}
        }
    }

    fn select_difficulty(&mut self, difficulty: Difficulty, now: f64) {
        self.difficulty = difficulty;
        self.snake = Snake::new(
            &mut self.rng,
            &self.cfg.playfield,
            self.cfg.difficulties.profile(difficulty),
            &self.cfg.respawn,
            difficulty,
        );
        let body = self.snake.body_cells();
        self.food.respawn(&mut self.rng, &self.cfg.playfield, &body, now);
        self.phase = GamePhase::Ready;
    }

    fn start_countdown(&mut self, now: f64) {
        self.phase = GamePhase::Countdown;
        self.countdown_start = now;
        self.play_start = now;
        self.last_unlocks.clear();
        self.last_ranks.clear();
    }

    fn reset_run(&mut self, now: f64) {
        self.snake.reset(
            &mut self.rng,
            &self.cfg.playfield,
            self.cfg.difficulties.profile(self.difficulty),
            &self.cfg.respawn,
        );
        let body = self.snake.body_cells();
        self.food.respawn(&mut self.rng, &self.cfg.playfield, &body, now);
        self.phase = GamePhase::Ready;
    }

    fn cycle_category(&mut self) {
        let keys: Vec<&String> = self.ranking.config().categories.keys().collect();
        if keys.is_empty() {
            return;
        }
        let index = keys
            .iter()
            .position(|key| **key == self.leaderboard_page)
            .unwrap_or(0);
        self.leaderboard_page = keys[(index + 1) % keys.len()].clone();
    }

    /// Close out the run: fold the score into the profile, evaluate
    /// achievements (after the score mutation, never before), then route
    /// through name entry when the score is board-eligible.
    fn end_run(&mut self, now: f64) {
        let score = self.snake.score();
        self.save.update(now, |profile| {
            profile.total_games += 1;
            profile.total_score += u64::from(score);
            if score > profile.high_score {
                profile.high_score = score;
            }
        });
        self.unlock_achievements(now);
        self.save.flush(now, true);

        if score >= self.cfg.ranking.min_score_for_record {
            self.input_text.clear();
            self.pending_submission = Some(score);
            self.phase = GamePhase::NameInput;
        } else {
            self.phase = GamePhase::GameOver;
        }
    }

    fn finalize_submission(&mut self, name: &str, now: f64) {
        if let Some(score) = self.pending_submission.take() {
            self.last_ranks = self.ranking.submit(self.difficulty, score, name, now);
        }
        self.phase = GamePhase::GameOver;
    }

    fn unlock_achievements(&mut self, now: f64) {
        let snapshot = SessionSnapshot {
            total_games: self.save.profile().total_games,
            current_score: self.snake.score(),
            combo_count: self.snake.combo_count(),
            difficulty: self.difficulty,
            survival_time_secs: now - self.play_start,
        };
        let new_ids = achievements::evaluate(&snapshot, &self.save.profile().achievements);
        if new_ids.is_empty() {
            return;
        }
        self.save.update(now, |profile| {
            for id in &new_ids {
                profile
                    .achievements
                    .insert(id.as_str().to_string(), UnlockRecord::stamped(*id, now));
            }
        });
        self.last_unlocks.extend(new_ids);
    }

    // ----- read-only snapshot accessors for the presentation layer -----

    #[must_use]
    pub const fn phase(&self) -> GamePhase {
        self.phase
    }

    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub const fn snake(&self) -> &Snake {
        &self.snake
    }

    #[must_use]
    pub const fn food_position(&self) -> Position {
        self.food.position()
    }

    #[must_use]
    pub const fn food_spawn_time(&self) -> f64 {
        self.food.spawn_time()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.snake.score()
    }

    #[must_use]
    pub fn lives(&self) -> u32 {
        self.snake.lives()
    }

    /// Seconds left on the countdown clock, clamped at zero.
    #[must_use]
    pub fn countdown_remaining(&self, now: f64) -> f64 {
        (self.cfg.countdown_secs - (now - self.countdown_start)).max(0.0)
    }

    /// Remaining play time for limited difficulties.
    #[must_use]
    pub fn time_left(&self, now: f64) -> Option<f64> {
        let limit = self
            .cfg
            .difficulties
            .profile(self.difficulty)
            .time_limit_secs?;
        Some((limit - (now - self.play_start)).max(0.0))
    }

    #[must_use]
    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    #[must_use]
    pub fn leaderboard_category(&self) -> &str {
        &self.leaderboard_page
    }

    #[must_use]
    pub fn leaderboard_rows(&self) -> &[RankRecord] {
        self.ranking.query(&self.leaderboard_page, self.difficulty)
    }

    #[must_use]
    pub fn leaderboard(&self, category: &str, difficulty: Difficulty) -> &[RankRecord] {
        self.ranking.query(category, difficulty)
    }

    /// Achievements unlocked during the current or just-finished run.
    #[must_use]
    pub fn last_unlocks(&self) -> &[AchievementId] {
        &self.last_unlocks
    }

    /// Per-category ranks earned by the last submitted score.
    #[must_use]
    pub const fn last_ranks(&self) -> &BTreeMap<String, Option<usize>> {
        &self.last_ranks
    }

    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.save.theme()
    }

    #[must_use]
    pub const fn profile(&self) -> &crate::save::SaveProfile {
        self.save.profile()
    }

    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.cfg
    }
}
