//! Persisted player profile with interval-gated autosave.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::achievements::UnlockRecord;
use crate::config::SaveConfig;
use crate::persist;

/// Host color theme, persisted with the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// The single per-installation profile record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SaveProfile {
    #[serde(default)]
    pub high_score: u32,
    #[serde(default)]
    pub achievements: BTreeMap<String, UnlockRecord>,
    #[serde(default)]
    pub current_theme: Theme,
    #[serde(default)]
    pub total_games: u32,
    #[serde(default)]
    pub total_score: u64,
}

/// File-backed profile store.
///
/// `load` never fails; a missing or damaged file becomes the default
/// profile. Writes are gated by the autosave interval unless forced, and a
/// failed write is a logged diagnostic, not an error the game sees.
#[derive(Debug, Clone)]
pub struct SaveStore {
    cfg: SaveConfig,
    profile: SaveProfile,
    last_save: f64,
}

impl SaveStore {
    #[must_use]
    pub fn load(cfg: SaveConfig, now: f64) -> Self {
        let profile = persist::read_json(&cfg.path).unwrap_or_default();
        Self {
            cfg,
            profile,
            last_save: now,
        }
    }

    /// Write the profile when forced, or when autosave is on and the
    /// configured interval has elapsed since the last write. No-op
    /// otherwise.
    pub fn flush(&mut self, now: f64, force: bool) {
        let interval_due =
            self.cfg.auto_save && now - self.last_save >= self.cfg.save_interval_secs;
        if !(force || interval_due) {
            return;
        }
        match persist::write_json_atomic(&self.cfg.path, &self.profile) {
            Ok(()) => self.last_save = now,
            Err(err) => log::warn!("profile flush failed: {err}"),
        }
    }

    /// Mutate the profile and, when autosave is enabled, attempt an
    /// interval-gated flush. "Auto" still respects the interval; only
    /// `flush(now, true)` writes unconditionally.
    pub fn update<R>(&mut self, now: f64, mutate: impl FnOnce(&mut SaveProfile) -> R) -> R {
        let result = mutate(&mut self.profile);
        if self.cfg.auto_save {
            self.flush(now, false);
        }
        result
    }

    #[must_use]
    pub const fn profile(&self) -> &SaveProfile {
        &self.profile
    }

    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.profile.current_theme
    }

    pub fn toggle_theme(&mut self, now: f64) -> Theme {
        self.update(now, |profile| {
            profile.current_theme = profile.current_theme.toggled();
            profile.current_theme
        })
    }
}
