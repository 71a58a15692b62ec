//! Training settings
//!
//! A settings snapshot is read-only once handed to the engine; changes arrive as
//! a whole new snapshot. Persisted to LocalStorage on web.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Training mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TrainingMode {
    /// Stationary targets that expire after a short time-to-live
    #[default]
    Static,
    /// Targets drift and bounce off the surface edges
    Moving,
    /// Half-size stationary targets
    Precision,
    /// Stationary targets, session ends after a fixed duration
    TimeAttack,
}

impl TrainingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrainingMode::Static => "static",
            TrainingMode::Moving => "moving",
            TrainingMode::Precision => "precision",
            TrainingMode::TimeAttack => "time-attack",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "static" => Some(TrainingMode::Static),
            "moving" => Some(TrainingMode::Moving),
            "precision" => Some(TrainingMode::Precision),
            "time-attack" | "time_attack" | "timeattack" => Some(TrainingMode::TimeAttack),
            _ => None,
        }
    }

    /// Extra radius multiplier applied after difficulty
    pub fn radius_factor(&self) -> f32 {
        match self {
            TrainingMode::Precision => PRECISION_RADIUS_FACTOR,
            _ => 1.0,
        }
    }
}

/// Difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Target radius multiplier
    pub fn radius_factor(&self) -> f32 {
        match self {
            Difficulty::Easy => EASY_RADIUS_FACTOR,
            Difficulty::Medium => 1.0,
            Difficulty::Hard => HARD_RADIUS_FACTOR,
        }
    }

    /// Spawn interval multiplier
    pub fn interval_factor(&self) -> f64 {
        match self {
            Difficulty::Easy => EASY_INTERVAL_FACTOR,
            Difficulty::Medium => 1.0,
            Difficulty::Hard => HARD_INTERVAL_FACTOR,
        }
    }

    /// Moving-target speed contributed by difficulty (0 = none, use the mode fallback)
    pub fn base_speed(&self) -> f32 {
        match self {
            Difficulty::Easy => EASY_SPEED,
            Difficulty::Medium => 0.0,
            Difficulty::Hard => HARD_SPEED,
        }
    }
}

/// One player-facing settings edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsChange {
    Mode(TrainingMode),
    Difficulty(Difficulty),
    ToggleSound,
}

impl SettingsChange {
    /// Keyboard shortcut: 1-4 pick the mode, E/M/H the difficulty, S toggles sound
    pub fn from_key(key: &str) -> Option<Self> {
        let change = match key {
            "1" => Self::Mode(TrainingMode::Static),
            "2" => Self::Mode(TrainingMode::Moving),
            "3" => Self::Mode(TrainingMode::Precision),
            "4" => Self::Mode(TrainingMode::TimeAttack),
            "e" | "E" => Self::Difficulty(Difficulty::Easy),
            "m" | "M" => Self::Difficulty(Difficulty::Medium),
            "h" | "H" => Self::Difficulty(Difficulty::Hard),
            "s" | "S" => Self::ToggleSound,
            _ => return None,
        };
        Some(change)
    }
}

/// Errors from strict settings parsing
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("malformed settings document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("target size must be a positive number, got {0}")]
    InvalidTargetSize(f32),
    #[error("spawn rate must be a positive number of milliseconds, got {0}")]
    InvalidSpawnRate(f64),
}

/// Training settings snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub mode: TrainingMode,
    pub difficulty: Difficulty,
    /// Base target radius before difficulty/mode scaling
    pub target_size: f32,
    /// Base milliseconds between spawns before difficulty scaling
    pub spawn_rate: f64,
    pub sound_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: TrainingMode::Static,
            difficulty: Difficulty::Medium,
            target_size: 40.0,
            spawn_rate: 1000.0,
            sound_enabled: true,
        }
    }
}

impl Settings {
    /// Parse and validate a JSON settings document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Check numeric fields are usable
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.target_size.is_finite() && self.target_size > 0.0) {
            return Err(SettingsError::InvalidTargetSize(self.target_size));
        }
        if !(self.spawn_rate.is_finite() && self.spawn_rate > 0.0) {
            return Err(SettingsError::InvalidSpawnRate(self.spawn_rate));
        }
        Ok(())
    }

    /// Copy with unusable numeric fields replaced by defaults
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let mut settings = self.clone();
        if !(settings.target_size.is_finite() && settings.target_size > 0.0) {
            log::warn!(
                "Invalid target size {}, using {}",
                settings.target_size,
                defaults.target_size
            );
            settings.target_size = defaults.target_size;
        }
        if !(settings.spawn_rate.is_finite() && settings.spawn_rate > 0.0) {
            log::warn!(
                "Invalid spawn rate {}, using {}",
                settings.spawn_rate,
                defaults.spawn_rate
            );
            settings.spawn_rate = defaults.spawn_rate;
        }
        settings
    }

    /// New snapshot with one edit applied
    pub fn with_change(&self, change: SettingsChange) -> Self {
        let mut next = self.clone();
        match change {
            SettingsChange::Mode(mode) => next.mode = mode,
            SettingsChange::Difficulty(difficulty) => next.difficulty = difficulty,
            SettingsChange::ToggleSound => next.sound_enabled = !next.sound_enabled,
        }
        next
    }

    /// Spawn interval after difficulty scaling (ms)
    pub fn effective_spawn_interval(&self) -> f64 {
        self.spawn_rate * self.difficulty.interval_factor()
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "reflexlab_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
