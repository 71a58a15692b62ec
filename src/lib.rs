//! Reflex Lab - A reaction-time training arena
//!
//! Core modules:
//! - `sim`: Target lifecycle, spawn policy, hit-testing and the per-tick update
//! - `engine`: Session loop (start/pause/resume/stop) driving `sim` each frame
//! - `renderer`: 2D drawing contract plus recording and canvas back-ends
//! - `audio`: Procedural hit/miss tones
//! - `platform`: Time sources and the browser frame scheduler
//! - `stats` / `history`: Outcome recording and session history

pub mod audio;
pub mod engine;
pub mod history;
pub mod platform;
pub mod renderer;
pub mod scheduler;
pub mod settings;
pub mod sim;
pub mod stats;

pub use engine::{ClickOutcome, Engine, OutcomeRecorder};
pub use history::SessionHistory;
pub use settings::{Difficulty, Settings, SettingsChange, TrainingMode};
pub use stats::SessionStats;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Maximum simultaneously live targets; spawning is suppressed at the cap
    pub const MAX_LIVE_TARGETS: usize = 5;
    /// Targets never spawn closer than this to any surface edge
    pub const SPAWN_MARGIN: f32 = 100.0;

    /// Fade-in per tick (opacity starts at 0)
    pub const TARGET_FADE_STEP: f32 = 0.1;
    /// Scale-in per tick (scale starts at 0.5)
    pub const TARGET_SCALE_STEP: f32 = 0.05;
    pub const TARGET_INITIAL_OPACITY: f32 = 0.0;
    pub const TARGET_INITIAL_SCALE: f32 = 0.5;
    /// Unclicked static targets expire after this long (ms)
    pub const STATIC_TARGET_TTL_MS: f64 = 2000.0;

    /// Moving-mode speed when difficulty supplies none (units per tick)
    pub const MOVING_FALLBACK_SPEED: f32 = 2.0;
    pub const EASY_SPEED: f32 = 1.0;
    pub const HARD_SPEED: f32 = 3.0;

    /// Radius multipliers
    pub const EASY_RADIUS_FACTOR: f32 = 1.5;
    pub const HARD_RADIUS_FACTOR: f32 = 0.7;
    pub const PRECISION_RADIUS_FACTOR: f32 = 0.5;

    /// Spawn interval multipliers
    pub const EASY_INTERVAL_FACTOR: f64 = 1.5;
    pub const HARD_INTERVAL_FACTOR: f64 = 0.7;

    /// Time-attack sessions end after this much running time (ms)
    pub const TIME_ATTACK_DURATION_MS: f64 = 30_000.0;

    /// Ripple animation
    pub const RIPPLE_INITIAL_RADIUS: f32 = 1.0;
    pub const RIPPLE_GROWTH: f32 = 2.0;
    pub const RIPPLE_DECAY: f32 = 0.02;
    pub const RIPPLE_LINE_WIDTH: f32 = 2.0;

    /// Target drawing
    pub const TARGET_GLOW_BLUR: f32 = 15.0;
    pub const TARGET_RING_OFFSET: f32 = 5.0;
    pub const TARGET_RING_ALPHA: f32 = 0.3;
    pub const TARGET_RING_WIDTH: f32 = 2.0;

    /// Feedback tones
    pub const HIT_TONE_HZ: f32 = 800.0;
    pub const MISS_TONE_HZ: f32 = 150.0;
    pub const TONE_END_HZ: f32 = 10.0;
    pub const TONE_DURATION_SECS: f64 = 0.1;
    pub const TONE_START_GAIN: f32 = 0.1;
    pub const TONE_END_GAIN: f32 = 0.01;

    /// Session history length
    pub const MAX_HISTORY_SESSIONS: usize = 20;
}

/// Euclidean distance between two surface points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}

/// Point on the unit circle at `theta` scaled by `len`
#[inline]
pub fn from_angle(theta: f32, len: f32) -> Vec2 {
    Vec2::new(theta.cos() * len, theta.sin() * len)
}
