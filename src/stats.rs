//! Per-session statistics
//!
//! Accumulates engine outcomes into the numbers shown on the HUD and stored
//! in the session history.

use serde::{Deserialize, Serialize};

use crate::engine::OutcomeRecorder;

/// Running tally for one session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub hits: u32,
    /// Click misses and expired targets
    pub misses: u32,
    /// Attempts: hits plus misses (an expired target counts as a missed attempt)
    pub clicks: u32,
    pub total_reaction_ms: u64,
    pub best_reaction_ms: Option<u64>,
    pub hit_streak: u32,
    pub best_streak: u32,
    /// Set when a time-attack session ran out
    pub ended: bool,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything (new session)
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Hits as a percentage of clicks; 0 before the first click
    pub fn accuracy(&self) -> f64 {
        if self.clicks == 0 {
            return 0.0;
        }
        self.hits as f64 / self.clicks as f64 * 100.0
    }

    /// Mean reaction time in whole ms; 0 before the first hit
    pub fn average_reaction_ms(&self) -> u64 {
        if self.hits == 0 {
            return 0;
        }
        (self.total_reaction_ms as f64 / self.hits as f64).round() as u64
    }
}

impl OutcomeRecorder for SessionStats {
    fn on_hit(&mut self, reaction_ms: u64) {
        self.clicks += 1;
        self.hits += 1;
        self.total_reaction_ms += reaction_ms;
        self.best_reaction_ms = Some(
            self.best_reaction_ms
                .map_or(reaction_ms, |best| best.min(reaction_ms)),
        );
        self.hit_streak += 1;
        self.best_streak = self.best_streak.max(self.hit_streak);
    }

    fn on_miss(&mut self) {
        self.clicks += 1;
        self.misses += 1;
        self.hit_streak = 0;
    }

    fn on_end(&mut self) {
        self.ended = true;
    }
}
