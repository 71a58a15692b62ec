//! Session history
//!
//! Persisted to LocalStorage as a bare JSON array, oldest first, trimmed to the
//! most recent sessions.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_HISTORY_SESSIONS;
use crate::settings::{Difficulty, Settings, TrainingMode};
use crate::stats::SessionStats;

/// Summary of one finished session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    /// Unix timestamp (ms) when the session was saved
    pub date: f64,
    pub mode: TrainingMode,
    pub difficulty: Difficulty,
    pub hits: u32,
    /// Percent of attempts that were hits
    pub accuracy: f64,
    /// Mean reaction time (ms), 0 if there were no hits
    pub avg_reaction: f64,
    /// Fastest reaction (ms); `null` if there were no hits
    #[serde(default)]
    pub best_reaction: Option<f64>,
}

/// Recent sessions, oldest first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionHistory {
    pub sessions: Vec<SessionRecord>,
}

impl SessionHistory {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "reflexlab_history";

    pub fn new() -> Self {
        Self::default()
    }

    /// Add a finished session
    ///
    /// Sessions without a single attempt are not worth keeping; returns the
    /// record when one was added.
    pub fn record(
        &mut self,
        stats: &SessionStats,
        settings: &Settings,
        timestamp: f64,
    ) -> Option<&SessionRecord> {
        if stats.clicks == 0 {
            log::debug!("Empty session not recorded");
            return None;
        }

        let record = SessionRecord {
            date: timestamp,
            mode: settings.mode,
            difficulty: settings.difficulty,
            hits: stats.hits,
            accuracy: stats.accuracy(),
            avg_reaction: mean_reaction(stats),
            best_reaction: stats.best_reaction_ms.map(|ms| ms as f64),
        };

        self.sessions.push(record);
        let excess = self.sessions.len().saturating_sub(MAX_HISTORY_SESSIONS);
        self.sessions.drain(..excess);
        self.sessions.last()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn latest(&self) -> Option<&SessionRecord> {
        self.sessions.last()
    }

    /// Fastest reaction across all recorded sessions
    pub fn best_reaction(&self) -> Option<f64> {
        self.sessions
            .iter()
            .filter_map(|s| s.best_reaction)
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Load history from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str::<SessionHistory>(&json) {
                    Ok(history) => {
                        log::info!("Loaded {} past sessions", history.sessions.len());
                        return history;
                    }
                    Err(e) => log::warn!("Discarding unreadable history: {}", e),
                }
            }
        }

        log::info!("No session history found, starting fresh");
        Self::new()
    }

    /// Save history to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("History saved ({} sessions)", self.sessions.len());
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

/// Unrounded mean reaction time, 0 without hits
fn mean_reaction(stats: &SessionStats) -> f64 {
    if stats.hits == 0 {
        return 0.0;
    }
    stats.total_reaction_ms as f64 / stats.hits as f64
}
