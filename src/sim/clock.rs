//! Session clock
//!
//! Counts running time only: restarts at zero on `start`, freezes while paused.
//! Every engine timestamp is on this clock, so the time-attack window, the
//! static-target time-to-live and reaction times all exclude paused time.

use crate::platform::TimeSource;

pub struct SessionClock {
    source: Box<dyn TimeSource>,
    /// Source time when the current running stretch began
    running_since: Option<f64>,
    /// Running time accumulated before the current stretch (ms)
    banked: f64,
}

impl SessionClock {
    pub fn new(source: Box<dyn TimeSource>) -> Self {
        Self {
            source,
            running_since: None,
            banked: 0.0,
        }
    }

    /// Reset to zero and start counting
    pub fn start(&mut self) {
        self.banked = 0.0;
        self.running_since = Some(self.source.now_ms());
    }

    pub fn pause(&mut self) {
        if let Some(since) = self.running_since.take() {
            self.banked += (self.source.now_ms() - since).max(0.0);
        }
    }

    pub fn resume(&mut self) {
        if self.running_since.is_none() {
            self.running_since = Some(self.source.now_ms());
        }
    }

    pub fn stop(&mut self) {
        self.pause();
    }

    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    /// Session time in milliseconds
    pub fn now(&self) -> f64 {
        match self.running_since {
            Some(since) => self.banked + (self.source.now_ms() - since).max(0.0),
            None => self.banked,
        }
    }
}
