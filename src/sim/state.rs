//! Session state and core simulation types
//!
//! The live target and ripple collections for one training session.

use serde::{Deserialize, Serialize};

use super::ripple::Ripple;
use super::spawn::SpawnDescriptor;
use super::target::Target;
use crate::settings::TrainingMode;

/// Lifecycle phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Initial/terminal: no entities, no frame scheduled
    #[default]
    Stopped,
    /// A frame is scheduled every display refresh
    Running,
    /// No frame scheduled, entities retained
    Paused,
}

/// Playable surface size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEvent {
    /// A target was created
    Spawned { id: u32 },
    /// A static target aged out unclicked (counts as a miss)
    Expired { id: u32 },
    /// The time-attack window elapsed
    Ended,
}

/// Live entities for one session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionState {
    /// Spawn order (oldest first); collision and draw order depend on it
    pub targets: Vec<Target>,
    pub ripples: Vec<Ripple>,
    /// Session-clock time of the last spawn
    pub last_spawn: Option<f64>,
    /// Session-clock time the session started
    pub started_at: f64,
    /// Next entity ID
    next_id: u32,
}

impl SessionState {
    pub fn new(started_at: f64) -> Self {
        Self {
            started_at,
            next_id: 1,
            ..Default::default()
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Add a target built from a spawn descriptor; returns its id
    pub fn spawn_target(&mut self, desc: &SpawnDescriptor, now: f64, mode: TrainingMode) -> u32 {
        let id = self.next_entity_id();
        self.targets.push(Target::new(
            id,
            desc.pos,
            desc.radius,
            desc.base_radius,
            desc.velocity(),
            now,
            mode,
        ));
        self.last_spawn = Some(now);
        id
    }

    /// Remove and return the target at `index`, keeping the others in spawn order
    pub fn remove_target(&mut self, index: usize) -> Target {
        self.targets.remove(index)
    }

    /// Drop every entity
    pub fn clear(&mut self) {
        self.targets.clear();
        self.ripples.clear();
    }

    pub fn elapsed(&self, now: f64) -> f64 {
        now - self.started_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn desc(x: f32, y: f32) -> SpawnDescriptor {
        SpawnDescriptor {
            pos: Vec2::new(x, y),
            radius: 20.0,
            base_radius: 20.0,
            speed: 0.0,
            direction: 0.0,
        }
    }

    #[test]
    fn test_spawn_assigns_increasing_ids() {
        let mut state = SessionState::new(0.0);
        let a = state.spawn_target(&desc(1.0, 1.0), 10.0, TrainingMode::Static);
        let b = state.spawn_target(&desc(2.0, 2.0), 20.0, TrainingMode::Static);
        assert!(b > a);
        assert_eq!(state.last_spawn, Some(20.0));
        assert_eq!(state.targets[1].spawn_time, 20.0);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut state = SessionState::new(0.0);
        for i in 0..3 {
            state.spawn_target(&desc(i as f32, 0.0), 0.0, TrainingMode::Static);
        }
        let removed = state.remove_target(1);
        assert_eq!(removed.pos.x, 1.0);
        let xs: Vec<f32> = state.targets.iter().map(|t| t.pos.x).collect();
        assert_eq!(xs, vec![0.0, 2.0]);
    }
}
