//! Per-frame simulation tick
//!
//! Spawns, advances and expires entities. Drawing and scheduling belong to the
//! engine; this function only mutates state and reports what happened.

use rand::Rng;

use super::state::{Bounds, SessionEvent, SessionState};
use super::spawn::spawn_descriptor;
use crate::consts::*;
use crate::settings::{Settings, TrainingMode};

/// Advance the session by one frame at session time `now` (ms)
///
/// Returns the events in the order they occurred. When `SessionEvent::Ended`
/// is returned nothing after the time-attack check has run.
pub fn tick<R: Rng>(
    state: &mut SessionState,
    settings: &Settings,
    bounds: Bounds,
    now: f64,
    rng: &mut R,
) -> Vec<SessionEvent> {
    let mut events = Vec::new();

    // Spawn
    let interval = settings.effective_spawn_interval();
    let due = state.last_spawn.is_none_or(|last| now - last > interval);
    if due && state.targets.len() < MAX_LIVE_TARGETS {
        let desc = spawn_descriptor(settings, bounds, rng);
        let id = state.spawn_target(&desc, now, settings.mode);
        log::debug!(
            "Spawned target {} at ({:.0}, {:.0}) r={:.1}",
            id,
            desc.pos.x,
            desc.pos.y,
            desc.radius
        );
        events.push(SessionEvent::Spawned { id });
    }

    // Time attack
    if settings.mode == TrainingMode::TimeAttack && state.elapsed(now) > TIME_ATTACK_DURATION_MS {
        events.push(SessionEvent::Ended);
        return events;
    }

    // Targets: advance, then expire stale static targets
    let expire = settings.mode == TrainingMode::Static;
    state.targets.retain_mut(|target| {
        target.update(bounds);
        if expire && target.age(now) > STATIC_TARGET_TTL_MS {
            log::debug!("Target {} expired", target.id);
            events.push(SessionEvent::Expired { id: target.id });
            return false;
        }
        true
    });

    // Ripples
    state.ripples.retain_mut(|ripple| {
        ripple.update();
        !ripple.is_faded()
    });

    events
}
