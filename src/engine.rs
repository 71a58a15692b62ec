//! Session engine
//!
//! Owns the live targets and ripples for one training session and drives them
//! one frame at a time:
//!
//! ```text
//!            start                 pause
//!  Stopped ─────────▶ Running ◀──────────▶ Paused
//!     ▲                 │        resume      │
//!     └──── stop ───────┴────────────────────┘
//! ```
//!
//! Each frame clears the surface, runs `sim::tick`, reports expiries and the
//! time-attack end to the outcome recorder, draws, then requests the next frame.
//! Clicks are resolved synchronously against the current target list.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::audio::{AudioFeedback, Tone};
use crate::platform::{SystemClock, TimeSource};
use crate::renderer::{DrawSurface, draw_ripple, draw_target};
use crate::scheduler::{FrameQueue, FrameScheduler, FrameToken};
use crate::settings::Settings;
use crate::sim::{
    Bounds, Ripple, RippleKind, SessionClock, SessionEvent, SessionPhase, SessionState, Target,
    resolve_click, tick,
};

/// Receives discrete session outcomes
pub trait OutcomeRecorder {
    /// A target was hit `reaction_ms` after it spawned
    fn on_hit(&mut self, reaction_ms: u64);
    /// A click missed every target, or a static target expired unclicked
    fn on_miss(&mut self);
    /// A time-attack session ran out; the engine is already stopped
    fn on_end(&mut self);
}

/// Shared recorder so the host can read it while the engine holds a handle
impl<T: OutcomeRecorder> OutcomeRecorder for Rc<RefCell<T>> {
    fn on_hit(&mut self, reaction_ms: u64) {
        self.borrow_mut().on_hit(reaction_ms);
    }

    fn on_miss(&mut self) {
        self.borrow_mut().on_miss();
    }

    fn on_end(&mut self) {
        self.borrow_mut().on_end();
    }
}

/// Result of a click delivered while running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Hit { target_id: u32, reaction_ms: u64 },
    Miss,
}

/// Training session engine
pub struct Engine<S: DrawSurface> {
    surface: S,
    settings: Settings,
    recorder: Box<dyn OutcomeRecorder>,
    scheduler: Box<dyn FrameScheduler>,
    audio: AudioFeedback,
    clock: SessionClock,
    rng: Pcg32,
    state: SessionState,
    phase: SessionPhase,
    /// The one frame we are waiting for
    pending_frame: Option<FrameToken>,
}

impl<S: DrawSurface> Engine<S> {
    /// Engine with the system clock, platform audio and a manual frame queue
    pub fn new(surface: S, settings: Settings, recorder: Box<dyn OutcomeRecorder>) -> Self {
        Self {
            surface,
            settings: settings.sanitized(),
            recorder,
            scheduler: Box::new(FrameQueue::new()),
            audio: AudioFeedback::platform(),
            clock: SessionClock::new(Box::new(SystemClock::new())),
            rng: Pcg32::seed_from_u64(rand::random()),
            state: SessionState::default(),
            phase: SessionPhase::Stopped,
            pending_frame: None,
        }
    }

    pub fn with_scheduler(mut self, scheduler: Box<dyn FrameScheduler>) -> Self {
        self.scheduler = scheduler;
        self
    }

    pub fn with_time_source(mut self, source: Box<dyn TimeSource>) -> Self {
        self.clock = SessionClock::new(source);
        self
    }

    pub fn with_audio(mut self, audio: AudioFeedback) -> Self {
        self.audio = audio;
        self
    }

    /// Fixed spawn RNG seed (tests, demos)
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Pcg32::seed_from_u64(seed);
        self
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn targets(&self) -> &[Target] {
        &self.state.targets
    }

    pub fn ripples(&self) -> &[Ripple] {
        &self.state.ripples
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Host-side surface access (e.g. resizing the backing canvas)
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Current session time (ms, running time only)
    pub fn session_time(&self) -> f64 {
        self.clock.now()
    }

    /// Begin a fresh session from any phase
    pub fn start(&mut self) {
        self.cancel_pending_frame();
        self.clock.start();
        self.state = SessionState::new(self.clock.now());
        self.phase = SessionPhase::Running;
        log::info!(
            "Session started ({}, {})",
            self.settings.mode.as_str(),
            self.settings.difficulty.as_str()
        );
        self.schedule_frame();
    }

    /// Running -> Paused; entities and timestamps are kept
    pub fn pause(&mut self) {
        if self.phase != SessionPhase::Running {
            return;
        }
        self.cancel_pending_frame();
        self.clock.pause();
        self.phase = SessionPhase::Paused;
        log::info!("Session paused at {:.0} ms", self.clock.now());
    }

    /// Paused -> Running without resetting anything
    pub fn resume(&mut self) {
        if self.phase != SessionPhase::Paused {
            return;
        }
        self.clock.resume();
        self.phase = SessionPhase::Running;
        log::info!("Session resumed");
        self.schedule_frame();
    }

    /// Pause button: flip between running and paused
    pub fn toggle_pause(&mut self) {
        match self.phase {
            SessionPhase::Running => self.pause(),
            SessionPhase::Paused => self.resume(),
            SessionPhase::Stopped => {}
        }
    }

    /// Discard all entities and blank the surface
    pub fn stop(&mut self) {
        self.cancel_pending_frame();
        self.clock.stop();
        self.state.clear();
        if self.phase != SessionPhase::Stopped {
            log::info!("Session stopped");
        }
        self.phase = SessionPhase::Stopped;
        self.surface.clear();
    }

    /// Surface dimensions changed (the host owns them); just clear
    pub fn resize(&mut self) {
        self.surface.clear();
    }

    /// Swap in a new settings snapshot; takes effect on the next frame
    pub fn update_settings(&mut self, settings: Settings) {
        self.settings = settings.sanitized();
        log::info!(
            "Settings updated: mode={} difficulty={} size={} rate={}ms sound={}",
            self.settings.mode.as_str(),
            self.settings.difficulty.as_str(),
            self.settings.target_size,
            self.settings.spawn_rate,
            self.settings.sound_enabled
        );
    }

    /// Resolve a click at surface-local coordinates
    ///
    /// Ignored entirely (no ripple, tone or report) unless running.
    pub fn handle_click(&mut self, x: f32, y: f32) -> Option<ClickOutcome> {
        if self.phase != SessionPhase::Running {
            log::trace!("Click at ({:.0}, {:.0}) ignored: {:?}", x, y, self.phase);
            return None;
        }

        let point = Vec2::new(x, y);
        let now = self.clock.now();

        match resolve_click(point, &self.state.targets) {
            Some(index) => {
                let target = self.state.remove_target(index);
                let reaction_ms = target.age(now).max(0.0).round() as u64;
                self.state.ripples.push(Ripple::new(point, RippleKind::Hit));
                self.audio.play(Tone::Hit, self.settings.sound_enabled);
                log::debug!("Hit target {} in {} ms", target.id, reaction_ms);
                self.recorder.on_hit(reaction_ms);
                Some(ClickOutcome::Hit {
                    target_id: target.id,
                    reaction_ms,
                })
            }
            None => {
                self.state.ripples.push(Ripple::new(point, RippleKind::Miss));
                self.audio.play(Tone::Miss, self.settings.sound_enabled);
                log::debug!("Miss at ({:.0}, {:.0})", x, y);
                self.recorder.on_miss();
                Some(ClickOutcome::Miss)
            }
        }
    }

    /// Run one frame; called by the host with the token from `request_frame`
    ///
    /// Frames that aren't the pending one (cancelled, stale or duplicated) do nothing.
    pub fn frame(&mut self, token: FrameToken) {
        if self.phase != SessionPhase::Running || self.pending_frame != Some(token) {
            log::trace!("Ignoring stale frame {:?}", token);
            return;
        }
        self.pending_frame = None;

        self.surface.clear();

        let (width, height) = self.surface.size();
        let bounds = Bounds::new(width, height);
        let now = self.clock.now();
        let events = tick(&mut self.state, &self.settings, bounds, now, &mut self.rng);

        for event in events {
            match event {
                SessionEvent::Spawned { .. } => {}
                SessionEvent::Expired { .. } => self.recorder.on_miss(),
                SessionEvent::Ended => {
                    log::info!("Time attack finished");
                    self.stop();
                    self.recorder.on_end();
                    return;
                }
            }
        }

        self.draw();
        self.schedule_frame();
    }

    fn draw(&mut self) {
        for target in &self.state.targets {
            draw_target(&mut self.surface, target);
        }
        for ripple in &self.state.ripples {
            draw_ripple(&mut self.surface, ripple);
        }
    }

    fn schedule_frame(&mut self) {
        if self.phase == SessionPhase::Running && self.pending_frame.is_none() {
            self.pending_frame = Some(self.scheduler.request_frame());
        }
    }

    fn cancel_pending_frame(&mut self) {
        if let Some(token) = self.pending_frame.take() {
            self.scheduler.cancel_frame(token);
        }
    }
}
