//! Click feedback ripples

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// What the click that produced a ripple resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RippleKind {
    Hit,
    Miss,
}

/// An expanding ring that fades out over successive ticks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ripple {
    pub pos: Vec2,
    pub radius: f32,
    pub opacity: f32,
    pub kind: RippleKind,
}

impl Ripple {
    pub fn new(pos: Vec2, kind: RippleKind) -> Self {
        Self {
            pos,
            radius: RIPPLE_INITIAL_RADIUS,
            opacity: 1.0,
            kind,
        }
    }

    pub fn update(&mut self) {
        self.radius += RIPPLE_GROWTH;
        self.opacity -= RIPPLE_DECAY;
    }

    /// Eligible for removal
    #[inline]
    pub fn is_faded(&self) -> bool {
        self.opacity <= 0.0
    }
}
