//! Clickable targets
//!
//! A target fades and scales in after spawning. Moving-mode targets integrate
//! their velocity each tick and bounce off the surface edges.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Bounds;
use crate::consts::*;
use crate::settings::TrainingMode;

/// A target entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub id: u32,
    pub pos: Vec2,
    /// Hit/draw radius at full scale
    pub radius: f32,
    /// Radius before difficulty/mode scaling
    pub base_radius: f32,
    /// Units per tick (zero unless moving mode)
    pub vel: Vec2,
    /// Session-clock timestamp (ms)
    pub spawn_time: f64,
    /// 0-1, rises by a fixed step each tick
    pub opacity: f32,
    /// 0.5-1, rises by a fixed step each tick
    pub scale: f32,
    /// Mode active at spawn; later settings changes don't affect this target
    pub mode: TrainingMode,
}

impl Target {
    pub fn new(
        id: u32,
        pos: Vec2,
        radius: f32,
        base_radius: f32,
        vel: Vec2,
        spawn_time: f64,
        mode: TrainingMode,
    ) -> Self {
        Self {
            id,
            pos,
            radius,
            base_radius,
            vel,
            spawn_time,
            opacity: TARGET_INITIAL_OPACITY,
            scale: TARGET_INITIAL_SCALE,
            mode,
        }
    }

    /// Radius used for both drawing and hit-testing
    #[inline]
    pub fn current_radius(&self) -> f32 {
        self.radius * self.scale
    }

    /// Milliseconds since spawn
    #[inline]
    pub fn age(&self, now: f64) -> f64 {
        now - self.spawn_time
    }

    /// Advance one tick: fade/scale in, then move and bounce (moving mode only)
    pub fn update(&mut self, bounds: Bounds) {
        if self.opacity < 1.0 {
            self.opacity = (self.opacity + TARGET_FADE_STEP).min(1.0);
        }
        if self.scale < 1.0 {
            self.scale = (self.scale + TARGET_SCALE_STEP).min(1.0);
        }

        if self.mode == TrainingMode::Moving {
            self.pos += self.vel;

            // Reflect, don't clamp. Only flip while heading outward so a target
            // left outside (surface shrank, oversized radius) walks back in.
            if heading_out(self.pos.x, self.vel.x, self.radius, bounds.width) {
                self.vel.x = -self.vel.x;
            }
            if heading_out(self.pos.y, self.vel.y, self.radius, bounds.height) {
                self.vel.y = -self.vel.y;
            }
        }
    }
}

/// Edge is past `0..extent` on one axis and the velocity points further out
#[inline]
fn heading_out(pos: f32, vel: f32, radius: f32, extent: f32) -> bool {
    (pos - radius < 0.0 && vel < 0.0) || (pos + radius > extent && vel > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn target(mode: TrainingMode, pos: Vec2, vel: Vec2) -> Target {
        Target::new(1, pos, 20.0, 20.0, vel, 0.0, mode)
    }

    #[test]
    fn test_fade_and_scale_reach_one() {
        let bounds = Bounds::new(800.0, 600.0);
        let mut t = target(TrainingMode::Static, Vec2::new(400.0, 300.0), Vec2::ZERO);
        assert_eq!(t.opacity, 0.0);
        assert_eq!(t.scale, 0.5);

        t.update(bounds);
        assert!((t.opacity - 0.1).abs() < 1e-6);
        assert!((t.scale - 0.55).abs() < 1e-6);

        for _ in 0..20 {
            t.update(bounds);
        }
        assert_eq!(t.opacity, 1.0);
        assert_eq!(t.scale, 1.0);
        assert_eq!(t.current_radius(), 20.0);
    }

    #[test]
    fn test_static_target_does_not_move() {
        let bounds = Bounds::new(800.0, 600.0);
        let mut t = target(TrainingMode::Static, Vec2::new(400.0, 300.0), Vec2::new(3.0, 1.0));
        t.update(bounds);
        assert_eq!(t.pos, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_moving_target_bounces_off_right_edge() {
        let bounds = Bounds::new(800.0, 600.0);
        let mut t = target(TrainingMode::Moving, Vec2::new(778.0, 300.0), Vec2::new(3.0, 0.0));
        t.update(bounds);
        assert_eq!(t.pos.x, 781.0);
        assert_eq!(t.vel, Vec2::new(-3.0, 0.0));

        t.update(bounds);
        assert_eq!(t.pos.x, 778.0);
        assert_eq!(t.vel, Vec2::new(-3.0, 0.0));
    }

    #[test]
    fn test_moving_target_bounces_off_top_edge() {
        let bounds = Bounds::new(800.0, 600.0);
        let mut t = target(TrainingMode::Moving, Vec2::new(400.0, 21.0), Vec2::new(1.0, -2.0));
        t.update(bounds);
        assert_eq!(t.vel, Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_target_outside_after_shrink_returns() {
        // Surface shrank to 500 wide while the target sat at x=495
        let bounds = Bounds::new(500.0, 600.0);
        let mut t = target(TrainingMode::Moving, Vec2::new(495.0, 300.0), Vec2::new(-2.0, 0.0));
        for _ in 0..200 {
            t.update(bounds);
        }
        assert!(t.pos.x + t.radius <= bounds.width, "still outside at x={}", t.pos.x);
        assert!(t.pos.x - t.radius >= 0.0);
    }

    #[test]
    fn test_target_outside_heading_out_turns_around() {
        let bounds = Bounds::new(500.0, 600.0);
        let mut t = target(TrainingMode::Moving, Vec2::new(495.0, 300.0), Vec2::new(2.0, 0.0));
        t.update(bounds);
        assert_eq!(t.vel.x, -2.0);
        t.update(bounds);
        assert_eq!(t.vel.x, -2.0);
        assert_eq!(t.pos.x, 495.0);
    }

    #[test]
    fn test_oversized_target_near_edge_drifts_inward() {
        // Radius larger than the spawn margin: spawned with the edge already out
        let bounds = Bounds::new(800.0, 600.0);
        let mut t = Target::new(
            1,
            Vec2::new(105.0, 300.0),
            120.0,
            80.0,
            Vec2::new(-1.0, 0.0),
            0.0,
            TrainingMode::Moving,
        );
        for _ in 0..200 {
            t.update(bounds);
        }
        assert!(t.pos.x - t.radius >= 0.0, "still outside at x={}", t.pos.x);
    }

    proptest! {
        #[test]
        fn prop_opacity_and_scale_stay_in_unit_range(ticks in 0usize..64) {
            let bounds = Bounds::new(800.0, 600.0);
            let mut t = target(TrainingMode::Static, Vec2::new(400.0, 300.0), Vec2::ZERO);
            let mut last = (t.opacity, t.scale);
            for _ in 0..ticks {
                t.update(bounds);
                prop_assert!((0.0..=1.0).contains(&t.opacity));
                prop_assert!((0.0..=1.0).contains(&t.scale));
                prop_assert!(t.opacity >= last.0 && t.scale >= last.1);
                last = (t.opacity, t.scale);
            }
        }

        #[test]
        fn prop_reflection_preserves_speed(
            x in 21.0f32..779.0,
            y in 21.0f32..579.0,
            vx in -3.0f32..3.0,
            vy in -3.0f32..3.0,
        ) {
            let bounds = Bounds::new(800.0, 600.0);
            let mut t = target(TrainingMode::Moving, Vec2::new(x, y), Vec2::new(vx, vy));
            let before = t.vel;
            t.update(bounds);
            prop_assert_eq!(t.vel.x.abs(), before.x.abs());
            prop_assert_eq!(t.vel.y.abs(), before.y.abs());

            let crossed_x = t.pos.x - t.radius < 0.0 || t.pos.x + t.radius > bounds.width;
            prop_assert_eq!(t.vel.x != before.x, crossed_x && before.x != 0.0);
        }

        #[test]
        fn prop_outside_target_reenters(
            x in -50.0f32..850.0,
            vx in prop::sample::select(vec![-3.0f32, -1.0, 1.0, 3.0]),
        ) {
            let bounds = Bounds::new(800.0, 600.0);
            let mut t = target(TrainingMode::Moving, Vec2::new(x, 300.0), Vec2::new(vx, 0.0));
            for _ in 0..600 {
                t.update(bounds);
            }
            // A bounce tick may overshoot by one step before turning back
            let slack = vx.abs();
            prop_assert!(t.pos.x - t.radius >= -slack);
            prop_assert!(t.pos.x + t.radius <= bounds.width + slack);
        }
    }
}
