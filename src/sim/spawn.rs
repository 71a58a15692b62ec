//! Spawn policy
//!
//! Pure function of the current settings and surface size. The caller assigns
//! the id and spawn timestamp.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::state::Bounds;
use crate::consts::*;
use crate::settings::{Settings, TrainingMode};

/// Everything needed to construct a target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnDescriptor {
    pub pos: Vec2,
    pub radius: f32,
    pub base_radius: f32,
    /// Units per tick
    pub speed: f32,
    /// Radians
    pub direction: f32,
}

impl SpawnDescriptor {
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        crate::from_angle(self.direction, self.speed)
    }
}

/// Target radius after difficulty and mode scaling
pub fn spawn_radius(settings: &Settings) -> f32 {
    settings.target_size * settings.difficulty.radius_factor() * settings.mode.radius_factor()
}

/// Target speed: zero outside moving mode, difficulty speed or the fallback inside it
pub fn spawn_speed(settings: &Settings) -> f32 {
    if settings.mode != TrainingMode::Moving {
        return 0.0;
    }
    let speed = settings.difficulty.base_speed();
    if speed > 0.0 { speed } else { MOVING_FALLBACK_SPEED }
}

/// Uniform coordinate in [margin, extent - margin]; centre if the surface is too small
fn spawn_coord<R: Rng>(rng: &mut R, extent: f32) -> f32 {
    let span = extent - SPAWN_MARGIN * 2.0;
    if span <= 0.0 {
        return extent / 2.0;
    }
    SPAWN_MARGIN + rng.random::<f32>() * span
}

/// Produce a target descriptor for the given settings and surface
pub fn spawn_descriptor<R: Rng>(
    settings: &Settings,
    bounds: Bounds,
    rng: &mut R,
) -> SpawnDescriptor {
    let x = spawn_coord(rng, bounds.width);
    let y = spawn_coord(rng, bounds.height);

    SpawnDescriptor {
        pos: Vec2::new(x, y),
        radius: spawn_radius(settings),
        base_radius: settings.target_size,
        speed: spawn_speed(settings),
        direction: rng.random_range(0.0..TAU),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Difficulty;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn settings(mode: TrainingMode, difficulty: Difficulty) -> Settings {
        Settings {
            mode,
            difficulty,
            target_size: 40.0,
            ..Settings::default()
        }
    }

    #[test]
    fn test_radius_scaling() {
        let easy = settings(TrainingMode::Static, Difficulty::Easy);
        assert!((spawn_radius(&easy) - 60.0).abs() < 1e-4);

        let medium = settings(TrainingMode::Static, Difficulty::Medium);
        assert_eq!(spawn_radius(&medium), 40.0);

        let precision_hard = settings(TrainingMode::Precision, Difficulty::Hard);
        assert!((spawn_radius(&precision_hard) - 14.0).abs() < 1e-4);
    }

    #[test]
    fn test_speed_by_mode_and_difficulty() {
        assert_eq!(spawn_speed(&settings(TrainingMode::Moving, Difficulty::Easy)), 1.0);
        assert_eq!(spawn_speed(&settings(TrainingMode::Moving, Difficulty::Medium)), 2.0);
        assert_eq!(spawn_speed(&settings(TrainingMode::Moving, Difficulty::Hard)), 3.0);
        assert_eq!(spawn_speed(&settings(TrainingMode::Static, Difficulty::Hard)), 0.0);
        assert_eq!(spawn_speed(&settings(TrainingMode::Precision, Difficulty::Easy)), 0.0);
        assert_eq!(spawn_speed(&settings(TrainingMode::TimeAttack, Difficulty::Hard)), 0.0);
    }

    #[test]
    fn test_position_respects_margin() {
        let mut rng = Pcg32::seed_from_u64(7);
        let bounds = Bounds::new(800.0, 600.0);
        let s = Settings::default();
        for _ in 0..500 {
            let d = spawn_descriptor(&s, bounds, &mut rng);
            assert!(d.pos.x >= 100.0 && d.pos.x <= 700.0);
            assert!(d.pos.y >= 100.0 && d.pos.y <= 500.0);
            assert!((0.0..TAU).contains(&d.direction));
        }
    }

    #[test]
    fn test_small_surface_spawns_at_centre() {
        let mut rng = Pcg32::seed_from_u64(1);
        let d = spawn_descriptor(&Settings::default(), Bounds::new(150.0, 900.0), &mut rng);
        assert_eq!(d.pos.x, 75.0);
        assert!(d.pos.y >= 100.0 && d.pos.y <= 800.0);
    }

    #[test]
    fn test_velocity_magnitude_matches_speed() {
        let mut rng = Pcg32::seed_from_u64(3);
        let s = settings(TrainingMode::Moving, Difficulty::Hard);
        let d = spawn_descriptor(&s, Bounds::new(800.0, 600.0), &mut rng);
        assert!((d.velocity().length() - 3.0).abs() < 1e-4);
        assert_eq!(d.base_radius, 40.0);
    }
}
