//! Drawing of targets and ripples

use super::{DrawSurface, Glow, Rgba, colors};
use crate::consts::*;
use crate::sim::{Ripple, RippleKind, Target};

/// Ripple stroke colour: outcome hue, alpha quantised to 8 bits
pub fn ripple_color(ripple: &Ripple) -> Rgba {
    let base = match ripple.kind {
        RippleKind::Hit => colors::HIT,
        RippleKind::Miss => colors::MISS,
    };
    let alpha = (ripple.opacity * 255.0).floor().clamp(0.0, 255.0) / 255.0;
    base.with_alpha(alpha)
}

/// Glowing core plus faint outer ring, both scaled and faded in with the target
pub fn draw_target<S: DrawSurface + ?Sized>(surface: &mut S, target: &Target) {
    let alpha = target.opacity;
    let core = colors::TARGET.faded(alpha);
    let glow = Glow {
        blur: TARGET_GLOW_BLUR,
        color: core,
    };
    surface.fill_circle(target.pos, target.current_radius(), core, Some(glow));

    let ring = colors::TARGET.with_alpha(TARGET_RING_ALPHA).faded(alpha);
    surface.stroke_circle(
        target.pos,
        (target.radius + TARGET_RING_OFFSET) * target.scale,
        TARGET_RING_WIDTH,
        ring,
    );
}

pub fn draw_ripple<S: DrawSurface + ?Sized>(surface: &mut S, ripple: &Ripple) {
    surface.stroke_circle(ripple.pos, ripple.radius, RIPPLE_LINE_WIDTH, ripple_color(ripple));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCommand, RecordingSurface};
    use crate::settings::TrainingMode;
    use glam::Vec2;

    #[test]
    fn test_ripple_color_by_kind() {
        let hit = Ripple::new(Vec2::ZERO, RippleKind::Hit);
        let miss = Ripple::new(Vec2::ZERO, RippleKind::Miss);
        assert_eq!(ripple_color(&hit), colors::HIT);
        assert_eq!(ripple_color(&miss).r, 0xff);
        assert_eq!(ripple_color(&miss).g, 0x07);
    }

    #[test]
    fn test_ripple_alpha_quantised() {
        let mut r = Ripple::new(Vec2::ZERO, RippleKind::Hit);
        r.opacity = 0.5;
        assert!((ripple_color(&r).a - 127.0 / 255.0).abs() < 1e-6);
        r.opacity = -0.01;
        assert_eq!(ripple_color(&r).a, 0.0);
    }

    #[test]
    fn test_target_draws_core_and_ring() {
        let mut surface = RecordingSurface::new(800.0, 600.0);
        let mut t = Target::new(
            1,
            Vec2::new(50.0, 60.0),
            20.0,
            20.0,
            Vec2::ZERO,
            0.0,
            TrainingMode::Static,
        );
        t.opacity = 0.5;
        t.scale = 0.5;
        draw_target(&mut surface, &t);

        assert_eq!(surface.commands().len(), 2);
        match surface.commands()[0] {
            DrawCommand::Fill { radius, color, glow, .. } => {
                assert_eq!(radius, 10.0);
                assert_eq!(color.a, 0.5);
                assert_eq!(glow.map(|g| g.blur), Some(15.0));
            }
            ref other => panic!("expected fill, got {:?}", other),
        }
        match surface.commands()[1] {
            DrawCommand::Stroke { radius, line_width, color, .. } => {
                assert_eq!(radius, 12.5);
                assert_eq!(line_width, 2.0);
                assert!((color.a - 0.15).abs() < 1e-6);
            }
            ref other => panic!("expected stroke, got {:?}", other),
        }
    }
}
