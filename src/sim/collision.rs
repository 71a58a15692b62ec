//! Pointer-to-target hit testing
//!
//! Newest targets are drawn on top, so they win when targets overlap.

use glam::Vec2;

use super::target::Target;
use crate::distance;

/// Check whether a point lies strictly inside a circle
#[inline]
pub fn point_in_circle(point: Vec2, center: Vec2, radius: f32) -> bool {
    distance(point, center) < radius
}

/// Index of the most-recently-spawned target containing `point`
///
/// `targets` is in spawn order. Uses each target's current (scaled) radius,
/// so a target still scaling in is smaller to hit than at rest.
pub fn resolve_click(point: Vec2, targets: &[Target]) -> Option<usize> {
    targets
        .iter()
        .rposition(|t| point_in_circle(point, t.pos, t.current_radius()))
}
