//! 2D rendering module
//!
//! The engine draws through `DrawSurface`, a small immediate-mode contract that
//! maps directly onto a canvas 2D context. `RecordingSurface` captures the draw
//! calls for headless runs and tests.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod recording;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub use canvas::{CanvasSurface, SurfaceError};
pub use recording::{DrawCommand, RecordingSurface};
pub use shapes::{draw_ripple, draw_target, ripple_color};

use glam::Vec2;

/// 8-bit RGB with a float alpha
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    /// Opaque colour from `0xRRGGBB`
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
            a: 1.0,
        }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Multiply alpha (global alpha)
    pub fn faded(self, factor: f32) -> Self {
        Self {
            a: (self.a * factor).clamp(0.0, 1.0),
            ..self
        }
    }

    /// CSS `rgba()` string
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Soft shadow around a filled shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub blur: f32,
    pub color: Rgba,
}

/// Drawing target for one frame
pub trait DrawSurface {
    /// Width and height in surface units
    fn size(&self) -> (f32, f32);
    /// Erase the whole surface
    fn clear(&mut self);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba, glow: Option<Glow>);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, line_width: f32, color: Rgba);
}

/// Colors for game elements
pub mod colors {
    use super::Rgba;

    pub const TARGET: Rgba = Rgba::hex(0x00f2ff);
    pub const HIT: Rgba = Rgba::hex(0x39ff14);
    pub const MISS: Rgba = Rgba::hex(0xff073a);
}
