//! Draw-call recorder for headless runs

use glam::Vec2;

use super::{DrawSurface, Glow, Rgba};

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Fill {
        center: Vec2,
        radius: f32,
        color: Rgba,
        glow: Option<Glow>,
    },
    Stroke {
        center: Vec2,
        radius: f32,
        line_width: f32,
        color: Rgba,
    },
}

/// Surface that keeps the draw calls issued since the last clear
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: f32,
    height: f32,
    commands: Vec<DrawCommand>,
    clears: usize,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
            clears: 0,
        }
    }

    /// Host-side resize (the engine only clears)
    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Draw calls since the last clear
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of clears so far
    pub fn clears(&self) -> usize {
        self.clears
    }

    pub fn is_blank(&self) -> bool {
        self.commands.is_empty()
    }
}

impl DrawSurface for RecordingSurface {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.clears += 1;
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba, glow: Option<Glow>) {
        self.commands.push(DrawCommand::Fill {
            center,
            radius,
            color,
            glow,
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, line_width: f32, color: Rgba) {
        self.commands.push(DrawCommand::Stroke {
            center,
            radius,
            line_width,
            color,
        });
    }
}
