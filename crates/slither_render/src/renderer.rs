//! Rendering boundary
//!
//! Draw code talks to a [`Renderer`]; the wgpu backend and the test-side
//! [`DrawList`] both implement it.

use slither_core::collision::Rect;
use slither_core::color::Color;
use slither_core::components::TextureId;

pub trait Renderer {
    /// Filled axis-aligned rectangle.
    fn draw_rect(&mut self, rect: Rect, color: Color);

    /// Whole texture with its top-left corner at (`x`, `y`), tinted by `color`.
    fn draw_sprite(&mut self, texture: TextureId, x: f32, y: f32, color: Color);

    /// `source` region of `texture` stretched over `dest`.
    fn draw_textured_region(&mut self, texture: TextureId, source: Rect, dest: Rect, color: Color);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Rect {
        rect: Rect,
        color: Color,
    },
    Sprite {
        texture: TextureId,
        x: f32,
        y: f32,
        color: Color,
    },
    TexturedRegion {
        texture: TextureId,
        source: Rect,
        dest: Rect,
        color: Color,
    },
}

/// Renderer that only records what it was asked to draw.
#[derive(Debug, Default, Clone)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Renderer for DrawList {
    fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Rect { rect, color });
    }

    fn draw_sprite(&mut self, texture: TextureId, x: f32, y: f32, color: Color) {
        self.commands.push(DrawCommand::Sprite {
            texture,
            x,
            y,
            color,
        });
    }

    fn draw_textured_region(&mut self, texture: TextureId, source: Rect, dest: Rect, color: Color) {
        self.commands.push(DrawCommand::TexturedRegion {
            texture,
            source,
            dest,
            color,
        });
    }
}
