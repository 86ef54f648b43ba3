//! Plain-data component records
//!
//! Each type here is registered with the ECS in `ecs::component`, which gives
//! it a unique mask bit and a typed column in every archetype that holds it.

use crate::collision::Rect;
use crate::color::Color;
use glam::Vec2;

/// Opaque handle to a texture owned by the rendering backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Top-left corner of an entity in arena units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Flat colored rectangle, or a texture tinted by `color` when `texture` is set.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sprite {
    pub width: f32,
    pub height: f32,
    pub texture: Option<TextureId>,
    pub color: Color,
}

impl Sprite {
    pub const fn solid(width: f32, height: f32, color: Color) -> Self {
        Self {
            width,
            height,
            texture: None,
            color,
        }
    }
}

/// Unit-ish heading and speed in arena units per second.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Movement {
    pub direction: Vec2,
    pub speed: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Health {
    pub max: i32,
    pub current: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Alive {
    pub is_alive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationMode {
    /// Wrap back to the first frame after the last one.
    #[default]
    Repeating,
    /// Hold the last frame.
    OneShot,
}

/// Sprite-sheet animation.
///
/// Frames are laid out row-major on the sheet; frame `n` lives at column
/// `n % frames_per_row` and row `n / frames_per_row`, each tile separated by
/// the configured padding and shifted by the sheet offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    pub sheet: Sprite,
    pub first: u32,
    pub last: u32,
    pub current: u32,
    pub frames_per_row: u32,
    pub tile_size: u32,
    pub x_pad: u32,
    pub y_pad: u32,
    pub x_offset: u32,
    pub y_offset: u32,
    pub mode: AnimationMode,
    /// Seconds each frame stays on screen.
    pub frame_duration: f32,
    /// Seconds until the next frame change.
    pub time_left: f32,
    /// Edge length of the on-screen square the frame is drawn into.
    pub display_size: f32,
}

impl Default for Animation {
    fn default() -> Self {
        Self {
            sheet: Sprite::default(),
            first: 0,
            last: 0,
            current: 0,
            frames_per_row: 1,
            tile_size: 16,
            x_pad: 0,
            y_pad: 0,
            x_offset: 0,
            y_offset: 0,
            mode: AnimationMode::Repeating,
            frame_duration: 0.1,
            time_left: 0.1,
            display_size: 128.0,
        }
    }
}

impl Animation {
    /// Count down the frame timer and step to the next frame when it expires.
    pub fn advance(&mut self, dt: f32) {
        self.time_left -= dt;
        if self.time_left > 0.0 {
            return;
        }

        self.time_left = self.frame_duration;
        self.current += 1;
        if self.current > self.last {
            self.current = match self.mode {
                AnimationMode::Repeating => self.first,
                AnimationMode::OneShot => self.last,
            };
        }
    }

    /// Source rectangle of the current frame on the sprite sheet.
    pub fn frame_rect(&self) -> Rect {
        let per_row = self.frames_per_row.max(1);
        let column = self.current % per_row;
        let row = self.current / per_row;
        let x = column * (self.tile_size + self.x_pad) + self.x_offset;
        let y = row * (self.tile_size + self.y_pad) + self.y_offset;
        Rect::new(
            x as f32,
            y as f32,
            self.tile_size as f32,
            self.tile_size as f32,
        )
    }
}

/// Marks the entity steered by the keyboard. `body` holds the trailing
/// segment positions, head-most first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlayerControlled {
    pub body: Vec<Vec2>,
}

impl PlayerControlled {
    /// Append one segment on top of the current tail (or the head when the
    /// body is still empty). It separates from the tail as the snake moves.
    pub fn grow(&mut self, head: Vec2) {
        let tail = self.body.last().copied().unwrap_or(head);
        self.body.push(tail);
    }

    /// Drag every segment towards its leader so that no gap exceeds `spacing`.
    pub fn follow(&mut self, head: Vec2, spacing: f32) {
        let mut leader = head;
        for segment in &mut self.body {
            let offset = leader - *segment;
            let distance = offset.length();
            if distance > spacing {
                *segment = leader - offset / distance * spacing;
            }
            leader = *segment;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AiControlled;

/// Axis-aligned collision box. `x`/`y` mirror the owner's position after
/// every movement step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Collides {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Collides {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Enemy;

/// Consumable: eaten by the player on contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Candy;
