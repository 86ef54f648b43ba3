//! Turns world state into draw calls

use crate::renderer::Renderer;
use slither_core::collision::Rect;
use slither_core::color::Color;
use slither_core::components::{Animation, Collides, PlayerControlled, Position, Sprite};
use slither_core::ecs::{ComponentKind, ComponentMask, World};

/// Issues one draw per visible entity per frame.
///
/// Sprites are drawn over a filled outline of their collider, animations
/// advance their frame timers, and the snake body is drawn last so it
/// shows above the candies it crosses.
#[derive(Debug, Clone)]
pub struct DrawSystem {
    pub segment_size: f32,
    pub sprite_collider_color: Color,
    pub animation_collider_color: Color,
    pub body_color: Color,
}

impl DrawSystem {
    pub fn new(segment_size: f32) -> Self {
        Self {
            segment_size,
            sprite_collider_color: Color::GREEN,
            animation_collider_color: Color::RED,
            body_color: Color::LIME,
        }
    }

    pub fn run(&mut self, world: &mut World, renderer: &mut dyn Renderer, dt: f32) {
        self.draw_sprites(world, renderer);
        self.draw_animations(world, renderer, dt);
        self.draw_bodies(world, renderer);
    }

    fn draw_sprites(&self, world: &World, renderer: &mut dyn Renderer) {
        for archetype in world.query(&[ComponentKind::Position, ComponentKind::Sprite]) {
            let (Some(positions), Some(sprites)) = (
                archetype.column::<Position>(),
                archetype.column::<Sprite>(),
            ) else {
                continue;
            };
            let colliders = archetype.column::<Collides>();

            for (row, (position, sprite)) in positions.iter().zip(sprites).enumerate() {
                if let Some(collider) = colliders.and_then(|c| c.get(row)) {
                    renderer.draw_rect(collider.rect(), self.sprite_collider_color);
                }
                match sprite.texture {
                    Some(texture) => {
                        renderer.draw_sprite(texture, position.x, position.y, sprite.color)
                    }
                    None => renderer.draw_rect(
                        Rect::new(position.x, position.y, sprite.width, sprite.height),
                        sprite.color,
                    ),
                }
            }
        }
    }

    fn draw_animations(&self, world: &mut World, renderer: &mut dyn Renderer, dt: f32) {
        let animated = ComponentMask::of(&[ComponentKind::Position, ComponentKind::Animation]);
        for archetype in world.query_mut(animated) {
            let (_, columns) = archetype.split_mut();
            let (Some(positions), Some(animations)) = (columns.position, columns.animation) else {
                continue;
            };
            let colliders = columns.collides;

            let rows = positions.iter().zip(animations.iter_mut()).enumerate();
            for (row, (position, animation)) in rows {
                if let Some(collider) = colliders.as_deref().and_then(|c| c.get(row)) {
                    renderer.draw_rect(collider.rect(), self.animation_collider_color);
                }
                animation.advance(dt);
                draw_frame(renderer, position, animation);
            }
        }
    }

    fn draw_bodies(&self, world: &World, renderer: &mut dyn Renderer) {
        for archetype in world.query(&[ComponentKind::PlayerControlled]) {
            for player in archetype.column::<PlayerControlled>().into_iter().flatten() {
                for segment in &player.body {
                    renderer.draw_rect(
                        Rect::new(segment.x, segment.y, self.segment_size, self.segment_size),
                        self.body_color,
                    );
                }
            }
        }
    }
}

fn draw_frame(renderer: &mut dyn Renderer, position: &Position, animation: &Animation) {
    let size = animation.display_size;
    let dest = Rect::new(position.x, position.y, size, size);
    match animation.sheet.texture {
        Some(texture) => {
            renderer.draw_textured_region(texture, animation.frame_rect(), dest, Color::WHITE)
        }
        None => renderer.draw_rect(dest, animation.sheet.color),
    }
}
