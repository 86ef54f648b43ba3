//! Arena setup: the player, the walls and candy blueprints

use crate::color::Color;
use crate::component_set;
use crate::components::{Candy, Collides, Movement, PlayerControlled, Position, Sprite};
use crate::config::GameConfig;
use crate::ecs::{ComponentSet, EcsError, Entity, World};
use crate::math::DeterministicRng;
use crate::state::GameState;
use glam::Vec2;
use tracing::info;

/// Player head at `player_start`, standing still until a key is pressed.
pub fn spawn_player(world: &mut World, config: &GameConfig) -> Result<Entity, EcsError> {
    let [x, y] = config.player_start;
    let size = config.segment_size;
    world.create_entity(component_set![
        Position::new(x, y),
        Movement {
            direction: Vec2::ZERO,
            speed: config.movement_speed,
        },
        Collides::new(x, y, size, size),
        PlayerControlled::default(),
        Sprite::solid(size, size, Color::LIME),
    ])
}

/// Four solid walls lining the arena edges: top, right, left, bottom.
pub fn spawn_arena_borders(
    world: &mut World,
    config: &GameConfig,
) -> Result<Vec<Entity>, EcsError> {
    let (w, h, t) = (config.arena_width, config.arena_height, config.border_thickness);
    [
        (0.0, 0.0, w, t),
        (w - t, 0.0, t, h),
        (0.0, 0.0, t, h),
        (0.0, h - t, w, t),
    ]
    .into_iter()
    .map(|(x, y, width, height)| {
        world.create_entity(component_set![
            Position::new(x, y),
            Sprite::solid(width, height, Color::RED),
            Collides::new(x, y, width, height),
        ])
    })
    .collect()
}

/// Component set for one candy on a random free-standing grid cell between
/// the walls.
pub fn candy_blueprint(config: &GameConfig, rng: &mut DeterministicRng) -> ComponentSet {
    let (columns, rows) = config.playable_cells();
    let size = config.segment_size;
    let x = config.border_thickness + rng.next_below(columns) as f32 * size;
    let y = config.border_thickness + rng.next_below(rows) as f32 * size;

    component_set![
        Position::new(x, y),
        Sprite::solid(size, size, Color::GOLD),
        Collides::new(x, y, size, size),
        Candy,
    ]
}

/// Fresh world holding the walls and the player.
pub fn setup_world(config: &GameConfig) -> Result<(World, Entity), EcsError> {
    let mut world = World::with_game_state(GameState::new(config.max_candies));
    spawn_arena_borders(&mut world, config)?;
    let player = spawn_player(&mut world, config)?;
    info!(
        %player,
        arena = ?(config.arena_width, config.arena_height),
        max_candies = config.max_candies,
        "world ready"
    );
    Ok((world, player))
}
