use super::{System, TickContext};
use crate::ecs::{ComponentKind, ComponentMask, EcsError, SystemDescriptor, World};
use crate::input::steering;

/// Steers the player from the held direction keys, then integrates every
/// moving entity and drags the snake body behind its head.
#[derive(Debug, Clone)]
pub struct MovementSystem {
    segment_spacing: f32,
}

impl MovementSystem {
    pub fn new(segment_spacing: f32) -> Self {
        Self { segment_spacing }
    }
}

impl System for MovementSystem {
    fn descriptor(&self) -> SystemDescriptor {
        SystemDescriptor::new("movement")
            .reads(&[ComponentKind::Movement])
            .writes(&[
                ComponentKind::Position,
                ComponentKind::Movement,
                ComponentKind::Collides,
                ComponentKind::PlayerControlled,
            ])
    }

    fn run(&mut self, world: &mut World, ctx: &TickContext<'_>) -> Result<(), EcsError> {
        // No key held keeps the current heading.
        if let Some(heading) = steering(ctx.input) {
            let steered = ComponentMask::of(&[
                ComponentKind::Position,
                ComponentKind::Movement,
                ComponentKind::PlayerControlled,
            ]);
            for archetype in world.query_mut(steered) {
                let (_, columns) = archetype.split_mut();
                for movement in columns.movement.into_iter().flatten() {
                    movement.direction = heading;
                }
            }
        }

        let moving = ComponentMask::of(&[ComponentKind::Position, ComponentKind::Movement]);
        for archetype in world.query_mut(moving) {
            let (_, columns) = archetype.split_mut();
            let (Some(positions), Some(movements)) = (columns.position, columns.movement) else {
                continue;
            };

            for (position, movement) in positions.iter_mut().zip(movements.iter()) {
                let step = movement.direction * ctx.dt * movement.speed;
                position.x += step.x;
                position.y += step.y;
            }

            if let Some(colliders) = columns.collides {
                for (collider, position) in colliders.iter_mut().zip(positions.iter()) {
                    collider.x = position.x;
                    collider.y = position.y;
                }
            }

            if let Some(players) = columns.player_controlled {
                for (player, position) in players.iter_mut().zip(positions.iter()) {
                    player.follow(position.as_vec2(), self.segment_spacing);
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Collides, Movement, PlayerControlled, Position};
    use crate::component_set;
    use crate::input::{Direction, HeldDirections, NoInput};
    use glam::Vec2;

    fn player(world: &mut World) -> crate::ecs::Entity {
        world
            .create_entity(component_set![
                Position::new(100.0, 100.0),
                Movement {
                    direction: Vec2::ZERO,
                    speed: 90.0
                },
                Collides::new(100.0, 100.0, 20.0, 20.0),
                PlayerControlled::default(),
            ])
            .unwrap()
    }

    #[test]
    fn keys_steer_and_position_integrates() {
        let mut world = World::new();
        let e = player(&mut world);
        let held = HeldDirections(vec![Direction::Right]);

        MovementSystem::new(20.0)
            .run(&mut world, &TickContext::new(0.5, &held))
            .unwrap();

        assert_eq!(world.get::<Movement>(e).unwrap().direction, Vec2::X);
        assert_eq!(world.get::<Position>(e), Some(&Position::new(145.0, 100.0)));
        assert_eq!(
            world.get::<Collides>(e),
            Some(&Collides::new(145.0, 100.0, 20.0, 20.0))
        );
    }

    #[test]
    fn heading_is_kept_without_keys() {
        let mut world = World::new();
        let e = player(&mut world);
        world.get_mut::<Movement>(e).unwrap().direction = Vec2::new(0.0, 1.0);

        MovementSystem::new(20.0)
            .run(&mut world, &TickContext::new(1.0, &NoInput))
            .unwrap();

        assert_eq!(world.get::<Position>(e), Some(&Position::new(100.0, 190.0)));
    }

    #[test]
    fn entities_without_player_tag_are_not_steered() {
        let mut world = World::new();
        let drifter = world
            .create_entity(component_set![
                Position::new(0.0, 0.0),
                Movement {
                    direction: Vec2::new(0.0, -1.0),
                    speed: 10.0
                },
            ])
            .unwrap();
        let held = HeldDirections(vec![Direction::Left]);

        MovementSystem::new(20.0)
            .run(&mut world, &TickContext::new(1.0, &held))
            .unwrap();

        assert_eq!(world.get::<Position>(drifter), Some(&Position::new(0.0, -10.0)));
    }

    #[test]
    fn body_follows_head() {
        let mut world = World::new();
        let e = player(&mut world);
        world
            .get_mut::<PlayerControlled>(e)
            .unwrap()
            .grow(Vec2::new(100.0, 100.0));
        let held = HeldDirections(vec![Direction::Down]);

        MovementSystem::new(20.0)
            .run(&mut world, &TickContext::new(0.5, &held))
            .unwrap();

        // head moved 45 down; the segment trails 20 behind
        let body = &world.get::<PlayerControlled>(e).unwrap().body;
        assert_eq!(body, &vec![Vec2::new(100.0, 125.0)]);
    }
}
