use super::{System, TickContext};
use crate::collision::{classify, snap, CollisionSide, Rect};
use crate::components::{Collides, PlayerControlled, Position};
use crate::ecs::{
    CommandBuffer, ComponentKind, ComponentMask, EcsError, Entity, SystemDescriptor, World,
};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Row snapshot taken before pair resolution.
#[derive(Debug, Clone, Copy)]
struct Body {
    entity: Entity,
    rect: Rect,
    moved: bool,
}

/// One archetype's worth of colliders.
#[derive(Debug)]
struct Group {
    mask: ComponentMask,
    moving: bool,
    player: bool,
    candy: bool,
    bodies: Vec<Body>,
}

/// Brute-force pairwise collision between every entity with a position and
/// a collider.
///
/// Moving entities are pushed back flush against whatever they hit. A player
/// touching a candy eats it: the candy is despawned after the pass, the
/// snake grows one segment and the world's candy count drops.
#[derive(Debug, Default)]
pub struct CollisionSystem {
    commands: CommandBuffer,
}

impl CollisionSystem {
    pub fn new() -> Self {
        Self::default()
    }

    fn snapshot(world: &World) -> Vec<Group> {
        world
            .query(&[ComponentKind::Position, ComponentKind::Collides])
            .into_iter()
            .filter_map(|archetype| {
                let positions = archetype.column::<Position>()?;
                let colliders = archetype.column::<Collides>()?;
                let bodies = archetype
                    .entities()
                    .iter()
                    .zip(positions.iter().zip(colliders))
                    .map(|(entity, (position, collider))| Body {
                        entity: *entity,
                        rect: Rect::new(position.x, position.y, collider.width, collider.height),
                        moved: false,
                    })
                    .collect();
                let mask = archetype.mask();
                Some(Group {
                    mask,
                    moving: mask.contains(ComponentKind::Movement),
                    player: mask.contains(ComponentKind::PlayerControlled),
                    candy: mask.contains(ComponentKind::Candy),
                    bodies,
                })
            })
            .collect()
    }

    fn write_back(world: &mut World, groups: &[Group]) {
        for group in groups.iter().filter(|group| group.moving) {
            let Some(archetype) = world.archetype_mut(group.mask) else {
                continue;
            };
            let (_, columns) = archetype.split_mut();
            let (Some(positions), Some(colliders)) = (columns.position, columns.collides) else {
                continue;
            };
            // No structural change happened since the snapshot, so rows line up.
            for (row, body) in group.bodies.iter().enumerate().filter(|(_, body)| body.moved) {
                positions[row].x = body.rect.x;
                positions[row].y = body.rect.y;
                colliders[row].x = body.rect.x;
                colliders[row].y = body.rect.y;
            }
        }
    }
}

impl System for CollisionSystem {
    fn descriptor(&self) -> SystemDescriptor {
        SystemDescriptor::new("collision")
            .reads(&[ComponentKind::Movement, ComponentKind::Candy])
            .writes(&[
                ComponentKind::Position,
                ComponentKind::Collides,
                ComponentKind::PlayerControlled,
            ])
    }

    fn run(&mut self, world: &mut World, _ctx: &TickContext<'_>) -> Result<(), EcsError> {
        let mut groups = Self::snapshot(world);
        let mut eaten: HashSet<Entity> = HashSet::new();
        let mut growth: HashMap<Entity, u32> = HashMap::new();

        for i in 0..groups.len() {
            for j in 0..groups.len() {
                let (moving, eats) = (groups[i].moving, groups[i].player && groups[j].candy);
                for a in 0..groups[i].bodies.len() {
                    for b in 0..groups[j].bodies.len() {
                        if i == j && a == b {
                            continue;
                        }
                        let body_a = groups[i].bodies[a];
                        let body_b = groups[j].bodies[b];
                        if eaten.contains(&body_a.entity) || eaten.contains(&body_b.entity) {
                            continue;
                        }

                        let side = classify(&body_a.rect, &body_b.rect);
                        match side {
                            CollisionSide::None => continue,
                            CollisionSide::FullOverlap => {
                                debug!(a = %body_a.entity, b = %body_b.entity, "full overlap");
                                continue;
                            }
                            _ => {}
                        }

                        debug!(a = %body_a.entity, b = %body_b.entity, ?side, "collision");
                        if moving {
                            let body = &mut groups[i].bodies[a];
                            body.rect = snap(&body_a.rect, &body_b.rect, side);
                            body.moved = true;
                        }

                        if eats && eaten.insert(body_b.entity) {
                            self.commands.despawn(body_b.entity);
                            *growth.entry(body_a.entity).or_insert(0) += 1;
                            world.game_state_mut().candy_eaten();
                            debug!(player = %body_a.entity, candy = %body_b.entity, "candy eaten");
                        }
                    }
                }
            }
        }

        Self::write_back(world, &groups);

        for (entity, segments) in growth {
            let head = world
                .get::<Position>(entity)
                .map(|position| position.as_vec2())
                .ok_or(EcsError::NotFound { entity })?;
            if let Some(player) = world.get_mut::<PlayerControlled>(entity) {
                for _ in 0..segments {
                    player.grow(head);
                }
                debug!(%entity, length = player.body.len(), "snake grew");
            }
        }

        world.apply(&mut self.commands)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component_set;
    use crate::components::{Candy, Movement, Sprite};
    use crate::input::NoInput;
    use crate::state::GameState;
    use glam::Vec2;

    fn ctx() -> TickContext<'static> {
        TickContext::new(0.016, &NoInput)
    }

    fn wall(world: &mut World, x: f32, y: f32, w: f32, h: f32) -> Entity {
        world
            .create_entity(component_set![
                Position::new(x, y),
                Sprite::default(),
                Collides::new(x, y, w, h),
            ])
            .unwrap()
    }

    fn snake(world: &mut World, x: f32, y: f32) -> Entity {
        world
            .create_entity(component_set![
                Position::new(x, y),
                Movement {
                    direction: Vec2::Y,
                    speed: 90.0
                },
                Collides::new(x, y, 10.0, 10.0),
                PlayerControlled::default(),
            ])
            .unwrap()
    }

    fn candy(world: &mut World, x: f32, y: f32) -> Entity {
        world
            .create_entity(component_set![
                Position::new(x, y),
                Collides::new(x, y, 10.0, 10.0),
                Candy,
            ])
            .unwrap()
    }

    #[test]
    fn moving_entity_is_snapped_out_of_wall() {
        let mut world = World::new();
        let w = wall(&mut world, 0.0, 0.0, 10.0, 10.0);
        let s = snake(&mut world, 5.0, 9.0);

        CollisionSystem::new().run(&mut world, &ctx()).unwrap();

        assert_eq!(world.get::<Position>(s), Some(&Position::new(5.0, 10.0)));
        assert_eq!(world.get::<Collides>(s).map(|c| (c.x, c.y)), Some((5.0, 10.0)));
        // Walls never move.
        assert_eq!(world.get::<Position>(w), Some(&Position::new(0.0, 0.0)));
    }

    #[test]
    fn separated_entities_are_untouched() {
        let mut world = World::new();
        wall(&mut world, 0.0, 0.0, 10.0, 10.0);
        let s = snake(&mut world, 15.0, 0.0);

        CollisionSystem::new().run(&mut world, &ctx()).unwrap();
        assert_eq!(world.get::<Position>(s), Some(&Position::new(15.0, 0.0)));
    }

    #[test]
    fn player_eats_candy_once() {
        let mut world = World::with_game_state(GameState {
            current_candies: 2,
            max_candies: 5,
        });
        let s = snake(&mut world, 0.0, 0.0);
        let c = candy(&mut world, 0.0, 8.0);

        CollisionSystem::new().run(&mut world, &ctx()).unwrap();

        assert!(!world.contains(c));
        assert_eq!(world.game_state().current_candies, 1);
        let body = &world.get::<PlayerControlled>(s).unwrap().body;
        assert_eq!(body.len(), 1);
    }

    #[test]
    fn candy_touched_by_two_snakes_is_eaten_once() {
        let mut world = World::with_game_state(GameState {
            current_candies: 2,
            max_candies: 5,
        });
        let first = snake(&mut world, 0.0, 0.0);
        // Different archetype, so the candy is reached through a second group.
        let second = world
            .create_entity(component_set![
                Position::new(0.0, 18.0),
                Movement {
                    direction: Vec2::NEG_Y,
                    speed: 90.0
                },
                Collides::new(0.0, 18.0, 10.0, 10.0),
                PlayerControlled::default(),
                Sprite::default(),
            ])
            .unwrap();
        let c = candy(&mut world, 0.0, 9.0);

        CollisionSystem::new().run(&mut world, &ctx()).unwrap();

        assert!(!world.contains(c));
        assert_eq!(world.entity_count(), 2);
        assert_eq!(world.game_state().current_candies, 1);
        let grown = |e| world.get::<PlayerControlled>(e).unwrap().body.len();
        assert_eq!(grown(first) + grown(second), 1);
        assert_eq!(grown(first), 1);
    }

    #[test]
    fn candy_touching_wall_is_not_eaten() {
        let mut world = World::new();
        wall(&mut world, 0.0, 0.0, 10.0, 10.0);
        let c = candy(&mut world, 10.0, 0.0);

        CollisionSystem::new().run(&mut world, &ctx()).unwrap();
        assert!(world.contains(c));
    }

    #[test]
    fn full_overlap_is_ignored() {
        let mut world = World::new();
        wall(&mut world, 0.0, 0.0, 50.0, 50.0);
        let s = snake(&mut world, 10.0, 10.0);

        CollisionSystem::new().run(&mut world, &ctx()).unwrap();
        assert_eq!(world.get::<Position>(s), Some(&Position::new(10.0, 10.0)));
    }
}
