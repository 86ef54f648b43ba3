use super::{System, TickContext};
use crate::config::GameConfig;
use crate::ecs::{ComponentKind, EcsError, SystemDescriptor, World};
use crate::game::candy_blueprint;
use crate::math::DeterministicRng;
use tracing::debug;

/// Tops the arena back up to `max_candies`, one candy per tick, at seeded
/// pseudo-random grid cells.
#[derive(Debug, Clone)]
pub struct CandySpawnSystem {
    config: GameConfig,
    rng: DeterministicRng,
}

impl CandySpawnSystem {
    pub fn new(config: GameConfig) -> Self {
        let rng = DeterministicRng::new(config.rng_seed);
        Self { config, rng }
    }
}

impl System for CandySpawnSystem {
    fn descriptor(&self) -> SystemDescriptor {
        SystemDescriptor::new("candy_spawn").writes(&[
            ComponentKind::Position,
            ComponentKind::Sprite,
            ComponentKind::Collides,
            ComponentKind::Candy,
        ])
    }

    fn run(&mut self, world: &mut World, _ctx: &TickContext<'_>) -> Result<(), EcsError> {
        if !world.game_state().wants_candy() {
            return Ok(());
        }

        world.game_state_mut().current_candies += 1;
        let candy = world.create_entity(candy_blueprint(&self.config, &mut self.rng))?;
        debug!(%candy, current = world.game_state().current_candies, "candy spawned");
        Ok(())
    }
}
