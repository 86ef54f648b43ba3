//! Headless game loop: one schedule run and one draw pass per frame

use anyhow::Result;
use slither_core::ecs::{Entity, World};
use slither_core::game::setup_world;
use slither_core::input::DirectionInput;
use slither_core::systems::{
    CandySpawnSystem, CollisionSystem, MovementSystem, Schedule, TickContext,
};
use slither_core::time::{FrameClock, SimulationTime, SystemClock};
use slither_core::GameConfig;
use slither_metrics::{Counter, SystemProfiler};
use slither_render::{DrawSystem, Renderer};
use tracing::info;

pub struct Game {
    world: World,
    player: Entity,
    schedule: Schedule,
    draw: DrawSystem,
    clock: Box<dyn FrameClock>,
    time: SimulationTime,
    counter: Counter,
}

impl Game {
    pub fn new(config: &GameConfig) -> Result<Self> {
        Self::with_clock(config, Box::new(SystemClock::new()))
    }

    pub fn with_clock(config: &GameConfig, clock: Box<dyn FrameClock>) -> Result<Self> {
        let (world, player) = setup_world(config)?;

        let mut schedule = Schedule::new();
        schedule.add_system(MovementSystem::new(config.segment_size))?;
        schedule.add_system(CollisionSystem::new())?;
        schedule.add_system(CandySpawnSystem::new(config.clone()))?;
        info!(systems = ?schedule.names().collect::<Vec<_>>(), "schedule built");

        Ok(Self {
            world,
            player,
            schedule,
            draw: DrawSystem::new(config.segment_size),
            clock,
            time: SimulationTime::new(),
            counter: Counter::new(),
        })
    }

    /// Run one frame. Returns whether the simulation advanced; a paused
    /// world is still drawn but its animations stand still.
    pub fn frame(
        &mut self,
        input: &dyn DirectionInput,
        renderer: &mut dyn Renderer,
    ) -> Result<bool> {
        let dt = self.clock.frame_delta_seconds();
        let advanced = self.schedule.run(&mut self.world, &TickContext::new(dt, input))?;

        if advanced {
            self.time.advance_tick(dt);
            self.counter.increment("ticks", 1);
        } else {
            self.counter.increment("paused_frames", 1);
        }

        self.draw.run(&mut self.world, renderer, if advanced { dt } else { 0.0 });
        Ok(advanced)
    }

    pub fn toggle_pause(&mut self) {
        let state = self.world.toggle_pause();
        info!(?state, tick = self.time.tick_count(), "run state changed");
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn player(&self) -> Entity {
        self.player
    }

    pub fn time(&self) -> &SimulationTime {
        &self.time
    }

    pub fn counter(&self) -> &Counter {
        &self.counter
    }

    pub fn profiler(&self) -> &SystemProfiler {
        self.schedule.profiler()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slither_core::components::{PlayerControlled, Position};
    use slither_core::ecs::ComponentKind;
    use slither_core::input::{Direction, HeldDirections, NoInput};
    use slither_core::time::FixedClock;
    use slither_render::DrawList;

    fn game() -> Game {
        Game::with_clock(&GameConfig::default(), Box::new(FixedClock::new(0.1))).unwrap()
    }

    #[test]
    fn frames_advance_time_and_fill_candies() {
        let mut game = game();
        let mut list = DrawList::new();
        for _ in 0..5 {
            assert!(game.frame(&NoInput, &mut list).unwrap());
        }

        assert_eq!(game.time().tick_count(), 5);
        assert_eq!(game.counter().get("ticks"), 5);
        assert!(game.world().game_state().current_candies <= 5);
        assert_eq!(game.world().query(&[ComponentKind::Candy]).len(), 1);
        assert!(!list.is_empty());
    }

    #[test]
    fn held_key_moves_the_player() {
        let mut game = game();
        let mut list = DrawList::new();
        let input = HeldDirections(vec![Direction::Right]);
        game.frame(&input, &mut list).unwrap();

        let position = game.world().get::<Position>(game.player()).unwrap();
        assert!((position.x - 209.0).abs() < 1e-4);
        assert_eq!(position.y, 200.0);
        assert!(game.world().has_component(game.player(), ComponentKind::PlayerControlled));
        assert!(game.world().get::<PlayerControlled>(game.player()).is_some());
    }

    #[test]
    fn paused_game_still_draws() {
        let mut game = game();
        game.toggle_pause();

        let mut list = DrawList::new();
        assert!(!game.frame(&NoInput, &mut list).unwrap());
        assert_eq!(game.time().tick_count(), 0);
        assert_eq!(game.counter().get("paused_frames"), 1);
        // Four walls and the player, each drawn over its collider.
        assert_eq!(list.len(), 10);
    }
}
