//! Simulation systems
//!
//! A system is a query-iterate-mutate pass over the [`World`]. Systems own
//! no reference to the world; it is handed to [`System::run`] on every tick
//! together with the frame's [`TickContext`].

mod collision;
mod movement;
mod schedule;
mod spawn;

pub use collision::CollisionSystem;
pub use movement::MovementSystem;
pub use schedule::{Schedule, ScheduleError};
pub use spawn::CandySpawnSystem;

use crate::ecs::{EcsError, SystemDescriptor, World};
use crate::input::DirectionInput;

/// Per-tick inputs shared by every system.
pub struct TickContext<'a> {
    /// Seconds since the previous tick.
    pub dt: f32,
    pub input: &'a dyn DirectionInput,
}

impl<'a> TickContext<'a> {
    pub fn new(dt: f32, input: &'a dyn DirectionInput) -> Self {
        Self { dt, input }
    }
}

pub trait System {
    fn descriptor(&self) -> SystemDescriptor;

    fn run(&mut self, world: &mut World, ctx: &TickContext<'_>) -> Result<(), EcsError>;
}
